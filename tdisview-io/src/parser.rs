//! Event text parser.
//!
//! The input is line oriented:
//!
//! ```text
//! Event <N>
//! <track parameters>
//! <hit fields>
//! <hit fields>
//! ...
//! Event <M>
//! ...
//! ```
//!
//! Lines are trimmed. A line starting with `Event` opens a block, the next line
//! always holds the track parameters, and every non-blank line up to the next
//! marker is a hit. Numeric tokens that fail to parse become `NaN` and are
//! counted; the parser itself never fails.

use std::fmt;
use std::iter::{Enumerate, Peekable};
use std::str::Split;

use serde::Serialize;
use tdisview_core::{EventMapping, EventNumber, EventRecord, HitRecord};

const EVENT_MARKER: &str = "Event";
const MAX_WARNINGS: usize = 64;

/// Parses a numeric token, returning `NaN` if it is not a number.
///
/// Accepts Rust's `f64` grammar: decimal and exponent forms with an optional
/// sign, `inf`/`infinity` (any case, giving ±∞) and `nan` (any case, with or
/// without a sign). Hexadecimal, thousands separators and empty tokens
/// read as `NaN`.
#[inline]
#[must_use]
pub fn parse_number_or_nan(token: &str) -> f64 {
    token.parse::<f64>().unwrap_or(f64::NAN)
}

/// Reads the leading integer of a token: an optional sign followed by digits.
/// Trailing characters are ignored, so `12abc` reads as 12.
fn parse_event_number(token: &str) -> Option<EventNumber> {
    let sign_len = usize::from(token.starts_with(['+', '-']));
    let digits = token[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len() - sign_len);
    token[..sign_len + digits].parse().ok()
}

/// A token that spells NaN, so its NaN value is intended.
fn is_literal_nan(token: &str) -> bool {
    token
        .strip_prefix(['+', '-'])
        .unwrap_or(token)
        .eq_ignore_ascii_case("nan")
}

#[inline]
fn is_marker(trimmed: &str) -> bool {
    trimmed.starts_with(EVENT_MARKER)
}

/// A token that could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedField {
    /// 1-based input line.
    pub line: usize,
    /// The offending token.
    pub token: String,
}

fn parse_fields(trimmed: &str, line: usize, malformed: &mut Vec<MalformedField>) -> Vec<f64> {
    trimmed
        .split_whitespace()
        .map(|token| {
            let value = parse_number_or_nan(token);
            if value.is_nan() && !is_literal_nan(token) {
                malformed.push(MalformedField {
                    line,
                    token: token.to_string(),
                });
            }
            value
        })
        .collect()
}

/// One `Event` block as found in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    /// Event number, or `None` if the marker carries no readable number.
    pub number: Option<EventNumber>,
    /// 1-based line of the marker.
    pub line: usize,
    /// Track parameters and hits.
    pub record: EventRecord,
    /// Tokens in this block that parsed as `NaN`.
    pub malformed: Vec<MalformedField>,
}

/// Lazy iterator over the `Event` blocks of a text buffer.
///
/// A blank track line yields empty track parameters, not a single zero.
///
/// Clone the iterator to restart a scan from the same position. A marker on
/// the last line has no track line and ends the iteration; its line is then
/// available from [`EventBlocks::truncated_marker`].
#[derive(Debug, Clone)]
pub struct EventBlocks<'a> {
    lines: Peekable<Enumerate<Split<'a, char>>>,
    truncated_marker: Option<usize>,
}

impl<'a> EventBlocks<'a> {
    /// Creates a block iterator over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate().peekable(),
            truncated_marker: None,
        }
    }

    /// Line of a trailing marker that had no track line, once reached.
    #[must_use]
    pub fn truncated_marker(&self) -> Option<usize> {
        self.truncated_marker
    }
}

impl Iterator for EventBlocks<'_> {
    type Item = EventBlock;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            let marker = raw.trim();
            if !is_marker(marker) {
                continue;
            }

            let number = marker
                .split_whitespace()
                .nth(1)
                .and_then(parse_event_number);
            let line = index + 1;

            let Some((track_index, track_raw)) = self.lines.next() else {
                self.truncated_marker = Some(line);
                return None;
            };

            let mut malformed = Vec::new();
            let track_params = parse_fields(track_raw.trim(), track_index + 1, &mut malformed);

            let mut hits = Vec::new();
            while let Some((hit_index, hit_raw)) =
                self.lines.next_if(|(_, raw)| !is_marker(raw.trim()))
            {
                let trimmed = hit_raw.trim();
                if trimmed.is_empty() {
                    continue;
                }
                hits.push(HitRecord::new(parse_fields(
                    trimmed,
                    hit_index + 1,
                    &mut malformed,
                )));
            }

            return Some(EventBlock {
                number,
                line,
                record: EventRecord::new(track_params, hits),
                malformed,
            });
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParserConfig {
    /// Number of leading event blocks to skip.
    pub skip_events: usize,
    /// Maximum number of event blocks to read after skipping.
    pub max_events: Option<usize>,
}

impl ParserConfig {
    /// Creates a configuration that reads everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of leading blocks to skip.
    #[must_use]
    pub fn with_skip_events(mut self, skip: usize) -> Self {
        self.skip_events = skip;
        self
    }

    /// Limits the number of blocks read.
    #[must_use]
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = Some(max);
        self
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A numeric token was replaced by `NaN`.
    MalformedNumericField { line: usize, token: String },
    /// A marker without a readable event number; its block was dropped.
    UnnumberedBlock { line: usize },
    /// An event number seen again; the later block replaced the earlier one.
    DuplicateEvent { line: usize, number: EventNumber },
    /// A marker on the last line, with no track line.
    TruncatedBlock { line: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedNumericField { line, token } => {
                write!(f, "line {line}: malformed numeric field '{token}'")
            }
            ParseWarning::UnnumberedBlock { line } => {
                write!(f, "line {line}: event marker without a number, block dropped")
            }
            ParseWarning::DuplicateEvent { line, number } => {
                write!(f, "line {line}: event {number} repeated, earlier block replaced")
            }
            ParseWarning::TruncatedBlock { line } => {
                write!(f, "line {line}: event marker at end of input, block dropped")
            }
        }
    }
}

/// Whether the input looked like event data at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStatus {
    /// At least one `Event` marker was found.
    Parsed,
    /// No `Event` marker was found.
    EmptyOrUnrecognized,
}

/// Counters and warnings collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// `Event` markers seen, including skipped and dropped blocks.
    pub markers: usize,
    /// Blocks skipped by the configuration.
    pub skipped_blocks: usize,
    /// Tokens replaced by `NaN`.
    pub malformed_fields: usize,
    /// Blocks that replaced an earlier block with the same number.
    pub duplicate_events: usize,
    /// Blocks dropped for lacking an event number.
    pub unnumbered_blocks: usize,
    /// Trailing markers without a track line.
    pub truncated_blocks: usize,
    warnings: Vec<ParseWarning>,
}

impl ParseReport {
    fn push_warning(&mut self, warning: ParseWarning) {
        if self.warnings.len() < MAX_WARNINGS {
            self.warnings.push(warning);
        }
    }

    /// The first warnings, in input order.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Returns true if anything was malformed, repeated or dropped.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.malformed_fields > 0
            || self.duplicate_events > 0
            || self.unnumbered_blocks > 0
            || self.truncated_blocks > 0
    }

    /// Classifies the input.
    #[must_use]
    pub fn status(&self) -> InputStatus {
        if self.markers == 0 {
            InputStatus::EmptyOrUnrecognized
        } else {
            InputStatus::Parsed
        }
    }
}

/// Parsed events together with their report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEvents {
    /// Events by number.
    pub events: EventMapping,
    /// What happened along the way.
    pub report: ParseReport,
}

/// Event text parser.
#[derive(Debug, Clone, Default)]
pub struct EventParser {
    config: ParserConfig,
}

impl EventParser {
    /// Creates a parser that reads every block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with a custom configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `text` into events, discarding the report.
    #[must_use]
    pub fn parse(&self, text: &str) -> EventMapping {
        self.parse_with_report(text).events
    }

    /// Parses `text` into events and a report of what was skipped or repaired.
    #[must_use]
    pub fn parse_with_report(&self, text: &str) -> ParsedEvents {
        let mut events = EventMapping::new();
        let mut report = ParseReport::default();
        let mut blocks = EventBlocks::new(text);
        let mut taken = 0usize;

        for block in blocks.by_ref() {
            report.markers += 1;
            if report.markers <= self.config.skip_events {
                report.skipped_blocks += 1;
                continue;
            }
            if self.config.max_events.is_some_and(|max| taken >= max) {
                report.markers -= 1;
                break;
            }
            taken += 1;

            report.malformed_fields += block.malformed.len();
            for field in block.malformed {
                report.push_warning(ParseWarning::MalformedNumericField {
                    line: field.line,
                    token: field.token,
                });
            }

            let Some(number) = block.number else {
                report.unnumbered_blocks += 1;
                report.push_warning(ParseWarning::UnnumberedBlock { line: block.line });
                continue;
            };

            log::debug!(
                "event {number}: {} track params, {} hits (line {})",
                block.record.track_params.len(),
                block.record.hit_count(),
                block.line
            );
            if events.insert(number, block.record).is_some() {
                report.duplicate_events += 1;
                report.push_warning(ParseWarning::DuplicateEvent {
                    line: block.line,
                    number,
                });
            }
        }

        if let Some(line) = blocks.truncated_marker() {
            report.markers += 1;
            report.truncated_blocks += 1;
            report.push_warning(ParseWarning::TruncatedBlock { line });
        }

        if report.has_issues() {
            log::warn!(
                "parsed {} events: {} malformed fields, {} duplicate, {} unnumbered, {} truncated",
                events.len(),
                report.malformed_fields,
                report.duplicate_events,
                report.unnumbered_blocks,
                report.truncated_blocks
            );
        }
        if report.status() == InputStatus::EmptyOrUnrecognized {
            log::info!("no event markers found in input");
        }

        ParsedEvents { events, report }
    }
}

/// Parses event text into a mapping from event number to record.
///
/// Never fails; see [`EventParser::parse_with_report`] for diagnostics.
#[must_use]
pub fn parse_events(text: &str) -> EventMapping {
    EventParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_or_nan() {
        assert!((parse_number_or_nan("1.5") - 1.5).abs() < f64::EPSILON);
        assert!((parse_number_or_nan("-2e-3") + 0.002).abs() < f64::EPSILON);
        assert!(parse_number_or_nan("abc").is_nan());
        assert!(parse_number_or_nan("").is_nan());
        assert!(parse_number_or_nan("1.2.3").is_nan());
        assert_eq!(parse_number_or_nan("inf"), f64::INFINITY);
        assert_eq!(parse_number_or_nan("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number_or_nan("-nan").is_nan());
        assert!(parse_number_or_nan("0x10").is_nan());
    }

    #[test]
    fn test_parse_event_number() {
        assert_eq!(parse_event_number("42"), Some(42));
        assert_eq!(parse_event_number("-7"), Some(-7));
        assert_eq!(parse_event_number("+3"), Some(3));
        assert_eq!(parse_event_number("12abc"), Some(12));
        assert_eq!(parse_event_number("1.5"), Some(1));
        assert_eq!(parse_event_number("abc"), None);
        assert_eq!(parse_event_number("-"), None);
        assert_eq!(parse_event_number("99999999999999999999"), None);
    }

    #[test]
    fn test_blocks_iterator() {
        let text = "header\nEvent 3\n0.1 0.2\n1 2 0 0 0 0\n\n2 3 0 1 0 0\nEvent 1\n0.5\n";
        let blocks: Vec<_> = EventBlocks::new(text).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].number, Some(3));
        assert_eq!(blocks[0].line, 2);
        assert_eq!(blocks[0].record.hit_count(), 2);
        assert_eq!(blocks[1].number, Some(1));
        assert_eq!(blocks[1].record.track_params, vec![0.5]);
        assert!(blocks[1].record.hits.is_empty());
    }

    #[test]
    fn test_blocks_restart_by_clone() {
        let text = "Event 1\n0\n1 1 1 1 1 1\nEvent 2\n0\n";
        let mut blocks = EventBlocks::new(text);
        let first = blocks.next().unwrap();
        let snapshot = blocks.clone();
        assert_eq!(first.number, Some(1));
        assert_eq!(blocks.next().unwrap().number, Some(2));
        assert_eq!(snapshot.map(|b| b.number).collect::<Vec<_>>(), vec![Some(2)]);
    }

    #[test]
    fn test_malformed_fields_become_nan() {
        let text = "Event 1\n0.5 x\n1.0 abc 2 3 4 5\n";
        let parsed = EventParser::new().parse_with_report(text);
        let record = parsed.events.get(1).unwrap();

        assert!(record.track_params[1].is_nan());
        assert!(record.hits[0].fields()[1].is_nan());
        assert_eq!(parsed.report.malformed_fields, 2);
        assert_eq!(
            parsed.report.warnings()[0],
            ParseWarning::MalformedNumericField {
                line: 2,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_literal_nan_is_not_malformed() {
        let parsed = EventParser::new().parse_with_report("Event 1\nNaN -nan +NaN nana\n");
        let params = &parsed.events.get(1).unwrap().track_params;
        assert_eq!(params.len(), 4);
        assert!(params.iter().all(|v| v.is_nan()));
        assert_eq!(parsed.report.malformed_fields, 1);
        assert_eq!(
            parsed.report.warnings()[0],
            ParseWarning::MalformedNumericField {
                line: 2,
                token: "nana".to_string()
            }
        );
    }

    #[test]
    fn test_unnumbered_block_is_dropped() {
        let text = "Event\n0.1\n1 2 3 4 5 6\nEvent 2\n0.2\n";
        let parsed = EventParser::new().parse_with_report(text);
        assert_eq!(parsed.events.numbers().collect::<Vec<_>>(), vec![2]);
        assert_eq!(parsed.report.unnumbered_blocks, 1);
        assert_eq!(
            parsed.report.warnings(),
            &[ParseWarning::UnnumberedBlock { line: 1 }]
        );
    }

    #[test]
    fn test_trailing_marker_is_dropped() {
        let text = "Event 1\n0.5\n1 2 3 4 5 6\nEvent 2";
        let parsed = EventParser::new().parse_with_report(text);
        assert_eq!(parsed.events.len(), 1);
        assert!(parsed.events.contains(1));
        assert_eq!(parsed.report.markers, 2);
        assert_eq!(parsed.report.truncated_blocks, 1);
        assert_eq!(
            parsed.report.warnings(),
            &[ParseWarning::TruncatedBlock { line: 4 }]
        );
    }

    #[test]
    fn test_track_line_is_taken_unconditionally() {
        // a marker right after a marker is read as track parameters
        let parsed = parse_events("Event 1\nEvent 2\n1 2 3 4 5 6\n");
        assert_eq!(parsed.len(), 1);
        let record = parsed.get(1).unwrap();
        assert_eq!(record.track_params.len(), 2);
        assert!(record.track_params[0].is_nan());
        assert_eq!(record.hit_count(), 1);
    }

    #[test]
    fn test_blank_track_line() {
        let record = parse_events("Event 5\n\n1 2 3 4 5 6\n").get(5).cloned().unwrap();
        assert!(record.track_params.is_empty());
        assert_eq!(record.hit_count(), 1);
    }

    #[test]
    fn test_crlf_input() {
        let mapping = parse_events("Event 1\r\n0.5 1.0\r\n1 2 3 4 5 6\r\n");
        let record = mapping.get(1).unwrap();
        assert_eq!(record.track_params, vec![0.5, 1.0]);
        assert_eq!(record.hits[0].fields(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_skip_and_limit() {
        let text = "Event 1\n0\nEvent 2\n0\nEvent 3\n0\nEvent 4\n0\n";
        let config = ParserConfig::new().with_skip_events(1).with_max_events(2);
        let parsed = EventParser::with_config(config).parse_with_report(text);
        assert_eq!(parsed.events.numbers().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(parsed.report.skipped_blocks, 1);
        assert_eq!(parsed.report.markers, 3);
    }

    #[test]
    fn test_empty_input_status() {
        for text in ["", "no markers here\n1 2 3\n"] {
            let parsed = EventParser::new().parse_with_report(text);
            assert!(parsed.events.is_empty());
            assert_eq!(parsed.report.status(), InputStatus::EmptyOrUnrecognized);
        }
        let parsed = EventParser::new().parse_with_report("Event 1");
        assert_eq!(parsed.report.status(), InputStatus::Parsed);
    }

    #[test]
    fn test_warning_cap() {
        let text = format!("Event 1\n0\n{}\n", vec!["x"; 100].join(" "));
        let parsed = EventParser::new().parse_with_report(&text);
        assert_eq!(parsed.report.malformed_fields, 100);
        assert_eq!(parsed.report.warnings().len(), MAX_WARNINGS);
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::DuplicateEvent { line: 9, number: 4 };
        assert_eq!(
            warning.to_string(),
            "line 9: event 4 repeated, earlier block replaced"
        );
    }
}
