//! Main application state and logic.
//!
//! Contains the `TdisViewApp` struct which owns the viewer session, the
//! loaded text, and the UI state.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use eframe::egui;

use crate::state::{StatusLine, UiState, ViewerSession};
use crate::util::format_number;
use tdisview_core::EventNumber;
use tdisview_io::{EventFileReader, EventParser, InputStatus, ParseReport, ParsedEvents};

/// Sample data shown when no file is given.
const BUNDLED_DATA: &str = include_str!("../assets/track_data.txt");

/// Where the loaded events came from.
pub(crate) enum DataSource {
    Bundled,
    File(PathBuf),
}

impl DataSource {
    pub(crate) fn display_name(&self) -> String {
        match self {
            DataSource::Bundled => "track_data.txt (bundled)".to_string(),
            DataSource::File(path) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
        }
    }
}

/// Main application state.
pub struct TdisViewApp {
    /// Events, selection, and time cursor.
    pub(crate) session: ViewerSession,
    /// Origin of the loaded data.
    pub(crate) source: Option<DataSource>,
    /// The loaded text, shown in the raw data window.
    pub(crate) raw_text: String,
    /// Parse diagnostics of the loaded text.
    pub(crate) report: ParseReport,
    /// UI display state.
    pub(crate) ui_state: UiState,
    /// Status bar message.
    pub(crate) status: StatusLine,
}

impl Default for TdisViewApp {
    fn default() -> Self {
        Self {
            session: ViewerSession::default(),
            source: None,
            raw_text: String::new(),
            report: ParseReport::default(),
            ui_state: UiState::default(),
            status: StatusLine::default(),
        }
    }
}

impl TdisViewApp {
    /// Load the bundled sample data.
    pub fn load_bundled(&mut self) {
        let parsed = EventParser::new().parse_with_report(BUNDLED_DATA);
        self.apply_parsed(parsed, BUNDLED_DATA.to_string(), DataSource::Bundled);
    }

    /// Load an event file, reporting failures in the status bar.
    pub fn load_file(&mut self, path: &Path) {
        match Self::read_file(path) {
            Ok((parsed, text)) => {
                self.apply_parsed(parsed, text, DataSource::File(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("{e:#}");
                self.status.error(format!("Error: {e:#}"));
            }
        }
    }

    fn read_file(path: &Path) -> Result<(ParsedEvents, String)> {
        let reader = EventFileReader::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        let parsed = reader
            .read_events()
            .with_context(|| format!("cannot read {}", path.display()))?;
        let text = reader.as_text()?.to_string();
        Ok((parsed, text))
    }

    fn apply_parsed(&mut self, parsed: ParsedEvents, text: String, source: DataSource) {
        let ParsedEvents { events, report } = parsed;
        let name = source.display_name();

        self.session.set_events(events);
        self.raw_text = text;
        self.source = Some(source);
        self.ui_state.event_input = self
            .session
            .current_event_number()
            .map(|n| n.to_string())
            .unwrap_or_default();

        if report.status() == InputStatus::EmptyOrUnrecognized {
            self.status.warning(format!("{name}: no event data to display."));
        } else if report.has_issues() {
            self.status.warning(format!(
                "{name}: {} events, {} malformed fields, {} blocks dropped",
                format_number(self.session.events().len()),
                format_number(report.malformed_fields),
                report.unnumbered_blocks + report.truncated_blocks
            ));
        } else {
            self.status.info(format!(
                "{name}: {} events, {} hits",
                format_number(self.session.events().len()),
                format_number(self.session.events().total_hits())
            ));
        }
        self.report = report;
    }

    /// Select the event typed into the event number field.
    pub(crate) fn show_requested_event(&mut self) {
        let input = self.ui_state.event_input.trim();
        let result = input
            .parse::<EventNumber>()
            .map_err(|_| anyhow::anyhow!("Event number {input} not found."))
            .and_then(|number| self.session.select_event(number));
        match result {
            Ok(()) => self.status.info(format!("Showing event {input}")),
            Err(e) => self.status.error(e.to_string()),
        }
    }

    /// Advance to the next event.
    pub(crate) fn next_track(&mut self) {
        if let Some(number) = self.session.next_event() {
            self.ui_state.event_input = number.to_string();
            self.status.info(format!("Showing event {number}"));
        }
    }
}

impl eframe::App for TdisViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::ui::theme::apply_system_theme(ctx);
        self.render_top_panel(ctx);
        self.render_bottom_panel(ctx);
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        self.render_raw_window(ctx);
    }
}
