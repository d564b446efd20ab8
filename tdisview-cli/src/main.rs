//! tdisview command-line interface.
//!
//! Inspects TDIS mTPC event files, prints time-sliced projections, and
//! exports hits and pad geometry as CSV.
#![allow(
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::too_many_lines
)]

use clap::{Parser, Subcommand, ValueEnum};

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tdisview_core::{
    EventNumber, EventSummary, HitLayout, Projection, ProjectionBuilder, ProjectionConfig,
};
use tdisview_io::{DataFileWriter, EventFileReader, InputStatus, ParsedEvents, ParserConfig};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    TdisviewIo(#[from] tdisview_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] tdisview_core::Error),

    #[error("No event data in {0}")]
    NoEvents(PathBuf),

    #[error("Event number {0} not found.")]
    EventNotFound(EventNumber),
}

/// Output format of the `show` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Table,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

/// Column layout of hit lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// t amplitude ring pad plane zToGEM; extra columns are ignored
    Compact,
    /// t adc true_x true_y true_z ring pad plane zToGEM
    Extended,
    /// Extended for nine-field lines, compact otherwise
    Auto,
}

impl LayoutArg {
    fn layout(self) -> Option<HitLayout> {
        match self {
            LayoutArg::Compact => Some(HitLayout::Compact),
            LayoutArg::Extended => Some(HitLayout::Extended),
            LayoutArg::Auto => None,
        }
    }
}

/// Event display tools for the TDIS mTPC.
#[derive(Parser)]
#[command(name = "tdisview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an event file
    Info {
        /// Input event file
        input: PathBuf,

        /// Number of leading events to skip
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Maximum number of events to read
        #[arg(long)]
        events: Option<usize>,

        /// Hit line layout
        #[arg(long, value_enum, default_value = "compact")]
        layout: LayoutArg,
    },

    /// Print the projection of one event at a time cutoff
    Show {
        /// Input event file
        input: PathBuf,

        /// Event number (default: first event)
        #[arg(short, long, allow_negative_numbers = true)]
        event: Option<EventNumber>,

        /// Time cutoff in ns (default: latest hit of the event)
        #[arg(short, long)]
        time: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hit line layout
        #[arg(long, value_enum, default_value = "compact")]
        layout: LayoutArg,
    },

    /// Export all hits with decoded fields and coordinates as CSV
    Export {
        /// Input event file
        input: PathBuf,

        /// Output CSV file path
        #[arg(short, long)]
        output: PathBuf,

        /// Number of leading events to skip
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Maximum number of events to read
        #[arg(long)]
        events: Option<usize>,

        /// Hit line layout
        #[arg(long, value_enum, default_value = "compact")]
        layout: LayoutArg,
    },

    /// List pad geometry as CSV
    Pads {
        /// Only list this ring
        #[arg(short, long)]
        ring: Option<i32>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn parser_config(skip: usize, events: Option<usize>) -> ParserConfig {
    let config = ParserConfig::new().with_skip_events(skip);
    match events {
        Some(n) => config.with_max_events(n),
        None => config,
    }
}

/// Reads and parses a file, treating input without any marker as an error.
fn load(input: &Path, config: ParserConfig) -> Result<(EventFileReader, ParsedEvents)> {
    let reader = EventFileReader::open(input)?.with_config(config);
    let parsed = reader.read_events()?;
    if parsed.report.status() == InputStatus::EmptyOrUnrecognized {
        return Err(CliError::NoEvents(input.to_path_buf()));
    }
    for warning in parsed.report.warnings() {
        log::warn!("{}", warning);
    }
    Ok((reader, parsed))
}

fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn print_projection_table(out: &mut impl Write, projection: &Projection) -> io::Result<()> {
    writeln!(
        out,
        "{:>5} | {:<10} | {:<8} | {:>10} | {:>10} | {:>10}",
        "#", "Label", "Color", "X (cm)", "Y (cm)", "Z (cm)"
    )?;
    writeln!(out, "{:-<70}", "")?;
    for (i, (top, side)) in projection.top.iter().zip(&projection.side).enumerate() {
        writeln!(
            out,
            "{:>5} | {:<10} | {:<8} | {:>10.3} | {:>10.3} | {:>10.3}",
            i, top.label, top.color, top.x, top.y, side.x
        )?;
    }
    Ok(())
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Info {
            input,
            skip,
            events,
            layout,
        } => {
            let (reader, parsed) = load(&input, parser_config(skip, events))?;
            let report = &parsed.report;
            let file_size = reader.file_size();

            println!("File: {}", input.display());
            println!(
                "Size: {} bytes ({:.2} KB)",
                file_size,
                file_size as f64 / 1_000.0
            );
            println!("Markers: {}", report.markers);
            println!("Events: {}", parsed.events.len());
            println!("Hits: {}", parsed.events.total_hits());
            println!("Malformed fields: {}", report.malformed_fields);
            if report.has_issues() {
                println!(
                    "Dropped: {} unnumbered, {} truncated; {} duplicate numbers",
                    report.unnumbered_blocks, report.truncated_blocks, report.duplicate_events
                );
            }
            println!();

            println!(
                "{:>8} | {:>6} | {:>10} | {:>10} | {:>10} | {:>10} | {:>5} | {:>5} | {:>6}",
                "Event", "Hits", "t first", "t last", "ADC mean", "ADC total", "Rings", "Pads",
                "Planes"
            );
            println!("{:-<100}", "");
            for (number, record) in &parsed.events {
                let s = EventSummary::from_record_with_layout(*number, record, layout.layout());
                println!(
                    "{:>8} | {:>6} | {:>10} | {:>10} | {:>10} | {:>10.3e} | {:>5} | {:>5} | {:>6}",
                    s.number,
                    s.n_hits,
                    format_opt(s.time_first),
                    format_opt(s.time_last),
                    s.amplitude_mean
                        .map_or_else(|| "-".to_string(), |v| format!("{:.3e}", v)),
                    s.amplitude_total,
                    s.n_rings,
                    s.n_pads,
                    s.n_planes
                );
            }
        }

        Commands::Show {
            input,
            event,
            time,
            format,
            output,
            layout,
        } => {
            let (_, parsed) = load(&input, ParserConfig::default())?;
            let number = match event {
                Some(n) => n,
                None => parsed
                    .events
                    .first_event_number()
                    .ok_or_else(|| CliError::NoEvents(input.clone()))?,
            };
            let record = parsed
                .events
                .get(number)
                .ok_or(CliError::EventNotFound(number))?;
            let cutoff = time.unwrap_or_else(|| record.max_time().unwrap_or(0.0));
            log::info!("event {} at t <= {}", number, cutoff);

            let config = match layout.layout() {
                Some(layout) => ProjectionConfig::new().with_layout(layout),
                None => ProjectionConfig::new().with_detected_layout(),
            };
            let projection = ProjectionBuilder::with_config(config).build(record, cutoff)?;
            let mut out = open_output(output.as_deref())?;
            match format {
                OutputFormat::Table => {
                    writeln!(
                        out,
                        "Event {}: {} of {} hits at t <= {}",
                        number,
                        projection.len(),
                        record.hit_count(),
                        cutoff
                    )?;
                    print_projection_table(&mut out, &projection)?;
                    out.flush()?;
                }
                OutputFormat::Csv => {
                    DataFileWriter::new(out).write_projection_csv(&projection)?;
                }
                OutputFormat::Json => {
                    DataFileWriter::new(out).write_projection_json(&projection)?;
                }
            }
        }

        Commands::Export {
            input,
            output,
            skip,
            events,
            layout,
        } => {
            let (_, parsed) = load(&input, parser_config(skip, events))?;
            let mut writer = DataFileWriter::create(&output)?;
            let rows = writer.write_hits_csv_with_layout(&parsed.events, layout.layout())?;
            println!(
                "Exported {} hits from {} events to {}",
                rows,
                parsed.events.len(),
                output.display()
            );
        }

        Commands::Pads { ring, output } => {
            let out = open_output(output.as_deref())?;
            let rows = DataFileWriter::new(out).write_pads_csv(ring)?;
            log::info!("listed {} pads", rows);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_accepts_negative_event() {
        let cli = Cli::try_parse_from(["tdisview", "show", "tracks.txt", "-e", "-3", "-t", "12.5"])
            .unwrap();
        match cli.command {
            Commands::Show { event, time, .. } => {
                assert_eq!(event, Some(-3));
                assert_eq!(time, Some(12.5));
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_layout_defaults_to_compact() {
        let cli = Cli::try_parse_from(["tdisview", "export", "tracks.txt", "-o", "hits.csv"]).unwrap();
        match cli.command {
            Commands::Export { layout, .. } => {
                assert_eq!(layout, LayoutArg::Compact);
                assert_eq!(layout.layout(), Some(HitLayout::Compact));
            }
            _ => panic!("expected export"),
        }

        let cli = Cli::try_parse_from(["tdisview", "show", "tracks.txt", "--layout", "auto"]).unwrap();
        match cli.command {
            Commands::Show { layout, .. } => assert_eq!(layout.layout(), None),
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parser_config() {
        assert_eq!(parser_config(0, None), ParserConfig::default());
        let config = parser_config(2, Some(5));
        assert_eq!(config.skip_events, 2);
        assert_eq!(config.max_events, Some(5));
    }
}
