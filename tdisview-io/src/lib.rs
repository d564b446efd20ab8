//! tdisview-io: Event file parsing and export for tdisview.
//!
//! This crate reads event text through memory-mapped files via memmap2,
//! parses it into an [`tdisview_core::EventMapping`], and writes
//! projections and hits as CSV or JSON.
//!

mod error;
pub mod parser;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use parser::{
    parse_events, parse_number_or_nan, EventBlock, EventBlocks, EventParser, InputStatus,
    MalformedField, ParseReport, ParseWarning, ParsedEvents, ParserConfig,
};
pub use reader::EventFileReader;
pub use writer::DataFileWriter;
