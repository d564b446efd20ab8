//! Memory-mapped event file reader.
//!

use crate::parser::{EventBlocks, EventParser, ParsedEvents, ParserConfig};
use crate::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A memory-mapped event text file.
///
/// Uses memmap2 to access the file without copying it. Empty files cannot be
/// mapped on every platform, so they are served as an empty buffer.
pub struct EventFileReader {
    mmap: Option<Mmap>,
    path: PathBuf,
    config: ParserConfig,
}

impl EventFileReader {
    /// Opens a file for memory-mapped reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or memory-mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let mmap = if file.metadata()?.len() == 0 {
            None
        } else {
            // SAFETY: The file is opened read-only and we assume it is not modified concurrently.
            // This is the standard safety contract for memory mapping.
            #[allow(unsafe_code)]
            let mmap = unsafe { Mmap::map(&file)? };
            Some(mmap)
        };
        log::debug!(
            "mapped {} ({} bytes)",
            path.as_ref().display(),
            mmap.as_ref().map_or(0, |m| m.len())
        );
        Ok(Self {
            mmap,
            path: path.as_ref().to_path_buf(),
            config: ParserConfig::default(),
        })
    }

    /// Sets the parser configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the path the reader was opened with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file contents as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    /// Returns the file contents as text.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidEncoding`] if the file is not UTF-8.
    pub fn as_text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(self.as_bytes())?)
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn file_size(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_size() == 0
    }

    /// Iterates over the event blocks of the file, ignoring the configuration.
    ///
    /// # Errors
    /// Returns an error if the file is not UTF-8.
    pub fn blocks(&self) -> Result<EventBlocks<'_>> {
        Ok(EventBlocks::new(self.as_text()?))
    }

    /// Parses the file with the configured skip and limit.
    ///
    /// # Errors
    /// Returns an error if the file is not UTF-8.
    pub fn read_events(&self) -> Result<ParsedEvents> {
        let parsed = EventParser::with_config(self.config).parse_with_report(self.as_text()?);
        log::info!(
            "read {} events ({} hits) from {}",
            parsed.events.len(),
            parsed.events.total_hits(),
            self.path.display()
        );
        Ok(parsed)
    }
}
