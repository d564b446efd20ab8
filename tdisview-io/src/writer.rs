//! CSV and JSON writers for projections, hits, and pad geometry.

use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tdisview_core::geometry::{self, NUM_PADS_PER_RING, NUM_RINGS};
use tdisview_core::projection::hit_z_cm;
use tdisview_core::{EventMapping, HitLayout, Projection};

/// Writer for processed event display data.
///
/// Writes projections and decoded hits to any [`Write`] sink.
pub struct DataFileWriter<W: Write> {
    writer: W,
}

impl DataFileWriter<BufWriter<File>> {
    /// Creates a new file writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DataFileWriter<W> {
    /// Wraps an existing sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a projection as CSV, one row per hit.
    ///
    /// `x` and `y` come from the top view and `z` from the side view.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_projection_csv(&mut self, projection: &Projection) -> Result<()> {
        writeln!(self.writer, "index,label,color,x,y,z")?;

        for (i, (top, side)) in projection.top.iter().zip(&projection.side).enumerate() {
            writeln!(
                self.writer,
                "{},{},{},{},{},{}",
                i, top.label, top.color, top.x, top.y, side.x
            )?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Writes a projection as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_projection_json(&mut self, projection: &Projection) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, projection)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes every hit of every event as CSV with decoded fields and
    /// coordinates, reading hits with the compact layout. Returns the number
    /// of rows written.
    ///
    /// # Errors
    /// Returns an error if a hit cannot be decoded or placed on the pad plane,
    /// or if writing fails.
    pub fn write_hits_csv(&mut self, events: &EventMapping) -> Result<usize> {
        self.write_hits_csv_with_layout(events, Some(HitLayout::Compact))
    }

    /// Like [`DataFileWriter::write_hits_csv`], with a chosen layout. `None`
    /// picks the layout of each hit from its field count.
    ///
    /// # Errors
    /// See [`DataFileWriter::write_hits_csv`].
    pub fn write_hits_csv_with_layout(
        &mut self,
        events: &EventMapping,
        layout: Option<HitLayout>,
    ) -> Result<usize> {
        writeln!(
            self.writer,
            "event,hit,time,amplitude,ring,pad,plane,z_to_gem_m,x_cm,y_cm,z_cm"
        )?;

        let mut rows = 0;
        for (number, record) in events {
            for (i, hit) in record.decoded_hits(layout)?.iter().enumerate() {
                let center = geometry::pad_center(hit.ring, hit.pad)?;
                writeln!(
                    self.writer,
                    "{},{},{},{},{},{},{},{},{},{},{}",
                    number,
                    i,
                    hit.time_arrival,
                    hit.amplitude,
                    hit.ring,
                    hit.pad,
                    hit.plane,
                    hit.z_to_gem_m,
                    center.x,
                    center.y,
                    hit_z_cm(hit.plane, hit.z_to_gem_m)
                )?;
                rows += 1;
            }
        }

        self.writer.flush()?;
        Ok(rows)
    }

    /// Writes the pad table as CSV, for one ring or the whole plane.
    ///
    /// # Errors
    /// Returns an error if `ring` is outside the pad plane or writing fails.
    pub fn write_pads_csv(&mut self, ring: Option<i32>) -> Result<usize> {
        writeln!(
            self.writer,
            "ring,pad,x_cm,y_cm,r_inner_cm,r_outer_cm,phi_start,phi_end"
        )?;

        let rings = match ring {
            Some(r) => {
                geometry::ring_radii(r)?;
                r..r + 1
            }
            None => 0..NUM_RINGS,
        };

        let mut rows = 0;
        for r in rings {
            let (inner, outer) = geometry::ring_radii(r)?;
            for pad in 0..NUM_PADS_PER_RING {
                let center = geometry::pad_center(r, pad)?;
                let (start, end) = geometry::pad_angular_bounds(r, pad)?;
                writeln!(
                    self.writer,
                    "{},{},{},{},{},{},{},{}",
                    r, pad, center.x, center.y, inner, outer, start, end
                )?;
                rows += 1;
            }
        }

        self.writer.flush()?;
        Ok(rows)
    }

    /// Flushes the writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_events;
    use crate::Error;
    use tdisview_core::build_projection;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "Event 1\n0.5 1.2\n1.5 90 1 1 1 0.02\n2.5 80 0 0 2 0.0\n";

    #[test]
    fn test_write_projection_csv() {
        let events = parse_events(SAMPLE);
        let projection = build_projection(events.get(1).unwrap(), 2.0).unwrap();

        let mut writer = DataFileWriter::new(Vec::new());
        writer.write_projection_csv(&projection).unwrap();
        let content = String::from_utf8(writer.into_inner()).unwrap();

        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "index,label,color,x,y,z");
        assert!(lines[1].starts_with("0,Plane 1,red,"));
        assert!(lines[1].ends_with(",7.5"));
    }

    #[test]
    fn test_write_projection_json() {
        let events = parse_events(SAMPLE);
        let projection = build_projection(events.get(1).unwrap(), 10.0).unwrap();

        let mut writer = DataFileWriter::new(Vec::new());
        writer.write_projection_json(&projection).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(value["top"].as_array().unwrap().len(), 2);
        assert_eq!(value["side"][1]["label"], "Plane 2");
        assert_eq!(value["top"][1]["color"], "orange");
    }

    #[test]
    fn test_write_hits_csv_to_file() {
        let events = parse_events(SAMPLE);
        let file = NamedTempFile::new().unwrap();
        let mut writer = DataFileWriter::create(file.path()).unwrap();

        assert_eq!(writer.write_hits_csv(&events).unwrap(), 2);
        drop(writer);

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("event,hit,time,amplitude,ring,pad,plane"));
        assert!(content.contains("\n1,0,1.5,90,1,1,1,0.02,"));
        assert!(content.contains("\n1,1,2.5,80,0,0,2,0,"));
    }

    #[test]
    fn test_write_hits_csv_layouts() {
        let events = parse_events("Event 3\n0\n1 100 3 4 5 0.01 7 8 9\n");

        let mut writer = DataFileWriter::new(Vec::new());
        assert_eq!(writer.write_hits_csv(&events).unwrap(), 1);
        let content = String::from_utf8(writer.into_inner()).unwrap();
        assert!(content.contains("\n3,0,1,100,3,4,5,0.01,"));

        let mut writer = DataFileWriter::new(Vec::new());
        assert!(matches!(
            writer.write_hits_csv_with_layout(&events, None),
            Err(Error::CoreError(tdisview_core::Error::NonIntegralIndex { .. }))
        ));
    }

    #[test]
    fn test_write_hits_csv_rejects_bad_pad() {
        let events = parse_events("Event 1\n0\n1 1 0 500 0 0\n");
        let mut writer = DataFileWriter::new(Vec::new());
        assert!(matches!(
            writer.write_hits_csv(&events),
            Err(Error::CoreError(tdisview_core::Error::InvalidIndex { .. }))
        ));
    }

    #[test]
    fn test_write_pads_csv() {
        let mut writer = DataFileWriter::new(Vec::new());
        assert_eq!(writer.write_pads_csv(Some(3)).unwrap(), 122);
        let mut writer = DataFileWriter::new(Vec::new());
        assert_eq!(writer.write_pads_csv(None).unwrap(), 21 * 122);
        let mut writer = DataFileWriter::new(Vec::new());
        assert!(writer.write_pads_csv(Some(21)).is_err());
    }
}
