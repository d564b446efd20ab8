//! Per-event statistics.

use std::collections::BTreeSet;

use crate::event::{EventNumber, EventRecord, TrackFit};
use crate::hit::HitLayout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary statistics of one event.
///
/// Times and amplitudes are taken from every hit that carries them; ring, pad
/// and plane counts only from hits that decode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventSummary {
    /// Event number.
    pub number: EventNumber,
    /// Number of hit lines.
    pub n_hits: usize,
    /// Earliest finite arrival time.
    pub time_first: Option<f64>,
    /// Latest finite arrival time.
    pub time_last: Option<f64>,
    /// Mean of the finite amplitudes.
    pub amplitude_mean: Option<f64>,
    /// Sum of the finite amplitudes.
    pub amplitude_total: f64,
    /// Distinct rings.
    pub n_rings: usize,
    /// Distinct pads (ring, pad).
    pub n_pads: usize,
    /// Distinct planes.
    pub n_planes: usize,
    /// Hits that failed to decode.
    pub n_undecodable: usize,
    /// Track fit, if the event carries exactly four track parameters.
    pub track_fit: Option<TrackFit>,
}

impl EventSummary {
    /// Computes the summary of an event, reading hits with the compact layout.
    #[must_use]
    pub fn from_record(number: EventNumber, record: &EventRecord) -> Self {
        Self::from_record_with_layout(number, record, Some(HitLayout::Compact))
    }

    /// Computes the summary of an event. `None` picks the layout of each hit
    /// from its field count.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_record_with_layout(
        number: EventNumber,
        record: &EventRecord,
        layout: Option<HitLayout>,
    ) -> Self {
        let mut time_first: Option<f64> = None;
        let mut time_last: Option<f64> = None;
        let mut amplitude_total = 0.0;
        let mut amplitude_count = 0usize;
        let mut rings = BTreeSet::new();
        let mut pads = BTreeSet::new();
        let mut planes = BTreeSet::new();
        let mut n_undecodable = 0;

        for hit in &record.hits {
            let fields = hit.fields();
            if let Some(&t) = fields.first().filter(|t| t.is_finite()) {
                time_first = Some(time_first.map_or(t, |v| v.min(t)));
                time_last = Some(time_last.map_or(t, |v| v.max(t)));
            }
            if let Some(&a) = fields.get(1).filter(|a| a.is_finite()) {
                amplitude_total += a;
                amplitude_count += 1;
            }
            let decoded = match layout {
                Some(layout) => hit.decode(layout),
                None => hit.decode_detected(),
            };
            match decoded {
                Ok(decoded) => {
                    rings.insert(decoded.ring);
                    pads.insert((decoded.ring, decoded.pad));
                    planes.insert(decoded.plane.to_bits());
                }
                Err(_) => n_undecodable += 1,
            }
        }

        let amplitude_mean =
            (amplitude_count > 0).then(|| amplitude_total / amplitude_count as f64);

        Self {
            number,
            n_hits: record.hit_count(),
            time_first,
            time_last,
            amplitude_mean,
            amplitude_total,
            n_rings: rings.len(),
            n_pads: pads.len(),
            n_planes: planes.len(),
            n_undecodable,
            track_fit: record.track_fit(),
        }
    }

    /// Time between the first and last hit.
    #[must_use]
    pub fn time_span(&self) -> Option<f64> {
        Some(self.time_last? - self.time_first?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::HitRecord;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary() {
        let record = EventRecord::new(
            vec![0.39, 56.63, -95.11, 0.0532],
            vec![
                HitRecord::new(vec![3.0, 10.0, 0.0, 0.0, 1.0, 0.0]),
                HitRecord::new(vec![1.0, 20.0, 0.0, 1.0, 1.0, 0.0]),
                HitRecord::new(vec![2.0, f64::NAN, 4.0, 1.0, 2.0, 0.0]),
                HitRecord::new(vec![f64::NAN, 30.0, 1.5, 0.0, 2.0, 0.0]),
            ],
        );
        let summary = EventSummary::from_record(7, &record);

        assert_eq!(summary.number, 7);
        assert_eq!(summary.n_hits, 4);
        assert_eq!(summary.time_first, Some(1.0));
        assert_eq!(summary.time_last, Some(3.0));
        assert_abs_diff_eq!(summary.time_span().unwrap(), 2.0);
        assert_abs_diff_eq!(summary.amplitude_total, 60.0);
        assert_abs_diff_eq!(summary.amplitude_mean.unwrap(), 20.0);
        assert_eq!(summary.n_rings, 2);
        assert_eq!(summary.n_pads, 3);
        assert_eq!(summary.n_planes, 2);
        assert_eq!(summary.n_undecodable, 1);
        assert!(summary.track_fit.is_some());
    }

    #[test]
    fn test_summary_layouts() {
        let record = EventRecord::new(
            Vec::new(),
            vec![HitRecord::new(vec![
                1.0, 100.0, 3.0, 4.0, 5.0, 0.01, 7.0, 8.0, 9.0,
            ])],
        );
        let compact = EventSummary::from_record(1, &record);
        assert_eq!(compact.n_pads, 1);
        assert_eq!(compact.n_undecodable, 0);

        let detected = EventSummary::from_record_with_layout(1, &record, None);
        assert_eq!(detected.n_pads, 0);
        assert_eq!(detected.n_undecodable, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = EventSummary::from_record(1, &EventRecord::default());
        assert_eq!(summary.n_hits, 0);
        assert_eq!(summary.time_first, None);
        assert_eq!(summary.amplitude_mean, None);
        assert_eq!(summary.time_span(), None);
        assert!(summary.track_fit.is_none());
    }
}
