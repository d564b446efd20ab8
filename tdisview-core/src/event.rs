//! Event records and the event-number mapping produced by the parser.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Bound;

use crate::error::Result;
use crate::hit::{HitLayout, HitRecord, TpcHit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Event number as written after the `Event` marker.
pub type EventNumber = i64;

/// Track fit parameters of the simulation output format.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackFit {
    /// Momentum (GeV/c).
    pub momentum: f64,
    /// Polar angle (degrees).
    pub theta_deg: f64,
    /// Azimuthal angle (degrees).
    pub phi_deg: f64,
    /// Vertex position along the beam axis (m).
    pub z_vertex: f64,
}

/// One event: its track parameters and its hits in input order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventRecord {
    /// Track fit parameters as read from the line after the marker.
    pub track_params: Vec<f64>,
    /// Hits in input order.
    pub hits: Vec<HitRecord>,
}

impl EventRecord {
    /// Creates an event record.
    #[must_use]
    pub fn new(track_params: Vec<f64>, hits: Vec<HitRecord>) -> Self {
        Self { track_params, hits }
    }

    /// Returns the number of hits.
    #[inline]
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Largest finite arrival time, or `None` if no hit carries one.
    #[must_use]
    pub fn max_time(&self) -> Option<f64> {
        self.hits
            .iter()
            .filter_map(HitRecord::time_arrival)
            .filter(|t| t.is_finite())
            .reduce(f64::max)
    }

    /// Interprets the track parameters when exactly four are present.
    #[must_use]
    pub fn track_fit(&self) -> Option<TrackFit> {
        match self.track_params.as_slice() {
            &[momentum, theta_deg, phi_deg, z_vertex] => Some(TrackFit {
                momentum,
                theta_deg,
                phi_deg,
                z_vertex,
            }),
            _ => None,
        }
    }

    /// Decodes every hit, with a fixed layout or detected per hit.
    ///
    /// # Errors
    /// Returns the first decoding error encountered.
    pub fn decoded_hits(&self, layout: Option<HitLayout>) -> Result<Vec<TpcHit>> {
        self.hits
            .iter()
            .map(|hit| match layout {
                Some(layout) => hit.decode(layout),
                None => hit.decode_detected(),
            })
            .collect()
    }
}

/// Events keyed by event number, iterated in ascending order.
///
/// Inserting an existing number replaces the earlier record, so the last
/// occurrence in the input wins.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventMapping {
    events: BTreeMap<EventNumber, EventRecord>,
}

impl EventMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record, returning the one it replaced.
    pub fn insert(&mut self, number: EventNumber, record: EventRecord) -> Option<EventRecord> {
        self.events.insert(number, record)
    }

    /// Looks up an event.
    #[must_use]
    pub fn get(&self, number: EventNumber) -> Option<&EventRecord> {
        self.events.get(&number)
    }

    /// Returns true if the event exists.
    #[must_use]
    pub fn contains(&self, number: EventNumber) -> bool {
        self.events.contains_key(&number)
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = EventNumber> + '_ {
        self.events.keys().copied()
    }

    /// Lowest event number.
    #[must_use]
    pub fn first_event_number(&self) -> Option<EventNumber> {
        self.events.keys().next().copied()
    }

    /// Event number following `current` in ascending order, wrapping around.
    ///
    /// An absent or unknown `current` yields the first event number.
    #[must_use]
    pub fn next_event_number(&self, current: Option<EventNumber>) -> Option<EventNumber> {
        let Some(current) = current.filter(|n| self.contains(*n)) else {
            return self.first_event_number();
        };
        self.events
            .range((Bound::Excluded(current), Bound::Unbounded))
            .next()
            .map(|(n, _)| *n)
            .or_else(|| self.first_event_number())
    }

    /// Iterates over `(number, record)` in ascending order.
    pub fn iter(&self) -> btree_map::Iter<'_, EventNumber, EventRecord> {
        self.events.iter()
    }

    /// Total number of hits across all events.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.events.values().map(EventRecord::hit_count).sum()
    }
}

impl FromIterator<(EventNumber, EventRecord)> for EventMapping {
    fn from_iter<I: IntoIterator<Item = (EventNumber, EventRecord)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (number, record) in iter {
            mapping.insert(number, record);
        }
        mapping
    }
}

impl IntoIterator for EventMapping {
    type Item = (EventNumber, EventRecord);
    type IntoIter = btree_map::IntoIter<EventNumber, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventMapping {
    type Item = (&'a EventNumber, &'a EventRecord);
    type IntoIter = btree_map::Iter<'a, EventNumber, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_times(times: &[f64]) -> EventRecord {
        EventRecord::new(
            vec![0.5],
            times
                .iter()
                .map(|&t| HitRecord::new(vec![t, 10.0, 0.0, 0.0, 0.0, 0.0]))
                .collect(),
        )
    }

    #[test]
    fn test_last_insert_wins() {
        let mut mapping = EventMapping::new();
        assert!(mapping.insert(4, record_with_times(&[1.0])).is_none());
        let previous = mapping.insert(4, record_with_times(&[2.0, 3.0]));
        assert_eq!(previous.map(|r| r.hit_count()), Some(1));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(4).map(EventRecord::hit_count), Some(2));
    }

    #[test]
    fn test_next_event_number_wraps() {
        let mapping: EventMapping = [7, 2, 5]
            .into_iter()
            .map(|n| (n, EventRecord::default()))
            .collect();

        assert_eq!(mapping.numbers().collect::<Vec<_>>(), vec![2, 5, 7]);
        assert_eq!(mapping.next_event_number(Some(2)), Some(5));
        assert_eq!(mapping.next_event_number(Some(5)), Some(7));
        assert_eq!(mapping.next_event_number(Some(7)), Some(2));
        assert_eq!(mapping.next_event_number(Some(3)), Some(2));
        assert_eq!(mapping.next_event_number(None), Some(2));
        assert_eq!(EventMapping::new().next_event_number(Some(1)), None);
    }

    #[test]
    fn test_max_time_ignores_nan() {
        assert_eq!(
            record_with_times(&[1.0, f64::NAN, 3.0, 2.0]).max_time(),
            Some(3.0)
        );
        assert_eq!(record_with_times(&[f64::NAN]).max_time(), None);
        assert_eq!(EventRecord::default().max_time(), None);
    }

    #[test]
    fn test_track_fit() {
        let record = EventRecord::new(vec![0.39, 56.63, -95.11, 0.0532], Vec::new());
        let fit = record.track_fit().unwrap();
        assert!((fit.momentum - 0.39).abs() < f64::EPSILON);
        assert!((fit.z_vertex - 0.0532).abs() < f64::EPSILON);

        assert!(EventRecord::new(vec![0.5, 1.2], Vec::new())
            .track_fit()
            .is_none());
    }

    #[test]
    fn test_total_hits() {
        let mapping: EventMapping = [
            (1, record_with_times(&[1.0, 2.0])),
            (2, record_with_times(&[1.0])),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.total_hits(), 3);
    }
}
