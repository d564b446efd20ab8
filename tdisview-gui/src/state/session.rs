//! Viewer session: the loaded events and what is currently on screen.

use anyhow::{bail, Result};
use tdisview_core::{build_projection, EventMapping, EventNumber, EventRecord, Projection};

/// Loaded events, the selected event, and the time cursor.
///
/// The time cursor always lies in `0.0..=max_time`, where `max_time` is the
/// latest arrival time of the selected event.
#[derive(Default)]
pub struct ViewerSession {
    events: EventMapping,
    current: Option<EventNumber>,
    time_cursor: f64,
    max_time: f64,
}

impl ViewerSession {
    /// Replaces the loaded events and selects the first one.
    pub fn set_events(&mut self, events: EventMapping) {
        self.events = events;
        self.current = None;
        self.time_cursor = 0.0;
        self.max_time = 0.0;
        if let Some(first) = self.events.first_event_number() {
            self.load_event(first);
        }
    }

    pub fn events(&self) -> &EventMapping {
        &self.events
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn current_event_number(&self) -> Option<EventNumber> {
        self.current
    }

    pub fn current_event(&self) -> Option<&EventRecord> {
        self.events.get(self.current?)
    }

    /// Selects an event by number.
    ///
    /// # Errors
    /// Fails if the number is not loaded; the selection is left unchanged.
    pub fn select_event(&mut self, number: EventNumber) -> Result<()> {
        if !self.events.contains(number) {
            bail!("Event number {number} not found.");
        }
        self.load_event(number);
        Ok(())
    }

    /// Advances to the next event in ascending order, wrapping around.
    pub fn next_event(&mut self) -> Option<EventNumber> {
        let next = self.events.next_event_number(self.current)?;
        self.load_event(next);
        Some(next)
    }

    fn load_event(&mut self, number: EventNumber) {
        self.current = Some(number);
        self.max_time = self
            .events
            .get(number)
            .and_then(EventRecord::max_time)
            .unwrap_or(0.0)
            .max(0.0);
        self.time_cursor = self.max_time;
    }

    pub fn time_cursor(&self) -> f64 {
        self.time_cursor
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// Moves the time cursor, clamped to the selected event's time range.
    pub fn set_time_cursor(&mut self, time: f64) {
        if time.is_nan() {
            return;
        }
        self.time_cursor = time.clamp(0.0, self.max_time);
    }

    /// Projection of the selected event at the time cursor.
    pub fn projection(&self) -> Option<tdisview_core::Result<Projection>> {
        self.current_event()
            .map(|record| build_projection(record, self.time_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdisview_io::parse_events;

    const SAMPLE: &str = "Event 5\n0.3\n1.0 10 0 0 0 0\n4.5 10 0 1 1 0\n\
                          Event 2\n0.5\n2.0 10 0 2 2 0\n\
                          Event 9\n0.1\n";

    fn session() -> ViewerSession {
        let mut session = ViewerSession::default();
        session.set_events(parse_events(SAMPLE));
        session
    }

    #[test]
    fn test_loading_selects_first_event() {
        let session = session();
        assert_eq!(session.current_event_number(), Some(2));
        assert!((session.max_time() - 2.0).abs() < f64::EPSILON);
        assert!((session.time_cursor() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_next_event_wraps() {
        let mut session = session();
        assert_eq!(session.next_event(), Some(5));
        assert!((session.time_cursor() - 4.5).abs() < f64::EPSILON);
        assert_eq!(session.next_event(), Some(9));
        assert!(session.time_cursor().abs() < f64::EPSILON);
        assert_eq!(session.next_event(), Some(2));
    }

    #[test]
    fn test_select_unknown_event() {
        let mut session = session();
        session.select_event(5).unwrap();
        let err = session.select_event(42).unwrap_err();
        assert_eq!(err.to_string(), "Event number 42 not found.");
        assert_eq!(session.current_event_number(), Some(5));
    }

    #[test]
    fn test_time_cursor_is_clamped() {
        let mut session = session();
        session.select_event(5).unwrap();
        session.set_time_cursor(100.0);
        assert!((session.time_cursor() - 4.5).abs() < f64::EPSILON);
        session.set_time_cursor(-1.0);
        assert!(session.time_cursor().abs() < f64::EPSILON);
        session.set_time_cursor(f64::NAN);
        assert!(session.time_cursor().abs() < f64::EPSILON);
    }

    #[test]
    fn test_projection_follows_cursor() {
        let mut session = session();
        session.select_event(5).unwrap();
        assert_eq!(session.projection().unwrap().unwrap().len(), 2);
        session.set_time_cursor(1.0);
        assert_eq!(session.projection().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_session() {
        let mut session = ViewerSession::default();
        session.set_events(EventMapping::new());
        assert!(!session.has_events());
        assert_eq!(session.next_event(), None);
        assert!(session.projection().is_none());
    }
}
