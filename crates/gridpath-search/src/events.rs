//! The event-sink seam between the engine and its host.
//!
//! The engine never renders anything; it reports progress through an
//! [`EventSink`], and a host-side driver (the visualizer's animation
//! replay, a test assertion, ...) consumes the events at whatever pace it
//! likes.

use gridpath_core::Pos;

/// A single search progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A node was settled, in discovery order, before its neighbours were
    /// examined.
    Visited(Pos),
    /// A node on the reconstructed path, in end-to-start order. Only
    /// emitted when the end node was reached.
    Path(Pos),
}

/// Receiver for search progress events.
pub trait EventSink {
    /// Called once per settled node.
    fn on_visited(&mut self, pos: Pos);

    /// Called once per node of the reconstructed path, end to start.
    fn on_path(&mut self, pos: Pos);
}

/// An [`EventSink`] that records every event in order, for later replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<SearchEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events, in emission order.
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget all recorded events, keeping capacity.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Positions of the recorded `Visited` events, in order.
    pub fn visited(&self) -> impl Iterator<Item = Pos> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::Visited(p) => Some(*p),
            _ => None,
        })
    }

    /// Positions of the recorded `Path` events, in order (end to start).
    pub fn path(&self) -> impl Iterator<Item = Pos> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::Path(p) => Some(*p),
            _ => None,
        })
    }
}

impl EventSink for EventLog {
    fn on_visited(&mut self, pos: Pos) {
        self.events.push(SearchEvent::Visited(pos));
    }

    fn on_path(&mut self, pos: Pos) {
        self.events.push(SearchEvent::Path(pos));
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let ev = SearchEvent::Path(Pos::new(4, 2));
        let json = serde_json::to_string(&ev).unwrap();
        let back: SearchEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
