//! Grid search strategies for the gridpath visualizer.
//!
//! This crate implements the two interchangeable shortest-path strategies
//! the visualizer animates:
//!
//! - **Uniform-cost search** (Dijkstra variant, [`Strategy::Dijkstra`])
//! - **Heuristic search** (A* variant with a Manhattan heuristic,
//!   [`Strategy::AStar`])
//!
//! Both run through [`Searcher::run`], which owns and fully resets all
//! per-node scratch state (distance, heuristic, predecessor, visited) on
//! every invocation. Progress is reported through the [`EventSink`] seam:
//! one `visited` event per settled node in discovery order, then (if the
//! end was reached) one `path` event per node of the reconstructed path in
//! end-to-start order. Rendering, pacing, and grid editing are the host's
//! business; the engine is pure with respect to all of them.
//!
//! An unreachable end is a normal outcome ([`Outcome::NoPath`]), not an
//! error. A run can be aborted cooperatively between nodes via a
//! [`Context`] token.

mod astar;
mod cancel;
mod dijkstra;
mod distance;
mod engine;
mod error;
mod events;
mod strategy;

pub use cancel::Context;
pub use distance::manhattan;
pub use engine::{Outcome, Searcher, UNREACHABLE};
pub use error::SearchError;
pub use events::{EventLog, EventSink, SearchEvent};
pub use strategy::Strategy;
