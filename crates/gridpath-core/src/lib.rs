//! **gridpath-core** — grid model for the gridpath pathfinding visualizer.
//!
//! This crate provides the leaf types shared across the *gridpath*
//! workspace: the [`Pos`] cell coordinate and the [`Grid`] model holding
//! wall flags and the start/end cells. It knows nothing about searching or
//! rendering; the search engine reads the topology through
//! [`Grid::neighbors`] and the host mutates walls and endpoints between
//! searches.

pub mod grid;
pub mod pos;

pub use grid::Grid;
pub use pos::Pos;
