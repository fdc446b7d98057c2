//! The [`Searcher`]: owner of all per-node scratch state.
//!
//! Scratch (distance, heuristic, predecessor, visited and open flags) lives
//! in flat arrays indexed row-major, and is fully re-initialized at the
//! start of every run; the engine never trusts leftovers from a previous
//! search.

use gridpath_core::{Grid, Pos};

use crate::cancel::Context;
use crate::error::SearchError;
use crate::events::EventSink;
use crate::strategy::Strategy;

/// Sentinel distance meaning "not yet reached" (the reference's Infinity).
pub const UNREACHABLE: i32 = i32::MAX;

/// Per-node scratch state.
#[derive(Clone)]
pub(crate) struct Node {
    /// Distance from the start, [`UNREACHABLE`] until relaxed.
    pub(crate) dist: i32,
    /// `dist` plus the Manhattan estimate to the end (heuristic search only).
    pub(crate) heur: i32,
    /// Predecessor flat index, `usize::MAX` for none.
    pub(crate) parent: usize,
    /// Settled: popped from the frontier and emitted.
    pub(crate) visited: bool,
    /// Open-set membership flag (heuristic search only).
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            dist: UNREACHABLE,
            heur: UNREACHABLE,
            parent: usize::MAX,
            visited: false,
            open: false,
        }
    }
}

/// How a search run ended. An unreachable end is an outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The end node was reached; `length` counts edges, so on a wall-free
    /// grid it equals the Manhattan distance between start and end.
    PathFound { length: usize },
    /// Walls separate start from end; every reachable node was visited and
    /// no path event was emitted.
    NoPath,
    /// The [`Context`] was cancelled mid-run. No path events were emitted.
    Cancelled,
}

/// Search engine for one grid at a time.
///
/// Owns and reuses the scratch arrays and frontier storage so repeated runs
/// incur no allocations once warmed up.
pub struct Searcher {
    rows: i32,
    cols: i32,
    pub(crate) nodes: Vec<Node>,
    /// Frontier for the uniform-cost search, open set for the heuristic
    /// one. Holds flat node indices; order is preserved on removal so that
    /// minimum selection is stable.
    pub(crate) frontier: Vec<usize>,
    /// Scratch buffer for neighbor queries.
    pub(crate) nbuf: Vec<Pos>,
    in_flight: bool,
}

impl Searcher {
    /// Create a searcher sized for a `rows × cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let len = (rows.max(0) as usize) * (cols.max(0) as usize);
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
            nodes: vec![Node::default(); len],
            frontier: Vec::with_capacity(len),
            nbuf: Vec::with_capacity(4),
            in_flight: false,
        }
    }

    /// Run `strategy` against `grid`, emitting progress through `sink`.
    ///
    /// Scratch is reset first, then the search runs to completion (or until
    /// `ctx` is cancelled), emitting one `visited` event per settled node
    /// and, when the end is reached, `path` events in end-to-start order.
    ///
    /// Fails with [`SearchError::Busy`] if called re-entrantly and with
    /// [`SearchError::InvalidState`] if the grid violates the start/end
    /// invariants.
    pub fn run<S: EventSink>(
        &mut self,
        grid: &Grid,
        strategy: Strategy,
        sink: &mut S,
        ctx: &Context,
    ) -> Result<Outcome, SearchError> {
        if self.in_flight {
            return Err(SearchError::Busy);
        }
        validate(grid)?;

        self.fit_to(grid);
        self.reset();

        // idx() cannot fail here: validate() checked both endpoints are in
        // bounds and fit_to() matched our dimensions to the grid's.
        let (Some(start_idx), Some(end_idx)) = (self.idx(grid.start()), self.idx(grid.end()))
        else {
            return Err(SearchError::InvalidState("endpoint out of bounds"));
        };

        self.in_flight = true;
        let outcome = match strategy {
            Strategy::Dijkstra => self.dijkstra(grid, start_idx, end_idx, sink, ctx),
            Strategy::AStar => self.astar(grid, start_idx, end_idx, sink, ctx),
        };
        self.in_flight = false;
        Ok(outcome)
    }

    /// Resize the scratch arrays if `grid` has different dimensions.
    fn fit_to(&mut self, grid: &Grid) {
        if self.rows != grid.rows() || self.cols != grid.cols() {
            self.rows = grid.rows();
            self.cols = grid.cols();
            self.nodes.clear();
            self.nodes.resize(grid.len(), Node::default());
        }
    }

    /// Re-initialize every node and empty the frontier.
    fn reset(&mut self) {
        self.nodes.fill(Node::default());
        self.frontier.clear();
    }

    /// Convert a position to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        if p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols {
            Some((p.row * self.cols + p.col) as usize)
        } else {
            None
        }
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos {
        Pos::new(idx as i32 / self.cols, idx as i32 % self.cols)
    }

    /// Remove and return the frontier entry minimizing `key`, preferring
    /// the earliest on ties (stable selection, like the reference's stable
    /// sort-and-shift).
    pub(crate) fn pop_min(&mut self, key: impl Fn(&Node) -> i32) -> Option<usize> {
        if self.frontier.is_empty() {
            return None;
        }
        let mut best = 0;
        let mut best_key = key(&self.nodes[self.frontier[0]]);
        for (i, &ni) in self.frontier.iter().enumerate().skip(1) {
            let k = key(&self.nodes[ni]);
            if k < best_key {
                best = i;
                best_key = k;
            }
        }
        Some(self.frontier.remove(best))
    }

    /// Follow predecessor links from `end_idx`, emitting one path event per
    /// node in end-to-start order. Returns the number of nodes emitted.
    pub(crate) fn emit_path<S: EventSink>(&self, end_idx: usize, sink: &mut S) -> usize {
        let mut ci = end_idx;
        let mut count = 0;
        loop {
            sink.on_path(self.pos(ci));
            count += 1;
            let parent = self.nodes[ci].parent;
            if parent == usize::MAX {
                break;
            }
            ci = parent;
        }
        count
    }
}

/// Fail fast on host-invariant violations instead of searching garbage.
fn validate(grid: &Grid) -> Result<(), SearchError> {
    let (start, end) = (grid.start(), grid.end());
    if !grid.contains(start) {
        return Err(SearchError::InvalidState("start out of bounds"));
    }
    if !grid.contains(end) {
        return Err(SearchError::InvalidState("end out of bounds"));
    }
    if start == end {
        return Err(SearchError::InvalidState("start and end coincide"));
    }
    if grid.is_wall(start) {
        return Err(SearchError::InvalidState("start is a wall"));
    }
    if grid.is_wall(end) {
        return Err(SearchError::InvalidState("end is a wall"));
    }
    Ok(())
}
