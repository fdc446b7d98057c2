//! Heuristic search (A* variant with a Manhattan estimate).

use gridpath_core::Grid;

use crate::cancel::Context;
use crate::distance::manhattan;
use crate::engine::{Outcome, Searcher, UNREACHABLE};
use crate::events::EventSink;

impl Searcher {
    /// Expand an open set seeded with the start node, repeatedly settling
    /// the open node with minimum `heur` (distance so far plus the
    /// Manhattan estimate to the end).
    ///
    /// Unlike the uniform-cost strategy, relaxation here is conditional: a
    /// neighbour is only updated when the tentative distance improves on
    /// its current one, and it joins the open set at most once at a time
    /// (tracked by the per-node `open` flag).
    pub(crate) fn astar<S: EventSink>(
        &mut self,
        grid: &Grid,
        start_idx: usize,
        end_idx: usize,
        sink: &mut S,
        ctx: &Context,
    ) -> Outcome {
        let end = grid.end();

        {
            let start = &mut self.nodes[start_idx];
            start.dist = 0;
            start.heur = manhattan(grid.start(), end);
            start.open = true;
        }
        self.frontier.push(start_idx);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(ci) = self.pop_min(|n| n.heur) else {
                break Outcome::NoPath;
            };
            self.nodes[ci].open = false;
            let cp = self.pos(ci);

            if grid.is_wall(cp) {
                continue;
            }
            if self.nodes[ci].dist == UNREACHABLE {
                break Outcome::NoPath;
            }

            self.nodes[ci].visited = true;
            sink.on_visited(cp);

            if ctx.is_done() {
                break Outcome::Cancelled;
            }
            if ci == end_idx {
                let nodes = self.emit_path(ci, sink);
                break Outcome::PathFound { length: nodes - 1 };
            }

            let tentative = self.nodes[ci].dist + 1;
            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.visited || tentative >= n.dist {
                    continue;
                }
                n.dist = tentative;
                n.heur = tentative + manhattan(np, end);
                n.parent = ci;
                if !n.open {
                    n.open = true;
                    self.frontier.push(ni);
                }
            }
        };

        self.nbuf = nbuf;
        outcome
    }
}
