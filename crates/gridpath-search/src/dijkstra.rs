//! Uniform-cost search (Dijkstra variant).

use gridpath_core::Grid;

use crate::cancel::Context;
use crate::engine::{Outcome, Searcher, UNREACHABLE};
use crate::events::EventSink;

impl Searcher {
    /// Expand the whole grid as the frontier, repeatedly settling the
    /// unvisited node with minimum distance.
    ///
    /// Relaxation deliberately replicates the reference behavior for
    /// unit-weight edges: every unvisited neighbour of the settled node is
    /// overwritten with `dist + 1` and reparented, even when that is no
    /// improvement. Settling order still yields shortest paths because all
    /// edges cost 1, and it keeps the visited order reproducible against
    /// the reference.
    pub(crate) fn dijkstra<S: EventSink>(
        &mut self,
        grid: &Grid,
        start_idx: usize,
        end_idx: usize,
        sink: &mut S,
        ctx: &Context,
    ) -> Outcome {
        self.nodes[start_idx].dist = 0;

        // Row-major initial order; pop_min is stable, so equal-distance
        // nodes settle in row-major order.
        self.frontier.extend(0..self.nodes.len());

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(ci) = self.pop_min(|n| n.dist) else {
                break Outcome::NoPath;
            };
            let cp = self.pos(ci);

            // Walls are skipped, not settled.
            if grid.is_wall(cp) {
                continue;
            }
            // Minimum is infinite: whatever is left cannot be reached.
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

            let next_dist = self.nodes[ci].dist + 1;
            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.visited {
                    continue;
                }
                n.dist = next_dist;
                n.parent = ci;
            }
        };

        self.nbuf = nbuf;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;
    use crate::events::{EventLog, SearchEvent};
    use crate::strategy::Strategy;
    use gridpath_core::Pos;

    fn run(grid: &Grid) -> (Outcome, EventLog) {
        let mut searcher = Searcher::new(grid.rows(), grid.cols());
        let mut log = EventLog::new();
        let outcome = searcher
            .run(grid, Strategy::Dijkstra, &mut log, &Context::new())
            .unwrap();
        (outcome, log)
    }

    #[test]
    fn empty_5x5_path_has_manhattan_length() {
        let grid = Grid::new(5, 5);
        let (outcome, log) = run(&grid);
        assert_eq!(outcome, Outcome::PathFound { length: 8 });
        assert_eq!(log.path().count(), 9);
    }

    #[test]
    fn path_is_a_contiguous_chain_from_end_to_start() {
        let mut grid = Grid::new(6, 6);
        grid.set_wall(Pos::new(2, 2), true);
        grid.set_wall(Pos::new(2, 3), true);
        let (_, log) = run(&grid);

        let path: Vec<Pos> = log.path().collect();
        assert_eq!(path.first(), Some(&grid.end()));
        assert_eq!(path.last(), Some(&grid.start()));
        for pair in path.windows(2) {
            assert_eq!(
                (pair[0].row - pair[1].row).abs() + (pair[0].col - pair[1].col).abs(),
                1,
                "non-adjacent path step {} -> {}",
                pair[0],
                pair[1]
            );
        }
        let mut dedup = path.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), path.len(), "path revisits a node");
    }

    #[test]
    fn full_wall_column_means_no_path() {
        // 3×3, wall column at col 1 separating (0,0) from (2,2).
        let mut grid = Grid::new(3, 3);
        for row in 0..3 {
            grid.set_wall(Pos::new(row, 1), true);
        }
        let (outcome, log) = run(&grid);
        assert_eq!(outcome, Outcome::NoPath);
        assert_eq!(log.path().count(), 0);

        let visited: Vec<Pos> = log.visited().collect();
        // Near side fully visited, far side and walls untouched.
        for row in 0..3 {
            assert!(visited.contains(&Pos::new(row, 0)));
            assert!(!visited.contains(&Pos::new(row, 1)));
            assert!(!visited.contains(&Pos::new(row, 2)));
        }
    }

    #[test]
    fn visited_events_precede_path_events() {
        let grid = Grid::new(4, 4);
        let (_, log) = run(&grid);
        let first_path = log
            .events()
            .iter()
            .position(|e| matches!(e, SearchEvent::Path(_)))
            .unwrap();
        assert!(
            log.events()[first_path..]
                .iter()
                .all(|e| matches!(e, SearchEvent::Path(_)))
        );
    }

    #[test]
    fn each_node_visited_at_most_once() {
        let mut grid = Grid::new(8, 8);
        for col in 0..7 {
            grid.set_wall(Pos::new(4, col), true);
        }
        let (_, log) = run(&grid);
        let mut visited: Vec<Pos> = log.visited().collect();
        let total = visited.len();
        visited.sort();
        visited.dedup();
        assert_eq!(visited.len(), total);
    }

    #[test]
    fn equal_distances_settle_in_row_major_order() {
        let mut grid = Grid::new(3, 3);
        assert!(grid.set_start(Pos::new(1, 1)));
        assert!(grid.set_end(Pos::new(2, 2)));
        let (_, log) = run(&grid);
        let visited: Vec<Pos> = log.visited().collect();
        // Start first, then its four distance-1 neighbours row-major.
        assert_eq!(
            &visited[..5],
            &[
                Pos::new(1, 1),
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 2),
                Pos::new(2, 1),
            ]
        );
    }

    #[test]
    fn pre_cancelled_context_stops_after_first_node() {
        let grid = Grid::new(5, 5);
        let ctx = Context::new();
        ctx.cancel();
        let mut searcher = Searcher::new(5, 5);
        let mut log = EventLog::new();
        let outcome = searcher
            .run(&grid, Strategy::Dijkstra, &mut log, &ctx)
            .unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(log.visited().count(), 1);
        assert_eq!(log.path().count(), 0);
    }
}
