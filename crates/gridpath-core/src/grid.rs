//! The [`Grid`] model: wall flags plus the start and end cells.
//!
//! The grid is owned by the host application and mutated only between
//! searches. Moving an endpoint is checked here (it refuses walls and the
//! other endpoint, mirroring what the host UI allows), but the wall map
//! itself is a dumb store: nothing stops a caller from flagging the start
//! cell as a wall. Upholding that invariant is the host's job, and the
//! search engine fails fast with `InvalidState` when it is violated.

use crate::pos::Pos;

/// A fixed-size 2D grid of cells with a wall flag each, a start cell, and
/// an end cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: i32,
    cols: i32,
    walls: Vec<bool>,
    start: Pos,
    end: Pos,
}

impl Grid {
    /// Create a new wall-free grid with start at the top-left corner and
    /// end at the bottom-right corner.
    ///
    /// `rows` and `cols` must both be at least 2 so that start and end can
    /// be distinct; smaller values are clamped to 2.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(2);
        let cols = cols.max(2);
        Self {
            rows,
            cols,
            walls: vec![false; (rows * cols) as usize],
            start: Pos::ZERO,
            end: Pos::new(rows - 1, cols - 1),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Whether the grid has no cells. Always `false` (dimensions are
    /// clamped to at least 2×2), provided for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Whether `p` lies within the grid bounds.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    #[inline]
    fn idx(&self, p: Pos) -> Option<usize> {
        if self.contains(p) {
            Some((p.row * self.cols + p.col) as usize)
        } else {
            None
        }
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    /// The end cell.
    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// Whether `p` is a wall. Out-of-bounds positions are not walls.
    #[inline]
    pub fn is_wall(&self, p: Pos) -> bool {
        self.idx(p).is_some_and(|i| self.walls[i])
    }

    /// Set or clear the wall flag at `p`. Ignored (returns `false`) when
    /// `p` is out of bounds.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.walls[i] = wall;
                true
            }
            None => false,
        }
    }

    /// Toggle the wall flag at `p`. Ignored when `p` is out of bounds.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        let wall = !self.is_wall(p);
        self.set_wall(p, wall)
    }

    /// Remove all walls.
    pub fn clear_walls(&mut self) {
        self.walls.fill(false);
    }

    /// Move the start cell to `p`.
    ///
    /// Rejected (returns `false`) when `p` is out of bounds, a wall, or the
    /// end cell.
    pub fn set_start(&mut self, p: Pos) -> bool {
        if !self.contains(p) || self.is_wall(p) || p == self.end {
            return false;
        }
        self.start = p;
        true
    }

    /// Move the end cell to `p`.
    ///
    /// Rejected (returns `false`) when `p` is out of bounds, a wall, or the
    /// start cell.
    pub fn set_end(&mut self, p: Pos) -> bool {
        if !self.contains(p) || self.is_wall(p) || p == self.start {
            return false;
        }
        self.end = p;
        true
    }

    /// Append the in-bounds orthogonal neighbours of `p` to `buf`, in up,
    /// down, left, right order.
    ///
    /// Wall cells are included: the engine relaxes them like any other
    /// neighbour and skips them when they are popped from the frontier.
    pub fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        for n in p.neighbors4() {
            if self.contains(n) {
                buf.push(n);
            }
        }
    }

    /// Row-major iterator over every cell position.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_defaults() {
        let g = Grid::new(20, 20);
        assert_eq!(g.rows(), 20);
        assert_eq!(g.cols(), 20);
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.end(), Pos::new(19, 19));
        assert!(g.positions().all(|p| !g.is_wall(p)));
    }

    #[test]
    fn degenerate_dimensions_clamped() {
        let g = Grid::new(1, 0);
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 2);
        assert_ne!(g.start(), g.end());
    }

    #[test]
    fn wall_toggling() {
        let mut g = Grid::new(5, 5);
        let p = Pos::new(2, 3);
        assert!(g.toggle_wall(p));
        assert!(g.is_wall(p));
        assert!(g.toggle_wall(p));
        assert!(!g.is_wall(p));
    }

    #[test]
    fn out_of_bounds_is_not_a_wall() {
        let mut g = Grid::new(5, 5);
        let p = Pos::new(-1, 2);
        assert!(!g.set_wall(p, true));
        assert!(!g.is_wall(p));
    }

    #[test]
    fn start_refuses_walls_and_end() {
        let mut g = Grid::new(5, 5);
        let wall = Pos::new(1, 1);
        g.set_wall(wall, true);
        assert!(!g.set_start(wall));
        assert!(!g.set_start(g.end()));
        assert!(!g.set_start(Pos::new(9, 9)));
        assert!(g.set_start(Pos::new(2, 2)));
        assert_eq!(g.start(), Pos::new(2, 2));
    }

    #[test]
    fn end_refuses_walls_and_start() {
        let mut g = Grid::new(5, 5);
        let wall = Pos::new(3, 3);
        g.set_wall(wall, true);
        assert!(!g.set_end(wall));
        assert!(!g.set_end(g.start()));
        assert!(g.set_end(Pos::new(0, 4)));
        assert_eq!(g.end(), Pos::new(0, 4));
    }

    #[test]
    fn clear_walls_removes_everything() {
        let mut g = Grid::new(4, 4);
        g.set_wall(Pos::new(1, 1), true);
        g.set_wall(Pos::new(2, 2), true);
        g.clear_walls();
        assert!(g.positions().all(|p| !g.is_wall(p)));
    }

    #[test]
    fn neighbors_in_up_down_left_right_order() {
        let g = Grid::new(5, 5);
        let mut buf = Vec::new();
        g.neighbors(Pos::new(2, 2), &mut buf);
        assert_eq!(
            buf,
            vec![
                Pos::new(1, 2),
                Pos::new(3, 2),
                Pos::new(2, 1),
                Pos::new(2, 3),
            ]
        );
    }

    #[test]
    fn neighbors_clipped_at_corner() {
        let g = Grid::new(5, 5);
        let mut buf = Vec::new();
        g.neighbors(Pos::new(0, 0), &mut buf);
        // Up and left fall outside; down then right remain.
        assert_eq!(buf, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn neighbors_include_walls() {
        let mut g = Grid::new(5, 5);
        g.set_wall(Pos::new(1, 2), true);
        let mut buf = Vec::new();
        g.neighbors(Pos::new(2, 2), &mut buf);
        assert!(buf.contains(&Pos::new(1, 2)));
    }

    #[test]
    fn positions_row_major() {
        let g = Grid::new(2, 3);
        let v: Vec<_> = g.positions().collect();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], Pos::new(0, 0));
        assert_eq!(v[2], Pos::new(0, 2));
        assert_eq!(v[3], Pos::new(1, 0));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(6, 7);
        g.set_wall(Pos::new(3, 3), true);
        g.set_start(Pos::new(1, 1));
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
