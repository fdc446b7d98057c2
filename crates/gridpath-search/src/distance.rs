use gridpath_core::Pos;

/// Manhattan (L1) distance between two cells.
///
/// Admissible and consistent for unit-cost 4-directional movement, so the
/// heuristic search it drives returns optimal paths.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
