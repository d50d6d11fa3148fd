//! Clearance recurrence (§4.5).
//!
//! `clear_above(y,x) = clear_above(y-1,x) + 1` when `(y,x)` is traversable,
//! `0` otherwise (and `0` out of range above the top row); `clear_left` is
//! the symmetric leftward recurrence. Implemented as a bottom-up two-loop
//! fill rather than the source's top-down memoized recursion (equivalent,
//! avoids deep call stacks on large maps).

use super::region::affected_cells;
use super::types::GridSession;

impl GridSession {
    /// Recompute `clear_above`/`clear_left` over the full grid.
    pub fn compute_clearance(&mut self) {
        self.recompute_clearance_region(None);
    }

    /// Recompute `clear_above`/`clear_left` over the tail affected by
    /// consuming a rectangle whose bottom-right corner is `consumed`.
    pub(crate) fn recompute_clearance_region(&mut self, consumed: Option<(usize, usize)>) {
        let cells = affected_cells(self.height, self.width, consumed);
        tracing::trace!(consumed = ?consumed, cells = cells.len(), "recomputing clearance region");
        for (y, x) in cells {
            if !self.traversable[y][x] {
                self.clear_above[y][x] = 0;
                self.clear_left[y][x] = 0;
                continue;
            }
            let above = if y == 0 { 0 } else { self.clear_above[y - 1][x] };
            let left = if x == 0 { 0 } else { self.clear_left[y][x - 1] };
            self.clear_above[y][x] = above + 1;
            self.clear_left[y][x] = left + 1;
        }
    }
}
