//! Rectangle picker (§4.6) and iterative decomposition loop (§4.6, §5).

use super::region::affected_cells;
use super::types::{ConsumedRect, GridSession, Rect};

#[inline]
fn heuristic(width: u32, height: u32) -> i64 {
    let w = width as i64;
    let h = height as i64;
    w.min(h) * w * h
}

impl GridSession {
    /// Best rectangle anchored with its bottom-right corner at `(y, x)`.
    /// Requires `clear_above`/`clear_left` to already be up to date at and
    /// above/left of `(y, x)`.
    fn best_rect_at(&self, y: usize, x: usize) -> Rect {
        if !self.traversable[y][x] {
            return Rect::default();
        }
        let mut out = Rect::default();

        // Sweep width, tracking the running minimum height.
        {
            let mut h = self.clear_above[y][x];
            for w in 1..=self.clear_left[y][x] {
                h = h.min(self.clear_above[y][x - (w as usize) + 1]);
                let score = heuristic(w, h);
                if score > out.score {
                    out = Rect { width: w, height: h, score };
                }
            }
        }
        // Sweep height, tracking the running minimum width.
        {
            let mut w = self.clear_left[y][x];
            for h in 1..=self.clear_above[y][x] {
                w = w.min(self.clear_left[y - (h as usize) + 1][x]);
                let score = heuristic(w, h);
                if score > out.score {
                    out = Rect { width: w, height: h, score };
                }
            }
        }
        out
    }

    /// Recompute `best_rect` over the full grid. Assumes clearance tables
    /// are already current.
    pub fn compute_best_rects(&mut self) {
        self.recompute_best_rects_region(None);
    }

    pub(crate) fn recompute_best_rects_region(&mut self, consumed: Option<(usize, usize)>) {
        let cells = affected_cells(self.height, self.width, consumed);
        tracing::trace!(consumed = ?consumed, cells = cells.len(), "recomputing best-rect region");
        for (y, x) in cells {
            self.best_rect[y][x] = self.best_rect_at(y, x);
        }
    }

    /// Mark the rectangle anchored at bottom-right `(y, x)` as obstacle and
    /// invalidate/recompute clearance and best-rectangle tables over the
    /// affected tail (§4.5).
    fn consume_at(&mut self, y: usize, x: usize) -> Rect {
        let rect = self.best_rect[y][x];
        let top_y = y + 1 - rect.height as usize;
        let top_x = x + 1 - rect.width as usize;
        for row in top_y..=y {
            for col in top_x..=x {
                self.traversable[row][col] = false;
            }
        }
        self.recompute_clearance_region(Some((y, x)));
        self.recompute_best_rects_region(Some((y, x)));
        rect
    }

    /// Iterate "pick the global argmax, consume, invalidate, recompute"
    /// until every cell is an obstacle. Ties broken lexicographically by
    /// the consumed rectangle's bottom-right `(y, x)` (§5).
    ///
    /// Assumes `compute_clearance`/`compute_best_rects` have already been
    /// run once over the full grid.
    pub fn decompose(&mut self) -> Vec<ConsumedRect> {
        let _span = tracing::debug_span!("decompose", height = self.height, width = self.width).entered();
        let mut out = Vec::new();
        loop {
            let mut best: Option<(usize, usize, Rect)> = None;
            for y in 0..self.height {
                for x in 0..self.width {
                    let r = self.best_rect[y][x];
                    if r.is_none() {
                        continue;
                    }
                    match best {
                        Some((_, _, b)) if b.score >= r.score => {}
                        _ => best = Some((y, x, r)),
                    }
                }
            }
            let Some((y, x, rect)) = best else { break };
            tracing::trace!(y, x, width = rect.width, height = rect.height, "consuming rectangle");
            self.consume_at(y, x);
            out.push(ConsumedRect {
                top_y: y + 1 - rect.height as usize,
                top_x: x + 1 - rect.width as usize,
                width: rect.width,
                height: rect.height,
            });
        }
        out
    }
}
