//! Cell enumeration order for clearance/best-rectangle (re)computation.
//!
//! After a rectangle with bottom-right corner `(by, bx)` is consumed, only a
//! tail of the grid needs recomputing: rows `0..=by` restricted to columns
//! `bx..width`, followed by all of rows `by+1..height`. A full recompute is
//! the same shape with the first block empty (`by` as if `-1`).
//!
//! Iterating in this order guarantees every cell's upward/leftward
//! predecessor has already been recomputed (or lies outside the affected
//! region and is still valid) before the cell itself is visited.

/// Cells to revisit, in dependency-safe order, after consuming a rectangle
/// whose bottom-right corner is `consumed`. `None` means "recompute
/// everything".
pub fn affected_cells(
    height: usize,
    width: usize,
    consumed: Option<(usize, usize)>,
) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(height * width);
    let (by, bx) = match consumed {
        Some((by, bx)) => (by as isize, bx),
        None => (-1, 0),
    };
    for y in 0..=by {
        let y = y as usize;
        for x in bx..width {
            cells.push((y, x));
        }
    }
    let first_untouched_row = (by + 1) as usize;
    for y in first_untouched_row..height {
        for x in 0..width {
            cells.push((y, x));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_recompute_is_row_major_over_everything() {
        let cells = affected_cells(2, 3, None);
        assert_eq!(
            cells,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn partial_recompute_follows_spec_shape() {
        // consumed bottom-right at (1, 2) in a 4x4 grid
        let cells = affected_cells(4, 4, Some((1, 2)));
        // rows 0..=1, cols 2..4
        assert_eq!(cells[0], (0, 2));
        assert_eq!(cells[1], (0, 3));
        assert_eq!(cells[2], (1, 2));
        assert_eq!(cells[3], (1, 3));
        // then rows 2..4, all columns
        assert_eq!(cells[4], (2, 0));
        assert_eq!(cells.last().copied(), Some((3, 3)));
        assert_eq!(cells.len(), 4 + 2 * 4);
    }
}
