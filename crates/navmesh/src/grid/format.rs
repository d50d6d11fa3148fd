//! Output formatting for the grid CLI (§4.6, §6; supplemented debug modes
//! per SPEC_FULL.md §2, grounded in `gridmap2rects.cpp`'s `print_*`
//! functions).

use std::io::{self, Write};

use super::types::GridSession;

/// Default mode: width-4 right-aligned heuristic score per cell, blank
/// (5 spaces) for obstacles.
pub fn write_heuristic(session: &GridSession, mut out: impl Write) -> io::Result<()> {
    for y in 0..session.height {
        for x in 0..session.width {
            let rect = session.best_rect(y, x);
            if rect.is_none() {
                write!(out, "     ")?;
            } else {
                write!(out, "{:>4} ", rect.score)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `width,height` pairs, width-2 each, blank (6 spaces) for obstacles.
pub fn write_rects(session: &GridSession, mut out: impl Write) -> io::Result<()> {
    for y in 0..session.height {
        for x in 0..session.width {
            let rect = session.best_rect(y, x);
            if rect.is_none() {
                write!(out, "      ")?;
            } else {
                write!(out, "{:>2},{:>2} ", rect.width, rect.height)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `clear_above` then a blank line then `clear_left`, width-3 per cell,
/// blank for zero.
pub fn write_clearance(session: &GridSession, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "above")?;
    write_clearance_table(session, true, &mut out)?;
    writeln!(out)?;
    writeln!(out, "left")?;
    write_clearance_table(session, false, &mut out)?;
    Ok(())
}

fn write_clearance_table(
    session: &GridSession,
    above: bool,
    mut out: impl Write,
) -> io::Result<()> {
    for y in 0..session.height {
        for x in 0..session.width {
            let v = if above {
                session.clear_above(y, x)
            } else {
                session.clear_left(y, x)
            };
            if v == 0 {
                write!(out, "   ")?;
            } else {
                write!(out, "{v:>3}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `@` for obstacle, `.` for traversable, one row per line.
pub fn write_traversable(session: &GridSession, mut out: impl Write) -> io::Result<()> {
    for y in 0..session.height {
        for x in 0..session.width {
            let c = if session.is_traversable(y, x) { '.' } else { '@' };
            write!(out, "{c}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
