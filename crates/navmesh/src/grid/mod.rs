//! Grid-to-rectangles decomposition (§4.4–4.6).
//!
//! Purpose
//! - Parse a `.map` traversability grid, compute clearance tables, and pick
//!   the heuristically-best axis-aligned rectangle anchored at each cell.
//! - Two consumption modes, both exposed: a single full compute (used by
//!   the default CLI output), and an iterative "pick global argmax, consume,
//!   invalidate, recompute" decomposition loop (`GridSession::decompose`).
//!
//! References
//! - Grounded in `examples/original_source/gridmap2rects.cpp`.

mod clearance;
mod format;
mod parser;
mod picker;
mod region;
mod types;

pub use format::{write_clearance, write_heuristic, write_rects, write_traversable};
pub use parser::parse_map;
pub use types::{ConsumedRect, GridSession, Rect};

#[cfg(test)]
mod tests;
