//! Navigation-mesh preprocessing: grid decomposition and polygon merging.
//!
//! Two independent pipelines live here, sharing only `geom2`:
//! - `grid`: decompose a traversability grid into large axis-aligned
//!   rectangles via clearance dynamic programming.
//! - `mesh`: merge a planar polygon mesh's convex faces across shared edges
//!   wherever the merged result stays convex.
//!
//! Both are synchronous and single-threaded; callers own a session struct
//! (`grid::GridSession`, `mesh::MeshSession`) and drive it by `&mut self`.

pub mod geom2;
pub mod grid;
pub mod mesh;

pub use geom2::{cross, is_clockwise, GeomCfg, Point2};
