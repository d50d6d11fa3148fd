use nalgebra::Vector2;

/// A 2D point. Alias over `nalgebra::Vector2` so callers get `.x`/`.y` and
/// the usual vector arithmetic for free.
pub type Point2 = Vector2<f64>;

/// Geometry tolerances. Centralizes the epsilon used by the convexity
/// predicate so it is a single tunable value rather than a scattered
/// literal.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    pub eps_cw: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps_cw: 1e-8 }
    }
}

/// `cross(a, b, c) = (b - a) x (c - b)`.
#[inline]
pub fn cross(a: Point2, b: Point2, c: Point2) -> f64 {
    let ab = b - a;
    let bc = c - b;
    ab.x * bc.y - ab.y * bc.x
}

/// True iff the path `a -> b -> c` turns strictly clockwise at `b`, i.e. `b`
/// is a reflex vertex of a CCW polygon. Collinear-with-slack (`|cross| <=
/// eps`) counts as non-clockwise.
#[inline]
pub fn is_clockwise(a: Point2, b: Point2, c: Point2, cfg: &GeomCfg) -> bool {
    cross(a, b, c) < -cfg.eps_cw
}
