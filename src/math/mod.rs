pub mod point_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Snapping tolerance for coordinate comparisons, in canvas units.
///
/// Deliberately coarse: it absorbs the floating-point drift accumulated
/// by repeated reflections and rotations, which is what lets two polygons
/// generated independently be recognized as sharing an edge.
pub const COORDINATE_TOLERANCE: f64 = 1.0;

/// Snapping tolerance for polar-angle comparisons, in radians.
pub const ANGLE_TOLERANCE: f64 = 1e-3;
