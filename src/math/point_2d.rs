use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Point2, ANGLE_TOLERANCE, COORDINATE_TOLERANCE};

/// Returns the polar angle of a point, measured from vertical and
/// normalized into `[0, 2π)`.
///
/// Values within [`ANGLE_TOLERANCE`] of `2π` snap to exactly `0` so that
/// radial sorting is stable across the wrap point.
#[must_use]
pub fn polar_angle(p: Point2) -> f64 {
    let a1 = p.y.atan2(p.x) + FRAC_PI_2;
    let a2 = if a1 < 0.0 { a1 + TAU } else { a1 };
    let da = a2 - TAU;

    if da > -ANGLE_TOLERANCE && da < ANGLE_TOLERANCE {
        0.0
    } else {
        a2
    }
}

/// Difference between two polar angles, snapped to `0` within
/// [`ANGLE_TOLERANCE`].
#[must_use]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let da = a - b;

    if da > -ANGLE_TOLERANCE && da < ANGLE_TOLERANCE {
        0.0
    } else {
        da
    }
}

/// Checks two scalar coordinates for equality within
/// [`COORDINATE_TOLERANCE`].
#[must_use]
pub fn coords_equal(a: f64, b: f64) -> bool {
    let d = a - b;
    d > -COORDINATE_TOLERANCE && d < COORDINATE_TOLERANCE
}

/// Checks two points for equality, per axis, within
/// [`COORDINATE_TOLERANCE`].
#[must_use]
pub fn points_equal(a: Point2, b: Point2) -> bool {
    coords_equal(a.x, b.x) && coords_equal(a.y, b.y)
}

/// Distance from a point to the origin.
#[must_use]
pub fn distance_to_origin(p: Point2) -> f64 {
    p.x.hypot(p.y)
}

/// Difference between two points' distances from the origin, snapped to
/// `0` within [`COORDINATE_TOLERANCE`].
#[must_use]
pub fn distance_difference(a: Point2, b: Point2) -> f64 {
    let d = distance_to_origin(a) - distance_to_origin(b);

    if d > -COORDINATE_TOLERANCE && d < COORDINATE_TOLERANCE {
        0.0
    } else {
        d
    }
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Reflects a point across the infinite line through `a` and `b`.
#[must_use]
pub fn reflect_across(p: Point2, a: Point2, b: Point2) -> Point2 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d = dx * dx + dy * dy;
    let ca = (dx * dx - dy * dy) / d;
    let cb = 2.0 * dx * dy / d;

    Point2::new(
        ca * (p.x - a.x) + cb * (p.y - a.y) + a.x,
        cb * (p.x - a.x) - ca * (p.y - a.y) + a.y,
    )
}

/// Rotates a point by `angle` radians about `center`.
#[must_use]
pub fn rotate_about(p: Point2, angle: f64, center: Point2) -> Point2 {
    let cos = angle.cos();
    let sin = angle.sin();

    Point2::new(
        cos * (p.x - center.x) - sin * (p.y - center.y) + center.x,
        cos * (p.y - center.y) + sin * (p.x - center.x) + center.y,
    )
}
