use std::f64::consts::PI;

use crate::error::{Result, TilingError};
use crate::math::point_2d::rotate_about;
use crate::math::{Point2, Vector2};
use crate::tiling::ShapeData;

// Empirical adjustments so the five seed polygons render at comparable
// apparent size.
const VA_3: f64 = 0.5775;
const VA_4: f64 = 0.95;
const VA_6: f64 = 1.0;
const VA_8: f64 = 1.0;
const VA_12: f64 = 1.15;

/// Builds the seed shape: a regular `sides`-gon of half-width `r`
/// centered on the origin, rotated so an edge faces the first placement
/// direction. The triangle is additionally shifted so its apparent
/// center matches the other seeds.
///
/// # Errors
///
/// Returns [`TilingError::Seed`] when `sides` is not one of 3, 4, 6, 8
/// or 12.
pub fn seed_shape(sides: u32, r: f64) -> Result<ShapeData> {
    let origin = Point2::origin();

    match sides {
        3 => {
            let mut shape = ShapeData::from_radius(3, r * VA_3, origin);
            shape.transform(|p| rotate_about(p, PI / 3.0, origin));
            shape.transform(|p| p + Vector2::new(r * VA_3, 0.0));
            shape.transform(|p| rotate_about(p, PI / -3.0, origin));
            Ok(shape)
        }
        4 | 6 | 8 | 12 => {
            let va = match sides {
                4 => VA_4,
                6 => VA_6,
                8 => VA_8,
                _ => VA_12,
            };
            let sides = sides as usize;
            let mut shape = ShapeData::from_radius(sides, r * va, origin);
            #[allow(clippy::cast_precision_loss)]
            let tilt = PI / sides as f64;
            shape.transform(|p| rotate_about(p, tilt, origin));
            Ok(shape)
        }
        _ => Err(TilingError::Seed),
    }
}
