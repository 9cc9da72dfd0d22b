use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use crate::error::{Result, TilingError};
use crate::math::point_2d::{reflect_across, rotate_about};
use crate::math::{Point2, Vector2};
use crate::notation::{PointType, Transform, TransformAction};
use crate::tiling::Tiling;

use super::anchors::{self, Anchor};

/// A notation transform plus its lazily resolved anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTransform {
    pub transform: Transform,
    /// Populated once, the first time the transform is applied, from the
    /// anchor enumeration current at that stage. Repetition sweeps reuse
    /// it.
    pub anchor: Option<Anchor>,
}

impl ResolvedTransform {
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            anchor: None,
        }
    }

    /// Resolves the anchor for a point-relative transform from the given
    /// enumeration snapshot. Center-relative transforms and transforms
    /// already resolved are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::TransformNoIntersectionPoint`] when the
    /// referenced index does not exist in the snapshot.
    pub fn resolve(&mut self, snapshot: &[Anchor]) -> Result<()> {
        if self.anchor.is_some() {
            return Ok(());
        }
        let Some(index) = self.transform.point_index else {
            return Ok(());
        };

        let anchor = anchors::lookup(snapshot, self.transform.point_type, index)
            .cloned()
            .ok_or_else(|| TilingError::TransformNoIntersectionPoint {
                transform: self.transform.source.clone(),
            })?;
        self.anchor = Some(anchor);
        Ok(())
    }
}

/// Applies one transform to the whole structure, merging staged clones
/// back with centroid dedup. Does not run the connect pass; callers do,
/// once per explicit transform and once per repetition sweep.
///
/// # Errors
///
/// Returns [`TilingError::TransformAngleZero`] for a center-relative
/// transform whose effective angle is zero (or unparseable).
pub fn apply(tiling: &mut Tiling, stage: &mut u32, resolved: &ResolvedTransform) -> Result<()> {
    match (resolved.transform.action, resolved.anchor.as_ref()) {
        (TransformAction::Mirror, Some(anchor)) => {
            mirror_point(tiling, stage, anchor);
            Ok(())
        }
        (TransformAction::Mirror, None) => mirror_center(tiling, stage, resolved),
        (TransformAction::Rotate, Some(anchor)) => {
            rotate_point(tiling, stage, anchor);
            Ok(())
        }
        (TransformAction::Rotate, None) => rotate_center(tiling, stage, resolved),
    }
}

/// Reflects a clone across the line through the origin at the transform
/// angle (measured from vertical, like all notation angles).
fn mirror_center(tiling: &mut Tiling, stage: &mut u32, resolved: &ResolvedTransform) -> Result<()> {
    let angle = effective_angle(resolved)?;
    let axis = angle - FRAC_PI_2;
    let a = Point2::origin();
    let b = Point2::new(axis.cos(), axis.sin());

    *stage += 1;
    debug!(stage = *stage, angle, "mirror about center");
    tiling.merge_transform(*stage, |p| reflect_across(p, a, b));
    Ok(())
}

/// Reflects a clone across the line through the anchor point. The axis
/// runs along the anchor's polar direction rotated a quarter turn, or
/// along the edge itself for an edge-midpoint anchor.
fn mirror_point(tiling: &mut Tiling, stage: &mut u32, anchor: &Anchor) {
    let axis = match anchor.kind {
        PointType::EdgeMidpoint => anchor.edge_angle.unwrap_or(anchor.angle),
        PointType::Centroid | PointType::Vertex => anchor.angle + FRAC_PI_2,
    };
    let a = anchor.point + Vector2::new((axis - PI).cos(), (axis - PI).sin());
    let b = anchor.point + Vector2::new(axis.cos(), axis.sin());

    *stage += 1;
    debug!(stage = *stage, "mirror about point");
    tiling.merge_transform(*stage, |p| reflect_across(p, a, b));
}

/// Expands a single generator angle into a full rotation group: rotate a
/// clone of the whole current structure by the angle, merge, double the
/// angle, and repeat while below a full turn.
fn rotate_center(tiling: &mut Tiling, stage: &mut u32, resolved: &ResolvedTransform) -> Result<()> {
    let mut angle = effective_angle(resolved)?;

    while angle < TAU {
        *stage += 1;
        debug!(stage = *stage, angle, "rotate about center");
        tiling.merge_transform(*stage, |p| rotate_about(p, angle, Point2::origin()));
        angle *= 2.0;
    }
    Ok(())
}

/// Rotates a clone a half turn about the anchor point.
fn rotate_point(tiling: &mut Tiling, stage: &mut u32, anchor: &Anchor) {
    let center = anchor.point;

    *stage += 1;
    debug!(stage = *stage, "rotate about point");
    tiling.merge_transform(*stage, |p| rotate_about(p, PI, center));
}

/// The center-relative angle, rejecting zero and NaN.
fn effective_angle(resolved: &ResolvedTransform) -> Result<f64> {
    let angle = resolved.transform.action_angle.unwrap_or(0.0);
    if angle > 0.0 {
        Ok(angle)
    } else {
        Err(TilingError::TransformAngleZero {
            transform: resolved.transform.source.clone(),
        })
    }
}
