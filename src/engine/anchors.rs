use crate::math::point_2d::{points_equal, polar_angle};
use crate::math::Point2;
use crate::notation::PointType;
use crate::tiling::Tiling;

/// One candidate anchor point for a point-relative transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    pub point: Point2,
    /// Polar angle of the point, used for ordering.
    pub angle: f64,
    pub kind: PointType,
    /// For edge midpoints, the direction angle of the edge itself; a
    /// point-relative mirror through an edge anchor reflects along the
    /// edge rather than perpendicular to the radius.
    pub edge_angle: Option<f64>,
    /// 1-based position within this anchor's type after sorting.
    pub index: usize,
}

/// Enumerates the candidate transform anchor points of the current
/// structure.
///
/// Candidates are collected in a fixed order (shape centroids, then
/// vertices, then edge midpoints), the origin is excluded, coinciding
/// points are deduplicated keeping the first occurrence, and the result
/// is sorted by polar angle with distance from the origin breaking ties.
/// Indices are assigned per type independently, so `m180(v3)` resolves
/// within the vertex numbering alone.
///
/// Notation point indices always refer to the structure as it stands, so
/// the enumeration must be re-taken after every placement phase and
/// every applied transform.
#[must_use]
pub fn enumerate(tiling: &Tiling) -> Vec<Anchor> {
    let mut anchors: Vec<Anchor> = Vec::new();

    for id in tiling.shapes_in_order() {
        push(&mut anchors, tiling.shape(id).centroid(), PointType::Centroid, None);
    }

    for id in tiling.shapes_in_order() {
        for &vertex in &tiling.shape(id).vertices {
            push(&mut anchors, vertex, PointType::Vertex, None);
        }
    }

    for id in tiling.shapes_in_order() {
        for &segment in &tiling.shape(id).segments {
            push(
                &mut anchors,
                tiling.segment_centroid(segment),
                PointType::EdgeMidpoint,
                Some(tiling.segment_angle(segment)),
            );
        }
    }

    anchors.sort_by(|a, b| {
        a.angle.total_cmp(&b.angle).then_with(|| {
            a.point
                .coords
                .norm()
                .total_cmp(&b.point.coords.norm())
        })
    });

    let mut counts = [0_usize; 3];
    for anchor in &mut anchors {
        let slot = match anchor.kind {
            PointType::Centroid => &mut counts[0],
            PointType::Vertex => &mut counts[1],
            PointType::EdgeMidpoint => &mut counts[2],
        };
        *slot += 1;
        anchor.index = *slot;
    }

    anchors
}

/// Looks up an anchor by 1-based index, within one type's numbering or
/// across the whole enumeration when no type was given.
#[must_use]
pub fn lookup(anchors: &[Anchor], kind: Option<PointType>, index: usize) -> Option<&Anchor> {
    match kind {
        Some(kind) => anchors.iter().filter(|a| a.kind == kind).nth(index - 1),
        None => anchors.get(index - 1),
    }
}

fn push(anchors: &mut Vec<Anchor>, point: Point2, kind: PointType, edge_angle: Option<f64>) {
    if points_equal(point, Point2::origin()) {
        return;
    }
    if anchors.iter().any(|a| points_equal(a.point, point)) {
        return;
    }

    anchors.push(Anchor {
        point,
        angle: polar_angle(point),
        kind,
        edge_angle,
        index: 0,
    });
}
