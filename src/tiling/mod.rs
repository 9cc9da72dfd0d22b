pub mod segment;
pub mod shape;

pub use segment::{SegmentData, SegmentId};
pub use shape::{is_supported_side_count, ShapeData, ShapeId};

use slotmap::SlotMap;

use crate::math::point_2d::{
    coords_equal, distance_to_origin, midpoint, points_equal, polar_angle,
};
use crate::math::Point2;

/// A set of shapes added in one step, sharing a symmetry stage.
#[derive(Clone, Debug, Default)]
pub struct Group {
    pub shapes: Vec<ShapeId>,
    pub stage: Option<u32>,
}

/// Central arena that owns all tiling geometry.
///
/// Shapes and segments reference each other via typed IDs (generational
/// indices), avoiding the self-referential tree of owning composites and
/// making whole-structure clones during transform application cheap and
/// unambiguous.
#[derive(Debug, Default)]
pub struct Tiling {
    shapes: SlotMap<ShapeId, ShapeData>,
    segments: SlotMap<SegmentId, SegmentData>,
    groups: Vec<Group>,
    /// Minimum endpoint distance from the origin over still-unmatched
    /// segments; recomputed by [`Tiling::connect_segments`]. `None` until
    /// the first connect pass, or when every segment is matched.
    pub disconnected_min: Option<f64>,
    /// Maximum counterpart of [`Tiling::disconnected_min`].
    pub disconnected_max: Option<f64>,
}

impl Tiling {
    /// Creates a new, empty tiling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a reference to the shape data.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> &ShapeData {
        &self.shapes[id]
    }

    /// Returns a reference to the segment data.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> &SegmentData {
        &self.segments[id]
    }

    /// All groups in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Shape IDs in group order, then insertion order within each group.
    pub fn shapes_in_order(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.groups.iter().flat_map(|g| g.shapes.iter().copied())
    }

    /// Opens a new group tagged with `stage` and returns its index.
    pub fn push_group(&mut self, stage: Option<u32>) -> usize {
        self.groups.push(Group {
            shapes: Vec::new(),
            stage,
        });
        self.groups.len() - 1
    }

    /// Adds a shape to a group, deduplicating by centroid equality.
    ///
    /// A shape whose centroid coincides (within tolerance) with an
    /// existing member of the group is dropped and `None` is returned,
    /// leaving the first-added shape's stage tags intact. Otherwise the
    /// shape's edge segments are created, the group's stage is applied
    /// (write-once) and the new ID is returned.
    pub fn add_shape(&mut self, group: usize, mut data: ShapeData) -> Option<ShapeId> {
        let centroid = data.centroid();
        let duplicate = self.groups[group]
            .shapes
            .iter()
            .any(|&id| points_equal(self.shapes[id].centroid(), centroid));

        if duplicate {
            return None;
        }

        if let Some(stage) = self.groups[group].stage {
            data.set_stage(stage);
        }

        let sides = data.vertices.len();
        let id = self.shapes.insert(data);
        for edge in 0..sides {
            let segment = self.segments.insert(SegmentData {
                shape: id,
                edge,
                connection: None,
            });
            self.shapes[id].segments.push(segment);
        }

        self.groups[group].shapes.push(id);
        Some(id)
    }

    /// Collapses all groups into one, preserving insertion order.
    pub fn flatten(&mut self) {
        let shapes = self.shapes_in_order().collect();
        self.groups = vec![Group {
            shapes,
            stage: None,
        }];
    }

    /// Clones every shape through the point map `f` and merges the
    /// clones back, deduplicating by centroid.
    ///
    /// Clones are tagged with `stage` and inherit their source's
    /// placement number; their stage is fresh because a symmetry
    /// transform, not a placement, created them.
    pub fn merge_transform(&mut self, stage: u32, f: impl Fn(Point2) -> Point2) {
        let group = self.groups.len() - 1;
        let snapshot: Vec<(usize, Vec<Point2>, Option<u32>)> = self
            .shapes_in_order()
            .map(|id| {
                let shape = &self.shapes[id];
                (shape.sides, shape.vertices.clone(), shape.stage_placement)
            })
            .collect();

        for (sides, vertices, stage_placement) in snapshot {
            let data = ShapeData {
                sides,
                vertices: vertices.iter().map(|&v| f(v)).collect(),
                stage: Some(stage),
                stage_placement,
                segments: Vec::new(),
            };
            self.add_shape(group, data);
        }
    }

    // --- Segment queries ---

    /// Endpoints of a segment, derived from the owning shape.
    #[must_use]
    pub fn segment_points(&self, id: SegmentId) -> (Point2, Point2) {
        let segment = &self.segments[id];
        let vertices = &self.shapes[segment.shape].vertices;
        let n = vertices.len();
        (vertices[segment.edge], vertices[(segment.edge + 1) % n])
    }

    /// Midpoint of a segment.
    #[must_use]
    pub fn segment_centroid(&self, id: SegmentId) -> Point2 {
        let (v1, v2) = self.segment_points(id);
        midpoint(v1, v2)
    }

    /// Direction angle of a segment, first endpoint to second.
    #[must_use]
    pub fn segment_angle(&self, id: SegmentId) -> f64 {
        let (v1, v2) = self.segment_points(id);
        (v2.y - v1.y).atan2(v2.x - v1.x)
    }

    /// Minimum and maximum endpoint distance from the origin.
    #[must_use]
    pub fn segment_distance_range(&self, id: SegmentId) -> (f64, f64) {
        let (v1, v2) = self.segment_points(id);
        let d1 = distance_to_origin(v1);
        let d2 = distance_to_origin(v2);
        (d1.min(d2), d1.max(d2))
    }

    /// Whether a segment has been matched with a counterpart.
    #[must_use]
    pub fn is_connected(&self, id: SegmentId) -> bool {
        self.segments[id].is_connected()
    }

    /// Segment IDs of every shape in a group.
    #[must_use]
    pub fn group_segments(&self, group: usize) -> Vec<SegmentId> {
        self.groups[group]
            .shapes
            .iter()
            .flat_map(|&id| self.shapes[id].segments.iter().copied())
            .collect()
    }

    /// Sorts segments radially by centroid angle around the origin.
    ///
    /// The degenerate segment lying on the `x ≈ 0` axis has no stable
    /// centroid angle and is placed last. The sort is stable and keyed
    /// (not comparator-snapped), so ties keep insertion order.
    #[must_use]
    pub fn sorted_segments(&self, mut ids: Vec<SegmentId>) -> Vec<SegmentId> {
        ids.sort_by(|&a, &b| {
            let (a1, a2) = self.segment_points(a);
            let (b1, b2) = self.segment_points(b);
            let a_on_axis = coords_equal(a1.x, 0.0) && coords_equal(a2.x, 0.0);
            let b_on_axis = coords_equal(b1.x, 0.0) && coords_equal(b2.x, 0.0);

            a_on_axis.cmp(&b_on_axis).then_with(|| {
                polar_angle(self.segment_centroid(a))
                    .total_cmp(&polar_angle(self.segment_centroid(b)))
            })
        });
        ids
    }

    /// The adjacency-matching pass.
    ///
    /// Walks all segments in radial order, matching unconnected pairs by
    /// centroid equality and linking them symmetrically, then recomputes
    /// the min/max origin distance of the segments that remain
    /// unmatched. Those two numbers are the repetition loop's sole
    /// progress signal.
    pub fn connect_segments(&mut self) {
        let ids = self.sorted_segments(self.segments.keys().collect());
        let n = ids.len();

        self.disconnected_min = None;
        self.disconnected_max = None;

        for i in 0..n {
            let mut j = i + 1;
            while j < n && !self.segments[ids[i]].is_connected() {
                if !self.segments[ids[j]].is_connected()
                    && points_equal(self.segment_centroid(ids[i]), self.segment_centroid(ids[j]))
                {
                    self.segments[ids[i]].connection = Some(ids[j]);
                    self.segments[ids[j]].connection = Some(ids[i]);
                }
                j += 1;
            }

            if !self.segments[ids[i]].is_connected() {
                let (min, max) = self.segment_distance_range(ids[i]);
                if self.disconnected_max.is_none_or(|m| max > m) {
                    self.disconnected_max = Some(max);
                }
                if self.disconnected_min.is_none_or(|m| min < m) {
                    self.disconnected_min = Some(min);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_from_edge(e1: (f64, f64), e2: (f64, f64)) -> ShapeData {
        ShapeData::from_line_segment(4, Point2::new(e1.0, e1.1), Point2::new(e2.0, e2.1))
    }

    #[test]
    fn add_shape_deduplicates_by_centroid() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));

        let first = tiling.add_shape(group, ShapeData::from_radius(4, 10.0, Point2::origin()));
        let second = tiling.add_shape(group, ShapeData::from_radius(4, 10.0, Point2::origin()));

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(tiling.groups()[group].shapes.len(), 1);
    }

    #[test]
    fn dedup_preserves_first_assigned_stages() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(3));

        let mut original = ShapeData::from_radius(4, 10.0, Point2::origin());
        original.set_stage(1);
        let id = tiling.add_shape(group, original).unwrap();
        assert_eq!(tiling.shape(id).stage, Some(1));

        // A coinciding shape with a different stage is dropped entirely.
        let mut duplicate = ShapeData::from_radius(4, 10.0, Point2::origin());
        duplicate.set_stage(9);
        assert!(tiling.add_shape(group, duplicate).is_none());
        assert_eq!(tiling.shape(id).stage, Some(1));
    }

    #[test]
    fn group_stage_tags_new_shapes() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(4));
        let id = tiling
            .add_shape(group, ShapeData::from_radius(3, 5.0, Point2::new(20.0, 0.0)))
            .unwrap();
        assert_eq!(tiling.shape(id).stage, Some(4));
    }

    #[test]
    fn connect_links_shared_edges_symmetrically() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));

        // Two squares sharing the edge (0,0)-(10,0). The tolerance is
        // one canvas unit, so keep the squares large enough that only
        // the shared edge matches.
        let below = tiling
            .add_shape(group, square_from_edge((0.0, 0.0), (10.0, 0.0)))
            .unwrap();
        let above = tiling
            .add_shape(group, square_from_edge((10.0, 0.0), (0.0, 0.0)))
            .unwrap();

        tiling.connect_segments();

        let shared_below = tiling.shape(below).segments[0];
        let shared_above = tiling.shape(above).segments[0];
        assert!(tiling.is_connected(shared_below));
        assert!(tiling.is_connected(shared_above));
        assert_eq!(
            tiling.segment(shared_below).connection,
            Some(shared_above)
        );
        assert_eq!(
            tiling.segment(shared_above).connection,
            Some(shared_below)
        );

        // Six open edges remain, and the disconnected range covers them.
        let open = tiling
            .segments
            .keys()
            .filter(|&id| !tiling.is_connected(id))
            .count();
        assert_eq!(open, 6);
        assert!(tiling.disconnected_min.is_some());
        assert!(tiling.disconnected_max.is_some());
    }

    #[test]
    fn connect_recomputes_disconnected_range() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));
        tiling.add_shape(group, square_from_edge((0.0, 0.0), (10.0, 0.0)));
        tiling.connect_segments();
        let before_max = tiling.disconnected_max.unwrap();

        // A detached square farther out: its open edges extend the
        // radial span, so the recomputed maximum must grow.
        tiling.add_shape(group, square_from_edge((20.0, 0.0), (30.0, 0.0)));
        tiling.connect_segments();
        let after_max = tiling.disconnected_max.unwrap();

        assert!(after_max > before_max);
        // The near square still touches the origin.
        assert_eq!(tiling.disconnected_min, Some(0.0));
    }

    #[test]
    fn flatten_collapses_groups_in_order() {
        let mut tiling = Tiling::new();
        let g1 = tiling.push_group(Some(0));
        let a = tiling
            .add_shape(g1, ShapeData::from_radius(4, 10.0, Point2::origin()))
            .unwrap();
        let g2 = tiling.push_group(Some(0));
        let b = tiling
            .add_shape(g2, ShapeData::from_radius(4, 10.0, Point2::new(50.0, 0.0)))
            .unwrap();

        tiling.flatten();

        assert_eq!(tiling.groups().len(), 1);
        assert_eq!(tiling.shapes_in_order().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn merge_transform_tags_clones_and_dedups() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));
        let mut seed = ShapeData::from_radius(4, 10.0, Point2::new(20.0, 0.0));
        seed.set_stage_placement(1);
        tiling.add_shape(group, seed);
        tiling.flatten();

        // Half-turn about the origin: one new shape on the far side.
        tiling.merge_transform(1, |p| crate::math::point_2d::rotate_about(
            p,
            std::f64::consts::PI,
            Point2::origin(),
        ));

        let ids: Vec<_> = tiling.shapes_in_order().collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(tiling.shape(ids[1]).stage, Some(1));
        assert_eq!(tiling.shape(ids[1]).stage_placement, Some(1));

        // Applying the same transform again reproduces existing shapes
        // only; the count is unchanged.
        tiling.merge_transform(2, |p| crate::math::point_2d::rotate_about(
            p,
            std::f64::consts::PI,
            Point2::origin(),
        ));
        assert_eq!(tiling.shapes_in_order().count(), 2);
    }

    #[test]
    fn degenerate_axis_segment_sorts_last() {
        let mut tiling = Tiling::new();
        let group = tiling.push_group(Some(0));
        // Square with one edge running along x = 0.
        let id = tiling
            .add_shape(group, square_from_edge((0.0, 10.0), (0.0, 0.0)))
            .unwrap();

        let sorted = tiling.sorted_segments(tiling.group_segments(group));
        let last = *sorted.last().unwrap();
        let (v1, v2) = tiling.segment_points(last);
        assert!(v1.x.abs() < 1.0 && v2.x.abs() < 1.0);
        let _ = id;
    }
}
