use std::f64::consts::TAU;

use crate::math::{Point2, Vector2};

use super::segment::SegmentId;

slotmap::new_key_type! {
    /// Unique identifier for a shape in the tiling arena.
    pub struct ShapeId;
}

/// A regular polygon as an ordered vertex list.
///
/// `stage` records which symmetry-transform generation produced the
/// shape (0 = seed); `stage_placement` records insertion order during
/// the placement phase. Both are write-once so that first-assignment
/// semantics survive deduplicating merges.
#[derive(Clone, Debug)]
pub struct ShapeData {
    /// Side count; one of 3, 4, 6, 8 or 12.
    pub sides: usize,
    pub vertices: Vec<Point2>,
    pub stage: Option<u32>,
    pub stage_placement: Option<u32>,
    /// Edge segments, populated when the shape enters the arena.
    pub segments: Vec<SegmentId>,
}

/// Side counts the engine can construct.
#[must_use]
pub fn is_supported_side_count(sides: u32) -> bool {
    matches!(sides, 3 | 4 | 6 | 8 | 12)
}

impl ShapeData {
    /// Interior angle step for a regular polygon with this side count.
    #[must_use]
    pub fn step_angle(sides: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let sides = sides as f64;
        TAU / sides
    }

    /// Builds a regular polygon of the given circumradius centered at a
    /// point, first vertex on the positive x axis.
    #[must_use]
    pub fn from_radius(sides: usize, radius: f64, center: Point2) -> Self {
        let step = Self::step_angle(sides);
        let vertices = (0..sides)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let a = step * i as f64;
                center + Vector2::new(a.cos() * radius, a.sin() * radius)
            })
            .collect();

        Self {
            sides,
            vertices,
            stage: None,
            stage_placement: None,
            segments: Vec::new(),
        }
    }

    /// Builds a regular polygon outward from an existing edge.
    ///
    /// The edge is traversed in reverse (`e2` then `e1`) so the new
    /// polygon lands on the far side of the edge's owning shape.
    #[must_use]
    pub fn from_line_segment(sides: usize, e1: Point2, e2: Point2) -> Self {
        let step = Self::step_angle(sides);
        let v1 = e2;
        let v2 = e1;
        let length = (v2 - v1).norm();
        let mut a = (v2.y - v1.y).atan2(v2.x - v1.x) + step;

        let mut vertices = vec![v1, v2];
        for i in 2..sides {
            let prev = vertices[i - 1];
            vertices.push(prev + Vector2::new(a.cos() * length, a.sin() * length));
            a += step;
        }

        Self {
            sides,
            vertices,
            stage: None,
            stage_placement: None,
            segments: Vec::new(),
        }
    }

    /// Vertex mean. Recomputed on demand; never cached.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        let sum = self
            .vertices
            .iter()
            .fold(Vector2::zeros(), |acc, v| acc + v.coords);
        #[allow(clippy::cast_precision_loss)]
        let n = self.vertices.len() as f64;
        Point2::from(sum / n)
    }

    /// Maps every vertex through `f`. Only valid before the shape enters
    /// the arena; arena shapes are immutable.
    pub fn transform(&mut self, f: impl Fn(Point2) -> Point2) {
        for v in &mut self.vertices {
            *v = f(*v);
        }
    }

    /// Sets the symmetry stage unless already set.
    pub fn set_stage(&mut self, stage: u32) {
        if self.stage.is_none() {
            self.stage = Some(stage);
        }
    }

    /// Sets the placement sequence number unless already set.
    pub fn set_stage_placement(&mut self, stage_placement: u32) {
        if self.stage_placement.is_none() {
            self.stage_placement = Some(stage_placement);
        }
    }
}
