//! The tiling generation engine.
//!
//! A pure function of its inputs: seed construction, phase placement,
//! transform resolution/application and bounded repetition, serialized
//! to the export contract. No state survives an invocation, so any
//! number of invocations may run concurrently (see [`crate::pool`]).

pub mod anchors;
pub mod placement;
pub mod repeat;
pub mod seed;
pub mod transforms;

use tracing::debug;

use crate::error::{Result, TilingError};
use crate::export::{AntwerpData, AntwerpOptions, ShapeExport, TransformExport, VertexExport};
use crate::notation::{to_entities, Transform};
use crate::tiling::Tiling;

use anchors::Anchor;
use transforms::ResolvedTransform;

/// Generates tessellation geometry from a configuration.
///
/// Never panics and never fails outright: any engine error is returned
/// in [`AntwerpData::error`] together with the partial geometry built
/// before the failure, so the caller always receives a renderable
/// scene.
#[must_use]
pub fn to_shapes(options: &AntwerpOptions) -> AntwerpData {
    let entities = to_entities(&options.configuration);

    let Some(seed) = entities.seed else {
        // An empty configuration is an explicit empty scene, not an
        // error.
        return AntwerpData::default();
    };

    let mut engine = Engine::new(entities.transforms);
    let error = engine.run(seed, &entities.phases, options).err();
    engine.into_data(error)
}

/// Accumulated state of one invocation.
struct Engine {
    tiling: Tiling,
    /// Symmetry-stage counter; the seed is stage 0 and every transform
    /// clone increments it.
    stage: u32,
    /// Placement counter; the seed is placement 1.
    stage_placement: u32,
    /// Anchor enumerations: one snapshot after placement, then one after
    /// each applied transform. Transform `i` resolves against snapshot
    /// `i`.
    snapshots: Vec<Vec<Anchor>>,
    transforms: Vec<ResolvedTransform>,
}

impl Engine {
    fn new(transforms: Vec<Transform>) -> Self {
        Self {
            tiling: Tiling::new(),
            stage: 0,
            stage_placement: 0,
            snapshots: Vec::new(),
            transforms: transforms.into_iter().map(ResolvedTransform::new).collect(),
        }
    }

    fn run(&mut self, seed: u32, phases: &[Vec<u32>], options: &AntwerpOptions) -> Result<()> {
        debug!(seed, phases = phases.len(), transforms = self.transforms.len(), "generating");

        let mut shape = seed::seed_shape(seed, options.shape_size / 2.0)?;
        self.stage_placement += 1;
        shape.set_stage_placement(self.stage_placement);
        let group = self.tiling.push_group(Some(self.stage));
        self.tiling.add_shape(group, shape);

        placement::place_phases(
            &mut self.tiling,
            self.stage,
            &mut self.stage_placement,
            phases,
        )?;
        if phases.is_empty() {
            // Placement normally leaves connectivity current; with no
            // phases the repetition loop still needs its signal.
            self.tiling.connect_segments();
        }

        self.tiling.flatten();
        self.snapshots.push(anchors::enumerate(&self.tiling));

        for i in 0..self.transforms.len() {
            self.transforms[i].resolve(&self.snapshots[i])?;
            transforms::apply(&mut self.tiling, &mut self.stage, &self.transforms[i])?;
            self.tiling.connect_segments();
            self.snapshots.push(anchors::enumerate(&self.tiling));
        }

        repeat::run(&mut self.tiling, &mut self.stage, &self.transforms, options)
    }

    /// Serializes whatever has been built, complete or partial.
    fn into_data(self, error: Option<TilingError>) -> AntwerpData {
        let shapes = self
            .tiling
            .shapes_in_order()
            .map(|id| {
                let shape = self.tiling.shape(id);
                ShapeExport {
                    vertices: shape.vertices.iter().map(|v| [v.x, v.y]).collect(),
                    stage: shape.stage.unwrap_or(0),
                    stage_placement: shape.stage_placement.unwrap_or(0),
                }
            })
            .collect();

        let vertices = self
            .snapshots
            .last()
            .map(|snapshot| snapshot.iter().map(VertexExport::from).collect())
            .unwrap_or_default();

        AntwerpData {
            shapes,
            stages: self.stage,
            stages_placement: self.stage_placement,
            transforms: self.transforms.iter().map(TransformExport::from).collect(),
            vertices,
            error: error.as_ref().map(Into::into),
        }
    }
}
