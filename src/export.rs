//! Serializable input and output contracts of the engine.
//!
//! The engine is designed to run inside an isolated worker, so both ends
//! of an invocation are plain data that can cross a thread or process
//! boundary. Failures are data too: a renderable partial scene plus an
//! error descriptor, never a bare failure.

use serde::{Deserialize, Serialize};

use crate::engine::anchors::Anchor;
use crate::engine::transforms::ResolvedTransform;
use crate::error::TilingError;
use crate::notation::{PointType, TransformAction};

/// Input of one engine invocation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AntwerpOptions {
    pub configuration: String,
    /// Apparent shape diameter in canvas units.
    pub shape_size: f64,
    pub width: f64,
    pub height: f64,
    /// Repetition budget: `None` repeats until coverage, `Some(0)`
    /// disables repetition entirely.
    pub max_repeat: Option<u32>,
}

/// Output of one engine invocation: the scene a renderer draws.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AntwerpData {
    pub shapes: Vec<ShapeExport>,
    /// Number of symmetry stages applied (seed = 0).
    pub stages: u32,
    /// Number of shapes placed during the placement phases.
    pub stages_placement: u32,
    pub transforms: Vec<TransformExport>,
    /// The final transform-anchor enumeration.
    pub vertices: Vec<VertexExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorExport>,
}

/// One polygon, with the metadata the renderer colors by.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ShapeExport {
    pub vertices: Vec<[f64; 2]>,
    pub stage: u32,
    pub stage_placement: u32,
}

/// One resolved transform.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TransformExport {
    pub action: TransformAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_type: Option<PointType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<VertexExport>,
    pub source: String,
}

/// One anchor point of the enumeration.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VertexExport {
    pub point: [f64; 2],
    pub angle: f64,
    pub point_type: PointType,
    /// 1-based position within this point type's numbering.
    pub index: usize,
}

/// A typed engine error, serialized alongside the partial geometry.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorExport {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl From<&Anchor> for VertexExport {
    fn from(anchor: &Anchor) -> Self {
        Self {
            point: [anchor.point.x, anchor.point.y],
            angle: anchor.angle,
            point_type: anchor.kind,
            index: anchor.index,
        }
    }
}

impl From<&ResolvedTransform> for TransformExport {
    fn from(resolved: &ResolvedTransform) -> Self {
        Self {
            action: resolved.transform.action,
            action_angle: resolved.transform.action_angle,
            point_index: resolved.transform.point_index,
            point_type: resolved.transform.point_type,
            point: resolved.anchor.as_ref().map(VertexExport::from),
            source: resolved.transform.source.clone(),
        }
    }
}

impl From<&TilingError> for ErrorExport {
    fn from(error: &TilingError) -> Self {
        Self {
            code: error.code().to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}
