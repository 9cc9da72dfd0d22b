//! Decoder for the tiling configuration notation.
//!
//! ```text
//! config      := seed ('-' phase)* ('/' transform)*
//! phase       := token (',' token)*
//! token       := '' | '0' | '3' | '4' | '6' | '8' | '12'
//! transform   := action angle? '(' pointType? index ')'?
//! action      := 'm' | 'r'
//! angle       := digits ('.' digits)?      degrees, default 180
//! pointType   := 'c' | 'v' | 'h'
//! index       := digits                    1-based within the point type
//! ```
//!
//! The decoder never fails: malformed transform tokens are dropped, skip
//! placeholders are preserved positionally, and an invalid seed is left
//! for the engine to reject.

use serde::{Deserialize, Serialize};

const DELIMITER_TRANSFORM: char = '/';
const DELIMITER_PHASE: char = '-';
const DELIMITER_SHAPE: char = ',';

const DEFAULT_ANGLE_DEGREES: f64 = 180.0;

/// The symmetry operation a transform performs.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TransformAction {
    #[serde(rename = "m")]
    Mirror,
    #[serde(rename = "r")]
    Rotate,
}

/// The kind of anchor point a point-relative transform refers to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PointType {
    #[serde(rename = "c")]
    Centroid,
    #[serde(rename = "v")]
    Vertex,
    #[serde(rename = "h")]
    EdgeMidpoint,
}

/// One parsed transform token.
///
/// A transform is center-relative (`point_index` is `None`; it operates
/// through the origin at `action_angle`) or point-relative (it operates
/// through the anchor the engine resolves from `point_type` and
/// `point_index`).
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub action: TransformAction,
    /// Rotation/mirror angle in radians; `None` for point-relative
    /// transforms. An unparseable angle becomes `0`, which the engine
    /// rejects.
    pub action_angle: Option<f64>,
    /// 1-based index into the anchor enumeration current at the stage
    /// the transform is applied.
    pub point_index: Option<usize>,
    pub point_type: Option<PointType>,
    /// The raw token, kept for error messages and the export.
    pub source: String,
}

/// The structured form of a configuration string.
#[derive(Clone, Debug, PartialEq)]
pub struct Entities {
    /// Seed side count. `None` for an empty configuration; unparseable
    /// tokens become `Some(0)` and fail seed validation in the engine.
    pub seed: Option<u32>,
    /// Shape-group phases, left to right. `0` entries are positional
    /// "skip this edge" placeholders.
    pub phases: Vec<Vec<u32>>,
    pub transforms: Vec<Transform>,
}

/// Decodes a configuration string into its seed, phases and transforms.
#[must_use]
pub fn to_entities(configuration: &str) -> Entities {
    let mut stages = configuration.split(DELIMITER_TRANSFORM);
    let shapes = stages.next().unwrap_or("");

    let mut groups = shapes.split(DELIMITER_PHASE);
    let seed_token = groups.next().unwrap_or("").trim();
    let seed = if seed_token.is_empty() {
        None
    } else {
        Some(seed_token.parse().unwrap_or(0))
    };

    let phases = groups
        .map(|group| {
            group
                .split(DELIMITER_SHAPE)
                .map(|token| token.trim().parse().unwrap_or(0))
                .collect()
        })
        .collect();

    let transforms = stages.filter_map(parse_transform).collect();

    Entities {
        seed,
        phases,
        transforms,
    }
}

/// Parses one transform token, returning `None` when it does not match
/// the grammar. Unrecognized tokens are dropped, not rejected.
fn parse_transform(token: &str) -> Option<Transform> {
    let mut rest = token;

    let action = match rest.chars().next()? {
        'm' | 'M' => TransformAction::Mirror,
        'r' | 'R' => TransformAction::Rotate,
        _ => return None,
    };
    rest = &rest[1..];

    let angle_end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    let angle_token = &rest[..angle_end];
    rest = &rest[angle_end..];

    let (point_type, point_index) = parse_point(rest);

    // An unparseable angle maps to zero so the engine reports it as an
    // angle error instead of silently defaulting.
    let action_angle = if point_index.is_some() {
        None
    } else {
        let degrees = if angle_token.is_empty() {
            DEFAULT_ANGLE_DEGREES
        } else {
            angle_token.parse().unwrap_or(0.0)
        };
        Some(degrees.to_radians())
    };

    Some(Transform {
        action,
        action_angle,
        point_index,
        point_type,
        source: token.to_string(),
    })
}

/// Parses the optional `(pointType? index)` suffix of a transform token.
///
/// A parsed index of `0` means no anchor reference: the transform stays
/// center-relative.
fn parse_point(rest: &str) -> (Option<PointType>, Option<usize>) {
    let Some(mut rest) = rest.strip_prefix('(') else {
        return (None, None);
    };

    let point_type = match rest.chars().next() {
        Some('c') => Some(PointType::Centroid),
        Some('v') => Some(PointType::Vertex),
        Some('h') => Some(PointType::EdgeMidpoint),
        _ => None,
    };
    if point_type.is_some() {
        rest = &rest[1..];
    }

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let point_index = rest[..digits_end].parse().ok().filter(|&i: &usize| i > 0);

    if point_index.is_none() {
        (None, None)
    } else {
        (point_type, point_index)
    }
}
