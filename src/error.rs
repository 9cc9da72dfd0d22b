use thiserror::Error;

/// Top-level error type for the tessellation engine.
///
/// Every variant is non-fatal: the engine catches it at the invocation
/// boundary and returns it as data alongside the partial geometry built
/// so far (see [`crate::export::AntwerpData::error`]).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TilingError {
    #[error("the seed shape must be one of 3, 4, 6, 8 or 12, directly followed by a `-` to indicate the start of the next shape group")]
    Seed,

    #[error("shapes must only be one of 3, 4, 6, 8 or 12")]
    InvalidShape,

    #[error("the angle of the \"{transform}\" transform must be greater than 0")]
    TransformAngleZero { transform: String },

    #[error("no intersection point found for the \"{transform}\" transform")]
    TransformNoIntersectionPoint { transform: String },

    #[error("the covered area did not increase when the tile was repeated; this is likely caused by one or more incorrect transforms")]
    TransformNoChange,
}

impl TilingError {
    /// Stable machine-readable error code, part of the export contract.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Seed => "ErrorSeed",
            Self::InvalidShape => "ErrorInvalidShape",
            Self::TransformAngleZero { .. } => "ErrorTransformAngleZero",
            Self::TransformNoIntersectionPoint { .. } => "ErrorTransformNoIntersectionPoint",
            Self::TransformNoChange => "ErrorTransformNoChange",
        }
    }

    /// Human-readable error category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Seed => "Seed Shape",
            Self::InvalidShape => "Invalid Shape",
            Self::TransformAngleZero { .. } => "Transform Angle",
            Self::TransformNoIntersectionPoint { .. } => "Transform Intersection Point",
            Self::TransformNoChange => "Repeated Transform",
        }
    }
}

/// Convenience type alias for results using [`TilingError`].
pub type Result<T> = std::result::Result<T, TilingError>;
