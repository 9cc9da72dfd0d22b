pub mod engine;
pub mod error;
pub mod export;
pub mod math;
pub mod notation;
pub mod pool;
pub mod tiling;

pub use engine::to_shapes;
pub use error::{Result, TilingError};
pub use export::{AntwerpData, AntwerpOptions};
pub use notation::to_entities;
