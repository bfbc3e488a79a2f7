pub mod diff_map;
pub mod edge_map;
pub mod engine;
pub mod error;
pub mod frame;
pub mod matrix;
pub mod stats;

pub use diff_map::DiffRecord;
pub use edge_map::EdgeRecord;
pub use engine::{AnalysisResult, EngineState, FilteredTriple, FrameMetricsEngine};
pub use error::{FilterStage, MetricsError};
pub use frame::Frame;
pub use matrix::Matrix;
