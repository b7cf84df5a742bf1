pub mod pipeline;
pub mod postprocess;
pub mod types;

pub use pipeline::ClassifyPipeline;
pub use types::{ClassLabel, ModelInfo, Prediction, PredictionResult};
