pub mod classifier;
pub mod manager;

pub use classifier::LesionClassifier;
pub use manager::{get_classifier, get_model_stats, health_check, ModelManager, ModelStats};
