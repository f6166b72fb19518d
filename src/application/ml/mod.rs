pub mod evaluation;
pub mod logistic_model;
pub mod model_loader;
pub mod trainer;

pub use evaluation::EvaluationReport;
pub use logistic_model::LogisticRiskModel;
pub use model_loader::load_classifier;
pub use trainer::{TrainingConfig, TrainingOutcome, train};
