use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// One field outside its documented domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Request failed field-domain validation. Always the caller's mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", join_messages(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by a classifier during inference
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Classifier returned {actual} probabilities for {expected} rows")]
    OutputLength { expected: usize, actual: usize },

    #[error("Classifier returned invalid probability {value} at row {row}")]
    InvalidProbability { row: usize, value: f64 },

    #[error("Inference failed: {reason}")]
    Internal { reason: String },
}

/// Errors surfaced by the scoring service
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Model not available at {}: {reason}. Train it first: cargo run --bin train_ml", .path.display())]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Errors reading or writing a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to access model file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {reason}")]
    Invalid { reason: String },
}

/// Errors raised while fitting a model
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training dataset is empty")]
    EmptyDataset,

    #[error("Training labels contain a single class ({class}); need both 0 and 1")]
    SingleClass { class: u8 },

    #[error("Invalid test fraction {fraction}: must be in [0, 1)")]
    InvalidSplit { fraction: f64 },

    #[error("Matrix error: {reason}")]
    Matrix { reason: String },

    #[error("Training error: {reason}")]
    Fit { reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Errors reading or writing CSV datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid label {label} at row {row}: must be 0 or 1")]
    InvalidLabel { row: usize, label: i64 },

    #[error("Invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid generator parameter: {reason}")]
    InvalidParameter { reason: String },
}
