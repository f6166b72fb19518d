// Synthetic training data
pub mod data;

// Model artifact, loading, training and evaluation
pub mod ml;

// Request-time scoring
pub mod scoring;
