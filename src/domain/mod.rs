// Feature encoding shared by training and serving
pub mod ml;

// Classifier port
pub mod ports;

// Risk bands and assessments
pub mod risk;

// Transaction records and field domains
pub mod transaction;

// Domain-specific error types
pub mod errors;
