use crate::domain::transaction::TransactionRecord;

/// Number of features fed to the classifier
pub const FEATURE_COUNT: usize = 6;

/// Ordered list of feature names.
/// This order MUST match the order the model was trained on; it is stored in
/// every model artifact and checked at load time.
/// Any change here is a breaking change for ML models.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "txn_amount",
    "txn_count_24h",
    "account_age_days",
    "is_international",
    "device_change_7d",
    "failed_logins_24h",
];

/// One encoded transaction, in [`FEATURE_NAMES`] order
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Converts a record into its feature vector. Performs no validation.
pub fn encode(record: &TransactionRecord) -> FeatureVector {
    record.values()
}

/// Encodes records into an `(n, 6)` matrix, row i = `encode(records[i])`.
pub fn encode_batch(records: &[TransactionRecord]) -> Vec<FeatureVector> {
    records.iter().map(encode).collect()
}
