use crate::domain::errors::ClassifierError;
use crate::domain::ml::feature_registry::FeatureVector;

/// Binary probabilistic classifier used for risk scoring
pub trait RiskClassifier: Send + Sync {
    /// Probability (0.0 to 1.0) that each row belongs to the risky class.
    /// Element i of the output corresponds to `rows[i]`.
    fn predict_probability(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ClassifierError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}
