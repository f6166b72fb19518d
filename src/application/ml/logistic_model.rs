use crate::application::ml::evaluation::EvaluationReport;
use crate::domain::errors::{ClassifierError, ModelError};
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
use crate::domain::ports::RiskClassifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Artifact format understood by this build
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Persisted logistic-regression risk model.
///
/// `p = sigmoid(coefficients · x + intercept)` is the probability of the
/// risky class. Serialized as JSON; see [`LogisticRiskModel::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRiskModel {
    pub format_version: u32,
    pub model_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub training_rows: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationReport>,
    /// SHA-256 prefix of the file this model was loaded from, or the model id
    #[serde(skip)]
    version_tag: String,
}

impl LogisticRiskModel {
    /// Build a model from fitted parameters. Fails if the parameters do not
    /// line up with [`FEATURE_NAMES`].
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        training_rows: usize,
    ) -> Result<Self, ModelError> {
        let model_id = Uuid::new_v4();
        let model = Self {
            format_version: MODEL_FORMAT_VERSION,
            model_id,
            trained_at: Utc::now(),
            feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
            coefficients,
            intercept,
            training_rows,
            evaluation: None,
            version_tag: model_id.to_string(),
        };
        model.check()?;
        Ok(model)
    }

    pub fn with_evaluation(mut self, report: EvaluationReport) -> Self {
        self.evaluation = Some(report);
        self
    }

    /// Structural checks applied on construction and after deserialization.
    pub fn check(&self) -> Result<(), ModelError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::Invalid {
                reason: format!(
                    "unsupported format_version {} (expected {})",
                    self.format_version, MODEL_FORMAT_VERSION
                ),
            });
        }
        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .any(|(have, want)| have != want)
        {
            return Err(ModelError::Invalid {
                reason: format!(
                    "feature order {:?} does not match {:?}",
                    self.feature_names, FEATURE_NAMES
                ),
            });
        }
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Invalid {
                reason: format!(
                    "expected {} coefficients, found {}",
                    FEATURE_COUNT,
                    self.coefficients.len()
                ),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid {
                reason: "model parameters must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and check an artifact, fingerprinting the raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let mut model: Self = serde_json::from_slice(bytes)?;
        model.check()?;
        model.version_tag = fingerprint(bytes);
        Ok(model)
    }

    /// Write the artifact as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ModelError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Probability of the risky class for a single row
    pub fn probability(&self, row: &FeatureVector) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(row.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

impl RiskClassifier for LogisticRiskModel {
    fn predict_probability(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ClassifierError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ClassifierError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: self.coefficients.len(),
            });
        }
        Ok(rows.iter().map(|row| self.probability(row)).collect())
    }

    fn name(&self) -> &str {
        "Logistic Regression"
    }

    fn version(&self) -> &str {
        &self.version_tag
    }
}

/// Logistic function, stable for large |z|.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..6])
}
