use crate::domain::errors::{ClassifierError, ScoringError, ValidationError};
use crate::domain::ml::feature_registry::{FeatureVector, encode, encode_batch};
use crate::domain::ports::RiskClassifier;
use crate::domain::risk::RiskAssessment;
use crate::domain::transaction::{TransactionRecord, validate_batch};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Classifier state fixed at startup
#[derive(Clone)]
enum ClassifierSlot {
    Loaded(Arc<dyn RiskClassifier>),
    Unavailable { path: PathBuf, reason: String },
}

/// Validates, encodes, classifies and labels transactions.
///
/// Built once at startup with the classifier injected, then shared read-only
/// across request handlers.
#[derive(Clone)]
pub struct ScoringService {
    classifier: ClassifierSlot,
}

impl ScoringService {
    pub fn new(classifier: Arc<dyn RiskClassifier>) -> Self {
        Self {
            classifier: ClassifierSlot::Loaded(classifier),
        }
    }

    /// A service whose every scoring call fails with `ModelUnavailable`.
    pub fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            classifier: ClassifierSlot::Unavailable {
                path: path.into(),
                reason: reason.into(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.classifier, ClassifierSlot::Loaded(_))
    }

    /// `(name, version)` of the loaded classifier
    pub fn model_info(&self) -> Option<(&str, &str)> {
        match &self.classifier {
            ClassifierSlot::Loaded(c) => Some((c.name(), c.version())),
            ClassifierSlot::Unavailable { .. } => None,
        }
    }

    fn classifier(&self) -> Result<&dyn RiskClassifier, ScoringError> {
        match &self.classifier {
            ClassifierSlot::Loaded(c) => Ok(c.as_ref()),
            ClassifierSlot::Unavailable { path, reason } => Err(ScoringError::ModelUnavailable {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Score a single transaction.
    pub fn score_one(&self, record: &TransactionRecord) -> Result<RiskAssessment, ScoringError> {
        record.validate().inspect_err(log_rejection)?;
        let classifier = self.classifier()?;

        let probabilities = classify(classifier, &[encode(record)])?;
        let assessment = RiskAssessment::from_probability(probabilities[0]);
        debug!(
            "Scored transaction: score={} label={}",
            assessment.risk_score, assessment.risk_label
        );
        Ok(assessment)
    }

    /// Score a batch in one classifier call. Output is index-aligned with
    /// `records`; any invalid record rejects the whole batch.
    pub fn score_batch(
        &self,
        records: &[TransactionRecord],
    ) -> Result<Vec<RiskAssessment>, ScoringError> {
        validate_batch(records).inspect_err(log_rejection)?;
        let classifier = self.classifier()?;

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = encode_batch(records);
        let assessments: Vec<RiskAssessment> = classify(classifier, &matrix)?
            .into_iter()
            .map(RiskAssessment::from_probability)
            .collect();
        debug!("Scored batch of {} transactions", assessments.len());
        Ok(assessments)
    }
}

/// Run the classifier and check its output shape and range.
fn classify(
    classifier: &dyn RiskClassifier,
    rows: &[FeatureVector],
) -> Result<Vec<f64>, ClassifierError> {
    let probabilities = classifier.predict_probability(rows).inspect_err(|e| {
        error!("Classifier {} failed: {}", classifier.name(), e);
    })?;

    if probabilities.len() != rows.len() {
        error!(
            "Classifier {} returned {} outputs for {} rows",
            classifier.name(),
            probabilities.len(),
            rows.len()
        );
        return Err(ClassifierError::OutputLength {
            expected: rows.len(),
            actual: probabilities.len(),
        });
    }
    if let Some((row, &value)) = probabilities
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        error!(
            "Classifier {} returned out-of-range probability {} at row {}",
            classifier.name(),
            value,
            row
        );
        return Err(ClassifierError::InvalidProbability { row, value });
    }

    Ok(probabilities)
}

fn log_rejection(err: &ValidationError) {
    debug!("Rejected request: {}", err);
}
