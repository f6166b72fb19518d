use super::logistic_model::LogisticRiskModel;
use crate::domain::errors::ModelError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Read a model artifact from disk.
///
/// A missing file is reported as [`ModelError::NotFound`] so callers can tell
/// "not trained yet" apart from a corrupt artifact.
pub fn load_classifier(path: &Path) -> Result<LogisticRiskModel, ModelError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ModelError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ModelError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let model = LogisticRiskModel::from_slice(&bytes)?;
    info!(
        "Successfully loaded risk model {} from {:?} (trained {} on {} rows)",
        model.model_id, path, model.trained_at, model.training_rows
    );
    Ok(model)
}
