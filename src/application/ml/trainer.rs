use super::evaluation::EvaluationReport;
use super::logistic_model::LogisticRiskModel;
use crate::domain::errors::TrainingError;
use crate::domain::ml::feature_registry::{FEATURE_COUNT, FeatureVector, encode};
use crate::domain::ports::RiskClassifier;
use crate::domain::transaction::LabeledTransaction;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{
    LogisticRegression, LogisticRegressionParameters, LogisticRegressionSolverName,
};
use tracing::info;

/// Trainer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    /// Fraction of each class held out for evaluation
    pub test_fraction: f64,
    /// L2 regularization strength
    pub alpha: f64,
    /// Seed for the train/test shuffle
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            alpha: 1.0,
            seed: 42,
        }
    }
}

/// Fitted model and its held-out metrics
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: LogisticRiskModel,
    pub report: Option<EvaluationReport>,
}

/// Split indices per class so both partitions keep the label ratio.
/// Returns `(train, test)`.
pub fn stratified_split(
    labels: &[u8],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), TrainingError> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(TrainingError::InvalidSplit {
            fraction: test_fraction,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0u8, 1u8] {
        let mut idx: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, y)| **y == class)
            .map(|(i, _)| i)
            .collect();
        idx.shuffle(&mut rng);
        let n_test = (idx.len() as f64 * test_fraction).round() as usize;
        test.extend_from_slice(&idx[..n_test]);
        train.extend_from_slice(&idx[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// Fit a logistic regression on `rows` and evaluate it on a held-out split.
pub fn train(
    rows: &[LabeledTransaction],
    config: &TrainingConfig,
) -> Result<TrainingOutcome, TrainingError> {
    if rows.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }

    let features: Vec<FeatureVector> = rows.iter().map(|r| encode(&r.record)).collect();
    let labels: Vec<u8> = rows.iter().map(|r| r.label).collect();
    check_classes(&labels)?;

    let (train_idx, test_idx) = stratified_split(&labels, config.test_fraction, config.seed)?;
    let train_labels: Vec<u8> = train_idx.iter().map(|&i| labels[i]).collect();
    check_classes(&train_labels)?;

    info!(
        "Training on {} samples, holding out {} (alpha={})...",
        train_idx.len(),
        test_idx.len(),
        config.alpha
    );
    let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| features[i].to_vec()).collect();
    let (coefficients, intercept) = fit_logistic(&x_train, &train_labels, config.alpha)?;
    let model = LogisticRiskModel::new(coefficients, intercept, train_idx.len())?;

    let report = if test_idx.is_empty() {
        None
    } else {
        let x_test: Vec<FeatureVector> = test_idx.iter().map(|&i| features[i]).collect();
        let y_test: Vec<u8> = test_idx.iter().map(|&i| labels[i]).collect();
        let probabilities = model
            .predict_probability(&x_test)
            .map_err(|e| TrainingError::Fit {
                reason: e.to_string(),
            })?;
        let report = EvaluationReport::compute(&y_test, &probabilities);
        info!(
            "OOS Test (n={}): Precision={:.3}, Recall={:.3}, F1={:.3}, ROC-AUC={:.3}",
            report.test_rows, report.precision, report.recall, report.f1, report.roc_auc
        );
        Some(report)
    };

    let model = match report {
        Some(r) => model.with_evaluation(r),
        None => model,
    };
    Ok(TrainingOutcome { model, report })
}

fn check_classes(labels: &[u8]) -> Result<(), TrainingError> {
    let Some(&first) = labels.first() else {
        return Err(TrainingError::EmptyDataset);
    };
    if labels.iter().all(|&y| y == first) {
        return Err(TrainingError::SingleClass { class: first });
    }
    Ok(())
}

/// Per-feature mean and standard deviation of the training matrix
fn column_stats(x: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() as f64;
    let mut mean = vec![0.0; FEATURE_COUNT];
    let mut sd = vec![0.0; FEATURE_COUNT];
    for row in x {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v / n;
        }
    }
    for row in x {
        for ((s, m), v) in sd.iter_mut().zip(&mean).zip(row) {
            *s += (v - m).powi(2) / n;
        }
    }
    // constant columns keep unit scale
    let sd = sd
        .into_iter()
        .map(|var| if var > 0.0 { var.sqrt() } else { 1.0 })
        .collect();
    (mean, sd)
}

/// Run smartcore's LBFGS logistic regression on standardized features and
/// map the fitted `(weights, bias)` back to raw feature space.
fn fit_logistic(x: &[Vec<f64>], y: &[u8], alpha: f64) -> Result<(Vec<f64>, f64), TrainingError> {
    let (mean, sd) = column_stats(x);
    let scaled: Vec<Vec<f64>> = x
        .iter()
        .map(|row| {
            row.iter()
                .zip(mean.iter().zip(&sd))
                .map(|(v, (m, s))| (v - m) / s)
                .collect()
        })
        .collect();

    let x_matrix = DenseMatrix::from_2d_vec(&scaled).map_err(|e| TrainingError::Matrix {
        reason: e.to_string(),
    })?;
    let y: Vec<i32> = y.iter().map(|&v| i32::from(v)).collect();

    let params = LogisticRegressionParameters::default()
        .with_solver(LogisticRegressionSolverName::LBFGS)
        .with_alpha(alpha);

    let fitted = LogisticRegression::fit(&x_matrix, &y, params).map_err(|e| TrainingError::Fit {
        reason: e.to_string(),
    })?;

    // Binary problems yield a single row (or column) of weights.
    let coef = fitted.coefficients();
    let (rows, cols) = coef.shape();
    let scaled_weights: Vec<f64> = if rows == 1 {
        (0..cols).map(|j| *coef.get((0, j))).collect()
    } else {
        (0..rows).map(|i| *coef.get((i, 0))).collect()
    };
    if scaled_weights.len() != FEATURE_COUNT {
        return Err(TrainingError::Fit {
            reason: format!(
                "expected {} coefficients from solver, got {}",
                FEATURE_COUNT,
                scaled_weights.len()
            ),
        });
    }
    let scaled_intercept = *fitted.intercept().get((0, 0));

    // w·((x - m) / s) + b  ==  (w / s)·x + (b - Σ w·m / s)
    let weights: Vec<f64> = scaled_weights.iter().zip(&sd).map(|(w, s)| w / s).collect();
    let intercept = scaled_intercept
        - weights
            .iter()
            .zip(&mean)
            .map(|(w, m)| w * m)
            .sum::<f64>();

    Ok((weights, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_stats() {
        let x = vec![vec![1.0, 5.0, 0.0, 0.0, 0.0, 2.0], vec![3.0, 5.0, 0.0, 0.0, 0.0, 4.0]];
        let (mean, sd) = column_stats(&x);
        assert_eq!(mean[0], 2.0);
        assert_eq!(sd[0], 1.0);
        // constant column keeps unit scale
        assert_eq!(sd[1], 1.0);
        assert_eq!(mean[5], 3.0);
    }

    #[test]
    fn test_stratified_split_keeps_ratio() {
        let labels: Vec<u8> = (0..100).map(|i| u8::from(i % 4 == 0)).collect();
        let (train, test) = stratified_split(&labels, 0.2, 42).unwrap();
        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(test.len(), 20);
        let test_pos = test.iter().filter(|&&i| labels[i] == 1).count();
        assert_eq!(test_pos, 5);
        assert!(train.iter().all(|i| !test.contains(i)));
    }

    #[test]
    fn test_stratified_split_is_seeded() {
        let labels: Vec<u8> = (0..50).map(|i| u8::from(i % 3 == 0)).collect();
        assert_eq!(
            stratified_split(&labels, 0.3, 9).unwrap(),
            stratified_split(&labels, 0.3, 9).unwrap()
        );
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        assert!(matches!(
            stratified_split(&[0, 1], 1.0, 1),
            Err(TrainingError::InvalidSplit { .. })
        ));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(
            train(&[], &TrainingConfig::default()),
            Err(TrainingError::EmptyDataset)
        ));
    }

    #[test]
    fn test_single_class_rejected() {
        let rows: Vec<LabeledTransaction> =
            crate::application::data::synthetic::generate_synthetic(
                crate::application::data::synthetic::SyntheticConfig { rows: 20, seed: 1 },
            )
            .unwrap()
            .into_iter()
            .map(|r| LabeledTransaction { label: 0, ..r })
            .collect();
        assert!(matches!(
            train(&rows, &TrainingConfig::default()),
            Err(TrainingError::SingleClass { class: 0 })
        ));
    }
}
