//! Held-out evaluation metrics for binary risk classifiers.

use serde::{Deserialize, Serialize};

/// Probability cut-off used for hard predictions
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Metrics computed on the test partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
    pub test_rows: usize,
}

impl EvaluationReport {
    pub fn compute(labels: &[u8], probabilities: &[f64]) -> Self {
        let predicted: Vec<u8> = probabilities
            .iter()
            .map(|&p| u8::from(p >= DECISION_THRESHOLD))
            .collect();
        let precision = precision(labels, &predicted);
        let recall = recall(labels, &predicted);
        Self {
            precision,
            recall,
            f1: f1(precision, recall),
            roc_auc: roc_auc(labels, probabilities),
            test_rows: labels.len(),
        }
    }
}

fn confusion(labels: &[u8], predicted: &[u8]) -> (usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    for (&y, &p) in labels.iter().zip(predicted) {
        match (y, p) {
            (1, 1) => tp += 1,
            (0, 1) => fp += 1,
            (1, 0) => fn_ += 1,
            _ => {}
        }
    }
    (tp, fp, fn_)
}

/// Zero when nothing is predicted positive.
pub fn precision(labels: &[u8], predicted: &[u8]) -> f64 {
    let (tp, fp, _) = confusion(labels, predicted);
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// Zero when there are no positive labels.
pub fn recall(labels: &[u8], predicted: &[u8]) -> f64 {
    let (tp, _, fn_) = confusion(labels, predicted);
    if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}

pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Area under the ROC curve via the Mann-Whitney rank statistic, with tied
/// scores sharing their average rank. 0.5 when only one class is present.
pub fn roc_auc(labels: &[u8], scores: &[f64]) -> f64 {
    let n_pos = labels.iter().filter(|&&y| y == 1).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // ranks are 1-based; i..=j share the average
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            if labels[idx] == 1 {
                rank_sum_pos += avg_rank;
            }
        }
        i = j + 1;
    }

    let n_pos = n_pos as f64;
    (rank_sum_pos - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg as f64)
}
