#![allow(dead_code)]

use riskscore::application::ml::LogisticRiskModel;
use riskscore::application::scoring::ScoringService;
use riskscore::domain::transaction::TransactionRecord;
use std::sync::Arc;

/// Fixed-coefficient model used to pin end-to-end scores
pub fn reference_model() -> LogisticRiskModel {
    LogisticRiskModel::new(vec![0.0025, 0.12, -0.0009, 1.1, 0.9, 0.35], -1.2, 1000)
        .expect("reference model is valid")
}

pub fn reference_service() -> ScoringService {
    ScoringService::new(Arc::new(reference_model()))
}

pub fn record(
    txn_amount: f64,
    txn_count_24h: i64,
    account_age_days: i64,
    is_international: i64,
    device_change_7d: i64,
    failed_logins_24h: i64,
) -> TransactionRecord {
    TransactionRecord {
        txn_amount,
        txn_count_24h,
        account_age_days,
        is_international,
        device_change_7d,
        failed_logins_24h,
    }
}

/// High-risk scenario: large international amount on a new account after a device change
pub fn suspicious() -> TransactionRecord {
    record(950.0, 18, 12, 1, 1, 4)
}

pub fn routine() -> TransactionRecord {
    record(25.5, 1, 900, 0, 0, 0)
}

pub fn borderline() -> TransactionRecord {
    record(280.0, 3, 1000, 0, 1, 1)
}
