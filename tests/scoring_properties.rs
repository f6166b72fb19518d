mod common;

use riskscore::application::data::{SyntheticConfig, generate_synthetic};
use riskscore::domain::errors::ScoringError;
use riskscore::domain::risk::RiskLabel;
use riskscore::domain::transaction::TransactionRecord;

fn generated_records(rows: usize, seed: u64) -> Vec<TransactionRecord> {
    generate_synthetic(SyntheticConfig { rows, seed })
        .unwrap()
        .into_iter()
        .map(|r| r.record)
        .collect()
}

#[test]
fn test_score_one_is_deterministic() {
    let service = common::reference_service();
    let first = service.score_one(&common::suspicious()).unwrap();
    for _ in 0..10 {
        assert_eq!(service.score_one(&common::suspicious()).unwrap(), first);
    }
}

#[test]
fn test_suspicious_scenario_is_pinned() {
    let service = common::reference_service();
    let assessment = service.score_one(&common::suspicious()).unwrap();
    assert_eq!(assessment.risk_score, 0.9988);
    assert_eq!(assessment.risk_label, RiskLabel::High);

    let routine = service.score_one(&common::routine()).unwrap();
    assert_eq!(routine.risk_score, 0.1387);
    assert_eq!(routine.risk_label, RiskLabel::Low);

    let borderline = service.score_one(&common::borderline()).unwrap();
    assert_eq!(borderline.risk_score, 0.5523);
    assert_eq!(borderline.risk_label, RiskLabel::Medium);
}

#[test]
fn test_batch_matches_single_and_keeps_order() {
    let service = common::reference_service();
    let records = generated_records(500, 11);

    let batch = service.score_batch(&records).unwrap();
    assert_eq!(batch.len(), records.len());
    for (record, assessment) in records.iter().zip(&batch) {
        assert_eq!(service.score_one(record).unwrap(), *assessment);
    }
}

#[test]
fn test_scores_stay_in_range_and_label_matches_score() {
    let service = common::reference_service();
    let records = generated_records(2000, 5);

    for assessment in service.score_batch(&records).unwrap() {
        assert!((0.0..=1.0).contains(&assessment.risk_score));
        assert_eq!(
            assessment.risk_label,
            RiskLabel::from_score(assessment.risk_score)
        );
    }
}

#[test]
fn test_extreme_inputs_stay_in_range() {
    let service = common::reference_service();
    let huge = common::record(1e12, 500, 0, 1, 1, 50);
    let tiny = common::record(0.0, 0, 5000, 0, 0, 0);

    let high = service.score_one(&huge).unwrap();
    assert_eq!(high.risk_score, 1.0);
    assert_eq!(high.risk_label, RiskLabel::High);

    let low = service.score_one(&tiny).unwrap();
    assert!(low.risk_score >= 0.0);
    assert_eq!(low.risk_label, RiskLabel::Low);
}

#[test]
fn test_domain_rejections() {
    let service = common::reference_service();
    let cases = [
        (common::record(-1.0, 1, 10, 0, 0, 0), "txn_amount"),
        (common::record(10.0, 1, 10, 0, 0, 51), "failed_logins_24h"),
        (common::record(10.0, 1, 10, 2, 0, 0), "is_international"),
        (common::record(10.0, 1, 5001, 0, 0, 0), "account_age_days"),
        (common::record(f64::NAN, 1, 10, 0, 0, 0), "txn_amount"),
    ];

    for (record, field) in cases {
        match service.score_one(&record) {
            Err(ScoringError::Validation(err)) => {
                assert_eq!(err.violations.len(), 1);
                assert_eq!(err.violations[0].field, field);
            }
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_domain_bounds_are_inclusive() {
    let service = common::reference_service();
    let edge = common::record(0.0, 500, 5000, 1, 1, 50);
    assert!(service.score_one(&edge).is_ok());
}
