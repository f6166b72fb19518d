use crate::domain::errors::{FieldViolation, ValidationError};
use serde::{Deserialize, Serialize};

/// A single transaction as submitted for scoring.
///
/// Integer fields are signed so that out-of-range input (e.g. `-3`) reaches
/// [`TransactionRecord::validate`] and produces a field-level error instead of
/// a generic deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub txn_amount: f64,
    pub txn_count_24h: i64,
    pub account_age_days: i64,
    pub is_international: i64,
    pub device_change_7d: i64,
    pub failed_logins_24h: i64,
}

/// A record with its ground-truth class (1 = risky), as used for training
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledTransaction {
    pub record: TransactionRecord,
    pub label: u8,
}

/// Inclusive bounds for one record field. `max: None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub field: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

impl FieldDomain {
    const fn bounded(field: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            min,
            max: Some(max),
        }
    }

    /// Returns the violated constraint, if any.
    pub fn check(&self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return Some(format!("{} must be a finite number", self.field));
        }
        if value < self.min {
            return Some(format!("{} must be >= {}", self.field, self.min));
        }
        match self.max {
            Some(max) if value > max => Some(format!("{} must be <= {}", self.field, max)),
            _ => None,
        }
    }
}

/// Field domains, in feature order.
pub const FIELD_DOMAINS: [FieldDomain; 6] = [
    FieldDomain {
        field: "txn_amount",
        min: 0.0,
        max: None,
    },
    FieldDomain::bounded("txn_count_24h", 0.0, 500.0),
    FieldDomain::bounded("account_age_days", 0.0, 5000.0),
    FieldDomain::bounded("is_international", 0.0, 1.0),
    FieldDomain::bounded("device_change_7d", 0.0, 1.0),
    FieldDomain::bounded("failed_logins_24h", 0.0, 50.0),
];

impl TransactionRecord {
    /// Field values in feature order, paired with [`FIELD_DOMAINS`].
    pub fn values(&self) -> [f64; 6] {
        [
            self.txn_amount,
            self.txn_count_24h as f64,
            self.account_age_days as f64,
            self.is_international as f64,
            self.device_change_7d as f64,
            self.failed_logins_24h as f64,
        ]
    }

    /// Checks every field against [`FIELD_DOMAINS`] and reports all violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations = self.violations(None);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Violations for this record. With `index`, field paths are prefixed
    /// `items.<index>.` to match the batch request body.
    pub fn violations(&self, index: Option<usize>) -> Vec<FieldViolation> {
        FIELD_DOMAINS
            .iter()
            .zip(self.values())
            .filter_map(|(domain, value)| {
                domain.check(value).map(|message| FieldViolation {
                    field: match index {
                        Some(i) => format!("items.{}.{}", i, domain.field),
                        None => domain.field.to_string(),
                    },
                    message,
                })
            })
            .collect()
    }
}

/// Validates a whole batch. Any invalid item fails the batch.
pub fn validate_batch(records: &[TransactionRecord]) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| record.violations(Some(i)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TransactionRecord {
        TransactionRecord {
            txn_amount: 950.0,
            txn_count_24h: 18,
            account_age_days: 12,
            is_international: 1,
            device_change_7d: 1,
            failed_logins_24h: 4,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let record = TransactionRecord {
            txn_amount: -1.0,
            ..valid()
        };
        let err = record.validate().unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "txn_amount");
        assert_eq!(err.violations[0].message, "txn_amount must be >= 0");
    }

    #[test]
    fn test_failed_logins_upper_bound() {
        let record = TransactionRecord {
            failed_logins_24h: 51,
            ..valid()
        };
        let err = record.validate().unwrap_err();
        assert_eq!(err.violations[0].field, "failed_logins_24h");
        assert!(err.violations[0].message.contains("<= 50"));

        let edge = TransactionRecord {
            failed_logins_24h: 50,
            ..valid()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_flag_must_be_binary() {
        let record = TransactionRecord {
            is_international: 2,
            ..valid()
        };
        let err = record.validate().unwrap_err();
        assert_eq!(err.violations[0].field, "is_international");
    }

    #[test]
    fn test_all_violations_reported() {
        let record = TransactionRecord {
            txn_amount: f64::NAN,
            txn_count_24h: 501,
            account_age_days: -1,
            ..valid()
        };
        let fields: Vec<_> = record
            .validate()
            .unwrap_err()
            .violations
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, ["txn_amount", "txn_count_24h", "account_age_days"]);
    }

    #[test]
    fn test_batch_violation_paths_carry_index() {
        let bad = TransactionRecord {
            device_change_7d: -1,
            ..valid()
        };
        let err = validate_batch(&[valid(), bad]).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "items.1.device_change_7d");
    }

    #[test]
    fn test_empty_batch_is_valid() {
        assert!(validate_batch(&[]).is_ok());
    }
}
