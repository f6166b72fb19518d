//! Seeded synthetic transaction generator.
//!
//! Rows are drawn from independent marginals and labeled by a noisy logistic
//! link over a fixed linear risk score, so a logistic-regression model can
//! recover the signal.

use crate::application::ml::logistic_model::sigmoid;
use crate::domain::errors::DatasetError;
use crate::domain::transaction::{LabeledTransaction, TransactionRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Gamma, Normal, Poisson};

/// Generator settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    pub rows: usize,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: 20_000,
            seed: 42,
        }
    }
}

// Weights of the latent risk score
const W_AMOUNT: f64 = 0.0025;
const W_COUNT: f64 = 0.12;
const W_AGE: f64 = 0.0009;
const W_INTERNATIONAL: f64 = 1.1;
const W_DEVICE_CHANGE: f64 = 0.9;
const W_FAILED_LOGINS: f64 = 0.35;
const LOGIT_OFFSET: f64 = -3.0;
const NOISE_STD: f64 = 1.2;

/// Account ages are drawn from `[0, MAX_SAMPLED_AGE)`
const MAX_SAMPLED_AGE: i64 = 2000;

pub struct SyntheticGenerator {
    rng: StdRng,
    amount: Gamma<f64>,
    txn_count: Poisson<f64>,
    failed_logins: Poisson<f64>,
    international: Bernoulli,
    device_change: Bernoulli,
    noise: Normal<f64>,
}

impl SyntheticGenerator {
    pub fn new(seed: u64) -> Result<Self, DatasetError> {
        let invalid = |e: &dyn std::fmt::Display| DatasetError::InvalidParameter {
            reason: e.to_string(),
        };
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            amount: Gamma::new(2.0, 120.0).map_err(|e| invalid(&e))?,
            txn_count: Poisson::new(4.0).map_err(|e| invalid(&e))?,
            failed_logins: Poisson::new(0.8).map_err(|e| invalid(&e))?,
            international: Bernoulli::new(0.12).map_err(|e| invalid(&e))?,
            device_change: Bernoulli::new(0.10).map_err(|e| invalid(&e))?,
            noise: Normal::new(0.0, NOISE_STD).map_err(|e| invalid(&e))?,
        })
    }

    /// Draw one labeled row. Integer draws are capped at the field domain
    /// maxima so every row passes validation.
    pub fn next_row(&mut self) -> LabeledTransaction {
        let amount: f64 = self.amount.sample(&mut self.rng);
        let txn_count: f64 = self.txn_count.sample(&mut self.rng);
        let account_age_days = self.rng.random_range(0..MAX_SAMPLED_AGE);
        let is_international = self.international.sample(&mut self.rng);
        let device_change = self.device_change.sample(&mut self.rng);
        let failed_logins: f64 = self.failed_logins.sample(&mut self.rng);

        let record = TransactionRecord {
            txn_amount: (amount * 100.0).round() / 100.0,
            txn_count_24h: (txn_count as i64).min(500),
            account_age_days,
            is_international: i64::from(is_international),
            device_change_7d: i64::from(device_change),
            failed_logins_24h: (failed_logins as i64).min(50),
        };

        let logit = latent_score(&record) + self.noise.sample(&mut self.rng) + LOGIT_OFFSET;
        let p = sigmoid(logit).clamp(0.0, 1.0);
        let label = u8::from(self.rng.random_bool(p));

        LabeledTransaction { record, label }
    }
}

/// Linear risk score before noise and offset
pub fn latent_score(record: &TransactionRecord) -> f64 {
    W_AMOUNT * record.txn_amount
        + W_COUNT * record.txn_count_24h as f64
        + W_AGE * (MAX_SAMPLED_AGE - record.account_age_days) as f64
        + W_INTERNATIONAL * record.is_international as f64
        + W_DEVICE_CHANGE * record.device_change_7d as f64
        + W_FAILED_LOGINS * record.failed_logins_24h as f64
}

/// Generate `config.rows` labeled rows. Same seed, same rows.
pub fn generate_synthetic(config: SyntheticConfig) -> Result<Vec<LabeledTransaction>, DatasetError> {
    let mut generator = SyntheticGenerator::new(config.seed)?;
    Ok((0..config.rows).map(|_| generator.next_row()).collect())
}
