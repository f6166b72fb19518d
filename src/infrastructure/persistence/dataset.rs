use crate::domain::errors::DatasetError;
use crate::domain::transaction::{LabeledTransaction, TransactionRecord};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Flat CSV row: the six record fields plus the label column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRow {
    pub txn_amount: f64,
    pub txn_count_24h: i64,
    pub account_age_days: i64,
    pub is_international: i64,
    pub device_change_7d: i64,
    pub failed_logins_24h: i64,
    pub label: i64,
}

impl From<&LabeledTransaction> for TrainingRow {
    fn from(row: &LabeledTransaction) -> Self {
        let r = &row.record;
        Self {
            txn_amount: r.txn_amount,
            txn_count_24h: r.txn_count_24h,
            account_age_days: r.account_age_days,
            is_international: r.is_international,
            device_change_7d: r.device_change_7d,
            failed_logins_24h: r.failed_logins_24h,
            label: i64::from(row.label),
        }
    }
}

impl TrainingRow {
    fn into_labeled(self, row: usize) -> Result<LabeledTransaction, DatasetError> {
        let label = match self.label {
            0 => 0,
            1 => 1,
            other => return Err(DatasetError::InvalidLabel { row, label: other }),
        };
        let record = TransactionRecord {
            txn_amount: self.txn_amount,
            txn_count_24h: self.txn_count_24h,
            account_age_days: self.account_age_days,
            is_international: self.is_international,
            device_change_7d: self.device_change_7d,
            failed_logins_24h: self.failed_logins_24h,
        };
        record
            .validate()
            .map_err(|source| DatasetError::InvalidRecord { row, source })?;
        Ok(LabeledTransaction { record, label })
    }
}

/// Write rows with a header line, replacing any existing file.
pub fn write_dataset(path: &Path, rows: &[LabeledTransaction]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut wtr = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        wtr.serialize(TrainingRow::from(row))?;
    }
    wtr.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Read a dataset written by [`write_dataset`] (or any CSV with the same header).
pub fn read_dataset(path: &Path) -> Result<Vec<LabeledTransaction>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<TrainingRow>().enumerate() {
        rows.push(result?.into_labeled(i)?);
    }
    Ok(rows)
}
