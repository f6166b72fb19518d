pub mod dataset;

pub use dataset::{TrainingRow, read_dataset, write_dataset};
