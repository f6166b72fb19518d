pub mod synthetic;

pub use synthetic::{SyntheticConfig, SyntheticGenerator, generate_synthetic};
