pub mod service;

pub use service::ScoringService;
