pub mod error;
pub mod export;
pub mod format;
pub mod metrics;
pub mod range;
pub mod series;
pub mod stats;
