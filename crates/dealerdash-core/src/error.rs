use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush failed: {0}")]
    CsvFlush(String),
}
