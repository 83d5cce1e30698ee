use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse log file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty log file: {0}")]
    EmptyFile(String),

    #[error("Not a CSV log export: {0}")]
    UnsupportedFile(String),

    #[error("No valid records could be loaded from the given path")]
    NoValidInput,

    #[error("Analysis error: {0}")]
    Analysis(String),
}

pub type Result<T> = std::result::Result<T, Error>;
