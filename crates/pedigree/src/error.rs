use thiserror::Error;

#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("pedigree header has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, PedigreeError>;
