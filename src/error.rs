use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("numerical error: {0}")]
    Numerical(&'static str),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("detector error: {0}")]
    Oracle(String),
}
