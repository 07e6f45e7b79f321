use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Value errors
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    #[error("Unknown effect strength: {0}")]
    UnknownStrength(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration key: {0}")]
    MissingConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
