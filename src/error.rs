use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardError {
    #[error("No mentors are eligible to receive rewards: {0}")]
    NoParticipants(String),

    #[error("Arithmetic overflow while splitting rewards")]
    ArithmeticOverflow,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RewardError>;
