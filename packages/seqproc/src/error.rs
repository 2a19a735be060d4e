use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ProcessorError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ProcessorError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
