pub mod batch;
pub mod config;
pub mod error;
pub mod processor;
pub mod types;

pub use batch::{Batch, IntoBatch};
pub use config::{ConfigError, ProcessorConfig, DEFAULT_DELAY_MS, DELAY_ENV_VAR};
pub use error::{ProcessorError, Result};
pub use processor::TaskProcessor;
pub use types::*;

// Re-export CancellationToken for callers wiring up external cancellation
pub use tokio_util::sync::CancellationToken;
