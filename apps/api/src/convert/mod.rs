//! Format Converter: DOCX bytes in, PDF bytes out.
//!
//! The conversion itself is delegated to an external program. `AppState`
//! holds an `Arc<dyn DocumentConverter>` so handlers never know which backend
//! runs, and tests swap in an in-process fake.

pub mod command;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandConverter;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("converter '{program}' could not be started: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("converter did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("converter produced no output file")]
    NoOutput,

    #[error("converter output is not a PDF")]
    InvalidOutput,

    #[error("temporary file error: {0}")]
    TempResource(#[from] std::io::Error),
}

/// Converts a rendered DOCX package into PDF.
///
/// Implementations must not leave files behind, whether the call succeeds,
/// fails, or is cancelled by dropping the future.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, docx: &[u8]) -> Result<Vec<u8>, ConversionError>;

    /// Short backend label for logs and the health endpoint.
    fn backend(&self) -> &str;
}
