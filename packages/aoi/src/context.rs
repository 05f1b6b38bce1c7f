//! Job context loading.
//!
//! The job context is a flat JSON document (conventionally
//! [`DEFAULT_CONTEXT_FILE`](volcano_aoi_models::DEFAULT_CONTEXT_FILE)) that
//! carries the AOI request fields alongside whatever else the job runner
//! put there. Unknown keys are ignored.

use std::path::{Path, PathBuf};

use volcano_aoi_models::AoiRequest;

/// Errors that can occur while loading a job context.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The context file could not be read.
    #[error("unable to read {}: {source}", path.display())]
    Io {
        /// Path of the context file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The context is not valid JSON or lacks a required field.
    #[error("unable to parse {}: {source}", path.display())]
    Json {
        /// Path of the context file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses the job context at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed. Numeric
/// values are not range-checked.
pub fn load_context(path: &Path) -> Result<AoiRequest, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let request = parse_context(&contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded job context from {}", path.display());
    Ok(request)
}

/// Parses a job context document.
///
/// # Errors
///
/// Returns an error if the document is not a JSON object holding every AOI
/// request field.
pub fn parse_context(contents: &str) -> Result<AoiRequest, serde_json::Error> {
    serde_json::from_str(contents)
}
