use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} for template {template_id} returned status {status}: {body}")]
    RemoteService {
        operation: &'static str,
        template_id: String,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} for template {template_id} failed: {source}")]
    Transport {
        operation: &'static str,
        template_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{failed} of {total} templates failed to sync: {details}")]
    Incomplete {
        failed: usize,
        total: usize,
        details: String,
    },
}

impl SyncError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SyncError::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures raised by a provider round trip, which only abort
    /// the reconciliation of the template that issued them.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SyncError::RemoteService { .. } | SyncError::Transport { .. }
        )
    }
}
