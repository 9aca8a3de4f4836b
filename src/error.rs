use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the navigation controller and its persistence layer
#[derive(Debug, Error)]
pub enum NavError {
    /// A host call (view write, cursor warp, overlay registration) failed
    #[error("host call failed: {0}")]
    Host(String),

    /// Camera-state slots are indexed by digit key
    #[error("camera state slot {0} is out of range (0-9)")]
    InvalidSlot(u8),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unsupported settings version {found} (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl NavError {
    pub fn host(message: impl Into<String>) -> Self {
        NavError::Host(message.into())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
