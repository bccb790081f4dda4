use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShimError {
    /// A call into the Android framework failed
    #[error("Platform call `{call}` failed: {reason}")]
    Platform { call: &'static str, reason: String },

    #[error("Failed to access config file {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl ShimError {
    pub fn platform(call: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Platform {
            call,
            reason: reason.to_string(),
        }
    }
}
