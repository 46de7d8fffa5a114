//! Errors surfaced by a generation pass.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutputTargetError>;

#[derive(Debug, Error)]
pub enum OutputTargetError {
    /// Raised before any file is generated.
    #[error(
        "Standalone components with individual component export require a \"dist-custom-elements\" \
         output target to be configured. Add {{ type: \"dist-custom-elements\", \
         customElementsExportBehavior: \"single-export-module\" }} to the outputTargets array of \
         your build configuration"
    )]
    MissingCustomElementsTarget,

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("package manifest {path} must contain a JSON object")]
    InvalidManifest { path: String },
}

impl OutputTargetError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, OutputTargetError::MissingCustomElementsTarget)
    }
}
