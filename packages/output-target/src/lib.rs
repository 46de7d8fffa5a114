#![deny(clippy::all)]

/**
 * Angular Output Target
 *
 * Generates Angular wrapper components for custom elements, either as one
 * proxy file or as individually importable, tree-shakable files.
 */

// Metadata and configuration
pub mod config;
pub mod error;
pub mod types;
pub mod util;

// Generators
pub mod component;
pub mod directives_file;
pub mod event_type;
pub mod glue;
pub mod individual_components;
pub mod module;
pub mod package_exports;
pub mod value_accessors;

// Generation pass
pub mod file_system;
pub mod output_angular;

pub mod testing;

pub use config::{BuildConfig, OutputTargetAngular, OutputType};
pub use error::{OutputTargetError, Result};
pub use output_angular::{angular_directive_proxy_output, plan_generation, run_output_targets, GenerationOutput, OutputMode};
pub use types::ComponentCompilerMeta;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
