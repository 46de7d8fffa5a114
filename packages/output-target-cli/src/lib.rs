#![deny(clippy::all)]

/**
 * Angular Output Target CLI
 *
 * Runs the proxy generator over component metadata exported by a
 * custom-element build.
 */
pub use angular_output_target as output_target;

pub mod main_entry;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
