#![deny(clippy::all)]

use std::collections::HashMap;

use anyhow::Context;
use napi_derive::napi;

use angular_output_target::file_system::{CapturingFileSystem, NodeJSFileSystem};
use angular_output_target::{run_output_targets, BuildConfig, ComponentCompilerMeta};

/// Generated files keyed by absolute path. Reads go to disk, writes are kept
/// in memory so the host build decides what to emit.
#[napi(object)]
pub struct GeneratedProxies {
    pub files: HashMap<String, String>,
    pub components: u32,
}

fn to_napi_error(err: anyhow::Error) -> napi::Error {
    napi::Error::from_reason(format!("{:#}", err))
}

fn generate(components_json: &str, config_json: &str) -> anyhow::Result<GeneratedProxies> {
    let components: Vec<ComponentCompilerMeta> =
        serde_json::from_str(components_json).context("invalid component metadata")?;
    let config: BuildConfig = serde_json::from_str(config_json).context("invalid build configuration")?;

    let fs = CapturingFileSystem::new(NodeJSFileSystem::new());
    let outputs = run_output_targets(&fs, &components, &config)?;

    Ok(GeneratedProxies {
        files: fs.captured().into_iter().collect(),
        components: outputs.iter().map(|output| output.units.len() as u32).sum(),
    })
}

#[napi]
pub fn generate_angular_proxies(components_json: String, config_json: String) -> napi::Result<GeneratedProxies> {
    generate(&components_json, &config_json).map_err(to_napi_error)
}

#[napi]
pub fn version() -> String {
    angular_output_target::version().to_string()
}
