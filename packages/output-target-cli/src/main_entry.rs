// Main Entry Point
//
// Reads the component metadata and build configuration files, runs every
// Angular output target and reports what was written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use angular_output_target::file_system::{CapturingFileSystem, FileSystem, NodeJSFileSystem};
use angular_output_target::output_angular::GenerationOutput;
use angular_output_target::{run_output_targets, BuildConfig, ComponentCompilerMeta};

/// Command line of `ng-proxies`.
pub fn command() -> Command {
    Command::new("ng-proxies")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate Angular wrappers for custom elements")
        .arg(
            Arg::new("components")
                .short('c')
                .long("components")
                .value_name("PATH")
                .required(true)
                .help("Component metadata JSON exported by the component build"),
        )
        .arg(
            Arg::new("config")
                .short('p')
                .long("config")
                .value_name("PATH")
                .required(true)
                .help("Build configuration JSON holding the outputTargets array"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Overrides the rootDir of the build configuration"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the files that would be written without writing them"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every written file"),
        )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub components: PathBuf,
    pub config: PathBuf,
    pub root: Option<PathBuf>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl CliOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let path = |id: &str| matches.get_one::<String>(id).map(PathBuf::from);
        Self {
            components: path("components").unwrap_or_default(),
            config: path("config").unwrap_or_default(),
            root: path("root"),
            dry_run: matches.get_flag("dry-run"),
            verbose: matches.get_flag("verbose"),
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Either a bare array or the `{ "components": [...] }` document written
/// by the docs-json output target.
#[derive(Deserialize)]
#[serde(untagged)]
enum ComponentsDocument {
    List(Vec<ComponentCompilerMeta>),
    Wrapped { components: Vec<ComponentCompilerMeta> },
}

pub fn read_components(path: &Path) -> Result<Vec<ComponentCompilerMeta>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read component metadata {}", path.display()))?;
    let document: ComponentsDocument = serde_json::from_str(&text)
        .with_context(|| format!("invalid component metadata in {}", path.display()))?;
    Ok(match document {
        ComponentsDocument::List(components) | ComponentsDocument::Wrapped { components } => components,
    })
}

/// Read the build configuration. A relative or missing `rootDir` resolves
/// against the directory of the configuration file.
pub fn read_build_config(path: &Path, root_override: Option<&Path>) -> Result<BuildConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build configuration {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid build configuration in {}", path.display()))?;

    let config_dir = absolute(path.parent().unwrap_or_else(|| Path::new(".")))?;
    let root = match (root_override, value.get("rootDir").and_then(|root| root.as_str())) {
        (Some(root), _) => absolute(root)?,
        (None, Some(root)) => config_dir.join(root),
        (None, None) => config_dir,
    };
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "rootDir".to_string(),
            serde_json::Value::String(root.to_string_lossy().into_owned()),
        );
    }

    serde_json::from_value(value).with_context(|| format!("invalid build configuration in {}", path.display()))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    Ok(cwd.join(path))
}

/// What one invocation generated.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub dry_run: bool,
    /// Written or would-be-written paths, per output target.
    pub targets: Vec<Vec<String>>,
}

impl RunSummary {
    fn new(dry_run: bool, outputs: &[GenerationOutput]) -> Self {
        let targets = outputs
            .iter()
            .map(|output| output.all_files().map(|file| file.path.to_string()).collect())
            .collect();
        Self { dry_run, targets }
    }

    pub fn file_count(&self) -> usize {
        self.targets.iter().map(Vec::len).sum()
    }

    /// Report printed on stdout.
    pub fn lines(&self) -> Vec<String> {
        let verb = if self.dry_run { "would write" } else { "wrote" };
        let mut lines: Vec<String> = self
            .targets
            .iter()
            .flatten()
            .map(|path| format!("{} {}", verb, path))
            .collect();
        lines.push(format!(
            "{} {} file(s) for {} output target(s)",
            verb,
            self.file_count(),
            self.targets.len()
        ));
        lines
    }
}

fn generate<F: FileSystem>(fs: &F, options: &CliOptions) -> Result<Vec<GenerationOutput>> {
    let components = read_components(&options.components)?;
    let config = read_build_config(&options.config, options.root.as_deref())?;
    debug!(components = components.len(), root = %config.root_dir, "loaded inputs");

    run_output_targets(fs, &components, &config).context("angular proxy generation failed")
}

/// Run the generator with the given options.
pub fn main_fn(options: &CliOptions) -> Result<RunSummary> {
    let outputs = if options.dry_run {
        let fs = CapturingFileSystem::new(NodeJSFileSystem::new());
        generate(&fs, options)?
    } else {
        generate(&NodeJSFileSystem::new(), options)?
    };

    let summary = RunSummary::new(options.dry_run, &outputs);
    info!(files = summary.file_count(), dry_run = options.dry_run, "done");
    Ok(summary)
}
