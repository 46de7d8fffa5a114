//! Angular Output Target
//!
//! One generation pass: validate the configuration, select the output mode,
//! generate a unit per component, lay the units out in files for that mode and
//! write everything. The package manifest is computed before any write and is
//! written only once every other file has been written.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::component::{angular_core_imports, generate_component_unit, runtime_imports, GeneratedUnit, UnitOptions};
use crate::config::{BuildConfig, OutputPaths, OutputTargetAngular, OutputType, PackageJson};
use crate::directives_file::{generate_angular_directives_file, DirectiveSource};
use crate::error::{OutputTargetError, Result};
use crate::file_system::{AbsoluteFsPath, FileSystem, ReadonlyFileSystem};
use crate::glue::{CustomElementRegistry, RUNTIME_MODULE_DIR, RUNTIME_MODULE_FILE, RUNTIME_UTILS_SOURCE};
use crate::individual_components::{component_file_path, individual_component_files, BARREL_FILE};
use crate::package_exports::{read_package_manifest, render_package_manifest, ExportMapFragment};
use crate::types::ComponentCompilerMeta;
use crate::util::{create_import_statement, dirname, join_path, normalize_path, relative_import, sort_components};
use crate::value_accessors::generate_value_accessors;

/// Type declarations file emitted by the component compiler.
const GENERATED_DTS: &str = "components.d.ts";

/// A file produced by a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: AbsoluteFsPath,
    pub content: String,
}

/// File topology of a pass, fixed for its whole duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every wrapper in the proxy file.
    Aggregate,
    /// The aggregate file plus an `NgModule` per wrapper.
    SingleModulePerComponent,
    /// Standalone wrappers, in the proxy file or one file each.
    Standalone { individual_export: bool },
}

impl OutputMode {
    pub fn from_target(target: &OutputTargetAngular) -> Self {
        match target.output_type {
            OutputType::Component => OutputMode::Aggregate,
            OutputType::Scam => OutputMode::SingleModulePerComponent,
            OutputType::Standalone => OutputMode::Standalone {
                individual_export: target.individual_component_export,
            },
        }
    }

    pub fn is_per_component(self) -> bool {
        matches!(self, OutputMode::Standalone { individual_export: true })
    }

    pub fn is_custom_elements_build(self) -> bool {
        !matches!(self, OutputMode::Aggregate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Aggregate => "aggregate",
            OutputMode::SingleModulePerComponent => "single-module-per-component",
            OutputMode::Standalone { individual_export: false } => "standalone",
            OutputMode::Standalone { individual_export: true } => "standalone-individual-export",
        }
    }

    fn unit_options(self, target: &OutputTargetAngular, type_import_module: String) -> UnitOptions {
        UnitOptions {
            include_import_custom_elements: self.is_custom_elements_build(),
            standalone: matches!(self, OutputMode::Standalone { .. }),
            inline_properties: target.inline_properties,
            include_module: self == OutputMode::SingleModulePerComponent,
            type_import_module,
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject configurations that cannot produce working output.
pub fn validate_output_target(target: &OutputTargetAngular, config: &BuildConfig) -> Result<()> {
    let has_custom_elements = config.has_custom_elements_target();
    match target.output_type {
        OutputType::Standalone if target.individual_component_export && !has_custom_elements => {
            Err(OutputTargetError::MissingCustomElementsTarget)
        }
        OutputType::Standalone if !has_custom_elements => {
            warn!("standalone wrappers import definers from a \"dist-custom-elements\" build, which is not configured");
            Ok(())
        }
        output_type if target.individual_component_export && output_type != OutputType::Standalone => {
            warn!(%output_type, "individualComponentExport only applies to the standalone output type; ignoring it");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Sort by tag, drop internal and excluded components and keep the first of
/// any duplicated tag.
pub fn get_filtered_components<'a>(
    exclude_components: &[String],
    components: &'a [ComponentCompilerMeta],
) -> Vec<&'a ComponentCompilerMeta> {
    let mut sorted: Vec<&ComponentCompilerMeta> = components.iter().collect();
    sort_components(&mut sorted);

    let registry = CustomElementRegistry::new();
    sorted
        .into_iter()
        .filter(|cmp| !cmp.internal && !exclude_components.contains(&cmp.tag_name))
        .filter(|cmp| {
            let first = registry.define(&cmp.tag_name);
            if !first {
                warn!(tag = %cmp.tag_name, "duplicate component tag, skipping");
            }
            first
        })
        .collect()
}

/// Where the `Components` namespace and event types are imported from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeImportLocation {
    core_package: Option<String>,
    components_dts: String,
}

impl TypeImportLocation {
    pub fn new(target: &OutputTargetAngular, pkg_data: &PackageJson, root_dir: &str) -> Self {
        let types = pkg_data.types.as_deref().unwrap_or(GENERATED_DTS);
        Self {
            core_package: target.component_core_package.clone(),
            components_dts: join_path(root_dir, &[&dirname(types), GENERATED_DTS]),
        }
    }

    /// Module specifier as seen from `from_file`, optionally inside the
    /// custom-elements directory.
    pub fn module_from(&self, from_file: &str, custom_elements_dir: Option<&str>) -> String {
        let base = match &self.core_package {
            Some(package) => normalize_path(package),
            None => relative_import(from_file, &self.components_dts, ".d.ts"),
        };
        match custom_elements_dir {
            Some(dir) => format!("{}/{}", base, dir),
            None => base,
        }
    }
}

/// Render the aggregate proxy file holding every unit.
pub fn render_proxy_file(
    units: &[GeneratedUnit],
    mode: OutputMode,
    location: &TypeImportLocation,
    target: &OutputTargetAngular,
    paths: &OutputPaths,
) -> String {
    let include_outputs = units.iter().any(GeneratedUnit::has_outputs);
    let runtime_utils = join_path(&paths.proxy_dir, &[RUNTIME_MODULE_DIR, RUNTIME_MODULE_FILE]);

    let mut sections = vec![
        format!(
            "/* tslint:disable */\n/* auto-generated angular directive proxies */\n{}",
            create_import_statement(
                &angular_core_imports(include_outputs, mode == OutputMode::SingleModulePerComponent),
                "@angular/core"
            )
        ),
        create_import_statement(
            &runtime_imports(include_outputs),
            &relative_import(&paths.proxy_file, &runtime_utils, ".ts"),
        ),
    ];

    if mode.is_custom_elements_build() {
        let elements_module = location.module_from(&paths.proxy_file, Some(&target.custom_elements_dir));
        let mut imports = vec![format!("import type {{ Components }} from '{}';", elements_module)];
        imports.extend(units.iter().map(|unit| {
            format!(
                "import {{ defineCustomElement as define{} }} from '{}/{}.js';",
                unit.class_name, elements_module, unit.tag_name
            )
        }));
        sections.push(imports.join("\n"));
    } else {
        sections.push(format!(
            "import {{ Components }} from '{}';",
            location.module_from(&paths.proxy_file, None)
        ));
    }

    sections.extend(units.iter().map(GeneratedUnit::render_aggregate_section));
    format!("{}\n", sections.join("\n\n"))
}

/// The proxy file of the per-component topology re-exports the barrel.
fn render_barrel_proxy_file(paths: &OutputPaths) -> String {
    let barrel = join_path(&paths.component_dir, &[BARREL_FILE]);
    format!(
        "/* tslint:disable */\n/* auto-generated angular directive proxies */\nexport * from '{}';\n",
        relative_import(&paths.proxy_file, &barrel, ".ts")
    )
}

/// Everything one pass produces, computed before anything is written.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub mode: OutputMode,
    pub units: Vec<GeneratedUnit>,
    pub files: Vec<OutputFile>,
    /// Package manifest with the export map merged in, written last.
    pub manifest: Option<OutputFile>,
}

impl GenerationOutput {
    /// Every file of the pass, the manifest last.
    pub fn all_files(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter().chain(self.manifest.iter())
    }

    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        let path = AbsoluteFsPath::new(path);
        self.all_files().find(|file| file.path == path)
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.units.iter().map(|unit| unit.class_name.as_str()).collect()
    }
}

fn read_root_package_json<F: ReadonlyFileSystem + ?Sized>(fs: &F, root_dir: &str) -> Result<PackageJson> {
    let path = AbsoluteFsPath::new(join_path(root_dir, &["package.json"]));
    let manifest = read_package_manifest(fs, &path)?;
    serde_json::from_value(serde_json::Value::Object(manifest)).map_err(|source| OutputTargetError::Json {
        path: path.to_string(),
        source,
    })
}

/// Compute every file of a pass without writing anything.
pub fn plan_generation<F: ReadonlyFileSystem + ?Sized>(
    fs: &F,
    target: &OutputTargetAngular,
    components: &[ComponentCompilerMeta],
    config: &BuildConfig,
) -> Result<GenerationOutput> {
    validate_output_target(target, config)?;

    let mode = OutputMode::from_target(target);
    let filtered = get_filtered_components(&target.exclude_components, components);
    let paths = target.resolve_paths(&config.root_dir);
    let pkg_data = match target.component_core_package {
        Some(_) => PackageJson::default(),
        None => read_root_package_json(fs, &config.root_dir)?,
    };
    let location = TypeImportLocation::new(target, &pkg_data, &config.root_dir);
    let runtime_utils = join_path(&paths.proxy_dir, &[RUNTIME_MODULE_DIR, RUNTIME_MODULE_FILE]);

    let type_import_module = if mode.is_per_component() {
        let sample_file = component_file_path(&paths.component_dir, "index");
        location.module_from(&sample_file, Some(&target.custom_elements_dir))
    } else if mode.is_custom_elements_build() {
        location.module_from(&paths.proxy_file, Some(&target.custom_elements_dir))
    } else {
        location.module_from(&paths.proxy_file, None)
    };
    let options = mode.unit_options(target, type_import_module.clone());

    let units: Vec<GeneratedUnit> = filtered
        .par_iter()
        .map(|cmp| generate_component_unit(cmp, &options))
        .collect();

    let mut files = Vec::new();
    if mode.is_per_component() {
        files.push(OutputFile {
            path: AbsoluteFsPath::new(paths.proxy_file.clone()),
            content: render_barrel_proxy_file(&paths),
        });
        files.extend(individual_component_files(
            &units,
            &paths.component_dir,
            &runtime_utils,
            &type_import_module,
        ));
    } else {
        files.push(OutputFile {
            path: AbsoluteFsPath::new(paths.proxy_file.clone()),
            content: render_proxy_file(&units, mode, &location, target, &paths),
        });
    }

    files.push(OutputFile {
        path: AbsoluteFsPath::new(runtime_utils),
        content: RUNTIME_UTILS_SOURCE.to_string(),
    });

    if let Some(array_file) = &paths.array_file {
        let source = if mode.is_per_component() {
            DirectiveSource::ComponentDir(&paths.component_dir)
        } else {
            DirectiveSource::ProxyFile(&paths.proxy_file)
        };
        files.push(OutputFile {
            path: AbsoluteFsPath::new(array_file.clone()),
            content: generate_angular_directives_file(&filtered, array_file, source),
        });
    }

    files.extend(generate_value_accessors(&target.value_accessor_configs, &paths.proxy_dir));

    let manifest = if mode.is_per_component() {
        let path = AbsoluteFsPath::new(paths.library_package_json.clone());
        let mut manifest = read_package_manifest(fs, &path)?;
        let fragment = ExportMapFragment::for_components(&filtered, &target.export_subpath);
        debug!(manifest = %path, entries = fragment.entries.len(), "merging export map");
        files.extend(fragment.declaration_files(&dirname(&paths.library_package_json), &paths.component_dir));
        fragment.merge_into(&mut manifest);
        Some(OutputFile {
            content: render_package_manifest(&manifest, &path)?,
            path,
        })
    } else {
        None
    };

    Ok(GenerationOutput {
        mode,
        units,
        files,
        manifest,
    })
}

/// Write `files` as one concurrent batch. The first failure aborts the batch.
pub fn write_files<F: FileSystem + ?Sized>(fs: &F, files: &[OutputFile]) -> Result<()> {
    files.par_iter().try_for_each(|file| {
        debug!(path = %file.path, bytes = file.content.len(), "writing file");
        fs.write_file(&file.path, file.content.as_bytes())
            .map_err(|source| OutputTargetError::Write {
                path: file.path.to_string(),
                source,
            })
    })
}

/// Run one generation pass for `target` and write its files.
pub fn angular_directive_proxy_output<F: FileSystem + ?Sized>(
    fs: &F,
    target: &OutputTargetAngular,
    components: &[ComponentCompilerMeta],
    config: &BuildConfig,
) -> Result<GenerationOutput> {
    let output = plan_generation(fs, target, components, config)?;

    write_files(fs, &output.files)?;
    if let Some(manifest) = &output.manifest {
        write_files(fs, std::slice::from_ref(manifest))?;
    }

    info!(
        mode = %output.mode,
        components = output.units.len(),
        files = output.all_files().count(),
        proxy_file = %target.directives_proxy_file,
        "generated angular proxies"
    );
    Ok(output)
}

/// Run a pass for every `angular` output target of `config`.
pub fn run_output_targets<F: FileSystem + ?Sized>(
    fs: &F,
    components: &[ComponentCompilerMeta],
    config: &BuildConfig,
) -> Result<Vec<GenerationOutput>> {
    let targets = config
        .angular_output_targets()
        .map_err(|source| OutputTargetError::Json {
            path: "outputTargets".to_string(),
            source,
        })?;
    if targets.is_empty() {
        warn!("no \"angular\" output target configured");
    }
    targets
        .iter()
        .map(|target| angular_directive_proxy_output(fs, target, components, config))
        .collect()
}
