//! Output Target Configuration
//!
//! The options accepted by the Angular output target, the subset of the
//! surrounding build configuration the generator reads, and the package
//! manifest fields it consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::{dirname, join_path, resolve_path};

/// Output target type that produces the custom-elements build the standalone
/// per-component wrappers import from.
pub const DIST_CUSTOM_ELEMENTS: &str = "dist-custom-elements";

/// Output target type of this generator inside a build configuration.
pub const ANGULAR_OUTPUT_TARGET: &str = "angular";

/// Shape of the generated Angular code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Every wrapper in one file, bound to lazily loaded components.
    #[default]
    Component,
    /// One `NgModule` per component next to each wrapper.
    Scam,
    /// Standalone wrappers, optionally one file per component.
    Standalone,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::Component => "component",
            OutputType::Scam => "scam",
            OutputType::Standalone => "standalone",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_custom_elements_dir() -> String {
    "components".to_string()
}

fn default_export_subpath() -> String {
    "components".to_string()
}

/// Options of the Angular output target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTargetAngular {
    /// Package name of the component library; import root of the generated code.
    #[serde(default)]
    pub component_core_package: Option<String>,
    /// Location of the aggregate proxy file.
    pub directives_proxy_file: String,
    /// Location of the `DIRECTIVES` array file, if one is wanted.
    #[serde(default)]
    pub directives_array_file: Option<String>,
    #[serde(default)]
    pub output_type: OutputType,
    /// Directory inside the core package holding the per-tag definers.
    #[serde(default = "default_custom_elements_dir")]
    pub custom_elements_dir: String,
    #[serde(default)]
    pub exclude_components: Vec<String>,
    /// Emit setter-only property stubs so editors can type-check templates.
    #[serde(default)]
    pub inline_properties: bool,
    /// One file per component plus package export map entries. Standalone only.
    #[serde(default)]
    pub individual_component_export: bool,
    #[serde(default)]
    pub component_output_dir: Option<String>,
    #[serde(default)]
    pub value_accessor_configs: Vec<ValueAccessorConfig>,
    /// Subpath prefix of the per-component entries in the export map.
    #[serde(default = "default_export_subpath")]
    pub export_subpath: String,
    /// Package manifest receiving the export map entries.
    #[serde(default)]
    pub library_package_json: Option<String>,
}

impl OutputTargetAngular {
    pub fn new(component_core_package: impl Into<String>, directives_proxy_file: impl Into<String>) -> Self {
        Self {
            component_core_package: Some(component_core_package.into()),
            directives_proxy_file: directives_proxy_file.into(),
            directives_array_file: None,
            output_type: OutputType::default(),
            custom_elements_dir: default_custom_elements_dir(),
            exclude_components: Vec::new(),
            inline_properties: false,
            individual_component_export: false,
            component_output_dir: None,
            value_accessor_configs: Vec::new(),
            export_subpath: default_export_subpath(),
            library_package_json: None,
        }
    }

    /// Resolve every configured location against the build root.
    pub fn resolve_paths(&self, root_dir: &str) -> OutputPaths {
        let proxy_file = resolve_path(root_dir, &self.directives_proxy_file);
        let proxy_dir = dirname(&proxy_file);
        let component_dir = match &self.component_output_dir {
            Some(dir) => resolve_path(root_dir, dir),
            None => join_path(&proxy_dir, &["components"]),
        };
        let library_package_json = match &self.library_package_json {
            Some(path) => resolve_path(root_dir, path),
            None => join_path(&proxy_dir, &["..", "..", "..", "package.json"]),
        };

        OutputPaths {
            array_file: self
                .directives_array_file
                .as_deref()
                .map(|file| resolve_path(root_dir, file)),
            proxy_file,
            proxy_dir,
            component_dir,
            library_package_json,
        }
    }
}

/// Absolute locations of everything one pass may write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub proxy_file: String,
    pub proxy_dir: String,
    pub array_file: Option<String>,
    pub component_dir: String,
    pub library_package_json: String,
}

/// The part of the surrounding build configuration the generator reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub root_dir: String,
    #[serde(default)]
    pub output_targets: Vec<OutputTargetRef>,
}

/// One entry of the build's `outputTargets` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTargetRef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl OutputTargetRef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: serde_json::Map::new(),
        }
    }
}

impl BuildConfig {
    pub fn new(root_dir: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_targets: Vec::new(),
        }
    }

    pub fn with_output_target(mut self, kind: impl Into<String>) -> Self {
        self.output_targets.push(OutputTargetRef::new(kind));
        self
    }

    pub fn has_output_target(&self, kind: &str) -> bool {
        self.output_targets.iter().any(|target| target.kind == kind)
    }

    pub fn has_custom_elements_target(&self) -> bool {
        self.has_output_target(DIST_CUSTOM_ELEMENTS)
    }

    /// Parse the options of every `angular` output target in the build.
    pub fn angular_output_targets(&self) -> serde_json::Result<Vec<OutputTargetAngular>> {
        self.output_targets
            .iter()
            .filter(|target| target.kind == ANGULAR_OUTPUT_TARGET)
            .map(|target| serde_json::from_value(serde_json::Value::Object(target.options.clone())))
            .collect()
    }
}

/// Fields of the library's own package manifest used to locate its typings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageJson {
    pub types: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueAccessorType {
    Text,
    Radio,
    Select,
    Number,
    Boolean,
}

impl ValueAccessorType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueAccessorType::Text => "text",
            ValueAccessorType::Radio => "radio",
            ValueAccessorType::Select => "select",
            ValueAccessorType::Number => "number",
            ValueAccessorType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementSelectors {
    One(String),
    Many(Vec<String>),
}

impl ElementSelectors {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            ElementSelectors::One(selector) => vec![selector.clone()],
            ElementSelectors::Many(selectors) => selectors.clone(),
        }
    }
}

/// Binds a form control value accessor to a set of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAccessorConfig {
    pub element_selectors: ElementSelectors,
    pub event: String,
    pub target_attr: String,
    #[serde(rename = "type")]
    pub kind: ValueAccessorType,
}
