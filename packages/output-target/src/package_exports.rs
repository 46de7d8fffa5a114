//! Package Export Map
//!
//! Per-component subpath exports merged into the library's package manifest.
//! Bundlers only resolve a single component when it has its own subpath and
//! the package declares itself free of side effects.

use std::io;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{OutputTargetError, Result};
use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use crate::output_angular::OutputFile;
use crate::types::ComponentCompilerMeta;
use crate::util::{join_path, relative_import, resolve_path, tag_to_class_name};

/// Export map target of one component subpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportMapEntry {
    #[serde(skip)]
    pub tag_name: String,
    pub types: String,
    pub default: String,
}

impl ExportMapEntry {
    pub fn for_component(tag_name: &str, export_subpath: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            types: format!("./{}/{}/index.d.ts", export_subpath, tag_name),
            default: format!("./fesm2022/{}.mjs", tag_name),
        }
    }

    fn to_value(&self) -> Value {
        serde_json::json!({
            "types": self.types,
            "default": self.default,
        })
    }
}

/// Entries this generator owns in the manifest's `exports`: every key
/// under `./<subpath>/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMapFragment {
    pub subpath: String,
    pub entries: IndexMap<String, ExportMapEntry>,
}

impl ExportMapFragment {
    pub fn for_components(components: &[&ComponentCompilerMeta], export_subpath: &str) -> Self {
        let subpath = export_subpath.trim_matches('/');
        let entries = components
            .iter()
            .map(|cmp| {
                (
                    format!("./{}/{}", subpath, cmp.tag_name),
                    ExportMapEntry::for_component(&cmp.tag_name, subpath),
                )
            })
            .collect();
        Self {
            subpath: subpath.to_string(),
            entries,
        }
    }

    fn owns(&self, key: &str) -> bool {
        key.strip_prefix("./")
            .and_then(|rest| rest.strip_prefix(self.subpath.as_str()))
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Merge into `manifest`.
    ///
    /// Owned keys missing from the fragment are removed; every other key is
    /// kept in place. A non-object `exports` value becomes the `"."` entry of
    /// a new export map. `sideEffects` is always set to `false`.
    pub fn merge_into(&self, manifest: &mut Map<String, Value>) {
        let exports = manifest.entry("exports").or_insert(Value::Null);
        if !exports.is_object() {
            let previous = std::mem::take(exports);
            let mut wrapped = Map::new();
            if !previous.is_null() {
                wrapped.insert(".".to_string(), previous);
            }
            *exports = Value::Object(wrapped);
        }
        if let Value::Object(exports) = exports {
            exports.retain(|key, _| !self.owns(key) || self.entries.contains_key(key));
            for (key, entry) in &self.entries {
                exports.insert(key.clone(), entry.to_value());
            }
        }
        manifest.insert("sideEffects".to_string(), Value::Bool(false));
    }

    /// The `types` target of every entry: a declaration file under
    /// `library_root` re-exporting the wrapper class from its module in
    /// `component_dir`.
    pub fn declaration_files(&self, library_root: &str, component_dir: &str) -> Vec<OutputFile> {
        self.entries
            .values()
            .map(|entry| {
                let path = resolve_path(library_root, &entry.types);
                let wrapper = join_path(component_dir, &[&format!("{}.ts", entry.tag_name)]);
                OutputFile {
                    content: format!(
                        "/* auto-generated entry point types for {} */\nexport {{ {} }} from '{}';\n",
                        entry.tag_name,
                        tag_to_class_name(&entry.tag_name),
                        relative_import(&path, &wrapper, ".ts")
                    ),
                    path: AbsoluteFsPath::new(path),
                }
            })
            .collect()
    }
}

/// Read the manifest at `path`. A missing or blank file is an empty manifest.
pub fn read_package_manifest<F: ReadonlyFileSystem + ?Sized>(
    fs: &F,
    path: &AbsoluteFsPath,
) -> Result<Map<String, Value>> {
    let text = match fs.read_file(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(OutputTargetError::Read {
                path: path.to_string(),
                source,
            })
        }
    };
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(&text).map_err(|source| OutputTargetError::Json {
        path: path.to_string(),
        source,
    })?;
    match value {
        Value::Object(manifest) => Ok(manifest),
        _ => Err(OutputTargetError::InvalidManifest { path: path.to_string() }),
    }
}

/// Two-space indented JSON with a trailing newline.
pub fn render_package_manifest(manifest: &Map<String, Value>, path: &AbsoluteFsPath) -> Result<String> {
    let mut text = serde_json::to_string_pretty(manifest).map_err(|source| OutputTargetError::Json {
        path: path.to_string(),
        source,
    })?;
    text.push('\n');
    Ok(text)
}
