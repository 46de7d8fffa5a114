//! Component Metadata
//!
//! Read-only component descriptors as produced by the upstream custom-element
//! compiler. Field names follow the compiler's JSON so descriptors can be
//! deserialized directly from its output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Compiler metadata for one custom element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerMeta {
    /// Kebab-case tag name, unique across a generation pass.
    pub tag_name: String,
    /// Internal components never get a wrapper.
    pub internal: bool,
    pub properties: Vec<ComponentCompilerProperty>,
    /// Properties that exist only on the wrapper, always optional inputs.
    pub virtual_properties: Vec<ComponentCompilerVirtualProperty>,
    pub methods: Vec<ComponentCompilerMethod>,
    pub events: Vec<ComponentCompilerEvent>,
}

impl ComponentCompilerMeta {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn public_properties(&self) -> impl Iterator<Item = &ComponentCompilerProperty> {
        self.properties.iter().filter(|prop| !prop.internal)
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &ComponentCompilerMethod> {
        self.methods.iter().filter(|method| !method.internal)
    }

    pub fn public_events(&self) -> impl Iterator<Item = &ComponentCompilerEvent> {
        self.events.iter().filter(|event| !event.internal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerProperty {
    pub name: String,
    pub required: bool,
    pub internal: bool,
    pub docs: CompilerJsDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerVirtualProperty {
    pub name: String,
    pub docs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerMethod {
    pub name: String,
    pub internal: bool,
    pub docs: CompilerJsDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerEvent {
    /// Name of the DOM event as dispatched by the element.
    pub name: String,
    pub internal: bool,
    pub complex_type: ComponentCompilerEventComplexType,
    pub docs: CompilerJsDoc,
}

/// The event payload type as written in the component source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentCompilerEventComplexType {
    pub original: String,
    pub resolved: String,
    /// Type names referenced by `original`, keyed by the name used in it.
    pub references: IndexMap<String, ComponentCompilerTypeReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCompilerTypeReference {
    pub location: TypeReferenceLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ComponentCompilerTypeReference {
    pub fn new(location: TypeReferenceLocation) -> Self {
        Self {
            location,
            path: None,
            id: None,
        }
    }

    /// Local and imported types have to be imported next to the wrapper;
    /// anything else is ambient.
    pub fn needs_import(&self) -> bool {
        matches!(
            self.location,
            TypeReferenceLocation::Local | TypeReferenceLocation::Import
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeReferenceLocation {
    Local,
    Import,
    Global,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerJsDoc {
    pub text: String,
    pub tags: Vec<CompilerJsDocTagInfo>,
}

impl CompilerJsDoc {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.tags.is_empty()
    }

    /// Render the doc text followed by its tags (`@name text`), one block of
    /// lines ready to be placed inside a `/** */` comment.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .text
            .trim()
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();

        let tags = self
            .tags
            .iter()
            .map(|tag| match tag.text.as_deref() {
                Some(text) if !text.is_empty() => format!("@{} {}", tag.name, text),
                _ => format!("@{}", tag.name),
            })
            .collect::<Vec<_>>()
            .join(" ");

        if !tags.is_empty() {
            match lines.last_mut() {
                Some(last) => {
                    last.push(' ');
                    last.push_str(&tags);
                }
                None => lines.push(tags),
            }
        }
        lines
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerJsDocTagInfo {
    pub name: String,
    pub text: Option<String>,
}
