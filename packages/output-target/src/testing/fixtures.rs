use crate::types::{
    CompilerJsDoc, ComponentCompilerEvent, ComponentCompilerEventComplexType, ComponentCompilerMeta,
    ComponentCompilerMethod, ComponentCompilerProperty, ComponentCompilerTypeReference,
    ComponentCompilerVirtualProperty, TypeReferenceLocation,
};

fn location(name: &str) -> TypeReferenceLocation {
    match name {
        "local" => TypeReferenceLocation::Local,
        "import" => TypeReferenceLocation::Import,
        "global" => TypeReferenceLocation::Global,
        _ => TypeReferenceLocation::Unknown,
    }
}

fn doc(text: &str) -> CompilerJsDoc {
    CompilerJsDoc {
        text: text.to_string(),
        tags: Vec::new(),
    }
}

/// Builds component metadata for tests.
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    meta: ComponentCompilerMeta,
}

impl ComponentBuilder {
    pub fn new(tag_name: &str) -> Self {
        Self {
            meta: ComponentCompilerMeta::new(tag_name),
        }
    }

    pub fn internal(mut self) -> Self {
        self.meta.internal = true;
        self
    }

    fn push_property(mut self, name: &str, required: bool, internal: bool, docs: CompilerJsDoc) -> Self {
        self.meta.properties.push(ComponentCompilerProperty {
            name: name.to_string(),
            required,
            internal,
            docs,
        });
        self
    }

    pub fn property(self, name: &str) -> Self {
        self.push_property(name, false, false, CompilerJsDoc::default())
    }

    pub fn required_property(self, name: &str) -> Self {
        self.push_property(name, true, false, CompilerJsDoc::default())
    }

    pub fn internal_property(self, name: &str) -> Self {
        self.push_property(name, false, true, CompilerJsDoc::default())
    }

    pub fn documented_property(self, name: &str, text: &str) -> Self {
        self.push_property(name, false, false, doc(text))
    }

    pub fn virtual_property(mut self, name: &str) -> Self {
        self.meta.virtual_properties.push(ComponentCompilerVirtualProperty {
            name: name.to_string(),
            docs: String::new(),
        });
        self
    }

    pub fn method(mut self, name: &str) -> Self {
        self.meta.methods.push(ComponentCompilerMethod {
            name: name.to_string(),
            internal: false,
            docs: CompilerJsDoc::default(),
        });
        self
    }

    pub fn internal_method(mut self, name: &str) -> Self {
        self.meta.methods.push(ComponentCompilerMethod {
            name: name.to_string(),
            internal: true,
            docs: CompilerJsDoc::default(),
        });
        self
    }

    fn push_event(
        mut self,
        name: &str,
        original: &str,
        references: &[(&str, &str)],
        internal: bool,
        docs: CompilerJsDoc,
    ) -> Self {
        self.meta.events.push(ComponentCompilerEvent {
            name: name.to_string(),
            internal,
            complex_type: ComponentCompilerEventComplexType {
                original: original.to_string(),
                resolved: original.to_string(),
                references: references
                    .iter()
                    .map(|(name, loc)| (name.to_string(), ComponentCompilerTypeReference::new(location(loc))))
                    .collect(),
            },
            docs,
        });
        self
    }

    pub fn event(self, name: &str, original: &str) -> Self {
        self.push_event(name, original, &[], false, CompilerJsDoc::default())
    }

    pub fn documented_event(self, name: &str, original: &str, text: &str) -> Self {
        self.push_event(name, original, &[], false, doc(text))
    }

    pub fn internal_event(self, name: &str) -> Self {
        self.push_event(name, "void", &[], true, CompilerJsDoc::default())
    }

    /// An event whose type refers to `references`, given as `(name, location)`.
    pub fn event_with_refs(self, name: &str, original: &str, references: &[(&str, &str)]) -> Self {
        self.push_event(name, original, references, false, CompilerJsDoc::default())
    }

    pub fn build(self) -> ComponentCompilerMeta {
        self.meta
    }
}
