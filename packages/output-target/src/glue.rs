//! Runtime Glue
//!
//! Names and configuration of the runtime helpers every generated wrapper
//! calls, the helper module itself (shipped next to the generated proxies),
//! and the registry that keeps a tag from being defined twice in one pass.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::util::format_to_quoted_list;

/// Class decorator installing input accessors and method forwarders.
pub const PROXY_CMP: &str = "ProxyCmp";

/// Bridges native element events into Angular outputs.
pub const PROXY_OUTPUTS: &str = "proxyOutputs";

/// Directory, next to the proxy file, that receives the runtime helpers.
pub const RUNTIME_MODULE_DIR: &str = "angular-component-lib";

pub const RUNTIME_MODULE_FILE: &str = "utils.ts";

/// Source of the runtime helper module.
pub const RUNTIME_UTILS_SOURCE: &str = include_str!("../resources/angular-component-lib/utils.ts");

/// Options passed to the `ProxyCmp` decorator of one wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyCmpOptions {
    /// Local name of the custom-element definer to call before proxying.
    pub define_custom_element_fn: Option<String>,
    pub inputs: Vec<String>,
    pub methods: Vec<String>,
}

impl ProxyCmpOptions {
    pub fn is_empty(&self) -> bool {
        self.define_custom_element_fn.is_none() && self.inputs.is_empty() && self.methods.is_empty()
    }

    /// Render the decorator call.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("@{}({{}})", PROXY_CMP);
        }

        let mut options = Vec::new();
        if let Some(define_fn) = &self.define_custom_element_fn {
            options.push(format!("  defineCustomElementFn: {}", define_fn));
        }
        if !self.inputs.is_empty() {
            options.push(format!("  inputs: [{}]", format_to_quoted_list(&self.inputs)));
        }
        if !self.methods.is_empty() {
            options.push(format!("  methods: [{}]", format_to_quoted_list(&self.methods)));
        }
        format!("@{}({{\n{}\n}})", PROXY_CMP, options.join(",\n"))
    }
}

/// Set of tags already defined, with an atomic check-then-insert.
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    defined: Mutex<HashSet<String>>,
}

impl CustomElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tag_name`. Returns `false` when it was already defined.
    pub fn define(&self, tag_name: &str) -> bool {
        let mut defined = self.defined.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        defined.insert(tag_name.to_string())
    }

    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.defined
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(tag_name)
    }

    pub fn len(&self) -> usize {
        self.defined.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
