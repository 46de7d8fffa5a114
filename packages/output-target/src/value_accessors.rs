//! Form Control Value Accessors
//!
//! Generates one `ControlValueAccessor` directive per configured accessor
//! type so that wrapped elements can be bound with `ngModel` and reactive
//! forms. Configurations of the same type are merged.

use indexmap::IndexMap;

use crate::config::{ValueAccessorConfig, ValueAccessorType};
use crate::file_system::AbsoluteFsPath;
use crate::output_angular::OutputFile;
use crate::util::join_path;

const VALUE_ACCESSOR_SELECTORS: &str = "<VALUE_ACCESSOR_SELECTORS>";
const VALUE_ACCESSOR_EVENTTARGETS: &str = "<VALUE_ACCESSOR_EVENTTARGETS>";

/// Base class every generated accessor extends.
pub const VALUE_ACCESSOR_BASE_FILE: &str = "value-accessor.ts";
pub const VALUE_ACCESSOR_BASE_SOURCE: &str =
    include_str!("../resources/control-value-accessors/value-accessor.ts");

fn template(kind: ValueAccessorType) -> &'static str {
    match kind {
        ValueAccessorType::Text => include_str!("../resources/control-value-accessors/text-value-accessor.ts"),
        ValueAccessorType::Radio => include_str!("../resources/control-value-accessors/radio-value-accessor.ts"),
        ValueAccessorType::Select => include_str!("../resources/control-value-accessors/select-value-accessor.ts"),
        ValueAccessorType::Number => include_str!("../resources/control-value-accessors/number-value-accessor.ts"),
        ValueAccessorType::Boolean => {
            include_str!("../resources/control-value-accessors/boolean-value-accessor.ts")
        }
    }
}

/// All selectors and `(event, targetAttr)` pairs bound to one accessor type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueAccessorGroup {
    pub kind: ValueAccessorType,
    pub element_selectors: Vec<String>,
    pub event_targets: Vec<(String, String)>,
}

impl ValueAccessorGroup {
    pub fn file_name(&self) -> String {
        format!("{}-value-accessor.ts", self.kind.as_str())
    }

    pub fn render(&self) -> String {
        let host = self
            .event_targets
            .iter()
            .map(|(event, target_attr)| {
                format!("'({})': 'handleChangeEvent($event.target.{})'", event, target_attr)
            })
            .collect::<Vec<_>>()
            .join(",\n    ");

        template(self.kind)
            .replace(VALUE_ACCESSOR_SELECTORS, &self.element_selectors.join(", "))
            .replace(VALUE_ACCESSOR_EVENTTARGETS, &host)
    }
}

/// Merge configurations by accessor type, in order of first appearance.
pub fn group_value_accessors(configs: &[ValueAccessorConfig]) -> Vec<ValueAccessorGroup> {
    let mut groups: IndexMap<ValueAccessorType, ValueAccessorGroup> = IndexMap::new();

    for config in configs {
        let group = groups.entry(config.kind).or_insert_with(|| ValueAccessorGroup {
            kind: config.kind,
            element_selectors: Vec::new(),
            event_targets: Vec::new(),
        });
        for selector in config.element_selectors.to_vec() {
            if !group.element_selectors.contains(&selector) {
                group.element_selectors.push(selector);
            }
        }
        let target = (config.event.clone(), config.target_attr.clone());
        if !group.event_targets.contains(&target) {
            group.event_targets.push(target);
        }
    }

    groups.into_values().collect()
}

/// Files for every configured accessor plus the shared base class, all
/// placed in `proxy_dir`. Nothing is generated without configuration.
pub fn generate_value_accessors(configs: &[ValueAccessorConfig], proxy_dir: &str) -> Vec<OutputFile> {
    if configs.is_empty() {
        return Vec::new();
    }

    let mut files: Vec<OutputFile> = group_value_accessors(configs)
        .into_iter()
        .map(|group| OutputFile {
            path: AbsoluteFsPath::new(join_path(proxy_dir, &[&group.file_name()])),
            content: group.render(),
        })
        .collect();
    files.push(OutputFile {
        path: AbsoluteFsPath::new(join_path(proxy_dir, &[VALUE_ACCESSOR_BASE_FILE])),
        content: VALUE_ACCESSOR_BASE_SOURCE.to_string(),
    });
    files
}
