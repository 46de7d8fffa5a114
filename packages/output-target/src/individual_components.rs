//! Individual Component Export
//!
//! Standalone wrappers written one per file so that importing a single
//! component pulls in only that component's custom-element definer. A barrel
//! re-exports every wrapper and a definitions file renames the definers of the
//! custom-elements build to the names the wrappers import.

use crate::component::{angular_core_imports, runtime_imports, GeneratedUnit};
use crate::file_system::AbsoluteFsPath;
use crate::output_angular::OutputFile;
use crate::util::{create_import_statement, join_path, relative_import};

pub const BARREL_FILE: &str = "index.ts";
pub const DEFINITIONS_FILE: &str = "definitions.ts";

pub fn component_file_path(component_dir: &str, tag_name: &str) -> String {
    join_path(component_dir, &[&format!("{}.ts", tag_name)])
}

/// Render the self-contained wrapper file of one component.
///
/// `runtime_utils` is the absolute path of the runtime helper module.
pub fn generate_individual_component_file(unit: &GeneratedUnit, file_path: &str, runtime_utils: &str) -> String {
    let mut type_imports = vec![format!(
        "import type {{ Components }} from '{}';",
        unit.type_import_module
    )];
    type_imports.extend(unit.type_import_statements());

    let mut sections = vec![
        format!(
            "/* tslint:disable */\n/* auto-generated angular directive proxy for {} */\n{}",
            unit.tag_name,
            create_import_statement(&angular_core_imports(unit.has_outputs(), false), "@angular/core")
        ),
        create_import_statement(
            &runtime_imports(unit.has_outputs()),
            &relative_import(file_path, runtime_utils, ".ts"),
        ),
        type_imports.join("\n"),
        format!("import {{ define{} }} from './definitions';", unit.class_name),
    ];
    if let Some(interface) = &unit.interface_block {
        sections.push(interface.clone());
    }
    sections.push(unit.definition.clone());

    format!("{}\n", sections.join("\n\n"))
}

/// `export { X } from './x';` for every unit, in the given order.
pub fn generate_barrel_export(units: &[GeneratedUnit]) -> String {
    let mut lines = vec!["/* auto-generated angular component exports */".to_string()];
    lines.extend(
        units
            .iter()
            .map(|unit| format!("export {{ {} }} from './{}';", unit.class_name, unit.tag_name)),
    );
    format!("{}\n", lines.join("\n"))
}

/// Re-export each `defineCustomElement<Class>` of `custom_elements_module`
/// as `define<Class>`.
pub fn generate_definitions_file(units: &[GeneratedUnit], custom_elements_module: &str) -> String {
    let header = "/* auto-generated custom element definers */";
    if units.is_empty() {
        return format!("{}\nexport {{}};\n", header);
    }

    let renames = units
        .iter()
        .map(|unit| format!("  defineCustomElement{class} as define{class}", class = unit.class_name))
        .collect::<Vec<_>>()
        .join(",\n");
    let exports = units
        .iter()
        .map(|unit| format!("export {{ define{} }};", unit.class_name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\nimport {{\n{}\n}} from '{}';\n\n{}\n",
        header, renames, custom_elements_module, exports
    )
}

/// Every file of the per-component topology: one wrapper per unit, the
/// barrel and the definitions file.
pub fn individual_component_files(
    units: &[GeneratedUnit],
    component_dir: &str,
    runtime_utils: &str,
    custom_elements_module: &str,
) -> Vec<OutputFile> {
    let mut files: Vec<OutputFile> = units
        .iter()
        .map(|unit| {
            let path = component_file_path(component_dir, &unit.tag_name);
            OutputFile {
                content: generate_individual_component_file(unit, &path, runtime_utils),
                path: AbsoluteFsPath::new(path),
            }
        })
        .collect();

    files.push(OutputFile {
        path: AbsoluteFsPath::new(join_path(component_dir, &[BARREL_FILE])),
        content: generate_barrel_export(units),
    });
    files.push(OutputFile {
        path: AbsoluteFsPath::new(join_path(component_dir, &[DEFINITIONS_FILE])),
        content: generate_definitions_file(units, custom_elements_module),
    });
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{generate_component_unit, UnitOptions};
    use crate::testing::ComponentBuilder;

    fn unit(builder: ComponentBuilder) -> GeneratedUnit {
        generate_component_unit(
            &builder.build(),
            &UnitOptions {
                include_import_custom_elements: true,
                standalone: true,
                type_import_module: "component-library/components".to_string(),
                ..UnitOptions::default()
            },
        )
    }

    #[test]
    fn should_import_runtime_helpers_relative_to_the_file() {
        let unit = unit(ComponentBuilder::new("my-button").property("color").event("my-focus", "void"));
        let text = generate_individual_component_file(
            &unit,
            "/lib/src/generated/components/my-button.ts",
            "/lib/src/generated/angular-component-lib/utils.ts",
        );

        assert!(text.starts_with("/* tslint:disable */\n/* auto-generated angular directive proxy for my-button */\nimport { ChangeDetectionStrategy, ChangeDetectorRef, Component, ElementRef, EventEmitter, Output, NgZone } from '@angular/core';\n\nimport { ProxyCmp, proxyOutputs } from '../angular-component-lib/utils';\n\nimport type { Components } from 'component-library/components';\n\nimport { defineMyButton } from './definitions';\n\nexport declare interface MyButton"));
        assert!(text.contains("defineCustomElementFn: defineMyButton"));
        assert!(text.contains("  standalone: true\n})"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn should_skip_interface_for_components_without_events() {
        let unit = unit(ComponentBuilder::new("my-badge").property("tone"));
        let text = generate_individual_component_file(&unit, "/out/components/my-badge.ts", "/out/angular-component-lib/utils.ts");
        assert!(!text.contains("export declare interface"));
        assert!(text.contains("import { ProxyCmp } from '../angular-component-lib/utils';"));
        assert!(!text.contains("EventEmitter"));
    }

    #[test]
    fn should_rename_definers() {
        let units = vec![unit(ComponentBuilder::new("my-button")), unit(ComponentBuilder::new("my-input"))];
        assert_eq!(
            generate_definitions_file(&units, "component-library/components"),
            "/* auto-generated custom element definers */\nimport {\n  defineCustomElementMyButton as defineMyButton,\n  defineCustomElementMyInput as defineMyInput\n} from 'component-library/components';\n\nexport { defineMyButton };\nexport { defineMyInput };\n"
        );
    }

    #[test]
    fn should_lay_out_files_in_component_dir() {
        let units = vec![unit(ComponentBuilder::new("my-button"))];
        let files = individual_component_files(&units, "/out/components", "/out/angular-component-lib/utils.ts", "lib/components");
        let paths: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/out/components/my-button.ts", "/out/components/index.ts", "/out/components/definitions.ts"]
        );
        assert!(files[1].content.contains("export { MyButton } from './my-button';"));
    }
}
