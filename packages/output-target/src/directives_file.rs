//! The `DIRECTIVES` array file listing every generated wrapper.

use crate::types::ComponentCompilerMeta;
use crate::util::{join_path, relative_import, tag_to_class_name};

/// Where the wrappers listed in the array are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveSource<'a> {
    /// Every wrapper lives in the aggregate proxy file.
    ProxyFile(&'a str),
    /// One file per wrapper, `<dir>/<tag>.ts`.
    ComponentDir(&'a str),
}

/// Render the array file written to `array_file`.
pub fn generate_angular_directives_file(
    components: &[&ComponentCompilerMeta],
    array_file: &str,
    source: DirectiveSource<'_>,
) -> String {
    let class_names: Vec<String> = components.iter().map(|cmp| tag_to_class_name(&cmp.tag_name)).collect();

    let (imports, directives) = match source {
        DirectiveSource::ProxyFile(proxy_file) => {
            let proxy_path = relative_import(array_file, proxy_file, ".ts");
            let directives: Vec<String> = class_names.iter().map(|name| format!("d.{}", name)).collect();
            (format!("import * as d from '{}';", proxy_path), directives)
        }
        DirectiveSource::ComponentDir(component_dir) => {
            let imports = components
                .iter()
                .zip(&class_names)
                .map(|(cmp, class_name)| {
                    let file = join_path(component_dir, &[&format!("{}.ts", cmp.tag_name)]);
                    format!(
                        "import {{ {} }} from '{}';",
                        class_name,
                        relative_import(array_file, &file, ".ts")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            (imports, class_names.clone())
        }
    };

    if directives.is_empty() {
        return format!("{}\n\nexport const DIRECTIVES = [];\n", imports);
    }
    format!(
        "{}\n\nexport const DIRECTIVES = [\n  {}\n];\n",
        imports,
        directives.join(",\n  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components() -> Vec<ComponentCompilerMeta> {
        vec![ComponentCompilerMeta::new("my-button"), ComponentCompilerMeta::new("my-input")]
    }

    #[test]
    fn should_reference_the_proxy_namespace() {
        let components = components();
        let refs: Vec<&ComponentCompilerMeta> = components.iter().collect();
        let text = generate_angular_directives_file(
            &refs,
            "/lib/src/generated/index.ts",
            DirectiveSource::ProxyFile("/lib/src/generated/proxies.ts"),
        );
        assert_eq!(
            text,
            "import * as d from './proxies';\n\nexport const DIRECTIVES = [\n  d.MyButton,\n  d.MyInput\n];\n"
        );
    }

    #[test]
    fn should_import_each_component_file() {
        let components = components();
        let refs: Vec<&ComponentCompilerMeta> = components.iter().collect();
        let text = generate_angular_directives_file(
            &refs,
            "/lib/src/index.ts",
            DirectiveSource::ComponentDir("/lib/src/generated/components"),
        );
        assert!(text.starts_with(
            "import { MyButton } from './generated/components/my-button';\nimport { MyInput } from './generated/components/my-input';\n"
        ));
        assert!(text.ends_with("export const DIRECTIVES = [\n  MyButton,\n  MyInput\n];\n"));
    }
}
