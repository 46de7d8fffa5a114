//! Single-component Angular modules (SCAM).

use crate::util::tag_to_class_name;

/// Render the `NgModule` declaring and exporting the wrapper of `tag_name`.
pub fn generate_angular_module_for_component(tag_name: &str) -> String {
    let class_name = tag_to_class_name(tag_name);
    format!(
        "@NgModule({{\n  declarations: [{class}],\n  exports: [{class}]\n}})\nexport class {class}Module {{ }}",
        class = class_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_module_for_component() {
        assert_eq!(
            generate_angular_module_for_component("my-component"),
            "@NgModule({\n  declarations: [MyComponent],\n  exports: [MyComponent]\n})\nexport class MyComponentModule { }"
        );
    }
}
