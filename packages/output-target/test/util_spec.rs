//! Identifier and Path Utility Tests

use angular_output_target::types::ComponentCompilerMeta;
use angular_output_target::util;

#[test]
fn should_derive_class_names_deterministically() {
    for tag in ["my-button", "my-list-item-scoped", "x-a", "ion-toggle"] {
        let class_name = util::tag_to_class_name(tag);
        assert_eq!(util::tag_to_class_name(tag), class_name);
        assert_eq!(util::tag_to_class_name(&class_name), class_name);
    }
}

#[test]
fn should_import_across_directory_boundaries() {
    assert_eq!(
        util::relative_import(
            "/a/b/components/x.ts",
            "/a/b/angular-component-lib/utils.ts",
            ".ts"
        ),
        "../angular-component-lib/utils"
    );
    assert_eq!(
        util::relative_import("/a/b/proxies.ts", "/a/b/angular-component-lib/utils.ts", ".ts"),
        "./angular-component-lib/utils"
    );
    assert_eq!(
        util::relative_import("/a/b/index.ts", "/a/b/proxies.ts", ".ts"),
        "./proxies"
    );
}

#[test]
fn should_normalize_windows_separators_in_imports() {
    assert_eq!(
        util::relative_import("C:\\lib\\src\\proxies.ts", "C:\\lib\\dist\\types\\components.d.ts", ".d.ts"),
        "../dist/types/components"
    );
    assert_eq!(
        util::relative_import("/a/./b/../b/x.ts", "/a/b/y.ts", ".ts"),
        "./y"
    );
}

#[test]
fn should_sort_independently_of_input_order() {
    let tags = ["my-select", "my-button", "my-input", "my-badge"];
    let forward: Vec<ComponentCompilerMeta> = tags.iter().map(|tag| ComponentCompilerMeta::new(*tag)).collect();
    let backward: Vec<ComponentCompilerMeta> = tags.iter().rev().map(|tag| ComponentCompilerMeta::new(*tag)).collect();

    let mut a: Vec<&ComponentCompilerMeta> = forward.iter().collect();
    let mut b: Vec<&ComponentCompilerMeta> = backward.iter().collect();
    util::sort_components(&mut a);
    util::sort_components(&mut b);

    let a: Vec<&str> = a.iter().map(|cmp| cmp.tag_name.as_str()).collect();
    let b: Vec<&str> = b.iter().map(|cmp| cmp.tag_name.as_str()).collect();
    assert_eq!(a, vec!["my-badge", "my-button", "my-input", "my-select"]);
    assert_eq!(a, b);
}

#[test]
fn should_quote_member_names_with_dashes_or_slashes() {
    assert_eq!(util::member_name("myFocus"), "myFocus");
    assert_eq!(util::member_name("my-focus"), "'my-focus'");
    assert_eq!(util::member_name("ion/change"), "'ion/change'");
}
