//! Event Type Resolver Tests

use angular_output_target::event_type::{normalize_type_expression, EventTypeResolver};
use angular_output_target::testing::ComponentBuilder;

fn resolve(class_name: &str, original: &str, references: &[(&str, &str)]) -> (String, Vec<String>) {
    let meta = ComponentBuilder::new("x-fixture")
        .event_with_refs("change", original, references)
        .build();
    let resolved = EventTypeResolver::new(class_name).resolve(&meta.events[0]);
    let imports = resolved.imports.iter().map(|import| import.specifier()).collect();
    (resolved.type_text, imports)
}

#[test]
fn should_qualify_generic_event_types() {
    let (type_text, imports) = resolve("MyComponent", "MyEvent<Currency>", &[("Currency", "import")]);
    assert_eq!(type_text, "IMyComponentMyEvent<IMyComponentCurrency>");
    assert_eq!(imports, vec!["Currency as IMyComponentCurrency"]);
}

#[test]
fn should_return_builtin_types_unchanged() {
    for ty in ["void", "string", "number", "boolean", "Event", "KeyboardEvent", "MouseEvent"] {
        let (type_text, imports) = resolve("MyButton", ty, &[]);
        assert_eq!(type_text, ty);
        assert!(imports.is_empty());
    }
}

#[test]
fn should_normalize_multiline_types_first() {
    assert_eq!(
        normalize_type_expression("{\n    side: Side,\n    other:   number\n  }"),
        "{ side: Side, other: number }"
    );
    let (type_text, _) = resolve("MyComponent", "{\n  side: Side,\n  count: number\n}", &[("Side", "local")]);
    assert_eq!(type_text, "{ side: IMyComponentSide, count: number }");
}

#[test]
fn should_qualify_only_the_leading_segment_of_dotted_types() {
    let (type_text, imports) = resolve(
        "MyComponent",
        "Namespace.SomeMoreComplexType.SubType",
        &[("Namespace", "import")],
    );
    assert_eq!(type_text, "IMyComponentNamespace.SomeMoreComplexType.SubType");
    assert_eq!(imports, vec!["Namespace as IMyComponentNamespace"]);
}

#[test]
fn should_ignore_global_references() {
    let (type_text, imports) = resolve("MyInput", "HTMLElement | Detail", &[
        ("HTMLElement", "global"),
        ("Detail", "local"),
    ]);
    assert_eq!(type_text, "HTMLElement | IMyInputDetail");
    assert_eq!(imports, vec!["Detail as IMyInputDetail"]);
}

#[test]
fn should_keep_unclassifiable_expressions_parseable() {
    let (type_text, imports) = resolve("MyList", "keyof Item", &[("Item", "import")]);
    assert_eq!(type_text, "keyof IMyListItem");
    assert_eq!(imports, vec!["Item as IMyListItem"]);
}

#[test]
fn should_qualify_nested_generic_arguments() {
    let (type_text, _) = resolve(
        "MyTable",
        "Map<RowId, Array<Row>>",
        &[("RowId", "local"), ("Row", "import")],
    );
    assert_eq!(type_text, "Map<IMyTableRowId, Array<IMyTableRow>>");
}
