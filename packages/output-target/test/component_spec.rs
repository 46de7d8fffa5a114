//! Component Definition Generator Tests

use angular_output_target::component::{
    create_component_type_definition, generate_component_unit, join_interface_members, MemberDescriptor,
    UnitOptions,
};
use angular_output_target::testing::ComponentBuilder;
use angular_output_target::types::ComponentCompilerMeta;

fn aggregate_unit(meta: &ComponentCompilerMeta) -> String {
    generate_component_unit(
        meta,
        &UnitOptions {
            type_import_module: "component-library".to_string(),
            ..UnitOptions::default()
        },
    )
    .render_aggregate_section()
}

#[test]
fn should_generate_the_my_button_wrapper() {
    let meta = ComponentBuilder::new("my-button")
        .property("color")
        .property("disabled")
        .event("my-focus", "void")
        .build();
    let text = aggregate_unit(&meta);

    assert_eq!(
        text,
        r#"@ProxyCmp({
  inputs: ['color', 'disabled']
})
@Component({
  selector: 'my-button',
  changeDetection: ChangeDetectionStrategy.OnPush,
  template: '<ng-content></ng-content>',
  // eslint-disable-next-line @angular-eslint/no-inputs-metadata-property
  inputs: ['color', 'disabled'],
  outputs: ['myFocus'],
  standalone: false
})
export class MyButton {
  protected el: HTMLMyButtonElement;
  @Output() myFocus = new EventEmitter<CustomEvent<void>>();
  constructor(c: ChangeDetectorRef, r: ElementRef, protected z: NgZone) {
    c.detach();
    this.el = r.nativeElement;
    proxyOutputs(this, this.el, ['my-focus']);
  }
}

export declare interface MyButton extends Components.MyButton {
  myFocus: EventEmitter<CustomEvent<void>>;
}"#
    );
}

#[test]
fn should_list_methods_and_skip_internal_members() {
    let meta = ComponentBuilder::new("my-popover")
        .property("open")
        .internal_property("anchor")
        .method("present")
        .method("dismiss")
        .internal_method("reposition")
        .build();
    let text = aggregate_unit(&meta);

    assert!(text.contains("  inputs: ['open'],\n  methods: ['present', 'dismiss']\n})"));
    assert!(!text.contains("anchor"));
    assert!(!text.contains("reposition"));
    assert!(!text.contains("export declare interface"));
}

#[test]
fn should_emit_exactly_one_member_per_public_event() {
    let meta = ComponentBuilder::new("my-input")
        .event("my-change", "string")
        .event("my-input", "string")
        .internal_event("my-debug")
        .event("myBlur", "void")
        .build();
    let interface = create_component_type_definition("MyInput", &meta.events).unwrap();

    assert_eq!(interface.matches("export declare interface").count(), 1);
    assert_eq!(interface.matches("EventEmitter<CustomEvent<").count(), 3);
    assert!(interface.contains("  myChange: EventEmitter<CustomEvent<string>>;\n\n  myInput:"));
    assert!(!interface.contains("myDebug"));
}

#[test]
fn should_keep_documented_members_together() {
    let meta = ComponentBuilder::new("my-range")
        .documented_event("my-change", "number", "Emitted when the value changes.")
        .documented_event("my-focus", "void", "Emitted on focus.")
        .event("my-blur", "void")
        .build();
    let interface = create_component_type_definition("MyRange", &meta.events).unwrap();

    assert_eq!(
        interface,
        r#"export declare interface MyRange extends Components.MyRange {
  /**
   * Emitted when the value changes.
   */
  myChange: EventEmitter<CustomEvent<number>>;
  /**
   * Emitted on focus.
   */
  myFocus: EventEmitter<CustomEvent<void>>;

  myBlur: EventEmitter<CustomEvent<void>>;
}"#
    );
}

#[test]
fn should_fold_member_descriptors() {
    let member = |text: &str, has_leading_doc: bool| MemberDescriptor {
        text: text.to_string(),
        has_leading_doc,
    };

    assert_eq!(join_interface_members(&[]), "");
    assert_eq!(join_interface_members(&[member("a;", false)]), "a;");
    assert_eq!(
        join_interface_members(&[member("a;", false), member("/** b */\nb;", true), member("c;", false)]),
        "a;\n/** b */\nb;\n\nc;"
    );
    assert_eq!(
        join_interface_members(&[member("/** a */\na;", true), member("b;", false), member("c;", false)]),
        "/** a */\na;\n\nb;\n\nc;"
    );
    assert_eq!(
        join_interface_members(&[member("a;", false), member("b;", false), member("/** c */\nc;", true)]),
        "a;\n\nb;\n/** c */\nc;"
    );
}

#[test]
fn should_import_prefixed_event_types() {
    let meta = ComponentBuilder::new("my-component")
        .event_with_refs("my-custom-event", "MyEvent<Currency>", &[("MyEvent", "import"), ("Currency", "import")])
        .build();
    let text = aggregate_unit(&meta);

    assert!(text.contains(
        "import type { MyEvent as IMyComponentMyEvent } from 'component-library';\nimport type { Currency as IMyComponentCurrency } from 'component-library';\n\nexport declare interface MyComponent"
    ));
    assert!(text.contains("  myCustomEvent: EventEmitter<CustomEvent<IMyComponentMyEvent<IMyComponentCurrency>>>;"));
}

#[test]
fn should_append_companion_module_for_scam() {
    let meta = ComponentBuilder::new("my-badge").build();
    let unit = generate_component_unit(
        &meta,
        &UnitOptions {
            include_import_custom_elements: true,
            include_module: true,
            type_import_module: "lib/components".to_string(),
            ..UnitOptions::default()
        },
    );
    let text = unit.render_aggregate_section();

    assert!(text.starts_with("@ProxyCmp({\n  defineCustomElementFn: defineMyBadge\n})"));
    assert!(text.ends_with("@NgModule({\n  declarations: [MyBadge],\n  exports: [MyBadge]\n})\nexport class MyBadgeModule { }"));
}
