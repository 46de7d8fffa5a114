//! Component Definition Generator
//!
//! Turns the metadata of one custom element into the source text of its
//! Angular wrapper: the `@ProxyCmp`/`@Component` decorated class and, when the
//! element emits events, the declaration-merging interface that types them.

use crate::event_type::{EventTypeResolver, ImportRequirement};
use crate::glue::{ProxyCmpOptions, PROXY_CMP, PROXY_OUTPUTS};
use crate::module::generate_angular_module_for_component;
use crate::types::{CompilerJsDoc, ComponentCompilerEvent, ComponentCompilerMeta, ComponentCompilerProperty};
use crate::util::{dash_case_to_camel_case, format_to_quoted_list, member_name, sort_by, tag_to_class_name};

/// Named imports from `@angular/core` a wrapper file needs.
pub fn angular_core_imports(include_outputs: bool, include_module: bool) -> Vec<&'static str> {
    let mut imports = vec!["ChangeDetectionStrategy", "ChangeDetectorRef", "Component", "ElementRef"];
    if include_outputs {
        imports.extend(["EventEmitter", "Output"]);
    }
    imports.push("NgZone");
    if include_module {
        imports.push("NgModule");
    }
    imports
}

/// Named imports from the runtime helper module a wrapper file needs.
pub fn runtime_imports(include_outputs: bool) -> Vec<&'static str> {
    let mut imports = vec![PROXY_CMP];
    if include_outputs {
        imports.push(PROXY_OUTPUTS);
    }
    imports
}

/// An input of the wrapper, as listed in the component metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInputProperty {
    pub name: String,
    pub required: bool,
}

impl ComponentInputProperty {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }

    /// `{ name: 'x', required: true }` for required inputs, `'x'` otherwise.
    fn render(&self) -> String {
        if self.required {
            format!("{{ name: '{}', required: true }}", self.name)
        } else {
            format!("'{}'", self.name)
        }
    }
}

/// Everything needed to render one wrapper class.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDefinition<'a> {
    pub tag_name: &'a str,
    pub inputs: &'a [ComponentInputProperty],
    pub methods: &'a [String],
    /// Reference the tag's custom-element definer from `@ProxyCmp`.
    pub include_import_custom_elements: bool,
    pub standalone: bool,
    pub inline_properties: &'a [&'a ComponentCompilerProperty],
    pub events: &'a [ComponentCompilerEvent],
}

/// One public event as it appears on the wrapper.
struct WrapperOutput<'a> {
    event: &'a ComponentCompilerEvent,
    property_name: String,
    type_text: String,
}

fn wrapper_outputs<'a>(class_name: &str, events: &'a [ComponentCompilerEvent]) -> Vec<WrapperOutput<'a>> {
    let resolver = EventTypeResolver::new(class_name);
    events
        .iter()
        .filter(|event| !event.internal)
        .map(|event| WrapperOutput {
            event,
            property_name: dash_case_to_camel_case(&event.name),
            type_text: resolver.resolve(event).type_text,
        })
        .collect()
}

/// Render a JSDoc block indented by `indent`, or nothing for empty docs.
pub fn create_doc_comment(docs: &CompilerJsDoc, indent: &str) -> Option<String> {
    if docs.is_empty() {
        return None;
    }
    let mut comment = format!("{}/**\n", indent);
    for line in docs.lines() {
        if line.is_empty() {
            comment.push_str(&format!("{} *\n", indent));
        } else {
            comment.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    comment.push_str(&format!("{} */", indent));
    Some(comment)
}

/// Render the decorated wrapper class.
pub fn create_angular_component_definition(definition: &ComponentDefinition<'_>) -> String {
    let class_name = tag_to_class_name(definition.tag_name);
    let outputs = wrapper_outputs(&class_name, definition.events);

    let proxy_cmp = ProxyCmpOptions {
        define_custom_element_fn: definition
            .include_import_custom_elements
            .then(|| format!("define{}", class_name)),
        inputs: definition.inputs.iter().map(|input| input.name.clone()).collect(),
        methods: definition.methods.to_vec(),
    };

    let formatted_inputs = definition
        .inputs
        .iter()
        .map(ComponentInputProperty::render)
        .collect::<Vec<_>>()
        .join(", ");

    let mut component_options = vec![
        format!("  selector: '{}'", definition.tag_name),
        "  changeDetection: ChangeDetectionStrategy.OnPush".to_string(),
        "  template: '<ng-content></ng-content>'".to_string(),
        format!(
            "  // eslint-disable-next-line @angular-eslint/no-inputs-metadata-property\n  inputs: [{}]",
            formatted_inputs
        ),
    ];
    if !outputs.is_empty() {
        let names: Vec<&str> = outputs.iter().map(|output| output.property_name.as_str()).collect();
        component_options.push(format!("  outputs: [{}]", format_to_quoted_list(&names)));
    }
    component_options.push(format!("  standalone: {}", definition.standalone));

    let mut members = vec![format!("  protected el: HTML{}Element;", class_name)];
    for prop in definition.inline_properties {
        let setter = format!(
            "  set {}(_: Components.{}['{}']) {{}};",
            member_name(&prop.name),
            class_name,
            prop.name
        );
        match create_doc_comment(&prop.docs, "  ") {
            Some(doc) => members.push(format!("{}\n{}", doc, setter)),
            None => members.push(setter),
        }
    }
    for output in &outputs {
        members.push(format!(
            "  @Output() {} = new EventEmitter<CustomEvent<{}>>();",
            member_name(&output.property_name),
            output.type_text
        ));
    }

    let mut constructor = vec![
        "  constructor(c: ChangeDetectorRef, r: ElementRef, protected z: NgZone) {".to_string(),
        "    c.detach();".to_string(),
        "    this.el = r.nativeElement;".to_string(),
    ];
    if !outputs.is_empty() {
        let native_names: Vec<&str> = outputs.iter().map(|output| output.event.name.as_str()).collect();
        constructor.push(format!(
            "    {}(this, this.el, [{}]);",
            PROXY_OUTPUTS,
            format_to_quoted_list(&native_names)
        ));
    }
    constructor.push("  }".to_string());

    format!(
        "{}\n@Component({{\n{}\n}})\nexport class {} {{\n{}\n{}\n}}",
        proxy_cmp.render(),
        component_options.join(",\n"),
        class_name,
        members.join("\n"),
        constructor.join("\n")
    )
}

/// One member of the interface block, already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub text: String,
    pub has_leading_doc: bool,
}

/// Join interface members.
///
/// Every undocumented member after the first is preceded by a blank line.
/// Consecutive documented members are never separated.
pub fn join_interface_members(members: &[MemberDescriptor]) -> String {
    members
        .iter()
        .enumerate()
        .fold(String::new(), |mut out, (idx, member)| {
            if idx > 0 {
                out.push('\n');
                if !member.has_leading_doc {
                    out.push('\n');
                }
            }
            out.push_str(&member.text);
            out
        })
}

/// Render the declaration-merging interface typing the wrapper's events.
///
/// Returns `None` when the component has no public event.
pub fn create_component_type_definition(class_name: &str, events: &[ComponentCompilerEvent]) -> Option<String> {
    let outputs = wrapper_outputs(class_name, events);
    if outputs.is_empty() {
        return None;
    }

    let members: Vec<MemberDescriptor> = outputs
        .iter()
        .map(|output| {
            let declaration = format!(
                "  {}: EventEmitter<CustomEvent<{}>>;",
                member_name(&output.property_name),
                output.type_text
            );
            match create_doc_comment(&output.event.docs, "  ") {
                Some(doc) => MemberDescriptor {
                    text: format!("{}\n{}", doc, declaration),
                    has_leading_doc: true,
                },
                None => MemberDescriptor {
                    text: declaration,
                    has_leading_doc: false,
                },
            }
        })
        .collect();

    Some(format!(
        "export declare interface {} extends Components.{} {{\n{}\n}}",
        class_name,
        class_name,
        join_interface_members(&members)
    ))
}

/// Imports every public event type of a component needs, deduplicated.
pub fn collect_event_type_imports(class_name: &str, events: &[ComponentCompilerEvent]) -> Vec<ImportRequirement> {
    let resolver = EventTypeResolver::new(class_name);
    let mut imports: Vec<ImportRequirement> = Vec::new();
    for event in events.iter().filter(|event| !event.internal) {
        for import in resolver.resolve(event).imports {
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
    }
    imports
}

/// Inputs of a wrapper: public properties followed by virtual properties,
/// sorted by name.
pub fn component_inputs(meta: &ComponentCompilerMeta) -> Vec<ComponentInputProperty> {
    let mut inputs: Vec<ComponentInputProperty> = meta
        .public_properties()
        .map(|prop| ComponentInputProperty::new(prop.name.clone(), prop.required))
        .chain(
            meta.virtual_properties
                .iter()
                .map(|prop| ComponentInputProperty::new(prop.name.clone(), false)),
        )
        .collect();
    sort_by(&mut inputs, |input| input.name.clone());
    inputs
}

/// Per-mode switches for [`generate_component_unit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitOptions {
    pub include_import_custom_elements: bool,
    pub standalone: bool,
    pub inline_properties: bool,
    /// Emit the companion `NgModule` class.
    pub include_module: bool,
    /// Module the `Components` namespace and event types are imported from.
    pub type_import_module: String,
}

/// The generated source of one component, ready to be placed in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub tag_name: String,
    pub class_name: String,
    pub definition: String,
    pub module_definition: Option<String>,
    pub interface_block: Option<String>,
    pub type_imports: Vec<ImportRequirement>,
    pub type_import_module: String,
    /// Output property names, in declaration order.
    pub output_names: Vec<String>,
}

impl GeneratedUnit {
    pub fn has_outputs(&self) -> bool {
        !self.output_names.is_empty()
    }

    /// One `import type` statement per event type the unit refers to.
    pub fn type_import_statements(&self) -> Vec<String> {
        self.type_imports
            .iter()
            .map(|import| {
                format!(
                    "import type {{ {} }} from '{}';",
                    import.specifier(),
                    self.type_import_module
                )
            })
            .collect()
    }

    /// The unit as laid out inside the aggregate proxy file.
    pub fn render_aggregate_section(&self) -> String {
        let mut sections = vec![self.definition.clone()];
        if let Some(module) = &self.module_definition {
            sections.push(module.clone());
        }
        if let Some(interface) = &self.interface_block {
            let imports = self.type_import_statements();
            if imports.is_empty() {
                sections.push(interface.clone());
            } else {
                sections.push(format!("{}\n\n{}", imports.join("\n"), interface));
            }
        }
        sections.join("\n\n")
    }
}

/// Generate the wrapper source of one component.
pub fn generate_component_unit(meta: &ComponentCompilerMeta, options: &UnitOptions) -> GeneratedUnit {
    let class_name = tag_to_class_name(&meta.tag_name);
    let inputs = component_inputs(meta);
    let methods: Vec<String> = meta.public_methods().map(|method| method.name.clone()).collect();
    let inline_properties: Vec<&ComponentCompilerProperty> = if options.inline_properties {
        meta.public_properties().collect()
    } else {
        Vec::new()
    };

    let definition = create_angular_component_definition(&ComponentDefinition {
        tag_name: &meta.tag_name,
        inputs: &inputs,
        methods: &methods,
        include_import_custom_elements: options.include_import_custom_elements,
        standalone: options.standalone,
        inline_properties: &inline_properties,
        events: &meta.events,
    });

    tracing::debug!(tag = %meta.tag_name, class = %class_name, "generated wrapper");

    GeneratedUnit {
        module_definition: options
            .include_module
            .then(|| generate_angular_module_for_component(&meta.tag_name)),
        interface_block: create_component_type_definition(&class_name, &meta.events),
        type_imports: collect_event_type_imports(&class_name, &meta.events),
        type_import_module: options.type_import_module.clone(),
        output_names: meta
            .public_events()
            .map(|event| dash_case_to_camel_case(&event.name))
            .collect(),
        tag_name: meta.tag_name.clone(),
        class_name,
        definition,
    }
}
