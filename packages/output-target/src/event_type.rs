//! Event Type Resolver
//!
//! Rewrites the payload type of a component event so that it can be written
//! next to the wrapper class without colliding with names from other
//! components. Every user type is renamed to `I<ClassName><Type>` and imported
//! under that alias from the component package.

use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::types::{ComponentCompilerEvent, ComponentCompilerTypeReference};

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());
static MULTIPLE_SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").unwrap());
static MEMBER_TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*([A-Za-z_$][\w$]*)").unwrap());
static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").unwrap());
static DOTTED_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_$][\w$]*)((?:\.[A-Za-z_$][\w$]*)+)$").unwrap());

/// Types that are always in scope and never need renaming.
static BUILT_IN_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "void", "any", "unknown", "never", "null", "undefined", "object", "string", "number",
        "boolean", "bigint", "symbol", "true", "false", "Array", "ReadonlyArray", "Record",
        "Partial", "Required", "Readonly", "Pick", "Omit", "Promise", "Map", "Set", "Date",
        "Error", "Event", "UIEvent", "CustomEvent", "KeyboardEvent", "MouseEvent", "FocusEvent",
        "InputEvent", "PointerEvent", "TouchEvent", "WheelEvent", "DragEvent", "ClipboardEvent",
        "AnimationEvent", "TransitionEvent", "Element", "HTMLElement", "Node", "File", "Blob",
    ]
    .into_iter()
    .collect()
});

pub fn is_built_in_type(name: &str) -> bool {
    BUILT_IN_TYPES.contains(name)
}

/// A type that must be imported for the resolved expression to type-check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportRequirement {
    /// Name exported by the component package.
    pub name: String,
    /// Collision-safe local name used in the generated code.
    pub alias: String,
}

impl ImportRequirement {
    /// The specifier as written inside `import type { ... }`.
    pub fn specifier(&self) -> String {
        if self.name == self.alias {
            self.name.clone()
        } else {
            format!("{} as {}", self.name, self.alias)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEventType {
    pub type_text: String,
    pub imports: Vec<ImportRequirement>,
}

/// Collapse line breaks and runs of whitespace, and use `, ` after commas.
pub fn normalize_type_expression(original: &str) -> String {
    let text = LINE_BREAK_RE.replace_all(original, " ");
    let text = MULTIPLE_SPACES_RE.replace_all(&text, " ");
    let text = COMMA_RE.replace_all(&text, ", ");
    text.trim().to_string()
}

/// Resolves event payload types for one component.
#[derive(Debug, Clone)]
pub struct EventTypeResolver {
    prefix: String,
}

impl EventTypeResolver {
    pub fn new(class_name: &str) -> Self {
        Self {
            prefix: format!("I{}", class_name),
        }
    }

    pub fn resolve(&self, event: &ComponentCompilerEvent) -> ResolvedEventType {
        self.resolve_expression(&event.complex_type.original, &event.complex_type.references)
    }

    pub fn resolve_expression(
        &self,
        original: &str,
        references: &IndexMap<String, ComponentCompilerTypeReference>,
    ) -> ResolvedEventType {
        let normalized = normalize_type_expression(original);
        if normalized.is_empty() {
            return ResolvedEventType {
                type_text: "any".to_string(),
                imports: Vec::new(),
            };
        }
        if is_built_in_type(&normalized) {
            return ResolvedEventType {
                type_text: normalized,
                imports: Vec::new(),
            };
        }

        let qualifier = Qualifier {
            prefix: &self.prefix,
            references,
        };
        let mut type_text = qualifier.qualify_shape(&normalized);
        let mut imports: Vec<ImportRequirement> = Vec::new();

        for (name, _) in references.iter().filter(|(_, reference)| reference.needs_import()) {
            let alias = qualifier.alias(name);
            type_text = replace_type_name(&type_text, name, &alias);
            if !imports.iter().any(|import| import.alias == alias) {
                imports.push(ImportRequirement {
                    name: name.clone(),
                    alias,
                });
            }
        }

        ResolvedEventType { type_text, imports }
    }
}

struct Qualifier<'a> {
    prefix: &'a str,
    references: &'a IndexMap<String, ComponentCompilerTypeReference>,
}

impl Qualifier<'_> {
    fn alias(&self, name: &str) -> String {
        if name.starts_with(self.prefix) {
            name.to_string()
        } else {
            format!("{}{}", self.prefix, name)
        }
    }

    fn qualify(&self, identifier: &str) -> String {
        let is_ambient = self
            .references
            .get(identifier)
            .is_some_and(|reference| !reference.needs_import());
        if is_built_in_type(identifier) || is_ambient {
            identifier.to_string()
        } else {
            self.alias(identifier)
        }
    }

    fn qualify_shape(&self, expr: &str) -> String {
        let expr = expr.trim();
        if expr.is_empty() || is_built_in_type(expr) || is_literal(expr) {
            return expr.to_string();
        }

        let parts = split_top_level(expr, &['|', '&']);
        if parts.len() > 1 {
            let mut out = String::new();
            for (part, separator) in parts {
                let part = part.trim();
                if !part.is_empty() {
                    out.push_str(&self.qualify_shape(part));
                }
                if let Some(separator) = separator {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push(separator);
                    out.push(' ');
                }
            }
            return out;
        }

        // Function types keep their shape; referenced names are renamed afterwards.
        if contains_top_level_arrow(expr) {
            return expr.to_string();
        }

        if expr.starts_with('{') && expr.ends_with('}') {
            let quoted = quoted_spans(expr);
            return MEMBER_TYPE_RE
                .replace_all(expr, |caps: &Captures| {
                    let start = caps.get(0).map_or(0, |m| m.start());
                    if quoted.iter().any(|span| span.contains(&start)) {
                        caps[0].to_string()
                    } else {
                        format!(": {}", self.qualify(&caps[1]))
                    }
                })
                .to_string();
        }

        if let Some(inner) = expr.strip_suffix("[]") {
            return format!("{}[]", self.qualify_shape(inner));
        }

        if let Some(inner) = strip_enclosing(expr, '(', ')') {
            return format!("({})", self.qualify_shape(inner));
        }

        if let Some(inner) = strip_enclosing(expr, '[', ']') {
            return format!("[{}]", self.qualify_list(inner));
        }

        if let Some(open) = expr.find('<') {
            if find_matching(expr, open, '<', '>') == Some(expr.len() - 1) {
                let base = &expr[..open];
                let args = &expr[open + 1..expr.len() - 1];
                return format!("{}<{}>", self.qualify_shape(base), self.qualify_list(args));
            }
        }

        if let Some(caps) = DOTTED_IDENTIFIER_RE.captures(expr) {
            return format!("{}{}", self.qualify(&caps[1]), &caps[2]);
        }

        if IDENTIFIER_RE.is_match(expr) {
            return self.qualify(expr);
        }

        expr.to_string()
    }

    fn qualify_list(&self, list: &str) -> String {
        split_top_level(list, &[','])
            .into_iter()
            .map(|(part, _)| self.qualify_shape(part))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn is_literal(expr: &str) -> bool {
    let first = expr.chars().next();
    matches!(first, Some('\'' | '"' | '`')) || first.is_some_and(|c| c.is_ascii_digit())
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Split `expr` on `separators` found outside brackets and string literals.
fn split_top_level<'e>(expr: &'e str, separators: &[char]) -> Vec<(&'e str, Option<char>)> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut previous = '\0';
    let mut start = 0;

    for (idx, ch) in expr.char_indices() {
        match quote {
            Some(q) if ch == q && previous != '\\' => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '<' | '{' | '(' | '[' => depth += 1,
                '>' if previous == '=' => {}
                '>' | '}' | ')' | ']' => depth -= 1,
                c if depth == 0 && separators.contains(&c) => {
                    parts.push((&expr[start..idx], Some(c)));
                    start = idx + c.len_utf8();
                }
                _ => {}
            },
        }
        previous = ch;
    }
    parts.push((&expr[start..], None));
    parts
}

/// Byte ranges of the string literals in `expr`, quotes included.
fn quoted_spans(expr: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<(char, usize)> = None;
    let mut previous = '\0';

    for (idx, ch) in expr.char_indices() {
        match open {
            Some((q, start)) if ch == q && previous != '\\' => {
                spans.push(start..idx + ch.len_utf8());
                open = None;
            }
            Some(_) => {}
            None if matches!(ch, '\'' | '"' | '`') => open = Some((ch, idx)),
            None => {}
        }
        previous = ch;
    }
    if let Some((_, start)) = open {
        spans.push(start..expr.len());
    }
    spans
}

fn contains_top_level_arrow(expr: &str) -> bool {
    let mut depth = 0i32;
    let mut previous = '\0';
    for ch in expr.chars() {
        match ch {
            '<' | '{' | '(' | '[' => depth += 1,
            '>' if previous == '=' => {
                if depth == 0 {
                    return true;
                }
            }
            '>' | '}' | ')' | ']' => depth -= 1,
            _ => {}
        }
        previous = ch;
    }
    false
}

/// Index of the bracket closing the one at `open`.
fn find_matching(expr: &str, open: usize, open_ch: char, close_ch: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut previous = '\0';
    for (idx, ch) in expr[open..].char_indices() {
        if ch == open_ch {
            depth += 1;
        } else if ch == close_ch && !(close_ch == '>' && previous == '=') {
            depth -= 1;
            if depth == 0 {
                return Some(open + idx);
            }
        }
        previous = ch;
    }
    None
}

fn strip_enclosing(expr: &str, open: char, close: char) -> Option<&str> {
    if expr.starts_with(open) && find_matching(expr, 0, open, close) == Some(expr.len() - 1) {
        Some(&expr[1..expr.len() - 1])
    } else {
        None
    }
}

/// Rename whole-word uses of `name` in a type expression.
///
/// Occurrences that follow a `.` belong to a qualified path, object keys
/// (`{ Name: ... }`) are property names and string literals are values, so
/// none of them is touched.
fn replace_type_name(text: &str, name: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied_up_to = 0;
    let quoted = quoted_spans(text);

    for (idx, _) in text.match_indices(name) {
        if idx < copied_up_to || quoted.iter().any(|span| span.contains(&idx)) {
            continue;
        }
        let before = &text[..idx];
        let after = &text[idx + name.len()..];

        let starts_word = before
            .chars()
            .next_back()
            .map_or(true, |c| !is_identifier_char(c) && c != '.');
        let ends_word = after.chars().next().map_or(true, |c| !is_identifier_char(c));
        let is_key = matches!(before.trim_end().chars().next_back(), Some('{' | ',' | ';'))
            && {
                let rest = after.trim_start();
                rest.starts_with(':') || rest.starts_with("?:")
            };

        if starts_word && ends_word && !is_key {
            out.push_str(&text[copied_up_to..idx]);
            out.push_str(replacement);
            copied_up_to = idx + name.len();
        }
    }
    out.push_str(&text[copied_up_to..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeReferenceLocation;

    fn refs(entries: &[(&str, TypeReferenceLocation)]) -> IndexMap<String, ComponentCompilerTypeReference> {
        entries
            .iter()
            .map(|(name, location)| (name.to_string(), ComponentCompilerTypeReference::new(*location)))
            .collect()
    }

    #[test]
    fn should_normalize_whitespace() {
        assert_eq!(
            normalize_type_expression("{\n  a: string,b:   number\n}"),
            "{ a: string, b: number }"
        );
    }

    #[test]
    fn should_keep_builtins_untouched() {
        let resolver = EventTypeResolver::new("MyButton");
        for ty in ["void", "string", "KeyboardEvent", "MouseEvent"] {
            let resolved = resolver.resolve_expression(ty, &IndexMap::new());
            assert_eq!(resolved.type_text, ty);
            assert!(resolved.imports.is_empty());
        }
    }

    #[test]
    fn should_qualify_generic_types() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "MyEvent<Currency>",
            &refs(&[("Currency", TypeReferenceLocation::Import)]),
        );
        assert_eq!(resolved.type_text, "IMyComponentMyEvent<IMyComponentCurrency>");
        assert_eq!(
            resolved.imports,
            vec![ImportRequirement {
                name: "Currency".to_string(),
                alias: "IMyComponentCurrency".to_string(),
            }]
        );
    }

    #[test]
    fn should_qualify_only_leading_segment_of_dotted_types() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "Outer.Inner.Leaf",
            &refs(&[("Outer", TypeReferenceLocation::Local)]),
        );
        assert_eq!(resolved.type_text, "IMyComponentOuter.Inner.Leaf");
    }

    #[test]
    fn should_qualify_values_of_object_literals() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "{ side: Side, label: string }",
            &refs(&[("Side", TypeReferenceLocation::Local)]),
        );
        assert_eq!(resolved.type_text, "{ side: IMyComponentSide, label: string }");
    }

    #[test]
    fn should_leave_string_literal_members_alone() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "{ kind: 'a:Bee', label: \"Bee\", value: Bee }",
            &refs(&[("Bee", TypeReferenceLocation::Local)]),
        );
        assert_eq!(
            resolved.type_text,
            "{ kind: 'a:Bee', label: \"Bee\", value: IMyComponentBee }"
        );
        assert_eq!(quoted_spans("{ a: 'x', b: \"y\" }"), vec![5..8, 13..16]);
    }

    #[test]
    fn should_not_rename_object_keys() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "(e: { Side: Side }) => void",
            &refs(&[("Side", TypeReferenceLocation::Local)]),
        );
        assert_eq!(resolved.type_text, "(e: { Side: IMyComponentSide }) => void");
    }

    #[test]
    fn should_leave_ambient_references_alone() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression(
            "Detail | GlobalThing",
            &refs(&[
                ("Detail", TypeReferenceLocation::Local),
                ("GlobalThing", TypeReferenceLocation::Global),
            ]),
        );
        assert_eq!(resolved.type_text, "IMyComponentDetail | GlobalThing");
        assert_eq!(resolved.imports.len(), 1);
    }

    #[test]
    fn should_not_double_prefix() {
        let resolver = EventTypeResolver::new("MyComponent");
        let resolved = resolver.resolve_expression("IMyComponentState", &IndexMap::new());
        assert_eq!(resolved.type_text, "IMyComponentState");
    }

    #[test]
    fn should_handle_arrays_and_tuples() {
        let resolver = EventTypeResolver::new("MyList");
        let resolved = resolver.resolve_expression("Item[]", &refs(&[("Item", TypeReferenceLocation::Import)]));
        assert_eq!(resolved.type_text, "IMyListItem[]");

        let resolved = resolver.resolve_expression("[Item, number]", &IndexMap::new());
        assert_eq!(resolved.type_text, "[IMyListItem, number]");
    }

    #[test]
    fn should_fall_back_to_any_for_missing_types() {
        let resolver = EventTypeResolver::new("MyList");
        assert_eq!(resolver.resolve_expression("  ", &IndexMap::new()).type_text, "any");
    }

    #[test]
    fn should_rename_whole_words_only() {
        assert_eq!(replace_type_name("Foo<FooBar, Foo>", "Foo", "IXFoo"), "IXFoo<FooBar, IXFoo>");
        assert_eq!(replace_type_name("A.Foo", "Foo", "IXFoo"), "A.Foo");
    }
}
