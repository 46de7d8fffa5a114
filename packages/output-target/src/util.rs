//! Utility Functions
//!
//! Identifier derivation, POSIX path arithmetic and small formatting helpers
//! shared by every generator in this crate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ComponentCompilerMeta;

/// Regex for dash-case to camelCase conversion of event names
static DASH_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([a-z])").unwrap());

/// Convert a kebab-case tag name into the wrapper class name.
///
/// Each `-` separated segment has its first character upper-cased and the
/// segments are concatenated; the rest of every segment is left untouched, so
/// re-applying the conversion to its own output is a no-op.
pub fn tag_to_class_name(tag_name: &str) -> String {
    tag_name
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert dash-case to camelCase
pub fn dash_case_to_camel_case(input: &str) -> String {
    DASH_CASE_REGEXP
        .replace_all(input, |caps: &regex::Captures| caps[1].to_uppercase())
        .to_string()
}

/// Member names containing a dash or a forward slash must be written as quoted
/// property names in generated TypeScript.
pub fn needs_quoting(name: &str) -> bool {
    name.contains('-') || name.contains('/')
}

/// The TypeScript property name for a member: bare when it is a valid
/// identifier, single-quoted otherwise.
pub fn member_name(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", name)
    } else {
        name.to_string()
    }
}

/// Normalize a path to POSIX form.
///
/// Backslashes become forward slashes, empty and `.` segments are dropped and
/// `..` segments are folded into their parent where one exists.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let is_absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if is_absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(base: &str, path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.starts_with('/') {
        normalize_path(&path)
    } else {
        normalize_path(&format!("{}/{}", base, path))
    }
}

/// Join path segments onto a base path.
pub fn join_path(base: &str, segments: &[&str]) -> String {
    let mut joined = base.to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment);
    }
    normalize_path(&joined)
}

/// Get directory name from path.
pub fn dirname(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(pos) => normalized[..pos].to_string(),
        None => ".".to_string(),
    }
}

/// Get the last path segment, optionally stripping `extension`.
pub fn basename(path: &str, extension: Option<&str>) -> String {
    let normalized = normalize_path(path);
    let name = normalized.rsplit('/').next().unwrap_or(&normalized);
    match extension {
        Some(ext) if !ext.is_empty() && name.len() > ext.len() && name.ends_with(ext) => {
            name[..name.len() - ext.len()].to_string()
        }
        _ => name.to_string(),
    }
}

/// Compute the relative path leading from directory `from` to `to`.
///
/// Both sides are normalized first; the result never carries a leading `./`
/// and is empty when the two paths are the same.
pub fn relative_path(from: &str, to: &str) -> String {
    let from = normalize_path(from);
    let to = normalize_path(to);
    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segments.len() - common];
    parts.extend_from_slice(&to_segments[common..]);
    parts.join("/")
}

/// Compute the module specifier used to import `path_to` from the file
/// `path_from`, dropping `extension` from the target file name.
pub fn relative_import(path_from: &str, path_to: &str, extension: &str) -> String {
    let mut relative = relative_path(&dirname(path_from), &dirname(path_to));
    if relative.is_empty() {
        relative = ".".to_string();
    } else if relative != ".." && !relative.starts_with("../") {
        relative = format!("./{}", relative);
    }
    format!("{}/{}", relative, basename(path_to, Some(extension)))
}

/// Stable sort by a derived key.
pub fn sort_by<T, K: Ord, F: FnMut(&T) -> K>(items: &mut [T], key: F) {
    items.sort_by_key(key);
}

/// Stable, ordinal sort of components by tag name.
pub fn sort_components(components: &mut [&ComponentCompilerMeta]) {
    sort_by(components, |cmp| cmp.tag_name.clone());
}

/// Format names as a comma separated list of single-quoted strings.
pub fn format_to_quoted_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create a named import statement, or an empty string when nothing is imported.
pub fn create_import_statement<S: AsRef<str>>(imports: &[S], module: &str) -> String {
    if imports.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = imports.iter().map(|s| s.as_ref()).collect();
    format!("import {{ {} }} from '{}';", names.join(", "), module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_tag_to_class_name() {
        assert_eq!(tag_to_class_name("my-button"), "MyButton");
        assert_eq!(tag_to_class_name("my-other-component"), "MyOtherComponent");
        assert_eq!(tag_to_class_name("x"), "X");
    }

    #[test]
    fn should_be_a_no_op_on_class_names() {
        let class_name = tag_to_class_name("my-list-item-scoped");
        assert_eq!(tag_to_class_name(&class_name), class_name);
    }

    #[test]
    fn should_camel_case_event_names() {
        assert_eq!(dash_case_to_camel_case("my-focus"), "myFocus");
        assert_eq!(dash_case_to_camel_case("myBlur"), "myBlur");
        assert_eq!(dash_case_to_camel_case("ion/change"), "ion/change");
    }

    #[test]
    fn should_normalize_paths() {
        assert_eq!(normalize_path("a\\b\\c.ts"), "a/b/c.ts");
        assert_eq!(normalize_path("./a/./b//c"), "a/b/c");
        assert_eq!(normalize_path("/a/b/../c"), "/a/c");
        assert_eq!(normalize_path("../a"), "../a");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn should_compute_dirname_and_basename() {
        assert_eq!(dirname("/a/b/c.ts"), "/a/b");
        assert_eq!(dirname("/c.ts"), "/");
        assert_eq!(dirname("c.ts"), ".");
        assert_eq!(basename("/a/b/c.d.ts", Some(".d.ts")), "c");
        assert_eq!(basename("/a/b/c.ts", None), "c.ts");
    }

    #[test]
    fn should_format_quoted_lists() {
        assert_eq!(format_to_quoted_list(&["a", "b"]), "'a', 'b'");
        assert_eq!(format_to_quoted_list::<&str>(&[]), "");
    }

    #[test]
    fn should_create_import_statements() {
        assert_eq!(
            create_import_statement(&["Component", "NgZone"], "@angular/core"),
            "import { Component, NgZone } from '@angular/core';"
        );
        assert_eq!(create_import_statement::<&str>(&[], "@angular/core"), "");
    }
}
