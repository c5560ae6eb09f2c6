//! Inline code templates.
//!
//! A template is script text with `{name}` holes, where `name` is an ASCII
//! letter or underscore followed by ASCII letters and digits. Holes name the
//! receiver (`this`), a parameter, or a type parameter.

/// Template substituted for a template with an invalid placeholder.
pub const INVALID_TEMPLATE: &str = "X";

/// Placeholder names in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let bytes = template.as_bytes();
    let mut result = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let Some(&first) = bytes.get(start) else {
            break;
        };
        if !(first.is_ascii_alphabetic() || first == b'_') {
            i += 1;
            continue;
        }
        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_alphanumeric() {
            end += 1;
        }
        if bytes.get(end) == Some(&b'}') {
            result.push(&template[start..end]);
            i = end + 1;
        } else {
            i += 1;
        }
    }
    result
}

/// `<callee>({p1}, {p2}, ...)` for the given parameter names.
pub fn call_template<'a>(callee: &str, parameters: impl IntoIterator<Item = &'a str>) -> String {
    let args: Vec<String> = parameters.into_iter().map(|p| format!("{{{p}}}")).collect();
    format!("{callee}({})", args.join(", "))
}
