//! Identifier mangling for generated script names.
//!
//! Pure functions only: camel-casing of source identifiers, the base-62 suffix
//! encoder used to disambiguate and minimize names, and identifier validation
//! against the target language's lexical rules.

/// Digits of the suffix encoder, in value order.
const ENCODE_NUMBER_TABLE: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Words that can never be used as a plain identifier in the target language,
/// including the strict-mode reserved words.
const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Convert a source identifier to its conventional script spelling.
///
/// - `ID` becomes `id`.
/// - Identifiers that are entirely uppercase (longer than one character), or
///   that do not start with an uppercase letter, are returned unchanged.
/// - A leading run of several capitals is treated as an acronym: all but the
///   last capital are lowercased, so `HTMLText` becomes `htmlText`.
/// - Otherwise only the first character is lowercased.
pub fn make_camel_case(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if s == "ID" {
        return "id".to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    let num_uppercase = chars.iter().take_while(|c| c.is_uppercase()).count();
    let has_non_uppercase = num_uppercase < chars.len();

    if (!has_non_uppercase && chars.len() != 1) || num_uppercase == 0 {
        return s.to_string();
    }

    if num_uppercase > 1 {
        let mut result: String = chars[..num_uppercase - 1]
            .iter()
            .flat_map(|c| c.to_lowercase())
            .collect();
        result.extend(&chars[num_uppercase - 1..]);
        result
    } else if chars.len() == 1 {
        s.to_lowercase()
    } else {
        let mut result: String = chars[0].to_lowercase().collect();
        result.extend(&chars[1..]);
        result
    }
}

/// Encode `i` in base 62 using the digits `0-9A-Za-z`.
///
/// `0 -> "0"`, `61 -> "z"`, `62 -> "10"`.
pub fn encode_number(mut i: u32) -> String {
    let base = ENCODE_NUMBER_TABLE.len() as u32;
    let mut digits = vec![ENCODE_NUMBER_TABLE[(i % base) as usize]];
    while i >= base {
        i /= base;
        digits.push(ENCODE_NUMBER_TABLE[(i % base) as usize]);
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// Check if a character can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

/// Check if a character can be part of an identifier.
fn is_identifier_part(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphanumeric()
}

/// Check if `name` is a reserved word of the target language.
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Validate that a string is a valid, non-reserved identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !is_identifier_start(first) || !chars.all(is_identifier_part) {
        return false;
    }
    !is_reserved_word(name)
}

/// Validate a dotted identifier path such as `Company.Product.Ui`.
pub fn is_valid_nested_identifier(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_valid_identifier)
}

/// Split a dotted script name into `(namespace, local name)`.
///
/// A name without a dot (or whose only dot is leading) has an empty namespace.
pub fn split_name(full_name: &str) -> (&str, &str) {
    match full_name.rfind('.') {
        Some(dot) if dot > 0 => (&full_name[..dot], &full_name[dot + 1..]),
        _ => ("", full_name),
    }
}

/// Join a namespace and a local name, omitting the dot for an empty namespace.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}
