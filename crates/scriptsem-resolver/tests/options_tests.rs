use crate::ResolverOptions;
use std::io::Write;

#[test]
fn test_default_does_not_minimize() {
    assert!(!ResolverOptions::default().minimize_names);
    assert!(ResolverOptions::minimized().minimize_names);
}

#[test]
fn test_parse_bool_and_string_values() {
    let parsed = ResolverOptions::from_json_str(r#"{ "minimizeNames": true }"#).expect("bool");
    assert!(parsed.minimize_names);

    for (text, expected) in [("\"yes\"", true), ("\"1\"", true), ("\"off\"", false), ("\" False \"", false)] {
        let source = format!(r#"{{ "minimizeNames": {text} }}"#);
        let parsed = ResolverOptions::from_json_str(&source).expect("string bool");
        assert_eq!(parsed.minimize_names, expected, "{text}");
    }
}

#[test]
fn test_missing_key_uses_default() {
    let parsed = ResolverOptions::from_json_str("{}").expect("empty object");
    assert_eq!(parsed, ResolverOptions::default());
}

#[test]
fn test_invalid_bool_string_is_rejected() {
    let err = ResolverOptions::from_json_str(r#"{ "minimizeNames": "maybe" }"#).expect_err("invalid");
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "minimizeNames": "on" }"#).expect("write");
    assert!(ResolverOptions::load(file.path()).expect("load").minimize_names);

    let missing = file.path().with_extension("absent");
    let err = ResolverOptions::load(&missing).expect_err("missing");
    assert!(format!("{err:#}").contains("failed to read resolver options"));
}
