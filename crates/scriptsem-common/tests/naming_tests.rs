use crate::naming::*;

#[test]
fn test_camel_case_acronyms_and_edge_cases() {
    assert_eq!(make_camel_case("ID"), "id");
    assert_eq!(make_camel_case("A"), "a");
    assert_eq!(make_camel_case("HTMLText"), "htmlText");
    assert_eq!(make_camel_case("Name"), "name");
    assert_eq!(make_camel_case("ABC"), "ABC");
}

#[test]
fn test_camel_case_leaves_lowercase_and_empty_alone() {
    assert_eq!(make_camel_case(""), "");
    assert_eq!(make_camel_case("name"), "name");
    assert_eq!(make_camel_case("_field"), "_field");
    assert_eq!(make_camel_case("x"), "x");
}

#[test]
fn test_camel_case_two_letter_prefix() {
    // The last capital of the leading run starts the next word.
    assert_eq!(make_camel_case("IOStream"), "ioStream");
    assert_eq!(make_camel_case("XY"), "XY");
    assert_eq!(make_camel_case("Id"), "id");
}

#[test]
fn test_encode_number_boundaries() {
    assert_eq!(encode_number(0), "0");
    assert_eq!(encode_number(9), "9");
    assert_eq!(encode_number(10), "A");
    assert_eq!(encode_number(36), "a");
    assert_eq!(encode_number(61), "z");
    assert_eq!(encode_number(62), "10");
    assert_eq!(encode_number(62 * 62), "100");
}

#[test]
fn test_encode_number_is_injective_and_increasing() {
    let mut seen = std::collections::HashSet::new();
    let mut previous = String::new();
    for i in 0..5_000u32 {
        let encoded = encode_number(i);
        assert!(seen.insert(encoded.clone()), "duplicate encoding for {i}");
        // Longer encodings are larger; equal lengths compare by digit value,
        // which matches ASCII order for 0-9 < A-Z < a-z.
        assert!(
            encoded.len() > previous.len() || (encoded.len() == previous.len() && encoded > previous),
            "{previous} should sort before {encoded}"
        );
        previous = encoded;
    }
}

#[test]
fn test_identifier_validation() {
    assert!(is_valid_identifier("foo"));
    assert!(is_valid_identifier("$foo"));
    assert!(is_valid_identifier("_foo1"));
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("1foo"));
    assert!(!is_valid_identifier("foo-bar"));
    assert!(!is_valid_identifier("a.b"));
    assert!(!is_valid_identifier("class"));
}

#[test]
fn test_nested_identifier_validation() {
    assert!(is_valid_nested_identifier("Company.Product"));
    assert!(is_valid_nested_identifier("ui"));
    assert!(!is_valid_nested_identifier(""));
    assert!(!is_valid_nested_identifier("a..b"));
    assert!(!is_valid_nested_identifier("a.1b"));
}

#[test]
fn test_split_and_qualify() {
    assert_eq!(split_name("A.B.C"), ("A.B", "C"));
    assert_eq!(split_name("C"), ("", "C"));
    assert_eq!(qualify("", "C"), "C");
    assert_eq!(qualify("A.B", "C"), "A.B.C");
}
