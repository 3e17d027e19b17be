// src/services/normalize.rs

//! Field normalization for raw CSV values.

use unicode_segmentation::UnicodeSegmentation;

/// Capitalize a name part: first character upper case, the rest lower case.
///
/// Not word-aware, so `"O'BRIEN"` becomes `"O'brien"` and
/// `"VAN DER BERG"` becomes `"Van der berg"`.
pub fn parse_name(name: &str) -> String {
    let mut graphemes = name.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let rest = graphemes.as_str();
            let mut out = String::with_capacity(name.len());
            out.push_str(&first.to_uppercase());
            out.push_str(&rest.to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Turn a region code such as `"A12"` into `"Region 12"`.
pub fn parse_region(code: &str) -> String {
    let mut chars = code.chars();
    chars.next();
    format!("Region {}", chars.as_str())
}

/// Coerce an optional flag to a boolean. Only the exact string `"1"` is true.
pub fn to_boolean(value: Option<&str>) -> bool {
    matches!(value, Some("1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name(""), "");
        assert_eq!(parse_name("alice"), "Alice");
        assert_eq!(parse_name("SMITH"), "Smith");
        assert_eq!(parse_name("O'BRIEN"), "O'brien");
        assert_eq!(parse_name("mARY ann"), "Mary ann");
        assert_eq!(parse_name("é"), "É");
    }

    #[test]
    fn test_parse_name_shape() {
        for input in ["x", "McDONALD", "de la CRUZ", "jr.", "III", "a-b-C"] {
            let out = parse_name(input);
            assert_eq!(out.chars().count(), input.chars().count(), "{input}");

            let mut chars = out.chars();
            let first = chars.next().unwrap();
            assert_eq!(first.to_uppercase().collect::<String>(), first.to_string());
            let rest: String = chars.collect();
            assert_eq!(rest, rest.to_lowercase(), "{input}");
        }
    }

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("A12"), "Region 12");
        assert_eq!(parse_region("R8"), "Region 8");
        assert_eq!(parse_region("X"), "Region ");
        assert_eq!(parse_region(""), "Region ");
    }

    #[test]
    fn test_to_boolean() {
        assert!(!to_boolean(None));
        assert!(!to_boolean(Some("")));
        assert!(to_boolean(Some("1")));
        assert!(!to_boolean(Some("0")));
        assert!(!to_boolean(Some("x")));
        assert!(!to_boolean(Some(" 1")));
        assert!(!to_boolean(Some("true")));
    }
}
