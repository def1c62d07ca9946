//! Identifier case helpers.

/// Returns true for `CamelCase` names: an uppercase first letter and no
/// underscores. Acronyms (`HTTPClient`) are accepted.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Returns true for `SCREAMING_SNAKE_CASE` names.
#[must_use]
pub fn is_screaming_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && !name.contains("__")
        && !name.ends_with('_')
}

/// Converts `Some_name` or `some_name` to `SomeName`.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}

/// Converts `MaxSize` or `Max_size` to `MAX_SIZE`.
#[must_use]
pub fn to_screaming_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        } else {
            if c.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
                && !out.ends_with('_')
            {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
        }
        prev = Some(c);
    }
    out.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_detection() {
        assert!(is_camel_case("User"));
        assert!(is_camel_case("UserAccount"));
        assert!(is_camel_case("HTTPClient"));
        assert!(is_camel_case("V2"));
        assert!(!is_camel_case("User_Account"));
        assert!(!is_camel_case("user"));
        assert!(!is_camel_case(""));
    }

    #[test]
    fn screaming_snake_detection() {
        assert!(is_screaming_snake_case("MAX_SIZE"));
        assert!(is_screaming_snake_case("V2"));
        assert!(is_screaming_snake_case("A"));
        assert!(!is_screaming_snake_case("MaxSize"));
        assert!(!is_screaming_snake_case("MAX__SIZE"));
        assert!(!is_screaming_snake_case("MAX_"));
        assert!(!is_screaming_snake_case(""));
    }

    #[test]
    fn conversions() {
        assert_eq!(to_camel_case("User_account"), "UserAccount");
        assert_eq!(to_camel_case("Foo"), "Foo");
        assert_eq!(to_screaming_snake_case("MaxSize"), "MAX_SIZE");
        assert_eq!(to_screaming_snake_case("Max_size"), "MAX_SIZE");
        assert_eq!(to_screaming_snake_case("Version2Name"), "VERSION2_NAME");
        assert_eq!(to_screaming_snake_case("HTTP"), "HTTP");
    }
}
