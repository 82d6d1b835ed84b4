//! Identifier casing helpers.

/// `IncrementAmount` -> `incrementAmount`.
pub fn pascal_to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `QuickGrid` -> `quick-grid`, `HTMLEditor` -> `html-editor`.
///
/// A hyphen goes before an uppercase letter that follows a lowercase letter
/// or digit, and before the last capital of an acronym that starts a new word.
pub fn to_kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// True for a non-empty identifier starting with an uppercase ASCII letter
/// and containing only ASCII alphanumerics and underscores.
pub fn is_pascal_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
