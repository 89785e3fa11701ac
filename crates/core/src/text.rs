//! Small string helpers shared by fact, explanation and prompt rendering.

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join items as an English enumeration: `a, b and c`.
///
/// `last_joiner` is the word before the final item ("and", "or").
/// A single item is returned as-is; no items yield an empty string.
pub fn enumerate<S: AsRef<str>>(items: &[S], last_joiner: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} {} {}", head.join(", "), last_joiner, last.as_ref())
        }
    }
}
