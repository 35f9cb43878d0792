//! Display-time text transforms.
//!
//! These never touch stored record data; callers keep the original string and
//! ask for a transformed copy when painting.

/// Upper-case the first letter of every word.
///
/// Word boundaries are whitespace and `-`, so `"mr-mime"` becomes `"Mr-Mime"`.
/// Letters after the first are left as-is, matching CSS
/// `text-transform: capitalize`.
pub fn capitalize_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
            if is_word_boundary(c) {
                at_word_start = true;
            }
        }
    }

    out
}

/// Upper-case only the first character of the whole string.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '-'
}
