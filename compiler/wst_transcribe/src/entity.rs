//! HTML character reference detection.
//!
//! Text holding a reference such as `&amp;`, `&#169;` or `&#x1F600;` is
//! routed through the runtime `dec` helper so the browser decodes it.

/// Longest named reference accepted (`&CounterClockwiseContourIntegral;`).
const MAX_NAME_LEN: usize = 32;

/// Returns `true` if `text` contains at least one character reference.
pub fn contains_entity(text: &str) -> bool {
    text.match_indices('&')
        .any(|(start, _)| is_reference(&text[start + 1..]))
}

/// Does `rest` (the text after an `&`) start with a complete reference?
fn is_reference(rest: &str) -> bool {
    let (body, numeric) = match rest.strip_prefix('#') {
        Some(num) => (num, true),
        None => (rest, false),
    };
    let Some(end) = body.find(';') else {
        return false;
    };
    let name = &body[..end];
    if numeric {
        match name.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        name.len() <= MAX_NAME_LEN
            && name.starts_with(|c: char| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
