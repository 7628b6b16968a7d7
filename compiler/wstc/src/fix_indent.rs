//! Space-to-tab indentation rewriting.
//!
//! The lexer only accepts tab indentation. `retab` converts files indented
//! with spaces. The indent unit is chosen per file: 2 when any indented
//! line has a width that is not a multiple of 4, otherwise 4. A width that
//! is not a multiple of the unit is rounded down.

/// Rewrite leading spaces as tabs.
///
/// Returns `None` when no line starts with a space.
pub fn retab(text: &str) -> Option<String> {
    let widths = text.split('\n').map(leading_spaces).filter(|&w| w > 0);
    let mut unit = None;
    for width in widths {
        if width % 4 != 0 {
            unit = Some(2);
            break;
        }
        unit = Some(4);
    }
    let unit = unit?;

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let width = leading_spaces(line);
        for _ in 0..width / unit {
            out.push('\t');
        }
        out.push_str(&line[width..]);
    }
    Some(out)
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}
