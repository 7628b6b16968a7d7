//! Data-token merging and whitespace normalisation.
//!
//! The markup lexer flushes data once per line. Before transcription each
//! run of consecutive `Data` tokens becomes one token:
//!
//! - continuation tokens lose their leading tabs (source indentation);
//! - leading and trailing line breaks of the run are removed;
//! - runs left empty are dropped.
//!
//! Line breaks between the attributes of `Tag` and `ClosingTag` lexemes
//! collapse to a single space. Breaks inside attribute values survive.

use wst_lexer::{Token, TokenKind};

/// Merge data runs and flatten tag lexemes.
pub fn coalesce(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run: Option<Token> = None;

    for mut token in tokens {
        if token.kind == TokenKind::Data {
            match &mut run {
                Some(data) => data.lexeme.push_str(token.lexeme.trim_start_matches('\t')),
                None => run = Some(token),
            }
            continue;
        }
        flush_run(&mut run, &mut out);
        token.lexeme = flatten_line_breaks(&token.lexeme);
        out.push(token);
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Option<Token>, out: &mut Vec<Token>) {
    let Some(mut data) = run.take() else {
        return;
    };
    let trimmed = data.lexeme.trim_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return;
    }
    // Report the run where its text starts, not where its leading breaks do.
    let leading = data.lexeme.len() - data.lexeme.trim_start_matches(['\n', '\r']).len();
    let breaks = data.lexeme[..leading].matches('\n').count();
    if breaks > 0 {
        data.line = data
            .line
            .saturating_add(u32::try_from(breaks).unwrap_or(u32::MAX));
        data.column = 1;
    }
    if trimmed.len() != data.lexeme.len() {
        data.lexeme = trimmed.to_owned();
    }
    out.push(data);
}

/// Replace each run of line-break characters between attributes with one
/// space.
///
/// Breaks inside quoted or braced values are kept: an event handler split
/// over several lines is still several lines of script.
fn flatten_line_breaks(lexeme: &str) -> String {
    let mut out = String::with_capacity(lexeme.len());
    let mut quote = None;
    let mut braces = 0u32;
    let mut in_break = false;
    for c in lexeme.chars() {
        let in_value = quote.is_some() || braces > 0;
        if matches!(c, '\n' | '\r') && !in_value {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
            continue;
        }
        in_break = false;
        out.push(c);
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '`' if braces > 0 => quote = Some(c),
                '{' => braces += 1,
                '}' => braces = braces.saturating_sub(1),
                _ => {}
            },
        }
    }
    out
}
