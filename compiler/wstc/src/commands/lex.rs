//! `wst lex`: dump the markup token stream of a file.

use std::fmt::Write as _;
use std::fs;

use wst_lexer::{LexError, MarkupLexer, SourceText, TagLexer, TokenKind};

/// Lex a file and print its tokens, with the sub-tokens of each opening tag.
pub fn lex_file(path: &str, allow_anything_in_close_tags: bool) -> bool {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            return false;
        }
    };
    match dump_tokens(&content, allow_anything_in_close_tags) {
        Ok(dump) => {
            println!("Tokens for '{path}':");
            print!("{dump}");
            true
        }
        Err(e) => {
            eprintln!("error: {path}: {e}");
            false
        }
    }
}

/// Render the token stream of `text`, one token per line.
pub(crate) fn dump_tokens(text: &str, allow_anything_in_close_tags: bool) -> Result<String, LexError> {
    let source = SourceText::new(text)?;
    let tokens = MarkupLexer::new()
        .allow_anything_in_close_tags(allow_anything_in_close_tags)
        .tokenize(&source)?;

    let mut tag_lexer = TagLexer::new();
    let mut out = String::new();
    for token in &tokens {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "  {token}");
        if token.kind == TokenKind::Tag {
            for sub in tag_lexer.lex(token)? {
                let _ = writeln!(out, "      {sub}");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests;
