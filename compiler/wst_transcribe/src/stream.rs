//! Node stream fed to the transcriber.
//!
//! After coalescing, the leading DOCTYPE declaration is checked and
//! removed, and every remaining token becomes a [`Node`]: opening tags are
//! split by the [`TagLexer`], closing tags are reduced to their lower-case
//! name.

use wst_lexer::{LexError, TagLexer, TagToken, Token, TokenKind};

use crate::error::StructuralError;

/// One step of the document, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An opening tag. `self_closed` records a trailing `/>`.
    Element {
        tokens: Vec<TagToken>,
        self_closed: bool,
        line: u32,
    },
    /// Character data.
    Text { text: String, line: u32 },
    /// A closing tag, by lower-case element name.
    Close { tag: String, line: u32 },
}

impl Node {
    /// Convert one coalesced token.
    pub fn from_token(token: Token, lexer: &mut TagLexer) -> Result<Self, LexError> {
        let line = token.line;
        Ok(match token.kind {
            TokenKind::Tag => Node::Element {
                tokens: lexer.lex(&token)?,
                self_closed: token.lexeme.trim_end().ends_with("/>"),
                line,
            },
            TokenKind::ClosingTag => Node::Close {
                tag: token.closing_name().unwrap_or_default(),
                line,
            },
            TokenKind::Data => Node::Text {
                text: token.lexeme,
                line,
            },
        })
    }
}

/// Check that the stream starts with a DOCTYPE declaration and drop it.
///
/// The first token must be data containing `DOCTYPE HTML` in any case.
pub fn strip_doctype(tokens: Vec<Token>) -> Result<Vec<Token>, StructuralError> {
    let mut tokens = tokens.into_iter();
    match tokens.next() {
        Some(first)
            if first.kind == TokenKind::Data
                && first.lexeme.to_ascii_uppercase().contains("DOCTYPE HTML") =>
        {
            Ok(tokens.collect())
        }
        Some(first) => Err(StructuralError::MissingDoctype {
            found: first.lexeme,
        }),
        None => Err(StructuralError::MissingDoctype {
            found: "end of input".to_owned(),
        }),
    }
}

/// Convert coalesced tokens into nodes.
pub fn build_nodes(tokens: Vec<Token>, lexer: &mut TagLexer) -> Result<Vec<Node>, LexError> {
    tokens
        .into_iter()
        .map(|token| Node::from_token(token, lexer))
        .collect()
}
