//! Token types produced by the markup and tag lexers.

use std::fmt;

/// Kind of a markup token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An opening tag, `<div class="x">` (raw lexeme, attributes unparsed).
    Tag,
    /// A closing tag, `</div>`.
    ClosingTag,
    /// Anything else: text, whitespace, declarations such as `<!DOCTYPE html>`.
    Data,
}

/// A markup token in document order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token.
    pub lexeme: String,
    /// 1-based line of the token's first character.
    pub line: u32,
    /// 1-based column of the token's first character.
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Lower-cased element name of a `ClosingTag` lexeme.
    ///
    /// `</Div >` yields `div`. Returns `None` for other token kinds.
    pub fn closing_name(&self) -> Option<String> {
        if self.kind != TokenKind::ClosingTag {
            return None;
        }
        let inner = self
            .lexeme
            .strip_prefix("</")
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(&self.lexeme);
        Some(inner.trim().to_ascii_lowercase())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{:?}, {}, {}:{}}}",
            self.kind,
            self.lexeme.escape_debug(),
            self.line,
            self.column
        )
    }
}

/// Value of a key=value attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// `key="text"` or `key='text'`; `text` excludes the quotes.
    Quoted { quote: char, text: String },
    /// `key={expr}`: an embedded JavaScript expression, braces excluded.
    Expression(String),
    /// `key=text` with no delimiters.
    Bare(String),
}

impl AttributeValue {
    /// The value's text without delimiters.
    pub fn text(&self) -> &str {
        match self {
            AttributeValue::Quoted { text, .. }
            | AttributeValue::Expression(text)
            | AttributeValue::Bare(text) => text,
        }
    }
}

/// A sub-token of an opening tag, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagToken {
    /// The element name, as written.
    TagName(String),
    /// A boolean attribute with no value, `disabled`.
    AttributeName(String),
    /// A key=value attribute.
    Attribute { name: String, value: AttributeValue },
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagToken::TagName(name) => write!(f, "<TagName, {name}>"),
            TagToken::AttributeName(name) => write!(f, "<AttributeName, {name}>"),
            TagToken::Attribute { name, value } => match value {
                AttributeValue::Quoted { quote, text } => {
                    write!(f, "<Attribute, {name}={quote}{text}{quote}>")
                }
                AttributeValue::Expression(text) => write!(f, "<Attribute, {name}={{{text}}}>"),
                AttributeValue::Bare(text) => write!(f, "<Attribute, {name}={text}>"),
            },
        }
    }
}
