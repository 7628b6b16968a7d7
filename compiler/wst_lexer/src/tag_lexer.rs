//! Attribute lexer for a single opening tag.
//!
//! [`TagLexer`] takes one `Tag` token (newlines already flattened to
//! spaces) and splits it into a [`TagToken::TagName`] followed by
//! [`TagToken::AttributeName`] and [`TagToken::Attribute`] tokens in source
//! order.
//!
//! The self-closing `/>` marker is accepted but not reported; whether an
//! element is void is decided from its name by the transcriber.

use crate::error::{render_context, LexError, LexErrorKind};
use crate::token::{AttributeValue, TagToken, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Before the opening `<`.
    Start,
    /// Seen `<`.
    Open,
    TagName,
    /// Between attributes.
    Between,
    AttrName,
    /// Whitespace after an attribute name; `=` may still follow.
    AfterAttrName,
    /// Seen `=`; waiting for the value's first character.
    ValueStart,
    Quoted { quote: char },
    /// Inside `{...}`; `quote` is set within a string literal of the
    /// expression, where braces do not count.
    Braced { depth: u32, quote: Option<char> },
    Bare,
    /// Seen the `/` of `/>`.
    SelfCloseSlash,
    /// Seen the closing `>`; nothing may follow.
    Done,
}

/// Splits opening-tag lexemes into [`TagToken`]s.
///
/// Scratch buffers are kept between calls; every call starts from a clean
/// state.
#[derive(Clone, Debug)]
pub struct TagLexer {
    state: State,
    name: String,
    value: String,
    tokens: Vec<TagToken>,
}

impl Default for TagLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Characters allowed in attribute names.
fn is_attribute_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_' | '.' | '@')
}

impl TagLexer {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            name: String::new(),
            value: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Lex the lexeme of an opening `Tag` token.
    ///
    /// Error columns are the token's column plus the offending character's
    /// offset within the lexeme.
    pub fn lex(&mut self, token: &Token) -> Result<Vec<TagToken>, LexError> {
        self.state = State::Start;
        self.name.clear();
        self.value.clear();
        self.tokens.clear();

        for (offset, c) in token.lexeme.chars().enumerate() {
            if !self.step(c) {
                return Err(Self::illegal(c, token, offset));
            }
        }

        match self.state {
            State::Done => Ok(std::mem::take(&mut self.tokens)),
            State::Quoted { .. } | State::Braced { .. } => Err(LexError::new(
                LexErrorKind::UnbalancedQuote {
                    lexeme: token.lexeme.clone(),
                },
                token.line,
                token.column,
            )),
            _ => Err(LexError::new(
                LexErrorKind::UnterminatedTag,
                token.line,
                token.column,
            )),
        }
    }

    /// Advance by one character. Returns `false` if `c` is illegal here.
    fn step(&mut self, c: char) -> bool {
        let blank = c.is_ascii_whitespace();
        self.state = match self.state {
            State::Start if c == '<' => State::Open,
            State::Start => return false,

            State::Open if c.is_ascii_alphabetic() => {
                self.name.push(c);
                State::TagName
            }
            State::Open => return false,

            State::TagName => match c {
                c if c.is_ascii_alphanumeric() || c == '-' => {
                    self.name.push(c);
                    State::TagName
                }
                _ if blank => {
                    self.emit_tag_name();
                    State::Between
                }
                '>' => {
                    self.emit_tag_name();
                    State::Done
                }
                '/' => {
                    self.emit_tag_name();
                    State::SelfCloseSlash
                }
                _ => return false,
            },

            State::Between => match c {
                _ if blank => State::Between,
                '>' => State::Done,
                '/' => State::SelfCloseSlash,
                c if is_attribute_name_char(c) => {
                    self.name.push(c);
                    State::AttrName
                }
                _ => return false,
            },

            State::AttrName => match c {
                c if is_attribute_name_char(c) => {
                    self.name.push(c);
                    State::AttrName
                }
                '=' => State::ValueStart,
                _ if blank => State::AfterAttrName,
                '>' => {
                    self.emit_attribute_name();
                    State::Done
                }
                '/' => {
                    self.emit_attribute_name();
                    State::SelfCloseSlash
                }
                _ => return false,
            },

            State::AfterAttrName => match c {
                _ if blank => State::AfterAttrName,
                '=' => State::ValueStart,
                '>' => {
                    self.emit_attribute_name();
                    State::Done
                }
                '/' => {
                    self.emit_attribute_name();
                    State::SelfCloseSlash
                }
                c if is_attribute_name_char(c) => {
                    self.emit_attribute_name();
                    self.name.push(c);
                    State::AttrName
                }
                _ => return false,
            },

            State::ValueStart => match c {
                _ if blank => State::ValueStart,
                '"' | '\'' => State::Quoted { quote: c },
                '{' => State::Braced {
                    depth: 1,
                    quote: None,
                },
                '>' | '=' | '}' => return false,
                _ => {
                    self.value.push(c);
                    State::Bare
                }
            },

            State::Quoted { quote } if c == quote => {
                let text = std::mem::take(&mut self.value);
                self.emit_attribute(AttributeValue::Quoted { quote, text });
                State::Between
            }
            State::Quoted { quote } => {
                self.value.push(c);
                State::Quoted { quote }
            }

            State::Braced {
                depth,
                quote: Some(q),
            } => {
                self.value.push(c);
                let quote = (c != q).then_some(q);
                State::Braced { depth, quote }
            }
            State::Braced { depth, quote: None } => match c {
                '}' if depth == 1 => {
                    let text = std::mem::take(&mut self.value);
                    self.emit_attribute(AttributeValue::Expression(text));
                    State::Between
                }
                _ => {
                    self.value.push(c);
                    match c {
                        '}' => State::Braced {
                            depth: depth - 1,
                            quote: None,
                        },
                        '{' => State::Braced {
                            depth: depth + 1,
                            quote: None,
                        },
                        '"' | '\'' | '`' => State::Braced {
                            depth,
                            quote: Some(c),
                        },
                        _ => State::Braced { depth, quote: None },
                    }
                }
            },

            State::Bare => match c {
                _ if blank => {
                    self.emit_bare();
                    State::Between
                }
                '>' => {
                    self.emit_bare();
                    State::Done
                }
                '"' | '\'' | '{' | '}' => return false,
                _ => {
                    self.value.push(c);
                    State::Bare
                }
            },

            State::SelfCloseSlash if c == '>' => State::Done,
            State::SelfCloseSlash | State::Done => return false,
        };
        true
    }

    // ─── Emitters ──────────────────────────────────────────────────

    fn emit_tag_name(&mut self) {
        let name = std::mem::take(&mut self.name);
        self.tokens.push(TagToken::TagName(name));
    }

    fn emit_attribute_name(&mut self) {
        let name = std::mem::take(&mut self.name);
        self.tokens.push(TagToken::AttributeName(name));
    }

    fn emit_attribute(&mut self, value: AttributeValue) {
        let name = std::mem::take(&mut self.name);
        self.tokens.push(TagToken::Attribute { name, value });
    }

    fn emit_bare(&mut self) {
        let text = std::mem::take(&mut self.value);
        self.emit_attribute(AttributeValue::Bare(text));
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "tag lexemes are far shorter than u32::MAX chars"
    )]
    fn illegal(c: char, token: &Token, offset: usize) -> LexError {
        let local = offset as u32 + 1;
        LexError {
            kind: LexErrorKind::IllegalCharacter(c),
            line: token.line,
            column: token.column + local - 1,
            context: Some(render_context(&token.lexeme, token.line, local)),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]
