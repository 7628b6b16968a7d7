//! Line-driven markup lexer.
//!
//! Turns source lines into [`Token`]s of kind `Tag`, `ClosingTag` and
//! `Data`. The finite-state position survives line boundaries, so a tag,
//! comment or raw-text element may span any number of lines.
//!
//! # Transition table
//!
//! | state         | input                         | next           | emits                       |
//! |---------------|-------------------------------|----------------|-----------------------------|
//! | `Idle`/`Text` | `<`                           | `TagOpen`      |                             |
//! | `Idle`/`Text` | other                         | `Text`         |                             |
//! | `TagOpen`     | `!`                           | `MarkupDecl`   |                             |
//! | `TagOpen`     | `/`                           | `EndTagOpen`   |                             |
//! | `TagOpen`     | letter                        | `TagBody`      | pending `Data`              |
//! | `TagOpen`     | other                         | `Text`*        |                             |
//! | `MarkupDecl`  | `-`, `-`                      | `Comment`      | pending `Data`              |
//! | `MarkupDecl`  | other                         | `Text`*        |                             |
//! | `Comment`     | `-->`                         | `Idle`         |                             |
//! | `EndTagOpen`  | letter                        | `EndTagName`   | pending `Data`              |
//! | `EndTagOpen`  | other                         | error          |                             |
//! | `EndTagName`  | letter, digit, `-`            | `EndTagName`   |                             |
//! | `EndTagName`  | `>`                           | `Idle`         | `ClosingTag`                |
//! | `TagBody`     | `'`, `"`, `{`                 | `TagBody`      | (suspends `>` detection)    |
//! | `TagBody`     | `>`                           | `Idle`/`RawText` | `Tag`                     |
//! | `RawText`     | `</name>`                     | `Idle`         | body `Data`, `ClosingTag`   |
//!
//! `*` marks a false tag start: the consumed lookahead (`<`, `<!`, `<!-`) is
//! merged back into the pending data and the current character is
//! re-dispatched in `Text`. This is how `<!DOCTYPE html>` and `a < b`
//! become data.
//!
//! At the end of every line a pending data run is flushed as its own `Data`
//! token; the transcriber coalesces consecutive runs afterwards.

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};
use crate::source::SourceText;
use crate::token::{Token, TokenKind};

/// Elements whose body is opaque text rather than markup.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Lexer state between characters.
#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    /// Nothing pending (start of input or just after a token).
    Idle,
    /// Accumulating data until the next `<`.
    Text,
    /// Seen `<`; deciding between tag, closing tag, declaration or data.
    TagOpen,
    /// Seen `<!` followed by `dashes` hyphens, building towards `<!--`.
    MarkupDecl { dashes: u8 },
    /// Inside `<!-- ... -->`; `dashes` counts trailing hyphens seen.
    Comment { dashes: u8 },
    /// Seen `</`.
    EndTagOpen,
    /// Accumulating a closing tag name until `>`.
    EndTagName,
    /// Accumulating an opening tag until its terminating `>`. While `quote`
    /// is set or `braces` is non-zero, `>` does not end the tag. Quotes are
    /// tracked inside braces too, so `{"}"}` stays balanced.
    TagBody { quote: Option<char>, braces: u32 },
    /// Inside a `<script>`/`<style>` body, waiting for `</tag>`.
    RawText { tag: String, line: u32, column: u32 },
}

/// A partially built lexeme and the position of its first character.
#[derive(Clone, Debug, Default)]
struct Pending {
    text: String,
    line: u32,
    column: u32,
}

impl Pending {
    fn push(&mut self, c: char, line: u32, column: u32) {
        if self.text.is_empty() {
            self.line = line;
            self.column = column;
        }
        self.text.push(c);
    }

    fn push_str(&mut self, s: &str, line: u32, column: u32) {
        if s.is_empty() {
            return;
        }
        if self.text.is_empty() {
            self.line = line;
            self.column = column;
        }
        self.text.push_str(s);
    }

    fn take(&mut self, kind: TokenKind) -> Token {
        Token::new(kind, std::mem::take(&mut self.text), self.line, self.column)
    }
}

/// Line-driven markup lexer.
///
/// One value lexes one file. Call [`tokenize`](Self::tokenize) for a whole
/// [`SourceText`], or feed lines with [`lex_line`](Self::lex_line) and
/// close with [`finish`](Self::finish).
#[derive(Clone, Debug)]
pub struct MarkupLexer {
    state: State,
    data: Pending,
    markup: Pending,
    comment_start: (u32, u32),
    tokens: Vec<Token>,
    allow_anything_in_close_tags: bool,
}

impl Default for MarkupLexer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupLexer {
    /// Create a lexer in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            data: Pending::default(),
            markup: Pending::default(),
            comment_start: (0, 0),
            tokens: Vec::new(),
            allow_anything_in_close_tags: false,
        }
    }

    /// Accept any character inside a closing tag instead of rejecting it.
    ///
    /// The closing name is later trimmed and lower-cased, so `</div >` still
    /// closes a `div`.
    #[must_use]
    pub fn allow_anything_in_close_tags(mut self, allow: bool) -> Self {
        self.allow_anything_in_close_tags = allow;
        self
    }

    /// Drop all pending state and tokens, returning to `Idle`.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.data = Pending::default();
        self.markup = Pending::default();
        self.comment_start = (0, 0);
        self.tokens.clear();
    }

    /// Lex every line of `source` and return the token stream.
    ///
    /// The lexer is reset before and after, so it can be reused for the
    /// next file.
    pub fn tokenize(&mut self, source: &SourceText) -> Result<Vec<Token>, LexError> {
        self.reset();
        for (line_no, line) in source.numbered_lines() {
            if let Err(err) = self.lex_line(line, line_no) {
                self.reset();
                return Err(err);
            }
        }
        self.finish()
    }

    /// Lex one line, carrying state over from the previous line.
    pub fn lex_line(&mut self, line: &str, line_no: u32) -> Result<(), LexError> {
        let mut cursor = Cursor::new(line);
        while !cursor.is_eof() {
            if let State::RawText { tag, .. } = &self.state {
                let tag = tag.clone();
                self.raw_text(&mut cursor, line_no, &tag);
                continue;
            }

            let Some(c) = cursor.current() else {
                break;
            };
            if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
                return Err(LexError::illegal_character(
                    c,
                    line_no,
                    cursor.column(),
                    line,
                ));
            }
            self.step(c, line_no, &cursor)?;
            cursor.advance();
        }

        if self.state == State::Text {
            self.flush_data();
            self.state = State::Idle;
        }
        Ok(())
    }

    /// Close the input and return the token stream.
    ///
    /// Fails if a comment, tag or raw-text element is still open. The lexer
    /// is reset either way.
    pub fn finish(&mut self) -> Result<Vec<Token>, LexError> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        let outcome = match state {
            State::Idle | State::Text => Ok(()),
            State::TagOpen | State::MarkupDecl { .. } => {
                self.reclassify_as_data();
                Ok(())
            }
            State::Comment { .. } => {
                let (line, column) = self.comment_start;
                Err(LexError::new(LexErrorKind::UnclosedComment, line, column))
            }
            State::TagBody { quote, braces } if quote.is_some() || braces > 0 => Err(LexError::new(
                LexErrorKind::UnbalancedQuote {
                    lexeme: self.markup.text.clone(),
                },
                self.markup.line,
                self.markup.column,
            )),
            State::TagBody { .. } | State::EndTagOpen | State::EndTagName => Err(LexError::new(
                LexErrorKind::UnterminatedTag,
                self.markup.line,
                self.markup.column,
            )),
            State::RawText { tag, line, column } => Err(LexError::new(
                LexErrorKind::UnterminatedRawText { tag },
                line,
                column,
            )),
        };

        match outcome {
            Ok(()) => {
                self.flush_data();
                let tokens = std::mem::take(&mut self.tokens);
                self.reset();
                Ok(tokens)
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    // ─── Dispatch ──────────────────────────────────────────────────

    fn step(&mut self, c: char, line: u32, cursor: &Cursor<'_>) -> Result<(), LexError> {
        let column = cursor.column();
        match &mut self.state {
            State::Idle | State::Text => {
                if c == '<' {
                    self.markup.push(c, line, column);
                    self.state = State::TagOpen;
                } else {
                    self.data.push(c, line, column);
                    self.state = State::Text;
                }
            }

            State::TagOpen => match c {
                '!' => {
                    self.markup.push(c, line, column);
                    self.state = State::MarkupDecl { dashes: 0 };
                }
                '/' => {
                    self.markup.push(c, line, column);
                    self.state = State::EndTagOpen;
                }
                c if c.is_ascii_alphabetic() => {
                    self.flush_data();
                    self.markup.push(c, line, column);
                    self.state = State::TagBody {
                        quote: None,
                        braces: 0,
                    };
                }
                _ => {
                    self.reclassify_as_data();
                    return self.step(c, line, cursor);
                }
            },

            State::MarkupDecl { dashes } => {
                if c != '-' {
                    self.reclassify_as_data();
                    return self.step(c, line, cursor);
                }
                if *dashes == 0 {
                    *dashes = 1;
                    self.markup.push(c, line, column);
                } else {
                    self.comment_start = (self.markup.line, self.markup.column);
                    self.markup.text.clear();
                    self.flush_data();
                    self.state = State::Comment { dashes: 0 };
                }
            }

            State::Comment { dashes } => match c {
                '-' => *dashes = (*dashes + 1).min(2),
                '>' if *dashes == 2 => self.state = State::Idle,
                _ => *dashes = 0,
            },

            State::EndTagOpen => {
                if !c.is_ascii_alphabetic() {
                    return Err(LexError::illegal_character(
                        c,
                        line,
                        column,
                        cursor.line(),
                    ));
                }
                self.flush_data();
                self.markup.push(c, line, column);
                self.state = State::EndTagName;
            }

            State::EndTagName => match c {
                '>' => {
                    self.markup.push(c, line, column);
                    let token = self.markup.take(TokenKind::ClosingTag);
                    self.tokens.push(token);
                    self.state = State::Idle;
                }
                c if c.is_ascii_alphanumeric() || c == '-' => self.markup.push(c, line, column),
                _ if self.allow_anything_in_close_tags => self.markup.push(c, line, column),
                _ => {
                    return Err(LexError::illegal_character(
                        c,
                        line,
                        column,
                        cursor.line(),
                    ));
                }
            },

            State::TagBody { quote, braces } => {
                self.markup.push(c, line, column);
                if let Some(q) = *quote {
                    if c == q {
                        *quote = None;
                    }
                } else {
                    match c {
                        '\'' | '"' => *quote = Some(c),
                        '`' if *braces > 0 => *quote = Some(c),
                        '{' => *braces += 1,
                        '}' if *braces > 0 => *braces -= 1,
                        '>' if *braces == 0 => self.emit_tag(),
                        _ => {}
                    }
                }
            }

            // Consumed a run at a time by `raw_text`, never per char.
            State::RawText { .. } => {}
        }
        Ok(())
    }

    // ─── Actions ───────────────────────────────────────────────────

    /// Emit the pending data run, if any.
    fn flush_data(&mut self) {
        if !self.data.text.is_empty() {
            let token = self.data.take(TokenKind::Data);
            self.tokens.push(token);
        }
    }

    /// Rewind a false tag start: the lookahead becomes ordinary data.
    fn reclassify_as_data(&mut self) {
        tracing::trace!(
            line = self.markup.line,
            column = self.markup.column,
            lookahead = %self.markup.text,
            "false tag start reclassified as data"
        );
        let lookahead = std::mem::take(&mut self.markup.text);
        self.data
            .push_str(&lookahead, self.markup.line, self.markup.column);
        self.state = State::Text;
    }

    /// Emit the completed opening tag and enter raw text when required.
    fn emit_tag(&mut self) {
        let token = self.markup.take(TokenKind::Tag);
        self.state = match raw_text_element(&token.lexeme) {
            Some(tag) => State::RawText {
                tag: tag.to_owned(),
                line: token.line,
                column: token.column,
            },
            None => State::Idle,
        };
        self.tokens.push(token);
    }

    /// Consume raw-text content up to `</tag>` or the end of the line.
    fn raw_text(&mut self, cursor: &mut Cursor<'_>, line: u32, tag: &str) {
        let rest = cursor.rest();
        let base = cursor.pos();
        match find_closing_tag(rest, tag) {
            Some((start, end)) => {
                self.data.push_str(&rest[..start], line, cursor.column());
                self.flush_data();
                cursor.advance_to(base + start);
                self.tokens.push(Token::new(
                    TokenKind::ClosingTag,
                    &rest[start..end],
                    line,
                    cursor.column(),
                ));
                cursor.advance_to(base + end);
                self.state = State::Idle;
            }
            None => {
                self.data.push_str(rest, line, cursor.column());
                self.flush_data();
                cursor.advance_to(base + rest.len());
            }
        }
    }
}

/// Name of the raw-text element an opening tag starts, if any.
///
/// A self-closed `<script ... />` has no body and does not count.
fn raw_text_element(lexeme: &str) -> Option<&'static str> {
    if lexeme.ends_with("/>") {
        return None;
    }
    let name: String = lexeme
        .chars()
        .skip(1)
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    RAW_TEXT_ELEMENTS
        .iter()
        .find(|tag| tag.eq_ignore_ascii_case(&name))
        .copied()
}

/// Find `</tag>` (ASCII case-insensitive, optional blanks before `>`).
///
/// Returns the byte range of the closing tag within `haystack`.
fn find_closing_tag(haystack: &str, tag: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name_end = 2 + tag.len();
    for start in memchr::memchr_iter(b'<', bytes) {
        let candidate = &bytes[start..];
        if candidate.len() < name_end || candidate[1] != b'/' {
            continue;
        }
        if !candidate[2..name_end].eq_ignore_ascii_case(tag.as_bytes()) {
            continue;
        }
        let tail = &haystack[start + name_end..];
        let trimmed = tail.trim_start_matches([' ', '\t']);
        if trimmed.starts_with('>') {
            return Some((start, start + name_end + (tail.len() - trimmed.len()) + 1));
        }
    }
    None
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
