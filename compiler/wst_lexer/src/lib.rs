//! Lexers for the WST markup transcriber.
//!
//! Two hand-written finite-state machines live here:
//!
//! ```text
//! text ──► SourceText ──► MarkupLexer ──► Vec<Token>        {Tag, ClosingTag, Data}
//!                                  │
//!                     Tag lexeme ──► TagLexer ──► Vec<TagToken>  {TagName, AttributeName, Attribute}
//! ```
//!
//! Both lexers are plain values owned by the caller. Nothing is global, so
//! independent files can be lexed on separate threads, and a lexer can be
//! [`reset`](MarkupLexer::reset) and reused without leaking state.
//!
//! # Modules
//!
//! - [`source`]: line splitting, BOM stripping and the tab-indentation check
//! - [`markup`]: the line-driven markup lexer
//! - [`tag_lexer`]: the per-tag attribute lexer
//! - [`token`]: token types shared by both lexers
//! - [`error`]: [`LexError`] and context rendering

mod cursor;
pub mod error;
pub mod markup;
pub mod source;
pub mod tag_lexer;
pub mod token;

pub use error::{LexError, LexErrorKind};
pub use markup::{MarkupLexer, RAW_TEXT_ELEMENTS};
pub use source::SourceText;
pub use tag_lexer::TagLexer;
pub use token::{AttributeValue, TagToken, Token, TokenKind};

