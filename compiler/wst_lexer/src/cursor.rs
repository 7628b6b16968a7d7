//! Character cursor over a single source line.
//!
//! The cursor walks a `&str` one `char` at a time while keeping the byte
//! offset (for slicing) and the 1-based column (for diagnostics) in step.
//! It is [`Copy`], so a snapshot taken before a lookahead is a plain
//! assignment.

/// Cursor over one line of source text.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    /// Byte offset of the current character.
    pos: usize,
    /// 1-based column of the current character, counted in chars.
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned at the first character of `src`.
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            column: 1,
        }
    }

    /// The character under the cursor, or `None` at end of line.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Move past the current character.
    #[inline]
    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
            self.column += 1;
        }
    }

    /// Move forward to byte offset `target`, counting columns on the way.
    ///
    /// `target` must lie on a char boundary at or after the current position.
    pub(crate) fn advance_to(&mut self, target: usize) {
        debug_assert!(target >= self.pos, "cursor cannot move backwards");
        while self.pos < target {
            self.advance();
        }
    }

    /// Byte offset of the current character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// 1-based column of the current character.
    #[inline]
    pub(crate) fn column(&self) -> u32 {
        self.column
    }

    /// The unconsumed remainder of the line.
    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// The whole line this cursor walks.
    #[inline]
    pub(crate) fn line(&self) -> &'a str {
        self.src
    }

    /// Returns `true` once every character has been consumed.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }
}
