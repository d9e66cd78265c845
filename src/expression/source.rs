//! Character sources
//!
//! A [`CharSource`] is a forward-only cursor over text with bounded
//! lookahead. It is the only thing the lexical layer reads from.

/// Forward-only character cursor with lookahead
pub trait CharSource {
    /// Whether at least one unconsumed character remains
    fn has_next(&self) -> bool;

    /// Whether at least `length` unconsumed characters remain
    fn has_next_n(&self, length: usize) -> bool;

    /// Look at the `offset`-th unconsumed character without consuming it.
    ///
    /// Offsets are 1-based: `peek_at(1)` is what `next()` would return.
    /// Returns `None` for offset 0 or past the end of input.
    fn peek_at(&self, offset: usize) -> Option<char>;

    /// Consume and return the next character, `None` past the end of input
    fn next(&mut self) -> Option<char>;

    /// Byte offset of the next unconsumed character
    fn offset(&self) -> usize;
}

/// [`CharSource`] over a borrowed string
#[derive(Debug, Clone)]
pub struct StringSource<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> StringSource<'a> {
    /// Create a source positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The full underlying text
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}

impl CharSource for StringSource<'_> {
    #[inline]
    fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }

    fn has_next_n(&self, length: usize) -> bool {
        length == 0 || self.rest().chars().nth(length - 1).is_some()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        if offset == 0 {
            return None;
        }
        self.rest().chars().nth(offset - 1)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    #[inline]
    fn offset(&self) -> usize {
        self.pos
    }
}
