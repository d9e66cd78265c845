//! Lexical primitives
//!
//! [`BaseParser`] keeps one character of lookahead over a [`CharSource`] and
//! offers single-character, literal-string and character-range recognizers.
//! It knows nothing about the expression grammar.

use super::error::{SyntaxError, SyntaxErrorKind};
use super::source::CharSource;
use super::source_location::SourcePosition;

/// One-character-lookahead recognizer over a [`CharSource`]
#[derive(Debug, Clone)]
pub struct BaseParser<S: CharSource> {
    source: S,
    /// Current lookahead, `None` once input is exhausted
    current: Option<char>,
    /// Position of `current`
    position: SourcePosition,
}

impl<S: CharSource> BaseParser<S> {
    /// Create a parser and prime the lookahead with the first character
    pub fn new(mut source: S) -> Self {
        let current = source.next();
        Self {
            source,
            current,
            position: SourcePosition::start(),
        }
    }

    /// The lookahead character (`None` at end of input)
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Position of the lookahead character
    #[inline]
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Build a syntax error at the lookahead position
    pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.position)
    }

    /// Does the lookahead equal `c`?
    #[inline]
    pub fn test(&self, c: char) -> bool {
        self.current == Some(c)
    }

    /// Does the upcoming input start with `s`? Never consumes.
    pub fn test_str(&self, s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            None => true,
            Some(first) if self.test(first) => chars
                .enumerate()
                .all(|(i, expected)| self.source.peek_at(i + 1) == Some(expected)),
            Some(_) => false,
        }
    }

    /// Consume the lookahead and return it
    pub fn take(&mut self) -> Option<char> {
        let taken = self.current;
        if let Some(c) = taken {
            self.position.offset += c.len_utf8();
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.current = self.source.next();
        taken
    }

    /// Consume the lookahead if it equals `c`
    pub fn take_char(&mut self, c: char) -> bool {
        if self.test(c) {
            self.take();
            true
        } else {
            false
        }
    }

    /// Consume `s` if the upcoming input starts with it
    pub fn take_str(&mut self, s: &str) -> bool {
        if !self.test_str(s) {
            return false;
        }
        for _ in s.chars() {
            self.take();
        }
        true
    }

    /// Consume `c` or fail with [`SyntaxErrorKind::UnexpectedSymbol`]
    pub fn expect(&mut self, c: char) -> Result<(), SyntaxError> {
        if self.take_char(c) {
            Ok(())
        } else {
            Err(self.error(SyntaxErrorKind::UnexpectedSymbol {
                expected: c.to_string(),
                found: self.current,
            }))
        }
    }

    /// Consume `s` or fail without consuming anything.
    ///
    /// The error is reported where `s` was expected to start and names the
    /// first mismatching character.
    pub fn expect_str(&mut self, s: &str) -> Result<(), SyntaxError> {
        if self.take_str(s) {
            return Ok(());
        }
        let found = s
            .chars()
            .enumerate()
            .find_map(|(i, expected)| {
                let actual = if i == 0 {
                    self.current
                } else {
                    self.source.peek_at(i)
                };
                (actual != Some(expected)).then_some(actual)
            })
            .flatten();
        Err(self.error(SyntaxErrorKind::UnexpectedSymbol {
            expected: s.to_string(),
            found,
        }))
    }

    /// Is the lookahead within `lo..=hi`?
    #[inline]
    pub fn between(&self, lo: char, hi: char) -> bool {
        matches!(self.current, Some(c) if lo <= c && c <= hi)
    }

    /// Is the input exhausted?
    #[inline]
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Skip whitespace characters
    pub fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(c) if c.is_whitespace()) {
            self.take();
        }
    }
}
