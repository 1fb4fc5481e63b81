//! Cursor-based text scanning.
//!
//! This module provides a small lexer over an immutable string. The cursor only
//! ever lands on character boundaries, so scanning stays correct on multi-byte
//! text. Positions can be saved and restored explicitly, which the record
//! splitter relies on to re-scan a block once its first key has been confirmed.

/// An opaque position inside a [`Scanner`]'s source text.
///
/// A cursor is only meaningful for the scanner that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(usize);

/// A forward-moving scanner over a borrowed string.
///
/// # Examples
///
/// ```
/// use uti::lexer::Scanner;
///
/// let mut scanner = Scanner::new("type id: public.data");
/// assert_eq!(scanner.scan_up_to(":"), Some("type id"));
/// assert_eq!(scanner.peek_next(), Some(':'));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the text that has not been consumed yet.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Returns the next character without moving the cursor.
    pub fn peek_next(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advances the cursor by one character. Does nothing at the end of input.
    pub fn skip_one(&mut self) {
        if let Some(c) = self.peek_next() {
            self.position += c.len_utf8();
        }
    }

    /// Skips `count` characters and then one more.
    ///
    /// Callers pass the length of a delimiter line and rely on the extra step
    /// to also consume the line break that follows it. Overrunning the input
    /// leaves the cursor at the end.
    pub fn skip_n(&mut self, count: usize) {
        let rest = self.remaining();
        self.position = match rest.char_indices().nth(count.saturating_add(1)) {
            Some((offset, _)) => self.position + offset,
            None => self.source.len(),
        };
    }

    /// Consumes and returns everything up to, but not including, the next
    /// occurrence of `delimiter`.
    ///
    /// If `delimiter` never occurs the rest of the input is consumed and
    /// returned, so the following call observes [`Scanner::at_end`].
    ///
    /// # Returns
    ///
    /// `None` when nothing was consumed: the cursor is already at the end of
    /// input or sitting directly on `delimiter`.
    pub fn scan_up_to(&mut self, delimiter: &str) -> Option<&'a str> {
        let rest = self.remaining();
        let len = if delimiter.is_empty() {
            rest.len()
        } else {
            rest.find(delimiter).unwrap_or(rest.len())
        };

        if len == 0 {
            return None;
        }

        self.position += len;
        Some(&rest[..len])
    }

    /// Saves the current position.
    pub fn cursor(&self) -> Cursor {
        Cursor(self.position)
    }

    /// Moves back (or forward) to a previously saved position.
    pub fn restore(&mut self, cursor: Cursor) {
        debug_assert!(self.source.is_char_boundary(cursor.0));
        self.position = cursor.0.min(self.source.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_advance() {
        let scanner = Scanner::new("ab");

        assert_eq!(scanner.peek_next(), Some('a'));
        assert_eq!(scanner.peek_next(), Some('a'));
        assert!(!scanner.at_end());
    }

    #[test]
    fn test_peek_at_end() {
        let scanner = Scanner::new("");

        assert_eq!(scanner.peek_next(), None);
        assert!(scanner.at_end());
    }

    #[test]
    fn test_skip_one_multibyte() {
        let mut scanner = Scanner::new("éx");

        scanner.skip_one();
        assert_eq!(scanner.peek_next(), Some('x'));

        scanner.skip_one();
        scanner.skip_one();
        assert!(scanner.at_end());
    }

    #[test]
    fn test_skip_n_skips_one_extra() {
        let mut scanner = Scanner::new("----\nnext");

        scanner.skip_n(4);
        assert_eq!(scanner.remaining(), "next");
    }

    #[test]
    fn test_skip_n_overrun_stops_at_end() {
        let mut scanner = Scanner::new("abc");

        scanner.skip_n(10);
        assert!(scanner.at_end());
        assert_eq!(scanner.peek_next(), None);
    }

    #[test]
    fn test_skip_n_max_count_stops_at_end() {
        let mut scanner = Scanner::new("abc");

        scanner.skip_n(usize::MAX);
        assert!(scanner.at_end());
    }

    #[test]
    fn test_skip_n_counts_characters_not_bytes() {
        let mut scanner = Scanner::new("ééé|rest");

        scanner.skip_n(3);
        assert_eq!(scanner.remaining(), "rest");
    }

    #[test]
    fn test_scan_up_to_stops_before_delimiter() {
        let mut scanner = Scanner::new("key: value");

        assert_eq!(scanner.scan_up_to(":"), Some("key"));
        assert_eq!(scanner.peek_next(), Some(':'));
    }

    #[test]
    fn test_scan_up_to_on_delimiter_consumes_nothing() {
        let mut scanner = Scanner::new(":value");

        assert_eq!(scanner.scan_up_to(":"), None);
        assert_eq!(scanner.cursor(), Cursor(0));
    }

    #[test]
    fn test_scan_up_to_missing_delimiter_takes_tail() {
        let mut scanner = Scanner::new("no separator here");

        assert_eq!(scanner.scan_up_to(":"), Some("no separator here"));
        assert!(scanner.at_end());
        assert_eq!(scanner.scan_up_to(":"), None);
    }

    #[test]
    fn test_restore_rewinds() {
        let mut scanner = Scanner::new("type id: x\nmore");
        let start = scanner.cursor();

        scanner.scan_up_to(":");
        assert_ne!(scanner.cursor(), start);

        scanner.restore(start);
        assert_eq!(scanner.remaining(), "type id: x\nmore");
    }
}
