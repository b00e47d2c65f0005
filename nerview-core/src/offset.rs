//! Character offset handling.
//!
//! Annotation offsets are counted in Unicode scalar values (`char`s), the
//! same unit Python string indices use on the backend side. Rust strings are
//! indexed by byte, so every slice goes through a char → byte table.
//!
//! ```text
//!   Text:  "café €5"
//!
//!   char:   c  a  f  é     €        5
//!           0  1  2  3  4  5        6
//!   byte:   0  1  2  3  5  6        9
//!                    └2┘   └─3 ──┘
//! ```
//!
//! For ASCII text both tables are the identity and are never built.

/// Char ↔ byte index over one source text.
///
/// Pre-computes the mapping once so every slice is O(1).
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    char_to_byte: Vec<usize>,
    char_len: usize,
}

impl<'a> CharIndex<'a> {
    /// Build the index for `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        if text.is_ascii() {
            return Self {
                text,
                char_to_byte: Vec::new(),
                char_len: text.len(),
            };
        }

        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let char_len = char_to_byte.len();
        char_to_byte.push(text.len());

        Self {
            text,
            char_to_byte,
            char_len,
        }
    }

    /// The indexed text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the text in chars.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether the text is pure ASCII (char and byte offsets coincide).
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.char_to_byte.is_empty()
    }

    /// Byte offset of a char offset, `None` past the end of the text.
    #[must_use]
    pub fn char_to_byte(&self, char_idx: usize) -> Option<usize> {
        if char_idx > self.char_len {
            return None;
        }
        if self.is_ascii() {
            Some(char_idx)
        } else {
            self.char_to_byte.get(char_idx).copied()
        }
    }

    /// Char offset of a byte offset that lies on a char boundary.
    #[must_use]
    pub fn byte_to_char(&self, byte_idx: usize) -> Option<usize> {
        if self.is_ascii() {
            return (byte_idx <= self.text.len()).then_some(byte_idx);
        }
        self.char_to_byte.binary_search(&byte_idx).ok()
    }

    /// Slice `[start, end)` in char offsets.
    ///
    /// Returns `None` when the range is inverted or runs past the text.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let b_start = self.char_to_byte(start)?;
        let b_end = self.char_to_byte(end)?;
        self.text.get(b_start..b_end)
    }
}
