//! # Bounded Text
//!
//! A fixed-capacity, inline string used by the description components.
//! Overlong input is truncated at a character boundary; the buffer never
//! allocates, so description records stay flat, copyable data.

use std::fmt;

/// Inline text buffer of at most `N` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedText<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedText<N> {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Replaces the contents, truncating at the last character boundary
    /// that fits in `N` bytes.
    pub fn set(&mut self, text: &str) {
        let mut end = text.len().min(N);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.buf = [0; N];
        self.buf[..end].copy_from_slice(&text.as_bytes()[..end]);
        self.len = end;
    }

    /// The stored text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // The buffer only ever holds a prefix copied from a &str, cut at
        // a character boundary.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Stored length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum capacity in bytes.
    #[must_use]
    pub const fn capacity() -> usize {
        N
    }
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<&str> for FixedText<N> {
    fn from(text: &str) -> Self {
        let mut fixed = Self::new();
        fixed.set(text);
        fixed
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
