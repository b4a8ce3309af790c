//! Fixed-capacity text buffer with silent truncation
//!
//! Log messages are rendered on the stack. When the rendered text does not fit,
//! the buffer keeps the longest prefix that ends on a UTF-8 character boundary
//! and drops the rest. Rendering never fails and never allocates.

use core::fmt;

/// Capacity of the buffer a [`Logger`](crate::Logger) renders messages into
pub const MESSAGE_BUFFER_LEN: usize = 256;

/// Stack buffer implementing [`fmt::Write`] that truncates instead of failing
pub struct MessageBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Render `args` into a fresh buffer
    pub fn format(args: fmt::Arguments<'_>) -> Self {
        let mut buffer = Self::new();
        buffer.write_args(args);
        buffer
    }

    /// Append rendered `args`, truncating if necessary
    pub fn write_args(&mut self, args: fmt::Arguments<'_>) {
        // write_str never reports an error, so neither does write_fmt
        let _ = fmt::Write::write_fmt(self, args);
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in, see push_str
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether any text was dropped since the last [`clear`](Self::clear)
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }

    /// Append `s`, keeping as many whole characters as fit
    pub fn push_str(&mut self, s: &str) {
        let remaining = N - self.len;
        let mut take = s.len().min(remaining);
        if take < s.len() {
            self.truncated = true;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
    }

    /// Append `suffix`, dropping trailing text if needed so the suffix fits
    ///
    /// Used for line terminators and color resets that must survive
    /// truncation of the text before them.
    pub fn terminate(&mut self, suffix: &str) {
        let limit = N - suffix.len().min(N);
        if self.len > limit {
            let text = self.as_str();
            let mut cut = limit;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            self.len = cut;
            self.truncated = true;
        }
        self.push_str(suffix);
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for MessageBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}
