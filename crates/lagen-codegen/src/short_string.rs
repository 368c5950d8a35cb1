//! Bounded text buffer for derived names
//!
//! Names are rendered into a fixed-capacity buffer. Rendering something that
//! does not fit is an error, never a silently shortened name.

use crate::error::{CodegenError, Result};
use std::fmt;

/// Bytes available to a [`ShortString`], including the reserved terminator slot
pub const SHORT_STRING_CAPACITY: usize = 128;

/// Small inline string with a hard length limit of `SHORT_STRING_CAPACITY - 1` bytes
#[derive(Clone, Copy)]
pub struct ShortString {
    data: [u8; SHORT_STRING_CAPACITY],
    len: usize,
}

impl ShortString {
    /// Longest text that fits
    pub const MAX_LEN: usize = SHORT_STRING_CAPACITY - 1;

    pub const fn new() -> Self {
        Self {
            data: [0; SHORT_STRING_CAPACITY],
            len: 0,
        }
    }

    /// Render formatting arguments, failing if the result does not fit
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self> {
        let mut writer = BoundedWriter {
            buf: Self::new(),
            needed: 0,
        };
        // The writer never fails, so an error here comes from a `Display` impl
        fmt::write(&mut writer, args).map_err(|_| CodegenError::Format)?;
        if writer.needed > Self::MAX_LEN {
            return Err(CodegenError::Truncated {
                capacity: SHORT_STRING_CAPACITY,
                needed: writer.needed + 1,
            });
        }
        Ok(writer.buf)
    }

    pub fn as_str(&self) -> &str {
        // Only whole `&str` pieces are ever copied in, so the prefix is valid UTF-8.
        std::str::from_utf8(&self.data[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ShortString {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShortString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ShortString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq for ShortString {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ShortString {}

impl PartialEq<str> for ShortString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ShortString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AsRef<str> for ShortString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Copies while there is room and keeps counting after that, so an overflow
/// can report the full size the text needed.
struct BoundedWriter {
    buf: ShortString,
    needed: usize,
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let start = self.needed;
        self.needed += s.len();
        if self.needed <= ShortString::MAX_LEN {
            self.buf.data[start..self.needed].copy_from_slice(s.as_bytes());
            self.buf.len = self.needed;
        }
        Ok(())
    }
}

/// Format into a [`ShortString`], returning `Err(CodegenError::Truncated)` on overflow
///
/// ```
/// use lagen_codegen::short_format;
///
/// let name = short_format!("V{}{}", 3, "f").unwrap();
/// assert_eq!(name, "V3f");
/// ```
#[macro_export]
macro_rules! short_format {
    ($($arg:tt)*) => {
        $crate::short_string::ShortString::format(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fits() {
        let s = short_format!("{}_{}", "v2f", "sum").unwrap();
        assert_eq!(s.as_str(), "v2f_sum");
        assert_eq!(s.len(), 7);
        assert_eq!(s.to_string(), "v2f_sum");
    }

    #[test]
    fn test_exact_limit_fits() {
        let text = "x".repeat(ShortString::MAX_LEN);
        let s = short_format!("{}", text).unwrap();
        assert_eq!(s.len(), ShortString::MAX_LEN);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let text = "x".repeat(SHORT_STRING_CAPACITY);
        match short_format!("{}", text) {
            Err(CodegenError::Truncated { capacity, needed }) => {
                assert_eq!(capacity, SHORT_STRING_CAPACITY);
                assert_eq!(needed, SHORT_STRING_CAPACITY + 1);
            }
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflow_counts_every_piece() {
        let half = "y".repeat(100);
        let err = short_format!("{}{}{}", half, half, half).unwrap_err();
        assert!(matches!(err, CodegenError::Truncated { needed: 301, .. }));
    }

    #[test]
    fn test_failing_display_is_not_truncation() {
        struct Unprintable;

        impl fmt::Display for Unprintable {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let err = short_format!("v{}", Unprintable).unwrap_err();
        assert!(matches!(err, CodegenError::Format));
    }

    #[test]
    fn test_empty() {
        let s = ShortString::default();
        assert!(s.is_empty());
        assert_eq!(s, "");
    }
}
