use thiserror::Error;
use winnow::error::{ContextError, StrContext};

/// A value encoding that names a prefix but cannot be decoded.
///
/// Carries the (trimmed) input, the byte offset where decoding stopped and
/// what the grammar expected there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed encoding '{input}' at column {}: expected {expected}", .offset + 1)]
pub struct ParseError {
    input: String,
    offset: usize,
    expected: String,
}

impl ParseError {
    pub(crate) fn from_winnow(err: &winnow::error::ParseError<&str, ContextError>) -> Self {
        // Innermost context first.
        let expected = err
            .inner()
            .context()
            .find_map(|c| match c {
                StrContext::Expected(value) => Some(value.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| "a value encoding".to_owned());
        Self {
            input: (*err.input()).to_owned(),
            offset: err.offset(),
            expected,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset into [`input`](Self::input) where decoding failed.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}
