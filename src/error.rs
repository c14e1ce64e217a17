use thiserror::Error;

use crate::parse::ParseError;
use crate::types::ExportError;

/// Unified error type covering encoding parsing, export, and I/O.
///
/// Returned by [`CompiledMod::write_to()`](crate::CompiledMod::write_to) and
/// usable with `?` anywhere the narrower errors appear.
#[derive(Debug, Error)]
pub enum JokercError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_errors_pass_through() {
        let err: JokercError = ExportError::DuplicateKey { key: "cat".into() }.into();
        assert_eq!(err.to_string(), "duplicate item key 'cat'");
        assert!(matches!(err, JokercError::Export(_)));
    }

    #[test]
    fn parse_errors_convert() {
        let err: JokercError = crate::parse::parse_encoding("GAMEVAR:|2").unwrap_err().into();
        assert!(matches!(err, JokercError::Parse(_)));
    }
}
