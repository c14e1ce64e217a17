use thiserror::Error;

/// Structural failures that abort an export.
///
/// Everything else (unknown condition kinds, malformed parameters) degrades
/// to a no-op; only these surface to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("item '{item}' has no name")]
    MissingName { item: String },

    #[error("item '{item}' has no usable key; use letters or digits in its name or key")]
    InvalidKey { item: String },

    #[error("duplicate item key '{key}'")]
    DuplicateKey { key: String },

    #[error("item '{item}' reads offset slot '{slot}' but never declares it")]
    UndeclaredOffsetSlot { item: String, slot: String },

    #[error("item '{item}' reads offset {offset} from slot '{slot}', which also holds another value")]
    ConflictingOffsetSlot {
        item: String,
        slot: String,
        offset: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_message() {
        let err = ExportError::MissingName { item: "j1".into() };
        assert_eq!(err.to_string(), "item 'j1' has no name");
    }

    #[test]
    fn invalid_key_message() {
        let err = ExportError::InvalidKey { item: "!!!".into() };
        assert_eq!(
            err.to_string(),
            "item '!!!' has no usable key; use letters or digits in its name or key"
        );
    }

    #[test]
    fn duplicate_key_message() {
        let err = ExportError::DuplicateKey {
            key: "lucky_cat".into(),
        };
        assert_eq!(err.to_string(), "duplicate item key 'lucky_cat'");
    }

    #[test]
    fn undeclared_offset_slot_message() {
        let err = ExportError::UndeclaredOffsetSlot {
            item: "Banker".into(),
            slot: "playermoney".into(),
        };
        assert_eq!(
            err.to_string(),
            "item 'Banker' reads offset slot 'playermoney' but never declares it"
        );
    }

    #[test]
    fn conflicting_offset_slot_message() {
        let err = ExportError::ConflictingOffsetSlot {
            item: "Banker".into(),
            slot: "ante".into(),
            offset: "10".into(),
        };
        assert_eq!(
            err.to_string(),
            "item 'Banker' reads offset 10 from slot 'ante', which also holds another value"
        );
    }
}
