//! Mapping error types.
//!
//! `EntrySkip` is recoverable and scoped to one entry; its `Display` is the
//! diagnostic line. `MapperError` is batch-fatal.

use thiserror::Error;

use super::context::FieldFaults;
use super::registry::EventKind;
use crate::db::DbError;
use crate::raw_data::decoding::EnvelopeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntrySkip {
    #[error("Empty JSON string at index {index}")]
    EmptyDescription { index: usize },

    #[error("JSON is not an object for event at index {index}: {description}")]
    NotAnObject { index: usize, description: String },

    #[error("Missing required fields in event at index {index}: {description}")]
    MissingCommonFields {
        index: usize,
        description: String,
        faults: FieldFaults,
    },

    #[error("Missing {kind} fields at index {index}: {description}")]
    MissingKindFields {
        kind: EventKind,
        index: usize,
        description: String,
        faults: FieldFaults,
    },
}

impl EntrySkip {
    /// Position of the skipped entry in its envelope.
    pub fn index(&self) -> usize {
        match self {
            EntrySkip::EmptyDescription { index }
            | EntrySkip::NotAnObject { index, .. }
            | EntrySkip::MissingCommonFields { index, .. }
            | EntrySkip::MissingKindFields { index, .. } => *index,
        }
    }

    /// Kind being validated when the entry was skipped, if known.
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            EntrySkip::MissingKindFields { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Field-level faults behind a missing-fields skip.
    pub fn faults(&self) -> Option<&FieldFaults> {
        match self {
            EntrySkip::MissingCommonFields { faults, .. }
            | EntrySkip::MissingKindFields { faults, .. } => Some(faults),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_skip_messages() {
        let empty = EntrySkip::EmptyDescription { index: 4 };
        assert_eq!(empty.to_string(), "Empty JSON string at index 4");
        assert_eq!(empty.index(), 4);
        assert!(empty.faults().is_none());

        let not_object = EntrySkip::NotAnObject {
            index: 1,
            description: "[1]".to_string(),
        };
        assert_eq!(
            not_object.to_string(),
            "JSON is not an object for event at index 1: [1]"
        );

        let missing = EntrySkip::MissingKindFields {
            kind: EventKind::EscrowInitialized,
            index: 7,
            description: "{}".to_string(),
            faults: FieldFaults {
                missing: vec!["amount"],
                malformed: vec![],
            },
        };
        assert_eq!(
            missing.to_string(),
            "Missing EscrowInitialized fields at index 7: {}"
        );
        assert_eq!(missing.kind(), Some(EventKind::EscrowInitialized));
        assert_eq!(missing.faults().unwrap().missing, vec!["amount"]);
    }

    #[test]
    fn test_mapper_error_from_db() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: MapperError = DbError::from(io_err).into();
        assert!(matches!(err, MapperError::Database(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
