//! Core trait for per-kind event payloads.

use crate::db::DbValue;

use super::context::FieldReader;
use super::event::EscrowEvent;
use super::registry::EventKind;

/// A kind-specific payload that can be read from a field tree.
///
/// Implementors read every required field through the `FieldReader` before
/// deciding, so the reader's faults name all offending fields.
pub trait EventPayload: Sized + Into<EscrowEvent> {
    /// The kind this payload materializes.
    const KIND: EventKind;

    /// Read the payload. `None` when any required field is absent or malformed.
    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self>;

    /// Kind-specific columns, in schema order.
    fn columns(&self) -> Vec<(&'static str, DbValue)>;
}
