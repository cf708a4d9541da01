//! Transformation system that maps escrow event envelopes to typed records.
//!
//! This module provides:
//! - A field tree with total, typed accessors over event descriptions
//! - A closed set of event kinds, each with a payload reader
//! - Diagnostics sinks for entries that are skipped
//! - An engine that decodes envelopes, maps entries, and saves records
//!
//! # Architecture
//!
//! ```text
//! Envelope ──► decode_envelope ──► RawEventEntry ──► FieldTree ──► CommonFields
//!                                                                    │
//!                     DiagnosticsSink ◄── EntrySkip ◄────────────────┤
//!                                                                    ▼
//!                      RecordStore ◄── DbOperation ◄── EventRecord ◄── EventKind::extract
//! ```
//!
//! # Adding an event kind
//!
//! ```ignore
//! pub struct EscrowDisputed { pub escrow_id: BigInt, pub raised_by: Bytes }
//!
//! impl EventPayload for EscrowDisputed {
//!     const KIND: EventKind = EventKind::EscrowDisputed;
//!
//!     fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
//!         let escrow_id = fields.big_int("escrow_id");
//!         let raised_by = fields.bytes("raised_by");
//!         Some(Self { escrow_id: escrow_id?, raised_by: raised_by? })
//!     }
//!
//!     fn columns(&self) -> Vec<(&'static str, DbValue)> {
//!         vec![
//!             ("escrow_id", DbValue::numeric(self.escrow_id)),
//!             ("raised_by", DbValue::Bytes(self.raised_by.to_vec())),
//!         ]
//!     }
//! }
//! ```
//!
//! Then add the variant to `EventKind` and `EscrowEvent`; the compiler
//! points at every match that needs a new arm.

pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod event;
pub mod registry;
pub mod traits;
pub mod util;

// Re-exports for convenience
pub use context::{FieldFault, FieldFaults, FieldReader, FieldTree, FieldValue, ParseFailure};
pub use diagnostics::{CollectingSink, DiagnosticsSink, TracingSink};
pub use engine::{map_entries, map_entry, map_envelope, BatchSummary, EntryOutcome, MappingEngine};
pub use error::{EntrySkip, MapperError};
pub use event::{CommonFields, EscrowEvent, EventRecord};
pub use registry::EventKind;
pub use traits::EventPayload;
pub use util::BigInt;
