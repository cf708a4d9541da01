//! Mapping engine that drives one envelope through the pipeline.
//!
//! For each entry: parse the description, check common fields, dispatch on
//! `eventType`, read the kind's fields, then build the record. Any entry-level
//! failure is reported to the diagnostics sink and the batch moves on. Only an
//! envelope decode failure or a store failure stops the batch.

use std::collections::BTreeMap;

use super::context::{FieldTree, ParseFailure};
use super::diagnostics::DiagnosticsSink;
use super::error::{EntrySkip, MapperError};
use super::event::{CommonFields, EventRecord};
use super::registry::EventKind;
use super::util::{event_id, record_key};
use crate::db::RecordStore;
use crate::raw_data::decoding::{decode_envelope, EnvelopeError, RawEventEntry};

/// Terminal state of an entry that was not skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Materialized(EventRecord),
    /// `eventType` names no known kind. Dropped without a diagnostic.
    Unrecognized(String),
}

/// Counts for one processed envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub entries: usize,
    pub materialized: usize,
    pub skipped: usize,
    pub unrecognized: usize,
    pub per_kind: BTreeMap<EventKind, usize>,
}

/// Map a single entry. Pure: no logging, no persistence.
pub fn map_entry(index: usize, entry: &RawEventEntry) -> Result<EntryOutcome, EntrySkip> {
    let description = &entry.description;

    let tree = FieldTree::parse(description).map_err(|failure| match failure {
        ParseFailure::Empty => EntrySkip::EmptyDescription { index },
        ParseFailure::NotAnObject => EntrySkip::NotAnObject {
            index,
            description: description.clone(),
        },
    })?;

    let common =
        CommonFields::extract(&tree).map_err(|faults| EntrySkip::MissingCommonFields {
            index,
            description: description.clone(),
            faults,
        })?;

    let Some(kind) = EventKind::from_discriminator(&common.event_type) else {
        return Ok(EntryOutcome::Unrecognized(common.event_type));
    };

    let event = kind
        .extract(&tree)
        .map_err(|faults| EntrySkip::MissingKindFields {
            kind,
            index,
            description: description.clone(),
            faults,
        })?;

    let id = record_key(&event_id(&common.transaction_hash, index));
    Ok(EntryOutcome::Materialized(EventRecord::new(id, common, event)))
}

/// Map decoded entries in order, reporting skips to `sink`.
pub fn map_entries(
    entries: &[RawEventEntry],
    sink: &mut dyn DiagnosticsSink,
) -> (Vec<EventRecord>, BatchSummary) {
    let mut records = Vec::new();
    let mut summary = BatchSummary {
        entries: entries.len(),
        ..Default::default()
    };

    for (index, entry) in entries.iter().enumerate() {
        match map_entry(index, entry) {
            Ok(EntryOutcome::Materialized(record)) => {
                tracing::debug!(
                    "Materialized {} at index {}: id={}",
                    record.kind(),
                    index,
                    record.id
                );
                summary.materialized += 1;
                *summary.per_kind.entry(record.kind()).or_default() += 1;
                records.push(record);
            }
            Ok(EntryOutcome::Unrecognized(event_type)) => {
                tracing::debug!(
                    "Ignoring unrecognized event type '{}' at index {}",
                    event_type,
                    index
                );
                summary.unrecognized += 1;
            }
            Err(skip) => {
                summary.skipped += 1;
                sink.warn(&skip);
            }
        }
    }

    (records, summary)
}

/// Decode an envelope and map every entry, without persisting anything.
pub fn map_envelope(
    bytes: &[u8],
    sink: &mut dyn DiagnosticsSink,
) -> Result<Vec<EventRecord>, EnvelopeError> {
    let entries = decode_envelope(bytes)?;
    Ok(map_entries(&entries, sink).0)
}

/// Drives envelopes through mapping and into a record store.
pub struct MappingEngine<D: DiagnosticsSink> {
    sink: D,
}

impl<D: DiagnosticsSink> MappingEngine<D> {
    pub fn new(sink: D) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Decode, map, and save one envelope.
    ///
    /// Records are saved in input order after mapping completes, so a decode
    /// failure leaves the store untouched.
    pub fn process(
        &mut self,
        bytes: &[u8],
        store: &mut dyn RecordStore,
    ) -> Result<BatchSummary, MapperError> {
        let entries = decode_envelope(bytes)?;
        tracing::info!("Decoded envelope with {} entries", entries.len());

        let (records, summary) = map_entries(&entries, &mut self.sink);

        for record in &records {
            store.save(record.to_db_operation())?;
        }
        store.flush()?;

        tracing::info!(
            "Batch complete: {} entries, {} materialized, {} skipped, {} unrecognized",
            summary.entries,
            summary.materialized,
            summary.skipped,
            summary.unrecognized
        );
        for (kind, count) in &summary.per_kind {
            tracing::debug!("  {}: {}", kind, count);
        }

        Ok(summary)
    }
}
