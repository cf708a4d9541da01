//! Event kind discriminators and the dispatch table from kind to payload reader.

use std::fmt;

use super::context::{FieldFaults, FieldReader, FieldTree};
use super::event::escrow::{
    ArbiterApproved, DepositorApproved, EscrowFunded, EscrowInitialized, EscrowRefunded,
    FundsReleased,
};
use super::event::EscrowEvent;
use super::traits::EventPayload;

/// The closed set of event kinds this mapper materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    DepositorApproved,
    ArbiterApproved,
    EscrowInitialized,
    EscrowRefunded,
    EscrowFunded,
    FundsReleased,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::DepositorApproved,
        EventKind::ArbiterApproved,
        EventKind::EscrowInitialized,
        EventKind::EscrowRefunded,
        EventKind::EscrowFunded,
        EventKind::FundsReleased,
    ];

    /// Resolve an `eventType` discriminator. Unknown values return `None`.
    pub fn from_discriminator(event_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == event_type)
    }

    /// Discriminator string, also used as the entity name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::DepositorApproved => "DepositorApproved",
            EventKind::ArbiterApproved => "ArbiterApproved",
            EventKind::EscrowInitialized => "EscrowInitialized",
            EventKind::EscrowRefunded => "EscrowRefunded",
            EventKind::EscrowFunded => "EscrowFunded",
            EventKind::FundsReleased => "FundsReleased",
        }
    }

    /// Output table for records of this kind.
    pub fn table_name(self) -> &'static str {
        match self {
            EventKind::DepositorApproved => "depositor_approved",
            EventKind::ArbiterApproved => "arbiter_approved",
            EventKind::EscrowInitialized => "escrow_initialized",
            EventKind::EscrowRefunded => "escrow_refunded",
            EventKind::EscrowFunded => "escrow_funded",
            EventKind::FundsReleased => "funds_released",
        }
    }

    /// Read this kind's payload from a tree.
    pub fn extract(self, tree: &FieldTree) -> Result<EscrowEvent, FieldFaults> {
        match self {
            EventKind::DepositorApproved => extract::<DepositorApproved>(tree),
            EventKind::ArbiterApproved => extract::<ArbiterApproved>(tree),
            EventKind::EscrowInitialized => extract::<EscrowInitialized>(tree),
            EventKind::EscrowRefunded => extract::<EscrowRefunded>(tree),
            EventKind::EscrowFunded => extract::<EscrowFunded>(tree),
            EventKind::FundsReleased => extract::<FundsReleased>(tree),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn extract<P: EventPayload>(tree: &FieldTree) -> Result<EscrowEvent, FieldFaults> {
    let mut fields = FieldReader::new(tree);
    match P::from_fields(&mut fields) {
        Some(payload) => Ok(payload.into()),
        None => Err(fields.into_faults()),
    }
}
