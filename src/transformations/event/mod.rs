//! Materialized event records.
//!
//! Add new payload modules here and a matching arm in `EventKind`.

pub mod escrow;

use alloy_primitives::Bytes;

use crate::db::{DbOperation, DbValue};

use self::escrow::{
    ArbiterApproved, DepositorApproved, EscrowFunded, EscrowInitialized, EscrowRefunded,
    FundsReleased,
};
use super::context::{FieldFaults, FieldReader, FieldTree};
use super::registry::EventKind;
use super::traits::EventPayload;
use super::util::BigInt;

/// Fields every entry must carry regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub event_type: String,
    pub block_timestamp: BigInt,
    pub block_number: BigInt,
    pub transaction_hash: Bytes,
}

impl CommonFields {
    pub fn extract(tree: &FieldTree) -> Result<Self, FieldFaults> {
        let mut fields = FieldReader::new(tree);
        let event_type = fields.string("eventType");
        let block_timestamp = fields.big_int("block_timestamp");
        let block_number = fields.big_int("block_number");
        let transaction_hash = fields.bytes("transaction_hash");

        match (event_type, block_timestamp, block_number, transaction_hash) {
            (Some(event_type), Some(block_timestamp), Some(block_number), Some(transaction_hash)) => {
                Ok(Self {
                    event_type,
                    block_timestamp,
                    block_number,
                    transaction_hash,
                })
            }
            _ => Err(fields.into_faults()),
        }
    }
}

/// Kind-specific payload of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscrowEvent {
    DepositorApproved(DepositorApproved),
    ArbiterApproved(ArbiterApproved),
    EscrowInitialized(EscrowInitialized),
    EscrowRefunded(EscrowRefunded),
    EscrowFunded(EscrowFunded),
    FundsReleased(FundsReleased),
}

macro_rules! impl_from_payload {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EscrowEvent {
                fn from(payload: $variant) -> Self {
                    EscrowEvent::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload!(
    DepositorApproved,
    ArbiterApproved,
    EscrowInitialized,
    EscrowRefunded,
    EscrowFunded,
    FundsReleased,
);

impl EscrowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EscrowEvent::DepositorApproved(_) => DepositorApproved::KIND,
            EscrowEvent::ArbiterApproved(_) => ArbiterApproved::KIND,
            EscrowEvent::EscrowInitialized(_) => EscrowInitialized::KIND,
            EscrowEvent::EscrowRefunded(_) => EscrowRefunded::KIND,
            EscrowEvent::EscrowFunded(_) => EscrowFunded::KIND,
            EscrowEvent::FundsReleased(_) => FundsReleased::KIND,
        }
    }

    pub fn columns(&self) -> Vec<(&'static str, DbValue)> {
        match self {
            EscrowEvent::DepositorApproved(p) => p.columns(),
            EscrowEvent::ArbiterApproved(p) => p.columns(),
            EscrowEvent::EscrowInitialized(p) => p.columns(),
            EscrowEvent::EscrowRefunded(p) => p.columns(),
            EscrowEvent::EscrowFunded(p) => p.columns(),
            EscrowEvent::FundsReleased(p) => p.columns(),
        }
    }
}

/// One materialized record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Hex rendering of the derived identity
    pub id: String,
    pub block_number: BigInt,
    pub block_timestamp: BigInt,
    pub transaction_hash: Bytes,
    pub event: EscrowEvent,
}

impl EventRecord {
    pub fn new(id: String, common: CommonFields, event: EscrowEvent) -> Self {
        Self {
            id,
            block_number: common.block_number,
            block_timestamp: common.block_timestamp,
            transaction_hash: common.transaction_hash,
            event,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    /// Render as an upsert keyed on `id`; every other column is overwritten.
    pub fn to_db_operation(&self) -> DbOperation {
        let mut columns = vec![("id", DbValue::Text(self.id.clone()))];
        columns.extend(self.event.columns());
        columns.push(("block_number", DbValue::numeric(self.block_number)));
        columns.push(("block_timestamp", DbValue::numeric(self.block_timestamp)));
        columns.push((
            "transaction_hash",
            DbValue::Bytes(self.transaction_hash.to_vec()),
        ));

        let (names, values): (Vec<String>, Vec<DbValue>) = columns
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .unzip();

        DbOperation::Upsert {
            table: self.kind().table_name().to_string(),
            update_columns: names[1..].to_vec(),
            columns: names,
            values,
            conflict_columns: vec!["id".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_fields_extracted() {
        let tree = FieldTree::parse(
            r#"{"eventType":"EscrowFunded","block_timestamp":"1700","block_number":"42","transaction_hash":"0x1234"}"#,
        )
        .unwrap();
        let common = CommonFields::extract(&tree).unwrap();
        assert_eq!(common.event_type, "EscrowFunded");
        assert_eq!(common.block_timestamp, BigInt::from(1700u64));
        assert_eq!(common.block_number, BigInt::from(42u64));
        assert_eq!(common.transaction_hash, Bytes::from(vec![0x12, 0x34]));
    }

    #[test]
    fn test_common_fields_faults() {
        let tree = FieldTree::parse(
            r#"{"eventType":"EscrowFunded","block_number":"nope","transaction_hash":"0x12"}"#,
        )
        .unwrap();
        let faults = CommonFields::extract(&tree).unwrap_err();
        assert_eq!(faults.missing, vec!["block_timestamp"]);
        assert_eq!(faults.malformed, vec!["block_number"]);
    }

    #[test]
    fn test_to_db_operation() {
        let record = EventRecord::new(
            "abcd".to_string(),
            CommonFields {
                event_type: "FundsReleased".to_string(),
                block_timestamp: BigInt::from(1700u64),
                block_number: BigInt::from(42u64),
                transaction_hash: Bytes::from(vec![0x12, 0x34]),
            },
            FundsReleased {
                escrow_id: BigInt::from(3u64),
                beneficiary: Bytes::from(vec![0xbe]),
                amount: BigInt::from(9u64),
            }
            .into(),
        );

        let op = record.to_db_operation();
        let DbOperation::Upsert {
            table,
            columns,
            conflict_columns,
            update_columns,
            ..
        } = &op;

        assert_eq!(table, "funds_released");
        assert_eq!(
            columns,
            &vec![
                "id",
                "escrow_id",
                "beneficiary",
                "amount",
                "block_number",
                "block_timestamp",
                "transaction_hash"
            ]
        );
        assert_eq!(conflict_columns, &vec!["id".to_string()]);
        assert_eq!(update_columns.len(), columns.len() - 1);
        assert!(!update_columns.contains(&"id".to_string()));
        assert_eq!(op.value("id"), Some(&DbValue::Text("abcd".to_string())));
        assert_eq!(
            op.value("transaction_hash"),
            Some(&DbValue::Bytes(vec![0x12, 0x34]))
        );
    }
}
