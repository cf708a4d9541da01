//! Escrow contract event payloads.
//!
//! Field keys follow the contract's event descriptions (snake_case);
//! struct fields follow the output schema.

use alloy_primitives::Bytes;

use crate::db::DbValue;
use crate::transformations::context::FieldReader;
use crate::transformations::registry::EventKind;
use crate::transformations::traits::EventPayload;
use crate::transformations::util::BigInt;

fn bytes(value: &Bytes) -> DbValue {
    DbValue::Bytes(value.to_vec())
}

/// A depositor approved release of an escrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositorApproved {
    pub depositor: Bytes,
    pub escrow_id: BigInt,
    pub time_of_approval: BigInt,
}

impl EventPayload for DepositorApproved {
    const KIND: EventKind = EventKind::DepositorApproved;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let depositor = fields.bytes("depositor");
        let escrow_id = fields.big_int("escrow_id");
        let time_of_approval = fields.big_int("time_of_approval");

        Some(Self {
            depositor: depositor?,
            escrow_id: escrow_id?,
            time_of_approval: time_of_approval?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("depositor", bytes(&self.depositor)),
            ("escrow_id", DbValue::numeric(self.escrow_id)),
            ("time_of_approval", DbValue::numeric(self.time_of_approval)),
        ]
    }
}

/// An arbiter approved release of an escrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbiterApproved {
    pub arbiter: Bytes,
    pub escrow_id: BigInt,
    pub time_of_approval: BigInt,
}

impl EventPayload for ArbiterApproved {
    const KIND: EventKind = EventKind::ArbiterApproved;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let arbiter = fields.bytes("arbiter");
        let escrow_id = fields.big_int("escrow_id");
        let time_of_approval = fields.big_int("time_of_approval");

        Some(Self {
            arbiter: arbiter?,
            escrow_id: escrow_id?,
            time_of_approval: time_of_approval?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("arbiter", bytes(&self.arbiter)),
            ("escrow_id", DbValue::numeric(self.escrow_id)),
            ("time_of_approval", DbValue::numeric(self.time_of_approval)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowInitialized {
    pub escrow_id: BigInt,
    pub beneficiary: Bytes,
    pub provider: Bytes,
    pub amount: BigInt,
    pub timestamp: BigInt,
}

impl EventPayload for EscrowInitialized {
    const KIND: EventKind = EventKind::EscrowInitialized;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let escrow_id = fields.big_int("escrow_id");
        let beneficiary = fields.bytes("beneficiary");
        let provider = fields.bytes("provider");
        let amount = fields.big_int("amount");
        let timestamp = fields.big_int("timestamp");

        Some(Self {
            escrow_id: escrow_id?,
            beneficiary: beneficiary?,
            provider: provider?,
            amount: amount?,
            timestamp: timestamp?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("escrow_id", DbValue::numeric(self.escrow_id)),
            ("beneficiary", bytes(&self.beneficiary)),
            ("provider", bytes(&self.provider)),
            ("amount", DbValue::numeric(self.amount)),
            ("timestamp", DbValue::numeric(self.timestamp)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowRefunded {
    pub escrow_id: BigInt,
    pub depositor: Bytes,
    pub amount: BigInt,
    pub timestamp: BigInt,
}

impl EventPayload for EscrowRefunded {
    const KIND: EventKind = EventKind::EscrowRefunded;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let escrow_id = fields.big_int("escrow_id");
        let depositor = fields.bytes("depositor");
        let amount = fields.big_int("amount");
        let timestamp = fields.big_int("timestamp");

        Some(Self {
            escrow_id: escrow_id?,
            depositor: depositor?,
            amount: amount?,
            timestamp: timestamp?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("escrow_id", DbValue::numeric(self.escrow_id)),
            ("depositor", bytes(&self.depositor)),
            ("amount", DbValue::numeric(self.amount)),
            ("timestamp", DbValue::numeric(self.timestamp)),
        ]
    }
}

/// Funds deposited into an escrow contract. Not tied to an escrow id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowFunded {
    pub depositor: Bytes,
    pub amount: BigInt,
    pub escrow_address: Bytes,
}

impl EventPayload for EscrowFunded {
    const KIND: EventKind = EventKind::EscrowFunded;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let depositor = fields.bytes("depositor");
        let amount = fields.big_int("amount");
        let escrow_address = fields.bytes("escrow_address");

        Some(Self {
            depositor: depositor?,
            amount: amount?,
            escrow_address: escrow_address?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("depositor", bytes(&self.depositor)),
            ("amount", DbValue::numeric(self.amount)),
            ("escrow_address", bytes(&self.escrow_address)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundsReleased {
    pub escrow_id: BigInt,
    pub beneficiary: Bytes,
    pub amount: BigInt,
}

impl EventPayload for FundsReleased {
    const KIND: EventKind = EventKind::FundsReleased;

    fn from_fields(fields: &mut FieldReader<'_>) -> Option<Self> {
        let escrow_id = fields.big_int("escrow_id");
        let beneficiary = fields.bytes("beneficiary");
        let amount = fields.big_int("amount");

        Some(Self {
            escrow_id: escrow_id?,
            beneficiary: beneficiary?,
            amount: amount?,
        })
    }

    fn columns(&self) -> Vec<(&'static str, DbValue)> {
        vec![
            ("escrow_id", DbValue::numeric(self.escrow_id)),
            ("beneficiary", bytes(&self.beneficiary)),
            ("amount", DbValue::numeric(self.amount)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformations::context::FieldTree;

    fn read<P: EventPayload>(json: &str) -> (Option<P>, Vec<&'static str>) {
        let tree = FieldTree::parse(json).unwrap();
        let mut fields = FieldReader::new(&tree);
        let payload = P::from_fields(&mut fields);
        let faults = fields.into_faults();
        let mut bad = faults.missing;
        bad.extend(faults.malformed);
        (payload, bad)
    }

    #[test]
    fn test_depositor_approved() {
        let (payload, bad) = read::<DepositorApproved>(
            r#"{"depositor":"0x0a","escrow_id":"1","time_of_approval":"1700000000"}"#,
        );
        let payload = payload.unwrap();
        assert!(bad.is_empty());
        assert_eq!(payload.depositor, Bytes::from(vec![0x0a]));
        assert_eq!(payload.escrow_id, BigInt::from(1u64));
        assert_eq!(payload.time_of_approval, BigInt::from(1_700_000_000u64));
    }

    #[test]
    fn test_arbiter_approved_missing_arbiter() {
        let (payload, bad) =
            read::<ArbiterApproved>(r#"{"escrow_id":"1","time_of_approval":"2"}"#);
        assert!(payload.is_none());
        assert_eq!(bad, vec!["arbiter"]);
    }

    #[test]
    fn test_escrow_refunded_reports_every_bad_field() {
        let (payload, bad) =
            read::<EscrowRefunded>(r#"{"escrow_id":"x","depositor":"0x01"}"#);
        assert!(payload.is_none());
        assert_eq!(bad, vec!["amount", "timestamp", "escrow_id"]);
    }

    #[test]
    fn test_escrow_funded_columns_in_schema_order() {
        let (payload, _) = read::<EscrowFunded>(
            r#"{"depositor":"0xab","amount":"100","escrow_address":"0xcd"}"#,
        );
        let names: Vec<_> = payload.unwrap().columns().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["depositor", "amount", "escrow_address"]);
    }

    #[test]
    fn test_escrow_initialized_columns() {
        let (payload, bad) = read::<EscrowInitialized>(
            r#"{"escrow_id":"5","beneficiary":"0x01","provider":"0x02","amount":"7","timestamp":"8"}"#,
        );
        assert!(bad.is_empty());
        let columns = payload.unwrap().columns();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[2], ("provider", DbValue::Bytes(vec![0x02])));
        assert_eq!(columns[3], ("amount", DbValue::Numeric("7".to_string())));
    }

    #[test]
    fn test_funds_released_ignores_extra_fields() {
        let (payload, bad) = read::<FundsReleased>(
            r#"{"escrow_id":"5","beneficiary":"0x01","amount":"7","note":"extra"}"#,
        );
        assert!(bad.is_empty());
        assert_eq!(payload.unwrap().amount, BigInt::from(7u64));
    }

    #[test]
    fn test_negative_amount_is_kept() {
        let (payload, bad) = read::<EscrowRefunded>(
            r#"{"escrow_id":"5","depositor":"0x01","amount":"-250","timestamp":"8"}"#,
        );
        assert!(bad.is_empty());
        let payload = payload.unwrap();
        assert!(payload.amount.is_negative());
        assert_eq!(payload.columns()[2], ("amount", DbValue::Numeric("-250".to_string())));
    }
}
