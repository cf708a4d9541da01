use serde_json::{Map, Value as JsonValue};

use crate::transformations::util::BigInt;

/// A value that can be stored by a record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbValue {
    /// Text (record identities)
    Text(String),
    /// Numeric string for big integers (stored as NUMERIC)
    Numeric(String),
    /// Raw bytes (addresses, hashes)
    Bytes(Vec<u8>),
}

impl DbValue {
    /// Create a numeric value from a signed big integer.
    pub fn numeric(value: BigInt) -> Self {
        DbValue::Numeric(value.to_string())
    }

    /// Render as JSON. Bytes become `0x`-prefixed hex, numerics stay decimal strings.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DbValue::Text(s) | DbValue::Numeric(s) => JsonValue::String(s.clone()),
            DbValue::Bytes(b) => JsonValue::String(format!("0x{}", hex::encode(b))),
        }
    }
}

/// Database operation produced for each materialized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbOperation {
    /// INSERT with ON CONFLICT DO UPDATE (upsert)
    Upsert {
        table: String,
        columns: Vec<String>,
        values: Vec<DbValue>,
        /// Columns that form the unique constraint
        conflict_columns: Vec<String>,
        /// Columns to update on conflict
        update_columns: Vec<String>,
    },
}

impl DbOperation {
    pub fn table(&self) -> &str {
        match self {
            DbOperation::Upsert { table, .. } => table,
        }
    }

    /// Value of a named column, if the operation carries it.
    pub fn value(&self, column: &str) -> Option<&DbValue> {
        match self {
            DbOperation::Upsert {
                columns, values, ..
            } => columns
                .iter()
                .position(|c| c == column)
                .and_then(|i| values.get(i)),
        }
    }

    /// Values of the conflict columns, in declaration order.
    pub fn conflict_key(&self) -> Vec<DbValue> {
        match self {
            DbOperation::Upsert {
                conflict_columns, ..
            } => conflict_columns
                .iter()
                .filter_map(|c| self.value(c).cloned())
                .collect(),
        }
    }

    /// Non-key columns as a JSON object.
    pub fn fields_json(&self) -> Map<String, JsonValue> {
        match self {
            DbOperation::Upsert {
                columns,
                values,
                conflict_columns,
                ..
            } => columns
                .iter()
                .zip(values)
                .filter(|(c, _)| !conflict_columns.contains(c))
                .map(|(c, v)| (c.clone(), v.to_json()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_op() -> DbOperation {
        DbOperation::Upsert {
            table: "escrow_funded".to_string(),
            columns: vec!["id".to_string(), "amount".to_string(), "depositor".to_string()],
            values: vec![
                DbValue::Text("abcd".to_string()),
                DbValue::numeric(BigInt::from(100u64)),
                DbValue::Bytes(vec![0xab]),
            ],
            conflict_columns: vec!["id".to_string()],
            update_columns: vec!["amount".to_string(), "depositor".to_string()],
        }
    }

    #[test]
    fn test_value_lookup() {
        let op = sample_op();
        assert_eq!(op.table(), "escrow_funded");
        assert_eq!(op.value("amount"), Some(&DbValue::Numeric("100".to_string())));
        assert_eq!(op.value("missing"), None);
        assert_eq!(op.conflict_key(), vec![DbValue::Text("abcd".to_string())]);
    }

    #[test]
    fn test_fields_json_excludes_key() {
        let fields = sample_op().fields_json();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["amount"], JsonValue::String("100".to_string()));
        assert_eq!(fields["depositor"], JsonValue::String("0xab".to_string()));
        assert!(!fields.contains_key("id"));
    }
}
