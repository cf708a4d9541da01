//! Record stores that receive materialized records.
//!
//! Every operation is an upsert keyed by its conflict columns, so saving the
//! same record twice overwrites instead of duplicating.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use serde_json::json;

use super::error::DbError;
use super::types::{DbOperation, DbValue};

/// Persistence collaborator for materialized records.
pub trait RecordStore {
    /// Save one operation. Must be idempotent by conflict key (last write wins).
    fn save(&mut self, op: DbOperation) -> Result<(), DbError>;

    /// Flush any buffered writes.
    fn flush(&mut self) -> Result<(), DbError> {
        Ok(())
    }
}

/// In-memory store, one map per table keyed by conflict values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<String, BTreeMap<Vec<String>, DbOperation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a saved row by table and textual id.
    pub fn get(&self, table: &str, id: &str) -> Option<&DbOperation> {
        self.tables.get(table)?.get(&vec![id.to_string()])
    }

    /// Number of rows in a table.
    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, BTreeMap::len)
    }

    /// Total number of rows across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key_string(value: &DbValue) -> String {
    match value {
        DbValue::Text(s) | DbValue::Numeric(s) => s.clone(),
        DbValue::Bytes(b) => hex::encode(b),
    }
}

impl RecordStore for MemoryStore {
    fn save(&mut self, op: DbOperation) -> Result<(), DbError> {
        let key: Vec<String> = op.conflict_key().iter().map(key_string).collect();
        if key.is_empty() {
            return Err(DbError::MissingConflictKey {
                table: op.table().to_string(),
            });
        }

        self.tables
            .entry(op.table().to_string())
            .or_default()
            .insert(key, op);
        Ok(())
    }
}

/// Writes each operation as a JSON line: `{"table", "id", "fields"}`.
///
/// Downstream loaders apply the lines as upserts on `(table, id)`.
pub struct JsonLinesStore<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesStore<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordStore for JsonLinesStore<W> {
    fn save(&mut self, op: DbOperation) -> Result<(), DbError> {
        let key = op.conflict_key();
        let id = match key.as_slice() {
            [single] => key_string(single),
            [] => {
                return Err(DbError::MissingConflictKey {
                    table: op.table().to_string(),
                })
            }
            many => many.iter().map(key_string).collect::<Vec<_>>().join("-"),
        };

        let line = json!({
            "table": op.table(),
            "id": id,
            "fields": op.fields_json(),
        });

        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DbError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: &str, amount: &str) -> DbOperation {
        DbOperation::Upsert {
            table: "funds_released".to_string(),
            columns: vec!["id".to_string(), "amount".to_string()],
            values: vec![
                DbValue::Text(id.to_string()),
                DbValue::Numeric(amount.to_string()),
            ],
            conflict_columns: vec!["id".to_string()],
            update_columns: vec!["amount".to_string()],
        }
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        store.save(op("a1", "10")).unwrap();
        store.save(op("a1", "20")).unwrap();
        store.save(op("b2", "30")).unwrap();

        assert_eq!(store.count("funds_released"), 2);
        let row = store.get("funds_released", "a1").unwrap();
        assert_eq!(row.value("amount"), Some(&DbValue::Numeric("20".to_string())));
    }

    #[test]
    fn test_memory_store_rejects_keyless_op() {
        let mut store = MemoryStore::new();
        let keyless = DbOperation::Upsert {
            table: "t".to_string(),
            columns: vec!["amount".to_string()],
            values: vec![DbValue::Numeric("1".to_string())],
            conflict_columns: vec![],
            update_columns: vec![],
        };
        assert!(matches!(
            store.save(keyless),
            Err(DbError::MissingConflictKey { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_lines_store_output() {
        let mut store = JsonLinesStore::new(Vec::new());
        store.save(op("a1", "10")).unwrap();
        store.save(op("b2", "30")).unwrap();
        store.flush().unwrap();
        assert_eq!(store.written(), 2);

        let out = String::from_utf8(store.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["table"], "funds_released");
        assert_eq!(lines[0]["id"], "a1");
        assert_eq!(lines[0]["fields"]["amount"], "10");
        assert!(lines[0]["fields"].get("id").is_none());
    }
}
