use alloy_primitives::Bytes;

/// Derive an entry's identity: the UTF-8 bytes of `"{hex(tx_hash)}-{index}"`.
///
/// Unique within an envelope because `index` is the entry's position.
pub fn event_id(transaction_hash: &[u8], index: usize) -> Bytes {
    Bytes::from(format!("{}-{}", hex::encode(transaction_hash), index).into_bytes())
}

/// Hex rendering of an identity, used as the record key.
pub fn record_key(id: &[u8]) -> String {
    hex::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_format() {
        let id = event_id(&[0x12, 0x34], 2);
        assert_eq!(id.as_ref(), b"1234-2");
        assert_eq!(record_key(&id), hex::encode("1234-2"));
    }

    #[test]
    fn test_event_id_deterministic() {
        let hash = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(event_id(&hash, 7), event_id(&hash, 7));
    }

    #[test]
    fn test_event_id_unique_per_index() {
        let hash = [0xab; 32];
        let keys: std::collections::HashSet<_> =
            (0..100).map(|i| record_key(&event_id(&hash, i))).collect();
        assert_eq!(keys.len(), 100);
    }
}
