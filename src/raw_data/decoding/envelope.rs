//! Envelope decoding: protobuf bytes to ordered raw entries.

use prost::Message;
use thiserror::Error;

use super::types::{pb, RawEventEntry};

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("protobuf decode error: {0}")]
    ProtobufDecode(#[from] prost::DecodeError),
}

/// Decode an envelope into its entries, preserving order.
///
/// Framing errors fail the whole envelope; nothing is returned partially.
pub fn decode_envelope(bytes: &[u8]) -> Result<Vec<RawEventEntry>, EnvelopeError> {
    let events = pb::Events::decode(bytes)?;
    Ok(events.events.into_iter().map(RawEventEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(descriptions: &[&str]) -> Vec<u8> {
        pb::Events {
            events: descriptions
                .iter()
                .map(|d| pb::Event {
                    json_description: d.to_string(),
                })
                .collect(),
        }
        .encode_to_vec()
    }

    #[test]
    fn test_decode_preserves_order() {
        let bytes = encode(&["{\"a\":\"1\"}", "", "{\"b\":\"2\"}"]);
        let entries = decode_envelope(&bytes).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].description, "{\"a\":\"1\"}");
        assert_eq!(entries[1].description, "");
        assert_eq!(entries[2].description, "{\"b\":\"2\"}");
    }

    #[test]
    fn test_decode_empty_buffer() {
        let entries = decode_envelope(&[]).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_decode_truncated_envelope_fails() {
        // field 1, length-delimited, claims 5 bytes but only 1 follows
        let bytes = [0x0a, 0x05, 0x01];
        let err = decode_envelope(&bytes).unwrap_err();
        assert!(err.to_string().contains("protobuf decode error"));
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        // events[0].json_description = 0xff (not UTF-8)
        let bytes = [0x0a, 0x03, 0x0a, 0x01, 0xff];
        assert!(decode_envelope(&bytes).is_err());
    }
}
