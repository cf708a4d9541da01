//! Maps Starknet escrow event envelopes into typed, upsertable records.
//!
//! An envelope is a protobuf batch of events, each carrying a JSON
//! description. Every recognized, complete description becomes one
//! [`transformations::EventRecord`]; everything else is skipped with a
//! diagnostic and the batch carries on.

pub mod db;
pub mod raw_data;
pub mod transformations;
pub mod types;
