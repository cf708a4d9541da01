//! Utility functions for transformations.

pub mod big_int;
pub mod identity;

pub use big_int::BigInt;
pub use identity::{event_id, record_key};
