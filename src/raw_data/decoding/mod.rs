mod envelope;
mod types;

pub use envelope::{decode_envelope, EnvelopeError};
pub use types::{pb, RawEventEntry};
