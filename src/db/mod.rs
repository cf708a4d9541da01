pub mod error;
pub mod store;
pub mod types;

pub use error::DbError;
pub use store::{JsonLinesStore, MemoryStore, RecordStore};
pub use types::{DbOperation, DbValue};
