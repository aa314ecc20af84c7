//! On-disk conversation transcript persisted as a single JSON array.
//!
//! The store is re-read before every completion call and replaced wholesale
//! after it. Every write goes to a temp file in the same directory followed by
//! an atomic rename, so a crash mid-write never leaves a half-written store.

mod error;
mod schema;
mod store;

pub use error::TranscriptStoreError;
pub use schema::{Role, Turn};
pub use store::TranscriptStore;
