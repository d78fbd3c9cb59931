//! Persistence for saved meeting analyses.
//!
//! `KeyValueStore` is the storage seam: string slots addressed by key, with an
//! in-memory adapter for tests and a file adapter for real use. `MeetingRecords`
//! keeps the record list in one of those slots.

pub mod adapters;
pub mod records;
pub mod store;

pub use adapters::{FileKeyValueStore, InMemoryKeyValueStore};
pub use records::{saved_at_now, MeetingRecords, StoredRecord, RECORDS_KEY};
pub use store::{KeyValueStore, KeyValueStoreRef, StoreError};
