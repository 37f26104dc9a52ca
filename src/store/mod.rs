pub mod error;
pub mod history;
pub mod json_store;
pub mod schema;

pub use error::StoreError;
pub use history::{HistoryStore, HistoryUpdate};
pub use json_store::{JsonStore, KeyValueStore, MemoryStore};
pub use schema::HistoryEntry;
