//! Repository Layer
//!
//! Document store abstraction and the Position repository built on it.

mod document;
mod firestore;
mod memory;
mod position_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use document::{decode_position, encode_position, Document, Fields};
pub use firestore::{decode_fields, decode_value, encode_fields, encode_value, FirestoreClient};
pub use memory::MemoryDocumentStore;
pub use position_repo::{DocumentPositionRepository, DEFAULT_COLLECTION};
pub use traits::{DocumentStore, PositionRepository};
