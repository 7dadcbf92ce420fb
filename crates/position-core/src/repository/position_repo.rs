//! Position Repository
//!
//! Translates position CRUD intents into document store operations and
//! normalizes the results back into plain `Position` records.

use async_trait::async_trait;
use log::{debug, warn};

use super::document::{decode_position, encode_position};
use super::traits::{DocumentStore, PositionRepository};
use crate::domain::{DomainResult, NewPosition, Position};

/// Default collection holding position documents
pub const DEFAULT_COLLECTION: &str = "positions";

/// Position repository over any document store
pub struct DocumentPositionRepository<D> {
    store: D,
    collection: String,
}

impl<D: DocumentStore> DocumentPositionRepository<D> {
    pub fn new(store: D, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Repository on the default `positions` collection
    pub fn with_default_collection(store: D) -> Self {
        Self::new(store, DEFAULT_COLLECTION)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn store(&self) -> &D {
        &self.store
    }
}

#[async_trait(?Send)]
impl<D: DocumentStore> PositionRepository for DocumentPositionRepository<D> {
    async fn create(&self, position: &NewPosition) -> DomainResult<Position> {
        let id = self
            .store
            .insert(&self.collection, encode_position(position))
            .await?;
        debug!("[REPO] created {}/{}", self.collection, id);
        Ok(Position::from_new(id, position.clone()))
    }

    async fn fetch_all(&self) -> DomainResult<Vec<Position>> {
        let documents = self.store.query_all(&self.collection).await?;
        let total = documents.len();

        let positions: Vec<Position> = documents
            .iter()
            .filter_map(|doc| match decode_position(doc) {
                Ok(position) => Some(position),
                Err(reason) => {
                    warn!("[REPO] skipping malformed {}", reason);
                    None
                }
            })
            .collect();

        debug!(
            "[REPO] fetched {} of {} documents from {}",
            positions.len(),
            total,
            self.collection
        );
        Ok(positions)
    }

    async fn update(&self, position: &Position) -> DomainResult<Position> {
        self.store
            .update_merge(&self.collection, &position.id, encode_position(&position.fields()))
            .await?;
        Ok(position.clone())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.store.delete(&self.collection, id).await
    }
}
