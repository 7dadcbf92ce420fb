//! Store Configuration
//!
//! Where the remote document store lives and which collection holds positions.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};
use crate::repository::DEFAULT_COLLECTION;

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_base_url() -> String {
    DEFAULT_FIRESTORE_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub project_id: String,
    /// Sent as the `key` query parameter when present
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl StoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            collection: default_collection(),
            base_url: default_base_url(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(raw).map_err(|e| DomainError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(DomainError::Config("project id is empty".into()));
        }
        if self.collection.is_empty() || self.collection.contains('/') {
            return Err(DomainError::Config(format!(
                "collection '{}' must be a single non-empty path segment",
                self.collection
            )));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(DomainError::Config(format!(
                "base url '{}' is not http(s)",
                self.base_url
            )));
        }
        Ok(())
    }
}
