//! Remote Store Selection
//!
//! Firestore when a project is baked in at build time, otherwise an
//! in-memory store with a demo hierarchy.

use std::rc::Rc;

use log::{info, warn};
use position_core::repository::{encode_position, Document, DEFAULT_COLLECTION};
use position_core::{
    DocumentPositionRepository, FirestoreClient, MemoryDocumentStore, NewPosition,
    PositionRepository, StoreConfig,
};

const PROJECT: Option<&str> = option_env!("ORG_POSITIONS_FIRESTORE_PROJECT");
const API_KEY: Option<&str> = option_env!("ORG_POSITIONS_FIRESTORE_API_KEY");
const COLLECTION: Option<&str> = option_env!("ORG_POSITIONS_COLLECTION");

/// Build-time configuration, if a project was given
fn build_config() -> Option<StoreConfig> {
    let project = PROJECT.filter(|p| !p.is_empty())?;
    let mut config = StoreConfig::new(project);
    if let Some(key) = API_KEY.filter(|k| !k.is_empty()) {
        config = config.with_api_key(key);
    }
    if let Some(collection) = COLLECTION.filter(|c| !c.is_empty()) {
        config = config.with_collection(collection);
    }
    Some(config)
}

pub fn connect() -> Rc<dyn PositionRepository> {
    if let Some(config) = build_config() {
        let collection = config.collection.clone();
        match FirestoreClient::new(config) {
            Ok(client) => {
                info!("[REMOTE] using Firestore collection {}", collection);
                return Rc::new(DocumentPositionRepository::new(client, collection));
            }
            Err(e) => warn!("[REMOTE] {}, falling back to demo data", e),
        }
    }
    info!("[REMOTE] no Firestore project configured, using demo data");
    Rc::new(DocumentPositionRepository::with_default_collection(demo_store()))
}

/// (id, name, description, parent)
const DEMO: &[(&str, &str, &str, Option<&str>)] = &[
    ("ceo", "Chief Executive Officer", "Leads the organization", None),
    ("cto", "Chief Technology Officer", "Owns engineering and infrastructure", Some("ceo")),
    ("eng-manager", "Engineering Manager", "Runs the product engineering team", Some("cto")),
    ("engineer", "Software Engineer", "Builds and maintains the product", Some("eng-manager")),
    ("cfo", "Chief Financial Officer", "Owns budgeting and reporting", Some("ceo")),
    ("accountant", "Accountant", "Keeps the books", Some("cfo")),
    ("coo", "Chief Operating Officer", "Runs day-to-day operations", Some("ceo")),
];

fn demo_store() -> MemoryDocumentStore {
    let docs = MemoryDocumentStore::new();
    for (id, name, description, parent) in DEMO {
        let fields = encode_position(&NewPosition {
            name: name.to_string(),
            description: description.to_string(),
            parent_id: parent.map(str::to_string),
        });
        docs.seed(DEFAULT_COLLECTION, Document::new(*id, fields));
    }
    docs
}
