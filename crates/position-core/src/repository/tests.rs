//! Repository Integration Tests
//!
//! DocumentPositionRepository against the in-memory document store.

use serde_json::json;

use crate::domain::{DomainError, NewPosition};
use crate::repository::{
    DocumentPositionRepository, DocumentStore, MemoryDocumentStore, PositionRepository,
};

use super::Document;

fn setup_repo() -> (DocumentPositionRepository<MemoryDocumentStore>, MemoryDocumentStore) {
    let store = MemoryDocumentStore::new();
    (
        DocumentPositionRepository::with_default_collection(store.clone()),
        store,
    )
}

#[tokio::test]
async fn test_create_assigns_id() {
    let (repo, store) = setup_repo();

    let created = repo
        .create(&NewPosition::root("CEO", "Chief"))
        .await
        .expect("Failed to create");

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "CEO");
    assert!(created.is_root());

    let docs = store.documents("positions");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, created.id);
    assert_eq!(docs[0].fields["parentId"], json!(null));
}

#[tokio::test]
async fn test_fetch_all_returns_created() {
    let (repo, _) = setup_repo();

    let ceo = repo.create(&NewPosition::root("CEO", "Chief")).await.unwrap();
    repo.create(&NewPosition::child("CFO", "Finance", ceo.id.clone()))
        .await
        .unwrap();

    let positions = repo.fetch_all().await.expect("Fetch failed");
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1].parent_id.as_deref(), Some(ceo.id.as_str()));
}

#[tokio::test]
async fn test_fetch_skips_malformed_documents() {
    let (repo, store) = setup_repo();
    store.seed(
        "positions",
        Document::new("ok", json!({"name": "CEO", "description": "Chief", "parentId": null})
            .as_object().cloned().unwrap()),
    );
    store.seed(
        "positions",
        Document::new("broken", json!({"name": 12}).as_object().cloned().unwrap()),
    );

    let positions = repo.fetch_all().await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].id, "ok");
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (repo, store) = setup_repo();

    let mut created = repo.create(&NewPosition::root("CTO", "Tech")).await.unwrap();
    created.name = "CIO".to_string();
    created.parent_id = Some("ceo".to_string());

    let updated = repo.update(&created).await.expect("Update failed");
    assert_eq!(updated, created);

    let doc = &store.documents("positions")[0];
    assert_eq!(doc.fields["name"], json!("CIO"));
    assert_eq!(doc.fields["parentId"], json!("ceo"));
}

#[tokio::test]
async fn test_update_missing_document_is_write_error() {
    let (repo, _) = setup_repo();
    let ghost = crate::domain::Position::from_new("ghost", NewPosition::root("X", "Y"));

    let err = repo.update(&ghost).await.unwrap_err();
    assert!(matches!(err, DomainError::RemoteWrite(_)));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (repo, store) = setup_repo();

    let created = repo.create(&NewPosition::root("COO", "Ops")).await.unwrap();
    repo.delete(&created.id).await.expect("Delete failed");
    repo.delete(&created.id).await.expect("Second delete failed");

    assert!(store.documents("positions").is_empty());
}

#[tokio::test]
async fn test_delete_does_not_cascade() {
    let (repo, _) = setup_repo();

    let ceo = repo.create(&NewPosition::root("CEO", "Chief")).await.unwrap();
    let cfo = repo
        .create(&NewPosition::child("CFO", "Finance", ceo.id.clone()))
        .await
        .unwrap();
    repo.delete(&ceo.id).await.unwrap();

    let remaining = repo.fetch_all().await.unwrap();
    assert_eq!(remaining, vec![cfo]);
}

#[tokio::test]
async fn test_failures_map_to_read_and_write_errors() {
    let (repo, store) = setup_repo();

    store.set_fail_reads(true);
    assert!(matches!(repo.fetch_all().await, Err(DomainError::RemoteRead(_))));

    store.set_fail_writes(true);
    assert!(matches!(
        repo.create(&NewPosition::root("CEO", "Chief")).await,
        Err(DomainError::RemoteWrite(_))
    ));
    assert!(matches!(repo.delete("any").await, Err(DomainError::RemoteWrite(_))));
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let store = MemoryDocumentStore::new();
    let roles = DocumentPositionRepository::new(store.clone(), "roles");

    roles.create(&NewPosition::root("CEO", "Chief")).await.unwrap();

    assert_eq!(store.query_all("positions").await.unwrap().len(), 0);
    assert_eq!(store.query_all("roles").await.unwrap().len(), 1);
    assert_eq!(roles.collection(), "roles");
}
