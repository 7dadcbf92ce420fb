//! In-memory Document Store
//!
//! Cloning shares the same documents. Used for demo mode and tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use uuid::Uuid;

use super::document::{Document, Fields};
use super::traits::DocumentStore;
use crate::domain::{DomainError, DomainResult};

#[derive(Default)]
struct Inner {
    /// Documents per collection, in insertion order
    collections: BTreeMap<String, Vec<Document>>,
    fail_reads: bool,
    fail_writes: bool,
    calls: usize,
}

/// Document store kept in process memory
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document with a chosen id, bypassing failure injection
    pub fn seed(&self, collection: &str, document: Document) {
        let mut inner = self.inner.borrow_mut();
        let docs = inner.collections.entry(collection.to_string()).or_default();
        docs.retain(|d| d.id != document.id);
        docs.push(document);
    }

    /// Snapshot of a collection
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.inner
            .borrow()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every following query fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Make every following insert/update/delete fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of store operations issued so far
    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls
    }

    fn begin_read(&self) -> DomainResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls += 1;
        if inner.fail_reads {
            return Err(DomainError::read("store unavailable"));
        }
        Ok(())
    }

    fn begin_write(&self) -> DomainResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls += 1;
        if inner.fail_writes {
            return Err(DomainError::write("store unavailable"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, fields: Fields) -> DomainResult<String> {
        self.begin_write()?;
        let id = Uuid::new_v4().simple().to_string();
        self.inner
            .borrow_mut()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }

    async fn query_all(&self, collection: &str) -> DomainResult<Vec<Document>> {
        self.begin_read()?;
        Ok(self.documents(collection))
    }

    async fn update_merge(&self, collection: &str, id: &str, fields: Fields) -> DomainResult<()> {
        self.begin_write()?;
        let mut inner = self.inner.borrow_mut();
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| DomainError::write(format!("no document to update: {}/{}", collection, id)))?;
        doc.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        self.begin_write()?;
        if let Some(docs) = self.inner.borrow_mut().collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
