//! Firestore REST Adapter
//!
//! `DocumentStore` over the Firestore v1 REST API. Authentication beyond the
//! API key and query features other than listing are left to Firestore itself.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::document::{Document, Fields};
use super::traits::DocumentStore;
use crate::config::StoreConfig;
use crate::domain::{DomainError, DomainResult};

const PAGE_SIZE: &str = "300";

/// Firestore document resource (only what we read back)
#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    /// `projects/{p}/databases/(default)/documents/{collection}/{id}`
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

impl FirestoreDocument {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    fn into_document(self) -> Result<Document, String> {
        let id = self.id().to_string();
        let fields = decode_fields(&self.fields)?;
        Ok(Document::new(id, fields))
    }
}

/// Firestore client bound to one project
pub struct FirestoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl FirestoreClient {
    pub fn new(config: StoreConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    fn auth_query(&self) -> Vec<(&'static str, String)> {
        self.config
            .api_key
            .iter()
            .map(|key| ("key", key.clone()))
            .collect()
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreClient {
    async fn insert(&self, collection: &str, fields: Fields) -> DomainResult<String> {
        let created: FirestoreDocument = self
            .http
            .post(self.collection_url(collection))
            .query(&self.auth_query())
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await
            .map_err(DomainError::write)?
            .error_for_status()
            .map_err(DomainError::write)?
            .json()
            .await
            .map_err(DomainError::write)?;

        let id = created.id();
        if id.is_empty() {
            return Err(DomainError::write(format!(
                "created document has no id: '{}'",
                created.name
            )));
        }
        Ok(id.to_string())
    }

    async fn query_all(&self, collection: &str) -> DomainResult<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = self.auth_query();
            query.push(("pageSize", PAGE_SIZE.to_string()));
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let page: ListResponse = self
                .http
                .get(self.collection_url(collection))
                .query(&query)
                .send()
                .await
                .map_err(DomainError::read)?
                .error_for_status()
                .map_err(DomainError::read)?
                .json()
                .await
                .map_err(DomainError::read)?;

            for doc in page.documents {
                let name = doc.name.clone();
                match doc.into_document() {
                    Ok(document) => documents.push(document),
                    Err(reason) => warn!("[FIRESTORE] skipping undecodable {}: {}", name, reason),
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("[FIRESTORE] listed {} documents in {}", documents.len(), collection);
        Ok(documents)
    }

    async fn update_merge(&self, collection: &str, id: &str, fields: Fields) -> DomainResult<()> {
        let mut query = self.auth_query();
        query.extend(
            fields
                .keys()
                .map(|field| ("updateMask.fieldPaths", field.clone())),
        );
        // Same contract as updateDoc: fail instead of creating the document
        query.push(("currentDocument.exists", "true".to_string()));

        self.http
            .patch(self.document_url(collection, id))
            .query(&query)
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await
            .map_err(DomainError::write)?
            .error_for_status()
            .map_err(DomainError::write)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        self.http
            .delete(self.document_url(collection, id))
            .query(&self.auth_query())
            .send()
            .await
            .map_err(DomainError::write)?
            .error_for_status()
            .map_err(DomainError::write)?;
        Ok(())
    }
}

// ========================
// Typed value codec
// ========================

/// Plain JSON value -> Firestore typed value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 travels as a decimal string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Firestore typed value -> plain JSON value
pub fn decode_value(value: &Value) -> Result<Value, String> {
    let (kind, inner) = value
        .as_object()
        .and_then(|obj| obj.iter().next())
        .ok_or_else(|| format!("not a typed value: {}", value))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| format!("bad booleanValue: {}", inner)),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| format!("bad integerValue: {}", inner))
        }
        "doubleValue" => inner
            .as_f64()
            .map(Value::from)
            .ok_or_else(|| format!("bad doubleValue: {}", inner)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| format!("bad {}: {}", kind, inner)),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(Value::Object(map)) => decode_fields(map)?,
                _ => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(format!("unsupported Firestore value type '{}'", other)),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, String> {
    fields
        .iter()
        .map(|(k, v)| decode_value(v).map(|decoded| (k.clone(), decoded)))
        .collect()
}
