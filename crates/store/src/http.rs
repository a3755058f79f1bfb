//! HTTP client for the hosted record store.
//!
//! Speaks the store's collection REST API:
//! `GET    /api/collections/{c}/records` (paged list, `items` envelope),
//! `PATCH  /api/collections/{c}/records/{id}`,
//! `DELETE /api/collections/{c}/records/{id}`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::RecordStore;

/// Page size used for full-collection listings. Category collections are
/// tiny; one page is always enough.
const LIST_PAGE_SIZE: usize = 500;

/// Paged response envelope returned by the store's list endpoint.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    items: Vec<Value>,
}

/// A `reqwest`-backed [`RecordStore`] for one store instance.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordStore {
    /// Create a client for the store at `base_url` (e.g.
    /// `http://localhost:8090`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn records_url(&self, collection: &str) -> String {
        format!("{}/api/collections/{collection}/records", self.base_url)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{id}", self.records_url(collection))
    }

    /// Map a non-success response into a [`StoreError`], consuming the body
    /// for the message.
    async fn api_error(
        response: reqwest::Response,
        collection: &str,
        id: Option<&str>,
    ) -> StoreError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                };
            }
        }
        let message = response.text().await.unwrap_or_default();
        StoreError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, collection: &str, order_by: &str) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.records_url(collection))
            .query(&[
                ("sort", order_by.to_string()),
                ("perPage", LIST_PAGE_SIZE.to_string()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response, collection, None).await);
        }

        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::debug!(
            collection,
            count = envelope.items.len(),
            "listed collection from store"
        );
        Ok(envelope.items)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.record_url(collection, id))
            .json(&fields)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response, collection, Some(id)).await);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.record_url(collection, id))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response, collection, Some(id)).await);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.records_url(collection))
            .query(&[
                ("filter", filter.to_string()),
                ("perPage", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response, collection, None).await);
        }

        let envelope: ListEnvelope = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let store = HttpRecordStore::new("http://localhost:8090/");
        assert_eq!(store.base_url(), "http://localhost:8090");
        assert_eq!(
            store.records_url("categories"),
            "http://localhost:8090/api/collections/categories/records"
        );
    }

    #[test]
    fn record_url_appends_id() {
        let store = HttpRecordStore::new("http://localhost:8090");
        assert_eq!(
            store.record_url("categories", "abc"),
            "http://localhost:8090/api/collections/categories/records/abc"
        );
    }
}
