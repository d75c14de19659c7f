//! `reqwest`-backed REST collection client.

use super::client::{CollectionClient, DeleteResponse};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::item::Item;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Talks to `GET/POST {base}/{collection}` and `DELETE {base}/{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    collection: String,
}

impl RestClient {
    /// Creates a client for one collection.
    pub fn new(base_url: &str, collection: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.trim_matches('/').to_string(),
        }
    }

    /// Creates a client for an entity's collection.
    pub fn for_entity(base_url: &str, entity: Entity) -> Self {
        Self::new(base_url, entity.collection())
    }

    /// Uses a preconfigured `reqwest` client, e.g. one carrying auth
    /// headers or cookies (builder pattern).
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Collection URL.
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    /// URL of one item.
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.url(), id)
    }
}

/// Turns a non-2xx response into [`Error::Status`], preferring the server's
/// `message` field over the raw body.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<DeleteResponse>(&body)
        .ok()
        .and_then(|r| r.message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl<I> CollectionClient<I> for RestClient
where
    I: Item + Serialize + DeserializeOwned,
{
    async fn fetch_all(&self) -> Result<Vec<I>> {
        let url = self.url();
        debug!("GET {url}");
        let response = check(self.http.get(&url).send().await?).await?;
        decode(response).await
    }

    async fn delete(&self, id: &str) -> Result<DeleteResponse> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        let response = check(self.http.delete(&url).send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DeleteResponse::ok());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn create(&self, item: &I) -> Result<I> {
        let url = self.url();
        debug!("POST {url}");
        let response = check(self.http.post(&url).json(item).send().await?).await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = RestClient::new("http://localhost:5000/api/", "/customers/");
        assert_eq!(client.url(), "http://localhost:5000/api/customers");
        assert_eq!(client.item_url("c1"), "http://localhost:5000/api/customers/c1");

        let owners = RestClient::for_entity("http://x", Entity::Owners);
        assert_eq!(owners.url(), "http://x/owners");
    }
}
