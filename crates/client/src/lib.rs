//! Client wrapper for the record server.
//!
//! Builds exactly the requests the HTTP dispatcher expects: identifier as
//! an `?id=` query parameter, JSON bodies, and the shared-secret `api-key`
//! header on every request. Any non-2xx response surfaces as a generic
//! [`ClientError::UnexpectedStatus`] without distinguishing cause.

use common::types::Record;
use reqwest::StatusCode;
use thiserror::Error;

/// Header carrying the shared secret, as the server expects it.
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),
}

#[derive(Clone)]
pub struct RecordClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a record; the server inserts or overwrites at `record.number`.
    pub async fn create(&self, record: &Record) -> Result<Record, ClientError> {
        let resp = self.send(self.http.post(self.url()).json(record)).await?;
        Self::parse_json(resp).await
    }

    /// Fetch the record stored under `id`.
    pub async fn get(&self, id: &str) -> Result<Record, ClientError> {
        let resp = self
            .send(self.http.get(self.url()).query(&[("id", id)]))
            .await?;
        Self::parse_json(resp).await
    }

    /// Fetch every record currently stored.
    pub async fn list(&self) -> Result<Vec<Record>, ClientError> {
        let resp = self.send(self.http.get(self.url())).await?;
        Self::parse_json(resp).await
    }

    /// Replace the record stored under `id` wholesale.
    pub async fn update(&self, id: &str, record: &Record) -> Result<Record, ClientError> {
        let resp = self
            .send(self.http.put(self.url()).query(&[("id", id)]).json(record))
            .await?;
        Self::parse_json(resp).await
    }

    /// Delete the record stored under `id`. Idempotent on the server side.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url()).query(&[("id", id)]))
            .await?;
        Ok(())
    }

    fn url(&self) -> String {
        format!("{}/", self.base_url)
    }

    async fn send(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let resp = req
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ClientError::UnexpectedStatus(resp.status()));
        }
        Ok(resp)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = RecordClient::new("http://localhost:8080/", "k");
        assert_eq!(c.url(), "http://localhost:8080/");
    }
}
