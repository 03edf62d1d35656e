use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{Operation, ResourceTransport};
use crate::config::ClientConfig;
use crate::errors::ResourceError;

/// REST transport: `GET/POST {base}/{collection}`, `PUT/DELETE {base}/{collection}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ResourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ResourceError::new(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ResourceError::new(format!(
                "Base URL {} cannot carry collection paths",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ResourceError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Self::new(client, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new(), so segments are always available
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        op: Operation,
        collection: &str,
        request: RequestBuilder,
    ) -> Result<Response, ResourceError> {
        let response = request.send().await.map_err(|e| {
            warn!(%op, collection, error = %e, "Resource request failed to send");
            ResourceError::transport(op, collection, e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(%op, collection, status = status.as_u16(), "Resource request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%op, collection, status = status.as_u16(), "Resource request rejected");
        Err(ResourceError::status(op, collection, status, &body))
    }

    /// Decodes a single-record response; an empty body echoes what was sent.
    async fn record_body(
        collection: &str,
        response: Response,
        sent: Value,
    ) -> Result<Value, ResourceError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResourceError::decode(collection, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(sent);
        }
        serde_json::from_slice(&bytes).map_err(|e| ResourceError::decode(collection, e))
    }
}

#[async_trait]
impl ResourceTransport for HttpTransport {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, ResourceError> {
        let request = self.client.get(self.url_for(&[collection]));
        let response = self.send(Operation::List, collection, request).await?;
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| ResourceError::decode(collection, e))
    }

    async fn create(&self, collection: &str, record: Value) -> Result<Value, ResourceError> {
        let request = self.client.post(self.url_for(&[collection])).json(&record);
        let response = self.send(Operation::Create, collection, request).await?;
        Self::record_body(collection, response, record).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Value, ResourceError> {
        let request = self
            .client
            .put(self.url_for(&[collection, id]))
            .json(&record);
        let response = self.send(Operation::Update, collection, request).await?;
        Self::record_body(collection, response, record).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), ResourceError> {
        let request = self.client.delete(self.url_for(&[collection, id]));
        self.send(Operation::Delete, collection, request).await?;
        Ok(())
    }
}
