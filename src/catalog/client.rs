//! Minimal GraphQL client

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::CatalogError;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Posts queries to a single GraphQL endpoint
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("docs-toolkit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query and decode its `data` field
    pub async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<T, CatalogError> {
        tracing::debug!("POST {} {}", self.endpoint, query);

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        decode_response(&body)
    }
}

/// Decode a GraphQL response body, surfacing any reported errors
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(CatalogError::GraphQl(messages.join("; ")));
    }

    response.data.ok_or(CatalogError::MissingData)
}
