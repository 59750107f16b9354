/// Schema Fetcher - Retrieves schema documents from the schema service
use crate::{
    config::SchemaServiceConfig,
    error::{HandleError, HandleResult},
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Network boundary for schema retrieval
///
/// Transport timeout and retry policy belong to the implementation; the
/// cache above this seam never retries.
#[async_trait]
pub trait SchemaFetcher: Send + Sync {
    /// Retrieve the raw schema text for a version
    async fn fetch(&self, schema_version: &str) -> HandleResult<String>;
}

/// Response envelope returned by the schema service
#[derive(Debug, Deserialize)]
struct SchemaResponseWrapper {
    response: Option<SchemaResponse>,
}

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    #[serde(rename = "schemaJson")]
    schema_json: Option<String>,
}

/// HTTP schema fetcher backed by the sync-data schema endpoint
pub struct HttpSchemaFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchemaFetcher {
    /// Create a fetcher from service configuration
    pub fn new(config: &SchemaServiceConfig) -> HandleResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HandleError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl SchemaFetcher for HttpSchemaFetcher {
    async fn fetch(&self, schema_version: &str) -> HandleResult<String> {
        let url = format!("{}?schemaVersion={}", self.base_url, schema_version);
        debug!("Fetching schema version {} from {}", schema_version, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HandleError::SchemaRetrieve(format!("Failed to fetch schema: {}", e)))?;

        if !response.status().is_success() {
            return Err(HandleError::SchemaRetrieve(format!(
                "Schema service returned error: {}",
                response.status()
            )));
        }

        let wrapper: SchemaResponseWrapper = response
            .json()
            .await
            .map_err(|e| HandleError::SchemaRetrieve(format!("Invalid schema response: {}", e)))?;

        wrapper
            .response
            .and_then(|r| r.schema_json)
            .ok_or_else(|| {
                HandleError::SchemaRetrieve(format!(
                    "Schema response missing schemaJson for version {}",
                    schema_version
                ))
            })
    }
}
