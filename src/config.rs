/// Configuration for the schema service collaborator
use serde::{Deserialize, Serialize};
use std::env;

/// Schema service client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaServiceConfig {
    /// Base URL of the schema endpoint; the version is appended as a
    /// `schemaVersion` query parameter
    pub base_url: String,
    /// User-Agent header for HTTP requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SchemaServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8086/v1/syncdata/latestidschema".to_string(),
            user_agent: "handle-resolver/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SchemaServiceConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("SCHEMA_SERVICE_URL").unwrap_or(defaults.base_url),
            user_agent: env::var("SCHEMA_SERVICE_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout_secs: env::var("SCHEMA_SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}
