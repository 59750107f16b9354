/// Schema Cache - Memoizes schema documents and handle-field lists per version
use crate::{
    error::{HandleError, HandleResult},
    handles::extractor::derive_handle_fields,
    schema::{fetcher::SchemaFetcher, SchemaEntry},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, error};

/// Per-version schema cache with single-flight population
///
/// The first caller for an unfetched version performs the fetch; concurrent
/// callers for the same version await that result instead of fetching again.
/// Document and handle-field list are published together in one
/// [`SchemaEntry`], so no reader can observe one without the other. A version,
/// once cached, is never refetched.
#[derive(Clone)]
pub struct SchemaCache {
    fetcher: Arc<dyn SchemaFetcher>,
    entries: Arc<Mutex<HashMap<String, Arc<OnceCell<Arc<SchemaEntry>>>>>>,
}

impl SchemaCache {
    /// Create a new cache over a schema fetcher
    pub fn new(fetcher: Arc<dyn SchemaFetcher>) -> Self {
        Self {
            fetcher,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the schema entry for a version, fetching on first use
    ///
    /// Fails with `MissingInput` when the version is absent or the literal
    /// string "null", and with `SchemaRetrieve` when the fetch or the schema
    /// parse fails. Failures are not retried within this call; the failed
    /// slot stays empty so a later call may attempt the fetch again.
    pub async fn get_schema(&self, schema_version: Option<&str>) -> HandleResult<Arc<SchemaEntry>> {
        let version = match schema_version {
            Some(v) if v != "null" => v,
            _ => {
                error!("Schema version is missing");
                return Err(HandleError::MissingInput("identity/IDSchemaVersion".to_string()));
            }
        };

        let cell = {
            let mut entries = self.entries.lock().await;
            entries
                .entry(version.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let entry = cell.get_or_try_init(|| self.load(version)).await?;
        Ok(entry.clone())
    }

    async fn load(&self, version: &str) -> HandleResult<Arc<SchemaEntry>> {
        debug!("Schema cache miss for version {}", version);
        let document = self.fetcher.fetch(version).await?;
        let handle_fields = derive_handle_fields(&document).map_err(|e| {
            error!("Failed to parse schema {}: {}", version, e);
            HandleError::SchemaRetrieve(format!("Failed to parse schema {}: {}", version, e))
        })?;

        Ok(Arc::new(SchemaEntry {
            version: version.to_string(),
            document,
            handle_fields,
        }))
    }
}
