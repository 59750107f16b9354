/// Identity schema handling
///
/// Fetching of versioned schema documents and per-version caching of the
/// document together with its derived handle-field list.

pub mod cache;
pub mod fetcher;

pub use cache::SchemaCache;
pub use fetcher::{HttpSchemaFetcher, SchemaFetcher};

/// Cached schema entry for one version
///
/// The raw document and the handle-field list derived from it are stored
/// in a single entry so readers always observe both or neither.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub version: String,
    /// Raw schema text, immutable once fetched
    pub document: String,
    /// Field names under the identity properties block flagged `handle: true`,
    /// in schema declaration order
    pub handle_fields: Vec<String>,
}

impl SchemaEntry {
    /// Whether this schema version declares the field as handle-eligible
    pub fn supports_handle(&self, field_id: &str) -> bool {
        self.handle_fields.iter().any(|f| f == field_id)
    }
}
