/// Handle Extraction
///
/// Derives handle-eligible field names from a schema document and builds
/// the selected-handle map for an identity payload.

pub mod extractor;

pub use extractor::HandleExtractor;

use crate::hashing::HandleHash;
use serde::Serialize;

/// Root wrapper key of an identity payload
pub const ROOT_PATH: &str = "identity";

/// Schema-version field inside the wrapper
pub const ID_SCHEMA_VERSION: &str = "IDSchemaVersion";

/// Reserved field holding the resident-chosen handle field ids
pub const SELECTED_HANDLES: &str = "selectedHandles";

/// A resolved handle: the normalized handle string and its salted hash
///
/// The handle itself is ephemeral; only the hash is meant to be persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHandle {
    pub handle: String,
    pub hash: HandleHash,
}
