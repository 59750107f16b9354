/// Schema-driven, privacy-preserving handle resolution for identity records
///
/// A "handle" is a derived, publicly matchable alias for a contact-style
/// identity attribute (phone, email), formed as `<value>@<fieldName>` and
/// stored only as a deterministic salted hash so it can be indexed and
/// looked up without persisting the raw value.
///
/// A versioned identity schema declares which fields qualify as handles;
/// schema documents and their derived handle-field lists are memoized per
/// version with a single-flight fetch. The schema service and the salt
/// storage backend are external collaborators behind trait seams.

pub mod config;
pub mod error;
pub mod handles;
pub mod hashing;
pub mod salt;
pub mod schema;

pub use config::SchemaServiceConfig;
pub use error::{HandleError, HandleResult};
pub use handles::{HandleExtractor, ResolvedHandle};
pub use hashing::{HandleHash, HashResolver};
pub use salt::{InMemorySaltTable, SaltProvider};
pub use schema::{HttpSchemaFetcher, SchemaCache, SchemaEntry, SchemaFetcher};
