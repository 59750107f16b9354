/// End-to-end handle resolution: schema cache, extractor, and hashing wired
/// together over test collaborators
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use handle_resolver::{
    HandleError, HandleExtractor, HandleResult, HashResolver, InMemorySaltTable, SchemaCache,
    SchemaFetcher,
};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SCHEMA_V1: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "properties": {
        "identity": {
            "type": "object",
            "properties": {
                "IDSchemaVersion": {"type": "number"},
                "fullName": {"type": "string"},
                "phone": {"type": "string", "handle": true},
                "email": {"type": "string", "handle": true},
                "dateOfBirth": {"type": "string", "handle": false}
            }
        }
    }
}"#;

struct RecordingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl SchemaFetcher for RecordingFetcher {
    async fn fetch(&self, schema_version: &str) -> HandleResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match schema_version {
            "1.0" => Ok(SCHEMA_V1.to_string()),
            other => Err(HandleError::SchemaRetrieve(format!(
                "Unknown schema version {}",
                other
            ))),
        }
    }
}

fn build_extractor() -> (HandleExtractor, Arc<RecordingFetcher>) {
    let fetcher = Arc::new(RecordingFetcher {
        calls: AtomicUsize::new(0),
    });
    let salts = (0..16)
        .map(|i| STANDARD.encode(format!("integration-salt-{}", i)))
        .collect();
    let extractor = HandleExtractor::new(
        SchemaCache::new(fetcher.clone()),
        HashResolver::new(Arc::new(InMemorySaltTable::new(salts))),
    );
    (extractor, fetcher)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentityRequest {
    identity: serde_json::Value,
}

#[tokio::test]
async fn resolves_selected_handles_and_caches_schema() {
    let (extractor, fetcher) = build_extractor();

    let request = IdentityRequest {
        identity: json!({
            "IDSchemaVersion": "1.0",
            "selectedHandles": ["phone", "email", "unsupportedField"],
            "fullName": "Test Resident",
            "phone": "9999999999",
            "email": "A@B.com"
        }),
    };

    let handles = extractor.build_handle_map(&request).await.unwrap();
    assert_eq!(handles.len(), 2);
    assert_eq!(handles["phone"].handle, "9999999999@phone");
    assert_eq!(handles["email"].handle, "a@b.com@email");

    // Composite format: salt-id, delimiter, 64 hex chars
    for resolved in handles.values() {
        let rendered = resolved.hash.to_string();
        let (salt_id, digest) = rendered.split_once('_').unwrap();
        assert!(salt_id.parse::<u32>().is_ok());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    // Same payload again: identical hashes, no second schema fetch
    let again = extractor.build_handle_map(&request).await.unwrap();
    assert_eq!(again["phone"].hash, handles["phone"].hash);
    assert_eq!(again["email"].hash, handles["email"].hash);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hashing_is_case_insensitive_end_to_end() {
    let (extractor, _) = build_extractor();

    let upper = IdentityRequest {
        identity: json!({
            "IDSchemaVersion": "1.0",
            "selectedHandles": ["email"],
            "email": "ALICE@EXAMPLE.COM"
        }),
    };
    let lower = IdentityRequest {
        identity: json!({
            "IDSchemaVersion": "1.0",
            "selectedHandles": ["email"],
            "email": "alice@example.com"
        }),
    };

    let from_upper = extractor.build_handle_map(&upper).await.unwrap();
    let from_lower = extractor.build_handle_map(&lower).await.unwrap();
    assert_eq!(from_upper["email"].handle, "alice@example.com@email");
    assert_eq!(from_upper["email"].hash, from_lower["email"].hash);
}

#[tokio::test]
async fn unknown_schema_version_surfaces_retrieve_error() {
    let (extractor, _) = build_extractor();

    let request = IdentityRequest {
        identity: json!({
            "IDSchemaVersion": "7.0",
            "selectedHandles": ["phone"],
            "phone": "9999999999"
        }),
    };

    assert!(matches!(
        extractor.build_handle_map(&request).await,
        Err(HandleError::SchemaRetrieve(_))
    ));
}

#[tokio::test]
async fn resolved_handles_serialize_with_composite_hash() {
    let (extractor, _) = build_extractor();

    let request = IdentityRequest {
        identity: json!({
            "IDSchemaVersion": "1.0",
            "selectedHandles": ["phone"],
            "phone": "9999999999"
        }),
    };

    let handles = extractor.build_handle_map(&request).await.unwrap();
    let encoded = serde_json::to_value(&handles["phone"]).unwrap();
    assert_eq!(encoded["handle"], "9999999999@phone");
    let hash = encoded["hash"].as_str().unwrap();
    assert_eq!(hash, handles["phone"].hash.to_string());
}
