/// Salt storage boundary
///
/// Assigns stable salt-ids for normalized handle bytes and serves the raw
/// salt material per id. The backing table is externally owned; rotation
/// works by distributing inputs across numbered salt buckets while staying
/// deterministic per input.
use crate::error::{HandleError, HandleResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

/// Salt storage backend seam
pub trait SaltProvider: Send + Sync {
    /// Assign a salt-id for the normalized handle bytes
    ///
    /// Must be a deterministic function of the input for a fixed salt table;
    /// lookup correctness depends on the same value always mapping to the
    /// same bucket.
    fn salt_id_for(&self, normalized: &[u8]) -> HandleResult<u32>;

    /// Raw salt bytes for a salt-id, decoded from any at-rest encoding
    fn salt_for(&self, salt_id: u32) -> HandleResult<Vec<u8>>;
}

/// In-memory salt table with base64-encoded salt material at rest
///
/// The salt-id is the entry's position in the table. Inputs are bucketed by
/// the first four big-endian bytes of SHA-256 over the normalized handle,
/// reduced modulo the table size.
pub struct InMemorySaltTable {
    salts: Vec<String>,
}

impl InMemorySaltTable {
    pub fn new(salts: Vec<String>) -> Self {
        Self { salts }
    }
}

impl SaltProvider for InMemorySaltTable {
    fn salt_id_for(&self, normalized: &[u8]) -> HandleResult<u32> {
        if self.salts.is_empty() {
            return Err(HandleError::SaltStore("Salt table is empty".to_string()));
        }
        let digest = Sha256::digest(normalized);
        let bucket = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        Ok(bucket % self.salts.len() as u32)
    }

    fn salt_for(&self, salt_id: u32) -> HandleResult<Vec<u8>> {
        let encoded = self
            .salts
            .get(salt_id as usize)
            .ok_or_else(|| HandleError::SaltStore(format!("No salt for id {}", salt_id)))?;

        STANDARD
            .decode(encoded)
            .map_err(|e| HandleError::SaltStore(format!("Invalid salt encoding for id {}: {}", salt_id, e)))
    }
}
