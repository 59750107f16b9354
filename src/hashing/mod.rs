/// Handle Hashing - Deterministic salted hash computation
use crate::{error::HandleResult, salt::SaltProvider};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Separator between salt-id and digest in the composite hash
///
/// The digest is hex-encoded, so this character can never appear inside it.
pub const SPLITTER: &str = "_";

/// Composite salted hash: `<saltId>_<uppercase hex digest>`
///
/// This is the value callers persist and index; the raw handle never is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleHash {
    pub salt_id: u32,
    pub digest: String,
}

impl fmt::Display for HandleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.salt_id, SPLITTER, self.digest)
    }
}

impl Serialize for HandleHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Computes the composite salted hash for a handle string
#[derive(Clone)]
pub struct HashResolver {
    salts: Arc<dyn SaltProvider>,
}

impl HashResolver {
    pub fn new(salts: Arc<dyn SaltProvider>) -> Self {
        Self { salts }
    }

    /// Hash a handle against the salt table
    ///
    /// The handle is lowercased with the locale-invariant Unicode rule (a
    /// no-op for handles already normalized during extraction), the salt-id
    /// is assigned from the normalized bytes, and the digest is computed
    /// over those bytes with the bucket's salt material.
    pub fn hash_handle(&self, handle: &str) -> HandleResult<HandleHash> {
        let normalized = handle.to_lowercase();
        let salt_id = self.salts.salt_id_for(normalized.as_bytes())?;
        let salt = self.salts.salt_for(salt_id)?;
        let digest = salted_digest(normalized.as_bytes(), &salt);

        Ok(HandleHash { salt_id, digest })
    }
}

/// SHA-256 over the input bytes followed by the salt, as uppercase hex
fn salted_digest(bytes: &[u8], salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(salt);
    hex::encode_upper(hasher.finalize())
}
