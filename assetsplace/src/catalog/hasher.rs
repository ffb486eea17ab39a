//! SHA-256 content digest of raw catalog bytes.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a catalog body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogDigest([u8; 32]);

impl CatalogDigest {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Calculate the digest of a catalog body.
///
/// The digest never interprets the content, so two bodies compare equal
/// only when they are byte-for-byte identical.
pub fn catalog_digest(bytes: &[u8]) -> CatalogDigest {
    CatalogDigest(Sha256::digest(bytes).into())
}
