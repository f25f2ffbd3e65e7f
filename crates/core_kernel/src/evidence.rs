//! Evidence content hashes
//!
//! Claimants attach a 32-byte content hash of their supporting evidence. The
//! hash is fixed at submission and never rewritten.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors parsing an evidence hash
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvidenceHashError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Evidence hash must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// A 32-byte content hash
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvidenceHash([u8; 32]);

impl EvidenceHash {
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hashes raw evidence content with SHA-256
    pub fn digest(content: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(content));
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the `0x`-prefixed lowercase hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for EvidenceHash {
    type Err = EvidenceHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(raw).map_err(|e| EvidenceHashError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| EvidenceHashError::InvalidLength(decoded.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for EvidenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EvidenceHash({})", self.to_hex())
    }
}

impl fmt::Display for EvidenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for EvidenceHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EvidenceHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EvidenceHash::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("Invalid evidence hash: {}", e)))
    }
}
