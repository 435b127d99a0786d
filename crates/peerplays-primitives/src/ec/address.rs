//! Graphene addresses.
//!
//! An address is RIPEMD-160 over SHA-512 of the compressed public key. It is
//! the sort key for the key entries of an authority, and renders as
//! `<PREFIX><base58(addr || ripemd160(addr)[..4])>`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::base58::{graphene_check_decode, graphene_check_encode};
use crate::ec::public_key::PublicKey;
use crate::ec::DEFAULT_PREFIX;
use crate::hash::{ripemd160, sha512};
use crate::PrimitivesError;

/// A 20-byte graphene address with its rendering prefix.
#[derive(Clone, Debug)]
pub struct Address {
    bytes: [u8; 20],
    prefix: String,
}

impl Address {
    /// Derive the address of a public key, keeping the key's prefix.
    pub fn from_public_key(key: &PublicKey) -> Self {
        Address {
            bytes: ripemd160(&sha512(&key.to_compressed())),
            prefix: key.prefix().to_string(),
        }
    }

    /// Build an address from its raw 20 bytes with the default prefix.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Address {
            bytes,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Parse an address string with a known prefix.
    pub fn from_str_with_prefix(s: &str, prefix: &str) -> Result<Self, PrimitivesError> {
        let body = s.strip_prefix(prefix).ok_or_else(|| {
            PrimitivesError::InvalidKeyFormat(format!(
                "expected address prefix {}, got {}",
                prefix, s
            ))
        })?;
        let decoded = graphene_check_decode(body)
            .map_err(|e| PrimitivesError::InvalidKeyFormat(e.to_string()))?;
        let bytes: [u8; 20] = decoded.as_slice().try_into().map_err(|_| {
            PrimitivesError::InvalidKeyFormat(format!(
                "expected 20 address bytes, got {}",
                decoded.len()
            ))
        })?;
        Ok(Address {
            bytes,
            prefix: prefix.to_string(),
        })
    }

    /// Return the same address rendered with a different prefix.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// Lowercase hex of the raw address bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, graphene_check_encode(&self.bytes))
    }
}

impl FromStr for Address {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_prefix(s, DEFAULT_PREFIX)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Address {}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}
