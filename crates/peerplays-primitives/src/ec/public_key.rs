//! secp256k1 public key in graphene text format.
//!
//! A public key renders as `<PREFIX><base58(compressed || checksum)>` where the
//! checksum is the first four bytes of RIPEMD-160 over the compressed point.
//! The prefix identifies the chain (`PPY`, `TEST`, ...) and travels with the
//! key so that it renders the way it was parsed; equality and ordering only
//! look at the point itself.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::ProjectivePoint;

use crate::base58::{graphene_check_decode, graphene_check_encode};
use crate::ec::address::Address;
use crate::ec::signature::Signature;
use crate::ec::DEFAULT_PREFIX;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes.
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes.
const UNCOMPRESSED_LEN: usize = 65;

/// Longest address prefix the parser will try when auto-detecting.
const MAX_PREFIX_LEN: usize = 12;

/// A secp256k1 public key together with its chain address prefix.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
    prefix: String,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 bytes (33-byte compressed or 65-byte
    /// uncompressed) using the default prefix.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::PointNotOnCurve)?;
        Ok(Self::from_k256_verifying_key(&vk))
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a prefixed key string whose prefix is known in advance.
    ///
    /// # Arguments
    /// * `s` - The key string, e.g. `PPY6MRyAjQq8...`.
    /// * `prefix` - The expected address prefix.
    ///
    /// # Returns
    /// The key carrying `prefix`, or `InvalidKeyFormat` if the prefix does not
    /// match or the checksum fails.
    pub fn from_str_with_prefix(s: &str, prefix: &str) -> Result<Self, PrimitivesError> {
        let body = s.strip_prefix(prefix).ok_or_else(|| {
            PrimitivesError::InvalidKeyFormat(format!(
                "expected public key prefix {}, got {}",
                prefix, s
            ))
        })?;
        let key = Self::decode_body(body)?;
        Ok(key.with_prefix(prefix))
    }

    fn decode_body(body: &str) -> Result<Self, PrimitivesError> {
        let bytes = graphene_check_decode(body)
            .map_err(|e| PrimitivesError::InvalidKeyFormat(e.to_string()))?;
        if bytes.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidKeyFormat(format!(
                "expected {} key bytes, got {}",
                COMPRESSED_LEN,
                bytes.len()
            )));
        }
        Self::from_bytes(&bytes)
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey {
            inner: *vk,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Return the same key rendered with a different address prefix.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// The address prefix this key renders with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Derive the graphene address of this key, carrying the same prefix.
    pub fn address(&self) -> Address {
        Address::from_public_key(self)
    }

    /// Verify a signature against a 32-byte digest.
    pub fn verify(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        match sig.to_k256() {
            Ok(k256_sig) => self.inner.verify_prehash(digest, &k256_sig).is_ok(),
            Err(_) => false,
        }
    }

    pub(crate) fn to_projective_point(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self.inner.as_affine())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, graphene_check_encode(&self.to_compressed()))
    }
}

impl FromStr for PublicKey {
    type Err = PrimitivesError;

    /// Parse a prefixed key string, detecting the prefix.
    ///
    /// Every split point whose head is purely alphabetic is tried, shortest
    /// first; the first tail that decodes to a checksummed compressed key wins.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let limit = s.len().min(MAX_PREFIX_LEN);
        for split in 1..=limit {
            if !s.is_char_boundary(split) {
                break;
            }
            let (prefix, body) = s.split_at(split);
            if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                break;
            }
            if let Ok(key) = Self::decode_body(body) {
                return Ok(key.with_prefix(prefix));
            }
        }
        Err(PrimitivesError::InvalidKeyFormat(format!(
            "not a prefixed public key: {}",
            s
        )))
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_compressed().hash(state);
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by the graphene address bytes, which is how authority maps sort
/// their key entries on the wire.
impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address().as_bytes().cmp(other.address().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrivateKey;

    const TEST_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
    const TEST_PUB_BODY: &str = "6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    #[test]
    fn test_known_key_renders_with_prefix() {
        let key = PrivateKey::from_wif(TEST_WIF).unwrap().pub_key();
        assert_eq!(key.to_string(), format!("PPY{}", TEST_PUB_BODY));
        assert_eq!(
            key.clone().with_prefix("TEST").to_string(),
            format!("TEST{}", TEST_PUB_BODY)
        );
    }

    #[test]
    fn test_parse_detects_prefix() {
        for prefix in ["PPY", "TEST", "BTS", "GPH"] {
            let s = format!("{}{}", prefix, TEST_PUB_BODY);
            let key: PublicKey = s.parse().unwrap();
            assert_eq!(key.prefix(), prefix);
            assert_eq!(key.to_string(), s);
        }
    }

    #[test]
    fn test_parse_with_explicit_prefix() {
        let s = format!("TEST{}", TEST_PUB_BODY);
        assert!(PublicKey::from_str_with_prefix(&s, "TEST").is_ok());
        assert!(matches!(
            PublicKey::from_str_with_prefix(&s, "PPY"),
            Err(PrimitivesError::InvalidKeyFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let mut s = format!("PPY{}", TEST_PUB_BODY);
        s.pop();
        s.push('X');
        assert!(s.parse::<PublicKey>().is_err());
        assert!("PPY".parse::<PublicKey>().is_err());
        assert!("".parse::<PublicKey>().is_err());
    }

    #[test]
    fn test_equality_ignores_prefix() {
        let key = PrivateKey::new().pub_key();
        let other = key.clone().with_prefix("TEST");
        assert_eq!(key, other);
        assert_ne!(key.to_string(), other.to_string());
    }

    #[test]
    fn test_sec1_roundtrip() {
        let key = PrivateKey::new().pub_key();
        assert_eq!(PublicKey::from_bytes(&key.to_compressed()).unwrap(), key);
        assert_eq!(PublicKey::from_bytes(&key.to_uncompressed()).unwrap(), key);
        assert_eq!(PublicKey::from_hex(&key.to_hex()).unwrap(), key);
        assert!(PublicKey::from_bytes(&[]).is_err());
    }
}
