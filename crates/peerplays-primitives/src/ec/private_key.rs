//! secp256k1 private key with graphene-specific functionality.
//!
//! Wraps the k256 signing key and adds WIF encoding, the ECDH shared secret
//! used by memo encryption, and canonical compact signing.

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::{sha256d, sha512};
use crate::PrimitivesError;

/// A secp256k1 private key for signing and memo encryption.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF version byte.
const WIF_VERSION: u8 = 0x80;

/// Compression flag byte some wallets append to the WIF payload.
const COMPRESS_MAGIC: u8 = 0x01;

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid non-zero scalar below
    /// the curve order, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Accepts both the plain form (`0x80 || key || checksum`) that graphene
    /// wallets export and the compressed-flag form
    /// (`0x80 || key || 0x01 || checksum`).
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or `InvalidWif`/`ChecksumMismatch` when
    /// the string is malformed.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let decoded = Zeroizing::new(
            bs58::decode(wif)
                .into_vec()
                .map_err(|e| PrimitivesError::InvalidWif(e.to_string()))?,
        );
        let payload_end = match decoded.len() {
            38 if decoded[33] == COMPRESS_MAGIC => 34,
            38 => {
                return Err(PrimitivesError::InvalidWif(
                    "malformed private key: invalid compression flag".to_string(),
                ))
            }
            37 => 33,
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed private key: invalid length {}",
                    n
                )))
            }
        };
        if decoded[0] != WIF_VERSION {
            return Err(PrimitivesError::InvalidWif(format!(
                "unexpected version byte 0x{:02x}",
                decoded[0]
            )));
        }
        let checksum = sha256d(&decoded[..payload_end]);
        if checksum[..4] != decoded[payload_end..] {
            return Err(PrimitivesError::ChecksumMismatch);
        }
        Self::from_bytes(&decoded[1..1 + PRIVATE_KEY_BYTES_LEN])
    }

    /// Encode the private key as a WIF string.
    ///
    /// Graphene wallets use the form without the compression flag, so keys
    /// always render with the familiar leading `5`.
    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 4));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&self.to_bytes());
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload.as_slice()).into_string()
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the public key for this private key, carrying the default prefix.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Produce a canonical compact signature over a 32-byte digest.
    ///
    /// See [`Signature::sign_compact`].
    pub fn sign_canonical(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign_compact(digest, self)
    }

    /// Compute the memo shared secret with another party's public key.
    ///
    /// The shared point is `their_pub * self`; the secret is SHA-512 over the
    /// 32-byte X coordinate of that point.
    ///
    /// # Returns
    /// The 64-byte shared secret, identical on both sides of the exchange.
    pub fn shared_secret(&self, their_pub: &PublicKey) -> Result<[u8; 64], PrimitivesError> {
        let point = their_pub.to_projective_point() * self.to_scalar();
        if point == ProjectivePoint::IDENTITY {
            return Err(PrimitivesError::PointNotOnCurve);
        }
        let encoded = point.to_affine().to_encoded_point(false);
        let x = encoded.x().ok_or(PrimitivesError::PointNotOnCurve)?;
        Ok(sha512(x))
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }

    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.as_nonzero_scalar().as_ref()
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl std::str::FromStr for PrivateKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wif(s)
    }
}
