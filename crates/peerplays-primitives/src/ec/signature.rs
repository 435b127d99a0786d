//! Compact recoverable ECDSA signatures in graphene's canonical form.
//!
//! The wire form is 65 bytes: `[27 + 4 + recid] || r || s`. The chain only
//! accepts signatures where neither `r` nor `s` has its top bit set or an
//! unnecessary leading zero byte, so signing retries with fresh nonces until
//! that holds.

use k256::ecdsa::signature::hazmat::{PrehashSigner, RandomizedPrehashSigner};
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::hash::sha256;
use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const COMPACT_LEN: usize = 65;

/// Header offset for recoverable signatures over compressed keys.
const COMPACT_HEADER_BASE: u8 = 27 + 4;

/// Upper bound on nonce attempts while searching for a canonical signature.
const MAX_SIGNING_ATTEMPTS: u32 = 1024;

/// A 65-byte compact signature with recovery id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: [u8; COMPACT_LEN],
}

impl Signature {
    /// Sign a 32-byte digest, retrying until the result is canonical.
    ///
    /// The first attempt uses the plain RFC6979 nonce; later attempts mix in
    /// entropy seeded from `sha256(digest || attempt)`, so the output is
    /// deterministic for a given key and digest.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte message digest.
    /// * `priv_key` - The signing key.
    ///
    /// # Returns
    /// A canonical compact signature.
    pub fn sign_compact(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let signing_key = priv_key.signing_key();
        let verifying_key = signing_key.verifying_key();

        for attempt in 0..MAX_SIGNING_ATTEMPTS {
            let sig: ecdsa::Signature = if attempt == 0 {
                PrehashSigner::<ecdsa::Signature>::sign_prehash(signing_key, digest)?
            } else {
                let mut seed_input = Vec::with_capacity(36);
                seed_input.extend_from_slice(digest);
                seed_input.extend_from_slice(&attempt.to_le_bytes());
                let mut rng = ChaCha20Rng::from_seed(sha256(&seed_input));
                RandomizedPrehashSigner::<ecdsa::Signature>::sign_prehash_with_rng(
                    signing_key,
                    &mut rng,
                    digest,
                )?
            };
            let sig = sig.normalize_s().unwrap_or(sig);
            let recid = RecoveryId::trial_recovery_from_prehash(verifying_key, digest, &sig)?;

            let mut bytes = [0u8; COMPACT_LEN];
            bytes[0] = COMPACT_HEADER_BASE + recid.to_byte();
            bytes[1..].copy_from_slice(&sig.to_bytes());
            let candidate = Signature { bytes };
            if candidate.is_canonical() {
                return Ok(candidate);
            }
        }
        Err(PrimitivesError::InvalidSignature(
            "no canonical signature found".to_string(),
        ))
    }

    /// Parse a 65-byte compact signature.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let bytes: [u8; COMPACT_LEN] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidSignature("invalid compact signature size".to_string())
        })?;
        if !(27..=34).contains(&bytes[0]) {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid recovery header {}",
                bytes[0]
            )));
        }
        Ok(Signature { bytes })
    }

    /// Parse a hex-encoded compact signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Self::from_compact(&hex::decode(hex_str)?)
    }

    pub fn to_compact(&self) -> [u8; COMPACT_LEN] {
        self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The `r` component (32 bytes, big-endian).
    pub fn r(&self) -> &[u8] {
        &self.bytes[1..33]
    }

    /// The `s` component (32 bytes, big-endian).
    pub fn s(&self) -> &[u8] {
        &self.bytes[33..65]
    }

    /// Whether the signature satisfies the chain's canonical-form rule.
    pub fn is_canonical(&self) -> bool {
        let c = &self.bytes;
        c[1] & 0x80 == 0
            && !(c[1] == 0 && c[2] & 0x80 == 0)
            && c[33] & 0x80 == 0
            && !(c[33] == 0 && c[34] & 0x80 == 0)
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let iteration = (self.bytes[0] - 27) & !4u8;
        let recovery_id = RecoveryId::from_byte(iteration)
            .ok_or_else(|| PrimitivesError::InvalidSignature("invalid recovery id".to_string()))?;
        let recovered = VerifyingKey::recover_from_prehash(digest, &self.to_k256()?, recovery_id)?;
        Ok(PublicKey::from_k256_verifying_key(&recovered))
    }

    pub(crate) fn to_k256(&self) -> Result<ecdsa::Signature, PrimitivesError> {
        Ok(ecdsa::Signature::from_slice(&self.bytes[1..])?)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}
