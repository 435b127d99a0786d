//! Encrypted memos.
//!
//! The sender and recipient derive the same 64-byte shared secret via ECDH.
//! `sha512(decimal(nonce) || hex(secret))` then supplies the AES-256 key
//! (first 32 bytes) and CBC IV (next 16 bytes). The plaintext is prefixed
//! with the first four bytes of its SHA-256 so a wrong key is detected.

use peerplays_primitives::cipher::{aes256_cbc_decrypt, aes256_cbc_encrypt};
use peerplays_primitives::hash::{sha256, sha512};
use peerplays_primitives::util::{WireReader, WireWriter};
use peerplays_primitives::{PrivateKey, PublicKey};
use serde_json::{Map, Value};

use crate::codec::{Bytes, Decode, Encode};
use crate::json::{json_u64, JsonField};
use crate::TypesError;

/// An encrypted memo attached to a transfer or issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo {
    pub from: PublicKey,
    pub to: PublicKey,
    pub nonce: u64,
    pub message: Bytes,
}

fn memo_key_iv(
    priv_key: &PrivateKey,
    other: &PublicKey,
    nonce: u64,
) -> Result<([u8; 32], [u8; 16]), TypesError> {
    let secret = priv_key.shared_secret(other)?;
    let seed = format!("{}{}", nonce, hex::encode(secret));
    let digest = sha512(seed.as_bytes());
    let mut key = [0u8; 32];
    let mut iv = [0u8; 16];
    key.copy_from_slice(&digest[..32]);
    iv.copy_from_slice(&digest[32..48]);
    Ok((key, iv))
}

impl Memo {
    /// Encrypt `text` from the holder of `priv_key` to `to`.
    ///
    /// # Arguments
    /// * `priv_key` - The sender's memo private key.
    /// * `to` - The recipient's memo public key.
    /// * `nonce` - A per-memo nonce; callers normally pick it at random.
    /// * `text` - The plaintext message.
    pub fn encrypt(
        priv_key: &PrivateKey,
        to: &PublicKey,
        nonce: u64,
        text: &str,
    ) -> Result<Self, TypesError> {
        let (key, iv) = memo_key_iv(priv_key, to, nonce)?;
        let mut payload = sha256(text.as_bytes())[..4].to_vec();
        payload.extend_from_slice(text.as_bytes());
        Ok(Memo {
            from: priv_key.pub_key().with_prefix(to.prefix()),
            to: to.clone(),
            nonce,
            message: Bytes(aes256_cbc_encrypt(&key, &iv, &payload)),
        })
    }

    /// Decrypt with one party's private key and the other party's public key.
    ///
    /// # Returns
    /// The plaintext, or `MemoChecksumMismatch` when the key pair does not
    /// match the one the memo was encrypted with.
    pub fn decrypt(&self, priv_key: &PrivateKey, other: &PublicKey) -> Result<String, TypesError> {
        let (key, iv) = memo_key_iv(priv_key, other, self.nonce)?;
        let payload = aes256_cbc_decrypt(&key, &iv, &self.message.0)
            .map_err(|_| TypesError::MemoChecksumMismatch)?;
        if payload.len() < 4 {
            return Err(TypesError::MemoChecksumMismatch);
        }
        let (checksum, text) = payload.split_at(4);
        if checksum != &sha256(text)[..4] {
            return Err(TypesError::MemoChecksumMismatch);
        }
        String::from_utf8(text.to_vec())
            .map_err(|e| TypesError::InvalidField(format!("memo is not utf-8: {}", e)))
    }

    /// The party on the other side of the memo from `own`.
    pub fn counterparty(&self, own: &PublicKey) -> &PublicKey {
        if own == &self.from {
            &self.to
        } else {
            &self.from
        }
    }
}

impl Encode for Memo {
    fn encode(&self, writer: &mut WireWriter) {
        self.from.encode(writer);
        self.to.encode(writer);
        self.nonce.encode(writer);
        self.message.encode(writer);
    }
}

impl Decode for Memo {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(Memo {
            from: PublicKey::decode(reader)?,
            to: PublicKey::decode(reader)?,
            nonce: u64::decode(reader)?,
            message: Bytes::decode(reader)?,
        })
    }
}

/// The nonce is rendered as a decimal string since random nonces exceed the
/// range JSON numbers carry exactly.
impl JsonField for Memo {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("from".to_string(), self.from.to_json());
        map.insert("to".to_string(), self.to.to_json());
        map.insert("nonce".to_string(), Value::String(self.nonce.to_string()));
        map.insert("message".to_string(), self.message.to_json());
        Value::Object(map)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let map = value.as_object().ok_or_else(|| {
            TypesError::InvalidField(format!("expected memo object, got {}", value))
        })?;
        let field = |name: &str| {
            map.get(name)
                .ok_or_else(|| TypesError::InvalidField(format!("memo is missing {}", name)))
        };
        Ok(Memo {
            from: PublicKey::from_json(field("from")?)?,
            to: PublicKey::from_json(field("to")?)?,
            nonce: json_u64(field("nonce")?)?,
            message: Bytes::from_json(field("message")?)?,
        })
    }
}
