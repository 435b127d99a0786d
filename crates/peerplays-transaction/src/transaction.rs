//! Signed transaction wire and JSON forms.

use peerplays_operations::Operation;
use peerplays_primitives::hash::sha256;
use peerplays_primitives::util::{VarInt, WireReader, WireWriter};
use peerplays_primitives::{PrivateKey, PublicKey, Signature};
use peerplays_types::json::{as_object, lookup};
use peerplays_types::{Decode, Encode, Extensions, JsonField, PointInTime};
use serde_json::{Map, Value};
use tracing::trace;

use crate::TransactionError;

fn ser(what: &str, e: impl std::fmt::Display) -> TransactionError {
    TransactionError::SerializationError(format!("reading {}: {}", what, e))
}

/// A PeerPlays transaction with its signatures.
///
/// # Wire format
///
/// | Field            | Size                         |
/// |------------------|------------------------------|
/// | ref_block_num    | 2 bytes (LE)                 |
/// | ref_block_prefix | 4 bytes (LE)                 |
/// | expiration       | 4 bytes (LE, Unix seconds)   |
/// | operations       | varint count + operations    |
/// | extensions       | varint count (always 0)      |
/// | signatures       | varint count + 65 bytes each |
///
/// Signatures are not part of the signed digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: PointInTime,
    pub operations: Vec<Operation>,
    pub extensions: Extensions,
    pub signatures: Vec<Signature>,
}

impl SignedTransaction {
    pub fn new(ref_block_num: u16, ref_block_prefix: u32, expiration: PointInTime) -> Self {
        SignedTransaction {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations: Vec::new(),
            extensions: Extensions,
            signatures: Vec::new(),
        }
    }

    fn encode_unsigned(&self, writer: &mut WireWriter) {
        writer.write_u16_le(self.ref_block_num);
        writer.write_u32_le(self.ref_block_prefix);
        self.expiration.encode(writer);
        self.operations.encode(writer);
        self.extensions.encode(writer);
    }

    /// The bytes covered by signatures.
    pub fn unsigned_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.encode_unsigned(&mut writer);
        writer.into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.encode_unsigned(&mut writer);
        writer.write_varint(VarInt(self.signatures.len() as u64));
        for sig in &self.signatures {
            sig.encode(&mut writer);
        }
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parse a transaction from hex.
    ///
    /// # Arguments
    /// * `hex_str` - Hex of the full signed form.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes, rejecting trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = WireReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    pub fn read_from(reader: &mut WireReader<'_>) -> Result<Self, TransactionError> {
        let ref_block_num = reader.read_u16_le().map_err(|e| ser("ref_block_num", e))?;
        let ref_block_prefix = reader.read_u32_le().map_err(|e| ser("ref_block_prefix", e))?;
        let expiration = PointInTime::decode(reader).map_err(|e| ser("expiration", e))?;

        let count = reader.read_varint().map_err(|e| ser("operation count", e))?.value();
        let mut operations = Vec::new();
        for _ in 0..count {
            operations.push(Operation::read(reader)?);
        }
        let extensions = Extensions::decode(reader).map_err(|e| ser("extensions", e))?;

        let count = reader.read_varint().map_err(|e| ser("signature count", e))?.value();
        let mut signatures = Vec::new();
        for _ in 0..count {
            signatures.push(Signature::decode(reader).map_err(|e| ser("signature", e))?);
        }
        Ok(SignedTransaction {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions,
            signatures,
        })
    }

    /// `sha256(chain_id || unsigned bytes)`, the message every signer signs.
    pub fn digest(&self, chain_id: &[u8; 32]) -> [u8; 32] {
        let mut message = chain_id.to_vec();
        message.extend_from_slice(&self.unsigned_bytes());
        let digest = sha256(&message);
        trace!(digest = %hex::encode(digest), "transaction digest");
        digest
    }

    /// Transaction id: first 20 bytes of `sha256(unsigned bytes)`, as hex.
    pub fn id(&self) -> String {
        hex::encode(&sha256(&self.unsigned_bytes())[..20])
    }

    /// Append one canonical signature per key, in key order.
    ///
    /// Keys that already signed this digest are skipped.
    pub fn sign(&mut self, keys: &[PrivateKey], chain_id: &[u8; 32]) -> Result<(), TransactionError> {
        let digest = self.digest(chain_id);
        let mut signed = self.verify(chain_id)?;
        for key in keys {
            let public = key.pub_key();
            if signed.contains(&public) {
                continue;
            }
            self.signatures.push(key.sign_canonical(&digest)?);
            signed.push(public);
        }
        Ok(())
    }

    /// Public keys recovered from each signature, in signature order.
    pub fn verify(&self, chain_id: &[u8; 32]) -> Result<Vec<PublicKey>, TransactionError> {
        let digest = self.digest(chain_id);
        self.signatures
            .iter()
            .map(|sig| Ok(sig.recover_public_key(&digest)?))
            .collect()
    }

    /// JSON in the node's field order.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("ref_block_num".to_string(), self.ref_block_num.to_json());
        map.insert("ref_block_prefix".to_string(), self.ref_block_prefix.to_json());
        map.insert("expiration".to_string(), self.expiration.to_json());
        map.insert(
            "operations".to_string(),
            Value::Array(self.operations.iter().map(Operation::to_json).collect()),
        );
        map.insert("extensions".to_string(), self.extensions.to_json());
        map.insert("signatures".to_string(), self.signatures.to_json());
        Value::Object(map)
    }

    pub fn from_json(value: &Value) -> Result<Self, TransactionError> {
        let map = as_object(value, "transaction")?;
        let operations = match map.get("operations") {
            Some(Value::Array(ops)) => ops
                .iter()
                .map(Operation::from_json)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(TransactionError::SerializationError(format!(
                    "operations must be an array, got {}",
                    other
                )))
            }
            None => Vec::new(),
        };
        Ok(SignedTransaction {
            ref_block_num: lookup(map, "ref_block_num")?,
            ref_block_prefix: lookup(map, "ref_block_prefix")?,
            expiration: lookup(map, "expiration")?,
            operations,
            extensions: lookup(map, "extensions")?,
            signatures: lookup::<Option<Vec<Signature>>>(map, "signatures")?.unwrap_or_default(),
        })
    }
}
