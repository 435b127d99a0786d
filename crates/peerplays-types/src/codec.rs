//! Canonical wire encoding.
//!
//! Fixed-width integers are little-endian; strings, byte blobs and sequences
//! carry a varint length prefix; optionals carry a one-byte presence flag.
//! Sequences are written in the order held, so producers of ordered maps must
//! sort before constructing the value.

use peerplays_primitives::util::{VarInt, WireReader, WireWriter};
use peerplays_primitives::{PublicKey, Signature};

use crate::TypesError;

/// A value with a canonical wire encoding.
pub trait Encode {
    /// Append the canonical encoding of `self` to `writer`.
    fn encode(&self, writer: &mut WireWriter);

    /// Encode into a fresh byte vector.
    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = WireWriter::new();
        self.encode(&mut writer);
        writer.into_bytes()
    }

    /// Encode into a lowercase hex string.
    fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// A value that can be read back from its canonical wire encoding.
pub trait Decode: Sized {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError>;
}

/// Decode a complete value, rejecting trailing bytes.
///
/// # Arguments
/// * `bytes` - The full encoding of exactly one value.
///
/// # Returns
/// The decoded value, or `TrailingBytes` if the buffer holds more than one
/// value's worth of data.
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<T, TypesError> {
    let mut reader = WireReader::new(bytes);
    let value = T::decode(&mut reader)?;
    if reader.remaining() != 0 {
        return Err(TypesError::TrailingBytes(reader.remaining()));
    }
    Ok(value)
}

/// Decode a complete value from hex.
pub fn from_hex<T: Decode>(hex_str: &str) -> Result<T, TypesError> {
    let bytes = hex::decode(hex_str).map_err(peerplays_primitives::PrimitivesError::from)?;
    from_bytes(&bytes)
}

/// Read a varint length and check it against the bytes actually left, so a
/// corrupt prefix cannot trigger a huge allocation.
pub(crate) fn read_len(reader: &mut WireReader<'_>) -> Result<usize, TypesError> {
    let len = reader.read_varint()?.value();
    if len > reader.remaining() as u64 {
        return Err(peerplays_primitives::PrimitivesError::UnexpectedEof.into());
    }
    Ok(len as usize)
}

/// Opaque byte blob: varint length + raw bytes on the wire, hex in JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Encode for Bytes {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.0.len()));
        writer.write_bytes(&self.0);
    }
}

impl Decode for Bytes {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let len = read_len(reader)?;
        Ok(Bytes(reader.read_bytes(len)?.to_vec()))
    }
}

impl Encode for u8 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u8(*self);
    }
}

impl Decode for u8 {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_u8()?)
    }
}

impl Encode for u16 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u16_le(*self);
    }
}

impl Decode for u16 {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_u16_le()?)
    }
}

impl Encode for u32 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u32_le(*self);
    }
}

impl Decode for u32 {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_u32_le()?)
    }
}

impl Encode for u64 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u64_le(*self);
    }
}

impl Decode for u64 {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_u64_le()?)
    }
}

impl Encode for i64 {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_i64_le(*self);
    }
}

impl Decode for i64 {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_i64_le()?)
    }
}

impl Encode for bool {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u8(u8::from(*self));
    }
}

impl Decode for bool {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(TypesError::InvalidField(format!("bool byte {}", other))),
        }
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.len()));
        writer.write_bytes(self.as_bytes());
    }
}

impl Decode for String {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let len = read_len(reader)?;
        let raw = reader.read_bytes(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|e| TypesError::InvalidField(format!("string is not utf-8: {}", e)))
    }
}

impl Encode for [u8; 32] {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_bytes(self);
    }
}

impl Decode for [u8; 32] {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(reader.read_array()?)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt::from(self.len()));
        for item in self {
            item.encode(writer);
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let count = read_len(reader)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(reader)?);
        }
        Ok(items)
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, writer: &mut WireWriter) {
        match self {
            Some(value) => {
                writer.write_u8(1);
                value.encode(writer);
            }
            None => writer.write_u8(0),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(reader)?)),
            other => Err(TypesError::InvalidField(format!("optional flag {}", other))),
        }
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode(&self, writer: &mut WireWriter) {
        self.0.encode(writer);
        self.1.encode(writer);
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok((A::decode(reader)?, B::decode(reader)?))
    }
}

/// Public keys travel as the 33-byte compressed point.
impl Encode for PublicKey {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_bytes(&self.to_compressed());
    }
}

impl Decode for PublicKey {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let bytes: [u8; 33] = reader.read_array()?;
        Ok(PublicKey::from_bytes(&bytes)?)
    }
}

impl Encode for Signature {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_bytes(&self.to_compact());
    }
}

impl Decode for Signature {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let bytes: [u8; 65] = reader.read_array()?;
        Ok(Signature::from_compact(&bytes)?)
    }
}
