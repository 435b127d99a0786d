//! Utility types for binary serialization.
//!
//! Provides the LEB128 `VarInt` used by graphene's `unsigned_int`, the zigzag
//! `SignedVarInt` used by `signed_int` (and therefore by enum values), and
//! the `WireReader`/`WireWriter` cursor types that every encoder in the SDK is
//! built on. All fixed-width integers are little-endian regardless of platform.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// An unsigned LEB128 variable-length integer.
///
/// Seven payload bits per byte, least significant group first; the high bit of
/// each byte signals that another byte follows. Counts, lengths, typed object
/// id instances and static-variant tags are all written this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the start of a byte slice.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or an error when the slice ends
    /// mid-value or the value does not fit into 64 bits.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut value: u64 = 0;
        let mut shift = 0u32;
        for (i, &byte) in data.iter().enumerate() {
            if shift >= 64 || (shift == 63 && byte & 0x7e != 0) {
                return Err(PrimitivesError::VarIntOverflow);
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok((VarInt(value), i + 1));
            }
            shift += 7;
        }
        Err(PrimitivesError::UnexpectedEof)
    }

    /// Return the wire-format byte length of this VarInt (1 to 10 bytes).
    pub fn length(&self) -> usize {
        let bits = 64 - self.0.leading_zeros() as usize;
        bits.max(1).div_ceil(7)
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length());
        self.put_bytes(&mut buf);
        buf
    }

    /// Append the encoded VarInt to a destination buffer.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn put_bytes(&self, dst: &mut Vec<u8>) -> usize {
        let mut v = self.0;
        let mut written = 0;
        loop {
            let mut byte = (v & 0x7f) as u8;
            v >>= 7;
            if v != 0 {
                byte |= 0x80;
            }
            dst.push(byte);
            written += 1;
            if v == 0 {
                return written;
            }
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

/// A zigzag-encoded signed 32-bit varint (graphene `signed_int`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedVarInt(pub i32);

impl SignedVarInt {
    /// Map the signed value onto its zigzag unsigned representation.
    pub fn zigzag(&self) -> u32 {
        ((self.0 << 1) ^ (self.0 >> 31)) as u32
    }

    /// Inverse of [`SignedVarInt::zigzag`].
    pub fn from_zigzag(raw: u32) -> Self {
        SignedVarInt(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for graphene wire data.
///
/// Wraps a byte slice and maintains a read position, providing methods
/// to read fixed-size little-endian integers and varints.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PrimitivesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian i64.
    pub fn read_i64_le(&mut self) -> Result<i64, PrimitivesError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Read an unsigned LEB128 varint.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let (value, consumed) = VarInt::from_bytes(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a zigzag-encoded signed varint.
    pub fn read_signed_varint(&mut self) -> Result<SignedVarInt, PrimitivesError> {
        let raw = self.read_varint()?.0;
        let raw = u32::try_from(raw).map_err(|_| PrimitivesError::VarIntOverflow)?;
        Ok(SignedVarInt::from_zigzag(raw))
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for graphene wire data.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        WireWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u16.
    pub fn write_u16_le(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian i64.
    pub fn write_i64_le(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append an unsigned LEB128 varint.
    pub fn write_varint(&mut self, varint: VarInt) {
        varint.put_bytes(&mut self.buf);
    }

    /// Append a zigzag-encoded signed varint.
    pub fn write_signed_varint(&mut self, value: SignedVarInt) {
        self.write_varint(VarInt(u64::from(value.zigzag())));
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
