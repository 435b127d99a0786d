//! Base58 encoding and decoding with the two checksum flavours graphene uses.
//!
//! * Bitcoin Base58Check (first 4 bytes of SHA-256d) protects WIF private keys.
//! * Graphene checksums (first 4 bytes of RIPEMD-160) protect public keys and
//!   addresses, which are additionally prefixed with the chain's address prefix
//!   (`PPY`, `TEST`, ...) outside of the base58 payload.

use crate::hash::{ripemd160, sha256d};
use crate::PrimitivesError;

/// Encode a byte slice to a Base58 string (bitcoin alphabet).
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// Leading '1' characters decode to leading zero bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode with a 4-byte double-SHA-256 checksum appended (Base58Check).
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte double-SHA-256 checksum.
///
/// # Returns
/// The payload without its checksum, or an error for invalid encoding or
/// checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    let (payload, checksum) = split_checksum(&decoded)?;
    if checksum != &sha256d(payload)[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Encode with a 4-byte RIPEMD-160 checksum appended (graphene keys/addresses).
pub fn graphene_check_encode(data: &[u8]) -> String {
    let checksum = ripemd160(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..4]);
    encode(&payload)
}

/// Decode a graphene-checksummed Base58 string.
pub fn graphene_check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    let (payload, checksum) = split_checksum(&decoded)?;
    if checksum != &ripemd160(payload)[..4] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

fn split_checksum(decoded: &[u8]) -> Result<(&[u8], &[u8]), PrimitivesError> {
    if decoded.len() < 4 {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    Ok(decoded.split_at(decoded.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_empty_string() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base58_single_zero_byte() {
        assert_eq!(encode(&[0]), "1");
        assert_eq!(decode("1").unwrap(), vec![0]);
    }

    #[test]
    fn test_base58_decoded_address() {
        let input = hex::decode("00010966776006953D5567439E5E39F86A0D273BEED61967F6").unwrap();
        assert_eq!(encode(&input), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
        assert_eq!(decode("16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM").unwrap(), input);
    }

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    #[test]
    fn test_base58_decode_invalid_character() {
        assert!(decode("invalid!@#$%").is_err());
        // '0', 'O', 'I' and 'l' are not part of the alphabet
        assert!(decode("0OIl").is_err());
    }

    #[test]
    fn test_base58_check_roundtrip() {
        let payload = hex::decode("00f54a5851e9372b87810a8e60cdd2e7cfd80b6e31").unwrap();
        let encoded = check_encode(&payload);
        assert_eq!(check_decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_graphene_check_roundtrip() {
        let payload = hex::decode("02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf").unwrap();
        let encoded = graphene_check_encode(&payload);
        assert_eq!(graphene_check_decode(&encoded).unwrap(), payload);
        // The two checksum flavours are not interchangeable.
        assert!(check_decode(&encoded).is_err());
    }

    #[test]
    fn test_base58_check_bad_checksum() {
        let payload = vec![0x80, 0x01, 0x02, 0x03];
        let mut encoded = check_encode(&payload);
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert!(check_decode(&encoded).is_err());
    }

    #[test]
    fn test_checksum_too_short() {
        assert!(matches!(
            graphene_check_decode("1"),
            Err(PrimitivesError::InvalidBase58(_))
        ));
    }
}
