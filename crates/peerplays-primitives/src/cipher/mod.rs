//! AES-256-CBC with PKCS#7 padding.
//!
//! Memo payloads are encrypted with this mode. CBC chaining runs over the
//! `aes` block cipher one block at a time.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

use crate::PrimitivesError;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Encrypt `plaintext` with AES-256-CBC and PKCS#7 padding.
///
/// # Arguments
/// * `key` - The 32-byte AES key.
/// * `iv` - The 16-byte initialization vector.
/// * `plaintext` - Data of any length, including empty.
///
/// # Returns
/// Ciphertext whose length is the next multiple of 16 above `plaintext.len()`.
pub fn aes256_cbc_encrypt(key: &[u8; 32], iv: &[u8; BLOCK_LEN], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key));

    let pad = BLOCK_LEN - plaintext.len() % BLOCK_LEN;
    let mut data = Vec::with_capacity(plaintext.len() + pad);
    data.extend_from_slice(plaintext);
    data.resize(plaintext.len() + pad, pad as u8);

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        for (b, p) in chunk.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        let block = GenericArray::from_mut_slice(chunk);
        cipher.encrypt_block(block);
        prev.copy_from_slice(chunk);
    }
    data
}

/// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding.
///
/// # Returns
/// The plaintext, or `DecryptionError` when the ciphertext length is not a
/// positive multiple of the block size or the padding is malformed.
pub fn aes256_cbc_decrypt(
    key: &[u8; 32],
    iv: &[u8; BLOCK_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, PrimitivesError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(PrimitivesError::DecryptionError(format!(
            "ciphertext length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_LEN
        )));
    }
    let cipher = Aes256::new(GenericArray::from_slice(key));

    let mut out = ciphertext.to_vec();
    let mut prev = *iv;
    for chunk in out.chunks_exact_mut(BLOCK_LEN) {
        let mut saved = [0u8; BLOCK_LEN];
        saved.copy_from_slice(chunk);
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        for (b, p) in chunk.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        prev = saved;
    }

    let pad = usize::from(out[out.len() - 1]);
    if pad == 0 || pad > BLOCK_LEN || out[out.len() - pad..].iter().any(|&b| usize::from(b) != pad) {
        return Err(PrimitivesError::DecryptionError("invalid padding".to_string()));
    }
    out.truncate(out.len() - pad);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_iv() -> ([u8; 32], [u8; 16]) {
        let key: [u8; 32] =
            hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
                .unwrap()
                .try_into()
                .unwrap();
        let iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
            .unwrap()
            .try_into()
            .unwrap();
        (key, iv)
    }

    /// NIST SP 800-38A, F.2.5 CBC-AES256.Encrypt (first two blocks).
    #[test]
    fn test_nist_vector() {
        let (key, iv) = key_iv();
        let plaintext =
            hex::decode("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51")
                .unwrap();
        let ct = aes256_cbc_encrypt(&key, &iv, &plaintext);
        assert_eq!(ct.len(), 48);
        assert_eq!(
            hex::encode(&ct[..32]),
            "f58c4c04d6e5f1ba779eabfb5f7bfbd69cfc4e967edb808d679f777bc6702c7d"
        );
        assert_eq!(aes256_cbc_decrypt(&key, &iv, &ct).unwrap(), plaintext);
    }

    #[test]
    fn test_roundtrip_various_lengths() {
        let (key, iv) = key_iv();
        for len in [0usize, 1, 15, 16, 17, 100] {
            let msg = vec![0xabu8; len];
            let ct = aes256_cbc_encrypt(&key, &iv, &msg);
            assert_eq!(ct.len() % BLOCK_LEN, 0);
            assert!(ct.len() > len);
            assert_eq!(aes256_cbc_decrypt(&key, &iv, &ct).unwrap(), msg);
        }
    }

    #[test]
    fn test_rejects_bad_length() {
        let (key, iv) = key_iv();
        assert!(aes256_cbc_decrypt(&key, &iv, &[]).is_err());
        assert!(aes256_cbc_decrypt(&key, &iv, &[0u8; 15]).is_err());
    }

    #[test]
    fn test_wrong_key_fails_or_differs() {
        let (key, iv) = key_iv();
        let ct = aes256_cbc_encrypt(&key, &iv, b"attack at dawn");
        let mut other = key;
        other[0] ^= 1;
        match aes256_cbc_decrypt(&other, &iv, &ct) {
            Ok(pt) => assert_ne!(pt, b"attack at dawn"),
            Err(e) => assert!(matches!(e, PrimitivesError::DecryptionError(_))),
        }
    }
}
