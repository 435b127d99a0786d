/// PeerPlays SDK - Cryptographic primitives, hashing, and wire utilities.
///
/// This crate provides the foundational building blocks for the PeerPlays SDK:
/// - Hash functions (SHA-256, SHA-256d, SHA-512, RIPEMD-160)
/// - Base58 encoding with bitcoin and graphene checksums
/// - secp256k1 keys with WIF import/export and prefixed public-key strings
/// - Compact, canonical, recoverable ECDSA signatures
/// - AES-256-CBC used by memo encryption
/// - LEB128 varints and little-endian wire readers/writers

pub mod hash;
pub mod base58;
pub mod util;
pub mod ec;
pub mod cipher;

mod error;
pub use error::PrimitivesError;
pub use ec::{Address, PrivateKey, PublicKey, Signature, DEFAULT_PREFIX};
