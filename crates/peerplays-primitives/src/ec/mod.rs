/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys with WIF encoding, prefixed public keys and
/// addresses in the graphene text format, and compact recoverable signatures
/// with the canonical form the chain accepts.

pub mod private_key;
pub mod public_key;
pub mod address;
pub mod signature;

pub use address::Address;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;

/// Address prefix used when none is configured (PeerPlays mainnet).
pub const DEFAULT_PREFIX: &str = "PPY";
