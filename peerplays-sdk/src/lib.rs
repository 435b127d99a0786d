#![deny(missing_docs)]

//! PeerPlays SDK - Complete SDK.
//!
//! Re-exports all PeerPlays SDK components for convenient single-crate usage.

/// Keys, hashes, base58 and the memo cipher.
pub use peerplays_primitives as primitives;
/// Wire codec, object ids and protocol value types.
pub use peerplays_types as types;
/// Operation registry and typed operation records.
pub use peerplays_operations as operations;
/// Node interface, object cache and key store.
pub use peerplays_chain as chain;
/// Transaction assembly, proposals and signing.
pub use peerplays_transaction as transaction;
/// Client session and operation helpers.
pub use peerplays_client as client;

pub use peerplays_client::{Client, ClientConfig, ClientError};
