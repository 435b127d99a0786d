/// PeerPlays SDK - Client session.
///
/// A [`Client`] binds a node transport, a key store and a [`ClientConfig`]
/// into one session. Its helpers look up names and ids through the session's
/// object cache and append typed operations to a transaction or to one of its
/// proposals; [`Client::broadcast`] then resolves fees, picks the reference
/// block, signs and submits.

pub mod account;
pub mod bookie;
pub mod client;
pub mod config;

mod error;
pub use error::ClientError;

pub use bookie::Localized;
pub use client::Client;
pub use config::ClientConfig;

#[cfg(test)]
mod tests;
