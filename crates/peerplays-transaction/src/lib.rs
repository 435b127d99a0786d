/// PeerPlays SDK - Transaction assembly, proposals and signing.
///
/// [`TransactionBuilder`] accumulates operations, directly or inside
/// [`ProposalBuilder`]s, resolves fees through the node and produces a
/// [`SignedTransaction`] whose bytes match the node's serializer. The
/// [`SigningEngine`] turns the required account authorities into keys.

pub mod builder;
pub mod config;
pub mod proposal;
pub mod signing;
pub mod transaction;

mod error;
pub use error::TransactionError;

pub use builder::{reference_block, ProposalHandle, Target, TransactionBuilder};
pub use config::BuilderConfig;
pub use proposal::{ProposalBuilder, ProposalExpiration};
pub use signing::SigningEngine;
pub use transaction::SignedTransaction;

#[cfg(test)]
mod tests;
