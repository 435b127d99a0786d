//! Value movement: transfers and asset issuance.

use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AssetAmount, Memo};

define_operation! {
    /// Move `amount` from one account to another, optionally with a memo.
    Transfer {
        from: Id<tag::Account>,
        to: Id<tag::Account>,
        amount: AssetAmount,
        memo: Option<Memo>,
    }
}

define_operation! {
    /// Issue new supply of a user-issued asset to an account.
    AssetIssue {
        issuer: Id<tag::Account>,
        asset_to_issue: AssetAmount,
        issue_to_account: Id<tag::Account>,
        memo: Option<Memo>,
    }
}
