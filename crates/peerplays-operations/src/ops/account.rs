//! Account lifecycle operations.

use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AccountOptions, Permission};

define_operation! {
    /// Register a new account paid for by `registrar`.
    AccountCreate {
        registrar: Id<tag::Account>,
        referrer: Id<tag::Account>,
        /// Share of the referral rewards, in hundredths of a percent.
        referrer_percent: u16,
        name: String,
        owner: Permission,
        active: Permission,
        options: AccountOptions,
    }
}

define_operation! {
    /// Replace an account's authorities and/or options.
    ///
    /// Changing either authority requires the owner authority.
    AccountUpdate {
        account: Id<tag::Account>,
        owner: Option<Permission>,
        active: Option<Permission>,
        new_options: Option<AccountOptions>,
    }
}

define_operation! {
    AccountUpgrade {
        account_to_upgrade: Id<tag::Account>,
        upgrade_to_lifetime_member: bool,
    }
}
