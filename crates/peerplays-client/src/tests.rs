//! Session-level tests: helpers, proposal bundles and the broadcast path,
//! all against an in-memory node.

use std::sync::Arc;

use peerplays_chain::testing::MockChain;
use peerplays_chain::{ChainError, InMemoryKeyStore, RpcError, BEATRICE};
use peerplays_operations::{AuthorityLevel, Operation};
use peerplays_primitives::PrivateKey;
use peerplays_transaction::{Target, TransactionError};
use peerplays_types::object_id::Id;
use peerplays_types::{BetType, Memo};
use serde_json::json;

use crate::{Client, ClientConfig, ClientError};

const TEST_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

struct Fixture {
    chain: Arc<MockChain>,
    client: Client,
    bob: PrivateKey,
}

/// `alice` (1.2.7) holds the test key, `bob` (1.2.8) a fresh one.
fn fixture(config: ClientConfig) -> Fixture {
    let chain = Arc::new(MockChain::new());
    let alice = PrivateKey::from_wif(TEST_WIF).unwrap();
    let bob = PrivateKey::new();
    chain.add_account(7, "alice", &alice.pub_key());
    chain.add_account(8, "bob", &bob.pub_key());
    chain.add_asset(0, "PPY", 5);
    let keystore = InMemoryKeyStore::from_wifs([TEST_WIF]).unwrap();
    let client = Client::new(chain.clone(), Arc::new(keystore), config).unwrap();
    Fixture { chain, client, bob }
}

fn default_config() -> ClientConfig {
    ClientConfig {
        default_account: Some("alice".to_string()),
        ..ClientConfig::default()
    }
}

fn authority(threshold: u32, keys: &[(String, u16)]) -> serde_json::Value {
    let key_auths: Vec<_> = keys.iter().map(|(k, w)| json!([k, w])).collect();
    json!({
        "weight_threshold": threshold,
        "account_auths": [],
        "key_auths": key_auths,
        "address_auths": []
    })
}

// -----------------------------------------------------------------------
// Session setup
// -----------------------------------------------------------------------

#[test]
fn test_chain_mismatch_is_refused() {
    let chain = Arc::new(MockChain::new());
    let config = ClientConfig {
        chain_id: Some(BEATRICE.chain_id.to_string()),
        ..ClientConfig::default()
    };
    match Client::new(chain, Arc::new(InMemoryKeyStore::new()), config) {
        Err(ClientError::ChainMismatch { expected, .. }) => assert_eq!(expected, BEATRICE.chain_id),
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("connected to the wrong chain"),
    }
}

#[test]
fn test_prefix_override() {
    let f = fixture(ClientConfig {
        prefix: Some("TEST".to_string()),
        ..default_config()
    });
    assert_eq!(f.client.chain().prefix, "TEST");
    assert_eq!(f.client.chain().core_symbol, "PPY");
}

#[test]
fn test_helpers_need_an_account() {
    let f = fixture(ClientConfig::default());
    let mut builder = f.client.new_transaction().unwrap();
    assert!(matches!(
        f.client.upgrade_account(&mut builder, Target::Transaction, None),
        Err(ClientError::NoDefaultAccount)
    ));
    f.client
        .upgrade_account(&mut builder, Target::Transaction, Some("alice"))
        .unwrap();
    assert_eq!(builder.len(), 1);
}

// -----------------------------------------------------------------------
// Transfers and memos
// -----------------------------------------------------------------------

#[test]
fn test_transfer_with_memo() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .transfer(&mut builder, Target::Transaction, "bob", 1_000, "PPY", Some("for lunch"), None)
        .unwrap();

    let memo: Memo = match builder.list_operations()[0] {
        Operation::Transfer(t) => {
            assert_eq!(t.from, Id::new(7));
            assert_eq!(t.to, Id::new(8));
            assert_eq!(t.amount.amount, 1_000);
            t.memo.clone().unwrap()
        }
        other => panic!("unexpected operation {}", other.name()),
    };
    assert_eq!(memo.to, f.bob.pub_key());
    assert_eq!(f.client.decrypt_memo(&memo).unwrap(), "for lunch");
}

#[test]
fn test_transfer_to_unknown_account() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let err = f
        .client
        .transfer(&mut builder, Target::Transaction, "carol", 1, "PPY", None, None)
        .unwrap_err();
    assert!(matches!(err, ClientError::Chain(ChainError::AccountDoesNotExist(_))));
    assert!(builder.is_empty());
}

#[test]
fn test_memo_from_foreign_account_is_refused() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let err = f
        .client
        .transfer(&mut builder, Target::Transaction, "alice", 1, "PPY", Some("hi"), Some("bob"))
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingMemoKey(_)));
}

// -----------------------------------------------------------------------
// Proposals and relative ids
// -----------------------------------------------------------------------

#[test]
fn test_proposal_relative_ids() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let proposal = Target::Proposal(f.client.new_proposal(&mut builder, None).unwrap());

    f.client
        .sport_create(&mut builder, proposal, &[("en", "Football")])
        .unwrap();
    f.client
        .event_group_create(&mut builder, proposal, &[("en", "Premier League")], "0.0.0")
        .unwrap();

    let err = f
        .client
        .event_group_create(&mut builder, proposal, &[("en", "La Liga")], "0.0.5")
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transaction(TransactionError::ObjectNotInProposalBuffer { .. })
    ));

    // 0.0.1 is the event group, not a sport.
    assert!(f
        .client
        .event_group_create(&mut builder, proposal, &[("en", "Serie A")], "0.0.1")
        .is_err());

    f.client.broadcast(&mut builder).unwrap();
    let sent = &f.chain.broadcasts()[0];
    assert_eq!(sent["operations"][0][0], 22);
    assert_eq!(sent["operations"][0][1]["proposed_ops"].as_array().unwrap().len(), 2);
    assert_eq!(sent["signatures"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_parent_objects() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let err = f
        .client
        .event_group_create(&mut builder, Target::Transaction, &[("en", "Cup")], "1.20.99")
        .unwrap_err();
    assert!(matches!(err, ClientError::Chain(ChainError::SportDoesNotExist(_))));

    f.chain.insert_object(json!({"id": "1.20.99", "name": [["en", "Chess"]]}));
    f.client
        .event_group_create(&mut builder, Target::Transaction, &[("en", "Cup")], "1.20.99")
        .unwrap();
}

#[test]
fn test_bookie_chain_in_one_transaction() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let t = Target::Transaction;
    f.client.sport_create(&mut builder, t, &[("en", "Tennis")]).unwrap();
    f.client
        .event_group_create(&mut builder, t, &[("en", "Wimbledon")], "0.0.0")
        .unwrap();
    f.client
        .event_create(&mut builder, t, &[("en", "Final")], &[("en", "2024")], None, "0.0.1")
        .unwrap();
    f.client
        .betting_market_rules_create(&mut builder, t, &[("en", "Moneyline")], &[("en", "Winner")])
        .unwrap();
    f.client
        .betting_market_group_create(
            &mut builder,
            t,
            &[("en", "Match winner")],
            "0.0.2",
            "0.0.3",
            "PPY",
            false,
            0,
            peerplays_types::ResolutionConstraint::ExactlyOneWinner,
        )
        .unwrap();
    f.client
        .betting_market_create(&mut builder, t, "0.0.4", &[("en", "Player A")], &[("en", "A wins")])
        .unwrap();
    assert_eq!(builder.len(), 6);

    // Rules are not events.
    assert!(f
        .client
        .betting_market_group_create(
            &mut builder,
            t,
            &[("en", "Bad")],
            "0.0.3",
            "0.0.3",
            "PPY",
            false,
            0,
            peerplays_types::ResolutionConstraint::AtMostOneWinner,
        )
        .is_err());
}

#[test]
fn test_localized_text_must_not_be_empty() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    assert!(matches!(
        f.client.sport_create(&mut builder, Target::Transaction, &[]),
        Err(ClientError::InvalidArgument(_))
    ));
}

#[test]
fn test_approve_proposal() {
    let f = fixture(default_config());
    f.chain.insert_object(json!({"id": "1.10.3", "proposer": "1.2.8"}));
    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .approve_proposal(&mut builder, Target::Transaction, &["1.10.3"], None)
        .unwrap();
    match builder.list_operations()[0] {
        Operation::ProposalUpdate(update) => {
            assert_eq!(update.proposal, Id::new(3));
            assert_eq!(update.active_approvals_to_add.as_slice(), &[Id::new(7)]);
        }
        other => panic!("unexpected operation {}", other.name()),
    }

    assert!(matches!(
        f.client
            .approve_proposal(&mut builder, Target::Transaction, &["1.10.4"], None),
        Err(ClientError::Chain(ChainError::ProposalDoesNotExist(_)))
    ));
}

// -----------------------------------------------------------------------
// Betting
// -----------------------------------------------------------------------

#[test]
fn test_bet_place_requires_market() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let err = f
        .client
        .bet_place(&mut builder, Target::Transaction, "1.25.0", 100, "PPY", 20_000, BetType::Back, None)
        .unwrap_err();
    assert!(matches!(err, ClientError::Chain(ChainError::BettingMarketDoesNotExist(_))));

    f.chain.insert_object(json!({"id": "1.25.0", "group_id": "1.24.0"}));
    f.client
        .bet_place(&mut builder, Target::Transaction, "1.25.0", 100, "PPY", 20_000, BetType::Lay, None)
        .unwrap();
    match builder.list_operations()[0] {
        Operation::BetPlace(bet) => {
            assert_eq!(bet.bettor_id, Id::new(7));
            assert_eq!(bet.betting_market_id, Id::new(0));
            assert_eq!(bet.backer_multiplier, 20_000);
            assert_eq!(bet.back_or_lay, BetType::Lay);
        }
        other => panic!("unexpected operation {}", other.name()),
    }
}

#[test]
fn test_resolve_and_cancel() {
    let f = fixture(default_config());
    f.chain.insert_object(json!({"id": "1.24.1"}));
    f.chain.insert_object(json!({"id": "1.25.2"}));
    f.chain.insert_object(json!({"id": "1.25.3"}));
    f.chain.insert_object(json!({"id": "1.26.9", "bettor_id": "1.2.7"}));
    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .betting_market_resolve(
            &mut builder,
            Target::Transaction,
            "1.24.1",
            &[
                ("1.25.3", peerplays_types::BettingMarketResolution::Win),
                ("1.25.2", peerplays_types::BettingMarketResolution::NotWin),
            ],
        )
        .unwrap();
    match builder.list_operations()[0] {
        Operation::BettingMarketGroupResolve(resolve) => {
            let markets: Vec<u64> = resolve.resolutions.iter().map(|(m, _)| m.instance()).collect();
            assert_eq!(markets, vec![2, 3]);
            assert_eq!(
                resolve.resolutions.get(&Id::new(3)),
                Some(&peerplays_types::BettingMarketResolution::Win)
            );
        }
        other => panic!("unexpected operation {}", other.name()),
    }
    f.client
        .bet_cancel(&mut builder, Target::Transaction, "1.26.9", None)
        .unwrap();
    assert_eq!(builder.len(), 2);

    assert!(matches!(
        f.client.betting_market_resolve(
            &mut builder,
            Target::Transaction,
            "1.24.1",
            &[
                ("1.25.2", peerplays_types::BettingMarketResolution::Win),
                ("1.25.2", peerplays_types::BettingMarketResolution::Cancel),
            ],
        ),
        Err(ClientError::Types(_))
    ));
    assert_eq!(builder.len(), 2);

    assert!(matches!(
        f.client.betting_market_resolve(
            &mut builder,
            Target::Transaction,
            "1.24.1",
            &[("1.25.4", peerplays_types::BettingMarketResolution::Cancel)],
        ),
        Err(ClientError::Chain(ChainError::BettingMarketDoesNotExist(_)))
    ));
}

// -----------------------------------------------------------------------
// Authorities
// -----------------------------------------------------------------------

#[test]
fn test_allow_key_uses_threshold_as_weight() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let newcomer = PrivateKey::new().pub_key().to_string();
    f.client
        .allow(&mut builder, Target::Transaction, &newcomer, None, AuthorityLevel::Active, None, None)
        .unwrap();
    match builder.list_operations()[0] {
        Operation::AccountUpdate(update) => {
            assert!(update.owner.is_none());
            let active = update.active.as_ref().unwrap();
            assert_eq!(active.key_auths().len(), 2);
            assert!(active.key_auths().iter().all(|(_, w)| *w == 1));
            assert_eq!(active.weight_threshold(), 1);
        }
        other => panic!("unexpected operation {}", other.name()),
    }
}

#[test]
fn test_active_only_update_signs_with_active_key() {
    let f = fixture(default_config());
    let owner_key = PrivateKey::new().pub_key().to_string();
    let active_key = PrivateKey::from_wif(TEST_WIF).unwrap().pub_key().to_string();
    f.chain.add_account_with(
        9,
        "carol",
        authority(1, &[(owner_key, 1)]),
        authority(1, &[(active_key.clone(), 1)]),
        &active_key,
    );
    let mut builder = f.client.new_transaction().unwrap();
    let newcomer = PrivateKey::new().pub_key().to_string();
    f.client
        .allow(&mut builder, Target::Transaction, &newcomer, None, AuthorityLevel::Active, None, Some("carol"))
        .unwrap();
    f.client.broadcast(&mut builder).unwrap();
    assert_eq!(f.chain.broadcasts().len(), 1);
    assert_eq!(builder.transaction().unwrap().signatures.len(), 1);
}

#[test]
fn test_allow_account_and_reject_unreachable_threshold() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .allow(&mut builder, Target::Transaction, "bob", Some(1), AuthorityLevel::Owner, Some(2), None)
        .unwrap();
    match builder.list_operations()[0] {
        Operation::AccountUpdate(update) => {
            let owner = update.owner.as_ref().unwrap();
            assert_eq!(owner.account_auths().to_vec(), vec![(Id::new(8), 1u16)]);
            assert_eq!(owner.weight_threshold(), 2);
        }
        other => panic!("unexpected operation {}", other.name()),
    }

    let err = f
        .client
        .allow(&mut builder, Target::Transaction, "bob", Some(1), AuthorityLevel::Active, Some(5), None)
        .unwrap_err();
    assert!(matches!(err, ClientError::Types(_)));
    assert_eq!(builder.len(), 1);
}

#[test]
fn test_disallow_lowers_threshold() {
    let f = fixture(default_config());
    let k1 = PrivateKey::new().pub_key().to_string();
    let k2 = PrivateKey::new().pub_key().to_string();
    let active = authority(2, &[(k1.clone(), 1), (k2.clone(), 1)]);
    f.chain.add_account_with(9, "carol", active.clone(), active, &k1);

    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .disallow(&mut builder, Target::Transaction, &k2, AuthorityLevel::Active, None, Some("carol"))
        .unwrap();
    match builder.list_operations()[0] {
        Operation::AccountUpdate(update) => {
            let active = update.active.as_ref().unwrap();
            assert_eq!(active.key_auths().len(), 1);
            assert_eq!(active.weight_threshold(), 1);
        }
        other => panic!("unexpected operation {}", other.name()),
    }

    let stranger = PrivateKey::new().pub_key().to_string();
    assert!(matches!(
        f.client.disallow(
            &mut builder,
            Target::Transaction,
            &stranger,
            AuthorityLevel::Active,
            None,
            Some("carol")
        ),
        Err(ClientError::NotInAuthority { .. })
    ));
}

#[test]
fn test_update_memo_key_keeps_options() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    let key = PrivateKey::new().pub_key();
    f.client
        .update_memo_key(&mut builder, Target::Transaction, &key.to_string(), None)
        .unwrap();
    match builder.list_operations()[0] {
        Operation::AccountUpdate(update) => {
            let options = update.new_options.as_ref().unwrap();
            assert_eq!(options.memo_key, key);
            assert_eq!(options.voting_account, Id::new(5));
            assert!(update.owner.is_none() && update.active.is_none());
        }
        other => panic!("unexpected operation {}", other.name()),
    }
}

// -----------------------------------------------------------------------
// Broadcast
// -----------------------------------------------------------------------

#[test]
fn test_broadcast_flow() {
    let f = fixture(default_config());
    f.chain.set_fee(25);
    let mut builder = f.client.new_transaction().unwrap();
    f.client
        .transfer(&mut builder, Target::Transaction, "bob", 10, "PPY", None, None)
        .unwrap();
    let receipt = f.client.broadcast(&mut builder).unwrap();
    assert_eq!(receipt["accepted"], true);
    assert!(builder.is_broadcast());

    let sent = &f.chain.broadcasts()[0];
    assert_eq!(sent["ref_block_num"], 34294);
    assert_eq!(sent["ref_block_prefix"], 3707022213u32);
    assert_eq!(sent["expiration"], "2016-04-06T08:29:30");
    assert_eq!(sent["operations"][0][1]["fee"]["amount"], 25);

    assert!(matches!(
        f.client
            .transfer(&mut builder, Target::Transaction, "bob", 10, "PPY", None, None),
        Err(ClientError::Transaction(TransactionError::AlreadyBroadcast))
    ));
}

#[test]
fn test_nobroadcast_returns_signed_json() {
    let f = fixture(ClientConfig {
        nobroadcast: true,
        ..default_config()
    });
    let mut builder = f.client.new_transaction().unwrap();
    f.client.upgrade_account(&mut builder, Target::Transaction, None).unwrap();
    let json = f.client.broadcast(&mut builder).unwrap();
    assert_eq!(json["signatures"].as_array().unwrap().len(), 1);
    assert!(f.chain.broadcasts().is_empty());
    assert!(!builder.is_broadcast());
}

#[test]
fn test_unsigned_session_skips_signing() {
    let f = fixture(ClientConfig {
        nobroadcast: true,
        unsigned: true,
        ..default_config()
    });
    let mut builder = f.client.new_transaction().unwrap();
    f.client.upgrade_account(&mut builder, Target::Transaction, None).unwrap();
    let json = f.client.broadcast(&mut builder).unwrap();
    assert!(json["signatures"].as_array().unwrap().is_empty());
}

#[test]
fn test_rejected_broadcast_can_be_retried() {
    let f = fixture(default_config());
    let mut builder = f.client.new_transaction().unwrap();
    f.client.upgrade_account(&mut builder, Target::Transaction, None).unwrap();
    f.chain.fail_next_broadcast("missing required active authority: Missing Active Authority 1.2.7");

    let err = f.client.broadcast(&mut builder).unwrap_err();
    assert!(matches!(
        err,
        ClientError::Chain(ChainError::Rpc(RpcError::MissingRequiredActiveAuthority(_)))
    ));
    assert!(!builder.is_broadcast());
    assert!(builder.is_finalized());

    f.client.broadcast(&mut builder).unwrap();
    assert!(builder.is_broadcast());
    assert_eq!(f.chain.broadcasts().len(), 1);
}

#[test]
fn test_fee_asset_from_config() {
    let f = fixture(ClientConfig {
        fee_asset: Some("PPY".to_string()),
        ..default_config()
    });
    let builder = f.client.new_transaction().unwrap();
    assert_eq!(builder.fee_asset(), Id::new(0));

    let f = fixture(ClientConfig {
        fee_asset: Some("BTC".to_string()),
        ..default_config()
    });
    assert!(matches!(
        f.client.new_transaction(),
        Err(ClientError::Chain(ChainError::AssetDoesNotExist(_)))
    ));
}
