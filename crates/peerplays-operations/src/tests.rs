//! Crate-level tests for peerplays-operations: nested proposals, memo-bearing
//! transfers and the decode path for every family.

use peerplays_primitives::util::WireReader;
use peerplays_primitives::PrivateKey;
use peerplays_types::codec::from_bytes;
use peerplays_types::object_id::{FullId, Id};
use peerplays_types::{
    AccountOptions, AssetAmount, BettingMarketResolution, Encode, Extensions, JsonField,
    LocalizedString, Memo, Permission, PointInTime,
};
use serde_json::json;

use crate::{
    EventGroupCreate, OpWrapper, Operation, OperationKind, ProposalCreate, ProposalUpdate,
    SportCreate, Transfer,
};

const TEST_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

fn sport() -> SportCreate {
    SportCreate {
        fee: AssetAmount::default(),
        name: LocalizedString::new([("en", "Football"), ("de", "Fussball")]).unwrap(),
        extensions: Extensions,
    }
}

fn event_group(sport_id: FullId<peerplays_types::tag::Sport>) -> EventGroupCreate {
    EventGroupCreate {
        fee: AssetAmount::default(),
        name: LocalizedString::single("en", "Premier League"),
        sport_id,
        extensions: Extensions,
    }
}

fn proposal() -> ProposalCreate {
    ProposalCreate {
        fee: AssetAmount::default(),
        fee_paying_account: Id::new(7),
        expiration_time: "2018-01-01T00:00:00".parse::<PointInTime>().unwrap(),
        proposed_ops: vec![
            OpWrapper::new(sport()),
            OpWrapper::new(event_group(FullId::relative(0))),
        ],
        review_period_seconds: None,
        extensions: Extensions,
    }
}

#[test]
fn test_nested_proposal_roundtrip() {
    let op: Operation = proposal().into();
    let bytes = op.to_bytes();
    assert_eq!(bytes[0], OperationKind::ProposalCreate.id() as u8);
    assert_eq!(from_bytes::<Operation>(&bytes).unwrap(), op);

    let json = op.to_json();
    assert_eq!(json[1]["proposed_ops"][0]["op"][0], json!(50));
    assert_eq!(json[1]["proposed_ops"][1]["op"][1]["sport_id"], json!("0.0.0"));
    assert_eq!(Operation::from_json(&json).unwrap(), op);
}

#[test]
fn test_relative_full_id_wire_form() {
    let op: Operation = event_group(FullId::relative(3)).into();
    // full ids are 8-byte little-endian, relative space/type are zero
    let hex = op.to_hex();
    assert!(hex.contains("0300000000000000"), "{}", hex);
}

#[test]
fn test_encoding_is_deterministic() {
    let op: Operation = proposal().into();
    assert_eq!(op.to_bytes(), op.to_bytes());
    assert_eq!(op.to_json().to_string(), op.clone().to_json().to_string());
}

#[test]
fn test_localized_input_order_does_not_matter() {
    let a = SportCreate {
        name: LocalizedString::new([("de", "Fussball"), ("en", "Football")]).unwrap(),
        ..sport()
    };
    assert_eq!(a.to_bytes(), sport().to_bytes());
}

#[test]
fn test_transfer_with_memo() {
    let key = PrivateKey::from_wif(TEST_WIF).unwrap();
    let to = key.pub_key().with_prefix("TEST");
    let memo = Memo::encrypt(&key, &to, 5_862_723_643_998_573_708, "foobar").unwrap();
    let transfer = Transfer {
        fee: AssetAmount::default(),
        from: Id::new(0),
        to: Id::new(1),
        amount: AssetAmount::new(1_000_000, Id::new(4)),
        memo: Some(memo.clone()),
        extensions: Extensions,
    };
    let hex = transfer.to_hex();
    assert!(hex.starts_with("000000000000000000000140420f00000000000401"));
    assert!(hex.ends_with("00"));

    let op: Operation = transfer.into();
    let parsed = Operation::from_json(&op.to_json()).unwrap();
    match parsed {
        Operation::Transfer(t) => {
            let memo = t.memo.unwrap();
            assert_eq!(memo.decrypt(&key, &to).unwrap(), "foobar");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_account_create_roundtrip() {
    let key = PrivateKey::from_wif(TEST_WIF).unwrap().pub_key();
    let op = Operation::AccountCreate(crate::AccountCreate {
        fee: AssetAmount::new(500, Id::new(0)),
        registrar: Id::new(1),
        referrer: Id::new(1),
        referrer_percent: 5000,
        name: "alice".to_string(),
        owner: Permission::single_key(key.clone()),
        active: Permission::new(2, vec![(Id::new(9), 1)], vec![(key.clone(), 1)]).unwrap(),
        options: AccountOptions::new(key),
        extensions: Extensions,
    });
    assert_eq!(from_bytes::<Operation>(&op.to_bytes()).unwrap(), op);
    assert_eq!(Operation::from_json(&op.to_json()).unwrap(), op);
}

#[test]
fn test_every_family_decodes_from_json() {
    let samples = [
        json!(["sport_update", {"sport_id": "1.20.1", "new_name": [["en", "Soccer"]]}]),
        json!(["sport_delete", {"sport_id": "1.20.1"}]),
        json!(["event_group_update", {"event_group_id": "1.21.4", "new_sport_id": "1.20.2"}]),
        json!(["event_group_delete", {"event_group_id": "1.21.4"}]),
        json!(["event_create", {
            "name": [["en", "A vs B"]], "season": [["en", "2018"]],
            "start_time": "2018-03-01T12:00:00", "event_group_id": "1.21.0"
        }]),
        json!(["event_update", {"event_id": "1.22.3", "new_status": "in_progress"}]),
        json!(["event_update_status", {"event_id": "1.22.3", "status": "finished", "scores": ["2", "1"]}]),
        json!(["betting_market_rules_create", {"name": [["en", "R"]], "description": [["en", "D"]]}]),
        json!(["betting_market_rules_update", {"betting_market_rules_id": "1.23.0"}]),
        json!(["betting_market_group_update", {"betting_market_group_id": "1.24.1", "status": "frozen"}]),
        json!(["betting_market_group_resolve", {
            "betting_market_group_id": "1.24.1",
            "resolutions": [["1.25.0", "win"], ["1.25.1", "not_win"]]
        }]),
        json!(["betting_market_group_cancel_unmatched_bets", {"betting_market_group_id": "1.24.1"}]),
        json!(["betting_market_create", {
            "group_id": "0.0.1", "description": [["en", "Home"]], "payout_condition": [["en", "Home wins"]]
        }]),
        json!(["betting_market_update", {"betting_market_id": "1.25.0"}]),
        json!(["bet_place", {
            "bettor_id": "1.2.17", "betting_market_id": "1.25.0",
            "amount_to_bet": {"amount": 100, "asset_id": "1.3.0"},
            "backer_multiplier": 20000, "back_or_lay": "back"
        }]),
        json!(["bet_cancel", {"bettor_id": "1.2.17", "bet_to_cancel": "1.26.3"}]),
        json!(["tournament_join", {
            "payer_account_id": "1.2.17", "player_account_id": "1.2.17",
            "tournament_id": "1.16.0", "buy_in": {"amount": 10, "asset_id": "1.3.0"}
        }]),
        json!(["tournament_leave", {
            "canceling_account_id": "1.2.17", "player_account_id": "1.2.17", "tournament_id": "1.16.0"
        }]),
        json!(["account_upgrade", {"account_to_upgrade": "1.2.17", "upgrade_to_lifetime_member": true}]),
        json!(["proposal_delete", {"fee_paying_account": "1.2.17", "using_owner_authority": false, "proposal": "1.10.0"}]),
        json!(["asset_issue", {
            "issuer": "1.2.17", "asset_to_issue": {"amount": 10, "asset_id": "1.3.5"}, "issue_to_account": "1.2.18"
        }]),
    ];
    for sample in samples {
        let op = Operation::from_json(&sample).unwrap_or_else(|e| panic!("{}: {}", sample, e));
        assert_eq!(op.name(), sample[0].as_str().unwrap());
        let bytes = op.to_bytes();
        let mut reader = WireReader::new(&bytes);
        assert_eq!(Operation::read(&mut reader).unwrap(), op);
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn test_proposal_update_approval_sets_sorted_from_json() {
    let key_a = PrivateKey::from_wif(TEST_WIF).unwrap().pub_key();
    let key_b = PrivateKey::new().pub_key();
    let op = Operation::from_json(&json!(["proposal_update", {
        "fee_paying_account": "1.2.3",
        "proposal": "1.10.1",
        "active_approvals_to_add": ["1.2.9", "1.2.4", "1.2.9"],
        "active_approvals_to_remove": [],
        "owner_approvals_to_add": ["1.2.12", "1.2.2"],
        "owner_approvals_to_remove": [],
        "key_approvals_to_add": [key_b.to_string(), key_a.to_string(), key_a.to_string()],
        "key_approvals_to_remove": []
    }]))
    .unwrap();
    let Operation::ProposalUpdate(update) = &op else {
        panic!("expected proposal_update, got {}", op.name());
    };
    assert_eq!(update.active_approvals_to_add.as_slice(), &[Id::new(4), Id::new(9)]);
    assert_eq!(update.owner_approvals_to_add.as_slice(), &[Id::new(2), Id::new(12)]);
    let mut keys = vec![key_a, key_b];
    keys.sort();
    assert_eq!(update.key_approvals_to_add.as_slice(), keys.as_slice());

    let approve = ProposalUpdate::approve(Id::new(3), Id::new(1), Id::new(9));
    assert_eq!(approve.active_approvals_to_add.as_slice(), &[Id::new(9)]);
}

#[test]
fn test_group_resolve_sorted_by_market() {
    let reversed = Operation::from_json(&json!(["betting_market_group_resolve", {
        "betting_market_group_id": "1.24.1",
        "resolutions": [["1.25.3", "win"], ["1.25.2", "not_win"]]
    }]))
    .unwrap();
    let ordered = Operation::from_json(&json!(["betting_market_group_resolve", {
        "betting_market_group_id": "1.24.1",
        "resolutions": [["1.25.2", "not_win"], ["1.25.3", "win"]]
    }]))
    .unwrap();
    assert_eq!(reversed.to_bytes(), ordered.to_bytes());
    let Operation::BettingMarketGroupResolve(resolve) = &reversed else {
        panic!("expected betting_market_group_resolve, got {}", reversed.name());
    };
    assert_eq!(
        resolve.resolutions.as_slice(),
        &[
            (Id::new(2), BettingMarketResolution::NotWin),
            (Id::new(3), BettingMarketResolution::Win),
        ]
    );
}

#[test]
fn test_group_resolve_rejects_duplicate_market() {
    let result = Operation::from_json(&json!(["betting_market_group_resolve", {
        "betting_market_group_id": "1.24.1",
        "resolutions": [["1.25.2", "win"], ["1.25.2", "cancel"]]
    }]));
    assert!(result.is_err());
}

#[test]
fn test_op_wrapper_accepts_bare_pair() {
    let wrapped = OpWrapper::from_json(&json!([50, {"name": [["en", "Chess"]]}])).unwrap();
    assert_eq!(wrapped.op.kind(), OperationKind::SportCreate);
    assert_eq!(wrapped.to_json()["op"][0], json!(50));
}
