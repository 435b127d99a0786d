//! Crate-level tests for peerplays-transaction: the published transfer
//! vector, and full build/fee/sign flows against an in-memory node.

use std::sync::Arc;

use peerplays_chain::testing::MockChain;
use peerplays_chain::{ChainApi, ChainParams, InMemoryKeyStore, ObjectStore, ALICE, BEATRICE};
use peerplays_operations::{Operation, SportCreate, Transfer};
use peerplays_primitives::PrivateKey;
use peerplays_types::object_id::Id;
use peerplays_types::{AssetAmount, Extensions, LocalizedString, Memo, PointInTime};

use crate::{
    BuilderConfig, SignedTransaction, SigningEngine, Target, TransactionBuilder, TransactionError,
};

const TEST_WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

/// Published unsigned-transaction prefix for the memo transfer below.
const GOLDEN_PREFIX: &str = "f68585abf4dce7c804570100000000000000000000000140420f00";

fn golden_transaction() -> SignedTransaction {
    let key = PrivateKey::from_wif(TEST_WIF).unwrap();
    let to = key.pub_key().with_prefix("TEST");
    let memo = Memo::encrypt(&key, &to, 5_862_723_643_998_573_708, "foobar").unwrap();
    let mut tx = SignedTransaction::new(34294, 3707022213, "2016-04-06T08:29:27".parse().unwrap());
    tx.operations.push(
        Transfer {
            fee: AssetAmount::default(),
            from: Id::new(0),
            to: Id::new(1),
            amount: AssetAmount::new(1_000_000, Id::new(4)),
            memo: Some(memo),
            extensions: Extensions,
        }
        .into(),
    );
    tx
}

fn transfer(from: u64, to: u64) -> Transfer {
    Transfer {
        fee: AssetAmount::default(),
        from: Id::new(from),
        to: Id::new(to),
        amount: AssetAmount::new(1_000, Id::new(0)),
        memo: None,
        extensions: Extensions,
    }
}

fn sport() -> SportCreate {
    SportCreate {
        fee: AssetAmount::default(),
        name: LocalizedString::single("en", "Football"),
        extensions: Extensions,
    }
}

/// A mainnet mock with `alice` (1.2.7) holding the test key.
fn session() -> (Arc<MockChain>, SigningEngine) {
    let chain = Arc::new(MockChain::new());
    let key = PrivateKey::from_wif(TEST_WIF).unwrap();
    chain.add_account(7, "alice", &key.pub_key());
    chain.add_account(8, "bob", &PrivateKey::new().pub_key());
    chain.add_asset(0, "PPY", 5);
    let keystore = InMemoryKeyStore::from_wifs([TEST_WIF]).unwrap();
    let engine = SigningEngine::new(ObjectStore::new(chain.clone()), Arc::new(keystore));
    (chain, engine)
}

fn finalize_from_head(builder: &mut TransactionBuilder, chain: &MockChain) {
    let props = chain.get_dynamic_global_properties().unwrap();
    builder
        .set_reference_block_from(props.head_block_number, &props.head_block_id)
        .unwrap();
    let expiration = props.head_block_time().unwrap().plus_secs(builder.config().expiration_secs);
    builder.finalize_at(expiration).unwrap();
}

// -----------------------------------------------------------------------
// Golden vector
// -----------------------------------------------------------------------

#[test]
fn test_golden_transfer_prefix() {
    let tx = golden_transaction();
    let unsigned = hex::encode(tx.unsigned_bytes());
    assert!(
        unsigned.starts_with(GOLDEN_PREFIX),
        "unsigned bytes {} do not start with the published prefix",
        unsigned
    );
    assert_eq!(tx.expiration, PointInTime::from_secs(1_459_931_367));
}

#[test]
fn test_golden_transfer_is_deterministic() {
    assert_eq!(golden_transaction().to_hex(), golden_transaction().to_hex());
    assert_eq!(golden_transaction().id(), golden_transaction().id());
}

#[test]
fn test_golden_transfer_signature_recovers() {
    let key = PrivateKey::from_wif(TEST_WIF).unwrap();
    let chain_id = ChainParams::from(&BEATRICE).chain_id_bytes().unwrap();
    let mut tx = golden_transaction();
    tx.sign(&[key.clone()], &chain_id).unwrap();
    assert_eq!(tx.verify(&chain_id).unwrap(), vec![key.pub_key()]);

    let parsed = SignedTransaction::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(parsed, tx);
    assert!(tx.to_hex().starts_with(GOLDEN_PREFIX));
}

#[test]
fn test_signature_depends_on_chain_id() {
    let key = PrivateKey::from_wif(TEST_WIF).unwrap();
    let mainnet = ChainParams::from(&ALICE).chain_id_bytes().unwrap();
    let testnet = ChainParams::from(&BEATRICE).chain_id_bytes().unwrap();
    let mut tx = golden_transaction();
    tx.sign(&[key.clone()], &mainnet).unwrap();
    let recovered_matches = tx
        .verify(&testnet)
        .map(|keys| keys == vec![key.pub_key()])
        .unwrap_or(false);
    assert!(!recovered_matches);
}

// -----------------------------------------------------------------------
// Builder flows against the mock node
// -----------------------------------------------------------------------

#[test]
fn test_build_fee_sign_broadcast() {
    let (chain, engine) = session();
    chain.set_fee(20);

    let mut builder = TransactionBuilder::new(BuilderConfig::default());
    builder.append(transfer(7, 8)).unwrap();
    builder.add_required_fees(chain.as_ref()).unwrap();
    assert_eq!(builder.list_operations()[0].fee(), &AssetAmount::new(20, Id::new(0)));

    finalize_from_head(&mut builder, &chain);
    let tx = builder.transaction().unwrap();
    assert_eq!(tx.ref_block_num, 34294);
    assert_eq!(tx.ref_block_prefix, 3707022213);
    assert_eq!(tx.expiration, "2016-04-06T08:29:30".parse::<PointInTime>().unwrap());

    builder.sign(&engine, &ChainParams::from(&ALICE)).unwrap();
    let chain_id = ChainParams::from(&ALICE).chain_id_bytes().unwrap();
    let signers = builder.transaction().unwrap().verify(&chain_id).unwrap();
    assert_eq!(signers, vec![PrivateKey::from_wif(TEST_WIF).unwrap().pub_key()]);

    chain.broadcast_transaction(&builder.json().unwrap()).unwrap();
    builder.mark_broadcast().unwrap();
    assert_eq!(chain.broadcasts().len(), 1);
    assert!(matches!(
        builder.sign(&engine, &ChainParams::from(&ALICE)),
        Err(TransactionError::AlreadyBroadcast)
    ));
}

#[test]
fn test_sign_requires_finalize() {
    let (_chain, engine) = session();
    let mut builder = TransactionBuilder::default();
    builder.append(transfer(7, 8)).unwrap();
    assert!(matches!(
        builder.sign(&engine, &ChainParams::from(&ALICE)),
        Err(TransactionError::NotFinalized)
    ));
}

#[test]
fn test_missing_key_for_sender() {
    let (chain, engine) = session();
    let mut builder = TransactionBuilder::default();
    builder.append(transfer(8, 7)).unwrap();
    finalize_from_head(&mut builder, &chain);
    match builder.sign(&engine, &ChainParams::from(&ALICE)) {
        Err(TransactionError::MissingKey { account, .. }) => assert_eq!(account, "1.2.8"),
        other => panic!("unexpected {:?}", other.map(|tx| tx.signatures.len())),
    }
}

#[test]
fn test_appended_wif_signs_without_keystore() {
    let chain = Arc::new(MockChain::new());
    let key = PrivateKey::new();
    chain.add_account(8, "bob", &key.pub_key());
    let engine = SigningEngine::new(ObjectStore::new(chain.clone()), Arc::new(InMemoryKeyStore::new()));

    let mut builder = TransactionBuilder::default();
    builder.append(transfer(8, 7)).unwrap();
    builder.append_wif(&key.to_wif()).unwrap();
    finalize_from_head(&mut builder, &chain);
    let tx = builder.sign(&engine, &ChainParams::from(&ALICE)).unwrap();
    assert_eq!(tx.signatures.len(), 1);
}

#[test]
fn test_proposal_fees_and_signer() {
    let (chain, engine) = session();
    chain.set_fee(3);

    let mut builder = TransactionBuilder::default();
    let proposal = builder.new_proposal(Some(Id::new(7))).unwrap();
    builder.append_to(Target::Proposal(proposal), sport()).unwrap();
    builder.append_to(Target::Proposal(proposal), sport()).unwrap();
    builder.add_required_fees(chain.as_ref()).unwrap();

    let proposal_ref = builder.proposal(proposal).unwrap();
    assert_eq!(proposal_ref.fee().amount, 3);
    assert!(proposal_ref.list_operations().iter().all(|op| op.fee().amount == 3));

    finalize_from_head(&mut builder, &chain);
    let tx = builder.sign(&engine, &ChainParams::from(&ALICE)).unwrap();
    assert_eq!(tx.operations.len(), 1);
    assert!(matches!(tx.operations[0], Operation::ProposalCreate(_)));
    assert_eq!(tx.signatures.len(), 1);
}

#[test]
fn test_json_roundtrips_through_wire_form() {
    let (chain, engine) = session();
    let mut builder = TransactionBuilder::default();
    builder.append(transfer(7, 8)).unwrap();
    let proposal = builder.new_proposal(Some(Id::new(7))).unwrap();
    builder.append_to(Target::Proposal(proposal), sport()).unwrap();
    finalize_from_head(&mut builder, &chain);
    builder.sign(&engine, &ChainParams::from(&ALICE)).unwrap();

    let json = builder.json().unwrap();
    let parsed = SignedTransaction::from_json(&json).unwrap();
    assert_eq!(parsed.to_bytes(), builder.to_bytes().unwrap());
    assert_eq!(json["operations"][1][0], 22);
}
