use proptest::prelude::*;

use peerplays_operations::{Operation, Transfer};
use peerplays_transaction::{reference_block, SignedTransaction};
use peerplays_types::object_id::Id;
use peerplays_types::{AssetAmount, Extensions, PointInTime};

/// Strategy for an unsigned transaction of one to four transfers.
fn arb_transaction() -> impl Strategy<Value = SignedTransaction> {
    let arb_transfer = (
        0u64..10_000,
        0u64..10_000,
        0i64..1_000_000_000,
        0i64..100_000,
    )
        .prop_map(|(from, to, amount, fee)| {
            Operation::from(Transfer {
                fee: AssetAmount::new(fee, Id::new(0)),
                from: Id::new(from),
                to: Id::new(to),
                amount: AssetAmount::new(amount, Id::new(0)),
                memo: None,
                extensions: Extensions,
            })
        });

    (
        any::<u16>(),
        any::<u32>(),
        0u32..2_000_000_000,
        prop::collection::vec(arb_transfer, 1..4),
    )
        .prop_map(|(num, prefix, expiration, operations)| {
            let mut tx = SignedTransaction::new(num, prefix, PointInTime::from_secs(expiration));
            tx.operations = operations;
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_bytes_roundtrip(tx in arb_transaction()) {
        let hex = tx.to_hex();
        prop_assert_eq!(&hex, &tx.to_hex());
        let parsed = SignedTransaction::from_hex(&hex).unwrap();
        prop_assert_eq!(parsed.id(), tx.id());
        prop_assert_eq!(parsed, tx);
    }

    #[test]
    fn transaction_json_roundtrip(tx in arb_transaction()) {
        let parsed = SignedTransaction::from_json(&tx.to_json()).unwrap();
        prop_assert_eq!(parsed.unsigned_bytes(), tx.unsigned_bytes());
    }

    #[test]
    fn reference_block_takes_low_bits_and_prefix(number in any::<u32>(), id in prop::array::uniform20(any::<u8>())) {
        let (num, prefix) = reference_block(number, &hex::encode(id)).unwrap();
        prop_assert_eq!(u32::from(num), number & 0xFFFF);
        prop_assert_eq!(prefix, u32::from_le_bytes([id[4], id[5], id[6], id[7]]));
    }
}
