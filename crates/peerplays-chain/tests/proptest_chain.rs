use std::time::Duration;

use proptest::prelude::*;

use peerplays_chain::{classify_rpc_error, ObjectCache, RpcError};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fresh_entries_are_visible(keys in proptest::collection::hash_set("[a-z0-9.]{1,12}", 1..20)) {
        let cache: ObjectCache<usize> = ObjectCache::new(Duration::from_secs(60));
        for (i, key) in keys.iter().enumerate() {
            cache.insert(key.clone(), i);
        }
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(cache.get(key), Some(i));
        }
        prop_assert_eq!(cache.purge_expired(), 0);
        prop_assert_eq!(cache.len(), keys.len());
    }

    #[test]
    fn unrecognized_messages_are_kept_verbatim(msg in "[A-Za-z ]{0,40}") {
        prop_assume!(!msg.contains("missing required"));
        prop_assume!(!msg.contains("no method with name"));
        prop_assume!(!msg.contains("already pending"));
        prop_assert_eq!(classify_rpc_error(&msg), RpcError::Unhandled(msg.clone()));
    }
}
