use proptest::prelude::*;

use peerplays_primitives::cipher::{aes256_cbc_decrypt, aes256_cbc_encrypt};
use peerplays_primitives::hash::sha256;
use peerplays_primitives::util::{SignedVarInt, VarInt, WireReader};
use peerplays_primitives::{PrivateKey, PublicKey};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_wif_and_public_key_string_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let wif = pk.to_wif();
            let pk2 = PrivateKey::from_wif(&wif).unwrap();
            prop_assert_eq!(pk.to_hex(), pk2.to_hex());

            let pub_key = pk.pub_key().with_prefix("TEST");
            let parsed: PublicKey = pub_key.to_string().parse().unwrap();
            prop_assert_eq!(parsed.prefix(), "TEST");
            prop_assert_eq!(&parsed, &pub_key);
        }
    }

    #[test]
    fn canonical_sign_recover_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign_canonical(&digest).unwrap();
            prop_assert!(sig.is_canonical());
            prop_assert_eq!(sig.recover_public_key(&digest).unwrap(), pk.pub_key());
        }
    }

    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let bytes = VarInt(value).to_bytes();
        let mut reader = WireReader::new(&bytes);
        prop_assert_eq!(reader.read_varint().unwrap().value(), value);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn signed_varint_zigzag_roundtrip(value in any::<i32>()) {
        let zz = SignedVarInt(value).zigzag();
        prop_assert_eq!(SignedVarInt::from_zigzag(zz).0, value);
    }

    #[test]
    fn aes_cbc_roundtrip(
        key in prop::array::uniform32(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..200)
    ) {
        let ct = aes256_cbc_encrypt(&key, &iv, &msg);
        prop_assert_eq!(aes256_cbc_decrypt(&key, &iv, &ct).unwrap(), msg);
    }
}
