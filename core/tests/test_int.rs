// Integer tiers on the wire:

// * direct (prefix is the value)
// * indirect-value (1..=32 payload bytes)
// * indirect-addressed (length-of-length, more than 32 bytes)
// * strict tier checks and string-as-integer readers

#[cfg(test)]
mod tests {
    use ethereum_types::U256;
    use malachite::Natural;
    use proptest::prelude::*;
    use rlp_core::{rlp::{rlp, IntTier, Node, NodeKind}, RlpError};

    fn two_pow(bits: u32) -> Natural {
        Natural::from(1u32) << bits
    }

// # ✅ 1. Direct and indirect-value boundaries

    #[test]
    fn small_values_are_the_prefix() {
        assert_eq!(rlp(&0u64), [0x00]);
        assert_eq!(rlp(&23u64), [0x17]);

        let node_bytes = rlp(&23u64);
        let node = Node::new(&node_bytes);
        assert_eq!(node.int_tier(), Some(IntTier::Direct));
        assert_eq!(node.to_slim_int(), 23);
        assert_eq!(node.payload(), &[] as &[u8]);
    }

    #[test]
    fn twenty_four_needs_a_payload_byte() {
        let wire = rlp(&24u64);
        assert_eq!(wire, [0x18, 0x18]);

        let node = Node::new(&wire);
        assert_eq!(node.int_tier(), Some(IntTier::IndirectValue));
        assert_eq!(node.to_slim_int_strict(), Ok(24));
        assert_eq!(node.payload(), &[0x18]);
    }

    #[test]
    fn minimal_payload_length() {
        assert_eq!(rlp(&255u64), [0x18, 0xff]);
        assert_eq!(rlp(&256u64), [0x19, 0x01, 0x00]);
        assert_eq!(rlp(&1024u64), [0x19, 0x04, 0x00]);

        let mut max = vec![0x1f];
        max.extend_from_slice(&[0xff; 8]);
        assert_eq!(rlp(&u64::MAX), max);
        assert!(Node::new(&max).is_slim_int());
    }

// # ✅ 2. Wide tier

    #[test]
    fn nine_bytes_is_fat() {
        let v = U256::from(u64::MAX) + U256::from(1u64);
        let wire = rlp(&v);
        let mut expected = vec![0x20, 0x01];
        expected.extend_from_slice(&[0u8; 8]);
        assert_eq!(wire, expected);

        let node = Node::new(&wire);
        assert!(node.is_fat_int());
        assert!(node.is_fixed_int());
        assert!(!node.is_slim_int());
        assert_eq!(node.to_slim_int_strict(), Err(RlpError::BadCast));
        assert_eq!(node.to_fat_int_strict(), Ok(v));
        assert_eq!(node.to_big_int_strict(), Ok(two_pow(64)));
    }

    #[test]
    fn thirty_two_bytes_stays_indirect_value() {
        let wire = rlp(&U256::MAX);
        assert_eq!(wire.len(), 33);
        assert_eq!(wire[0], 0x37);

        let node = Node::new(&wire);
        assert_eq!(node.int_tier(), Some(IntTier::IndirectValue));
        assert_eq!(node.to_fat_int(), U256::MAX);
    }

// # ✅ 3. Arbitrary tier

    #[test]
    fn thirty_three_bytes_is_addressed() {
        let v = two_pow(256);
        let wire = rlp(&v);
        assert_eq!(&wire[..3], &[0x38, 33, 0x01]);
        assert_eq!(wire.len(), 2 + 33);

        let node = Node::new(&wire);
        assert_eq!(node.kind(), Ok(NodeKind::Integer(IntTier::IndirectAddressed)));
        assert!(node.is_big_int());
        assert!(!node.is_fixed_int());
        assert_eq!(node.length_size(), 1);
        assert_eq!(node.to_fat_int_strict(), Err(RlpError::BadCast));
        assert_eq!(node.to_big_int_strict(), Ok(v.clone()));
        assert_eq!(node.actual_size(), Ok(wire.len()));
        assert!(node == v);
    }

    #[test]
    fn addressed_form_for_short_payload_is_rejected() {
        let mut wire = vec![0x38, 32];
        wire.extend_from_slice(&[0xff; 32]);
        let node = Node::new(&wire);
        assert_eq!(node.validate(), Err(RlpError::NonCanonical { offset: 1 }));
        assert!(node.to_big_int_strict().is_err());
    }

// # ✅ 4. Equality only matches when the value fits

    #[test]
    fn numeric_equality_respects_tier() {
        let small = rlp(&1024u64);
        let node = Node::new(&small);
        assert!(node == 1024u64);
        assert!(node != 1023u64);
        assert!(node == U256::from(1024u64));
        assert!(node == Natural::from(1024u32));

        let fat = rlp(&(U256::from(u64::MAX) + U256::from(1u64)));
        let node = Node::new(&fat);
        assert!(node != 0u64);
        assert!(node == two_pow(64));
    }

// # ✅ 5. Strings read as integers

    #[test]
    fn string_bytes_as_big_endian() {
        let wire = rlp(&vec![0x01u8, 0x02]);
        // a Vec<u8> is a list of byte values
        assert!(Node::new(&wire).is_list());

        let wire = rlp(&bytes::Bytes::from_static(&[0x01, 0x02]));
        let node = Node::new(&wire);
        assert!(node.is_string());
        assert_eq!(node.to_slim_int(), 0x0102);
        assert_eq!(node.to_slim_int_from_string(), Ok(0x0102));
        assert_eq!(node.to_slim_int_strict(), Err(RlpError::BadCast));
    }

    #[test]
    fn from_string_rejects_overlong() {
        let wire = rlp(&bytes::Bytes::from(vec![0xAA; 9]));
        let node = Node::new(&wire);
        assert_eq!(node.to_slim_int_from_string(), Err(RlpError::BadCast));
        assert!(node.to_fat_int_from_string().is_ok());
        assert!(node.to_big_int_from_string().is_ok());

        // integers are not strings
        let int = rlp(&7u64);
        assert_eq!(Node::new(&int).to_slim_int_from_string(), Err(RlpError::BadCast));
    }

// # ✅ 6. Property-based round trips

    proptest! {
        #[test]
        fn slim_roundtrip(v in any::<u64>()) {
            let wire = rlp(&v);
            let node = Node::new(&wire);
            prop_assert_eq!(node.to_slim_int_strict(), Ok(v));
            prop_assert_eq!(node.actual_size(), Ok(wire.len()));
        }

        #[test]
        fn fat_roundtrip(raw in any::<[u8; 32]>()) {
            let v = U256::from_big_endian(&raw);
            let wire = rlp(&v);
            let node = Node::new(&wire);
            prop_assert!(node.is_fixed_int());
            prop_assert_eq!(node.to_fat_int_strict(), Ok(v));
        }

        #[test]
        fn big_roundtrip(raw in proptest::collection::vec(any::<u8>(), 0..80)) {
            let v = raw.iter().fold(Natural::from(0u32), |acc, b| (acc << 8u32) | Natural::from(*b));
            let wire = rlp(&v);
            let node = Node::new(&wire);
            prop_assert_eq!(node.validate(), Ok(()));
            prop_assert_eq!(node.to_big_int_strict(), Ok(v));
        }
    }
}
