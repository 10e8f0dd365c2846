// Typed conversions and the diagnostic dump.

#[cfg(test)]
mod tests {
    use ethereum_types::U256;
    use malachite::Natural;
    use rlp_core::prelude::*;

// # ✅ 1. convert / convert_strict

    #[test]
    fn convert_by_target_type() {
        let wire = rlp(&1024u64);
        let node = Node::new(&wire);
        assert_eq!(node.convert::<u64>(), 1024);
        assert_eq!(node.convert::<U256>(), U256::from(1024u64));
        assert_eq!(node.convert::<Natural>(), Natural::from(1024u32));
        assert_eq!(node.convert_strict::<String>(), Err(RlpError::BadCast));
        assert_eq!(node.convert::<String>(), "");
    }

    #[test]
    fn convert_lists_element_wise() {
        let wire = rlp_list!["cat", "dog"];
        let node = Node::new(&wire);
        let words: Vec<String> = node.convert_strict().unwrap();
        assert_eq!(words, vec!["cat".to_string(), "dog".to_string()]);

        let raw: Vec<&[u8]> = node.convert();
        assert_eq!(raw, vec![&b"cat"[..], &b"dog"[..]]);

        // one bad element fails the strict conversion
        assert_eq!(node.convert_strict::<Vec<u64>>(), Err(RlpError::BadCast));
    }

    #[test]
    fn convert_nested() {
        let wire = rlp(&vec![vec![1u64, 2], vec![3u64]]);
        let node = Node::new(&wire);
        let nested: Vec<Vec<u64>> = node.convert_strict().unwrap();
        assert_eq!(nested, vec![vec![1, 2], vec![3]]);

        let nodes: Vec<Node> = node.convert();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].at(0), 3u64);
    }

// # ✅ 2. Display

    #[test]
    fn display_dump() {
        let wire = rlp_list!["cat", 24u64, bytes::Bytes::from_static(&[0x00, 0xff])];
        assert_eq!(Node::new(&wire).to_string(), "[ \"cat\", 24, #00ff ]");
        assert_eq!(Node::new(&[0x80]).to_string(), "[]");
        assert_eq!(Node::new(&[0x40]).to_string(), "\"\"");
    }

    #[test]
    fn display_big_int_in_decimal() {
        let v = Natural::from(1u32) << 256u32;
        let wire = rlp(&v);
        assert_eq!(Node::new(&wire).to_string(), v.to_string());
    }

    #[test]
    fn display_malformed_tail() {
        let node = Node::new(&[0x82, 0x01]);
        assert!(node.to_string().starts_with("<invalid: out of range"));
    }
}
