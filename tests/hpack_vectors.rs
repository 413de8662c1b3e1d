use prefixint::codec::{
    decode, decode_prefixed, decode_strict, encode, encode_with_flags, ErrorKind, VarIntError,
    MAX_PREFIX_BITS,
};

#[test]
fn single_byte_boundary() {
    assert_eq!(encode(30, 5).unwrap(), vec![30]);
    assert_eq!(encode(31, 5).unwrap(), vec![31, 0]);
}

#[test]
fn multi_byte_digits() {
    assert_eq!(encode(1337, 5).unwrap(), vec![31, 154, 10]);
    assert_eq!(decode(&[31, 154, 10]).unwrap(), 1337);
}

#[test]
fn zero_value() {
    assert_eq!(encode(0, 0).unwrap(), vec![0, 0]);
    assert_eq!(decode(&[0, 0]).unwrap(), 0);
}

#[test]
fn decode_without_prefix() {
    assert_eq!(decode(&[5]).unwrap(), 5);
}

#[test]
fn header_field_layouts() {
    // indexed header field: 1-bit flag, 7-bit index
    assert_eq!(encode_with_flags(2, 7, 0x80).unwrap(), vec![0x82]);
    // literal without indexing, new name: 4-bit prefix holding zero
    assert_eq!(encode_with_flags(0, 4, 0x00).unwrap(), vec![0x00]);
    // dynamic table size update to 4096
    let update = encode_with_flags(4096, 5, 0x20).unwrap();
    assert_eq!(update, vec![0x3F, 0xE1, 0x1F]);
    assert_eq!(decode_prefixed(&update, 5).unwrap(), (4096, 3));
}

#[test]
fn roundtrip_every_prefix() {
    for prefix in 0..=MAX_PREFIX_BITS {
        for value in (0..=(1u32 << 20)).step_by(1021) {
            let bytes = encode(value, prefix).unwrap();
            assert_eq!(decode(&bytes).unwrap(), value);
            assert_eq!(decode_strict(&bytes).unwrap(), value);
            assert_eq!(decode_prefixed(&bytes, prefix).unwrap(), (value, bytes.len()));
        }
    }
}

#[test]
fn contract_violations_are_typed() {
    let err = encode(5, 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContractViolation);

    let err = decode(&[]).unwrap_err();
    assert_eq!(err, VarIntError::EmptyInput);
    assert!(err.is_contract_violation());

    let err = decode_strict(&[31, 0x80]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}
