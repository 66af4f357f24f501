use super::*;

#[test]
fn base_and_pack_split() {
    assert_eq!(BrigType::U8X4.base(), BrigType::U8);
    assert_eq!(BrigType::U8X4.pack(), BrigType::PACK_32);
    assert_eq!(BrigType::F64X2.pack(), BrigType::PACK_128);
    assert!(BrigType::S16X2.is_packed());
    assert!(!BrigType::S16.is_packed());
}

#[test]
fn float_detection_looks_at_element() {
    assert!(BrigType::F32.is_float());
    assert!(BrigType::F16X2.is_float());
    assert!(!BrigType::B32.is_float());
    assert!(!BrigType::S64.is_float());
}

#[test]
fn bit_width_buckets() {
    assert_eq!(BrigType::B1.bit_width(), Some(1));
    assert_eq!(BrigType::S8.bit_width(), Some(8));
    assert_eq!(BrigType::F16.bit_width(), Some(16));
    assert_eq!(BrigType::U32.bit_width(), Some(32));
    assert_eq!(BrigType::F64.bit_width(), Some(64));
    assert_eq!(BrigType::U16X4.bit_width(), Some(64));
    assert_eq!(BrigType::B128.bit_width(), Some(128));
    assert_eq!(BrigType::NONE.bit_width(), None);
}

#[test]
fn bit_type_keeps_width() {
    assert_eq!(BrigType::S32.bit_type(), Some(BrigType::B32));
    assert_eq!(BrigType::U8.bit_type(), Some(BrigType::B8));
    assert_eq!(BrigType::F64.bit_type(), Some(BrigType::B64));
    assert_eq!(BrigType::U8X4.bit_type(), Some(BrigType::B32));
}

#[test]
fn reg_type_widens_small_values() {
    assert_eq!(BrigType::B1.reg_type(), Some(BrigType::B1));
    assert_eq!(BrigType::U8.reg_type(), Some(BrigType::B32));
    assert_eq!(BrigType::S16.reg_type(), Some(BrigType::B32));
    assert_eq!(BrigType::F32.reg_type(), Some(BrigType::B32));
    assert_eq!(BrigType::U64.reg_type(), Some(BrigType::B64));
    assert_eq!(BrigType::F32X4.reg_type(), Some(BrigType::B128));
    assert_eq!(BrigType::NONE.reg_type(), None);
}

#[test]
fn alignment_by_width() {
    let cases = [
        (BrigType::B1, 1),
        (BrigType::U8, 1),
        (BrigType::S16, 2),
        (BrigType::F32, 4),
        (BrigType::U64, 8),
        (BrigType::B128, 16),
    ];
    for (ty, bytes) in cases {
        assert_eq!(ty.alignment().map(|a| a.bytes()), Some(bytes), "{ty}");
    }
}

#[test]
fn float_narrowing() {
    assert!(BrigType::F32.is_float_narrowing_from(BrigType::F64));
    assert!(BrigType::F16.is_float_narrowing_from(BrigType::F32));
    assert!(!BrigType::F64.is_float_narrowing_from(BrigType::F32));
    assert!(!BrigType::F32.is_float_narrowing_from(BrigType::F32));
    assert!(!BrigType::S32.is_float_narrowing_from(BrigType::F64));
}

#[test]
fn names() {
    assert_eq!(BrigType::S32.to_string(), "s32");
    assert_eq!(BrigType::U8X4.to_string(), "u8x4");
    assert_eq!(BrigType::F64X2.to_string(), "f64x2");
    assert_eq!(BrigType::NONE.to_string(), "none");
}
