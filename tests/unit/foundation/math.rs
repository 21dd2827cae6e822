use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u16(100, 128), 50);
}

#[test]
fn unpremul_inverts_opaque_and_zero_alpha() {
    for c in [0u8, 1, 77, 200, 255] {
        assert_eq!(unpremul_u8(c, 255), c);
    }
    assert_eq!(unpremul_u8(40, 0), 0);
}

#[test]
fn unpremul_roundtrips_within_one_step() {
    for a in [32u8, 100, 180, 254] {
        for c in [0u8, 50, 128, 255] {
            let p = mul_div255_u8(u16::from(c), u16::from(a));
            let back = unpremul_u8(p, a);
            assert!((i32::from(back) - i32::from(c)).abs() <= (255 / i32::from(a)) + 1);
        }
    }
}
