//! End-to-end exercises over all three limb widths: the arithmetic laws,
//! the division engine in all four renditions, and the text round trips.

use big_calc::{BigInt, BigInt16, BigInt32, BigInt8};

use proptest::prelude::*;

fn random(limbs: usize) -> BigInt16 {
    let mut v = BigInt16::new();
    v.gen_random(limbs, 0);
    v
}

#[test]
fn scenario_long_division() {
    // same digits through every limb width
    fn check<L: big_calc::Limb>() {
        let a: BigInt<L> = "123456789012345678901234567890".into();
        let b: BigInt<L> = "987654321".into();
        let q = &a / &b;
        let r = &a % &b;
        assert_eq!(q.to_string_base(10, false, 0), "124999998873437499901");
        assert_eq!(r.to_string_base(10, false, 0), "574845669");
        assert_eq!(&q * &b + &r, a);
    }
    check::<u8>();
    check::<u16>();
    check::<u32>();
}

#[test]
fn scenario_power_of_two_product() {
    let p128: BigInt16 = BigInt::from(1) << 128;
    let p256 = BigInt::fft_mul(p128.clone(), &p128);
    assert_eq!(p256, BigInt::from(1) << 256);
    assert_eq!(p256.to_string_base(16, false, 0), format!("1{}", "0".repeat(64)));
}

#[test]
fn scenario_truncated_division_signs() {
    let a: BigInt = (-17).into();
    let b: BigInt = 5.into();
    assert_eq!(&a / &b, BigInt::from(-3));
    assert_eq!(&a % &b, BigInt::from(-2));
}

#[test]
fn scenario_hex_round_trip() {
    let a: BigInt = BigInt::from_str_base("0xdeadbeef", 0);
    assert_eq!(a, BigInt::from(3_735_928_559_u32));
    assert_eq!(a.to_string_base(16, false, 1), "0xdeadbeef");
    assert_eq!(a.to_string_base(16, false, 2), "deadbeef_16");
}

#[test]
fn scenario_shift_round_trip() {
    let a: BigInt = BigInt::from_str_base("0xabcdef0123456789", 0);
    assert_eq!((&a << 37) >> 37, a);
}

#[test]
fn scenario_division_by_zero() {
    let mut a: BigInt = BigInt::new();
    a.gen_random(6, 0).to_opposite();
    let z = BigInt::new();
    assert_eq!(&a / &z, a);
    assert_eq!(&a % &z, a);
}

#[test]
fn ring_laws() {
    let one: BigInt16 = 1.into();
    for round in 0..24 {
        let mut a = random(1 + round % 7);
        let mut b = random(2 + round % 5);
        let c = random(3 + round % 3);
        if round % 2 == 0 {
            a.to_opposite();
        }
        if round % 3 == 0 {
            b.to_opposite();
        }
        assert_eq!((&a + &b) + &c, &a + &(&b + &c));
        assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(&a + &(-&a), BigInt::from(0));
        assert_eq!(&a * &one, a);
    }
}

#[test]
fn canonical_form_after_operations() {
    for round in 0..16 {
        let mut a = random(1 + round % 6);
        if round % 2 == 0 {
            a.to_opposite();
        }
        let z = &a + &(-&a);
        assert_eq!(z.length(), 1);
        assert_eq!(z.data(), &[0]);

        // a canonical value never carries a redundant top limb
        let s = &a + &a;
        if s.length() >= 2 {
            let top = s.data()[s.length() - 1];
            let below = s.data()[s.length() - 2];
            assert!(!(top == 0 && below < 0x8000));
            assert!(!(top == 0xffff && below >= 0x8000));
        }
    }
}

#[test]
fn twos_complement_identity() {
    for round in 0..12 {
        let mut a = random(1 + round % 5);
        if round % 2 == 0 {
            a.to_opposite();
        }
        assert_eq!(!&a, &(-&a) - &BigInt::from(1));
    }
}

#[test]
fn division_identity_random() {
    for round in 0..32 {
        let mut a = random(4 + round % 8);
        let mut b = random(1 + round % 4);
        if b.is_zero() {
            continue;
        }
        if round % 2 == 0 {
            a.to_opposite();
        }
        if round % 3 == 0 {
            b.to_opposite();
        }
        let q = &a / &b;
        let r = &a % &b;
        assert_eq!(&(&q * &b) + &r, a, "a = {}, b = {}", a, b);
        assert!(r.abs() < b.abs(), "a = {}, b = {}", a, b);
        if !r.is_zero() {
            assert_eq!(r.sign(), a.sign(), "a = {}, b = {}", a, b);
        }
    }
}

#[test]
fn four_way_division_agreement() {
    // multi-limb divisors: Algorithm A and B must agree with the operator
    for round in 0..24 {
        let mut a = random(5 + round % 6);
        let mut b = random(2 + round % 3);
        if b.is_zero() {
            continue;
        }
        if round % 2 == 0 {
            a.to_opposite();
        }
        if round % 3 == 0 {
            b.to_opposite();
        }
        let q_op = &a / &b;
        let r_op = &a % &b;
        let mut ra = BigInt::new();
        let qa = BigInt::div_alg_a(a.clone(), &b, Some(&mut ra));
        let mut rb = BigInt::new();
        let qb = BigInt::div_alg_b(a.clone(), &b, Some(&mut rb));
        assert_eq!(q_op, qa, "a = {}, b = {}", a, b);
        assert_eq!(q_op, qb, "a = {}, b = {}", a, b);
        assert_eq!(r_op, ra, "a = {}, b = {}", a, b);
        assert_eq!(r_op, rb, "a = {}, b = {}", a, b);
    }

    // operands inside one 64-bit word: the plain path joins in
    for round in 0..24 {
        let mut a = random(1 + round % 4);
        let mut b = random(1 + round % 2);
        if b.is_zero() {
            continue;
        }
        if round % 2 == 0 {
            a.to_opposite();
        }
        if round % 3 == 0 {
            b.to_opposite();
        }
        let q_op = &a / &b;
        let r_op = &a % &b;
        let mut rp = BigInt::new();
        let qp = BigInt::plain_div(a.clone(), &b, Some(&mut rp));
        let mut ra = BigInt::new();
        let qa = BigInt::div_alg_a(a.clone(), &b, Some(&mut ra));
        let mut rb = BigInt::new();
        let qb = BigInt::div_alg_b(a.clone(), &b, Some(&mut rb));
        assert_eq!(q_op, qp, "a = {}, b = {}", a, b);
        assert_eq!(q_op, qa, "a = {}, b = {}", a, b);
        assert_eq!(q_op, qb, "a = {}, b = {}", a, b);
        assert_eq!(r_op, rp, "a = {}, b = {}", a, b);
        assert_eq!(r_op, ra, "a = {}, b = {}", a, b);
        assert_eq!(r_op, rb, "a = {}, b = {}", a, b);
    }

    // single-limb divisors against the scalar sweep, non-negative dividends
    for round in 0..12 {
        let a = random(3 + round % 5);
        let b = random(1);
        if b.is_zero() {
            continue;
        }
        let mut r_limb = 0_u16;
        let q = BigInt::basic_div(a.clone(), b.data()[0], Some(&mut r_limb));
        assert_eq!(q, &a / &b, "a = {}, b = {}", a, b);
        assert_eq!(BigInt::from(r_limb), &a % &b, "a = {}, b = {}", a, b);
    }
}

#[test]
fn multiplier_agreement_around_threshold() {
    for limbs in [20, 23, 24, 25, 28, 40] {
        let mut a = random(limbs);
        let b = random(limbs + 1);
        if limbs % 2 == 0 {
            a.to_opposite();
        }
        let plain = BigInt::plain_mul(a.clone(), &b);
        let fft = BigInt::fft_mul(a.clone(), &b);
        assert_eq!(plain, fft, "limbs = {}", limbs);
        assert_eq!(&a * &b, plain, "limbs = {}", limbs);
    }
}

#[test]
fn boundary_operands() {
    // single-limb operands
    let a: BigInt16 = BigInt::from_raw_parts(&[7]);
    let b: BigInt16 = BigInt::from_raw_parts(&[3]);
    assert_eq!(&a / &b, BigInt::from(2));

    // a top limb exactly at the sign-bit boundary is negative...
    let c: BigInt16 = BigInt::from_raw_parts(&[0x8000]);
    assert!(c.sign());
    assert_eq!(c, BigInt::from(-0x8000));
    // ...and its positive counterpart needs one more limb
    let d: BigInt16 = BigInt::from_raw_parts(&[0x8000, 0]);
    assert_eq!(d, BigInt::from(0x8000));
    assert_eq!(&c + &d, BigInt::from(0));

    // dividend exactly one limb longer than the divisor, wide enough to
    // stay out of the packed 64-bit path
    let e: BigInt16 = "99999999999999999999999999".into();
    let f: BigInt16 = "9999999999999999999999".into();
    let q = &e / &f;
    let r = &e % &f;
    assert_eq!(&q * &f + &r, e);

    // divisor top limb 1 forces the full normalization shift
    let g: BigInt16 =
        BigInt::from_raw_parts(&[0xffff, 0xffff, 0xffff, 0xffff, 0xffff, 0x0007]);
    let h: BigInt16 = BigInt::from_raw_parts(&[0x0003, 0x0001]);
    let q = &g / &h;
    let r = &g % &h;
    assert_eq!(&q * &h + &r, g);
    assert!(r.abs() < h.abs());
    let mut ra = BigInt::new();
    let qa = BigInt::div_alg_a(g.clone(), &h, Some(&mut ra));
    assert_eq!(qa, q);
    assert_eq!(ra, r);

    // a divisor whose canonical form carries a zero sign limb
    let i: BigInt16 = BigInt::from_raw_parts(&[0x8000, 0x0000]);
    let j = random(6);
    let q = &j / &i;
    let r = &j % &i;
    assert_eq!(&q * &i + &r, j);

    // product that exactly fills the sum of the lengths
    let m: BigInt8 = BigInt::from_raw_parts(&[0xff, 0xff, 0x00]);
    let p = &m * &m;
    assert_eq!(p, ("4294836225").into());
}

#[test]
fn stream_adapters_match_print() {
    let v: BigInt32 = "-123456789123456789".into();
    assert_eq!(format!("{}", v), "-123456789123456789");
    let mut buf = Vec::new();
    v.print(10, false, 0, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), format!("{}", v));
    assert_eq!(format!("{:#x}", v), v.to_string_base(16, false, 1));
}

proptest! {
    #[test]
    fn prop_division_identity(
        a_limbs in proptest::collection::vec(any::<u16>(), 1..12),
        b_limbs in proptest::collection::vec(any::<u16>(), 1..6),
        a_neg: bool,
        b_neg: bool,
    ) {
        let mut a = BigInt16::from_raw_parts(&a_limbs);
        let mut b = BigInt16::from_raw_parts(&b_limbs);
        if a_neg { a.to_opposite(); }
        if b_neg { b.to_opposite(); }
        prop_assume!(!b.is_zero());
        let q = &a / &b;
        let r = &a % &b;
        prop_assert_eq!(&(&q * &b) + &r, a.clone());
        prop_assert!(r.abs() < b.abs());
        if !r.is_zero() {
            prop_assert_eq!(r.sign(), a.sign());
        }
    }

    #[test]
    fn prop_add_sub_round_trip(
        a_limbs in proptest::collection::vec(any::<u16>(), 1..10),
        b_limbs in proptest::collection::vec(any::<u16>(), 1..10),
    ) {
        let a = BigInt16::from_raw_parts(&a_limbs);
        let b = BigInt16::from_raw_parts(&b_limbs);
        prop_assert_eq!(&(&a + &b) - &b, a.clone());
        prop_assert_eq!(&(&a - &b) + &b, a);
    }

    #[test]
    fn prop_base_round_trip(v in any::<i64>(), base in 2_usize..=36) {
        let a = BigInt16::from(v);
        let s = a.to_string_base(base, false, 0);
        prop_assert_eq!(BigInt16::from_str_base(&s, base), a);
    }

    #[test]
    fn prop_shift_is_scaling(
        a_limbs in proptest::collection::vec(any::<u16>(), 1..6),
        k in 0_usize..70,
    ) {
        let mut a = BigInt16::from_raw_parts(&a_limbs);
        a.to_absolute();
        let shifted = &a << k;
        let mut scale = BigInt16::from(1);
        for _ in 0..k {
            scale.basic_mul_eq(2);
        }
        prop_assert_eq!(shifted.clone(), &a * &scale);
        prop_assert_eq!(&shifted >> k, a);
    }
}
