//! The division engine. Four paths, chosen by operand size and limb width:
//! a native 64-bit path when everything packs into one word, a single-limb
//! sweep, and two renditions of Knuth Algorithm D (TAOCP vol.2, 4.3.1) --
//! Algorithm A normalizes the divisor and refines a two-limb trial
//! quotient, Algorithm B builds the trial from a three-limb window, which
//! only fits the 64-bit accumulator while `3 * LIMB <= 63`, i.e. for limb
//! widths up to 21 bits. Division by zero leaves the receiver unchanged.

use std::ops::{DivAssign, RemAssign};

use crate::big_int::{forward_binop, forward_scalar_binop, BigInt};
use crate::limb::Limb;

#[cfg(test)]
use crate::{BigInt16, BigInt32};

// 实现标量除法
impl<L: Limb> BigInt<L> {
    /// Single-limb divisor sweep (Knuth 4.3.1, exercise 16). Quiet no-op
    /// for divisors 0 and 1. The remainder slot gets `rhs - t % rhs` for a
    /// negative dividend with a nonzero tail, else `t % rhs`.
    pub fn basic_div_eq(&mut self, rhs: L, rem: Option<&mut L>) -> &mut Self {
        if rhs == L::ZERO || rhs == L::ONE {
            return self;
        }
        let mut t: u64 = 0;
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        let r = rhs.to_u64();
        if self.len == 1 {
            t = self.val[0].to_u64() % r;
            self.val[0] = L::from_u64(self.val[0].to_u64() / r);
        } else if rhs.count_ones() == 1 {
            let log = rhs.trailing_zeros();
            t = self.val[0].to_u64() & ((1u64 << log) - 1);
            *self >>= log as usize;
        } else {
            for i in (0..self.len).rev() {
                t = ((t % r) << L::BITS) | self.val[i].to_u64();
                self.val[i] = L::from_u64(t / r);
            }
        }
        if sign {
            self.to_opposite();
        }
        self.shrink_len();
        if let Some(m) = rem {
            *m = if sign && t != 0 {
                L::from_u64(r - t % r)
            } else {
                L::from_u64(t % r)
            };
        }
        self
    }

    /// Horner's method modulo a single limb: `2^LIMB mod rhs` is folded in
    /// limb by limb. When that power is zero only `val[0]` matters.
    pub fn basic_mod_eq(&mut self, rhs: L) -> &mut Self {
        if rhs == L::ZERO {
            return self;
        }
        let r = rhs.to_u64();
        let limb_mod = (1u64 << L::BITS) % r;
        let mut cur_mod: u64 = 1;
        let mut tot: u64 = 0;
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        if limb_mod == 0 {
            tot = self.val[0].to_u64() % r;
        } else {
            for i in 0..self.len {
                tot = (tot + cur_mod * self.val[i].to_u64()) % r;
                cur_mod = cur_mod * limb_mod % r;
            }
        }
        for i in 1..self.len {
            self.val[i] = L::ZERO;
        }
        self.len = 1;
        self.set_len(2, false);
        self.val[0] = L::from_u64(tot);
        if sign {
            self.to_opposite();
        }
        self.shrink_len();
        self
    }

    pub fn basic_div(mut lhs: Self, rhs: L, rem: Option<&mut L>) -> Self {
        lhs.basic_div_eq(rhs, rem);
        lhs
    }
}

// 实现除法
impl<L: Limb> BigInt<L> {
    /// Both operands packed into native 64-bit words.
    pub fn plain_div_eq(&mut self, rhs: &BigInt<L>, mut rem: Option<&mut BigInt<L>>) -> &mut Self {
        if rhs.is_zero() {
            return self;
        }
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        let mut x: u64 = 0;
        for i in (0..self.len).rev() {
            x = (x << L::BITS) | self.val[i].to_u64();
        }
        let mut y: u64 = 0;
        for i in (0..rhs.len).rev() {
            y = (y << L::BITS) | rhs.val[i].to_u64();
        }
        if rhs.sign() {
            // sign-extend the packed divisor before taking its magnitude
            let used = rhs.len as u32 * L::BITS;
            if used < 64 {
                y |= u64::MAX << used;
            }
            y = y.wrapping_neg();
        }
        let z = x / y;
        let w = x - z * y;
        let mut i = 0;
        let mut z = z;
        while z != 0 {
            self.val[i] = L::from_u64(z);
            i += 1;
            z >>= L::BITS;
        }
        for j in i..self.len {
            self.val[j] = L::ZERO;
        }
        self.len = i.max(1);
        if self.sign() {
            let l = self.len;
            self.set_len(l + 1, false);
        }
        if sign != rhs.sign() {
            self.to_opposite();
        }
        if let Some(m) = rem.as_deref_mut() {
            m.set_len((64 / L::BITS) as usize, false);
            let mut i = 0;
            let mut w = w;
            while w != 0 {
                m.val[i] = L::from_u64(w);
                i += 1;
                w >>= L::BITS;
            }
            for j in i..m.len {
                m.val[j] = L::ZERO;
            }
            m.len = i.max(1);
            if m.sign() {
                let l = m.len;
                m.set_len(l + 1, false);
            }
            if sign {
                m.to_opposite();
            }
            m.shrink_len();
        }
        self.shrink_len();
        self
    }

    /// Knuth Algorithm D with a two-limb trial quotient. The divisor is
    /// virtually left-shifted by `mov` so its top limb has the MSB set; the
    /// dividend window is read through the same shift rather than rewritten.
    /// The dividend buffer ends up holding the remainder.
    pub fn div_eq_alg_a(&mut self, rhs: &BigInt<L>, mut rem: Option<&mut BigInt<L>>) -> &mut Self {
        if rhs.is_zero() {
            return self;
        }
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        let holder;
        let v: &BigInt<L> = if rhs.sign() {
            holder = {
                let mut t = rhs.clone();
                t.to_opposite();
                t
            };
            &holder
        } else {
            rhs
        };
        let bits = L::BITS;
        let b: u64 = 1u64 << bits;
        // magnitude length: a non-negative value may carry a zero sign limb
        let mut n = v.len;
        while n > 1 && v.val[n - 1] == L::ZERO {
            n -= 1;
        }
        let small = (64 / bits) as usize;
        if (*self) < *v {
            if let Some(m) = rem.as_deref_mut() {
                *m = self.clone();
            }
            for i in 0..self.len {
                self.val[i] = L::ZERO;
            }
            self.len = 1;
        } else if n <= small && self.len <= small {
            self.plain_div_eq(v, rem.as_deref_mut());
            if sign != rhs.sign() {
                self.to_opposite();
            }
        } else if n == 1 {
            let mut m_limb = L::ZERO;
            if rem.is_some() {
                self.basic_div_eq(v.val[0], Some(&mut m_limb));
            } else {
                self.basic_div_eq(v.val[0], None);
            }
            if let Some(m) = rem.as_deref_mut() {
                m.set_len(1, false);
                m.val[0] = m_limb;
                if m.sign() {
                    m.set_len(2, false);
                }
            }
            if sign != rhs.sign() {
                self.to_opposite();
            }
        } else {
            let mut mov: u32 = 0;
            let mut test = v.val[n - 1];
            while !test.msb() {
                test <<= 1;
                mov += 1;
            }
            let mut result = BigInt::<L>::new();
            result.set_len(self.len - n + 2, false);
            let (v1, v2): (u64, u64);
            if mov != 0 {
                v1 = ((v.val[n - 1] << mov) | (v.val[n - 2] >> (bits - mov))).to_u64();
                let low = if n >= 3 { v.val[n - 3] } else { L::ZERO };
                v2 = ((v.val[n - 2] << mov) | (low >> (bits - mov))).to_u64();
            } else {
                v1 = v.val[n - 1].to_u64();
                v2 = v.val[n - 2].to_u64();
            }
            let m = self.len - n;
            let mut u1: u64 = self.val[self.len - 1].to_u64();
            let mut u2: u64;
            for i in (0..=m).rev() {
                if mov != 0 {
                    u1 = (u1 << mov) | (self.val[i + n - 2] >> (bits - mov)).to_u64();
                    let low = if i + n >= 3 { self.val[i + n - 3] } else { L::ZERO };
                    u2 = ((self.val[i + n - 2] << mov) | (low >> (bits - mov))).to_u64();
                } else {
                    u2 = self.val[i + n - 2].to_u64();
                }
                let mut q = u1 / v1;
                if q >= b {
                    q = b - 1;
                }
                let mut r = u1 - q * v1;
                // at most two refinements; r >= b already decides it
                while r < b && q * v2 > (r << bits) + u2 {
                    q -= 1;
                    r += v1;
                }
                let step = (v * L::from_u64(q)) << (i * bits as usize);
                *self -= &step;
                if self.sign() {
                    // the trial overestimated by one
                    q -= 1;
                    let back = v << (i * bits as usize);
                    *self += &back;
                }
                result.val[i] = L::from_u64(q);

                u1 = (self.val[i + n - 1].to_u64() << bits) | self.val[i + n - 2].to_u64();
            }
            if let Some(m_out) = rem.as_deref_mut() {
                *m_out = self.clone();
            }
            if sign != rhs.sign() {
                result.to_opposite();
            }
            *self = result;
        }
        if sign {
            if let Some(m) = rem.as_deref_mut() {
                m.to_opposite();
            }
        }
        if let Some(m) = rem.as_deref_mut() {
            m.shrink_len();
        }
        self.shrink_len();
        self
    }

    /// Two-limb divisor head against a three-limb dividend window; the
    /// window fits the accumulator only for limb widths up to 21 bits, so
    /// wider limbs fall through to Algorithm A. No normalization shift and
    /// no refinement loop are needed: the trial overestimates by at most
    /// one, which the add-back absorbs.
    pub fn div_eq_alg_b(&mut self, rhs: &BigInt<L>, mut rem: Option<&mut BigInt<L>>) -> &mut Self {
        if L::BITS > 21 {
            return self.div_eq_alg_a(rhs, rem);
        }
        if rhs.is_zero() {
            return self;
        }
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        let holder;
        let v: &BigInt<L> = if rhs.sign() {
            holder = {
                let mut t = rhs.clone();
                t.to_opposite();
                t
            };
            &holder
        } else {
            rhs
        };
        let bits = L::BITS;
        let b: u64 = 1u64 << bits;
        // magnitude length: a non-negative value may carry a zero sign limb
        let mut n = v.len;
        while n > 1 && v.val[n - 1] == L::ZERO {
            n -= 1;
        }
        let small = (64 / bits) as usize;
        if (*self) < *v {
            if let Some(m) = rem.as_deref_mut() {
                *m = self.clone();
            }
            for i in 0..self.len {
                self.val[i] = L::ZERO;
            }
            self.len = 1;
        } else if n <= small && self.len <= small {
            self.plain_div_eq(v, rem.as_deref_mut());
            if sign != rhs.sign() {
                self.to_opposite();
            }
        } else if n == 1 {
            let mut m_limb = L::ZERO;
            if rem.is_some() {
                self.basic_div_eq(v.val[0], Some(&mut m_limb));
            } else {
                self.basic_div_eq(v.val[0], None);
            }
            if let Some(m) = rem.as_deref_mut() {
                m.set_len(1, false);
                m.val[0] = m_limb;
                if m.sign() {
                    m.set_len(2, false);
                }
            }
            if sign != rhs.sign() {
                self.to_opposite();
            }
        } else {
            let mut result = BigInt::<L>::new();
            result.set_len(self.len - n + 2, false);
            let vv = (v.val[n - 1].to_u64() << bits) | v.val[n - 2].to_u64();
            let mut u = (self.val[self.len - 1].to_u64() << bits)
                | self.val[self.len - 2].to_u64();
            let m = self.len - n;
            for i in (0..=m).rev() {
                let mut q = u / vv;
                if q >= b {
                    q = b - 1;
                }
                let step = (v * L::from_u64(q)) << (i * bits as usize);
                *self -= &step;
                if self.sign() {
                    q -= 1;
                    let back = v << (i * bits as usize);
                    *self += &back;
                }
                result.val[i] = L::from_u64(q);

                let low = if i + n >= 3 { self.val[i + n - 3] } else { L::ZERO };
                u = (self.val[i + n - 1].to_u64() << (2 * bits))
                    | (self.val[i + n - 2].to_u64() << bits)
                    | low.to_u64();
            }
            if let Some(m_out) = rem.as_deref_mut() {
                *m_out = self.clone();
            }
            if sign != rhs.sign() {
                result.to_opposite();
            }
            *self = result;
        }
        if sign {
            if let Some(m) = rem.as_deref_mut() {
                m.to_opposite();
            }
        }
        if let Some(m) = rem.as_deref_mut() {
            m.shrink_len();
        }
        self.shrink_len();
        self
    }

    pub fn plain_div(mut lhs: Self, rhs: &Self, rem: Option<&mut Self>) -> Self {
        lhs.plain_div_eq(rhs, rem);
        lhs
    }

    pub fn div_alg_a(mut lhs: Self, rhs: &Self, rem: Option<&mut Self>) -> Self {
        lhs.div_eq_alg_a(rhs, rem);
        lhs
    }

    pub fn div_alg_b(mut lhs: Self, rhs: &Self, rem: Option<&mut Self>) -> Self {
        lhs.div_eq_alg_b(rhs, rem);
        lhs
    }
}

impl<L: Limb> DivAssign<&BigInt<L>> for BigInt<L> {
    fn div_assign(&mut self, rhs: &BigInt<L>) {
        if rhs.is_zero() {
            return;
        }
        let small = (64 / L::BITS) as usize;
        if self.len <= small && rhs.len <= small {
            self.plain_div_eq(rhs, None);
        } else if rhs.len == 1 && !rhs.sign() {
            self.basic_div_eq(rhs.val[0], None);
        } else if L::BITS > 21 {
            self.div_eq_alg_a(rhs, None);
        } else {
            self.div_eq_alg_b(rhs, None);
        }
    }
}

impl<L: Limb> RemAssign<&BigInt<L>> for BigInt<L> {
    fn rem_assign(&mut self, rhs: &BigInt<L>) {
        if rhs.is_zero() {
            return;
        }
        let small = (64 / L::BITS) as usize;
        let mut m = BigInt::new();
        if self.len <= small && rhs.len <= small {
            self.plain_div_eq(rhs, Some(&mut m));
        } else if L::BITS > 21 {
            self.div_eq_alg_a(rhs, Some(&mut m));
        } else {
            self.div_eq_alg_b(rhs, Some(&mut m));
        }
        *self = m;
    }
}

impl<L: Limb> DivAssign<L> for BigInt<L> {
    fn div_assign(&mut self, rhs: L) {
        self.basic_div_eq(rhs, None);
    }
}

impl<L: Limb> RemAssign<L> for BigInt<L> {
    fn rem_assign(&mut self, rhs: L) {
        self.basic_mod_eq(rhs);
    }
}

forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);
forward_scalar_binop!(Div, div, DivAssign, div_assign);
forward_scalar_binop!(Rem, rem, RemAssign, rem_assign);

#[test]
fn test_basic_div() {
    let mut r = 0_u16;
    let q = BigInt::basic_div(BigInt::from(100_000), 7, Some(&mut r));
    assert_eq!(q, BigInt::from(14_285));
    assert_eq!(r, 5);

    // power-of-two divisors go through the shift path, remainder included
    let mut r = 0_u16;
    let q = BigInt::basic_div(BigInt::from(1_000_003), 8, Some(&mut r));
    assert_eq!(q, BigInt::from(125_000));
    assert_eq!(r, 3);

    let mut a: BigInt = 12345.into();
    a.basic_div_eq(0, None);
    assert_eq!(a, BigInt::from(12345));
    a.basic_div_eq(1, None);
    assert_eq!(a, BigInt::from(12345));
}

#[test]
fn test_basic_mod() {
    let mut a: BigInt = 1_000_003.into();
    a %= 9999_u16;
    assert_eq!(a, BigInt::from(1_000_003 % 9999));

    let mut b: BigInt = (-17).into();
    b %= 5_u16;
    assert_eq!(b, BigInt::from(-2));

    // modulus dividing 2^LIMB takes the shortcut
    let mut c: BigInt = 0x1_2345.into();
    c %= 256_u16;
    assert_eq!(c, BigInt::from(0x45));
}

#[test]
fn test_plain_div() {
    let mut m: BigInt = BigInt::new();
    let q = BigInt::plain_div(BigInt::from(-17), &BigInt::from(5), Some(&mut m));
    assert_eq!(q, BigInt::from(-3));
    assert_eq!(m, BigInt::from(-2));

    let mut m: BigInt = BigInt::new();
    let q = BigInt::plain_div(BigInt::from(17), &BigInt::from(-5), Some(&mut m));
    assert_eq!(q, BigInt::from(-3));
    assert_eq!(m, BigInt::from(2));

    let q: BigInt = BigInt::plain_div(BigInt::from(-0x8000_0000_0000_0000_i64), &BigInt::from(2), None);
    assert_eq!(q, BigInt::from(-0x4000_0000_0000_0000_i64));
}

#[test]
fn test_div_alg_a_literal() {
    // two-limb divisor with a small top limb forces the normalization shift
    let a: BigInt16 = "123456789012345678901234567890".into();
    let b: BigInt16 = "987654321".into();
    let mut m = BigInt::new();
    let q = BigInt::div_alg_a(a.clone(), &b, Some(&mut m));
    assert_eq!(q, "124999998873437499901".into());
    assert_eq!(m, "574845669".into());
    assert_eq!(&q * &b + &m, a);

    // single-limb divisor falls back to the scalar sweep
    let a: BigInt32 = "123456789012345678901234567890".into();
    let b: BigInt32 = "987654321".into();
    let mut m = BigInt::new();
    let q = BigInt::div_alg_a(a.clone(), &b, Some(&mut m));
    assert_eq!(q, "124999998873437499901".into());
    assert_eq!(m, "574845669".into());
}

#[test]
fn test_div_alg_a_wide_divisor() {
    let a: BigInt32 = "31415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679".into();
    let b: BigInt32 = "271828182845904523536028747135266249775724709369995".into();
    let mut m = BigInt::new();
    let q = BigInt::div_alg_a(a.clone(), &b, Some(&mut m));
    assert!(!m.sign() && m < b);
    assert_eq!(&q * &b + &m, a);
}

#[test]
fn test_div_alg_b_literal() {
    let a: BigInt16 = "123456789012345678901234567890".into();
    let b: BigInt16 = "987654321".into();
    let mut m = BigInt::new();
    let q = BigInt::div_alg_b(a.clone(), &b, Some(&mut m));
    assert_eq!(q, "124999998873437499901".into());
    assert_eq!(m, "574845669".into());
}

#[test]
fn test_div_alg_b_routes_wide_limbs_to_a() {
    let a: BigInt32 = "123456789012345678901234567890".into();
    let b: BigInt32 = "12345678901234567".into();
    let qa = BigInt::div_alg_a(a.clone(), &b, None);
    let qb = BigInt::div_alg_b(a.clone(), &b, None);
    assert_eq!(qa, qb);
}

#[test]
fn test_div_signs() {
    let a: BigInt = (-17).into();
    let b: BigInt = 5.into();
    assert_eq!(&a / &b, BigInt::from(-3));
    assert_eq!(&a % &b, BigInt::from(-2));
    assert_eq!(&a / &BigInt::from(-5), BigInt::from(3));
    assert_eq!(&a % &BigInt::from(-5), BigInt::from(-2));
}

#[test]
fn test_div_by_zero_is_identity() {
    let a: BigInt = "123456789123456789123456789".into();
    let z = BigInt::new();
    assert_eq!(&a / &z, a);
    assert_eq!(&a % &z, a);
    assert_eq!(&a / 0_u16, a);
    assert_eq!(&a % 0_u16, a);
}

#[test]
fn test_div_smaller_dividend() {
    let a: BigInt = (-42).into();
    let b: BigInt = "100000000000000000000".into();
    assert_eq!(&a / &b, BigInt::from(0));
    assert_eq!(&a % &b, a);
}
