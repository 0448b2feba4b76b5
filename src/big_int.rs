//! # BigInt
//! Arbitrary-precision integers stored as a little-endian limb vector in
//! two's-complement notation: the most significant bit of the top limb is
//! the sign bit. All compound-assign operators mutate in place; binary
//! operators take the left operand by value as the working buffer.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, SubAssign};

use crate::limb::Limb;

#[derive(Debug, Clone)]
pub struct BigInt<L: Limb = u16> {
    /// Active length; `val[len..]` is always zero.
    pub(crate) len: usize,
    /// Backing buffer, `val.len()` is the capacity (a power of two).
    pub(crate) val: Vec<L>,
    /// Interpret the top bit of `val[len-1]` as a sign bit.
    pub is_signed: bool,
}

// 实现构造
impl<L: Limb> BigInt<L> {
    pub fn new() -> Self {
        BigInt { len: 1, val: vec![L::ZERO], is_signed: true }
    }

    /// Build from raw little-endian limbs, canonicalizing the length.
    pub fn from_raw_parts(data: &[L]) -> Self {
        let mut n = BigInt::new();
        n.set_len(data.len().max(1), false);
        n.val[..data.len()].copy_from_slice(data);
        n.shrink_len();
        n
    }
}

impl<L: Limb> Default for BigInt<L> {
    fn default() -> Self {
        BigInt::new()
    }
}

macro_rules! impl_from_signed {
    ($($i:ty),*) => {
    $(
    impl<L: Limb> From<$i> for BigInt<L> {
        fn from(v: $i) -> Self {
            let mut n = BigInt::new();
            let limbs = (64 / L::BITS) as usize;
            n.set_len(limbs, false);
            let mut bits = v as i64 as u64;
            for i in 0..limbs {
                n.val[i] = L::from_u64(bits);
                bits >>= L::BITS;
            }
            n.shrink_len();
            n
        }
    }
    )*
    };
}

macro_rules! impl_from_unsigned {
    ($($u:ty),*) => {
    $(
    impl<L: Limb> From<$u> for BigInt<L> {
        fn from(v: $u) -> Self {
            let mut n = BigInt::new();
            let limbs = (64 / L::BITS) as usize;
            n.set_len(limbs, false);
            let mut bits = v as u64;
            for i in 0..limbs {
                n.val[i] = L::from_u64(bits);
                bits >>= L::BITS;
            }
            if n.sign() {
                let l = n.len;
                n.set_len(l + 1, false);
            }
            n.shrink_len();
            n
        }
    }
    )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

// 杂项辅助函数
impl<L: Limb> BigInt<L> {
    /// True when the value is negative.
    #[inline]
    pub fn sign(&self) -> bool {
        self.is_signed && self.val[self.len - 1].msb()
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.len
    }

    /// The active limbs, little-endian.
    #[inline]
    pub fn data(&self) -> &[L] {
        &self.val[..self.len]
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.val.len()
    }

    pub fn is_zero(&self) -> bool {
        self.val[..self.len].iter().all(|&x| x == L::ZERO)
    }
}

// 存储与长度管理
impl<L: Limb> BigInt<L> {
    /// Grow the buffer, doubling to the next power of two covering `target_len`.
    pub(crate) fn auto_expand_size(&mut self, target_len: usize) {
        let mut cap = self.capacity();
        while cap < target_len {
            cap <<= 1;
        }
        if cap > self.capacity() {
            self.val.resize(cap, L::ZERO);
        }
    }

    /// Release buffer space once `len` drops to a quarter of the capacity.
    pub(crate) fn auto_shrink_size(&mut self) {
        let mut cap = self.capacity();
        while cap > 1 && self.len <= cap / 4 {
            cap >>= 1;
        }
        if cap < self.capacity() {
            self.val.truncate(cap);
            self.val.shrink_to_fit();
        }
    }

    /// Shrink the allocation to the power of two covering `len`.
    /// Returns the capacity after shrinking.
    pub fn shrink(&mut self) -> usize {
        let mut cap = 1;
        while cap < self.len {
            cap <<= 1;
        }
        if cap < self.capacity() {
            self.val.truncate(cap);
            self.val.shrink_to_fit();
        }
        self.capacity()
    }

    /// Truncate (zeroing the discarded limbs) or extend. Extension fills
    /// with the current sign when `preserve_sign`, else with zero.
    pub(crate) fn set_len(&mut self, new_len: usize, preserve_sign: bool) {
        let new_len = new_len.max(1);
        if new_len < self.len {
            for i in new_len..self.len {
                self.val[i] = L::ZERO;
            }
            self.len = new_len;
        } else if new_len > self.len {
            let fill = if preserve_sign && self.sign() { L::MAX } else { L::ZERO };
            if new_len > self.capacity() {
                self.auto_expand_size(new_len);
            }
            for i in self.len..new_len {
                self.val[i] = fill;
            }
            self.len = new_len;
        }
    }

    /// Drop redundant top limbs while the remaining top limb still encodes
    /// the same sign. Dropped limbs are zeroed so `val[len..]` stays zero.
    pub(crate) fn shrink_len(&mut self) {
        if self.is_signed {
            while self.len >= 2 {
                let top = self.val[self.len - 1];
                let below = self.val[self.len - 2];
                let redundant = (top == L::ZERO && !below.msb())
                    || (top == L::MAX && below.msb());
                if !redundant {
                    break;
                }
                self.val[self.len - 1] = L::ZERO;
                self.len -= 1;
            }
        } else {
            while self.len >= 2 && self.val[self.len - 1] == L::ZERO {
                self.len -= 1;
            }
        }
    }

    /// Truncate to `seg_len` limbs, preserving the original sign. When
    /// `bit_len % LIMB != 0` the top kept limb keeps that many low bits and
    /// is sign-filled above; otherwise a full sign limb may be appended, so
    /// the resulting length can be `seg_len + 1`.
    pub fn cut_len(&mut self, seg_len: usize, bit_len: usize) -> &mut Self {
        let sign = self.sign();
        let seg = seg_len.max(1);
        if seg < self.len {
            for i in seg..self.len {
                self.val[i] = L::ZERO;
            }
            self.len = seg;
        }
        let r = (bit_len % L::BITS as usize) as u32;
        if r != 0 && self.len == seg {
            let mask = L::from_u64((1u64 << r) - 1);
            let top = self.val[self.len - 1] & mask;
            self.val[self.len - 1] = if sign { top | !mask } else { top };
        } else if self.sign() != sign {
            let fill = if sign { L::MAX } else { L::ZERO };
            let l = self.len;
            self.auto_expand_size(l + 1);
            self.val[l] = fill;
            self.len = l + 1;
        }
        self.shrink_len();
        self
    }

    /// Truncate to `bit_len` bits, preserving the original sign.
    pub fn cut_bit(&mut self, bit_len: usize) -> &mut Self {
        let limb = L::BITS as usize;
        let seg = (bit_len + limb - 1) / limb;
        self.cut_len(seg.max(1), bit_len)
    }
}

// 实现取反与绝对值
impl<L: Limb> BigInt<L> {
    /// Two's-complement negation in place: `~x + 1` with a zero-limb
    /// extension when the `100..0` pattern would keep the wrong sign.
    pub fn to_opposite(&mut self) -> &mut Self {
        let was_negative = self.sign();
        for i in 0..self.len {
            self.val[i] = !self.val[i];
        }
        for i in 0..self.len {
            self.val[i] = self.val[i].wrapping_add(L::ONE);
            if self.val[i] != L::ZERO {
                break;
            }
        }
        if self.sign() == was_negative && !self.is_zero() {
            let l = self.len;
            self.set_len(l + 1, false);
        }
        self.shrink_len();
        self
    }

    pub fn to_absolute(&mut self) -> &mut Self {
        if self.sign() {
            self.to_opposite();
        }
        self
    }

    pub fn abs(&self) -> Self {
        let mut n = self.clone();
        n.to_absolute();
        n
    }
}

impl<L: Limb> Neg for BigInt<L> {
    type Output = BigInt<L>;

    fn neg(mut self) -> Self::Output {
        self.to_opposite();
        self
    }
}

impl<L: Limb> Neg for &BigInt<L> {
    type Output = BigInt<L>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// 实现大小比较
impl<L: Limb> PartialEq for BigInt<L> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.val[..self.len] == other.val[..other.len]
    }
}
impl<L: Limb> Eq for BigInt<L> {}

impl<L: Limb> Ord for BigInt<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign(), other.sign()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        if self.len != other.len {
            // canonical lengths: for negatives the longer one is further
            // from zero, hence smaller
            return if (self.len > other.len) != self.sign() {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        for i in (0..self.len).rev() {
            let (a, b) = (self.val[i], other.val[i]);
            if a != b {
                return a.cmp(&b);
            }
        }
        Ordering::Equal
    }
}

impl<L: Limb> PartialOrd for BigInt<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// 实现加减法
impl<L: Limb> BigInt<L> {
    /// Shared core of `+=` and `-=`: subtraction is `a + ~b + 1`.
    fn add_impl(&mut self, rhs: &BigInt<L>, invert: bool) {
        let rhs_sign = rhs.sign();
        let target = self.len.max(rhs.len) + 1;
        self.set_len(target, true);
        let ext = if rhs_sign { L::MAX } else { L::ZERO };
        let mut carry: u64 = invert as u64;
        for i in 0..target {
            let b = if i < rhs.len { rhs.val[i] } else { ext };
            let b = if invert { !b } else { b };
            let t = self.val[i].to_u64() + b.to_u64() + carry;
            self.val[i] = L::from_u64(t);
            carry = t >> L::BITS;
        }
        self.shrink_len();
    }
}

impl<L: Limb> AddAssign<&BigInt<L>> for BigInt<L> {
    fn add_assign(&mut self, rhs: &BigInt<L>) {
        self.add_impl(rhs, false);
    }
}

impl<L: Limb> SubAssign<&BigInt<L>> for BigInt<L> {
    fn sub_assign(&mut self, rhs: &BigInt<L>) {
        self.add_impl(rhs, true);
    }
}

impl<L: Limb> AddAssign<L> for BigInt<L> {
    fn add_assign(&mut self, rhs: L) {
        let target = self.len + 1;
        self.set_len(target, true);
        let mut carry = rhs.to_u64();
        for i in 0..target {
            if carry == 0 {
                break;
            }
            let t = self.val[i].to_u64() + carry;
            self.val[i] = L::from_u64(t);
            carry = t >> L::BITS;
        }
        self.shrink_len();
    }
}

impl<L: Limb> Add<L> for BigInt<L> {
    type Output = BigInt<L>;

    fn add(mut self, rhs: L) -> Self::Output {
        self += rhs;
        self
    }
}

/// Binary operators are defined on top of the compound-assign forms: the
/// left operand is taken by value and mutated.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl<L: Limb> std::ops::$assign_imp for BigInt<L> {
            fn $assign_method(&mut self, rhs: BigInt<L>) {
                std::ops::$assign_imp::$assign_method(self, &rhs);
            }
        }
        impl<L: Limb> std::ops::$imp for BigInt<L> {
            type Output = BigInt<L>;
            fn $method(mut self, rhs: BigInt<L>) -> BigInt<L> {
                std::ops::$assign_imp::$assign_method(&mut self, &rhs);
                self
            }
        }
        impl<L: Limb> std::ops::$imp<&BigInt<L>> for BigInt<L> {
            type Output = BigInt<L>;
            fn $method(mut self, rhs: &BigInt<L>) -> BigInt<L> {
                std::ops::$assign_imp::$assign_method(&mut self, rhs);
                self
            }
        }
        impl<L: Limb> std::ops::$imp<&BigInt<L>> for &BigInt<L> {
            type Output = BigInt<L>;
            fn $method(self, rhs: &BigInt<L>) -> BigInt<L> {
                let mut lhs = self.clone();
                std::ops::$assign_imp::$assign_method(&mut lhs, rhs);
                lhs
            }
        }
    };
}
pub(crate) use forward_binop;

/// Same forwarding for the single-limb scalar operators.
macro_rules! forward_scalar_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl<L: Limb> std::ops::$imp<L> for BigInt<L> {
            type Output = BigInt<L>;
            fn $method(mut self, rhs: L) -> BigInt<L> {
                std::ops::$assign_imp::$assign_method(&mut self, rhs);
                self
            }
        }
        impl<L: Limb> std::ops::$imp<L> for &BigInt<L> {
            type Output = BigInt<L>;
            fn $method(self, rhs: L) -> BigInt<L> {
                let mut lhs = self.clone();
                std::ops::$assign_imp::$assign_method(&mut lhs, rhs);
                lhs
            }
        }
    };
}
pub(crate) use forward_scalar_binop;

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);

#[test]
fn test_from_machine_ints() {
    let a: BigInt<u8> = 1000_i32.into();
    assert_eq!(a.data(), &[0xe8, 0x03]);

    let b: BigInt<u8> = (-1_i8).into();
    assert_eq!(b.data(), &[0xff]);
    assert!(b.sign());

    let c: BigInt<u16> = (-0x8000_i32).into();
    assert_eq!(c.data(), &[0x8000]);
    assert!(c.sign());

    // an unsigned value with the top bit set must gain a zero sign limb
    let d: BigInt<u16> = 0x8000_u16.into();
    assert_eq!(d.data(), &[0x8000, 0]);
    assert!(!d.sign());

    let e: BigInt<u32> = u64::MAX.into();
    assert_eq!(e.data(), &[u32::MAX, u32::MAX, 0]);
}

#[test]
fn test_compare() {
    let a: BigInt = 100.into();
    let b: BigInt = (-100).into();
    let c: BigInt = 70000.into();
    let d: BigInt = (-70000).into();
    assert!(b < a);
    assert!(a < c);
    assert!(d < b);
    assert!(d < c);
    assert_eq!(a, BigInt::from(100));
    assert_ne!(a, b);
}

#[test]
fn test_add_sub() {
    let a: BigInt<u8> = 0xff_u8.into();
    let b = a.clone() + &a;
    assert_eq!(b, BigInt::from(510));

    let a: BigInt = 123456.into();
    let b: BigInt = (-99999).into();
    assert_eq!(a.clone() + &b, BigInt::from(23457));
    assert_eq!(a.clone() - &b, BigInt::from(223455));
    assert_eq!(b.clone() - &a, BigInt::from(-223455));

    let mut c: BigInt = 0.into();
    c -= BigInt::from(1);
    assert_eq!(c, BigInt::from(-1));
    assert_eq!(c.length(), 1);

    let mut d: BigInt<u16> = 0xffff_u16.into();
    d += 1_u16;
    assert_eq!(d, BigInt::from(0x1_0000));
}

#[test]
fn test_opposite() {
    let mut a: BigInt<u8> = 128.into();
    assert_eq!(a.data(), &[0x80, 0x00]);
    a.to_opposite();
    assert_eq!(a.data(), &[0x80]);
    assert!(a.sign());
    a.to_opposite();
    assert_eq!(a.data(), &[0x80, 0x00]);

    let mut z: BigInt = 0.into();
    z.to_opposite();
    assert!(z.is_zero());

    let mut b: BigInt = 42.into();
    assert_eq!(b.abs(), BigInt::from(42));
    b.to_opposite();
    assert_eq!(b, BigInt::from(-42));
    b.to_absolute();
    assert_eq!(b, BigInt::from(42));
}

#[test]
fn test_storage_management() {
    let mut a: BigInt<u8> = BigInt::new();
    a.set_len(9, false);
    assert_eq!(a.capacity(), 16);
    a.set_len(1, false);
    assert_eq!(a.capacity(), 16);
    assert_eq!(a.shrink(), 1);

    let mut b: BigInt<u8> = (-1_i8).into();
    b.set_len(4, true);
    assert_eq!(b.data(), &[0xff; 4]);
    b.shrink_len();
    assert_eq!(b.data(), &[0xff]);
    // dropped limbs must be zeroed again
    assert_eq!(&b.val[1..4], &[0, 0, 0]);
}

#[test]
fn test_cut() {
    let mut a: BigInt<u8> = 0x1234_i32.into();
    a.cut_len(1, 0);
    // low limb 0x34 kept, zero limb appended so the value stays positive
    assert_eq!(a, BigInt::from(0x34));

    let mut b: BigInt<u8> = 0x12ff_i32.into();
    b.cut_len(1, 0);
    assert_eq!(b.data(), &[0xff, 0x00]);
    assert_eq!(b, BigInt::from(0xff));

    let mut c: BigInt<u8> = (-1_i8).into();
    c.cut_bit(4);
    assert_eq!(c, BigInt::from(-1));

    let mut d: BigInt<u8> = 0xab_i32.into();
    d.cut_bit(4);
    assert_eq!(d, BigInt::from(0x0b));
}
