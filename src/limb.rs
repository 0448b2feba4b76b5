//! The limb abstraction: one element of the little-endian magnitude vector.
//!
//! A limb is an unsigned integer of at most 32 bits, so that the product of
//! two limbs always fits a `u64` accumulator. The trait is sealed: only
//! `u8`, `u16` and `u32` qualify, which is what lets the division engine
//! pick its trial-quotient strategy per width at compile time.

use std::fmt::{Debug, Display};
use std::ops::{
    BitAnd, BitAndAssign,
    BitOr, BitOrAssign,
    BitXor, BitXorAssign,
    Not,
    Shl, ShlAssign,
    Shr, ShrAssign,
};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

pub trait Limb:
    sealed::Sealed
    + Copy + Eq + Ord + Default + Debug + Display
    + Not<Output = Self>
    + BitAnd<Output = Self> + BitAndAssign
    + BitOr<Output = Self> + BitOrAssign
    + BitXor<Output = Self> + BitXorAssign
    + Shl<u32, Output = Self> + ShlAssign<u32>
    + Shr<u32, Output = Self> + ShrAssign<u32>
    + Send + Sync + 'static
{
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Truncating conversion from the 64-bit accumulator.
    fn from_u64(v: u64) -> Self;
    fn to_u64(self) -> u64;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn leading_zeros(self) -> u32;
    fn trailing_zeros(self) -> u32;
    fn count_ones(self) -> u32;

    /// True when the top (sign) bit is set.
    #[inline]
    fn msb(self) -> bool {
        self >> (Self::BITS - 1) != Self::ZERO
    }
}

macro_rules! impl_limb {
    ($($t:ty),*) => {
    $(
    impl Limb for $t {
        const BITS: u32 = <$t>::BITS;
        const ZERO: Self = 0;
        const ONE: Self = 1;
        const MAX: Self = <$t>::MAX;

        #[inline(always)]
        fn from_u64(v: u64) -> Self {
            v as $t
        }
        #[inline(always)]
        fn to_u64(self) -> u64 {
            self as u64
        }
        #[inline(always)]
        fn wrapping_add(self, rhs: Self) -> Self {
            <$t>::wrapping_add(self, rhs)
        }
        #[inline(always)]
        fn leading_zeros(self) -> u32 {
            <$t>::leading_zeros(self)
        }
        #[inline(always)]
        fn trailing_zeros(self) -> u32 {
            <$t>::trailing_zeros(self)
        }
        #[inline(always)]
        fn count_ones(self) -> u32 {
            <$t>::count_ones(self)
        }
    }
    )*
    };
}
impl_limb!(u8, u16, u32);

#[test]
fn test_limb_msb() {
    assert!(0x80_u8.msb());
    assert!(!0x7f_u8.msb());
    assert!(0x8000_u16.msb());
    assert!(0x8000_0000_u32.msb());
    assert!(!1_u32.msb());
}

#[test]
fn test_limb_casts() {
    assert_eq!(u8::from_u64(0x1ff), 0xff);
    assert_eq!(u16::from_u64(0x1_0001), 1);
    assert_eq!(u32::from_u64(u64::MAX), u32::MAX);
    assert_eq!(0xffff_u16.to_u64(), 0xffff);
}
