//! # Big Calc
//! Arbitrary-precision two's-complement integers with a configurable limb
//! width. The limb type is any of `u8`, `u16`, `u32`, so that two limbs
//! always fit the 64-bit accumulator the arithmetic runs on.
//! # Example
//! ```
//! use big_calc::BigInt;
//!
//! let a: BigInt = "10000000000000".into();
//! let b: BigInt = "900000000000".into();
//! println!("a = {}", a);
//! println!("a + b = {}", &a + &b);
//! println!("a - b = {}", &a - &b);
//! println!("a * b = {}", &a * &b);
//! println!("a / b = {}", &a / &b);
//! println!("a % b = {}", &a % &b);
//! println!("a << 10 = {}", &a << 10);
//! println!("a >> 10 = {}", &a >> 10);
//! ```

mod big_int;
mod big_int_bits;
mod big_int_constants;
mod big_int_div;
mod big_int_mul;
mod big_int_radix;
mod limb;
mod random;

pub use big_int::BigInt;
pub use big_int_radix::ParseBigIntError;
pub use limb::Limb;

pub type BigInt8 = BigInt<u8>;
pub type BigInt16 = BigInt<u16>;
pub type BigInt32 = BigInt<u32>;

#[cfg(test)]
mod tests {
    use crate::BigInt;

    #[test]
    fn it_works() {
        let a: BigInt = "10000000000000".into();
        let b: BigInt = "900000000000".into();
        assert_eq!(&a + &b, "10900000000000".into());
        assert_eq!(&a - &b, "9100000000000".into());
        assert_eq!(&a * &b, "9000000000000000000000000".into());
        assert_eq!(&a / &b, 11.into());
        assert_eq!(&a % &b, "100000000000".into());
        assert_eq!(&a << 10, "10240000000000000".into());
        assert_eq!(&a >> 10, "9765625000".into());
    }
}
