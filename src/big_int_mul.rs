//! Multiplication: single-limb scaling, the schoolbook loop with a packed
//! 64-bit fast path, and the convolution multiplier for large operands.

use std::f64::consts::PI;
use std::ops::{Add, Mul, MulAssign, Sub};

use crate::big_int::{forward_binop, forward_scalar_binop, BigInt};
use crate::big_int_constants::FFT_THRESHOLD;
use crate::limb::Limb;

// 实现标量乘法
impl<L: Limb> BigInt<L> {
    /// Multiply by a single limb, propagating 64-bit carries.
    pub fn basic_mul_eq(&mut self, rhs: L) -> &mut Self {
        if rhs == L::ZERO {
            for i in 0..self.len {
                self.val[i] = L::ZERO;
            }
            self.len = 1;
            return self;
        }
        if rhs == L::ONE {
            return self;
        }
        let sign = self.sign();
        if sign {
            self.to_opposite();
        }
        let l = self.len;
        self.set_len(l + 1, false);
        let r = rhs.to_u64();
        let mut carry: u64 = 0;
        for i in 0..self.len {
            let t = self.val[i].to_u64() * r + carry;
            self.val[i] = L::from_u64(t);
            carry = t >> L::BITS;
        }
        if self.sign() {
            let l = self.len;
            self.set_len(l + 1, false);
        }
        if sign {
            self.to_opposite();
        }
        self.shrink_len();
        self
    }
}

// 实现乘法
impl<L: Limb> BigInt<L> {
    /// Schoolbook multiplication; operands that pack into one 64-bit word
    /// take the native multiply instead.
    pub fn plain_mul_eq(&mut self, rhs: &BigInt<L>) -> &mut Self {
        let sign_a = self.sign();
        let sign_b = rhs.sign();
        if sign_a {
            self.to_opposite();
        }
        let holder;
        let b: &BigInt<L> = if sign_b {
            holder = {
                let mut t = rhs.clone();
                t.to_opposite();
                t
            };
            &holder
        } else {
            rhs
        };
        let bits = L::BITS as usize;
        if (self.len + b.len) * bits <= 64 {
            let mut x: u64 = 0;
            for i in (0..self.len).rev() {
                x = (x << L::BITS) | self.val[i].to_u64();
            }
            let mut y: u64 = 0;
            for i in (0..b.len).rev() {
                y = (y << L::BITS) | b.val[i].to_u64();
            }
            let total = self.len + b.len;
            self.set_len(total, false);
            let mut z = x * y;
            for i in 0..total {
                self.val[i] = L::from_u64(z);
                z >>= L::BITS;
            }
        } else {
            let total = self.len + b.len;
            let mut res = vec![L::ZERO; total];
            for i in 0..self.len {
                let a_i = self.val[i].to_u64();
                if a_i == 0 {
                    continue;
                }
                let mut carry: u64 = 0;
                for j in 0..b.len {
                    let t = a_i * b.val[j].to_u64() + res[i + j].to_u64() + carry;
                    res[i + j] = L::from_u64(t);
                    carry = t >> L::BITS;
                }
                res[i + b.len] = L::from_u64(carry);
            }
            self.set_len(total, false);
            self.val[..total].copy_from_slice(&res);
        }
        if self.sign() {
            let l = self.len;
            self.set_len(l + 1, false);
        }
        if sign_a != sign_b {
            self.to_opposite();
        }
        self.shrink_len();
        self
    }

    pub fn plain_mul(mut lhs: Self, rhs: &Self) -> Self {
        lhs.plain_mul_eq(rhs);
        lhs
    }
}

// 实现 FFT 乘法
impl<L: Limb> BigInt<L> {
    /// Convolution multiply: limbs are split into 8-bit samples so that the
    /// accumulated products stay inside the 53-bit double mantissa, run
    /// through a complex radix-2 transform, and carried back into limbs.
    pub fn fft_mul_eq(&mut self, rhs: &BigInt<L>) -> &mut Self {
        let sign_a = self.sign();
        let sign_b = rhs.sign();
        if sign_a {
            self.to_opposite();
        }
        let holder;
        let b: &BigInt<L> = if sign_b {
            holder = {
                let mut t = rhs.clone();
                t.to_opposite();
                t
            };
            &holder
        } else {
            rhs
        };
        let spl = (L::BITS / 8) as usize;
        let mut n = 1usize;
        while n < (self.len + b.len) * spl {
            n <<= 1;
        }
        let mut fa = vec![Complex::ZERO; n];
        let mut fb = vec![Complex::ZERO; n];
        for i in 0..self.len {
            for k in 0..spl {
                fa[i * spl + k].re = ((self.val[i].to_u64() >> (8 * k as u32)) & 0xff) as f64;
            }
        }
        for i in 0..b.len {
            for k in 0..spl {
                fb[i * spl + k].re = ((b.val[i].to_u64() >> (8 * k as u32)) & 0xff) as f64;
            }
        }
        fft(&mut fa, false);
        fft(&mut fb, false);
        for i in 0..n {
            fa[i] = fa[i] * fb[i];
        }
        fft(&mut fa, true);

        let total = self.len + b.len + 1;
        let mut res = vec![L::ZERO; total];
        let mut carry: u64 = 0;
        for s in 0..total * spl {
            let c = if s < n {
                let x = fa[s].re.round();
                if x < 0.0 { 0 } else { x as u64 }
            } else {
                0
            };
            let t = carry + c;
            res[s / spl] |= L::from_u64((t & 0xff) << (8 * (s % spl) as u32));
            carry = t >> 8;
        }
        self.set_len(total, false);
        self.val[..total].copy_from_slice(&res);
        if self.sign() {
            let l = self.len;
            self.set_len(l + 1, false);
        }
        if sign_a != sign_b {
            self.to_opposite();
        }
        self.shrink_len();
        self
    }

    pub fn fft_mul(mut lhs: Self, rhs: &Self) -> Self {
        lhs.fft_mul_eq(rhs);
        lhs
    }
}

impl<L: Limb> MulAssign<&BigInt<L>> for BigInt<L> {
    fn mul_assign(&mut self, rhs: &BigInt<L>) {
        if self.len.max(rhs.len) <= FFT_THRESHOLD {
            self.plain_mul_eq(rhs);
        } else {
            self.fft_mul_eq(rhs);
        }
    }
}

impl<L: Limb> MulAssign<L> for BigInt<L> {
    fn mul_assign(&mut self, rhs: L) {
        self.basic_mul_eq(rhs);
    }
}

forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_scalar_binop!(Mul, mul, MulAssign, mul_assign);

#[derive(Debug, Clone, Copy)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex { re: self.re + rhs.re, im: self.im + rhs.im }
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex { re: self.re - rhs.re, im: self.im - rhs.im }
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

/// Permute into bit-reversed index order.
fn bit_rev_sort<T>(a: &mut [T]) {
    let n = a.len();
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            a.swap(i, j);
        }
    }
}

/// Iterative radix-2 Cooley-Tukey transform; `inv` runs the inverse and
/// applies the 1/n scaling.
fn fft(a: &mut [Complex], inv: bool) {
    let n = a.len();
    bit_rev_sort(a);
    let mut len = 2;
    while len <= n {
        let ang = if inv { -2.0 * PI / len as f64 } else { 2.0 * PI / len as f64 };
        let wlen = Complex { re: ang.cos(), im: ang.sin() };
        let mut i = 0;
        while i < n {
            let mut w = Complex { re: 1.0, im: 0.0 };
            for j in 0..len / 2 {
                let u = a[i + j];
                let v = a[i + j + len / 2] * w;
                a[i + j] = u + v;
                a[i + j + len / 2] = u - v;
                w = w * wlen;
            }
            i += len;
        }
        len <<= 1;
    }
    if inv {
        let scale = 1.0 / n as f64;
        for x in a.iter_mut() {
            x.re *= scale;
            x.im *= scale;
        }
    }
}

#[test]
fn test_basic_mul() {
    let mut a: BigInt = 10_000.into();
    a.basic_mul_eq(3001);
    assert_eq!(a, BigInt::from(30_010_000));

    let mut b: BigInt = (-255).into();
    b *= 255_u16;
    assert_eq!(b, BigInt::from(-65025));

    let mut c: BigInt<u8> = 77.into();
    c.basic_mul_eq(0);
    assert!(c.is_zero());
}

#[test]
fn test_plain_mul() {
    let a: BigInt = "10000000000000000".into();
    let b: BigInt = "30000000000000000".into();
    let r: BigInt = "300000000000000000000000000000000".into();
    assert_eq!(BigInt::plain_mul(a.clone(), &b), r);
    assert_eq!(BigInt::plain_mul(b, &a), r);

    // packed 64-bit path
    let a: BigInt = 123_456.into();
    let b: BigInt = (-789).into();
    assert_eq!(a * b, BigInt::from(-97_406_784_i64));
}

#[test]
fn test_fft_mul_matches_plain() {
    let a: BigInt = "123456789012345678901234567890123456789".into();
    let b: BigInt = "987654321098765432109876543210987654321".into();
    assert_eq!(
        BigInt::fft_mul(a.clone(), &b),
        BigInt::plain_mul(a.clone(), &b)
    );
    let na = -a.clone();
    assert_eq!(BigInt::fft_mul(na.clone(), &b), BigInt::plain_mul(na, &b));
}

#[test]
fn test_power_of_two_square() {
    // (2^128)^2 == 2^256, bit for bit, through the convolution path
    let p128: BigInt = BigInt::from(1) << 128;
    let p256 = BigInt::fft_mul(p128.clone(), &p128);
    assert_eq!(p256, BigInt::from(1) << 256);
    assert_eq!(p256, p128.clone() * &p128);
}
