//! Random value generation. The generator is process-wide, lazily seeded
//! from the system entropy source once, and serialized behind a mutex.

use std::sync::Mutex;

use lazy_static::lazy_static;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::big_int::BigInt;
use crate::limb::Limb;

lazy_static! {
    static ref RAND_GEN: Mutex<StdRng> = Mutex::new(StdRng::from_entropy());
}

impl<L: Limb> BigInt<L> {
    /// Fill `length` limbs (0 keeps the current length) with uniform bits.
    /// With `fixed == 0` the result is kept non-negative. Otherwise the top
    /// limb's bit length is forced to `fixed % LIMB`, where 0 stands for
    /// the full limb, so `fixed == LIMB` always sets the sign bit.
    pub fn gen_random(&mut self, length: usize, fixed: usize) -> &mut Self {
        let length = if length == 0 { self.len } else { length };
        self.auto_expand_size(length);
        {
            let mut rng = RAND_GEN.lock().unwrap();
            for i in 0..length {
                self.val[i] = L::from_u64(rng.gen::<u64>());
            }
        }
        for i in length..self.len {
            self.val[i] = L::ZERO;
        }
        self.len = length;
        if fixed > 0 {
            let mut r = (fixed % L::BITS as usize) as u32;
            if r == 0 {
                r = L::BITS;
            }
            let mask = L::from_u64((1u64 << r) - 1);
            self.val[length - 1] = (self.val[length - 1] & mask) | (L::ONE << (r - 1));
        } else if self.sign() {
            self.set_len(length + 1, false);
        }
        self.shrink_len();
        self
    }
}

#[test]
fn test_gen_random_length() {
    let mut a: BigInt = BigInt::new();
    a.gen_random(7, 0);
    assert!(a.length() <= 8);
    assert!(!a.sign());

    // length 0 reuses the current length
    let before = a.length();
    a.gen_random(0, 0);
    assert!(a.length() <= before + 1);
}

#[test]
fn test_gen_random_fixed() {
    let mut a: BigInt = BigInt::new();
    for _ in 0..16 {
        a.gen_random(3, 16);
        assert!(a.sign());
        a.gen_random(3, 5);
        assert!(!a.sign());
        let top = a.data()[a.length() - 1];
        assert!(top >= 1 << 4 && top < 1 << 5);
    }
}

#[test]
fn test_gen_random_chains() {
    let mut a: BigInt = BigInt::new();
    a.gen_random(3, 0).to_opposite();
    assert!(a.sign() || a.is_zero());
}
