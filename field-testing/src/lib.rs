//! Utilities for testing field implementations.

#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;
use zq_field::PrimeField;
use zq_ntt::NttEngine;

/// Additive and multiplicative group laws plus Fermat's little theorem,
/// on sampled elements.
pub fn test_group_laws(f: &PrimeField, rng: &mut impl RngCore, reps: usize) {
    let p_minus_1 = f.p() - 1u32;
    for _ in 0..reps {
        let a = f.random(rng);
        let b = f.random(rng);
        assert!(f.add(&a, &f.neg(&a)).is_zero());
        assert_eq!(f.add(&a, &b), f.add(&b, &a));
        assert_eq!(f.mul(&a, &b), f.mul(&b, &a));
        if !a.is_zero() {
            assert!(f.mul(&a, &f.inv(&a)).is_one());
            assert!(f.pow(&a, &p_minus_1).is_one());
        }
    }
}

/// `sqrt(a^2)` must exist, square back to `a^2`, and land in the
/// non-negative half of the centered ordering.
pub fn test_sqrt_consistency(f: &PrimeField, rng: &mut impl RngCore, reps: usize) {
    assert_eq!(f.sqrt(&BigUint::ZERO), Some(BigUint::ZERO));
    for _ in 0..reps {
        let a = f.random(rng);
        let sq = f.square(&a);
        let root = f.sqrt(&sq).expect("squares have roots");
        assert_eq!(f.square(&root), sq);
        assert!(f.geq(&root, &BigUint::ZERO));
    }
}

/// All four byte representations round-trip.
pub fn test_repr_roundtrips(f: &PrimeField, rng: &mut impl RngCore, reps: usize) {
    let mut buf = vec![0u8; f.n8()];
    for _ in 0..reps {
        let a = f.random(rng);
        f.to_rpr_le(&mut buf, &a);
        assert_eq!(f.from_rpr_le(&buf), a);
        f.to_rpr_be(&mut buf, &a);
        assert_eq!(f.from_rpr_be(&buf), a);
        f.to_rpr_lem(&mut buf, &a);
        assert_eq!(f.from_rpr_lem(&buf), a);
        f.to_rpr_bem(&mut buf, &a);
        assert_eq!(f.from_rpr_bem(&buf), a);
    }
}

/// The centered comparisons form a strict total order consistent with
/// each other.
pub fn test_centered_ordering(f: &PrimeField, rng: &mut impl RngCore, reps: usize) {
    for _ in 0..reps {
        let a = f.random(rng);
        let b = f.random(rng);
        assert_eq!(f.lt(&a, &b), !f.geq(&a, &b));
        assert_eq!(f.gt(&a, &b), !f.leq(&a, &b));
        assert_eq!(f.lt(&a, &b), f.gt(&b, &a));
        let strict = [f.lt(&a, &b), f.gt(&a, &b), f.eq(&a, &b)];
        assert_eq!(strict.iter().filter(|&&x| x).count(), 1);
    }
}

/// `ifft(fft(v)) == v` for every power-of-two length up to `2^max_bits`.
pub fn test_ntt_roundtrip(f: &PrimeField, rng: &mut impl RngCore, max_bits: usize) {
    let ntt = NttEngine::over_field(f);
    for bits in 0..=max_bits {
        let v: Vec<BigUint> = (0..1usize << bits).map(|_| f.random(rng)).collect();
        assert_eq!(ntt.ifft(&ntt.fft(&v)), v);
    }
}
