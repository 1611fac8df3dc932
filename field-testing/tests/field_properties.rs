//! The full property suite run over moduli of different shapes and sizes.

use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use zq_field::PrimeField;
use zq_field_testing::{
    test_centered_ordering, test_group_laws, test_ntt_roundtrip, test_repr_roundtrips,
    test_sqrt_consistency,
};

fn check(p: &str) {
    let p = BigUint::parse_bytes(p.as_bytes(), 10).unwrap();
    let mut rng = SmallRng::seed_from_u64(9);
    let f = PrimeField::new(p, &mut rng);

    test_group_laws(&f, &mut rng, 20);
    test_sqrt_consistency(&f, &mut rng, 20);
    test_repr_roundtrips(&f, &mut rng, 20);
    test_centered_ordering(&f, &mut rng, 50);
    let max_bits = f.two_adicity().min(6) as usize;
    test_ntt_roundtrip(&f, &mut rng, max_bits);
}

#[test]
fn tiny_tonelli_shanks_field() {
    check("17");
}

#[test]
fn tiny_shanks_field() {
    check("11");
}

#[test]
fn two_adicity_five() {
    check("97");
}

#[test]
fn ntt_friendly_small_field() {
    // 3 * 2^18 + 1
    check("786433");
}

#[test]
fn goldilocks_field() {
    // 2^64 - 2^32 + 1, two-adicity 32.
    check("18446744069414584321");
}

#[test]
fn bn254_scalar_field() {
    // 254-bit modulus with two-adicity 28.
    check("21888242871839275222246405745257275088548364400416034343698204186575808495617");
}
