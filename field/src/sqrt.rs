use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;
use tracing::debug;

use crate::field::{PrimeField, sample_wide};

/// The square-root algorithm selected for a field, with its constants.
///
/// The choice is a classification of `p mod 4 / 8 / 16`; see
/// <https://eprint.iacr.org/2012/685.pdf>. Kong and Atkin are legitimate
/// classifications that this engine does not implement: selecting them
/// succeeds, invoking them panics.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqrtAlgorithm {
    /// General two-adic algorithm, for `p = 1 (mod 16)`.
    TonelliShanks {
        /// `s` in `p - 1 = t * 2^s`, `t` odd.
        s: u32,
        /// The odd cofactor `t`.
        t: BigUint,
        /// `(t - 1) / 2`.
        t_minus_1_over_2: BigUint,
        /// `c^t` for a randomly sampled nonresidue `c`.
        z: BigUint,
    },
    /// For `p = 9 (mod 16)`. Not implemented.
    Kong,
    /// For `p = 5 (mod 8)`. Not implemented.
    Atkin,
    /// Closed-form Shanks exponentiation, for `p = 3 (mod 4)`.
    Shanks {
        /// `(p - 3) / 4`.
        e1: BigUint,
    },
}

/// Classifies `p` and parametrizes the matching algorithm.
///
/// # Panics
/// Panics when no algorithm covers the residue class of `p`.
pub(crate) fn select(
    p: &BigUint,
    negone: &BigUint,
    bit_length: u64,
    rng: &mut impl RngCore,
) -> SqrtAlgorithm {
    match (residue(p, 4), residue(p, 8), residue(p, 16)) {
        (1, 1, 1) => tonelli_shanks(p, negone, bit_length, rng),
        (1, 1, 9) => SqrtAlgorithm::Kong,
        (1, 5, _) => SqrtAlgorithm::Atkin,
        (3, _, _) => SqrtAlgorithm::Shanks { e1: (p - 3u32) >> 2 },
        _ => panic!(
            "no square-root algorithm for this modulus: p = {} (mod 16)",
            residue(p, 16)
        ),
    }
}

fn residue(p: &BigUint, m: u32) -> u32 {
    (p % BigUint::from(m)).to_u32().unwrap_or(0)
}

fn tonelli_shanks(
    p: &BigUint,
    negone: &BigUint,
    bit_length: u64,
    rng: &mut impl RngCore,
) -> SqrtAlgorithm {
    // The algorithm keeps its own two-adic split of p - 1.
    let mut s = 0u32;
    let mut t = negone.clone();
    while t.is_even() {
        s += 1;
        t >>= 1;
    }
    let t_minus_1_over_2 = (&t - 1u32) >> 1;

    // Sample until c^t generates the order-2^s subgroup, witnessed by
    // (c^t)^(2^(s-1)) = -1.
    let order_test = BigUint::one() << (s - 1);
    let z = loop {
        let c = sample_wide(bit_length, rng) % p;
        let z = c.modpow(&t, p);
        if z.modpow(&order_test, p) == *negone {
            break z;
        }
    };
    debug!(s, z = %z, "parametrized Tonelli-Shanks");

    SqrtAlgorithm::TonelliShanks {
        s,
        t,
        t_minus_1_over_2,
        z,
    }
}

impl PrimeField {
    /// The canonical square root of `a`, or `None` when `a` is a
    /// quadratic non-residue.
    ///
    /// Of the two roots `x` and `p - x`, the one in the non-negative half
    /// of the centered ordering is returned.
    ///
    /// # Panics
    /// Panics when the classified algorithm (Kong, Atkin) is not
    /// implemented.
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        match &self.sqrt {
            SqrtAlgorithm::TonelliShanks {
                s,
                t_minus_1_over_2,
                z,
                ..
            } => self.sqrt_tonelli_shanks(a, *s, t_minus_1_over_2, z.clone()),
            SqrtAlgorithm::Shanks { e1 } => self.sqrt_shanks(a, e1),
            SqrtAlgorithm::Kong => {
                panic!("Kong square-root algorithm (p = 9 mod 16) not implemented")
            }
            SqrtAlgorithm::Atkin => {
                panic!("Atkin square-root algorithm (p = 5 mod 8) not implemented")
            }
        }
    }

    fn sqrt_tonelli_shanks(
        &self,
        a: &BigUint,
        s: u32,
        t_minus_1_over_2: &BigUint,
        mut z: BigUint,
    ) -> Option<BigUint> {
        if a.is_zero() {
            return Some(BigUint::ZERO);
        }

        let mut w = self.pow(a, t_minus_1_over_2);
        // (w^2 * a)^(2^(s-1)) = a^((p-1)/2); -1 means non-residue.
        let order_test = BigUint::one() << (s - 1);
        let a0 = self.pow(&self.mul(&self.square(&w), a), &order_test);
        if a0 == self.negone {
            return None;
        }

        let mut v = s;
        let mut x = self.mul(a, &w);
        let mut b = self.mul(&x, &w);
        while !b.is_one() {
            // Smallest k >= 1 with b^(2^k) = 1.
            let mut b2k = self.square(&b);
            let mut k = 1u32;
            while !b2k.is_one() {
                b2k = self.square(&b2k);
                k += 1;
            }

            // w = z^(2^(v-k-1)), then square down the order.
            w = z;
            for _ in 0..v - k - 1 {
                w = self.square(&w);
            }
            z = self.square(&w);
            b = self.mul(&b, &z);
            x = self.mul(&x, &w);
            v = k;
        }
        Some(self.normalize_root(x))
    }

    fn sqrt_shanks(&self, a: &BigUint, e1: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return Some(BigUint::ZERO);
        }

        let a1 = self.pow(a, e1);
        // a1^2 * a = a^((p-1)/2); -1 means non-residue.
        let a0 = self.mul(&self.square(&a1), a);
        if a0 == self.negone {
            return None;
        }
        Some(self.normalize_root(self.mul(&a1, a)))
    }

    /// Picks the representative in the non-negative half of the centered
    /// ordering.
    fn normalize_root(&self, x: BigUint) -> BigUint {
        if self.geq(&x, &BigUint::ZERO) {
            x
        } else {
            self.neg(&x)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn field(p: u32) -> PrimeField {
        PrimeField::new(BigUint::from(p), &mut SmallRng::seed_from_u64(1))
    }

    fn b(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn classification() {
        assert!(matches!(
            field(17).sqrt_algorithm(),
            SqrtAlgorithm::TonelliShanks { .. }
        ));
        assert!(matches!(field(41).sqrt_algorithm(), SqrtAlgorithm::Kong));
        assert!(matches!(field(13).sqrt_algorithm(), SqrtAlgorithm::Atkin));
        assert!(matches!(
            field(11).sqrt_algorithm(),
            SqrtAlgorithm::Shanks { .. }
        ));
    }

    #[test]
    fn tonelli_shanks_mod_17() {
        let f = field(17);
        // 4 has roots 2 and 15; the centered-non-negative one is 2.
        assert_eq!(f.sqrt(&b(4)), Some(b(2)));
        // 5 is a non-residue mod 17.
        assert_eq!(f.sqrt(&b(5)), None);
        assert_eq!(f.sqrt(&b(0)), Some(b(0)));
    }

    #[test]
    fn tonelli_shanks_all_squares_mod_17() {
        let f = field(17);
        for a in 1u32..17 {
            let sq = f.square(&b(a));
            let root = f.sqrt(&sq).expect("squares have roots");
            assert_eq!(f.square(&root), sq);
            // Canonical choice: never in the negative half.
            assert!(f.geq(&root, &BigUint::ZERO));
        }
    }

    #[test]
    fn shanks_mod_11() {
        let f = field(11);
        assert_eq!(f.sqrt(&b(9)), Some(b(3)));
        assert_eq!(f.sqrt(&b(0)), Some(b(0)));
        for a in 1u32..11 {
            let sq = f.square(&b(a));
            let root = f.sqrt(&sq).expect("squares have roots");
            assert_eq!(f.square(&root), sq);
        }
        // Non-residues mod 11: 2, 6, 7, 8, 10.
        for n in [2u32, 6, 7, 8, 10] {
            assert_eq!(f.sqrt(&b(n)), None);
        }
    }

    #[test]
    fn tonelli_shanks_larger_prime() {
        // 97 = 1 (mod 16), two-adicity 5.
        let f = field(97);
        for a in 1u32..97 {
            let sq = f.square(&b(a));
            let root = f.sqrt(&sq).expect("squares have roots");
            assert_eq!(f.square(&root), sq);
        }
    }

    #[test]
    #[should_panic(expected = "not implemented")]
    fn kong_panics_when_invoked() {
        // Classification succeeds; only the call fails.
        field(41).sqrt(&b(4));
    }

    #[test]
    #[should_panic(expected = "not implemented")]
    fn atkin_panics_when_invoked() {
        field(13).sqrt(&b(4));
    }
}
