use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_integer::{ExtendedGcd, Integer};
use num_traits::{One, ToPrimitive, Zero};
use rand::RngCore;
use tracing::{debug, instrument};

use crate::sqrt::{self, SqrtAlgorithm};

/// The field `Z/pZ` for a modulus `p` supplied at runtime.
///
/// Elements are canonical residues in `[0, p)` stored as [`BigUint`]; every
/// operation returns a canonical residue. Ordering comparisons use the
/// centered convention: residues above `p/2` compare as negative numbers.
///
/// `p` is assumed to be prime and is never verified. The nonresidue searches
/// performed during construction terminate only for prime `p`; a composite
/// modulus may loop indefinitely.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimeField {
    pub(crate) p: BigUint,
    pub(crate) half: BigUint,
    pub(crate) negone: BigUint,
    pub(crate) mask: BigUint,
    pub(crate) bit_length: u64,
    pub(crate) n64: usize,
    pub(crate) n32: usize,
    pub(crate) n8: usize,
    pub(crate) r: BigUint,
    pub(crate) ri: BigUint,
    pub(crate) nqr: BigUint,
    pub(crate) s: u32,
    pub(crate) t: BigUint,
    pub(crate) nqr_to_t: BigUint,
    pub(crate) w: Vec<BigUint>,
    pub(crate) wi: Vec<BigUint>,
    pub(crate) sqrt: SqrtAlgorithm,
}

impl PrimeField {
    /// Builds the field `Z/pZ`, deriving every constant it needs.
    ///
    /// The generator is only consumed while parametrizing the square-root
    /// algorithm, so construction is deterministic under a seeded generator.
    ///
    /// # Panics
    /// Panics if the residue class of `p` admits no square-root algorithm.
    #[instrument(skip_all, fields(p = %p))]
    pub fn new(p: BigUint, rng: &mut impl RngCore) -> Self {
        let bit_length = p.bits();
        let n64 = ((bit_length - 1) / 64 + 1) as usize;
        let n32 = n64 * 2;
        let n8 = n64 * 8;
        let mask = (BigUint::one() << bit_length) - 1u32;
        let half = &p >> 1;
        let negone = &p - 1u32;

        // Montgomery constant for serialization only; internal arithmetic
        // stays on plain residues.
        let r = (BigUint::one() << (64 * n64 as u64)) % &p;
        let ri = mod_inverse(&r, &p).expect("p must be an odd prime");

        // Euler's criterion against -1: first nonresidue counting up from 2.
        let e = &negone >> 1;
        let mut nqr = BigUint::from(2u32);
        while nqr.modpow(&e, &p) != negone {
            nqr += 1u32;
        }

        // p - 1 = t * 2^s with t odd.
        let mut s = 0u32;
        let mut t = negone.clone();
        while t.is_even() {
            s += 1;
            t >>= 1;
        }
        let nqr_to_t = nqr.modpow(&t, &p);
        debug!(nqr = %nqr, two_adicity = s, "derived multiplicative structure");

        let sqrt = sqrt::select(&p, &negone, bit_length, rng);

        // Root-of-unity ladder: w[i] is a primitive 2^i-th root of unity.
        // The base of the ladder comes from a nonresidue search independent
        // of `nqr`, counting up from 1.
        let mut nqr2 = BigUint::one();
        while nqr2.modpow(&half, &p) == BigUint::one() {
            nqr2 += 1u32;
        }
        let (ladder_s, ladder_rem) = match &sqrt {
            SqrtAlgorithm::TonelliShanks { s, t, .. } => (*s, t.clone()),
            _ => (s, t.clone()),
        };
        let top = ladder_s as usize;
        let mut w = vec![BigUint::ZERO; top + 1];
        let mut wi = vec![BigUint::ZERO; top + 1];
        w[top] = nqr2.modpow(&ladder_rem, &p);
        wi[top] = mod_inverse(&w[top], &p).expect("p must be an odd prime");
        for i in (0..top).rev() {
            w[i] = (&w[i + 1] * &w[i + 1]) % &p;
            wi[i] = (&wi[i + 1] * &wi[i + 1]) % &p;
        }

        Self {
            p,
            half,
            negone,
            mask,
            bit_length,
            n64,
            n32,
            n8,
            r,
            ri,
            nqr,
            s,
            t,
            nqr_to_t,
            w,
            wi,
            sqrt,
        }
    }

    /// The modulus.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Number of significant bits of `p`.
    pub fn bit_length(&self) -> u64 {
        self.bit_length
    }

    /// Number of 64-bit words needed to hold a residue.
    pub fn n64(&self) -> usize {
        self.n64
    }

    /// Number of 32-bit words needed to hold a residue.
    pub fn n32(&self) -> usize {
        self.n32
    }

    /// Width in bytes of the serialized representation.
    pub fn n8(&self) -> usize {
        self.n8
    }

    /// `(1 << bit_length) - 1`, the bound for bitwise operations.
    pub fn mask(&self) -> &BigUint {
        &self.mask
    }

    /// `p >> 1`; residues above this bound compare as negative.
    pub fn half(&self) -> &BigUint {
        &self.half
    }

    /// The Montgomery factor `2^(64 * n64) mod p`.
    pub fn montgomery_r(&self) -> &BigUint {
        &self.r
    }

    /// The inverse Montgomery factor.
    pub fn montgomery_ri(&self) -> &BigUint {
        &self.ri
    }

    /// The smallest quadratic nonresidue `>= 2`.
    pub fn nqr(&self) -> &BigUint {
        &self.nqr
    }

    /// `s` in `p - 1 = t * 2^s` with `t` odd.
    pub fn two_adicity(&self) -> u32 {
        self.s
    }

    /// The odd cofactor `t` of `p - 1`.
    pub fn odd_cofactor(&self) -> &BigUint {
        &self.t
    }

    /// `nqr^t`, the generator of the order-`2^s` subgroup.
    pub fn nqr_to_t(&self) -> &BigUint {
        &self.nqr_to_t
    }

    /// The selected square-root algorithm and its constants.
    pub fn sqrt_algorithm(&self) -> &SqrtAlgorithm {
        &self.sqrt
    }

    /// Largest `i` for which [`Self::root_of_unity`] is defined.
    pub fn max_root_order(&self) -> usize {
        self.w.len() - 1
    }

    /// A primitive `2^bits`-th root of unity.
    ///
    /// # Panics
    /// Panics if `bits` exceeds the two-adicity of `p - 1`.
    pub fn root_of_unity(&self, bits: usize) -> &BigUint {
        assert!(
            bits < self.w.len(),
            "no primitive 2^{bits}-th root of unity: two-adicity is {}",
            self.w.len() - 1
        );
        &self.w[bits]
    }

    /// The inverse of [`Self::root_of_unity`] at the same order.
    pub fn inv_root_of_unity(&self, bits: usize) -> &BigUint {
        assert!(
            bits < self.wi.len(),
            "no primitive 2^{bits}-th root of unity: two-adicity is {}",
            self.wi.len() - 1
        );
        &self.wi[bits]
    }

    /// Embeds a machine integer.
    pub fn from_u64(&self, n: u64) -> BigUint {
        BigUint::from(n) % &self.p
    }

    /// Maps an arbitrary signed integer to its canonical residue.
    pub fn normalize(&self, a: &BigInt) -> BigUint {
        let p = BigInt::from(self.p.clone());
        a.mod_floor(&p).magnitude().clone()
    }

    /// Parses a string in the given radix (sign allowed) into a residue.
    pub fn from_str_radix(&self, s: &str, radix: u32) -> Option<BigUint> {
        let v = BigInt::parse_bytes(s.as_bytes(), radix)?;
        Some(self.normalize(&v))
    }

    /// Renders a residue; in base 10 the centered-negative half prints with
    /// a leading minus sign.
    pub fn to_string_radix(&self, a: &BigUint, radix: u32) -> String {
        if radix == 10 && a > &self.half {
            let v = &self.p - a;
            alloc::format!("-{}", v.to_str_radix(10))
        } else {
            a.to_str_radix(radix)
        }
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce_once(a + b)
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b { a - b } else { &self.p - b + a }
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::ZERO
        } else {
            &self.p - a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a * b % &self.p
    }

    /// Multiplies by a scalar that is not necessarily a canonical residue.
    pub fn mul_scalar(&self, base: &BigUint, s: &BigUint) -> BigUint {
        base * (s % &self.p) % &self.p
    }

    pub fn square(&self, a: &BigUint) -> BigUint {
        a * a % &self.p
    }

    /// Square-and-multiply exponentiation.
    pub fn pow(&self, b: &BigUint, e: &BigUint) -> BigUint {
        b.modpow(e, &self.p)
    }

    pub fn pow_u64(&self, b: &BigUint, e: u64) -> BigUint {
        b.modpow(&BigUint::from(e), &self.p)
    }

    /// The multiplicative inverse, or `None` for zero.
    pub fn try_inv(&self, a: &BigUint) -> Option<BigUint> {
        mod_inverse(a, &self.p)
    }

    /// The multiplicative inverse.
    ///
    /// # Panics
    /// Panics on zero.
    pub fn inv(&self, a: &BigUint) -> BigUint {
        self.try_inv(a).expect("division by zero")
    }

    pub fn div(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.mul(a, &self.inv(b))
    }

    /// Integer (non-modular) division of the representatives.
    ///
    /// # Panics
    /// Panics on a zero divisor.
    pub fn idiv(&self, a: &BigUint, b: &BigUint) -> BigUint {
        assert!(!b.is_zero(), "division by zero");
        a / b
    }

    /// Integer (non-modular) remainder of the representatives.
    ///
    /// # Panics
    /// Panics on a zero divisor.
    pub fn imod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        assert!(!b.is_zero(), "division by zero");
        a % b
    }

    pub fn eq(&self, a: &BigUint, b: &BigUint) -> bool {
        a == b
    }

    pub fn neq(&self, a: &BigUint, b: &BigUint) -> bool {
        a != b
    }

    pub fn is_zero(&self, a: &BigUint) -> bool {
        a.is_zero()
    }

    pub fn lt(&self, a: &BigUint, b: &BigUint) -> bool {
        self.centered_cmp(a, b) == Ordering::Less
    }

    pub fn gt(&self, a: &BigUint, b: &BigUint) -> bool {
        self.centered_cmp(a, b) == Ordering::Greater
    }

    pub fn leq(&self, a: &BigUint, b: &BigUint) -> bool {
        self.centered_cmp(a, b) != Ordering::Greater
    }

    pub fn geq(&self, a: &BigUint, b: &BigUint) -> bool {
        self.centered_cmp(a, b) != Ordering::Less
    }

    pub fn band(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce_once(a & b & &self.mask)
    }

    pub fn bor(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce_once((a | b) & &self.mask)
    }

    pub fn bxor(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce_once((a ^ b) & &self.mask)
    }

    pub fn bnot(&self, a: &BigUint) -> BigUint {
        self.reduce_once(a ^ &self.mask)
    }

    /// Left shift with finite-register semantics: a shift amount of
    /// `bit_length` or more degrades to a right shift by `p - b` when that
    /// fits, and to zero otherwise.
    pub fn shl(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if let Some(n) = self.shift_amount(b) {
            self.reduce_once((a << n) & &self.mask)
        } else if let Some(n) = self.shift_amount(&(&self.p - b)) {
            a >> n
        } else {
            BigUint::ZERO
        }
    }

    /// Right shift, mirroring [`Self::shl`].
    pub fn shr(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if let Some(n) = self.shift_amount(b) {
            a >> n
        } else if let Some(n) = self.shift_amount(&(&self.p - b)) {
            self.reduce_once((a << n) & &self.mask)
        } else {
            BigUint::ZERO
        }
    }

    pub fn land(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if !a.is_zero() && !b.is_zero() {
            BigUint::one()
        } else {
            BigUint::ZERO
        }
    }

    pub fn lor(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if !a.is_zero() || !b.is_zero() {
            BigUint::one()
        } else {
            BigUint::ZERO
        }
    }

    pub fn lnot(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::one()
        } else {
            BigUint::ZERO
        }
    }

    /// A uniformly distributed residue, from `ceil(2 * bit_length / 8)`
    /// random bytes accumulated big-endian and reduced mod `p`.
    pub fn random(&self, rng: &mut impl RngCore) -> BigUint {
        sample_wide(self.bit_length, rng) % &self.p
    }

    /// Samples a residue from a word source: `n64` words, masked to
    /// `bit_length`, rejection-sampled below `p`, then taken out of the
    /// Montgomery domain. The designated path for seeded sampling.
    pub fn from_rng(&self, rng: &mut impl RngCore) -> BigUint {
        let v = loop {
            let mut buf = Vec::with_capacity(self.n8);
            for _ in 0..self.n64 {
                buf.extend_from_slice(&rng.next_u64().to_le_bytes());
            }
            let v = BigUint::from_bytes_le(&buf) & &self.mask;
            if v < self.p {
                break v;
            }
        };
        v * &self.ri % &self.p
    }

    pub(crate) fn reduce_once(&self, v: BigUint) -> BigUint {
        if v >= self.p { v - &self.p } else { v }
    }

    fn centered_cmp(&self, a: &BigUint, b: &BigUint) -> Ordering {
        // Residues above p/2 order as negatives; within a half the raw
        // ordering is already correct.
        match (a > &self.half, b > &self.half) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.cmp(b),
        }
    }

    fn shift_amount(&self, b: &BigUint) -> Option<usize> {
        if *b < BigUint::from(self.bit_length) {
            b.to_usize()
        } else {
            None
        }
    }
}

/// Modular inverse by the extended Euclidean algorithm; a negative Bezout
/// coefficient is corrected by adding `p`.
pub(crate) fn mod_inverse(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }
    let p_int = BigInt::from(p.clone());
    let ExtendedGcd { x, .. } = BigInt::from(a.clone()).extended_gcd(&p_int);
    Some(x.mod_floor(&p_int).magnitude().clone())
}

/// Accumulates `ceil(2 * bit_length / 8)` random bytes big-endian, without
/// reduction.
pub(crate) fn sample_wide(bit_length: u64, rng: &mut impl RngCore) -> BigUint {
    let n_bytes = ((bit_length * 2).div_ceil(8)) as usize;
    let mut buf = vec![0u8; n_bytes];
    rng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf)
}
