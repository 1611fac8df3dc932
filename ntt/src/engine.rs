use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::min;

use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;
use zq_field::PrimeField;
use zq_util::log2_strict_usize;

use crate::ScalableGroup;

/// A radix-2 Cooley-Tukey transform bound to a field's root-of-unity
/// ladder.
///
/// Twiddle tables are memoized per transform order, pre-built up to order
/// `min(s, 15)` and extended on demand; the cache only ever grows.
///
/// The use of `RefCell` means an engine can't be shared across threads;
/// wrap it in a lock to do so.
pub struct NttEngine<'a, G: ScalableGroup> {
    field: &'a PrimeField,
    group: &'a G,
    /// `roots[i]` holds the `2^i` powers of `w[i]`, in order.
    roots: RefCell<Vec<Vec<BigUint>>>,
}

impl<'a> NttEngine<'a, PrimeField> {
    /// An engine transforming vectors of the field's own elements.
    pub fn over_field(field: &'a PrimeField) -> Self {
        Self::new(field, field)
    }
}

impl<'a, G: ScalableGroup> NttEngine<'a, G> {
    pub fn new(field: &'a PrimeField, group: &'a G) -> Self {
        let engine = Self {
            field,
            group,
            roots: RefCell::new(Vec::new()),
        };
        engine.extend_roots(min(field.two_adicity() as usize, 15));
        engine
    }

    /// Number of orders currently cached: tables exist for `2^i` with
    /// `i < cached_orders()`.
    pub fn cached_orders(&self) -> usize {
        self.roots.borrow().len()
    }

    /// Evaluates `coeffs` at the `2^bits`-th roots of unity, where
    /// `2^bits` is the input length. Lengths 0 and 1 are returned
    /// unchanged.
    ///
    /// # Panics
    /// Panics if the length is not a power of two (inputs are never
    /// padded), or if it exceeds the field's two-adic subgroup.
    pub fn fft(&self, coeffs: &[G::Elem]) -> Vec<G::Elem> {
        if coeffs.len() <= 1 {
            return coeffs.to_vec();
        }
        let bits = log2_strict_usize(coeffs.len());
        self.extend_roots(bits);
        let roots = self.roots.borrow();
        self.recurse(coeffs, &roots, bits, 0, 1)
    }

    /// Interpolates evaluations back into coefficients.
    ///
    /// # Panics
    /// As [`Self::fft`].
    pub fn ifft(&self, evals: &[G::Elem]) -> Vec<G::Elem> {
        if evals.len() <= 1 {
            return evals.to_vec();
        }
        let bits = log2_strict_usize(evals.len());
        self.extend_roots(bits);
        let fwd = {
            let roots = self.roots.borrow();
            self.recurse(evals, &roots, bits, 0, 1)
        };

        // The forward pass evaluates the inverse points up to an index
        // reversal (w^-1 = w^(n-1)), so one reversed pass scaled by 1/n
        // inverts the transform.
        let n = evals.len();
        let n_inv = self.field.inv(&self.field.from_u64(n as u64));
        (0..n)
            .map(|i| self.group.scale(&fwd[(n - i) % n], &n_inv))
            .collect()
    }

    fn extend_roots(&self, bits: usize) {
        let mut roots = self.roots.borrow_mut();
        if roots.len() > bits {
            return;
        }
        debug!(order = bits, "extending twiddle cache");
        for i in roots.len()..=bits {
            let w_i = self.field.root_of_unity(i);
            let mut r = BigUint::one();
            let mut table = Vec::with_capacity(1 << i);
            for _ in 0..1usize << i {
                table.push(r.clone());
                r = self.field.mul(&r, w_i);
            }
            roots.push(table);
        }
    }

    fn recurse(
        &self,
        vals: &[G::Elem],
        roots: &[Vec<BigUint>],
        bits: usize,
        offset: usize,
        step: usize,
    ) -> Vec<G::Elem> {
        let n = 1usize << bits;
        if n == 1 {
            return vec![vals[offset].clone()];
        }
        if n == 2 {
            return vec![
                self.group.add(&vals[offset], &vals[offset + step]),
                self.group.sub(&vals[offset], &vals[offset + step]),
            ];
        }

        // Even/odd split by step doubling; the input is never copied.
        let half = n >> 1;
        let even = self.recurse(vals, roots, bits - 1, offset, step * 2);
        let odd = self.recurse(vals, roots, bits - 1, offset + step, step * 2);

        let twisted: Vec<G::Elem> = odd
            .iter()
            .zip_eq(&roots[bits][..half])
            .map(|(o, r)| self.group.scale(o, r))
            .collect();
        let mut out = Vec::with_capacity(n);
        for (e, t) in even.iter().zip_eq(&twisted) {
            out.push(self.group.add(e, t));
        }
        for (e, t) in even.iter().zip_eq(&twisted) {
            out.push(self.group.sub(e, t));
        }
        out
    }
}
