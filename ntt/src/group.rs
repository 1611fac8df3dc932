use num_bigint::BigUint;
use zq_field::PrimeField;

/// An additive group whose elements can be scaled by prime-field scalars.
///
/// This is the seam that lets the transform run over values other than
/// field elements (say, homomorphic commitments scaled by coefficients):
/// the engine only ever combines elements with `add`/`sub` and multiplies
/// them by field scalars with `scale`.
pub trait ScalableGroup {
    type Elem: Clone;

    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Scales a group element by a field scalar.
    fn scale(&self, a: &Self::Elem, s: &BigUint) -> Self::Elem;
}

/// The field acting on itself: `scale` is field multiplication.
impl ScalableGroup for PrimeField {
    type Elem = BigUint;

    fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        PrimeField::add(self, a, b)
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        PrimeField::sub(self, a, b)
    }

    fn scale(&self, a: &BigUint, s: &BigUint) -> BigUint {
        self.mul(a, s)
    }
}
