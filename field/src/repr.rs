//! Fixed-width byte representations.
//!
//! Residues serialize into exactly `n8 = 8 * n64` bytes, little- or
//! big-endian, either as the plain representative or in the Montgomery
//! domain (multiplied by `R` on the way in, by `R^-1` on the way out).
//! Readers interpret the full window and do not reduce mod `p`.

use num_bigint::BigUint;

use crate::field::PrimeField;

impl PrimeField {
    /// Writes the representative into `buf` in little-endian order.
    ///
    /// # Panics
    /// Panics unless `buf` is exactly `n8` bytes.
    pub fn to_rpr_le(&self, buf: &mut [u8], a: &BigUint) {
        assert_eq!(buf.len(), self.n8, "representation buffer must be {} bytes", self.n8);
        let bytes = a.to_bytes_le();
        buf[..bytes.len()].copy_from_slice(&bytes);
        buf[bytes.len()..].fill(0);
    }

    /// Writes the representative into `buf` in big-endian order.
    ///
    /// # Panics
    /// Panics unless `buf` is exactly `n8` bytes.
    pub fn to_rpr_be(&self, buf: &mut [u8], a: &BigUint) {
        assert_eq!(buf.len(), self.n8, "representation buffer must be {} bytes", self.n8);
        let bytes = a.to_bytes_be();
        let pad = self.n8 - bytes.len();
        buf[..pad].fill(0);
        buf[pad..].copy_from_slice(&bytes);
    }

    /// Little-endian write of the Montgomery form `a * R`.
    pub fn to_rpr_lem(&self, buf: &mut [u8], a: &BigUint) {
        self.to_rpr_le(buf, &self.mul(&self.r, a));
    }

    /// Big-endian write of the Montgomery form `a * R`.
    pub fn to_rpr_bem(&self, buf: &mut [u8], a: &BigUint) {
        self.to_rpr_be(buf, &self.mul(&self.r, a));
    }

    /// Reads a little-endian representative. The full window is taken
    /// verbatim, without reduction mod `p`.
    ///
    /// # Panics
    /// Panics unless `buf` is exactly `n8` bytes.
    pub fn from_rpr_le(&self, buf: &[u8]) -> BigUint {
        assert_eq!(buf.len(), self.n8, "representation buffer must be {} bytes", self.n8);
        BigUint::from_bytes_le(buf)
    }

    /// Reads a big-endian representative, without reduction mod `p`.
    ///
    /// # Panics
    /// Panics unless `buf` is exactly `n8` bytes.
    pub fn from_rpr_be(&self, buf: &[u8]) -> BigUint {
        assert_eq!(buf.len(), self.n8, "representation buffer must be {} bytes", self.n8);
        BigUint::from_bytes_be(buf)
    }

    /// Little-endian read out of the Montgomery domain.
    pub fn from_rpr_lem(&self, buf: &[u8]) -> BigUint {
        self.mul(&self.from_rpr_le(buf), &self.ri)
    }

    /// Big-endian read out of the Montgomery domain.
    pub fn from_rpr_bem(&self, buf: &[u8]) -> BigUint {
        self.mul(&self.from_rpr_be(buf), &self.ri)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    // The BN254 scalar field prime, a 254-bit modulus needing n8 = 32.
    const P254: &str = "21888242871839275222246405745257275088548364400416034343698204186575808495617";

    fn f17() -> PrimeField {
        PrimeField::new(BigUint::from(17u32), &mut SmallRng::seed_from_u64(1))
    }

    fn f254() -> PrimeField {
        let p = BigUint::parse_bytes(P254.as_bytes(), 10).unwrap();
        PrimeField::new(p, &mut SmallRng::seed_from_u64(1))
    }

    #[test]
    fn small_field_layout() {
        let f = f17();
        let mut buf = vec![0u8; f.n8()];
        f.to_rpr_le(&mut buf, &BigUint::from(5u32));
        assert_eq!(buf, [5, 0, 0, 0, 0, 0, 0, 0]);
        f.to_rpr_be(&mut buf, &BigUint::from(5u32));
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn roundtrips_mod_17() {
        let f = f17();
        let mut buf = vec![0u8; f.n8()];
        for a in 0u32..17 {
            let a = BigUint::from(a);
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

    #[test]
    fn wide_field_roundtrip_near_p() {
        let f = f254();
        assert_eq!(f.n8(), 32);
        let a = f.p() - 1u32;
        let mut buf = vec![0u8; 32];
        f.to_rpr_le(&mut buf, &a);
        assert_eq!(f.from_rpr_le(&buf), a);
        f.to_rpr_be(&mut buf, &a);
        assert_eq!(f.from_rpr_be(&buf), a);
        f.to_rpr_lem(&mut buf, &a);
        assert_eq!(f.from_rpr_lem(&buf), a);
        f.to_rpr_bem(&mut buf, &a);
        assert_eq!(f.from_rpr_bem(&buf), a);
    }

    #[test]
    fn montgomery_domain_differs_on_the_wire() {
        let f = f254();
        let a = BigUint::from(2u32);
        let mut plain = vec![0u8; 32];
        let mut monty = vec![0u8; 32];
        f.to_rpr_le(&mut plain, &a);
        f.to_rpr_lem(&mut monty, &a);
        assert_ne!(plain, monty);
        assert_eq!(f.from_rpr_le(&plain), f.from_rpr_lem(&monty));
    }

    #[test]
    fn endianness_reverses_bytes() {
        let f = f254();
        let a = f.from_rng(&mut SmallRng::seed_from_u64(3));
        let mut le = vec![0u8; 32];
        let mut be = vec![0u8; 32];
        f.to_rpr_le(&mut le, &a);
        f.to_rpr_be(&mut be, &a);
        le.reverse();
        assert_eq!(le, be);
    }

    #[test]
    fn read_window_is_not_reduced() {
        let f = f17();
        let buf = [0xffu8; 8];
        // Larger than p: returned verbatim.
        assert_eq!(f.from_rpr_le(&buf), BigUint::from(u64::MAX));
    }

    #[test]
    #[should_panic(expected = "representation buffer")]
    fn wrong_buffer_size_panics() {
        let f = f17();
        let mut buf = vec![0u8; 4];
        f.to_rpr_le(&mut buf, &BigUint::from(5u32));
    }
}
