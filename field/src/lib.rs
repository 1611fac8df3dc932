//! A prime field `Z/pZ` whose modulus is chosen at runtime.
//!
//! Unlike a field with a compile-time modulus, [`PrimeField`] derives all of
//! its constants (Montgomery factors, quadratic nonresidues, the two-adic
//! root-of-unity ladder, the square-root algorithm) when it is constructed,
//! and elements are plain [`num_bigint::BigUint`] residues in `[0, p)`.

#![no_std]

extern crate alloc;

mod field;
mod repr;
mod sqrt;

pub use field::*;
pub use sqrt::*;
