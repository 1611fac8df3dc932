//! A radix-2 number-theoretic transform over a runtime-modulus prime field.
//!
//! The engine evaluates and interpolates polynomials at the `2^k`-th roots
//! of unity of a [`zq_field::PrimeField`]. It is generic over the
//! transformed values: anything forming an additive group with a
//! field-scalar action (see [`ScalableGroup`]) can be transformed, field
//! elements being the common case.

#![no_std]

extern crate alloc;

mod engine;
mod group;

pub use engine::*;
pub use group::*;
