// -*- mode: rust; -*-
//
// This file is part of curve25519-tern.
// See LICENSE for licensing information.

//! # curve25519-tern
//!
//! **A pure-Rust implementation of group operations on the twisted
//! Edwards curve edwards25519.**
//!
//! This crate provides the arithmetic core used by the `ed25519-tern`
//! signature crate: field arithmetic modulo \\(p = 2\^{255} - 19\\),
//! scalar arithmetic modulo the prime group order \\( \ell \\), point
//! operations on the curve in several internal models, and both
//! constant-time and variable-time scalar multiplication.
//!
//! ## Organisation
//!
//! * The [`field`] module holds arithmetic in \\( \mathrm{GF}(p) \\),
//!   with elements represented as five 64-bit limbs in radix
//!   \\(2\^{51}\\).
//! * The [`scalar`] module holds arithmetic modulo \\( \ell \\),
//!   together with the signed-digit recodings used by the scalar
//!   multiplication routines.
//! * The [`edwards`] module holds curve points, point compression and
//!   decompression, and scalar multiplication.
//! * The [`constants`] module holds curve constants: the basepoint,
//!   the 8-torsion subgroup, and the precomputed basepoint tables.
//!
//! ## Safety
//!
//! All operations on secret data are implemented without
//! secret-dependent branches or memory accesses: table lookups scan
//! every row with a conditional move, and conditional logic on secrets
//! goes through the [`subtle`] traits.  Operations documented as
//! `vartime` are variable-time and must only be used on public data.

#![deny(missing_docs)]
#![allow(clippy::needless_lifetimes)]

//============================================================================
// Internal macros
//============================================================================

#[macro_use]
mod macros;

//============================================================================
// Modules
//============================================================================

pub mod traits;

pub(crate) mod backend;
pub(crate) mod field;
pub(crate) mod window;

pub mod constants;
pub mod edwards;
pub mod scalar;

pub use crate::edwards::EdwardsPoint;
pub use crate::scalar::Scalar;

// External crates whose types appear in our public API, re-exported so
// downstream users can name them without an explicit version match.
pub use digest;
