// -*- mode: rust; -*-
//
// This file is part of curve25519-tern.
// See LICENSE for licensing information.

//! The `u64` backend: arithmetic with 64-bit limbs and 128-bit products.

pub mod constants;
pub mod field;
pub mod scalar;
