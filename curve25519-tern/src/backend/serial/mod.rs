// -*- mode: rust; -*-
//
// This file is part of curve25519-tern.
// See LICENSE for licensing information.

//! Serial implementations of field, scalar, point, and scalar-mul arithmetic.

pub mod curve_models;
pub mod scalar_mul;
pub mod u64;
