// -*- mode: rust; -*-
//
// This file is part of curve25519-tern.
// See LICENSE for licensing information.

//! Pluggable implementations for different architectures.
//!
//! The naming follows the convention of the upstream `curve25519`
//! implementations this crate is modelled on: a `serial` backend
//! containing the arithmetic proper, specialised by limb size.  Only
//! the `u64` backend is provided, since the field representation is
//! fixed to five 64-bit limbs in radix \\(2^{51}\\).

pub mod serial;
