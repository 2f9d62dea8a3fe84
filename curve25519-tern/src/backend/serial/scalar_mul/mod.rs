// -*- mode: rust; -*-
//
// This file is part of curve25519-tern.
// See LICENSE for licensing information.

//! Implementations of the serial scalar-multiplication strategies: a
//! constant-time variable-base path, and a variable-time double-base
//! path used by signature verification.

pub mod variable_base;

pub mod vartime_double_base;
