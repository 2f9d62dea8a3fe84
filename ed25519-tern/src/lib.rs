// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! # ed25519-tern
//!
//! Ed25519 signing and verification in Rust, with the Ed25519ctx and
//! Ed25519ph variants from [RFC 8032] and a configurable verification
//! policy for compatibility with other implementations.
//!
//! Signing and key derivation run in constant time with respect to
//! secret material.  Verification is variable-time over its (public)
//! inputs.
//!
//! ## Example
//!
//! ```
//! use ed25519_tern::{Signature, Signer, SigningKey, Verifier};
//! use rand::rngs::OsRng;
//!
//! let mut csprng = OsRng;
//! let signing_key: SigningKey = SigningKey::generate(&mut csprng);
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = signing_key.sign(message);
//! assert!(signing_key.verifying_key().verify(message, &signature).is_ok());
//! ```
//!
//! ## Verification policies
//!
//! Ed25519 implementations in the wild disagree on which signatures to
//! accept: small-order and non-canonical points may or may not be
//! rejected, and the verification equation comes in a cofactored and a
//! cofactorless flavour.  The [`VerifyOptions`] struct exposes these
//! choices, along with three presets:
//!
//! * [`VerifyOptions::STRICT`] (the default): every structural check
//!   enabled, cofactored equation.
//! * [`VerifyOptions::LEGACY`]: every check disabled, cofactorless
//!   equation, matching historical reference code.
//! * [`VerifyOptions::FIPS_186_5`]: small-order points allowed,
//!   non-canonical encodings rejected, cofactored equation.
//!
//! [RFC 8032]: https://tools.ietf.org/html/rfc8032

#![deny(missing_docs)]

pub use ed25519;
pub use ed25519::signature::{Signer, Verifier};
pub use ed25519::Signature;

mod errors;
mod options;
mod signature;
mod signing;
mod verifying;

pub mod hazmat;

pub use crate::errors::SignatureError;
pub use crate::options::VerifyOptions;
pub use crate::signing::{SecretKey, SigningKey};
pub use crate::verifying::VerifyingKey;

/// The length of an ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = Signature::BYTE_SIZE;

/// The length of an ed25519 `SecretKey` (seed), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an ed25519 `VerifyingKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of the combined seed-and-public-key "keypair" form, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// The maximum allowed context length, in bytes, for Ed25519ctx and
/// Ed25519ph.
pub const CONTEXT_MAX_LENGTH: usize = 255;
