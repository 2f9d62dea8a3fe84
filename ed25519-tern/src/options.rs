// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! Verification policy options and `dom2` domain separation.
//!
//! There are two ways of verifying Ed25519 signatures in the wild, due
//! to the original paper/implementation, RFC 8032, and FIPS 186-5
//! all phrasing the acceptance criteria slightly differently.  On top
//! of the choice of verification equation, implementations disagree on
//! whether to accept signatures involving small-order or non-canonical
//! points.  [`VerifyOptions`] captures these choices so that a caller
//! can get bit-for-bit compatibility with a chosen ecosystem.

use sha2::{Digest, Sha512};

use crate::CONTEXT_MAX_LENGTH;

/// The dom2 prefix, per RFC 8032 §2.
const DOM2_PREFIX: &[u8] = b"SigEd25519 no Ed25519 collisions";

/// Which Ed25519 variant a hash computation belongs to, encoded in the
/// dom2 prefix written before every hash input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dom2Flag {
    /// Plain Ed25519: no prefix at all.
    Pure,
    /// Ed25519ctx: prefix with flag byte `0x00`.
    Ctx,
    /// Ed25519ph: prefix with flag byte `0x01`.
    Ph,
}

/// Construct a `Sha512` primed with the dom2 prefix for the given
/// variant and context.
///
/// The caller is responsible for having checked the context length.
pub(crate) fn new_dom2_digest(f: Dom2Flag, context: &[u8]) -> Sha512 {
    debug_assert!(context.len() <= CONTEXT_MAX_LENGTH);

    let mut h = Sha512::new();
    let flag_byte = match f {
        Dom2Flag::Pure => return h,
        Dom2Flag::Ctx => 0x00,
        Dom2Flag::Ph => 0x01,
    };

    h.update(DOM2_PREFIX);
    h.update([flag_byte, context.len() as u8]);
    h.update(context);
    h
}

/// Options for specifying verification behavior for compatibility with
/// other Ed25519 implementations.
///
/// The default (all flags `false`) is the strictest available policy:
/// small-order and non-canonical points are rejected for both the
/// public key `A` and the signature component `R`, and the cofactored
/// verification equation is used.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VerifyOptions {
    /// Allow signatures whose public key `A` has small order.
    ///
    /// Note: allowing small order `A` disables the check that makes
    /// the scheme strongly binding.
    pub allow_small_order_a: bool,

    /// Allow signatures whose `R` component has small order.
    pub allow_small_order_r: bool,

    /// Allow signatures with a non-canonical encoding of `A` and/or `R`.
    ///
    /// When this is `false`, the decoded points are re-encoded and the
    /// result is required to match the presented bytes exactly.
    pub allow_non_canonical_ar: bool,

    /// Use the cofactorless verification equation
    /// \\( R = SB - H(R \Vert A \Vert M) A \\), comparing encodings
    /// directly, instead of the cofactored equation
    /// \\( \[8\]R = \[8\](SB - H(R \Vert A \Vert M) A) \\).
    ///
    /// Note: cofactorless verification is incompatible with batch
    /// verification.
    pub cofactorless_verify: bool,
}

impl VerifyOptions {
    /// The default, strictest verification policy: all allow-flags off,
    /// cofactored verification.
    pub const STRICT: VerifyOptions = VerifyOptions {
        allow_small_order_a: false,
        allow_small_order_r: false,
        allow_non_canonical_ar: false,
        cofactorless_verify: false,
    };

    /// Verification behavior compatible with the historical reference
    /// implementation and most language runtimes: every structural
    /// check is disabled and the cofactorless equation is used.
    ///
    /// Note: this preset is incompatible with batch verification.
    pub const LEGACY: VerifyOptions = VerifyOptions {
        allow_small_order_a: true,
        allow_small_order_r: true,
        allow_non_canonical_ar: true,
        cofactorless_verify: true,
    };

    /// Verification behavior compatible with FIPS 186-5: small-order
    /// points are allowed, non-canonical encodings are rejected, and
    /// the cofactored equation is used.
    pub const FIPS_186_5: VerifyOptions = VerifyOptions {
        allow_small_order_a: true,
        allow_small_order_r: true,
        allow_non_canonical_ar: false,
        cofactorless_verify: false,
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(VerifyOptions::default(), VerifyOptions::STRICT);
    }

    #[test]
    fn pure_dom2_is_empty() {
        // A pure dom2 digest must hash identically to a fresh Sha512.
        let h1 = new_dom2_digest(Dom2Flag::Pure, b"").finalize();
        let h2 = Sha512::new().finalize();
        assert_eq!(h1, h2);
    }

    #[test]
    fn ctx_and_ph_prefixes_differ() {
        let ctx = b"example";
        let h1 = new_dom2_digest(Dom2Flag::Ctx, ctx).finalize();
        let h2 = new_dom2_digest(Dom2Flag::Ph, ctx).finalize();
        assert_ne!(h1.as_slice(), h2.as_slice());
    }
}
