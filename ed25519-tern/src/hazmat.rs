// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! Low-level interfaces to ed25519 functions
//!
//! # ⚠️ Warning: Hazmat
//!
//! These primitives are easy-to-misuse low-level interfaces.
//!
//! If you are an end user / non-expert in cryptography, **do not use any of these functions**.
//! Failure to use them correctly can lead to catastrophic failures including **full private key
//! recovery.**

use curve25519_tern::scalar::{clamp_integer, Scalar};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::options::{new_dom2_digest, Dom2Flag};
use crate::signature::InternalSignature;
use crate::{Signature, VerifyingKey};

use sha2::Digest;

/// Contains the secret scalar and domain separator used for generating signatures.
///
/// This is used internally for signing.
///
/// In the usual Ed25519 signing algorithm, `scalar` and `hash_prefix` are defined such that
/// `scalar || hash_prefix = H(sk)` where `sk` is the signing key and `H` is SHA-512.
/// **WARNING:** Deriving the values for these fields in any other way can lead to full key
/// recovery, as documented in [`raw_sign`].
///
/// Instances of this secret are automatically overwritten with zeroes when they fall out of scope.
pub struct ExpandedSecretKey {
    /// The secret scalar used for signing
    pub scalar: Scalar,
    /// The domain separator used when hashing the message to generate the pseudorandom `r` value
    pub hash_prefix: [u8; 32],
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize()
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize()
    }
}

impl ZeroizeOnDrop for ExpandedSecretKey {}

impl ExpandedSecretKey {
    /// Construct an `ExpandedSecretKey` from an array of 64 bytes.  In the usual Ed25519 key
    /// derivation, the bytes are the output of a SHA-512 hash of a 32-byte seed.  The first 32
    /// bytes are the scalar half of the expanded secret key, the second 32 bytes are the "hash
    /// prefix" used as a domain separator when deriving nonces.
    ///
    /// The first 32 bytes are clamped before use as a scalar, and the
    /// resulting scalar is deliberately **not** reduced mod \\( \ell \\),
    /// matching the RFC 8032 key-derivation procedure bit-for-bit.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut scalar_bytes: [u8; 32] = [0u8; 32];
        let mut hash_prefix: [u8; 32] = [0u8; 32];

        scalar_bytes.copy_from_slice(&bytes[00..32]);
        hash_prefix.copy_from_slice(&bytes[32..64]);

        let scalar = Scalar::from_bits(clamp_integer(scalar_bytes));

        ExpandedSecretKey {
            scalar,
            hash_prefix,
        }
    }
}

impl From<&[u8; 64]> for ExpandedSecretKey {
    fn from(bytes: &[u8; 64]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Compute a signature over the given message, with the dom2 prefix
/// selected by `f` and `context`.
///
/// For the Ed25519ph variant, `message` is the 64-byte SHA-512 digest
/// of the real message.
pub(crate) fn raw_sign_with_flag(
    esk: &ExpandedSecretKey,
    f: Dom2Flag,
    context: &[u8],
    message: &[u8],
    verifying_key: &VerifyingKey,
) -> Signature {
    let mut h = new_dom2_digest(f, context);
    h.update(esk.hash_prefix);
    h.update(message);

    let r = Scalar::from_hash(h);
    let R = curve25519_tern::EdwardsPoint::mul_base(&r).compress();

    let mut h = new_dom2_digest(f, context);
    h.update(R.as_bytes());
    h.update(verifying_key.as_bytes());
    h.update(message);

    let k = Scalar::from_hash(h);
    let s: Scalar = (k * esk.scalar) + r;

    InternalSignature { R, s }.into()
}

/// Compute an ordinary Ed25519 signature over the given message.
///
/// # ⚠️  Unsafe
///
/// Do NOT use this function unless you absolutely must. Misuse of this
/// function can expose your private key: if the `scalar` and
/// `hash_prefix` of the expanded key are not derived from a single
/// uniform seed, nonce reuse across messages becomes possible, and with
/// it full key recovery.
///
/// # Inputs
///
/// * `esk` contains the secret scalar and the domain separator which,
///   along with the message itself, deterministically generates the
///   `R` part of the signature.
/// * `verifying_key` is the [`VerifyingKey`] corresponding to `esk`.
///   Providing the wrong public key here leaks enough information to
///   forge signatures, so callers must derive it from the same secret.
pub fn raw_sign(esk: &ExpandedSecretKey, message: &[u8], verifying_key: &VerifyingKey) -> Signature {
    raw_sign_with_flag(esk, Dom2Flag::Pure, b"", message, verifying_key)
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::{rngs::OsRng, RngCore};
    use sha2::Sha512;

    // Test that raw_sign agrees with the usual signing path.
    #[test]
    fn raw_sign_matches_sign() {
        use ed25519::signature::Signer;

        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);

        let signing_key = crate::SigningKey::from_bytes(&seed);
        let verifying_key = signing_key.verifying_key();

        let mut hash = [0u8; 64];
        hash.copy_from_slice(Sha512::digest(seed).as_slice());
        let esk = ExpandedSecretKey::from_bytes(&hash);
        let msg = b"the yellow bittern stands motionless";

        let sig1 = signing_key.sign(msg);
        let sig2 = raw_sign(&esk, msg, &verifying_key);

        assert_eq!(sig1, sig2);
    }
}
