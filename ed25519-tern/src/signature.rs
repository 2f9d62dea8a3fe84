// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! An ed25519 signature.

use curve25519_tern::edwards::CompressedEdwardsY;
use curve25519_tern::scalar::Scalar;

use crate::errors::InternalError;
use crate::errors::SignatureError;

/// An ed25519 signature.
///
/// # Note
///
/// These signatures, unlike the ed25519 signature reference
/// implementation, are "detached"—that is, they do **not** include a
/// copy of the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub(crate) struct InternalSignature {
    /// `R` is an `EdwardsPoint`, formed by using an hash function with
    /// 512-bits output to produce the digest of:
    ///
    /// - the nonce half of the `ExpandedSecretKey`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into an
    /// element in ℤ/lℤ.  The scalar is then multiplied by the distinguished
    /// basepoint to produce `R`, an `EdwardsPoint`.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is a `Scalar`, formed by using an hash function with 512-bits output
    /// to produce the digest of:
    ///
    /// - the `r` portion of this `Signature`,
    /// - the `VerifyingKey` which should be used to verify this `Signature`, and
    /// - the message to be signed.
    ///
    /// This digest is then interpreted as a `Scalar` and reduced into an
    /// element in ℤ/lℤ.
    pub(crate) s: Scalar,
}

/// Ensure that the scalar bytes of a signature are the canonical
/// encoding of an integer strictly below the group order, as required
/// by RFC 8032 §5.1.7 to prevent signature malleability.
fn check_scalar(bytes: [u8; 32]) -> Result<Scalar, SignatureError> {
    match Option::from(Scalar::from_canonical_bytes(bytes)) {
        None => Err(InternalError::ScalarFormat.into()),
        Some(x) => Ok(x),
    }
}

impl InternalSignature {
    /// Construct an `InternalSignature` from a slice of bytes.
    #[allow(non_snake_case)]
    pub(crate) fn from_bytes(bytes: &[u8; 64]) -> Result<InternalSignature, SignatureError> {
        // The high three bits of S must always be unset for a scalar
        // below the group order; reject before the full range check.
        if bytes[63] & 0b1110_0000 != 0 {
            return Err(InternalError::ScalarFormat.into());
        }

        let mut R_bytes: [u8; 32] = [0u8; 32];
        let mut s_bytes: [u8; 32] = [0u8; 32];
        R_bytes.copy_from_slice(&bytes[00..32]);
        s_bytes.copy_from_slice(&bytes[32..64]);

        Ok(InternalSignature {
            R: CompressedEdwardsY(R_bytes),
            s: check_scalar(s_bytes)?,
        })
    }
}

impl TryFrom<&ed25519::Signature> for InternalSignature {
    type Error = SignatureError;

    fn try_from(sig: &ed25519::Signature) -> Result<InternalSignature, SignatureError> {
        InternalSignature::from_bytes(&sig.to_bytes())
    }
}

impl From<InternalSignature> for ed25519::Signature {
    fn from(sig: InternalSignature) -> ed25519::Signature {
        ed25519::Signature::from_components(*sig.R.as_bytes(), *sig.s.as_bytes())
    }
}
