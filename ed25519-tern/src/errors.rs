// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! Errors which may occur when parsing keys and/or signatures to or from wire formats.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum InternalError {
    PointDecompression,
    ScalarFormat,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type
    /// which is returning the error, and the `length` in bytes which
    /// its constructor expects.
    BytesLength {
        name: &'static str,
        length: usize,
    },
    /// The verification equation wasn't satisfied.
    Verify,
    /// The context supplied for an Ed25519ctx or Ed25519ph operation
    /// was longer than 255 bytes.
    ContextLength {
        length: usize,
    },
    /// The public key embedded in a keypair encoding did not match the
    /// public key derived from the seed half.
    MismatchedKeypair,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            InternalError::ScalarFormat => write!(f, "Cannot use scalar with high-bit set"),
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::Verify => write!(f, "Verification equation was not satisfied"),
            InternalError::ContextLength { length: l } => write!(
                f,
                "An ed25519 signing context must be at most 255 bytes, got {}",
                l
            ),
            InternalError::MismatchedKeypair => write!(
                f,
                "Keypair bytes contain a public key which does not match its secret key"
            ),
        }
    }
}

impl std::error::Error for InternalError {}

/// Errors which may occur while processing signatures and keypairs.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing `r`, a curve point, in the `Signature`, or the
///   curve point for a `VerifyingKey`.
///
/// * A problem with the format of `s`, a scalar, in the `Signature`.  This
///   is only raised if the high-bit of the scalar was set.  (Scalars must
///   only be constructed from 255-bit integers.)
///
/// * Failure of a signature to satisfy the verification equation.
pub type SignatureError = ed25519::signature::Error;

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError::from_source(err)
    }
}
