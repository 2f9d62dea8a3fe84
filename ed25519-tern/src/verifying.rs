// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! Verification of ed25519 signatures.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use curve25519_tern::digest::generic_array::typenum::U64;
use curve25519_tern::digest::Digest;
use curve25519_tern::edwards::CompressedEdwardsY;
use curve25519_tern::edwards::EdwardsPoint;
use curve25519_tern::scalar::Scalar;

use ed25519::signature::Verifier;

use subtle::ConstantTimeEq;

use crate::errors::{InternalError, SignatureError};
use crate::options::{new_dom2_digest, Dom2Flag, VerifyOptions};
use crate::signature::InternalSignature;
use crate::signing::SigningKey;
use crate::{Signature, CONTEXT_MAX_LENGTH, PUBLIC_KEY_LENGTH};

/// An ed25519 public key.
///
/// # Note
///
/// The `Eq` and `Hash` impls here use the compressed Edwards y
/// encoding, _not_ the algebraic representation. This means if this
/// `VerifyingKey` was derived from a non-canonical encoding, it will
/// hash and compare unequally to the one derived from the canonical
/// encoding of the same point.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Serialized compressed Edwards-y point.
    pub(crate) compressed: CompressedEdwardsY,

    /// Decompressed Edwards point used for curve arithmetic operations.
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?}), {:?})", self.compressed, self.point)
    }
}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key()
    }
}

impl From<VerifyingKey> for EdwardsPoint {
    fn from(vk: VerifyingKey) -> EdwardsPoint {
        vk.point
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<VerifyingKey, SignatureError> {
        VerifyingKey::from_slice(bytes)
    }
}

impl VerifyingKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Construct a `VerifyingKey` from a slice of bytes.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `VerifyingKey` or whose
    /// error value is a `SignatureError` describing the error that
    /// occurred, namely that the given bytes do not represent the
    /// compressed y-coordinate of a curve point.
    ///
    /// Note that non-canonical encodings of curve points decode
    /// successfully; rejecting them is a verification-time policy
    /// choice, controlled by [`VerifyOptions::allow_non_canonical_ar`].
    #[inline]
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, SignatureError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed
            .decompress()
            .ok_or(InternalError::PointDecompression)?;

        Ok(VerifyingKey { compressed, point })
    }

    /// Construct a `VerifyingKey` from a slice of bytes of unchecked
    /// length.
    fn from_slice(bytes: &[u8]) -> Result<VerifyingKey, SignatureError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| InternalError::BytesLength {
                name: "VerifyingKey",
                length: PUBLIC_KEY_LENGTH,
            })?;
        VerifyingKey::from_bytes(bytes)
    }

    /// Returns whether this is a _weak_ public key, i.e., if this public key has low order.
    ///
    /// A weak public key can be used to generate a signature which
    /// verifies over a large class of messages; rejecting such keys is
    /// what [`VerifyOptions::allow_small_order_a`] is about.  This
    /// method is an a-priori check for callers which validate keys on
    /// receipt rather than on use.
    pub fn is_weak(&self) -> bool {
        self.point.is_small_order()
    }

    /// The core of every verification path.
    ///
    /// Computes the challenge scalar \\( k = H(\mathrm{dom2} \Vert R
    /// \Vert A \Vert M) \\) and \\( R' = SB - kA \\), then applies the
    /// acceptance rule selected by `options`.
    ///
    /// The policy gates run in the same order on all inputs, after both
    /// `A` and `R` have been decoded, so that an observer cannot learn
    /// which gate rejected a signature.
    #[allow(non_snake_case)]
    fn verify_inner(
        &self,
        f: Dom2Flag,
        context: &[u8],
        message: &[u8],
        signature: &InternalSignature,
        options: &VerifyOptions,
    ) -> Result<(), SignatureError> {
        // Decode R up front; policy gates inspect both decoded points.
        let signature_R = signature.R.decompress().ok_or(InternalError::Verify)?;

        // Check A and R order (the former is required for strong binding).
        if !options.allow_small_order_a && self.point.is_small_order() {
            return Err(InternalError::Verify.into());
        }
        if !options.allow_small_order_r && signature_R.is_small_order() {
            return Err(InternalError::Verify.into());
        }

        // Check whether A and R are canonical, by re-encoding the
        // decoded points and requiring an exact byte match.
        if !options.allow_non_canonical_ar {
            let a_canonical = self.point.compress().ct_eq(&self.compressed);
            let r_canonical = signature_R.compress().ct_eq(&signature.R);
            if bool::from(!(a_canonical & r_canonical)) {
                return Err(InternalError::Verify.into());
            }
        }

        // k = H(dom2 || R || A || M)
        let mut h = new_dom2_digest(f, context);
        h.update(signature.R.as_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // R' = SB - kA
        let minus_A = -self.point;
        let expected_R =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &signature.s);

        if options.cofactorless_verify {
            // Historical rule: accept iff R' encodes identically to the
            // R presented in the signature.
            if expected_R.compress() == signature.R {
                Ok(())
            } else {
                Err(InternalError::Verify.into())
            }
        } else {
            // Cofactored rule: accept iff [8](R' - R) is the identity,
            // i.e. iff the difference is 8-torsion.
            if (expected_R - signature_R).is_small_order() {
                Ok(())
            } else {
                Err(InternalError::Verify.into())
            }
        }
    }

    /// Verify a signature on a message with this public key, using the
    /// supplied [`VerifyOptions`].
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    pub fn verify_with_options(
        &self,
        message: &[u8],
        signature: &Signature,
        options: &VerifyOptions,
    ) -> Result<(), SignatureError> {
        let signature = InternalSignature::try_from(signature)?;
        self.verify_inner(Dom2Flag::Pure, b"", message, &signature, options)
    }

    /// Verify an Ed25519ctx `signature` on a `message` bound to `context`.
    ///
    /// An empty `context` selects plain Ed25519, exactly as on the
    /// signing side; a `context` longer than 255 bytes is an error.
    pub fn verify_context(
        &self,
        message: &[u8],
        context: &[u8],
        signature: &Signature,
        options: &VerifyOptions,
    ) -> Result<(), SignatureError> {
        if context.len() > CONTEXT_MAX_LENGTH {
            return Err(InternalError::ContextLength {
                length: context.len(),
            }
            .into());
        }
        let f = if context.is_empty() {
            Dom2Flag::Pure
        } else {
            Dom2Flag::Ctx
        };

        let signature = InternalSignature::try_from(signature)?;
        self.verify_inner(f, context, message, &signature, options)
    }

    /// Verify a `signature` on a `prehashed_message` using the
    /// Ed25519ph algorithm.
    ///
    /// # Inputs
    ///
    /// * `prehashed_message` is an instantiated hash digest with 512-bits of
    ///   output which has had the message to be signed previously fed into its
    ///   state.
    /// * `context` is an optional context string, up to 255 bytes inclusive,
    ///   which may be used to provide additional domain separation.  If not
    ///   set, this will default to an empty string.
    /// * `signature` is a purported Ed25519ph [`Signature`] on the `prehashed_message`.
    /// * `options` selects the verification policy.
    ///
    /// # Returns
    ///
    /// Returns `true` if the `signature` was a valid signature created by this
    /// keypair on the `prehashed_message`.
    ///
    /// [rfc8032]: https://tools.ietf.org/html/rfc8032#section-5.1
    pub fn verify_prehashed<D>(
        &self,
        prehashed_message: D,
        context: Option<&[u8]>,
        signature: &Signature,
        options: &VerifyOptions,
    ) -> Result<(), SignatureError>
    where
        D: Digest<OutputSize = U64>,
    {
        let ctx = context.unwrap_or(b"");
        if ctx.len() > CONTEXT_MAX_LENGTH {
            return Err(InternalError::ContextLength { length: ctx.len() }.into());
        }

        let prehash = prehashed_message.finalize();

        let signature = InternalSignature::try_from(signature)?;
        self.verify_inner(Dom2Flag::Ph, ctx, prehash.as_slice(), &signature, options)
    }
}

impl Verifier<Signature> for VerifyingKey {
    /// Verify a signature on a message with this public key, using the
    /// default (strict, cofactored) verification policy.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.verify_with_options(message, signature, &VerifyOptions::STRICT)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VerifyingKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'d> serde::Deserialize<'d> for VerifyingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        struct VerifyingKeyVisitor;

        impl<'de> serde::de::Visitor<'de> for VerifyingKeyVisitor {
            type Value = VerifyingKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(
                    formatter,
                    "An ed25519 verifying (public) key as a 32-byte compressed point, as specified in RFC8032"
                )
            }

            fn visit_bytes<E: serde::de::Error>(self, bytes: &[u8]) -> Result<Self::Value, E> {
                VerifyingKey::try_from(bytes).map_err(E::custom)
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                if seq.next_element::<u8>()?.is_some() {
                    return Err(serde::de::Error::invalid_length(33, &"expected 32 bytes"));
                }

                VerifyingKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(VerifyingKeyVisitor)
    }
}
