// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! ed25519 signing keys.

use core::fmt::Debug;

use curve25519_tern::digest::generic_array::typenum::U64;
use curve25519_tern::digest::Digest;
use curve25519_tern::EdwardsPoint;

use ed25519::signature::{Signer, Verifier};

use rand_core::CryptoRngCore;

use sha2::Sha512;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{InternalError, SignatureError};
use crate::hazmat::{raw_sign_with_flag, ExpandedSecretKey};
use crate::options::{Dom2Flag, VerifyOptions};
use crate::verifying::VerifyingKey;
use crate::{Signature, CONTEXT_MAX_LENGTH, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};

/// ed25519 secret key as defined in [RFC8032 § 5.1.5]:
///
/// > The private key is 32 octets (256 bits, corresponding to b) of
/// > cryptographically secure random data.
///
/// [RFC8032 § 5.1.5]: https://www.rfc-editor.org/rfc/rfc8032#section-5.1.5
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// ed25519 signing key which can be used to produce signatures.
// Invariant: `verifying_key` is always the public key of
// `secret_key`. This prevents the signing function oracle attack
// described in https://github.com/MystenLabs/ed25519-unsafe-libs
#[derive(Clone)]
pub struct SigningKey {
    /// The seed, which is the private key representation used by RFC 8032.
    pub(crate) secret_key: SecretKey,
    /// The public half of this signing key.
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive() // avoids printing the secret half
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl SigningKey {
    /// Construct a `SigningKey` from a seed, deriving the public half
    /// via `clamp(SHA-512(seed)[0..32]) · B`.
    #[inline]
    pub fn from_bytes(secret_key: &SecretKey) -> Self {
        let esk = ExpandedSecretKey::from(secret_key);
        let point = EdwardsPoint::mul_base(&esk.scalar);
        let verifying_key = VerifyingKey {
            compressed: point.compress(),
            point,
        };

        Self {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Convert this `SigningKey` into a seed.
    #[inline]
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// View this `SigningKey` as a seed.
    #[inline]
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Construct a `SigningKey` from the bytes of a keypair.
    ///
    /// The bytes are the seed followed by the compressed public key, as
    /// produced by [`SigningKey::to_keypair_bytes`].
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `SigningKey` or whose
    /// error value is a `SignatureError` describing the error that
    /// occurred: either a wrong-length input, or a public half which
    /// does not match the seed.
    pub fn from_keypair_bytes(bytes: &[u8; 64]) -> Result<SigningKey, SignatureError> {
        let (secret_key, verifying_key) = bytes.split_at(SECRET_KEY_LENGTH);
        let signing_key = SigningKey::from_bytes(
            secret_key
                .try_into()
                .map_err(|_| InternalError::BytesLength {
                    name: "SecretKey",
                    length: SECRET_KEY_LENGTH,
                })?,
        );

        // Check that the derived public key matches the embedded one.
        if &signing_key.verifying_key.as_bytes()[..] != verifying_key {
            return Err(InternalError::MismatchedKeypair.into());
        }

        Ok(signing_key)
    }

    /// Convert this signing key to a 64-byte keypair.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `SECRET_KEY_LENGTH` of bytes is the seed, and the next
    /// `PUBLIC_KEY_LENGTH` bytes is the compressed public key.
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];

        bytes[..SECRET_KEY_LENGTH].copy_from_slice(&self.secret_key);
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.verifying_key.as_bytes());
        bytes
    }

    /// Get the [`VerifyingKey`] for this [`SigningKey`].
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Generate an ed25519 signing key from a cryptographically secure
    /// random number generator.
    ///
    /// # Input
    ///
    /// A CSPRNG with a `fill_bytes()` method, e.g. `rand::rngs::OsRng`.
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SigningKey {
        let mut secret = SecretKey::default();
        csprng.fill_bytes(&mut secret);

        Self::from_bytes(&secret)
    }

    /// Expand this seed into a secret scalar and hash prefix.
    fn expanded(&self) -> ExpandedSecretKey {
        ExpandedSecretKey::from(&self.secret_key)
    }

    /// Sign a `message` bound to a `context` with this signing key,
    /// using the Ed25519ctx algorithm defined in [RFC8032 §5.1][rfc8032].
    ///
    /// An empty `context` falls back to plain Ed25519.  The RFC allows
    /// an explicitly empty Ed25519ctx context but discourages it, and
    /// this implementation does not produce one.
    ///
    /// # Returns
    ///
    /// A `Result` whose `Ok` value is an Ed25519ctx [`Signature`] on the
    /// `message` if the context was 255 bytes or less, otherwise a
    /// `SignatureError`.
    ///
    /// [rfc8032]: https://tools.ietf.org/html/rfc8032#section-5.1
    pub fn sign_context(
        &self,
        message: &[u8],
        context: &[u8],
    ) -> Result<Signature, SignatureError> {
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

        Ok(raw_sign_with_flag(
            &self.expanded(),
            f,
            context,
            message,
            &self.verifying_key,
        ))
    }

    /// Sign a `prehashed_message` with this signing key, using the
    /// Ed25519ph algorithm defined in [RFC8032 §5.1][rfc8032].
    ///
    /// # Inputs
    ///
    /// * `prehashed_message` is an instantiated hash digest with 512-bits of
    ///   output which has had the message to be signed previously fed into its
    ///   state.
    /// * `context` is an optional context string, up to 255 bytes inclusive,
    ///   which may be used to provide additional domain separation.  If not
    ///   set, this will default to an empty string.
    ///
    /// # Returns
    ///
    /// A `Result` whose `Ok` value is an Ed25519ph [`Signature`] on the
    /// `prehashed_message` if the context was 255 bytes or less, otherwise
    /// a `SignatureError`.
    ///
    /// [rfc8032]: https://tools.ietf.org/html/rfc8032#section-5.1
    pub fn sign_prehashed<D>(
        &self,
        prehashed_message: D,
        context: Option<&[u8]>,
    ) -> Result<Signature, SignatureError>
    where
        D: Digest<OutputSize = U64>,
    {
        let ctx = context.unwrap_or(b"");
        if ctx.len() > CONTEXT_MAX_LENGTH {
            return Err(InternalError::ContextLength { length: ctx.len() }.into());
        }

        let prehash = prehashed_message.finalize();

        Ok(raw_sign_with_flag(
            &self.expanded(),
            Dom2Flag::Ph,
            ctx,
            prehash.as_slice(),
            &self.verifying_key,
        ))
    }

    /// Verify a `signature` on a `prehashed_message` using the
    /// Ed25519ph algorithm, with this signing key's public key.
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
        self.verifying_key
            .verify_prehashed(prehashed_message, context, signature, options)
    }
}

impl Signer<Signature> for SigningKey {
    /// Sign a message with this signing key's secret key, producing a
    /// plain (pure) Ed25519 signature.
    fn try_sign(&self, message: &[u8]) -> Result<Signature, SignatureError> {
        Ok(raw_sign_with_flag(
            &self.expanded(),
            Dom2Flag::Pure,
            b"",
            message,
            &self.verifying_key,
        ))
    }
}

impl Verifier<Signature> for SigningKey {
    /// Verify a signature on a message with this signing key's public key,
    /// using the default (strict, cofactored) verification policy.
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.verifying_key.verify(message, signature)
    }
}

impl From<&SecretKey> for SigningKey {
    fn from(secret: &SecretKey) -> Self {
        Self::from_bytes(secret)
    }
}

impl From<SecretKey> for SigningKey {
    fn from(secret: SecretKey) -> Self {
        Self::from_bytes(&secret)
    }
}

impl From<&SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &SecretKey) -> ExpandedSecretKey {
        let mut hash = [0u8; 64];
        hash.copy_from_slice(Sha512::digest(secret_key).as_slice());
        ExpandedSecretKey::from_bytes(&hash)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SigningKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.secret_key)
    }
}

#[cfg(feature = "serde")]
impl<'d> serde::Deserialize<'d> for SigningKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        struct SigningKeyVisitor;

        impl<'de> serde::de::Visitor<'de> for SigningKeyVisitor {
            type Value = SigningKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(formatter, "An ed25519 signing (secret) key as 32 bytes, as specified in RFC8032.")
            }

            fn visit_bytes<E: serde::de::Error>(self, bytes: &[u8]) -> Result<Self::Value, E> {
                let secret: &SecretKey = bytes.try_into().map_err(|_| {
                    E::custom(crate::errors::InternalError::BytesLength {
                        name: "SecretKey",
                        length: crate::SECRET_KEY_LENGTH,
                    })
                })?;
                Ok(SigningKey::from_bytes(secret))
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

                Ok(SigningKey::from_bytes(&bytes))
            }
        }

        deserializer.deserialize_bytes(SigningKeyVisitor)
    }
}
