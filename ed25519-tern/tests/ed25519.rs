// -*- mode: rust; -*-
//
// This file is part of ed25519-tern.
// See LICENSE for licensing information.

//! Integration tests for ed25519-tern.

use ed25519_tern::*;

use hex_literal::hex;
use sha2::{Digest, Sha512};

/// RFC 8032 test vectors and other known-answer tests.
mod vectors {
    use super::*;

    fn check_rfc8032_vector(seed: [u8; 32], public: [u8; 32], message: &[u8], sig: [u8; 64]) {
        let signing_key = SigningKey::from_bytes(&seed);
        let expected_verifying_key = VerifyingKey::from_bytes(&public).unwrap();
        assert_eq!(expected_verifying_key, signing_key.verifying_key());

        let sig1 = Signature::from_bytes(&sig);
        let sig2 = signing_key.sign(message);
        assert_eq!(sig1, sig2, "signature bytes not equal to RFC 8032 vector");

        // The honestly generated signature verifies under every profile.
        for options in [
            VerifyOptions::STRICT,
            VerifyOptions::LEGACY,
            VerifyOptions::FIPS_186_5,
        ] {
            assert!(expected_verifying_key
                .verify_with_options(message, &sig2, &options)
                .is_ok());
        }
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.1, TEST 1
    #[test]
    fn rfc8032_test1_empty_message() {
        check_rfc8032_vector(
            hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
            hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
            b"",
            hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155
                 5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
            ),
        );
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.1, TEST 2
    #[test]
    fn rfc8032_test2_one_byte() {
        check_rfc8032_vector(
            hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
            hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
            &hex!("72"),
            hex!(
                "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da
                 085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
            ),
        );
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.1, TEST 3
    #[test]
    fn rfc8032_test3_two_bytes() {
        check_rfc8032_vector(
            hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
            hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
            &hex!("af82"),
            hex!(
                "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac
                 18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
            ),
        );
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.2, TEST foo
    #[test]
    fn rfc8032_ed25519ctx_test_vector() {
        let seed = hex!("0305334e381af78f141cb666f6199f57bc3495335a256a95bd2a55bf546663f6");
        let public = hex!("dfc9425e4f968f7f0c29f0259cf5f9aed6851c2bb4ad8bfb860cfee0ab248292");
        let message = hex!("f726936d19c800494e3fdaff20b276a8");
        let context = hex!("666f6f");
        let sig_bytes = hex!(
            "55a4cc2f70a54e04288c5f4cd1e45a7bb520b36292911876cada7323198dd87a
             8b36950b95130022907a7fb7c4e9b2d5f6cca685a587b4b21f4b888e4e7edb0d"
        );

        let signing_key = SigningKey::from_bytes(&seed);
        let verifying_key = VerifyingKey::from_bytes(&public).unwrap();
        assert_eq!(verifying_key, signing_key.verifying_key());

        let sig1 = Signature::from_bytes(&sig_bytes);
        let sig2 = signing_key.sign_context(&message, &context).unwrap();
        assert_eq!(sig1, sig2);

        assert!(verifying_key
            .verify_context(&message, &context, &sig2, &VerifyOptions::STRICT)
            .is_ok());

        // A different context must not verify.
        assert!(verifying_key
            .verify_context(&message, b"bar", &sig2, &VerifyOptions::STRICT)
            .is_err());
        // Nor must the pure-Ed25519 interpretation of the same bytes.
        assert!(verifying_key
            .verify_with_options(&message, &sig2, &VerifyOptions::STRICT)
            .is_err());
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.3
    #[test]
    fn rfc8032_ed25519ph_test_vector() {
        let seed = hex!("833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42");
        let public = hex!("ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf");
        let message = hex!("616263");
        let sig_bytes = hex!(
            "98a70222f0b8121aa9d30f813d683f809e462b469c7ff87639499bb94e6dae41
             31f85042463c2a355a2003d062adf5aaa10b8c61e636062aaad11c2a26083406"
        );

        let signing_key = SigningKey::from_bytes(&seed);
        let expected_verifying_key = VerifyingKey::from_bytes(&public).unwrap();
        assert_eq!(expected_verifying_key, signing_key.verifying_key());
        let sig1 = Signature::from_bytes(&sig_bytes);

        let mut prehash_for_signing = Sha512::default();
        let mut prehash_for_verifying = Sha512::default();

        prehash_for_signing.update(message);
        prehash_for_verifying.update(message);

        let sig2: Signature = signing_key
            .sign_prehashed(prehash_for_signing, None)
            .unwrap();

        assert_eq!(
            sig1, sig2,
            "original signature from test vectors doesn't equal signature produced:\
             \noriginal:\n{:?}\nproduced:\n{:?}",
            sig1, sig2
        );
        assert!(
            expected_verifying_key
                .verify_prehashed(prehash_for_verifying, None, &sig2, &VerifyOptions::STRICT)
                .is_ok(),
            "could not verify ed25519ph signature!"
        );
    }

    /// The public half of a key must equal `clamp(SHA-512(seed)[0..32]) · B`.
    #[test]
    fn public_key_derivation() {
        use curve25519_tern::scalar::{clamp_integer, Scalar};
        use curve25519_tern::EdwardsPoint;

        let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let signing_key = SigningKey::from_bytes(&seed);

        let h = Sha512::digest(seed);
        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&h.as_slice()[..32]);
        let a = Scalar::from_bits(clamp_integer(scalar_bytes));
        let A = EdwardsPoint::mul_base(&a).compress();

        assert_eq!(signing_key.verifying_key().to_bytes(), A.to_bytes());
        assert_eq!(&signing_key.to_keypair_bytes()[32..], &A.to_bytes()[..]);
    }
}

/// Tests of the verification policy gates.
mod policy {
    use super::*;

    use curve25519_tern::constants::ED25519_BASEPOINT_POINT;
    use curve25519_tern::edwards::CompressedEdwardsY;
    use curve25519_tern::scalar::Scalar;
    use curve25519_tern::traits::IsIdentity;
    use curve25519_tern::EdwardsPoint;

    use rand::rngs::OsRng;
    use std::ops::Neg;

    // Taken from curve25519_tern::constants::EIGHT_TORSION[4], the point of
    // order 2.
    const EIGHT_TORSION_4: [u8; 32] = [
        236, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 127,
    ];

    const WEAK_PUBKEY: CompressedEdwardsY = CompressedEdwardsY(EIGHT_TORSION_4);

    /// Compute H(R || A || M) as a scalar, with no dom2 prefix.
    fn compute_challenge(
        message: &[u8],
        pub_key: &CompressedEdwardsY,
        signature_r: &CompressedEdwardsY,
    ) -> Scalar {
        let mut h = Sha512::default();
        h.update(signature_r.as_bytes());
        h.update(pub_key.as_bytes());
        h.update(message);
        Scalar::from_hash(h)
    }

    fn serialize_signature(r: &CompressedEdwardsY, s: &Scalar) -> Signature {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&r.to_bytes());
        bytes[32..].copy_from_slice(&s.to_bytes());
        Signature::from_bytes(&bytes)
    }

    fn non_null_scalar() -> Scalar {
        let mut rng = OsRng;
        let mut s_candidate = Scalar::random(&mut rng);
        while s_candidate == Scalar::ZERO {
            s_candidate = Scalar::random(&mut rng);
        }
        s_candidate
    }

    /// Altering the top three bits of S must cause rejection before any
    /// curve arithmetic, without a panic.
    #[test]
    fn invalid_s_high_bits_rejected() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let message = b"an innocuous message";
        let good_sig = signing_key.sign(message);

        let mut bad_bytes = good_sig.to_bytes();
        bad_bytes[63] |= 0x20;
        let bad_sig = Signature::from_bytes(&bad_bytes);

        for options in [
            VerifyOptions::STRICT,
            VerifyOptions::LEGACY,
            VerifyOptions::FIPS_186_5,
        ] {
            assert!(signing_key
                .verifying_key()
                .verify_with_options(message, &bad_sig, &options)
                .is_err());
        }
    }

    /// A signature whose S has been shifted by the group order encodes the
    /// same residue but must be rejected by the strict scalar range check.
    #[test]
    fn unreduced_s_rejected() {
        // The group order l, little-endian.
        const L: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];

        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let message = b"an innocuous message";
        let good_sig = signing_key.sign(message);

        // bad_s = s + l, as a 256-bit integer
        let mut bytes = good_sig.to_bytes();
        let mut carry = 0u16;
        for i in 0..32 {
            let v = bytes[32 + i] as u16 + L[i] as u16 + carry;
            bytes[32 + i] = v as u8;
            carry = v >> 8;
        }
        assert_eq!(carry, 0);
        let bad_sig = Signature::from_bytes(&bytes);

        for options in [VerifyOptions::STRICT, VerifyOptions::LEGACY] {
            assert!(signing_key
                .verifying_key()
                .verify_with_options(message, &bad_sig, &options)
                .is_err());
        }
    }

    /// A signature by a small-order public key, built per the verification
    /// equation, passes under the legacy profile but is rejected as soon as
    /// small-order public keys are disallowed.
    #[test]
    fn small_order_public_key() {
        let message = b"Send 100 USD to Alice";

        let pubkey_point = WEAK_PUBKEY.decompress().unwrap();
        assert!(pubkey_point.is_small_order());

        // Pick s at random and let R = sB - A.  Since A has order 2,
        // H(R || A || M)·A is either A or the identity; retry until it is
        // A, at which point sB = R + H(R || A || M)·A holds.
        let mut s = non_null_scalar();
        let mut r_point = EdwardsPoint::mul_base(&s) + pubkey_point.neg();
        let mut r = r_point.compress();
        while !(pubkey_point.neg() + compute_challenge(message, &WEAK_PUBKEY, &r) * pubkey_point)
            .is_identity()
        {
            s = non_null_scalar();
            r_point = EdwardsPoint::mul_base(&s) + pubkey_point.neg();
            r = r_point.compress();
        }

        let signature = serialize_signature(&r, &s);
        let vk = VerifyingKey::from_bytes(WEAK_PUBKEY.as_bytes()).unwrap();
        assert!(vk.is_weak());

        // The legacy profile accepts the signature.
        assert!(vk
            .verify_with_options(message, &signature, &VerifyOptions::LEGACY)
            .is_ok());

        // The strict profile rejects it, because A has small order.
        assert!(vk
            .verify_with_options(message, &signature, &VerifyOptions::STRICT)
            .is_err());
    }

    /// A non-canonical public key encoding (y >= p) decodes to a valid
    /// point, verifies under the legacy profile, and is rejected whenever
    /// `allow_non_canonical_ar` is off.
    #[test]
    fn non_canonical_public_key() {
        // p + 1, which decodes to y = 1: the identity point, encoded
        // non-canonically.
        let non_canonical_a: [u8; 32] = [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0x7f,
        ];

        let vk = VerifyingKey::from_bytes(&non_canonical_a).unwrap();
        assert!(EdwardsPoint::from(vk).is_identity());

        // Since A is the identity, S·B - k·A = S·B for any k, so the pair
        // (R, S) = (sB, s) satisfies the verification equation.
        let message = b"jackdaws love my big sphinx of quartz";
        let s = non_null_scalar();
        let r = EdwardsPoint::mul_base(&s).compress();
        let signature = serialize_signature(&r, &s);

        // All structural checks off: accepted.
        assert!(vk
            .verify_with_options(message, &signature, &VerifyOptions::LEGACY)
            .is_ok());

        // FIPS 186-5 allows the small order A but rejects the
        // non-canonical encoding.
        assert!(vk
            .verify_with_options(message, &signature, &VerifyOptions::FIPS_186_5)
            .is_err());

        // Strict rejects too.
        assert!(vk
            .verify_with_options(message, &signature, &VerifyOptions::STRICT)
            .is_err());
    }

    /// Wrong-key and wrong-message failures under every profile.
    #[test]
    fn wrong_inputs_rejected() {
        let mut csprng = OsRng;

        let good: &[u8] = b"test message";
        let bad: &[u8] = b"wrong message";

        let signing_key = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();
        let other_key = SigningKey::generate(&mut csprng).verifying_key();
        let good_sig = signing_key.sign(good);

        // Check that an honestly generated public key is not weak.
        assert!(!verifying_key.is_weak());

        for options in [
            VerifyOptions::STRICT,
            VerifyOptions::LEGACY,
            VerifyOptions::FIPS_186_5,
        ] {
            assert!(verifying_key
                .verify_with_options(good, &good_sig, &options)
                .is_ok());
            assert!(verifying_key
                .verify_with_options(bad, &good_sig, &options)
                .is_err());
            assert!(other_key
                .verify_with_options(good, &good_sig, &options)
                .is_err());
        }
    }

    /// The basepoint-order constant used in `unreduced_s_rejected` really
    /// kills the basepoint.
    #[test]
    fn sanity_basepoint_order() {
        let ell = Scalar::from_canonical_bytes([
            0xec, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ]);
        // l - 1 is canonical
        let ell_minus_one: Scalar = Option::from(ell).unwrap();
        let P = EdwardsPoint::mul_base(&ell_minus_one);
        assert_eq!(P, ED25519_BASEPOINT_POINT.neg());
    }
}

/// Round-trip and API-surface tests with random keys.
mod integrations {
    use super::*;

    use rand::rngs::OsRng;
    use std::collections::HashMap;

    #[test]
    fn sign_verify() {
        let good: &[u8] = "test message".as_bytes();
        let bad: &[u8] = "wrong message".as_bytes();

        let mut csprng = OsRng;

        let signing_key: SigningKey = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();
        let good_sig: Signature = signing_key.sign(good);
        let bad_sig: Signature = signing_key.sign(bad);

        assert!(
            signing_key.verify(good, &good_sig).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            verifying_key.verify(good, &good_sig).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            signing_key.verify(good, &bad_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            signing_key.verify(bad, &good_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn sign_verify_context() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();

        let message: &[u8] = b"precarious cliffside monastery";
        let context: &[u8] = b"testing testing 1 2 3";

        let sig = signing_key.sign_context(message, context).unwrap();

        for options in [
            VerifyOptions::STRICT,
            VerifyOptions::LEGACY,
            VerifyOptions::FIPS_186_5,
        ] {
            assert!(verifying_key
                .verify_context(message, context, &sig, &options)
                .is_ok());
        }

        // Signed-with-context does not verify without it, and vice versa.
        assert!(verifying_key
            .verify_with_options(message, &sig, &VerifyOptions::STRICT)
            .is_err());
        let pure_sig = signing_key.sign(message);
        assert!(verifying_key
            .verify_context(message, context, &pure_sig, &VerifyOptions::STRICT)
            .is_err());

        // An empty context is plain Ed25519.
        let empty_ctx_sig = signing_key.sign_context(message, b"").unwrap();
        assert_eq!(empty_ctx_sig, pure_sig);
        assert!(verifying_key
            .verify_context(message, b"", &empty_ctx_sig, &VerifyOptions::STRICT)
            .is_ok());
    }

    #[test]
    fn sign_verify_prehashed() {
        let good: &[u8] = b"test message";
        let bad: &[u8] = b"wrong message";

        let mut csprng = OsRng;

        let mut prehashed_good1: Sha512 = Sha512::default();
        prehashed_good1.update(good);
        let mut prehashed_good2: Sha512 = Sha512::default();
        prehashed_good2.update(good);

        let mut prehashed_bad1: Sha512 = Sha512::default();
        prehashed_bad1.update(bad);
        let mut prehashed_bad2: Sha512 = Sha512::default();
        prehashed_bad2.update(bad);

        let context: &[u8] = b"testing testing 1 2 3";

        let signing_key: SigningKey = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();
        let good_sig: Signature = signing_key
            .sign_prehashed(prehashed_good1, Some(context))
            .unwrap();
        let bad_sig: Signature = signing_key
            .sign_prehashed(prehashed_bad1, Some(context))
            .unwrap();

        assert!(
            verifying_key
                .verify_prehashed(
                    prehashed_good2.clone(),
                    Some(context),
                    &good_sig,
                    &VerifyOptions::STRICT
                )
                .is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            verifying_key
                .verify_prehashed(
                    prehashed_good2,
                    Some(context),
                    &bad_sig,
                    &VerifyOptions::STRICT
                )
                .is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            verifying_key
                .verify_prehashed(
                    prehashed_bad2,
                    Some(context),
                    &good_sig,
                    &VerifyOptions::STRICT
                )
                .is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let message = b"repeat yourself exactly";

        assert_eq!(signing_key.sign(message), signing_key.sign(message));
        assert_eq!(
            signing_key.sign_context(message, b"ctx").unwrap(),
            signing_key.sign_context(message, b"ctx").unwrap()
        );
    }

    #[test]
    fn context_too_long() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let context = [0u8; 256];

        assert!(signing_key.sign_context(b"msg", &context).is_err());
        assert!(signing_key
            .sign_prehashed(Sha512::default(), Some(&context[..]))
            .is_err());

        let sig = signing_key.sign(b"msg");
        assert!(signing_key
            .verifying_key()
            .verify_context(b"msg", &context, &sig, &VerifyOptions::STRICT)
            .is_err());
    }

    #[test]
    fn keypair_bytes_round_trip() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);

        let keypair_bytes = signing_key.to_keypair_bytes();
        let restored = SigningKey::from_keypair_bytes(&keypair_bytes).unwrap();

        assert_eq!(restored.to_bytes(), signing_key.to_bytes());
        assert_eq!(restored.verifying_key(), signing_key.verifying_key());

        // A keypair whose public half does not match the seed is rejected.
        let mut mismatched = keypair_bytes;
        mismatched[32] ^= 1;
        assert!(SigningKey::from_keypair_bytes(&mismatched).is_err());
    }

    #[test]
    fn verifying_key_from_bad_bytes() {
        use curve25519_tern::edwards::CompressedEdwardsY;

        // Find a y-coordinate with no corresponding x on the curve; about
        // half of all candidates qualify, so this terminates immediately.
        let mut bytes = [0u8; 32];
        let mut found = false;
        for y in 2u8..=255 {
            bytes[0] = y;
            if CompressedEdwardsY(bytes).decompress().is_none() {
                found = true;
                break;
            }
        }
        assert!(found);
        assert!(VerifyingKey::from_bytes(&bytes).is_err());

        // Wrong length via TryFrom<&[u8]>.
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        assert!(VerifyingKey::try_from(&signing_key.verifying_key().as_bytes()[..31]).is_err());
    }

    #[test]
    fn public_key_hash_trait_check() {
        let mut csprng = OsRng;
        let secret: SigningKey = SigningKey::generate(&mut csprng);
        let public_from_secret: VerifyingKey = (&secret).into();

        let mut m = HashMap::new();
        m.insert(public_from_secret, "Example_Public_Key");

        m.insert(public_from_secret, "Updated Value");

        let (k, &v) = m.get_key_value(&public_from_secret).unwrap();
        assert_eq!(k, &public_from_secret);
        assert_eq!(v, "Updated Value");
        assert_eq!(m.len(), 1usize);

        let second_secret: SigningKey = SigningKey::generate(&mut csprng);
        let public_from_second_secret: VerifyingKey = (&second_secret).into();
        assert_ne!(public_from_secret, public_from_second_secret);
        m.insert(public_from_second_secret, "Second public key");

        let (k, &v) = m.get_key_value(&public_from_second_secret).unwrap();
        assert_eq!(k, &public_from_second_secret);
        assert_eq!(v, "Second public key");
        assert_eq!(m.len(), 2usize);
    }
}
