//! Проверка подписи документа
//!
//! Никогда не возвращает ошибку и не паникует: любой исход — значение
//! `VerificationResult`, чтобы пакетная проверка не прерывалась на первом
//! плохом файле. Алгоритмы берутся из самого блока подписи, не
//! предполагаются.

use rsa::{Pss, RsaPublicKey};
use sha2::{Digest, Sha256};

use super::{
    trailer, VerificationResult, VerifyRejection, DIGEST_SHA256, PSS_SALT_LEN, SUBFILTER_RSA_PSS,
    TRAILER_VERSION,
};

/// Проверить подпись в подписанном файле
pub fn verify_signature(signed_bytes: &[u8], public_key: &RsaPublicKey) -> VerificationResult {
    let Some((content, block)) = trailer::split_signed(signed_bytes) else {
        return VerificationResult::rejected(VerifyRejection::NotSigned);
    };

    let parsed = match trailer::parse(block) {
        Ok(parsed) => parsed,
        Err(reason) => return VerificationResult::rejected(reason),
    };

    if parsed.version != TRAILER_VERSION {
        return VerificationResult::rejected(VerifyRejection::UnsupportedVersion(parsed.version));
    }

    if parsed.subfilter != SUBFILTER_RSA_PSS {
        return VerificationResult::rejected(VerifyRejection::UnsupportedAlgorithm(
            parsed.subfilter,
        ));
    }

    if parsed.digest != DIGEST_SHA256 {
        return VerificationResult::rejected(VerifyRejection::UnsupportedAlgorithm(parsed.digest));
    }

    // заявленная длина должна сходиться с фактически покрытой
    if parsed.covered_len != content.len() as u64 {
        return VerificationResult::rejected(VerifyRejection::Malformed(
            "ByteRange не совпадает с длиной содержимого".into(),
        ));
    }

    let digest = Sha256::digest(content);
    let padding = Pss::new_with_salt::<Sha256>(PSS_SALT_LEN);

    // изменённое содержимое и чужой ключ криптографически неразличимы
    match public_key.verify(padding, &digest, &parsed.signature) {
        Ok(()) => VerificationResult::ok(),
        Err(_) => VerificationResult::rejected(VerifyRejection::SignatureMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::tests::test_keypair;
    use crate::sign::sign_document;

    #[test]
    fn test_sign_then_verify_valid() {
        let pair = test_keypair();
        let signed = sign_document(b"TESTDOC123", pair.private_key()).unwrap();

        let result = verify_signature(&signed.to_bytes(), pair.public_key());
        assert!(result.valid);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_every_flipped_content_byte_detected() {
        let pair = test_keypair();
        let signed = sign_document(b"TESTDOC123", pair.private_key()).unwrap();
        let bytes = signed.to_bytes();

        for i in 0..b"TESTDOC123".len() {
            let mut tampered = bytes.clone();
            tampered[i] ^= 0x01;

            let result = verify_signature(&tampered, pair.public_key());
            assert!(!result.valid, "флип байта {} не обнаружен", i);
        }
    }

    #[test]
    fn test_unsigned_file_is_not_signed() {
        let result = verify_signature(b"plain bytes", test_keypair().public_key());
        assert_eq!(result.reason, Some(VerifyRejection::NotSigned));
        assert!(!result.valid);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let pair = test_keypair();
        let signed = sign_document(b"TESTDOC123", pair.private_key()).unwrap();
        let text = String::from_utf8(signed.to_bytes())
            .unwrap()
            .replace("/Version 1", "/Version 7");

        let result = verify_signature(text.as_bytes(), pair.public_key());
        assert_eq!(result.reason, Some(VerifyRejection::UnsupportedVersion(7)));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let pair = test_keypair();
        let signed = sign_document(b"TESTDOC123", pair.private_key()).unwrap();
        let text = String::from_utf8(signed.to_bytes())
            .unwrap()
            .replace("/SubFilter /rsa.pss", "/SubFilter /rsa.pkcs1");

        let result = verify_signature(text.as_bytes(), pair.public_key());
        assert_eq!(
            result.reason,
            Some(VerifyRejection::UnsupportedAlgorithm("rsa.pkcs1".into()))
        );
    }

    #[test]
    fn test_corrupted_signature_hex_is_malformed() {
        let pair = test_keypair();
        let signed = sign_document(b"TESTDOC123", pair.private_key()).unwrap();
        let mut bytes = signed.to_bytes();

        // подменить последний hex-символ подписи недопустимым
        let pos = bytes.len() - b">\n>>".len() - 1;
        bytes[pos] = b'!';

        let result = verify_signature(&bytes, pair.public_key());
        assert!(matches!(result.reason, Some(VerifyRejection::Malformed(_))));
    }
}
