//! Подпись документа
//!
//! SHA-256 по содержимому, RSA-PSS по дайджесту. Соль PSS (32 байта)
//! тянется из OsRng при каждом вызове, повторного использования соли между
//! подписями нет. Состояния между вызовами тоже нет.

use rand::rngs::OsRng;
use rsa::{Pss, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::error::{Result, SecureSignError};

use super::{SignedDocument, PSS_SALT_LEN};

/// Подписать документ приватным ключом
///
/// Пустой документ и непригодный ключ отвергаются до каких-либо
/// криптоопераций.
pub fn sign_document(document: &[u8], private_key: &RsaPrivateKey) -> Result<SignedDocument> {
    if document.is_empty() {
        return Err(SecureSignError::EmptyDocument);
    }

    private_key
        .validate()
        .map_err(|e| SecureSignError::InvalidKeyFormat(e.to_string()))?;

    let digest = Sha256::digest(document);

    let padding = Pss::new_with_salt::<Sha256>(PSS_SALT_LEN);
    let signature = private_key
        .sign_with_rng(&mut OsRng, padding, &digest)
        .map_err(|e| SecureSignError::SigningFailed(e.to_string()))?;

    Ok(SignedDocument {
        content: document.to_vec(),
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::tests::test_keypair;

    #[test]
    fn test_empty_document_rejected() {
        let result = sign_document(b"", test_keypair().private_key());
        assert!(matches!(result, Err(SecureSignError::EmptyDocument)));
    }

    #[test]
    fn test_signature_is_fresh_per_call() {
        let pair = test_keypair();

        // PSS вероятностна: две подписи одного документа различаются
        let first = sign_document(b"TESTDOC123", pair.private_key()).unwrap();
        let second = sign_document(b"TESTDOC123", pair.private_key()).unwrap();

        assert_ne!(first.signature, second.signature);
    }

    #[test]
    fn test_signed_bytes_start_with_content() {
        let signed = sign_document(b"TESTDOC123", test_keypair().private_key()).unwrap();
        let bytes = signed.to_bytes();

        assert!(bytes.starts_with(b"TESTDOC123"));
        assert!(bytes.ends_with(b">>"));
    }
}
