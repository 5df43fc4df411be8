//! Конверт зашифрованного приватного ключа
//!
//! Формат файла `encrypted_private_key.pk` (все числа big-endian):
//!
//! ```text
//! [4 байта:  магия "SSPK"]
//! [4 байта:  версия (u32)]
//! [4 байта:  m_cost Argon2, KiB (u32)]
//! [4 байта:  t_cost Argon2 (u32)]
//! [4 байта:  parallelism Argon2 (u32)]
//! [32 байта: соль]
//! [12 байт:  nonce]
//! [N байт:   шифротекст PKCS#8 DER + 16 байт тега]
//! ```
//!
//! Параметры KDF записаны в заголовке, поэтому файл самодостаточен:
//! для расшифровки нужен только он сам и парольная фраза.

use rsa::RsaPrivateKey;

use crate::crypto::{self, KdfParams, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::crypto::keys::{decode_private_key_der, encode_private_key_der};
use crate::error::{Result, SecureSignError};

/// Магия формата
pub const MAGIC: &[u8; 4] = b"SSPK";

/// Текущая версия конверта
pub const FORMAT_VERSION: u32 = 1;

/// Длина заголовка до шифротекста
pub const HEADER_LEN: usize = 4 + 4 + 12 + SALT_LEN + NONCE_LEN;

/// Приватный ключ, зашифрованный парольной фразой
///
/// Расшифровывается только точной фразой, использованной при шифровании;
/// неверная фраза детерминированно даёт `DecryptionFailed` без частичного
/// вывода (свойство AEAD-тега).
pub struct EncryptedPrivateKey {
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

impl EncryptedPrivateKey {
    /// Сериализовать конверт в байты файла
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        data.extend_from_slice(MAGIC);
        data.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
        data.extend_from_slice(&self.kdf.m_cost.to_be_bytes());
        data.extend_from_slice(&self.kdf.t_cost.to_be_bytes());
        data.extend_from_slice(&self.kdf.parallelism.to_be_bytes());
        data.extend_from_slice(&self.salt);
        data.extend_from_slice(&self.nonce);
        data.extend_from_slice(&self.ciphertext);
        data
    }

    /// Разобрать конверт из байтов файла
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN + TAG_LEN {
            return Err(SecureSignError::InvalidEnvelope(
                "файл короче минимального".into(),
            ));
        }

        if &data[0..4] != MAGIC {
            return Err(SecureSignError::InvalidEnvelope(
                "отсутствует магия SSPK".into(),
            ));
        }

        let version = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        if version != FORMAT_VERSION {
            return Err(SecureSignError::UnsupportedEnvelopeVersion(version));
        }

        let kdf = KdfParams {
            m_cost: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            t_cost: u32::from_be_bytes([data[12], data[13], data[14], data[15]]),
            parallelism: u32::from_be_bytes([data[16], data[17], data[18], data[19]]),
        };

        // Чужой файл не должен диктовать нам гигабайтные затраты памяти
        if !kdf.is_sane() {
            return Err(SecureSignError::InvalidEnvelope(
                "недопустимые параметры KDF".into(),
            ));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&data[20..20 + SALT_LEN]);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&data[20 + SALT_LEN..HEADER_LEN]);

        Ok(Self {
            kdf,
            salt,
            nonce,
            ciphertext: data[HEADER_LEN..].to_vec(),
        })
    }
}

/// Зашифровать приватный ключ парольной фразой (параметры KDF по умолчанию)
#[allow(dead_code)]
pub fn encrypt_private_key(
    private_key: &RsaPrivateKey,
    passphrase: &str,
) -> Result<EncryptedPrivateKey> {
    encrypt_private_key_with_params(private_key, passphrase, &KdfParams::default())
}

/// Зашифровать с явными параметрами KDF (тесты используют лёгкие значения)
pub fn encrypt_private_key_with_params(
    private_key: &RsaPrivateKey,
    passphrase: &str,
    kdf: &KdfParams,
) -> Result<EncryptedPrivateKey> {
    if passphrase.is_empty() {
        return Err(SecureSignError::EmptyPassphrase);
    }

    // PKCS#8 DER живёт в SecureBytes и зануляется при выходе из функции
    let plaintext = encode_private_key_der(private_key)?;

    let derived = crypto::derive_key(passphrase.as_bytes(), None, kdf)?;
    let (nonce, ciphertext) = crypto::encrypt(&derived.key, &plaintext)?;

    Ok(EncryptedPrivateKey {
        kdf: *kdf,
        salt: derived.salt,
        nonce,
        ciphertext,
    })
}

/// Расшифровать приватный ключ
///
/// Неверная фраза и повреждённый шифротекст неразличимы: оба дают
/// `DecryptionFailed`.
pub fn decrypt_private_key(
    encrypted: &EncryptedPrivateKey,
    passphrase: &str,
) -> Result<RsaPrivateKey> {
    let derived = crypto::derive_key(passphrase.as_bytes(), Some(&encrypted.salt), &encrypted.kdf)?;
    let plaintext = crypto::decrypt(&derived.key, &encrypted.nonce, &encrypted.ciphertext)?;
    decode_private_key_der(&plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::tests::test_keypair;

    fn light_kdf() -> KdfParams {
        KdfParams {
            m_cost: 1024,
            t_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let pair = test_keypair();

        let encrypted =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap();
        let decrypted = decrypt_private_key(&encrypted, "correct-horse").unwrap();

        assert_eq!(&decrypted, pair.private_key());
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let pair = test_keypair();

        let encrypted =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap();
        let result = decrypt_private_key(&encrypted, "wrong-horse");

        assert!(matches!(result, Err(SecureSignError::DecryptionFailed)));
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let pair = test_keypair();
        let result = encrypt_private_key_with_params(pair.private_key(), "", &light_kdf());
        assert!(matches!(result, Err(SecureSignError::EmptyPassphrase)));
    }

    #[test]
    fn test_envelope_bytes_roundtrip() {
        let pair = test_keypair();

        let encrypted =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap();
        let bytes = encrypted.to_bytes();
        let parsed = EncryptedPrivateKey::from_bytes(&bytes).unwrap();

        assert_eq!(parsed.kdf, encrypted.kdf);
        assert_eq!(parsed.salt, encrypted.salt);
        assert_eq!(parsed.nonce, encrypted.nonce);
        assert_eq!(parsed.ciphertext, encrypted.ciphertext);

        let decrypted = decrypt_private_key(&parsed, "correct-horse").unwrap();
        assert_eq!(&decrypted, pair.private_key());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let pair = test_keypair();
        let mut bytes =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap()
                .to_bytes();
        bytes[0] = b'X';

        assert!(matches!(
            EncryptedPrivateKey::from_bytes(&bytes),
            Err(SecureSignError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let pair = test_keypair();
        let mut bytes =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap()
                .to_bytes();
        bytes[7] = 99;

        assert!(matches!(
            EncryptedPrivateKey::from_bytes(&bytes),
            Err(SecureSignError::UnsupportedEnvelopeVersion(99))
        ));
    }

    #[test]
    fn test_truncated_file_rejected() {
        assert!(matches!(
            EncryptedPrivateKey::from_bytes(b"SSPK"),
            Err(SecureSignError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn test_hostile_kdf_header_rejected() {
        let pair = test_keypair();
        let mut bytes =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap()
                .to_bytes();
        // m_cost = 4 GiB
        bytes[8..12].copy_from_slice(&(4u32 * 1024 * 1024).to_be_bytes());

        assert!(matches!(
            EncryptedPrivateKey::from_bytes(&bytes),
            Err(SecureSignError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn test_corrupted_ciphertext_fails_auth() {
        let pair = test_keypair();
        let mut bytes =
            encrypt_private_key_with_params(pair.private_key(), "correct-horse", &light_kdf())
                .unwrap()
                .to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let parsed = EncryptedPrivateKey::from_bytes(&bytes).unwrap();
        assert!(matches!(
            decrypt_private_key(&parsed, "correct-horse"),
            Err(SecureSignError::DecryptionFailed)
        ));
    }
}
