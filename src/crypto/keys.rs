//! RSA Keypair Generation
//!
//! RSA with a configurable modulus size (2048-8192 bits) and a
//! caller-supplied public exponent, conventionally 65537. The private key is
//! kept in the `rsa` crate's `RsaPrivateKey`, which carries the CRT
//! parameters and zeroizes itself on drop; serialized forms are PKCS#8 for
//! the private half and SubjectPublicKeyInfo for the public half.

use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use super::SecureBytes;
use crate::error::{Result, SecureSignError};

/// Размер модуля по умолчанию (совместим с ранее выпущенными ключами)
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Открытая экспонента по умолчанию (F4)
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// Минимально допустимый размер модуля
pub const MIN_KEY_BITS: usize = 2048;

/// Максимально допустимый размер модуля
pub const MAX_KEY_BITS: usize = 8192;

/// An RSA keypair; the halves are generated together and stay linked
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generate a new random RSA keypair
    ///
    /// The prime search runs to completion; callers needing responsiveness
    /// run this on their own execution context.
    pub fn generate(modulus_bits: usize, public_exponent: u64) -> Result<Self> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&modulus_bits) {
            return Err(SecureSignError::UnsupportedKeySize(modulus_bits));
        }

        if public_exponent < 3 || public_exponent % 2 == 0 {
            return Err(SecureSignError::UnsupportedExponent(public_exponent));
        }

        let exponent = BigUint::from(public_exponent);
        let private = RsaPrivateKey::new_with_exp(&mut OsRng, modulus_bits, &exponent)
            .map_err(|e| SecureSignError::KeyGenerationFailed(e.to_string()))?;
        let public = RsaPublicKey::from(&private);

        Ok(Self { private, public })
    }

    /// Восстановить пару из приватного ключа (публичная половина выводится)
    #[allow(dead_code)]
    pub fn from_private_key(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        Self { private, public }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Public key as SubjectPublicKeyInfo PEM (the `.pubk` file contents)
    pub fn public_key_pem(&self) -> Result<String> {
        encode_public_key_pem(&self.public)
    }

    /// Отпечаток публичного ключа: `sha256:<hex>` от SPKI DER
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint(&self.public)
    }
}

/// Generate a new RSA keypair (§ narrow surface)
pub fn generate_keys(modulus_bits: usize, public_exponent: u64) -> Result<KeyPair> {
    KeyPair::generate(modulus_bits, public_exponent)
}

/// Serialize a private key to PKCS#8 DER inside a zero-on-drop buffer
pub fn encode_private_key_der(private: &RsaPrivateKey) -> Result<SecureBytes> {
    let doc = private
        .to_pkcs8_der()
        .map_err(|e| SecureSignError::KeyEncodingFailed(e.to_string()))?;
    Ok(SecureBytes::new(doc.as_bytes().to_vec()))
}

/// Parse a private key from PKCS#8 DER
pub fn decode_private_key_der(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| SecureSignError::InvalidKeyFormat(e.to_string()))
}

/// Serialize a public key to SPKI PEM (LF line endings)
pub fn encode_public_key_pem(public: &RsaPublicKey) -> Result<String> {
    public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| SecureSignError::KeyEncodingFailed(e.to_string()))
}

/// Parse a public key from SPKI PEM
pub fn decode_public_key_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| SecureSignError::InvalidKeyFormat(e.to_string()))
}

/// SHA-256 fingerprint of the SPKI DER encoding, `sha256:<hex>`
pub fn fingerprint(public: &RsaPublicKey) -> Result<String> {
    let der = public
        .to_public_key_der()
        .map_err(|e| SecureSignError::KeyEncodingFailed(e.to_string()))?;
    let digest = Sha256::digest(der.as_bytes());
    Ok(format!("sha256:{}", hex::encode(digest)))
}
