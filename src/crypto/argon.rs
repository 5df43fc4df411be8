//! Argon2id Key Derivation Function
//!
//! Uses Argon2id (winner of the Password Hashing Competition) to derive
//! encryption keys from user passphrases. Argon2id is resistant to:
//! - GPU attacks (memory-hard)
//! - Side-channel attacks (hybrid approach)
//! - Time-memory trade-off attacks
//!
//! The parameters are carried as an explicit [`KdfParams`] value so that the
//! encrypted-key envelope can record them and stay self-describing.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use zeroize::Zeroize;

use super::SecureBytes;
use crate::error::{Result, SecureSignError};

/// Salt length in bytes (256 bits)
pub const SALT_LEN: usize = 32;

/// Derived key length in bytes (256 bits for ChaCha20)
pub const KEY_LEN: usize = 32;

/// Argon2id parameters for one derivation.
///
/// Defaults follow the OWASP recommendation for high security:
/// 64 MB memory, 3 iterations, 4 lanes. Tests pass lighter values
/// explicitly; there is no environment-variable override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub m_cost: u32,
    /// Number of passes
    pub t_cost: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MB
            t_cost: 3,
            parallelism: 4,
        }
    }
}

impl KdfParams {
    /// Верхние границы против враждебных заголовков файла ключа:
    /// чужой файл не должен заставить нас выделить гигабайты памяти.
    pub fn is_sane(&self) -> bool {
        self.m_cost > 0
            && self.m_cost <= 1024 * 1024 // 1 GiB
            && self.t_cost > 0
            && self.t_cost <= 64
            && self.parallelism > 0
            && self.parallelism <= 32
    }
}

/// A derived encryption key with its associated salt
pub struct DerivedKey {
    /// The derived key material (32 bytes)
    pub key: SecureBytes,
    /// The salt used for derivation (32 bytes)
    pub salt: [u8; SALT_LEN],
}

impl Zeroize for DerivedKey {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.salt.zeroize();
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Derive an encryption key from a passphrase using Argon2id
///
/// # Arguments
/// * `passphrase` - The user's passphrase
/// * `salt` - Optional salt (if None, generates a new random salt)
/// * `params` - Argon2id cost parameters
///
/// # Security Notes
/// - Uses memory-hard function to resist GPU attacks
/// - Salt prevents rainbow table attacks
pub fn derive_key(
    passphrase: &[u8],
    salt: Option<&[u8; SALT_LEN]>,
    params: &KdfParams,
) -> Result<DerivedKey> {
    if !params.is_sane() {
        return Err(SecureSignError::InvalidEnvelope(
            "недопустимые параметры KDF".into(),
        ));
    }

    let salt_bytes: [u8; SALT_LEN] = match salt {
        Some(s) => *s,
        None => {
            let mut s = [0u8; SALT_LEN];
            use rand::RngCore;
            OsRng.fill_bytes(&mut s);
            s
        }
    };

    let argon_params = Params::new(params.m_cost, params.t_cost, params.parallelism, Some(KEY_LEN))
        .map_err(|e| SecureSignError::Other(format!("Argon2 params error: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key_bytes = vec![0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, &salt_bytes, &mut key_bytes)
        .map_err(|e| SecureSignError::Other(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey {
        key: SecureBytes::new(key_bytes),
        salt: salt_bytes,
    })
}
