//! Криптографические примитивы secure-sign
//!
//! This module provides:
//! - Argon2id for passphrase-based key derivation
//! - ChaCha20-Poly1305 for authenticated encryption of key material at rest
//! - RSA keypair generation with PKCS#8/SPKI encoding
//! - Secure memory handling with automatic zeroing

mod argon;
mod chacha;
pub mod keys;
mod secure_bytes;

pub use argon::{derive_key, DerivedKey, KdfParams, KEY_LEN, SALT_LEN};
pub use chacha::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use keys::{generate_keys, KeyPair, DEFAULT_KEY_BITS, DEFAULT_PUBLIC_EXPONENT};
pub use secure_bytes::SecureBytes;
