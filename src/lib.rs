//! Secure Sign - Hardware-token-style PDF signing tool for USB flash drives
//!
//! This crate provides a document signing core that:
//! - Generates RSA keypairs and stores the private key on a USB flash drive
//! - Encrypts the private key at rest with a passphrase (Argon2id + ChaCha20-Poly1305)
//! - Signs documents with RSA-PSS over a SHA-256 digest
//! - Verifies signatures against a public key, never throwing on a bad file
//!
//! The GUI/CLI collaborator owns all user prompting and calls into the
//! narrow surface re-exported below.

pub mod cli;
pub mod crypto;
pub mod device;
pub mod error;
pub mod keystore;
pub mod sign;

pub use error::{Result, SecureSignError};

// Узкая поверхность для коллабораторов
pub use crypto::{generate_keys, KeyPair};
pub use device::{list_removable_devices, DeviceInfo};
pub use keystore::{
    decrypt_private_key, encrypt_private_key, find_private_key, find_public_key,
    load_private_key, load_public_key, rotate_passphrase, save_keys, EncryptedPrivateKey,
    KeyFileReference, KeyKind,
};
pub use sign::{sign_document, verify_signature, SignedDocument, VerificationResult, VerifyRejection};
