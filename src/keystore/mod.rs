//! Хранилище ключей на USB-накопителе
//!
//! - `codec`: конверт зашифрованного приватного ключа (формат файла `.pk`)
//! - `storage`: атомарная запись/чтение файлов ключей, смена пароля
//! - `finder`: поиск файлов ключей на накопителе

pub mod codec;
pub mod finder;
pub mod storage;

/// Имя файла публичного ключа (совместимо с ранее выпущенными накопителями)
pub const PUBLIC_KEY_FILE: &str = "public_key.pubk";

/// Имя файла зашифрованного приватного ключа
pub const PRIVATE_KEY_FILE: &str = "encrypted_private_key.pk";

/// Расширение файлов публичного ключа
pub const PUBLIC_KEY_EXT: &str = "pubk";

/// Расширение файлов приватного ключа
pub const PRIVATE_KEY_EXT: &str = "pk";

pub use codec::{decrypt_private_key, encrypt_private_key, EncryptedPrivateKey};
pub use finder::{find_private_key, find_public_key, KeyFileReference, KeyKind};
pub use storage::{
    load_encrypted_key, load_private_key, load_public_key, rotate_passphrase, save_keys,
};
