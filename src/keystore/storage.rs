//! Запись и чтение файлов ключей
//!
//! Все записи атомарны: данные пишутся во временный файл в той же
//! директории, сбрасываются на диск (fsync) и переименовываются на место.
//! Неудавшаяся операция не оставляет наполовину записанных файлов.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use rsa::{RsaPrivateKey, RsaPublicKey};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::crypto::keys::decode_public_key_pem;
use crate::crypto::{KdfParams, KeyPair};
use crate::error::{Result, SecureSignError};

use super::codec::{self, EncryptedPrivateKey};
use super::{PRIVATE_KEY_FILE, PUBLIC_KEY_FILE};

/// Минимальная длина парольной фразы
pub const MIN_PASSPHRASE_LEN: usize = 12;

/// Предел размера файла ключа (защита от чтения случайно выбранного файла)
const MAX_KEY_FILE_BYTES: u64 = 1024 * 1024;

/// Проверить парольную фразу по политике хранилища
fn check_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(SecureSignError::EmptyPassphrase);
    }
    if passphrase.len() < MIN_PASSPHRASE_LEN {
        return Err(SecureSignError::PassphraseTooShort);
    }
    Ok(())
}

/// Атомарная запись: временный файл + fsync + rename
///
/// Используется и для файлов ключей, и для подписанных документов:
/// наполовину записанный файл не появляется ни при каком сбое.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rnd = [0u8; 12];
    OsRng.fill_bytes(&mut rnd);
    let tmp = parent.join(format!(".secure-sign.{}.tmp", hex::encode(rnd)));

    let mut opts = OpenOptions::new();
    opts.create_new(true).write(true);
    #[cfg(unix)]
    {
        opts.mode(0o600);
    }

    let mut file = opts.open(&tmp)?;

    let write_res: Result<()> = (|| {
        file.write_all(data)?;
        file.flush()?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if write_res.is_err() {
        let _ = fs::remove_file(&tmp);
    }

    write_res
}

/// Прочитать файл ключа с проверкой размера
fn read_key_file(path: &Path) -> Result<Vec<u8>> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_KEY_FILE_BYTES {
        return Err(SecureSignError::InvalidEnvelope(format!(
            "файл слишком большой: {} байт",
            meta.len()
        )));
    }
    Ok(fs::read(path)?)
}

/// Сохранить пару ключей в директорию накопителя
///
/// Публичный ключ пишется как SPKI PEM (`public_key.pubk`), приватный — в
/// зашифрованном конверте (`encrypted_private_key.pk`). Обе половины
/// финализируются вместе: если второй файл записать не удалось, первый
/// убирается, чтобы половины никогда не расходились.
pub fn save_keys(
    pair: &KeyPair,
    passphrase: &str,
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    save_keys_with_params(pair, passphrase, dir, &KdfParams::default())
}

/// Вариант с явными параметрами KDF (для тестов)
pub fn save_keys_with_params(
    pair: &KeyPair,
    passphrase: &str,
    dir: &Path,
    kdf: &KdfParams,
) -> Result<(PathBuf, PathBuf)> {
    check_passphrase(passphrase)?;

    let public_pem = pair.public_key_pem()?;
    let envelope =
        codec::encrypt_private_key_with_params(pair.private_key(), passphrase, kdf)?;

    let public_path = dir.join(PUBLIC_KEY_FILE);
    let private_path = dir.join(PRIVATE_KEY_FILE);

    write_atomic(&public_path, public_pem.as_bytes())?;

    if let Err(e) = write_atomic(&private_path, &envelope.to_bytes()) {
        // откат: не оставлять публичную половину без приватной
        let _ = fs::remove_file(&public_path);
        return Err(e);
    }

    Ok((public_path, private_path))
}

/// Загрузить публичный ключ из PEM-файла
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey> {
    let data = read_key_file(path)?;
    let pem = std::str::from_utf8(&data)
        .map_err(|_| SecureSignError::InvalidKeyFormat("файл не является PEM".into()))?;
    decode_public_key_pem(pem)
}

/// Загрузить конверт зашифрованного приватного ключа
pub fn load_encrypted_key(path: &Path) -> Result<EncryptedPrivateKey> {
    let data = read_key_file(path)?;
    EncryptedPrivateKey::from_bytes(&data)
}

/// Загрузить и расшифровать приватный ключ
pub fn load_private_key(path: &Path, passphrase: &str) -> Result<RsaPrivateKey> {
    let envelope = load_encrypted_key(path)?;
    codec::decrypt_private_key(&envelope, passphrase)
}

/// Сменить парольную фразу приватного ключа
///
/// Расшифровывает конверт старой фразой, перешифровывает свежей солью и
/// nonce под новой фразой и атомарно заменяет файл. Старая фраза после
/// этого недействительна.
pub fn rotate_passphrase(path: &Path, old_passphrase: &str, new_passphrase: &str) -> Result<()> {
    check_passphrase(new_passphrase)?;

    let envelope = load_encrypted_key(path)?;
    let private_key = codec::decrypt_private_key(&envelope, old_passphrase)?;

    // параметры KDF сохраняются, соль и nonce всегда свежие
    let reencrypted =
        codec::encrypt_private_key_with_params(&private_key, new_passphrase, &envelope.kdf)?;

    write_atomic(path, &reencrypted.to_bytes())
}
