//! Жизненный цикл хранилища: сохранение, поиск, смена фразы

mod common;

use std::fs;

use secure_sign::keystore::storage::{
    load_private_key, rotate_passphrase, save_keys_with_params,
};
use secure_sign::keystore::{find_private_key, find_public_key, KeyKind};
use secure_sign::sign::{sign_document, verify_signature};

#[test]
fn keys_survive_rotation_and_still_sign() {
    let drive = tempfile::tempdir().unwrap();
    let pair = common::keypair();

    let (_, private_path) =
        save_keys_with_params(pair, "first-passphrase", drive.path(), &common::light_kdf())
            .unwrap();

    rotate_passphrase(&private_path, "first-passphrase", "second-passphrase").unwrap();

    // после смены фразы ключ тот же и подпись сходится
    let private_key = load_private_key(&private_path, "second-passphrase").unwrap();
    let signed = sign_document(b"document after rotation", &private_key).unwrap();

    let result = verify_signature(&signed.to_bytes(), pair.public_key());
    assert!(result.valid);
}

#[test]
fn finder_is_deterministic_over_a_cluttered_drive() {
    let drive = tempfile::tempdir().unwrap();
    let pair = common::keypair();

    // ключи лежат в поддиректории среди постороннего мусора
    let keys_dir = drive.path().join("keys");
    fs::create_dir_all(&keys_dir).unwrap();
    fs::write(drive.path().join("holiday.jpg"), b"jpeg").unwrap();
    fs::write(drive.path().join("notes.txt"), b"text").unwrap();

    save_keys_with_params(pair, "correct-horse", &keys_dir, &common::light_kdf()).unwrap();

    let first = find_private_key(drive.path()).unwrap();
    assert_eq!(first.kind, KeyKind::Private);

    // тот же результат на каждом вызове
    for _ in 0..3 {
        assert_eq!(find_private_key(drive.path()).unwrap(), first);
    }

    let public = find_public_key(drive.path()).unwrap();
    assert_eq!(public.kind, KeyKind::Public);
    assert!(public.path.starts_with(&keys_dir));
}

#[test]
fn empty_drive_has_no_keys() {
    let drive = tempfile::tempdir().unwrap();

    assert!(find_private_key(drive.path()).is_none());
    assert!(find_public_key(drive.path()).is_none());
}
