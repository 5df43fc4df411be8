//! Реализация CLI команд
//!
//! CLI — эталонный коллаборатор ядра: весь пользовательский ввод (пароли,
//! выбор накопителя) живёт здесь, ядро получает уже конкретные значения.

pub mod change_pass;
pub mod devices;
pub mod keygen;
pub mod sign;
pub mod verify;

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::device::{self, DeviceInfo};
use crate::error::{Result, SecureSignError};
use crate::keystore::storage::MIN_PASSPHRASE_LEN;

/// Запросить новую парольную фразу с подтверждением
pub fn prompt_new_passphrase() -> Result<String> {
    println!("{}", "Создание парольной фразы".cyan().bold());
    println!("Эта фраза шифрует приватный ключ. Выберите надёжную фразу.");
    println!("Минимальная длина: {} символов\n", MIN_PASSPHRASE_LEN);

    loop {
        let passphrase = rpassword::prompt_password("Введите парольную фразу: ")?;

        if passphrase.len() < MIN_PASSPHRASE_LEN {
            println!(
                "{} Фраза должна содержать минимум {} символов",
                "Ошибка:".red(),
                MIN_PASSPHRASE_LEN
            );
            continue;
        }

        let confirm = rpassword::prompt_password("Подтвердите парольную фразу: ")?;

        if passphrase != confirm {
            println!("{} Фразы не совпадают", "Ошибка:".red());
            continue;
        }

        return Ok(passphrase);
    }
}

/// Запросить существующую парольную фразу
pub fn prompt_passphrase() -> Result<String> {
    let passphrase = rpassword::prompt_password("Введите парольную фразу: ")?;
    Ok(passphrase)
}

/// Выбрать накопитель: единственный берётся молча, из нескольких просят выбрать
pub fn select_device() -> Result<DeviceInfo> {
    let devices = device::list_removable_devices();

    if devices.is_empty() {
        return Err(SecureSignError::NoDeviceFound);
    }

    if devices.len() == 1 {
        return Ok(devices.into_iter().next().unwrap());
    }

    println!("{}", "Доступные накопители:".cyan().bold());
    println!();

    for (i, dev) in devices.iter().enumerate() {
        println!(
            "  {} {} - {}",
            format!("[{}]", i + 1).cyan(),
            dev.id.bold(),
            dev.mount_root.display()
        );
    }

    println!();
    print!("Выберите накопитель [1-{}]: ", devices.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| SecureSignError::Other("Неверный выбор".into()))?;

    if choice < 1 || choice > devices.len() {
        return Err(SecureSignError::Other("Неверный выбор".into()));
    }

    Ok(devices.into_iter().nth(choice - 1).unwrap())
}

/// Путь к приватному ключу: явный аргумент или поиск на накопителе
pub fn resolve_private_key(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let dev = select_device()?;
            crate::keystore::find_private_key(&dev.mount_root)
                .map(|found| found.path)
                .ok_or(SecureSignError::PrivateKeyNotFound)
        }
    }
}

/// Путь к публичному ключу: явный аргумент или поиск на накопителе
pub fn resolve_public_key(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let dev = select_device()?;
            crate::keystore::find_public_key(&dev.mount_root)
                .map(|found| found.path)
                .ok_or(SecureSignError::PublicKeyNotFound)
        }
    }
}
