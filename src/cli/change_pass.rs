//! Смена парольной фразы приватного ключа

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use zeroize::Zeroize;

use crate::error::Result;
use crate::keystore::storage::rotate_passphrase;

use super::{prompt_new_passphrase, prompt_passphrase, resolve_private_key};

pub fn run(key: Option<PathBuf>) -> Result<()> {
    println!("{}", "=== Смена парольной фразы ===".cyan().bold());
    println!();

    let key_path = resolve_private_key(key)?;

    println!("Введите текущую парольную фразу:");
    let mut old_passphrase = prompt_passphrase()?;

    println!();
    let mut new_passphrase = prompt_new_passphrase()?;
    println!();

    print!("{}", "Перешифровка ключа... ".cyan());
    std::io::stdout().flush()?;

    let result = rotate_passphrase(&key_path, &old_passphrase, &new_passphrase);
    old_passphrase.zeroize();
    new_passphrase.zeroize();

    match result {
        Ok(()) => {
            println!("{}", "готово".green());
            println!();
            println!("{}", "Парольная фраза успешно изменена!".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "ошибка".red());
            Err(e)
        }
    }
}
