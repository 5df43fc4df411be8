//! Проверка подписи документа

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::error::Result;
use crate::keystore::storage::load_public_key;
use crate::sign::verify_signature;

use super::resolve_public_key;

/// Проверка всегда завершается кодом 0: результат — значение, а не ошибка
/// процесса. GUI-коллаборатор читает JSON.
pub fn run(document: PathBuf, key: Option<PathBuf>, json: bool) -> Result<()> {
    let key_path = resolve_public_key(key)?;
    let public_key = load_public_key(&key_path)?;

    let signed_bytes = fs::read(&document)?;
    let result = verify_signature(&signed_bytes, &public_key);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.valid {
        println!("{}", "Подпись действительна.".green().bold());
    } else {
        println!("{}", "Подпись недействительна!".red().bold());
        if let Some(reason) = &result.reason {
            println!("Причина: {}", reason);
        }
    }

    Ok(())
}
