//! Подпись документа ключом с накопителя

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use zeroize::Zeroize;

use crate::error::Result;
use crate::keystore::storage::{load_private_key, write_atomic};
use crate::sign::sign_document;

use super::{prompt_passphrase, resolve_private_key};

pub fn run(document: PathBuf, output: Option<PathBuf>, key: Option<PathBuf>) -> Result<()> {
    let key_path = resolve_private_key(key)?;

    let mut passphrase = prompt_passphrase()?;

    print!("{}", "Расшифровка приватного ключа... ".cyan());
    std::io::stdout().flush()?;

    let private_key = match load_private_key(&key_path, &passphrase) {
        Ok(k) => {
            passphrase.zeroize();
            k
        }
        Err(e) => {
            passphrase.zeroize();
            println!("{}", "ошибка".red());
            return Err(e);
        }
    };
    println!("{}", "готово".green());

    let data = fs::read(&document)?;

    print!("{}", "Подпись документа... ".cyan());
    std::io::stdout().flush()?;

    let signed = sign_document(&data, &private_key)?;
    // ключ больше не нужен; RsaPrivateKey зануляется при drop
    drop(private_key);
    println!("{}", "готово".green());

    let output_path = output.unwrap_or_else(|| {
        let mut name = document.as_os_str().to_owned();
        name.push(".signed");
        PathBuf::from(name)
    });

    write_atomic(&output_path, &signed.to_bytes())?;

    println!();
    println!(
        "{} {}",
        "Документ подписан:".green().bold(),
        output_path.display()
    );

    Ok(())
}
