//! Генерация пары ключей и запись на накопитель

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use zeroize::Zeroize;

use crate::crypto::{self, DEFAULT_PUBLIC_EXPONENT};
use crate::error::Result;
use crate::keystore;

use super::{prompt_new_passphrase, select_device};

pub fn run(bits: usize, dir: Option<PathBuf>) -> Result<()> {
    println!("{}", "=== Генерация ключей ===".cyan().bold());
    println!();

    // Куда писать: явная директория или выбранный накопитель
    let destination = match dir {
        Some(d) => d,
        None => {
            let dev = select_device()?;
            println!(
                "Накопитель: {} ({})",
                dev.id.bold(),
                dev.mount_root.display()
            );
            println!();
            dev.mount_root
        }
    };

    let mut passphrase = prompt_new_passphrase()?;
    println!();

    print!(
        "{}",
        format!("Генерация ключа RSA-{} (это займёт время)... ", bits).cyan()
    );
    std::io::stdout().flush()?;

    let pair = crypto::generate_keys(bits, DEFAULT_PUBLIC_EXPONENT)?;
    println!("{}", "готово".green());

    print!("{}", "Шифрование и запись на накопитель... ".cyan());
    std::io::stdout().flush()?;

    let save_result = keystore::save_keys(&pair, &passphrase, &destination);
    passphrase.zeroize();
    let (public_path, private_path) = save_result?;
    println!("{}", "готово".green());

    println!();
    println!("{}", "=== Ключи созданы ===".green().bold());
    println!();
    println!("Публичный ключ:  {}", public_path.display().to_string().cyan());
    println!("Приватный ключ:  {}", private_path.display().to_string().cyan());
    println!("Отпечаток:       {}", pair.fingerprint()?);
    println!();
    println!(
        "Для подписи документа выполните: {}",
        "secure-sign sign <файл>".cyan()
    );

    Ok(())
}
