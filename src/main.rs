use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod crypto;
mod device;
mod error;
mod keystore;
mod sign;

use error::Result;

#[derive(Parser)]
#[command(name = "secure-sign")]
#[command(author = "Oleg")]
#[command(version = "0.1.0")]
#[command(about = "Подпись PDF-документов ключом с USB-накопителя", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Сгенерировать пару ключей и записать на накопитель
    Keygen {
        /// Размер модуля RSA в битах
        #[arg(long, default_value_t = crypto::DEFAULT_KEY_BITS)]
        bits: usize,

        /// Директория назначения (по умолчанию - выбранный накопитель)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Показать подключённые съёмные накопители
    Devices {
        /// Вывод в JSON для внешних программ
        #[arg(long)]
        json: bool,
    },

    /// Подписать документ приватным ключом с накопителя
    Sign {
        /// Файл документа
        document: PathBuf,

        /// Куда записать подписанный файл (по умолчанию <документ>.signed)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Явный путь к файлу приватного ключа
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Проверить подпись документа
    Verify {
        /// Подписанный файл
        document: PathBuf,

        /// Явный путь к файлу публичного ключа
        #[arg(long)]
        key: Option<PathBuf>,

        /// Вывод результата в JSON
        #[arg(long)]
        json: bool,
    },

    /// Сменить парольную фразу приватного ключа
    ChangePass {
        /// Явный путь к файлу приватного ключа
        #[arg(long)]
        key: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Ошибка:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Keygen { bits, dir } => cli::keygen::run(bits, dir),
        Commands::Devices { json } => cli::devices::run(json),
        Commands::Sign {
            document,
            output,
            key,
        } => cli::sign::run(document, output, key),
        Commands::Verify {
            document,
            key,
            json,
        } => cli::verify::run(document, key, json),
        Commands::ChangePass { key } => cli::change_pass::run(key),
    }
}
