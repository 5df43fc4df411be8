//! Список подключённых съёмных накопителей

use colored::Colorize;

use crate::device;
use crate::error::Result;

pub fn run(json: bool) -> Result<()> {
    let devices = device::list_removable_devices();

    if json {
        // структурированный вывод для GUI-коллаборатора
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("{}", "Съёмные накопители не обнаружены.".yellow());
        return Ok(());
    }

    println!("{}", "Съёмные накопители:".cyan().bold());
    println!();

    for dev in &devices {
        println!("  {} - {}", dev.id.bold(), dev.mount_root.display());
    }

    Ok(())
}
