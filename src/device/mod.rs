//! Обнаружение съёмных накопителей
//!
//! Снимок текущего состояния, не живая подписка: GUI/CLI сами решают, как
//! часто опрашивать. Том считается съёмным, если так говорит ОС
//! (`is_removable`) или если точка монтирования похожа на точку съёмного
//! носителя для данной платформы.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

use std::path::{Path, PathBuf};

use serde::Serialize;
use sysinfo::Disks;

/// Съёмный том: идентификатор и корень файловой системы
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Метка/имя тома (или путь, если имени нет)
    pub id: String,
    /// Корень, с которого начинает поиск KeyFinder
    pub mount_root: PathBuf,
}

/// Платформенная эвристика по точке монтирования
fn is_removable_mount(mount: &Path) -> bool {
    #[cfg(target_os = "linux")]
    {
        linux::is_removable_mount(mount)
    }

    #[cfg(target_os = "macos")]
    {
        macos::is_removable_mount(mount)
    }

    #[cfg(target_os = "windows")]
    {
        windows::is_removable_mount(mount)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let _ = mount;
        false
    }
}

/// Перечислить подключённые съёмные накопители
///
/// Никогда не ошибается: если накопителей нет, список пуст. Повторные
/// вызовы при неизменном железе дают одинаковый результат (список
/// отсортирован по корню и дедуплицирован).
pub fn list_removable_devices() -> Vec<DeviceInfo> {
    let disks = Disks::new_with_refreshed_list();

    let mut devices: Vec<DeviceInfo> = disks
        .list()
        .iter()
        .filter(|disk| disk.is_removable() || is_removable_mount(disk.mount_point()))
        .map(|disk| {
            let name = disk.name().to_string_lossy();
            let id = if name.is_empty() {
                disk.mount_point().to_string_lossy().into_owned()
            } else {
                name.into_owned()
            };
            DeviceInfo {
                id,
                mount_root: disk.mount_point().to_path_buf(),
            }
        })
        .collect();

    devices.sort_by(|a, b| a.mount_root.cmp(&b.mount_root));
    devices.dedup_by(|a, b| a.mount_root == b.mount_root);
    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_never_panics_and_is_idempotent() {
        // на машине без накопителей список просто пуст
        let first = list_removable_devices();
        let second = list_removable_devices();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_is_sorted_and_unique() {
        let devices = list_removable_devices();
        for pair in devices.windows(2) {
            assert!(pair[0].mount_root < pair[1].mount_root);
        }
    }
}
