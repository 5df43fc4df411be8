//! Эвристика съёмных носителей для Windows

use std::path::Path;

/// Спросить у ОС тип диска по букве (DRIVE_REMOVABLE)
#[cfg(windows)]
pub fn is_removable_mount(mount: &Path) -> bool {
    use windows::Win32::Storage::FileSystem::GetDriveTypeW;

    // DRIVE_REMOVABLE = 2
    const DRIVE_REMOVABLE: u32 = 2;

    let drive_str = mount.to_string_lossy();
    if drive_str.len() >= 2 {
        let drive_root: Vec<u16> = format!("{}\\", &drive_str[..2])
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();

        unsafe {
            let drive_type = GetDriveTypeW(windows::core::PCWSTR(drive_root.as_ptr()));
            return drive_type == DRIVE_REMOVABLE;
        }
    }
    false
}

#[cfg(not(windows))]
pub fn is_removable_mount(_mount: &Path) -> bool {
    false
}
