//! Эвристика съёмных носителей для macOS

use std::path::Path;

/// Съёмные тома на macOS монтируются под /Volumes
pub fn is_removable_mount(mount: &Path) -> bool {
    let path_str = mount.to_string_lossy();
    path_str.starts_with("/Volumes/")
}
