//! Эвристика съёмных носителей для Linux

use std::path::Path;

/// Типичные точки монтирования съёмных устройств в Linux
pub fn is_removable_mount(mount: &Path) -> bool {
    let path_str = mount.to_string_lossy();

    path_str.starts_with("/media/")
        || path_str.starts_with("/mnt/")
        || path_str.starts_with("/run/media/")
}
