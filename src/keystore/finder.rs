//! Поиск файлов ключей на накопителе
//!
//! Ищет по расширению (`.pk` для приватного, `.pubk` для публичного) на
//! ограниченной глубине от корня. Отсутствие ключа — ожидаемый исход, а не
//! ошибка, поэтому результат — `Option`.
//!
//! Выбор при нескольких кандидатах детерминирован: лексикографически
//! первый полный путь. Молчаливая недетерминированность здесь была бы
//! дефектом корректности — пользователь подписывал бы то одним ключом,
//! то другим.

use std::fs;
use std::path::{Path, PathBuf};

use super::{PRIVATE_KEY_EXT, PUBLIC_KEY_EXT};

/// Максимальная глубина поиска от корня накопителя
const MAX_SEARCH_DEPTH: usize = 4;

/// Тип найденного файла ключа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

/// Ссылка на найденный файл ключа; живёт только в рамках одного поиска
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFileReference {
    pub path: PathBuf,
    #[allow(dead_code)]
    pub kind: KeyKind,
}

/// Найти файл приватного ключа (`*.pk`) под корнем
pub fn find_private_key(root: &Path) -> Option<KeyFileReference> {
    find_key(root, PRIVATE_KEY_EXT).map(|path| KeyFileReference {
        path,
        kind: KeyKind::Private,
    })
}

/// Найти файл публичного ключа (`*.pubk`) под корнем
pub fn find_public_key(root: &Path) -> Option<KeyFileReference> {
    find_key(root, PUBLIC_KEY_EXT).map(|path| KeyFileReference {
        path,
        kind: KeyKind::Public,
    })
}

fn find_key(root: &Path, extension: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    collect_candidates(root, extension, 0, &mut candidates);
    candidates.sort();
    candidates.into_iter().next()
}

fn collect_candidates(dir: &Path, extension: &str, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > MAX_SEARCH_DEPTH {
        return;
    }

    // недоступная директория — просто нет кандидатов
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        // симлинки не разыменовываем: ключ должен лежать на самом накопителе
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }

        if file_type.is_dir() {
            collect_candidates(&path, extension, depth + 1, out);
        } else if has_extension(&path, extension) {
            out.push(path);
        }
    }
}

/// Сравнение расширения без учёта регистра: FAT-тома любят ВЕРХНИЙ РЕГИСТР
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"stub").unwrap();
    }

    #[test]
    fn test_finds_keys_in_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("keys/backup");
        fs::create_dir_all(&nested).unwrap();
        touch(&nested.join("encrypted_private_key.pk"));
        touch(&dir.path().join("public_key.pubk"));

        let private = find_private_key(dir.path()).unwrap();
        assert_eq!(private.kind, KeyKind::Private);
        assert!(private.path.ends_with("keys/backup/encrypted_private_key.pk"));

        let public = find_public_key(dir.path()).unwrap();
        assert_eq!(public.kind, KeyKind::Public);
        assert!(public.path.ends_with("public_key.pubk"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("unrelated.txt"));

        assert!(find_private_key(dir.path()).is_none());
        assert!(find_public_key(dir.path()).is_none());
    }

    #[test]
    fn test_unreachable_root_is_none() {
        let missing = Path::new("/nonexistent/secure-sign-test-root");
        assert!(find_private_key(missing).is_none());
    }

    #[test]
    fn test_multiple_candidates_pick_lexicographically_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        touch(&dir.path().join("b/key.pk"));
        touch(&dir.path().join("a/key.pk"));
        touch(&dir.path().join("zzz.pk"));

        let found = find_private_key(dir.path()).unwrap();
        assert!(found.path.ends_with("a/key.pk"));

        // повторный вызов на неизменном дереве даёт тот же результат
        assert_eq!(find_private_key(dir.path()).unwrap(), found);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("KEY.PK"));

        assert!(find_private_key(dir.path()).is_some());
    }

    #[test]
    fn test_depth_bound_respected() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("1/2/3/4/5/6");
        fs::create_dir_all(&deep).unwrap();
        touch(&deep.join("key.pk"));

        assert!(find_private_key(dir.path()).is_none());
    }
}
