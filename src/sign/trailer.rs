//! Блок подписи, дописываемый в конец документа
//!
//! Формат v1 — ASCII-блок в духе PDF-словаря подписи; подписанный PDF
//! остаётся валидным PDF с дописанными данными:
//!
//! ```text
//! <содержимое документа>\n
//! <<
//! /Type /Sig
//! /Filter /SecureSign
//! /SubFilter /rsa.pss
//! /Digest /sha256
//! /Version 1
//! /ByteRange [0 N N 0]
//! /Contents <hex-подпись>
//! >>
//! ```
//!
//! `N` — длина покрытого содержимого в байтах. Блок обязан завершать файл;
//! при нескольких блоках (документ подписали повторно) берётся последний,
//! а всё до него считается покрытым содержимым.

use super::VerifyRejection;

/// Начало блока: перевод строки + открытие словаря
const MARKER: &[u8] = b"\n<<\n/Type /Sig\n";

const FILTER_LINE: &str = "/Filter /SecureSign";

/// Разобранный блок подписи; идентификаторы хранятся как есть,
/// их поддержку проверяет verifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTrailer {
    pub version: u32,
    pub subfilter: String,
    pub digest: String,
    pub covered_len: u64,
    pub signature: Vec<u8>,
}

/// Собрать байты блока для содержимого длиной `covered_len`
pub fn build(covered_len: u64, signature: &[u8]) -> Vec<u8> {
    let block = format!(
        "\n<<\n/Type /Sig\n{}\n/SubFilter /{}\n/Digest /{}\n/Version {}\n/ByteRange [0 {n} {n} 0]\n/Contents <{}>\n>>",
        FILTER_LINE,
        super::SUBFILTER_RSA_PSS,
        super::DIGEST_SHA256,
        super::TRAILER_VERSION,
        hex::encode(signature),
        n = covered_len,
    );
    block.into_bytes()
}

/// Отделить покрытое содержимое от последнего блока подписи
///
/// Возвращает (содержимое, байты блока без ведущего `\n`) или None, если
/// маркера в файле нет.
pub fn split_signed(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = rfind(data, MARKER)?;
    Some((&data[..start], &data[start + 1..]))
}

/// Позиция последнего вхождения needle в haystack
fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}

/// Разобрать байты блока (от `<<` до конца файла)
///
/// Разбор строгий: фиксированный порядок строк, никаких хвостовых байтов
/// после `>>`. Любое отклонение — `Malformed`.
pub fn parse(block: &[u8]) -> Result<SignatureTrailer, VerifyRejection> {
    let text = std::str::from_utf8(block)
        .map_err(|_| VerifyRejection::Malformed("блок не является ASCII".into()))?;

    let mut lines = text.split('\n');

    expect_line(&mut lines, "<<")?;
    expect_line(&mut lines, "/Type /Sig")?;
    expect_line(&mut lines, FILTER_LINE)?;

    let subfilter = name_field(&mut lines, "/SubFilter")?;
    let digest = name_field(&mut lines, "/Digest")?;

    let version_str = value_field(&mut lines, "/Version")?;
    let version: u32 = version_str
        .parse()
        .map_err(|_| VerifyRejection::Malformed("нечисловая версия".into()))?;

    let covered_len = parse_byte_range(&value_field(&mut lines, "/ByteRange")?)?;

    let contents = value_field(&mut lines, "/Contents")?;
    let signature_hex = contents
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| VerifyRejection::Malformed("поле /Contents без угловых скобок".into()))?;
    let signature = hex::decode(signature_hex)
        .map_err(|_| VerifyRejection::Malformed("подпись не в hex".into()))?;
    if signature.is_empty() {
        return Err(VerifyRejection::Malformed("пустая подпись".into()));
    }

    expect_line(&mut lines, ">>")?;
    if lines.next().is_some() {
        return Err(VerifyRejection::Malformed("байты после закрытия блока".into()));
    }

    Ok(SignatureTrailer {
        version,
        subfilter,
        digest,
        covered_len,
        signature,
    })
}

fn expect_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    expected: &str,
) -> Result<(), VerifyRejection> {
    match lines.next() {
        Some(line) if line == expected => Ok(()),
        Some(line) => Err(VerifyRejection::Malformed(format!(
            "ожидалось '{}', найдено '{}'",
            expected, line
        ))),
        None => Err(VerifyRejection::Malformed("блок оборван".into())),
    }
}

/// Строка вида `/Key value`; возвращает value
fn value_field<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    key: &str,
) -> Result<String, VerifyRejection> {
    let line = lines
        .next()
        .ok_or_else(|| VerifyRejection::Malformed("блок оборван".into()))?;
    line.strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(' '))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| VerifyRejection::Malformed(format!("нет поля {}", key)))
}

/// Строка вида `/Key /name`; возвращает name
fn name_field<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    key: &str,
) -> Result<String, VerifyRejection> {
    let value = value_field(lines, key)?;
    value
        .strip_prefix('/')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| VerifyRejection::Malformed(format!("поле {} не является именем", key)))
}

/// `[0 N N 0]` с совпадающими N
fn parse_byte_range(value: &str) -> Result<u64, VerifyRejection> {
    let inner = value
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| VerifyRejection::Malformed("ByteRange без скобок".into()))?;

    let parts: Vec<&str> = inner.split(' ').collect();
    if parts.len() != 4 || parts[0] != "0" || parts[3] != "0" {
        return Err(VerifyRejection::Malformed("ByteRange не вида [0 N N 0]".into()));
    }

    let n1: u64 = parts[1]
        .parse()
        .map_err(|_| VerifyRejection::Malformed("нечисловой ByteRange".into()))?;
    let n2: u64 = parts[2]
        .parse()
        .map_err(|_| VerifyRejection::Malformed("нечисловой ByteRange".into()))?;

    if n1 != n2 {
        return Err(VerifyRejection::Malformed("границы ByteRange расходятся".into()));
    }

    Ok(n1)
}
