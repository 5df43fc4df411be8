//! Подпись и проверка документов
//!
//! Документ подписывается так: SHA-256 от содержимого, подпись RSA-PSS по
//! дайджесту, затем к документу дописывается текстовый блок подписи в духе
//! PDF-словаря (см. `trailer`). Идентификаторы алгоритмов записаны в блоке,
//! поэтому проверка самодостаточна.

pub mod signer;
pub mod trailer;
pub mod verifier;

use serde::Serialize;

pub use signer::sign_document;
pub use verifier::verify_signature;

/// Версия формата блока подписи
pub const TRAILER_VERSION: u32 = 1;

/// Идентификатор схемы подписи в поле /SubFilter
pub const SUBFILTER_RSA_PSS: &str = "rsa.pss";

/// Идентификатор хеша в поле /Digest
pub const DIGEST_SHA256: &str = "sha256";

/// Длина соли PSS в байтах; соль тянется из OsRng при каждой подписи
pub const PSS_SALT_LEN: usize = 32;

/// Подписанный документ: содержимое и подпись до сериализации в файл
///
/// Подпись вычислена по дайджесту одного лишь содержимого — байты самого
/// блока подписи в неё не входят.
pub struct SignedDocument {
    pub content: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedDocument {
    /// Итоговые байты файла: содержимое + блок подписи
    pub fn to_bytes(&self) -> Vec<u8> {
        let block = trailer::build(self.content.len() as u64, &self.signature);
        let mut out = Vec::with_capacity(self.content.len() + block.len());
        out.extend_from_slice(&self.content);
        out.extend_from_slice(&block);
        out
    }
}

/// Почему проверка отклонила документ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum VerifyRejection {
    /// Блок подписи не найден
    NotSigned,
    /// Блок подписи повреждён или не соответствует формату
    Malformed(String),
    /// Версия блока подписи неизвестна этой сборке
    UnsupportedVersion(u32),
    /// Неизвестный идентификатор схемы или хеша
    UnsupportedAlgorithm(String),
    /// Подпись не сходится: содержимое изменено или ключ чужой
    SignatureMismatch,
}

impl std::fmt::Display for VerifyRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSigned => write!(f, "в файле нет блока подписи"),
            Self::Malformed(detail) => write!(f, "блок подписи повреждён: {}", detail),
            Self::UnsupportedVersion(v) => {
                write!(f, "неподдерживаемая версия блока подписи: {}", v)
            }
            Self::UnsupportedAlgorithm(id) => {
                write!(f, "неподдерживаемый алгоритм: {}", id)
            }
            Self::SignatureMismatch => {
                write!(f, "подпись недействительна: файл изменён или ключ не тот")
            }
        }
    }
}

/// Результат проверки: всегда значение, никогда не исключение
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub reason: Option<VerifyRejection>,
}

impl VerificationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: VerifyRejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}
