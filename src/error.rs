use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecureSignError>;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum SecureSignError {
    #[error("Неподдерживаемый размер модуля RSA: {0} бит (поддерживается 2048-8192)")]
    UnsupportedKeySize(usize),

    #[error("Неподдерживаемая открытая экспонента: {0} (должна быть нечётной и >= 3)")]
    UnsupportedExponent(u64),

    #[error("Парольная фраза пуста")]
    EmptyPassphrase,

    #[error("Парольная фраза слишком короткая (минимум 12 символов)")]
    PassphraseTooShort,

    #[error("Парольные фразы не совпадают")]
    PassphraseMismatch,

    #[error("Ошибка расшифровки: данные повреждены или пароль неверный")]
    DecryptionFailed,

    #[error("Ошибка шифрования: {0}")]
    EncryptionFailed(String),

    #[error("Файл ключа повреждён: {0}")]
    InvalidEnvelope(String),

    #[error("Неподдерживаемая версия файла ключа: {0}")]
    UnsupportedEnvelopeVersion(u32),

    #[error("Неверный формат ключа: {0}")]
    InvalidKeyFormat(String),

    #[error("Ошибка кодирования ключа: {0}")]
    KeyEncodingFailed(String),

    #[error("Ошибка генерации ключа: {0}")]
    KeyGenerationFailed(String),

    #[error("Документ пуст - нечего подписывать")]
    EmptyDocument,

    #[error("Ошибка подписи: {0}")]
    SigningFailed(String),

    #[error("USB-накопитель не найден. Подключите накопитель и повторите попытку.")]
    NoDeviceFound,

    #[error("Приватный ключ не найден на накопителе")]
    PrivateKeyNotFound,

    #[error("Публичный ключ не найден на накопителе")]
    PublicKeyNotFound,

    #[error("Операция отменена пользователем")]
    Cancelled,

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
