// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::OnceLock;

use secure_sign::crypto::{KdfParams, KeyPair};

/// Лёгкие параметры KDF, чтобы тесты не жгли 64 МБ на каждую деривацию
pub fn light_kdf() -> KdfParams {
    KdfParams {
        m_cost: 1024,
        t_cost: 1,
        parallelism: 1,
    }
}

/// Генерация RSA-2048 занимает секунды: одна пара на весь прогон
pub fn keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate(2048, 65537).unwrap())
}

/// Вторая, не связанная с первой, пара - для негативных проверок
pub fn unrelated_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate(2048, 65537).unwrap())
}
