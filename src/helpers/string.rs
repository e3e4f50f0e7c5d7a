//! Token sealing for client-side storage
//!
//! Bearer tokens are persisted AES-256-GCM encrypted and base64 encoded, as
//! `[nonce (12 bytes)][ciphertext]`.

use crate::error::Error;
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

type Result<T, E = Error> = std::result::Result<T, E>;

const NONCE_LEN: usize = 12;

/// Local sealing key. Protects tokens at rest against casual reads only.
const SEAL_KEY: &[u8; 32] = b"rentdesk-session-seal-key-v1::32";

/// Encrypt `plain_text`, returning base64 of nonce + ciphertext
pub fn encrypt(plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(SEAL_KEY.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Invalid {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Reverse of [`encrypt`]
pub fn decrypt(cipher_text: &str) -> Result<String> {
    let data = BASE64.decode(cipher_text.trim()).map_err(|e| Error::Invalid {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < NONCE_LEN {
        return Err(Error::Invalid {
            message: "Ciphertext too short".to_string(),
        });
    }

    let cipher = Aes256Gcm::new(SEAL_KEY.into());
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

    let plaintext = cipher.decrypt(nonce, ciphertext).map_err(|e| Error::Invalid {
        message: format!("Decryption failed: {e}"),
    })?;

    String::from_utf8(plaintext).map_err(|e| Error::Invalid {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

/// Mask a secret for logs: first four characters, then `***`
pub fn mask_secret(secret: &str) -> String {
    let head: String = secret.chars().take(4).collect();
    format!("{head}***")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips() {
        let token = "eyJhbGciOiJIUzI1NiJ9.payload.sig";
        let sealed = encrypt(token).expect("encrypt");
        assert_ne!(sealed, token);
        assert_eq!(decrypt(&sealed).expect("decrypt"), token);
    }

    #[test]
    fn nonce_varies_per_call() {
        let a = encrypt("same").expect("encrypt");
        let b = encrypt("same").expect("encrypt");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decrypt("not_valid_base64!!!").is_err());
        assert!(decrypt("AQIDBA==").is_err());
    }

    #[test]
    fn masks_secret() {
        assert_eq!(mask_secret("abcdefgh"), "abcd***");
        assert_eq!(mask_secret("ab"), "ab***");
    }
}
