//! Symmetric encryption of card numbers
//!
//! Card numbers are encrypted with AES-128-GCM under a fixed 16-byte
//! secret and stored as `base64(nonce || ciphertext)`, text-safe for an
//! opaque string column. The key is pulled through [`KeyProvider`] so a
//! future rotation scheme does not touch call sites.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes128Gcm, Key, Nonce,
};
use base64::{engine::general_purpose, Engine as _};

use crate::error::{Error, Result};

/// Required secret length in bytes (AES-128)
pub const KEY_LEN: usize = 16;

/// GCM nonce length in bytes
const NONCE_LEN: usize = 12;

/// Source of the card-number encryption key
///
/// Implementations own the key material; callers only ever see the
/// assembled [`CardCipher`].
pub trait KeyProvider: Send + Sync {
    fn card_key(&self) -> Result<[u8; KEY_LEN]>;
}

/// Key provider over a process-wide configured secret
pub struct StaticKeyProvider {
    secret: Vec<u8>,
}

impl StaticKeyProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn card_key(&self) -> Result<[u8; KEY_LEN]> {
        self.secret.as_slice().try_into().map_err(|_| {
            Error::Configuration(format!(
                "encryption secret must be exactly {KEY_LEN} bytes, got {}",
                self.secret.len()
            ))
        })
    }
}

/// Cipher for card primary account numbers
pub struct CardCipher {
    cipher: Aes128Gcm,
}

impl CardCipher {
    /// Build the cipher from a key provider
    ///
    /// Fails with a configuration error when the provided secret is not
    /// exactly 16 bytes; callers treat this as fatal at startup.
    pub fn new(provider: &dyn KeyProvider) -> Result<Self> {
        let key = provider.card_key()?;
        let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(&key));
        Ok(Self { cipher })
    }

    /// Encrypt a plaintext card number into its text-safe stored form
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes128Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| Error::Encryption("cipher operation failed".into()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&ciphertext);
        Ok(general_purpose::STANDARD.encode(out))
    }

    /// Decrypt a stored value back into the plaintext card number
    ///
    /// Malformed base64, truncated input, an authentication-tag mismatch
    /// (wrong key or tampered data), and invalid UTF-8 all surface as an
    /// encryption failure; nothing is silently swallowed.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::Encryption(format!("malformed ciphertext encoding: {e}")))?;
        if bytes.len() < NONCE_LEN {
            return Err(Error::Encryption("ciphertext too short".into()));
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::Encryption("cipher operation failed".into()))?;

        String::from_utf8(plaintext)
            .map_err(|_| Error::Encryption("decrypted data is not valid UTF-8".into()))
    }
}
