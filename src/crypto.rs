//! Encryption at rest for journal payloads.
//!
//! Every journal entry is stored as a single opaque printable string:
//! base64(nonce || AES-256-GCM ciphertext). The key is derived from a shared
//! passphrase with a single SHA-256 pass — no per-record salt, so any
//! installation configured with the same passphrase can read the store.
//! The passphrase is configurable precisely so deployments can move off the
//! historical shared default without touching this module.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::Engine;
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

pub struct EntryCipher {
    key: [u8; 32],
}

impl EntryCipher {
    pub fn new(passphrase: &str) -> Self {
        let mut key = [0u8; 32];
        key.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));
        Self { key }
    }

    /// Serialize `record` to JSON and encrypt it under a fresh random nonce.
    pub fn seal<T: Serialize>(&self, record: &T) -> anyhow::Result<String> {
        let plaintext = serde_json::to_vec(record)?;

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| anyhow::anyhow!("cipher init failed: {e}"))?;

        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_slice())
            .map_err(|_| anyhow::anyhow!("entry encryption failed"))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(base64::engine::general_purpose::STANDARD.encode(blob))
    }

    /// Decrypt and parse a sealed payload.
    ///
    /// Returns `None` on any failure — bad base64, truncated input, wrong
    /// key, tampered ciphertext, or unparseable plaintext. Callers treat an
    /// unreadable record as absent and skip it from every aggregate.
    pub fn open<T: DeserializeOwned>(&self, sealed: &str) -> Option<T> {
        let blob = base64::engine::general_purpose::STANDARD
            .decode(sealed)
            .ok()?;
        if blob.len() <= NONCE_LEN {
            return None;
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&self.key).ok()?;
        let plaintext = cipher.decrypt(Nonce::from_slice(nonce), ciphertext).ok()?;

        serde_json::from_slice(&plaintext).ok()
    }
}

impl std::fmt::Debug for EntryCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        text: String,
        mood: String,
        date: String,
    }

    fn sample() -> Sample {
        Sample {
            text: "slept badly, still went for a run".into(),
            mood: "tired".into(),
            date: "2026-08-06T09:15:00Z".into(),
        }
    }

    #[test]
    fn seal_open_roundtrip() {
        let cipher = EntryCipher::new("test-passphrase");
        let sealed = cipher.seal(&sample()).unwrap();
        let opened: Sample = cipher.open(&sealed).unwrap();
        assert_eq!(opened, sample());
    }

    #[test]
    fn sealed_payload_is_printable_and_opaque() {
        let cipher = EntryCipher::new("test-passphrase");
        let sealed = cipher.seal(&sample()).unwrap();
        assert!(sealed.is_ascii());
        assert!(!sealed.contains("slept badly"));
    }

    #[test]
    fn open_garbage_returns_none() {
        let cipher = EntryCipher::new("test-passphrase");
        assert_eq!(cipher.open::<Sample>("not even base64 !!"), None);
        assert_eq!(cipher.open::<Sample>(""), None);
        assert_eq!(cipher.open::<Sample>("AAAA"), None); // shorter than a nonce
    }

    #[test]
    fn open_with_wrong_key_returns_none() {
        let cipher = EntryCipher::new("test-passphrase");
        let other = EntryCipher::new("different-passphrase");
        let sealed = cipher.seal(&sample()).unwrap();
        assert_eq!(other.open::<Sample>(&sealed), None);
    }

    #[test]
    fn open_tampered_returns_none() {
        let cipher = EntryCipher::new("test-passphrase");
        let sealed = cipher.seal(&sample()).unwrap();
        let mut blob = base64::engine::general_purpose::STANDARD
            .decode(&sealed)
            .unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xff;
        let tampered = base64::engine::general_purpose::STANDARD.encode(blob);
        assert_eq!(cipher.open::<Sample>(&tampered), None);
    }

    #[test]
    fn open_wrong_shape_returns_none() {
        let cipher = EntryCipher::new("test-passphrase");
        let sealed = cipher.seal(&vec![1, 2, 3]).unwrap();
        assert_eq!(cipher.open::<Sample>(&sealed), None);
    }

    #[test]
    fn same_record_encrypts_differently() {
        // Nonces are random per seal, so identical plaintexts must not
        // produce identical blobs.
        let cipher = EntryCipher::new("test-passphrase");
        let a = cipher.seal(&sample()).unwrap();
        let b = cipher.seal(&sample()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_does_not_leak_key() {
        let cipher = EntryCipher::new("test-passphrase");
        assert!(format!("{cipher:?}").contains("REDACTED"));
    }
}
