//! Payload sealing for the hybrid encryption path: the payload key is
//! derived from the two serialized pairing values, the payload itself is
//! sealed under AES-256-GCM with a fresh nonce prepended to the sealed
//! bytes.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::{RngCore, SeedableRng};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

use crate::error::WfibeErr;

pub const SYMMETRIC_KEY_LENGTH: usize = 32;
pub const NONCE_LENGTH: usize = 12;

/// Derive the payload key from the serialized pairing values K1 and K2.
#[must_use]
pub fn derive_key(k1_bytes: &[u8], k2_bytes: &[u8]) -> [u8; SYMMETRIC_KEY_LENGTH] {
    let mut key = [0_u8; SYMMETRIC_KEY_LENGTH];
    let bytes = Shake256::default()
        .chain(k1_bytes)
        .chain(k2_bytes)
        .finalize_xof()
        .read_boxed(SYMMETRIC_KEY_LENGTH)
        .into_vec();
    key.copy_from_slice(&bytes);
    key
}

/// Seal a payload; the fresh nonce is prepended to the sealed bytes.
pub fn seal(key: &[u8; SYMMETRIC_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, WfibeErr> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let mut nonce = [0_u8; NONCE_LENGTH];
    rand_hc::Hc128Rng::from_entropy().fill_bytes(&mut nonce);
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| WfibeErr::SymmetricEncryption(e.to_string()))?;
    let mut out = Vec::with_capacity(NONCE_LENGTH + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Open a sealed payload produced by `seal`. Fails on a wrong key or any
/// tampering of the sealed bytes.
pub fn open(key: &[u8; SYMMETRIC_KEY_LENGTH], sealed: &[u8]) -> Result<Vec<u8>, WfibeErr> {
    if sealed.len() < NONCE_LENGTH {
        return Err(WfibeErr::InvalidSize(format!(
            "sealed payload too short ({} bytes, expected at least {} bytes)",
            sealed.len(),
            NONCE_LENGTH
        )));
    }
    let (nonce, body) = sealed.split_at(NONCE_LENGTH);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), body)
        .map_err(|e| WfibeErr::SymmetricDecryption(e.to_string()))
}
