// tagsig/src/crypto.rs
//! Symmetric primitives used by the erase and change-password handshakes.
//!
//! The firmware uses two different counter-mode constructions:
//!
//! * erase: one IV `00 00 00 00 || nonce`, incremented as a 128-bit
//!   big-endian counter ([`ctr_encrypt_single_iv`]);
//! * change password: block `i` uses IV `i (u32 BE) || nonce`
//!   ([`ctr_encrypt_streaming`]).
//!
//! They agree on the first block only. Keep them separate.

use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{KEY_LEN, NONCE_LEN};

const BLOCK_LEN: usize = 16;

/// 256-bit key derived from a user password. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial([u8; KEY_LEN]);

impl KeyMaterial {
    /// SHA-256 of the password's UTF-8 bytes.
    pub fn derive(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self(key)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}

fn keystream_xor(cipher: &Aes256, counter_block: [u8; BLOCK_LEN], chunk: &mut [u8]) {
    let mut block = GenericArray::from(counter_block);
    cipher.encrypt_block(&mut block);
    for (b, k) in chunk.iter_mut().zip(block.iter()) {
        *b ^= k;
    }
}

/// AES-256-CTR with IV `00 00 00 00 || nonce` and a full 128-bit
/// big-endian counter. Encryption and decryption are the same operation.
pub fn ctr_encrypt_single_iv(key: &KeyMaterial, nonce: &[u8; NONCE_LEN], data: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));

    let mut iv = [0u8; BLOCK_LEN];
    iv[4..].copy_from_slice(nonce);
    let mut counter = u128::from_be_bytes(iv);

    let mut out = data.to_vec();
    for chunk in out.chunks_mut(BLOCK_LEN) {
        keystream_xor(&cipher, counter.to_be_bytes(), chunk);
        counter = counter.wrapping_add(1);
    }
    out
}

/// Per-block counter construction: block `i` is combined with
/// `AES-256(key, i as u32 BE || nonce)`.
pub fn ctr_encrypt_streaming(key: &KeyMaterial, nonce: &[u8; NONCE_LEN], data: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));

    let mut out = data.to_vec();
    for (i, chunk) in out.chunks_mut(BLOCK_LEN).enumerate() {
        let mut iv = [0u8; BLOCK_LEN];
        iv[..4].copy_from_slice(&(i as u32).to_be_bytes());
        iv[4..].copy_from_slice(nonce);
        keystream_xor(&cipher, iv, chunk);
    }
    out
}
