// tagsig/src/types.rs

use derive_more::{AsRef, Deref, From};
use rand::RngCore;

use crate::Error;
use crate::constants::{CHALLENGE_LEN, NONCE_LEN};
use crate::protocol::parser::array_at;

/// Sign challenge - Newtype Pattern (32 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref, AsRef, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Challenge([u8; CHALLENGE_LEN]);

impl Challenge {
    pub fn from_bytes(bytes: [u8; CHALLENGE_LEN]) -> Self {
        Self(bytes)
    }

    /// Fresh challenge from the thread-local CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; CHALLENGE_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CHALLENGE_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for Challenge {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != CHALLENGE_LEN {
            return Err(Error::TruncatedReply {
                expected: CHALLENGE_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(array_at(bytes, 0)?))
    }
}

/// Nonce + blob returned by the firmware when an erase or change-password
/// handshake starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceChallenge {
    pub nonce: [u8; NONCE_LEN],
    pub blob: Vec<u8>,
}

impl DeviceChallenge {
    /// Split a response into the 12-byte nonce and the trailing blob.
    pub fn parse(response: &[u8]) -> crate::Result<Self> {
        let nonce = array_at(response, 0)?;
        Ok(Self {
            nonce,
            blob: response[NONCE_LEN..].to_vec(),
        })
    }
}

/// Result of a sign action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignResult {
    pub challenge: Challenge,
    pub signature: Vec<u8>,
}

impl SignResult {
    /// `r` half of a fixed-size 64-byte signature.
    pub fn r(&self) -> Option<&[u8]> {
        (self.signature.len() == 64).then(|| &self.signature[..32])
    }

    /// `s` half of a fixed-size 64-byte signature.
    pub fn s(&self) -> Option<&[u8]> {
        (self.signature.len() == 64).then(|| &self.signature[32..])
    }

    /// Run a caller-supplied verifier against `public_key`.
    pub fn verify_with<V: SignatureVerifier + ?Sized>(&self, verifier: &V, public_key: &[u8]) -> bool {
        verifier.verify(public_key, self.challenge.as_bytes(), &self.signature)
    }
}

/// A signature together with the public key read in the same session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedChallenge {
    pub public_key: Vec<u8>,
    pub result: SignResult,
}

impl SignedChallenge {
    /// Verify the signature against the key it was returned with.
    pub fn verify_with<V: SignatureVerifier + ?Sized>(&self, verifier: &V) -> bool {
        self.result.verify_with(verifier, &self.public_key)
    }
}

/// Seam for the asymmetric verification that happens outside this crate.
pub trait SignatureVerifier {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// Result of a key generation action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedKey {
    pub public_key: Vec<u8>,
}

impl GeneratedKey {
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.public_key)
    }
}
