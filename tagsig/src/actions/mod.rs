// tagsig/src/actions/mod.rs

//! Secure actions composed from the high-level transfer protocol.
//!
//! Every action first waits for the arbiter config and for the SRAM unlock,
//! then runs one or two HL commands. Protocol errors from the transfer layer
//! are returned unchanged; only the firmware codes that have a meaning for
//! a given action are mapped to dedicated variants.

pub mod keys;
pub mod password;
pub mod sign;

// Re-export the action functions at the module root so callers can use
// `crate::actions::sign(&mut tag, ..)`.
pub use keys::{erase_keys, generate_keys};
pub use password::change_password;
pub use sign::{read_public_key, sign, sign_with_public_key};

use crate::constants::MIN_PASSWORD_LEN;
use crate::device::Tag;
use crate::types::{Challenge, GeneratedKey, SignResult, SignedChallenge};
use crate::{Error, Result};

/// Wait until the tag is ready to take a new HL command.
pub(crate) fn prepare(tag: &mut Tag<'_>) -> Result<()> {
    tag.wait_until_config_ready()?;
    tag.wait_until_unlocked()
}

pub(crate) fn check_password(password: &str) -> Result<()> {
    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LEN {
        return Err(Error::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
            actual,
        });
    }
    Ok(())
}

impl Tag<'_> {
    /// Convenience wrapper for [`sign`].
    pub fn sign(&mut self, challenge: &Challenge) -> Result<SignResult> {
        sign::sign(self, challenge)
    }

    /// Convenience wrapper for [`sign_with_public_key`].
    pub fn sign_with_public_key(&mut self, challenge: &Challenge) -> Result<SignedChallenge> {
        sign::sign_with_public_key(self, challenge)
    }

    /// Convenience wrapper for [`read_public_key`].
    pub fn read_public_key(&mut self) -> Result<Vec<u8>> {
        sign::read_public_key(self)
    }

    /// Convenience wrapper for [`generate_keys`].
    pub fn generate_keys(&mut self, password: &str) -> Result<GeneratedKey> {
        keys::generate_keys(self, password)
    }

    /// Convenience wrapper for [`erase_keys`].
    pub fn erase_keys(&mut self, password: &str) -> Result<()> {
        keys::erase_keys(self, password)
    }

    /// Convenience wrapper for [`change_password`].
    pub fn change_password(&mut self, old_password: &str, new_password: &str) -> Result<()> {
        password::change_password(self, old_password, new_password)
    }
}
