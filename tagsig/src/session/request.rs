// tagsig/src/session/request.rs

use crate::device::Tag;
use crate::types::{Challenge, GeneratedKey, SignResult, SignedChallenge};
use crate::Result;

/// The action the orchestrator should run for the next tap.
#[derive(Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Sign {
        challenge: Challenge,
    },
    /// Read the public key and sign in the same tap.
    SignWithPublicKey {
        challenge: Challenge,
    },
    ReadPublicKey,
    GenerateKeys {
        password: String,
    },
    EraseKeys {
        password: String,
    },
    ChangePassword {
        old_password: String,
        new_password: String,
    },
}

impl ActionRequest {
    /// Sign a freshly generated random challenge.
    pub fn sign_random() -> Self {
        Self::Sign {
            challenge: Challenge::random(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sign { .. } => "sign",
            Self::SignWithPublicKey { .. } => "sign with public key",
            Self::ReadPublicKey => "read public key",
            Self::GenerateKeys { .. } => "generate keys",
            Self::EraseKeys { .. } => "erase keys",
            Self::ChangePassword { .. } => "change password",
        }
    }

    /// Run the action against a tag already in session.
    pub fn execute(&self, tag: &mut Tag<'_>) -> Result<ActionOutcome> {
        Ok(match self {
            Self::Sign { challenge } => ActionOutcome::Signed(tag.sign(challenge)?),
            Self::SignWithPublicKey { challenge } => {
                ActionOutcome::SignedWithKey(tag.sign_with_public_key(challenge)?)
            }
            Self::ReadPublicKey => ActionOutcome::PublicKey(tag.read_public_key()?),
            Self::GenerateKeys { password } => {
                ActionOutcome::KeysGenerated(tag.generate_keys(password)?)
            }
            Self::EraseKeys { password } => {
                tag.erase_keys(password)?;
                ActionOutcome::KeysErased
            }
            Self::ChangePassword {
                old_password,
                new_password,
            } => {
                tag.change_password(old_password, new_password)?;
                ActionOutcome::PasswordChanged
            }
        })
    }
}

// Passwords never reach logs.
impl std::fmt::Debug for ActionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sign { challenge } => f
                .debug_struct("Sign")
                .field("challenge", &challenge.to_hex())
                .finish(),
            Self::SignWithPublicKey { challenge } => f
                .debug_struct("SignWithPublicKey")
                .field("challenge", &challenge.to_hex())
                .finish(),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Result of a completed [`ActionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Signed(SignResult),
    SignedWithKey(SignedChallenge),
    PublicKey(Vec<u8>),
    KeysGenerated(GeneratedKey),
    KeysErased,
    PasswordChanged,
}
