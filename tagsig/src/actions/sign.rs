// tagsig/src/actions/sign.rs

use log::{debug, info};

use crate::actions::prepare;
use crate::constants::OP_PUBLIC_KEY;
use crate::constants::OP_SIGN;
use crate::device::Tag;
use crate::types::{Challenge, SignResult, SignedChallenge};
use crate::utils::bytes_to_hex;
use crate::Result;

/// Ask the secure element to sign `challenge`.
///
/// The signature is returned as the firmware produces it; checking it
/// against a public key is left to the caller (see `SignResult::verify_with`).
pub fn sign(tag: &mut Tag<'_>, challenge: &Challenge) -> Result<SignResult> {
    prepare(tag)?;

    let mut cmd = Vec::with_capacity(1 + challenge.len());
    cmd.push(OP_SIGN);
    cmd.extend_from_slice(challenge.as_bytes());

    let signature = tag.execute_streaming(&cmd)?;
    info!("signed challenge {}", challenge.to_hex());
    debug!("signature [{}]", bytes_to_hex(&signature));

    Ok(SignResult {
        challenge: *challenge,
        signature,
    })
}

/// Read the public key of the tag's signing key pair.
pub fn read_public_key(tag: &mut Tag<'_>) -> Result<Vec<u8>> {
    prepare(tag)?;
    let key = tag.execute_streaming(&[OP_PUBLIC_KEY])?;
    debug!("public key [{}]", bytes_to_hex(&key));
    Ok(key)
}

/// Read the public key, then sign `challenge`, within one session.
pub fn sign_with_public_key(tag: &mut Tag<'_>, challenge: &Challenge) -> Result<SignedChallenge> {
    let public_key = read_public_key(tag)?;
    let result = sign(tag, challenge)?;
    Ok(SignedChallenge { public_key, result })
}
