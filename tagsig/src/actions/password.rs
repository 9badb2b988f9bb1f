// tagsig/src/actions/password.rs

use log::{debug, info};
use zeroize::Zeroize;

use crate::actions::{check_password, prepare};
use crate::constants::OP_CHANGE_PASSWORD;
use crate::crypto::{KeyMaterial, ctr_encrypt_streaming};
use crate::device::Tag;
use crate::protocol::crc32_le;
use crate::types::DeviceChallenge;
use crate::{DeviceErrorCode, Error, Result};

/// Length of the block carrying the new key's checksum
const CHECK_BLOCK_LEN: usize = 16;

/// Build `blob || new_key || crc32(new_key) LE || zero padding`.
pub(crate) fn change_password_plaintext(blob: &[u8], new_key: &KeyMaterial) -> Vec<u8> {
    let mut check = [0u8; CHECK_BLOCK_LEN];
    check[..4].copy_from_slice(&crc32_le(new_key.as_bytes()));

    let mut pt = Vec::with_capacity(blob.len() + new_key.as_bytes().len() + CHECK_BLOCK_LEN);
    pt.extend_from_slice(blob);
    pt.extend_from_slice(new_key.as_bytes());
    pt.extend_from_slice(&check);
    pt
}

/// Replace the password protecting the key pair.
///
/// The response to the tag's challenge is encrypted with the per-block
/// counter construction keyed by the old password.
pub fn change_password(tag: &mut Tag<'_>, old_password: &str, new_password: &str) -> Result<()> {
    check_password(new_password)?;
    prepare(tag)?;

    let challenge = DeviceChallenge::parse(&tag.execute(&[OP_CHANGE_PASSWORD])?)?;
    debug!("change password challenge: {} byte blob", challenge.blob.len());

    let old_key = KeyMaterial::derive(old_password);
    let new_key = KeyMaterial::derive(new_password);
    let mut plaintext = change_password_plaintext(&challenge.blob, &new_key);
    let response = ctr_encrypt_streaming(&old_key, &challenge.nonce, &plaintext);
    plaintext.zeroize();

    let mut cmd = Vec::with_capacity(1 + response.len());
    cmd.push(OP_CHANGE_PASSWORD);
    cmd.extend_from_slice(&response);

    match tag.execute(&cmd) {
        Err(Error::Device(DeviceErrorCode::AuthenticationFailed)) => {
            Err(Error::AuthenticationFailed)
        }
        Err(e) => Err(e),
        Ok(_) => {
            info!("password changed");
            Ok(())
        }
    }
}
