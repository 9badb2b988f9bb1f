// tagsig/src/actions/keys.rs

use log::{debug, info};
use zeroize::Zeroizing;

use crate::actions::{check_password, prepare};
use crate::constants::{OP_ERASE_KEYS, OP_GENERATE_KEYS};
use crate::crypto::{KeyMaterial, ctr_encrypt_single_iv};
use crate::device::Tag;
use crate::types::{DeviceChallenge, GeneratedKey};
use crate::{DeviceErrorCode, Error, Result};

/// Provision a key pair protected by `password`. Returns the public key.
pub fn generate_keys(tag: &mut Tag<'_>, password: &str) -> Result<GeneratedKey> {
    check_password(password)?;
    prepare(tag)?;

    let key = KeyMaterial::derive(password);
    let cmd = generate_command(&key);

    let public_key = match tag.execute_streaming(&cmd) {
        Err(Error::Device(DeviceErrorCode::KeyAlreadyExists)) => {
            return Err(Error::KeyAlreadyExists);
        }
        other => other?,
    };
    info!("keys generated");
    Ok(GeneratedKey { public_key })
}

/// `E5 || key`. The buffer is wiped when dropped.
fn generate_command(key: &KeyMaterial) -> Zeroizing<Vec<u8>> {
    let mut cmd = Zeroizing::new(Vec::with_capacity(1 + key.as_bytes().len()));
    cmd.push(OP_GENERATE_KEYS);
    cmd.extend_from_slice(key.as_bytes());
    cmd
}

/// Erase the key pair after proving knowledge of `password`.
///
/// The tag sends `nonce || blob`; the blob is returned encrypted with
/// AES-256-CTR under the password key, IV `00000000 || nonce`.
pub fn erase_keys(tag: &mut Tag<'_>, password: &str) -> Result<()> {
    prepare(tag)?;

    let challenge = DeviceChallenge::parse(&tag.execute(&[OP_ERASE_KEYS])?)?;
    debug!("erase challenge: {} byte blob", challenge.blob.len());

    let key = KeyMaterial::derive(password);
    let response = ctr_encrypt_single_iv(&key, &challenge.nonce, &challenge.blob);

    let mut cmd = Vec::with_capacity(1 + response.len());
    cmd.push(OP_ERASE_KEYS);
    cmd.extend_from_slice(&response);

    match tag.execute(&cmd) {
        Err(Error::Device(DeviceErrorCode::AuthenticationFailed)) => {
            Err(Error::AuthenticationFailed)
        }
        Err(e) => Err(e),
        Ok(_) => {
            info!("keys erased");
            Ok(())
        }
    }
}
