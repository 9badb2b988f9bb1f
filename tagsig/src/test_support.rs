//! Test support helpers intended for use by unit and integration tests.
//!
//! [`SimulatedTag`] emulates the tag side of the link: SRAM, the two config
//! registers, and a firmware with a key store that validates the
//! counter-mode handshakes. [`SimulatedProvider`] hands out sessions on a
//! shared simulated tag so state survives across taps.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;
use sha2::{Digest, Sha256};

use crate::config::SessionOptions;
use crate::constants::{
    CHALLENGE_LEN, KEY_LEN, MANUFACTURER_CODE, NONCE_LEN, OP_CHANGE_PASSWORD, OP_ERASE_KEYS,
    OP_GENERATE_KEYS, OP_PUBLIC_KEY, OP_SIGN, PAGE_SIZE, REG_CONFIG, REG_STATUS,
    RESPONSE_HEADER_LEN, SRAM_PAGES,
};
use crate::crypto::{KeyMaterial, ctr_encrypt_single_iv, ctr_encrypt_streaming};
use crate::protocol::{Command, CommandFrame, HlPayload, ResponseHeader, ResponseStatus, crc32_le};
use crate::session::{ReleaseOutcome, SessionProvider};
use crate::transport::{CustomCommandLink, RawFrameTransport, RawLink, Transport};
use crate::{DeviceErrorCode, Error, Result};

const SRAM_LEN: usize = SRAM_PAGES * PAGE_SIZE;
/// Status register value while the secure side owns the SRAM
pub const STATUS_LOCKED: u8 = 0x02;
/// Status register value once the SRAM is handed back
pub const STATUS_UNLOCKED: u8 = 0x01;
/// Arbiter config value the host waits for
pub const CONFIG_READY: u8 = 0x0B;
/// Arbiter config value while the secure side is still busy
pub const CONFIG_BUSY: u8 = 0x09;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Erase,
    ChangePassword,
}

#[derive(Debug, Clone)]
struct Pending {
    op: PendingOp,
    nonce: [u8; NONCE_LEN],
    blob: [u8; CHALLENGE_LEN],
}

#[derive(Debug, Clone)]
struct KeyStore {
    password_key: [u8; KEY_LEN],
    seed: [u8; 32],
}

/// Fault injection knobs.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Flip this byte of the next response data after the header CRC was
    /// computed.
    pub corrupt_response_byte: Option<usize>,
    /// Status register never reports unlocked.
    pub never_unlock: bool,
    /// Config register value reported forever, overriding the normal one.
    pub config_override: Option<u8>,
    /// Exchanges that succeed before the link drops.
    pub link_drops_after: Option<usize>,
}

/// Firmware simulator for the signing tag.
#[derive(Debug, Clone)]
pub struct SimulatedTag {
    sram: [u8; SRAM_LEN],
    /// Status polls that report locked after each handoff
    pub busy_polls: usize,
    busy_remaining: usize,
    /// Config polls that report busy at the start of each session
    pub config_busy_polls: usize,
    config_busy_remaining: usize,
    /// Maximum bytes returned per HL exchange of a streamed result
    pub chunk_size: usize,
    keys: Option<KeyStore>,
    pending: Option<Pending>,
    output: VecDeque<u8>,
    counter: u32,
    pub faults: Faults,
    /// Every decoded HL command, in order
    pub commands: Vec<Vec<u8>>,
    pub exchanges: usize,
}

impl Default for SimulatedTag {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTag {
    pub fn new() -> Self {
        Self {
            sram: [0u8; SRAM_LEN],
            busy_polls: 2,
            busy_remaining: 0,
            config_busy_polls: 1,
            config_busy_remaining: 1,
            chunk_size: 32,
            keys: None,
            pending: None,
            output: VecDeque::new(),
            counter: 0,
            faults: Faults::default(),
            commands: Vec::new(),
            exchanges: 0,
        }
    }

    /// A tag that already holds keys protected by `password`.
    pub fn with_keys(password: &str) -> Self {
        let mut tag = Self::new();
        tag.install_keys(*KeyMaterial::derive(password).as_bytes());
        tag
    }

    pub fn has_keys(&self) -> bool {
        self.keys.is_some()
    }

    /// Public key the firmware reports, if keys exist.
    pub fn public_key(&self) -> Option<Vec<u8>> {
        self.keys.as_ref().map(|k| public_key_for(&k.seed))
    }

    /// Signature the firmware produces for `challenge`, if keys exist.
    pub fn expected_signature(&self, challenge: &[u8]) -> Option<Vec<u8>> {
        self.keys.as_ref().map(|k| signature_for(&k.seed, challenge))
    }

    /// Start a new tap: config register goes through its busy polls again.
    pub fn reset_field(&mut self) {
        self.config_busy_remaining = self.config_busy_polls;
        self.busy_remaining = 0;
    }

    fn install_keys(&mut self, password_key: [u8; KEY_LEN]) {
        self.counter += 1;
        let seed = digest(&[b"seed", &self.counter.to_be_bytes(), &password_key]);
        self.keys = Some(KeyStore { password_key, seed });
    }

    /// Handle one encoded frame and return the normalized reply.
    pub fn handle(&mut self, frame: &CommandFrame) -> Result<Vec<u8>> {
        self.exchanges += 1;
        if let Some(limit) = self.faults.link_drops_after {
            if self.exchanges > limit {
                return Err(Error::Transport("tag left the field".into()));
            }
        }

        match Command::from_frame(frame)? {
            Command::ReadConfig { register } => {
                Ok(vec![0x00, self.read_register(register)?, 0x00, 0x00])
            }
            Command::WriteSram { start_page, data } => {
                let start = (start_page as usize * PAGE_SIZE).min(SRAM_LEN);
                let end = (start + data.len()).min(SRAM_LEN);
                self.sram[start..end].copy_from_slice(&data[..end - start]);
                Ok(Vec::new())
            }
            Command::Handoff => {
                self.run_firmware();
                self.busy_remaining = self.busy_polls;
                Ok(Vec::new())
            }
            Command::ReadSram { start_page, pages } => {
                let start = (start_page as usize * PAGE_SIZE).min(SRAM_LEN);
                let end = (start + pages as usize * PAGE_SIZE).min(SRAM_LEN);
                Ok(self.sram[start..end].to_vec())
            }
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        match register {
            REG_STATUS => {
                if self.faults.never_unlock {
                    return Ok(STATUS_LOCKED);
                }
                if self.busy_remaining > 0 {
                    self.busy_remaining -= 1;
                    return Ok(STATUS_LOCKED);
                }
                Ok(STATUS_UNLOCKED)
            }
            REG_CONFIG => {
                if let Some(v) = self.faults.config_override {
                    return Ok(v);
                }
                if self.config_busy_remaining > 0 {
                    self.config_busy_remaining -= 1;
                    return Ok(CONFIG_BUSY);
                }
                Ok(CONFIG_READY)
            }
            other => Err(Error::FrameFormat(format!(
                "unknown config register {:#04x}",
                other
            ))),
        }
    }

    // The handoff page is only a trigger here; the payload is decoded
    // before it would be overwritten.
    fn run_firmware(&mut self) {
        let (status, data) = match HlPayload::decode(&self.sram) {
            Ok(cmd) => {
                self.commands.push(cmd.clone());
                match self.dispatch(&cmd) {
                    Ok(out) => (ResponseStatus::Success, out),
                    Err(code) => (ResponseStatus::Failure, vec![code.as_byte()]),
                }
            }
            Err(e) => {
                debug!("simulator: bad payload: {}", e);
                (
                    ResponseStatus::Failure,
                    vec![DeviceErrorCode::InvalidArgument.as_byte()],
                )
            }
        };

        let header = ResponseHeader::encode(status, &data);
        self.sram[..RESPONSE_HEADER_LEN].copy_from_slice(&header);
        self.sram[RESPONSE_HEADER_LEN..RESPONSE_HEADER_LEN + data.len()].copy_from_slice(&data);
        if let Some(idx) = self.faults.corrupt_response_byte.take() {
            self.sram[RESPONSE_HEADER_LEN + idx] ^= 0xFF;
        }
    }

    fn dispatch(&mut self, cmd: &[u8]) -> std::result::Result<Vec<u8>, DeviceErrorCode> {
        let Some((&op, args)) = cmd.split_first() else {
            return Ok(self.next_chunk());
        };
        self.output.clear();

        match op {
            OP_PUBLIC_KEY => {
                let keys = self.keys.as_ref().ok_or(DeviceErrorCode::KeysNotGenerated)?;
                let pk = public_key_for(&keys.seed);
                Ok(self.stream(pk))
            }
            OP_SIGN => {
                if args.len() != CHALLENGE_LEN {
                    return Err(DeviceErrorCode::InvalidArgument);
                }
                let keys = self.keys.as_ref().ok_or(DeviceErrorCode::KeysNotGenerated)?;
                let sig = signature_for(&keys.seed, args);
                Ok(self.stream(sig))
            }
            OP_GENERATE_KEYS => {
                let key: [u8; KEY_LEN] = args
                    .try_into()
                    .map_err(|_| DeviceErrorCode::InvalidArgument)?;
                if self.keys.is_some() {
                    return Err(DeviceErrorCode::KeyAlreadyExists);
                }
                self.install_keys(key);
                let pk = self.public_key().ok_or(DeviceErrorCode::SecureElementFailure)?;
                Ok(self.stream(pk))
            }
            OP_ERASE_KEYS if args.is_empty() => self.issue_challenge(PendingOp::Erase),
            OP_ERASE_KEYS => {
                let (pending, keys) = self.take_pending(PendingOp::Erase)?;
                let plain = ctr_encrypt_single_iv(
                    &KeyMaterial::from_bytes(keys.password_key),
                    &pending.nonce,
                    args,
                );
                if plain != pending.blob {
                    return Err(DeviceErrorCode::AuthenticationFailed);
                }
                self.keys = None;
                Ok(Vec::new())
            }
            OP_CHANGE_PASSWORD if args.is_empty() => {
                self.issue_challenge(PendingOp::ChangePassword)
            }
            OP_CHANGE_PASSWORD => {
                let (pending, keys) = self.take_pending(PendingOp::ChangePassword)?;
                if args.len() != CHALLENGE_LEN + KEY_LEN + 16 {
                    return Err(DeviceErrorCode::InvalidArgument);
                }
                let plain = ctr_encrypt_streaming(
                    &KeyMaterial::from_bytes(keys.password_key),
                    &pending.nonce,
                    args,
                );
                if plain[..CHALLENGE_LEN] != pending.blob {
                    return Err(DeviceErrorCode::AuthenticationFailed);
                }
                let new_key = &plain[CHALLENGE_LEN..CHALLENGE_LEN + KEY_LEN];
                let check = &plain[CHALLENGE_LEN + KEY_LEN..];
                if check[..4] != crc32_le(new_key) || check[4..].iter().any(|&b| b != 0) {
                    return Err(DeviceErrorCode::InvalidArgument);
                }
                let mut updated = keys;
                updated.password_key.copy_from_slice(new_key);
                self.keys = Some(updated);
                Ok(Vec::new())
            }
            _ => Err(DeviceErrorCode::UnknownCommand),
        }
    }

    fn issue_challenge(&mut self, op: PendingOp) -> std::result::Result<Vec<u8>, DeviceErrorCode> {
        if self.keys.is_none() {
            return Err(DeviceErrorCode::KeysNotGenerated);
        }
        self.counter += 1;
        let ctr = self.counter.to_be_bytes();
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&digest(&[b"nonce", &ctr])[..NONCE_LEN]);
        let blob = digest(&[b"blob", &ctr]);
        self.pending = Some(Pending { op, nonce, blob });

        let mut out = nonce.to_vec();
        out.extend_from_slice(&blob);
        Ok(out)
    }

    fn take_pending(
        &mut self,
        op: PendingOp,
    ) -> std::result::Result<(Pending, KeyStore), DeviceErrorCode> {
        let keys = self.keys.clone().ok_or(DeviceErrorCode::KeysNotGenerated)?;
        match self.pending.take() {
            Some(p) if p.op == op => Ok((p, keys)),
            _ => Err(DeviceErrorCode::NoPendingChallenge),
        }
    }

    fn stream(&mut self, data: Vec<u8>) -> Vec<u8> {
        self.output = data.into();
        self.next_chunk()
    }

    fn next_chunk(&mut self) -> Vec<u8> {
        let n = self.chunk_size.min(self.output.len());
        self.output.drain(..n).collect()
    }
}

impl RawLink for SimulatedTag {
    fn transceive_raw(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        if bytes.len() < 3 || bytes[2] != MANUFACTURER_CODE {
            return Err(Error::FrameFormat("malformed request frame".into()));
        }
        let frame = CommandFrame::new(bytes[1], bytes[3..].to_vec());
        let mut reply = vec![0x00];
        reply.extend(self.handle(&frame)?);
        Ok(reply)
    }
}

impl CustomCommandLink for SimulatedTag {
    fn custom_command(&mut self, code: u8, params: &[u8]) -> Result<Vec<u8>> {
        self.handle(&CommandFrame::new(code, params.to_vec()))
    }
}

fn digest(parts: &[&[u8]]) -> [u8; 32] {
    let mut h = Sha256::new();
    for p in parts {
        h.update(p);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&h.finalize());
    out
}

fn public_key_for(seed: &[u8; 32]) -> Vec<u8> {
    let mut pk = digest(&[b"pk-x", seed]).to_vec();
    pk.extend_from_slice(&digest(&[b"pk-y", seed]));
    pk
}

fn signature_for(seed: &[u8; 32], challenge: &[u8]) -> Vec<u8> {
    let mut sig = digest(&[b"sig-r", seed, challenge]).to_vec();
    sig.extend_from_slice(&digest(&[b"sig-s", seed, challenge]));
    sig
}

/// Simulated tag shared between sessions.
#[derive(Debug, Clone, Default)]
pub struct SharedTag(Rc<RefCell<SimulatedTag>>);

impl SharedTag {
    pub fn new(tag: SimulatedTag) -> Self {
        Self(Rc::new(RefCell::new(tag)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut SimulatedTag) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl RawLink for SharedTag {
    fn transceive_raw(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        self.0.borrow_mut().transceive_raw(bytes)
    }
}

/// Session provider over a [`SharedTag`] that records every call.
#[derive(Debug, Default)]
pub struct SimulatedProvider {
    pub tag: SharedTag,
    /// Fail the next acquisition with this message
    pub acquire_error: Option<String>,
    /// Fail every release with a transport error
    pub fail_release: bool,
    pub requests: usize,
    pub releases: Vec<ReleaseOutcome>,
    pub alerts: Vec<String>,
}

impl SimulatedProvider {
    pub fn new(tag: SimulatedTag) -> Self {
        Self {
            tag: SharedTag::new(tag),
            ..Self::default()
        }
    }
}

impl SessionProvider for SimulatedProvider {
    fn request_session(&mut self, options: &SessionOptions) -> Result<Box<dyn Transport>> {
        self.requests += 1;
        self.alerts.push(options.alert_message.clone());
        if let Some(msg) = self.acquire_error.take() {
            return Err(Error::AcquireFailed(msg));
        }
        self.tag.with(|t| t.reset_field());
        Ok(Box::new(RawFrameTransport::new(self.tag.clone())))
    }

    fn release_session(&mut self, outcome: &ReleaseOutcome) -> Result<()> {
        self.releases.push(outcome.clone());
        if self.fail_release {
            return Err(Error::Transport("release failed".into()));
        }
        Ok(())
    }

    fn set_alert_message(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
