// tagsig/src/error.rs

use thiserror::Error;

/// Error codes reported by the tag firmware in the first byte of a failure
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceErrorCode {
    UnknownCommand,
    InvalidArgument,
    KeysNotGenerated,
    KeyAlreadyExists,
    AuthenticationFailed,
    NoPendingChallenge,
    SecureElementFailure,
}

static DEVICE_ERRORS: [(u8, DeviceErrorCode, &str); 7] = [
    (0x01, DeviceErrorCode::UnknownCommand, "unknown command"),
    (0x02, DeviceErrorCode::InvalidArgument, "invalid command argument"),
    (0x03, DeviceErrorCode::KeysNotGenerated, "keys have not been generated"),
    (0x04, DeviceErrorCode::KeyAlreadyExists, "keys already exist"),
    (0x05, DeviceErrorCode::AuthenticationFailed, "authentication failed"),
    (0x06, DeviceErrorCode::NoPendingChallenge, "no challenge pending"),
    (0x07, DeviceErrorCode::SecureElementFailure, "secure element failure"),
];

impl DeviceErrorCode {
    /// Look up a firmware error byte. Returns `None` for codes this crate
    /// does not know about.
    pub fn from_byte(code: u8) -> Option<Self> {
        DEVICE_ERRORS
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, kind, _)| *kind)
    }

    pub fn as_byte(&self) -> u8 {
        self.entry().0
    }

    pub fn message(&self) -> &'static str {
        self.entry().2
    }

    fn entry(&self) -> &'static (u8, Self, &'static str) {
        // every variant has exactly one row
        DEVICE_ERRORS
            .iter()
            .find(|(_, kind, _)| kind == self)
            .unwrap_or(&DEVICE_ERRORS[0])
    }
}

impl std::fmt::Display for DeviceErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#04x})", self.message(), self.as_byte())
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    #[error("config register invalid: last status {}", fmt_status(.last))]
    ConfigInvalid { last: Option<u8> },

    #[error("invalid response magic: {actual:02x?}")]
    InvalidMagic { actual: [u8; 2] },

    #[error("unknown response status: {status:#04x}")]
    UnknownStatus { status: u8 },

    #[error("invalid response length: declared {declared}, max {max}")]
    InvalidLength { declared: usize, max: usize },

    #[error("truncated reply: expected {expected} bytes, got {actual}")]
    TruncatedReply { expected: usize, actual: usize },

    #[error("crc mismatch: declared {expected:#010x}, computed {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("device returned error: {0}")]
    Device(DeviceErrorCode),

    #[error("device returned unknown error code {code:#04x}")]
    UnknownDevice { code: u8 },

    #[error("authentication failed: wrong password")]
    AuthenticationFailed,

    #[error("keys already exist on the tag")]
    KeyAlreadyExists,

    #[error("command data too large: max {max}, got {actual}")]
    PayloadTooLarge { max: usize, actual: usize },

    #[error("password too short: min {min} characters, got {actual}")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("could not acquire radio session: {0}")]
    AcquireFailed(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("frame format error: {0}")]
    FrameFormat(String),
}

fn fmt_status(last: &Option<u8>) -> String {
    match last {
        Some(v) => format!("{:#04x}", v),
        None => "none".to_string(),
    }
}

impl Error {
    /// Build the error for a failure response payload. The first byte is
    /// the firmware error code.
    pub fn from_device_payload(payload: &[u8]) -> Self {
        match payload.first() {
            Some(&code) => match DeviceErrorCode::from_byte(code) {
                Some(kind) => Self::Device(kind),
                None => Self::UnknownDevice { code },
            },
            None => Self::UnknownDevice { code: 0x00 },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
