#[path = "../common/mod.rs"]
mod common;

use tagsig::device::Tag;
use tagsig::protocol::ResponseStatus;
use tagsig::test_support::SimulatedTag;
use tagsig::transport::RawFrameTransport;
use tagsig::transport::mock::MockTransport;
use tagsig::utils::ManualClock;
use tagsig::Error;

use common::fixtures::{OTHER_PASSWORD, PASSWORD};
use common::helpers::{seed_exchange, seed_preamble};

fn simulated(tag: SimulatedTag) -> RawFrameTransport<SimulatedTag> {
    RawFrameTransport::new(tag)
}

#[test]
fn generate_then_erase_with_same_password() {
    let mut t = simulated(SimulatedTag::new());
    let clock = ManualClock::new();
    Tag::new(&mut t, &clock).generate_keys(PASSWORD).unwrap();
    assert!(t.link().has_keys());
    Tag::new(&mut t, &clock).erase_keys(PASSWORD).unwrap();
    assert!(!t.link().has_keys());
}

#[test]
fn erase_with_wrong_password_fails() {
    let mut t = simulated(SimulatedTag::new());
    let clock = ManualClock::new();
    Tag::new(&mut t, &clock).generate_keys(PASSWORD).unwrap();
    let err = Tag::new(&mut t, &clock).erase_keys(OTHER_PASSWORD).unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailed));
    assert!(t.link().has_keys());
}

#[test]
fn generate_twice_is_key_already_exists() {
    let mut t = simulated(SimulatedTag::with_keys(PASSWORD));
    let clock = ManualClock::new();
    let err = Tag::new(&mut t, &clock).generate_keys(PASSWORD).unwrap_err();
    assert!(matches!(err, Error::KeyAlreadyExists));
}

#[test]
fn regenerate_after_erase() {
    let mut t = simulated(SimulatedTag::with_keys(PASSWORD));
    let clock = ManualClock::new();
    Tag::new(&mut t, &clock).erase_keys(PASSWORD).unwrap();
    let k = Tag::new(&mut t, &clock).generate_keys(OTHER_PASSWORD).unwrap();
    assert_eq!(Some(k.public_key), t.link().public_key());
}

#[test]
fn short_password_rejected_before_io() {
    let mut mock = MockTransport::new();
    let clock = ManualClock::new();
    let err = Tag::new(&mut mock, &clock).generate_keys("ab").unwrap_err();
    assert!(matches!(err, Error::PasswordTooShort { min: 3, actual: 2 }));
    assert!(mock.sent.is_empty());
}

#[test]
fn erase_response_uses_single_iv_ctr() {
    use tagsig::crypto::{KeyMaterial, ctr_encrypt_single_iv};

    let nonce = [0x5A; 12];
    let blob = [0xC3; 32];
    let mut challenge = nonce.to_vec();
    challenge.extend_from_slice(&blob);

    let mut mock = MockTransport::new();
    seed_preamble(&mut mock);
    seed_exchange(&mut mock, ResponseStatus::Success, &challenge);
    seed_exchange(&mut mock, ResponseStatus::Success, &[]);

    let clock = ManualClock::new();
    Tag::new(&mut mock, &clock).erase_keys(PASSWORD).unwrap();

    let expected = ctr_encrypt_single_iv(&KeyMaterial::derive(PASSWORD), &nonce, &blob);
    // preamble (2) + challenge exchange (5) -> second write is frame 7
    let write = mock.sent[7].encode();
    assert_eq!(write[13], 0xE7);
    assert_eq!(&write[14..46], &expected[..]);
}

#[test]
fn erase_rejected_maps_authentication_failed() {
    let mut challenge = vec![0u8; 12];
    challenge.extend_from_slice(&[1u8; 32]);

    let mut mock = MockTransport::new();
    seed_preamble(&mut mock);
    seed_exchange(&mut mock, ResponseStatus::Success, &challenge);
    seed_exchange(&mut mock, ResponseStatus::Failure, &[0x05]);

    let clock = ManualClock::new();
    let err = Tag::new(&mut mock, &clock).erase_keys(PASSWORD).unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailed));
}

#[test]
fn erase_challenge_too_short() {
    let mut mock = MockTransport::new();
    seed_preamble(&mut mock);
    seed_exchange(&mut mock, ResponseStatus::Success, &[0u8; 8]);
    let clock = ManualClock::new();
    let err = Tag::new(&mut mock, &clock).erase_keys(PASSWORD).unwrap_err();
    assert!(matches!(err, Error::TruncatedReply { expected: 12, actual: 8 }));
}
