#[path = "../common/mod.rs"]
mod common;

use tagsig::device::Tag;
use tagsig::test_support::SimulatedTag;
use tagsig::transport::RawFrameTransport;
use tagsig::transport::mock::MockTransport;
use tagsig::types::Challenge;
use tagsig::utils::ManualClock;
use tagsig::{DeviceErrorCode, Error};

use common::fixtures::{sample_signature, zero_challenge};
use common::helpers::{SimulatorVerifier, seed_preamble, seed_stream};

#[test]
fn sign_zero_challenge_returns_64_byte_signature() {
    common::helpers::init_logger();
    let mut mock = MockTransport::new();
    seed_preamble(&mut mock);
    seed_stream(&mut mock, &sample_signature(), 32);

    let clock = ManualClock::new();
    let r = Tag::new(&mut mock, &clock).sign(&zero_challenge()).unwrap();
    assert_eq!(r.challenge, zero_challenge());
    assert_eq!(r.signature, sample_signature());
    assert_eq!(r.r().unwrap(), &[0xAB; 32]);

    // first HL command carries B1 followed by the challenge
    let write = mock.sent[2].encode();
    assert_eq!(&write[13..14], &[0xB1]);
    assert_eq!(&write[14..46], &[0x00; 32]);
}

#[test]
fn sign_against_simulator() {
    let mut t = RawFrameTransport::new(SimulatedTag::with_keys(common::fixtures::PASSWORD));
    let clock = ManualClock::new();
    let c = Challenge::random();
    let r = Tag::new(&mut t, &clock).sign(&c).unwrap();
    assert_eq!(Some(r.signature), t.link().expected_signature(c.as_bytes()));
}

#[test]
fn sign_without_keys() {
    let mut t = RawFrameTransport::new(SimulatedTag::new());
    let clock = ManualClock::new();
    let err = Tag::new(&mut t, &clock).sign(&zero_challenge()).unwrap_err();
    assert!(matches!(
        err,
        Error::Device(DeviceErrorCode::KeysNotGenerated)
    ));
}

#[test]
fn public_key_matches_generated_key() {
    let mut t = RawFrameTransport::new(SimulatedTag::new());
    let clock = ManualClock::new();
    let generated = Tag::new(&mut t, &clock)
        .generate_keys(common::fixtures::PASSWORD)
        .unwrap();
    let read = Tag::new(&mut t, &clock).read_public_key().unwrap();
    assert_eq!(generated.public_key, read);
    assert_eq!(read.len(), 64);
}

#[test]
fn verify_with_external_verifier() {
    let mut t = RawFrameTransport::new(SimulatedTag::with_keys(common::fixtures::PASSWORD));
    let clock = ManualClock::new();
    let pk = Tag::new(&mut t, &clock).read_public_key().unwrap();
    let r = Tag::new(&mut t, &clock).sign(&Challenge::random()).unwrap();

    let v = SimulatorVerifier(t.link());
    assert!(r.verify_with(&v, &pk));
    assert!(!r.verify_with(&v, &[0u8; 64]));
}

#[test]
fn sign_with_public_key_reads_key_then_signs() {
    let mut t = RawFrameTransport::new(SimulatedTag::with_keys(common::fixtures::PASSWORD));
    let clock = ManualClock::new();
    let c = Challenge::random();
    let signed = Tag::new(&mut t, &clock).sign_with_public_key(&c).unwrap();

    let sim = t.link();
    let ops: Vec<u8> = sim.commands.iter().filter_map(|cmd| cmd.first().copied()).collect();
    assert_eq!(ops.first(), Some(&0xB0));
    assert!(ops.contains(&0xB1));
    assert_eq!(Some(signed.public_key.clone()), sim.public_key());
    assert_eq!(signed.result.challenge, c);
    assert!(signed.verify_with(&SimulatorVerifier(sim)));
}
