#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use tagsig::config::PollConfig;
use tagsig::device::Tag;
use tagsig::test_support::SimulatedTag;
use tagsig::transport::RawFrameTransport;
use tagsig::transport::mock::MockTransport;
use tagsig::utils::{Clock, ManualClock, ms};
use tagsig::Error;

use common::fixtures::register_reply;

#[test]
fn status_two_times_out_after_ceiling_not_before() {
    let mut mock = MockTransport::new();
    mock.set_fallback(register_reply(0x02));
    let clock = ManualClock::new();
    let cfg = PollConfig::default();

    let err = Tag::new(&mut mock, &clock)
        .with_config(cfg)
        .wait_until_unlocked()
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
    assert!(clock.now() >= cfg.unlock_timeout);
    assert!(clock.now() <= cfg.unlock_timeout + cfg.unlock_poll_interval);
    assert_eq!(mock.sent.len(), 400);
}

#[test]
fn unlock_masks_upper_bits() {
    let mut mock = MockTransport::new();
    mock.push_response(register_reply(0x02));
    mock.push_response(register_reply(0xFD));
    let clock = ManualClock::new();
    Tag::new(&mut mock, &clock).wait_until_unlocked().unwrap();
    assert_eq!(clock.now(), ms(20));
}

#[test]
fn config_never_ready_fails_within_one_jitter() {
    for timeout in [0u64, 1, 50, 3000] {
        let mut mock = MockTransport::new();
        mock.set_fallback(register_reply(0x09));
        let clock = ManualClock::new();
        let cfg = PollConfig::default().with_config_timeout(ms(timeout));

        let err = Tag::new(&mut mock, &clock)
            .with_config(cfg)
            .wait_until_config_ready()
            .unwrap_err();
        match err {
            Error::ConfigInvalid { last } => assert_eq!(last, Some(0x09)),
            other => panic!("expected ConfigInvalid, got: {:?}", other),
        }
        assert!(clock.now() > cfg.config_timeout);
        assert!(clock.now() <= cfg.config_timeout + cfg.config_jitter_max);
    }
}

#[test]
fn config_transport_errors_keep_polling() {
    let mut mock = MockTransport::new();
    mock.push_error("collision");
    mock.push_error("collision");
    mock.push_response(register_reply(0x0B));
    let clock = ManualClock::new();
    Tag::new(&mut mock, &clock).wait_until_config_ready().unwrap();
    assert_eq!(mock.sent.len(), 3);
}

#[test]
fn simulated_never_unlock_times_out() {
    let mut sim = SimulatedTag::with_keys("pw");
    sim.faults.never_unlock = true;
    let mut t = RawFrameTransport::new(sim);
    let clock = ManualClock::new();
    let cfg = PollConfig::default().with_unlock_timeout(Duration::from_millis(200));
    let err = Tag::new(&mut t, &clock)
        .with_config(cfg)
        .read_public_key()
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
}

#[test]
fn simulated_config_override_is_config_invalid() {
    let mut sim = SimulatedTag::with_keys("pw");
    sim.faults.config_override = Some(0x03);
    let mut t = RawFrameTransport::new(sim);
    let clock = ManualClock::new();
    let err = Tag::new(&mut t, &clock).sign(&common::fixtures::zero_challenge()).unwrap_err();
    assert!(matches!(err, Error::ConfigInvalid { last: Some(0x03) }));
    // no HL command reached the firmware
    assert!(t.link().commands.is_empty());
}
