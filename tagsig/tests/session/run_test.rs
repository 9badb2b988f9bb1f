#[path = "../common/mod.rs"]
mod common;

use tagsig::config::{ALERT_DONE, SessionOptions};
use tagsig::session::{ActionOutcome, ActionRequest, OrchestratorBuilder, ReleaseOutcome};
use tagsig::test_support::{SimulatedProvider, SimulatedTag};
use tagsig::utils::ManualClock;
use tagsig::Error;

use common::fixtures::{OTHER_PASSWORD, PASSWORD, zero_challenge};
use common::helpers::SimulatorVerifier;

#[test]
fn full_key_lifecycle_across_taps() {
    common::helpers::init_logger();
    let mut o = OrchestratorBuilder::new(SimulatedProvider::new(SimulatedTag::new()))
        .with_clock(Box::new(ManualClock::new()))
        .build();

    let generated = match o
        .run(&ActionRequest::GenerateKeys {
            password: PASSWORD.into(),
        })
        .unwrap()
    {
        Some(ActionOutcome::KeysGenerated(k)) => k,
        other => panic!("unexpected: {:?}", other),
    };

    match o.run(&ActionRequest::ReadPublicKey).unwrap() {
        Some(ActionOutcome::PublicKey(pk)) => assert_eq!(pk, generated.public_key),
        other => panic!("unexpected: {:?}", other),
    }

    match o
        .run(&ActionRequest::Sign {
            challenge: zero_challenge(),
        })
        .unwrap()
    {
        Some(ActionOutcome::Signed(r)) => {
            assert_eq!(r.challenge, zero_challenge());
            assert_eq!(r.signature.len(), 64);
        }
        other => panic!("unexpected: {:?}", other),
    }

    let changed = o
        .run(&ActionRequest::ChangePassword {
            old_password: PASSWORD.into(),
            new_password: OTHER_PASSWORD.into(),
        })
        .unwrap();
    assert_eq!(changed, Some(ActionOutcome::PasswordChanged));

    let err = o
        .run(&ActionRequest::EraseKeys {
            password: PASSWORD.into(),
        })
        .unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailed));

    let erased = o
        .run(&ActionRequest::EraseKeys {
            password: OTHER_PASSWORD.into(),
        })
        .unwrap();
    assert_eq!(erased, Some(ActionOutcome::KeysErased));
    assert!(!o.provider().tag.with(|t| t.has_keys()));

    let releases = &o.provider().releases;
    assert_eq!(releases.len(), 6);
    assert!(matches!(releases[4], ReleaseOutcome::Failure { .. }));
    assert_eq!(
        releases[5],
        ReleaseOutcome::Success {
            message: ALERT_DONE.into()
        }
    );
}

#[test]
fn acquire_failure_reports_and_stays_idle() {
    let mut provider = SimulatedProvider::new(SimulatedTag::new());
    provider.acquire_error = Some("session invalidated".into());
    let mut o = OrchestratorBuilder::new(provider)
        .with_clock(Box::new(ManualClock::new()))
        .with_options(SessionOptions {
            alert_message: "Hold your tag near the reader".into(),
        })
        .build();

    match o.run(&ActionRequest::ReadPublicKey) {
        Err(Error::AcquireFailed(msg)) => assert_eq!(msg, "session invalidated"),
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(o.provider().alerts, vec!["Hold your tag near the reader"]);
    assert!(o.provider().releases.is_empty());
}

#[test]
fn link_loss_mid_action_still_releases() {
    let mut sim = SimulatedTag::with_keys(PASSWORD);
    sim.faults.link_drops_after = Some(4);
    let mut o = OrchestratorBuilder::new(SimulatedProvider::new(sim))
        .with_clock(Box::new(ManualClock::new()))
        .build();
    let err = o.run(&ActionRequest::sign_random()).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(o.provider().releases.len(), 1);
}

#[test]
fn sign_with_public_key_in_one_tap() {
    let mut o = OrchestratorBuilder::new(SimulatedProvider::new(SimulatedTag::with_keys(PASSWORD)))
        .with_clock(Box::new(ManualClock::new()))
        .build();

    let signed = match o
        .run(&ActionRequest::SignWithPublicKey {
            challenge: zero_challenge(),
        })
        .unwrap()
    {
        Some(ActionOutcome::SignedWithKey(s)) => s,
        other => panic!("unexpected: {:?}", other),
    };

    assert_eq!(o.provider().requests, 1);
    assert_eq!(
        o.provider().releases,
        vec![ReleaseOutcome::Success {
            message: ALERT_DONE.into()
        }]
    );
    assert_eq!(signed.result.challenge, zero_challenge());
    assert_eq!(signed.public_key.len(), 64);
    o.provider().tag.with(|t| {
        assert!(signed.verify_with(&SimulatorVerifier(t)));
    });
}
