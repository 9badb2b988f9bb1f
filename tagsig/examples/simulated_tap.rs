//! Walk through the full key lifecycle against the firmware simulator.
//!
//! Run with `RUST_LOG=debug cargo run --example simulated_tap` to see every
//! HL step, or `RUST_LOG=trace` for the raw frames.

use anyhow::{Context, bail};
use tagsig::prelude::*;
use tagsig::test_support::{SimulatedProvider, SimulatedTag};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut orchestrator = OrchestratorBuilder::new(SimulatedProvider::new(SimulatedTag::new()))
        .on_progress(|p| println!("progress: {:?}", p))
        .build();

    let requests = [
        ActionRequest::GenerateKeys {
            password: "hunter22".into(),
        },
        ActionRequest::ReadPublicKey,
        ActionRequest::sign_random(),
        ActionRequest::SignWithPublicKey {
            challenge: Challenge::random(),
        },
        ActionRequest::ChangePassword {
            old_password: "hunter22".into(),
            new_password: "correct horse".into(),
        },
        ActionRequest::EraseKeys {
            password: "correct horse".into(),
        },
    ];

    for request in &requests {
        let outcome = orchestrator
            .run(request)
            .with_context(|| format!("{} failed", request.name()))?;
        match outcome {
            Some(ActionOutcome::KeysGenerated(k)) => println!("public key: {}", k.to_hex()),
            Some(ActionOutcome::PublicKey(pk)) => println!("read back:  {}", bytes_to_hex(&pk)),
            Some(ActionOutcome::Signed(r)) => {
                println!("challenge:  {}", r.challenge.to_hex());
                println!("signature:  {}", bytes_to_hex(&r.signature));
            }
            Some(ActionOutcome::SignedWithKey(s)) => {
                println!("signer:     {}", bytes_to_hex(&s.public_key));
                println!("signature:  {}", bytes_to_hex(&s.result.signature));
            }
            Some(other) => println!("{:?}", other),
            None => bail!("{} produced no result", request.name()),
        }
    }

    println!("releases: {:?}", orchestrator.provider().releases);
    Ok(())
}
