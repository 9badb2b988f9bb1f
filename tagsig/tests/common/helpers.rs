// helpers.rs: scripted MockTransport setups shared by integration tests

use tagsig::protocol::ResponseStatus;
use tagsig::test_support::SimulatedTag;
use tagsig::transport::mock::MockTransport;
use tagsig::types::SignatureVerifier;

use super::fixtures::{config_ready_reply, data_reply, header_reply, unlocked_reply};

/// Queue the replies of one complete HL exchange:
/// write ack, handoff ack, unlock, header, data (if any).
pub fn seed_exchange(mock: &mut MockTransport, status: ResponseStatus, data: &[u8]) {
    mock.push_response(vec![]);
    mock.push_response(vec![]);
    mock.push_response(unlocked_reply());
    mock.push_response(header_reply(status, data));
    if !data.is_empty() {
        mock.push_response(data_reply(data));
    }
}

/// Queue the readiness preamble every action starts with.
pub fn seed_preamble(mock: &mut MockTransport) {
    mock.push_response(config_ready_reply());
    mock.push_response(unlocked_reply());
}

/// Queue a streamed result split into `chunk` sized exchanges, terminated
/// by an empty exchange.
pub fn seed_stream(mock: &mut MockTransport, data: &[u8], chunk: usize) {
    for part in data.chunks(chunk) {
        seed_exchange(mock, ResponseStatus::Success, part);
    }
    seed_exchange(mock, ResponseStatus::Success, &[]);
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Accepts exactly the signatures the simulator would produce.
pub struct SimulatorVerifier<'a>(pub &'a SimulatedTag);

impl SignatureVerifier for SimulatorVerifier<'_> {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        self.0.public_key().as_deref() == Some(public_key)
            && self.0.expected_signature(message).as_deref() == Some(signature)
    }
}
