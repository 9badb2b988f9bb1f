use tagsig::protocol::CommandFrame;
use tagsig::transport::{
    CustomCommandLink, CustomCommandTransport, RawFrameTransport, RawLink, Transport,
};
use tagsig::{Error, Result};

/// Raw link that answers every frame with a fixed reply and records what
/// went out.
struct Recorder {
    reply: Vec<u8>,
    sent: Vec<Vec<u8>>,
}

impl RawLink for Recorder {
    fn transceive_raw(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        self.sent.push(bytes.to_vec());
        Ok(self.reply.clone())
    }
}

impl CustomCommandLink for Recorder {
    fn custom_command(&mut self, code: u8, params: &[u8]) -> Result<Vec<u8>> {
        let mut call = vec![code];
        call.extend_from_slice(params);
        self.sent.push(call);
        Ok(self.reply[1..].to_vec())
    }
}

#[test]
fn both_paths_yield_same_normalized_reply() {
    let frame = CommandFrame::new(0xC0, vec![0xA0, 0x00]);

    let mut raw = RawFrameTransport::new(Recorder {
        reply: vec![0x00, 0x00, 0x01, 0x00, 0x00],
        sent: vec![],
    });
    let mut custom = CustomCommandTransport::new(Recorder {
        reply: vec![0x00, 0x00, 0x01, 0x00, 0x00],
        sent: vec![],
    });

    let a = raw.transceive(&frame).unwrap();
    let b = custom.transceive(&frame).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, vec![0x00, 0x01, 0x00, 0x00]);

    assert_eq!(raw.link().sent[0], vec![0x02, 0xC0, 0x04, 0xA0, 0x00]);
    assert_eq!(custom.link().sent[0], vec![0xC0, 0xA0, 0x00]);
}

#[test]
fn empty_raw_reply_is_frame_error() {
    let mut raw = RawFrameTransport::new(Recorder {
        reply: vec![],
        sent: vec![],
    });
    let err = raw
        .transceive(&CommandFrame::new(0xD2, vec![0x00, 0x01]))
        .unwrap_err();
    assert!(matches!(err, Error::FrameFormat(_)));
}

#[test]
fn boxed_transport_is_injectable() {
    let mut t: Box<dyn Transport> = Box::new(RawFrameTransport::new(Recorder {
        reply: vec![0x00, 0xAA],
        sent: vec![],
    }));
    assert_eq!(
        t.transceive(&CommandFrame::new(0xD2, vec![0x00, 0x01])).unwrap(),
        vec![0xAA]
    );
}
