use proptest::prelude::*;
use tagsig::Error;
use tagsig::protocol::HlPayload;

#[test]
fn every_length_round_trips() {
    for len in 0..=248usize {
        let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
        let p = HlPayload::encode(&data).unwrap();
        assert_eq!(p.as_bytes().len() % 4, 0, "len {}", len);
        assert_eq!(HlPayload::decode(p.as_bytes()).unwrap(), data, "len {}", len);
    }
}

#[test]
fn oversize_rejected() {
    match HlPayload::encode(&[0u8; 249]) {
        Err(Error::PayloadTooLarge { max, actual }) => {
            assert_eq!(max, 248);
            assert_eq!(actual, 249);
        }
        other => panic!("expected PayloadTooLarge, got: {:?}", other),
    }
}

proptest! {
    #[test]
    fn corrupted_data_byte_fails_crc(
        data in proptest::collection::vec(any::<u8>(), 1..=248),
        idx in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut bytes = HlPayload::encode(&data).unwrap().as_bytes().to_vec();
        let i = 8 + idx.index(data.len());
        bytes[i] ^= flip;
        let is_crc_mismatch = matches!(HlPayload::decode(&bytes), Err(Error::CrcMismatch { .. }));
        prop_assert!(is_crc_mismatch);
    }
}
