// tagsig/src/protocol/checksum.rs

/// CRC32 (IEEE) over arbitrary bytes, as the firmware computes it.
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// CRC32 in the little-endian wire order used by payload and response headers.
pub fn crc32_le(data: &[u8]) -> [u8; 4] {
    crc32(data).to_le_bytes()
}

/// Zero-pad `data` up to the next multiple of `align`.
pub fn pad_to(data: &[u8], align: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    let rem = out.len() % align;
    if rem != 0 {
        out.resize(out.len() + (align - rem), 0);
    }
    out
}
