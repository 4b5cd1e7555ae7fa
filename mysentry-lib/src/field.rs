//! Helpers for pulling integer fields out of the raw message.

/// Interpret up to four bytes, most significant first, as an unsigned integer.
///
/// # Panics
///
/// Panics if `bytes` is longer than four bytes.
pub fn be_uint(bytes: &[u8]) -> u32 {
    assert!(
        bytes.len() <= 4,
        "big-endian field wider than 32 bits ({} bytes)",
        bytes.len()
    );
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b))
}

/// Reconstruct a 9-bit glucose value from a low byte and one bit borrowed
/// from a separate overflow byte.
///
/// `overflow` is shifted left by `overflow_shift` within a byte (higher bits
/// fall off), placed after `low` as a big-endian `u16`, and the pair is
/// shifted right by 7. The net effect is `low << 1` with bit
/// `7 - overflow_shift` of `overflow` as the least significant bit:
///
/// - shift 7 borrows bit 0 (current glucose)
/// - shift 6 borrows bit 1 (previous glucose)
///
/// # Panics
///
/// Panics if `overflow_shift` is 8 or greater.
pub fn stitch_glucose(low: u8, overflow: u8, overflow_shift: u32) -> u16 {
    let borrowed = overflow << overflow_shift;
    (be_uint(&[low, borrowed]) >> 7) as u16
}
