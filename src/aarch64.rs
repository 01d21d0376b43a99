//! NEON substring scanner and byte counter for aarch64.
//!
//! NEON is a baseline feature of the aarch64 targets, so the functions here
//! carry no runtime gate; `unsafe` marks the raw loads only.

use crate::{memcmp, swar, Needle};
use std::arch::aarch64::*;

/// Returns the index of the first occurrence of `needle`, or
/// `haystack.len()`, using NEON anomaly prefiltering.
///
/// Analogous to the AVX2 scanner with 16-byte vectors: the needle's first 4
/// bytes are broadcast into four 32-bit lanes, each 16-byte stride performs
/// four unaligned loads at offsets 0 through 3, the lane-equality masks are
/// ORed, and a nonzero union triggers a 16-position scalar verification.
/// Needles shorter than 4 bytes fall through to the scalar kernels; the tail
/// is handled by the scalar scanner.
///
/// # Safety
///
/// Reads `haystack` through raw pointers; the slice bounds checked by the
/// stride condition are the only requirement.
pub unsafe fn find_substring(haystack: &[u8], needle: &Needle<'_>) -> usize {
    let bytes = needle.bytes();
    if bytes.len() < 4 {
        return swar::find_substring(haystack, needle);
    }
    if haystack.len() < bytes.len() {
        return haystack.len();
    }

    let prefix = vdupq_n_u32(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
    let ptr = haystack.as_ptr();

    let mut cursor = 0;
    while cursor + bytes.len() + 16 <= haystack.len() {
        let mask0 = vceqq_u32(vreinterpretq_u32_u8(vld1q_u8(ptr.add(cursor))), prefix);
        let mask1 = vceqq_u32(vreinterpretq_u32_u8(vld1q_u8(ptr.add(cursor + 1))), prefix);
        let mask2 = vceqq_u32(vreinterpretq_u32_u8(vld1q_u8(ptr.add(cursor + 2))), prefix);
        let mask3 = vceqq_u32(vreinterpretq_u32_u8(vld1q_u8(ptr.add(cursor + 3))), prefix);

        let union = vorrq_u32(vorrq_u32(mask0, mask1), vorrq_u32(mask2, mask3));
        let halves = vreinterpretq_u64_u32(union);
        if vgetq_lane_u64::<0>(halves) | vgetq_lane_u64::<1>(halves) != 0 {
            for candidate in cursor..cursor + 16 {
                if memcmp::equal(&haystack[candidate..candidate + bytes.len()], bytes) {
                    return candidate;
                }
            }
        }
        cursor += 16;
    }

    cursor + swar::find_substring(&haystack[cursor..], needle)
}

/// Returns how many bytes of `haystack` equal `byte`, checking 16 bytes per
/// stride.
///
/// The pre-alignment head and the tail are counted by the scalar kernel; the
/// aligned body compares lanes against a broadcast of the target byte and
/// accumulates `count_ones() / 8` of each 64-bit half of the mask.
///
/// # Safety
///
/// Reads `haystack` through raw pointers; the slice bounds checked by the
/// stride condition are the only requirement.
pub unsafe fn count_byte(haystack: &[u8], byte: u8) -> usize {
    let ptr = haystack.as_ptr();
    let head = ptr.align_offset(16).min(haystack.len());
    let mut count = swar::count_byte(&haystack[..head], byte);

    let target = vdupq_n_u8(byte);
    let mut cursor = head;
    while cursor + 16 <= haystack.len() {
        let mask = vceqq_u8(vld1q_u8(ptr.add(cursor)), target);
        let halves = vreinterpretq_u64_u8(mask);
        count += vgetq_lane_u64::<0>(halves).count_ones() as usize / 8;
        count += vgetq_lane_u64::<1>(halves).count_ones() as usize / 8;
        cursor += 16;
    }

    count + swar::count_byte(&haystack[cursor..], byte)
}

#[cfg(test)]
mod tests {
    use super::{count_byte, find_substring};
    use crate::Needle;

    fn naive(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
            .unwrap_or(haystack.len())
    }

    #[test]
    fn scenarios() {
        let search = |haystack: &[u8], needle: &[u8]| unsafe {
            find_substring(haystack, &Needle::new(needle))
        };
        assert_eq!(search(b"abracadabra", b"cad"), 4);
        assert_eq!(search(b"abracadabra", b"xyz"), 11);
        assert_eq!(search(b"aaaaaaaa", b"aaaa"), 0);
        assert_eq!(
            search(b"the quick brown fox jumps over the lazy dog", b"fox"),
            16
        );
    }

    #[test]
    fn agrees_with_scalar_across_positions() {
        let mut haystack = vec![b'.'; 131];
        for len in [4usize, 5, 8, 31, 32] {
            let needle: Vec<u8> = (0..len as u8).map(|b| b'a' + b % 26).collect();
            for position in (0..=haystack.len() - len).step_by(3) {
                haystack.fill(b'.');
                haystack[position..position + len].copy_from_slice(&needle);
                let found = unsafe { find_substring(&haystack, &Needle::new(&needle)) };
                assert_eq!(found, naive(&haystack, &needle));
            }
        }
    }

    #[test]
    fn counts_match_scalar() {
        let haystack: Vec<u8> = (0..=255u8).cycle().take(1031).collect();
        for byte in [0u8, 17, 255] {
            let expected = haystack.iter().filter(|&&b| b == byte).count();
            for start in 0..16.min(haystack.len()) {
                assert_eq!(
                    unsafe { count_byte(&haystack[start..], byte) },
                    haystack[start..].iter().filter(|&&b| b == byte).count()
                );
            }
            assert_eq!(unsafe { count_byte(&haystack, byte) }, expected);
        }
    }
}
