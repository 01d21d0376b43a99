//! AVX2 substring scanner for x86 and x86_64.

use crate::{memcmp, swar, Needle};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Returns the index of the first occurrence of `needle`, or
/// `haystack.len()`, using AVX2 anomaly prefiltering.
///
/// The needle's first 4 bytes are broadcast into all eight 32-bit lanes of a
/// 256-bit register once, before the loop. Each 32-byte stride then performs
/// four unaligned loads at offsets 0 through 3 and compares 32-bit lanes
/// against the broadcast prefix; the four byte-masks are ORed, and only a
/// nonzero union pays for a scalar verification of the 32 candidate
/// positions. Four independent loads retire on separate ports with fewer
/// data dependencies than a load-and-shuffle scheme.
///
/// Needles shorter than 4 bytes fall through to the scalar kernels. The tail
/// (up to `32 + needle.len() - 1` bytes) is handled by the scalar scanner,
/// whose miss sentinel composes with the cursor into `haystack.len()`.
///
/// # Safety
///
/// The caller must ensure the CPU supports AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn find_substring(haystack: &[u8], needle: &Needle<'_>) -> usize {
    let bytes = needle.bytes();
    if bytes.len() < 4 {
        return swar::find_substring(haystack, needle);
    }
    if haystack.len() < bytes.len() {
        return haystack.len();
    }

    let prefix =
        _mm256_set1_epi32(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
    let ptr = haystack.as_ptr();

    let mut cursor = 0;
    while cursor + bytes.len() + 32 <= haystack.len() {
        let mask0 = _mm256_movemask_epi8(_mm256_cmpeq_epi32(
            _mm256_loadu_si256(ptr.add(cursor).cast()),
            prefix,
        ));
        let mask1 = _mm256_movemask_epi8(_mm256_cmpeq_epi32(
            _mm256_loadu_si256(ptr.add(cursor + 1).cast()),
            prefix,
        ));
        let mask2 = _mm256_movemask_epi8(_mm256_cmpeq_epi32(
            _mm256_loadu_si256(ptr.add(cursor + 2).cast()),
            prefix,
        ));
        let mask3 = _mm256_movemask_epi8(_mm256_cmpeq_epi32(
            _mm256_loadu_si256(ptr.add(cursor + 3).cast()),
            prefix,
        ));

        if mask0 | mask1 | mask2 | mask3 != 0 {
            for candidate in cursor..cursor + 32 {
                if memcmp::equal(&haystack[candidate..candidate + bytes.len()], bytes) {
                    return candidate;
                }
            }
        }
        cursor += 32;
    }

    cursor + swar::find_substring(&haystack[cursor..], needle)
}
