//! Fast single-pattern substring search over byte slices, combining 64-bit
//! SWAR kernels for short needles with AVX2 and NEON anomaly prefilters for
//! longer ones. For multi-pattern search, see instead the [`aho-corasick`
//! crate](https://github.com/BurntSushi/aho-corasick).
//!
//! Core search operations report a miss as the in-band sentinel
//! `haystack.len()`; the [`ByteView`] wrapper translates that to
//! `Option<usize>` at the string-view surface.
//!
//! # Example
//!
//! ```
//! use spanscan::{find, count_byte, Needle, ByteView};
//!
//! let haystack = b"abracadabra";
//! assert_eq!(find(haystack, &Needle::new(b"cad")), 4);
//! assert_eq!(find(haystack, &Needle::new(b"xyz")), haystack.len());
//! assert_eq!(count_byte(haystack, b'a'), 5);
//!
//! let view = ByteView::new(haystack);
//! assert_eq!(view.find(b"cad"), Some(4));
//! assert_eq!(view.find(b"xyz"), None);
//! ```

#![warn(missing_docs)]

/// Substring search implementation using x86 AVX2 intrinsics.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod x86;

/// Substring search and byte counting using aarch64 NEON intrinsics.
#[cfg(target_arch = "aarch64")]
pub mod aarch64;

pub mod swar;

mod matches;
mod memcmp;
mod view;

pub use matches::{Matches, ReverseMatches};
pub use view::ByteView;

/// A needle to search for: the pattern bytes plus an *anomaly offset* naming
/// where the general scanner anchors its 4-byte prefilter window.
///
/// Callers who know a statistically rare 4-byte window of the pattern can
/// point the offset at it and slash verification cost; [`Needle::new`]
/// defaults to `0`, which prefilters on the pattern's prefix. The offset is
/// unused for patterns shorter than 5 bytes, which route to dedicated
/// kernels.
#[derive(Clone, Copy, Debug)]
pub struct Needle<'a> {
    bytes: &'a [u8],
    anomaly_offset: usize,
}

impl<'a> Needle<'a> {
    /// Creates a needle with the anomaly window anchored at the pattern
    /// prefix.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            anomaly_offset: 0,
        }
    }

    /// Creates a needle with a caller-chosen anomaly offset.
    ///
    /// # Panics
    ///
    /// Panics if the 4-byte window starting at `anomaly_offset` does not fit
    /// within the pattern, i.e. unless
    /// `anomaly_offset <= bytes.len().saturating_sub(4)`.
    #[inline]
    pub fn with_anomaly(bytes: &'a [u8], anomaly_offset: usize) -> Self {
        assert!(anomaly_offset <= bytes.len().saturating_sub(4));
        Self {
            bytes,
            anomaly_offset,
        }
    }

    /// Returns the pattern bytes.
    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the pattern length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the pattern is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the anomaly offset.
    #[inline]
    pub fn anomaly_offset(&self) -> usize {
        self.anomaly_offset
    }
}

impl<'a> From<&'a [u8]> for Needle<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for Needle<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

/// Returns the index of the first occurrence of `needle` within `haystack`,
/// or `haystack.len()` when there is none.
///
/// The empty needle matches at index `0`. Needles shorter than 4 bytes
/// always take the SWAR kernels; longer needles take the fastest vector
/// scanner the CPU supports, falling back to the scalar anomaly scanner.
#[inline]
pub fn find(haystack: &[u8], needle: &Needle<'_>) -> usize {
    let bytes = needle.bytes();
    if haystack.len() < bytes.len() {
        return haystack.len();
    }
    match bytes.len() {
        0 => 0,
        1 => swar::find_byte(haystack, bytes[0]),
        2 => swar::find_pair(haystack, bytes),
        3 => swar::find_triple(haystack, bytes),
        _ => find_long(haystack, needle),
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        /// Returns the number of occurrences of `byte` within `haystack`.
        #[inline]
        pub fn count_byte(haystack: &[u8], byte: u8) -> usize {
            unsafe { aarch64::count_byte(haystack, byte) }
        }
    } else {
        /// Returns the number of occurrences of `byte` within `haystack`.
        #[inline]
        pub fn count_byte(haystack: &[u8], byte: u8) -> usize {
            swar::count_byte(haystack, byte)
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        #[inline]
        fn avx2_available() -> bool {
            use std::sync::OnceLock;
            static AVX2: OnceLock<bool> = OnceLock::new();
            *AVX2.get_or_init(|| std::arch::is_x86_feature_detected!("avx2"))
        }

        #[inline]
        fn find_long(haystack: &[u8], needle: &Needle<'_>) -> usize {
            if avx2_available() {
                unsafe { x86::find_substring(haystack, needle) }
            } else {
                swar::find_substring(haystack, needle)
            }
        }
    } else if #[cfg(target_arch = "aarch64")] {
        #[inline]
        fn find_long(haystack: &[u8], needle: &Needle<'_>) -> usize {
            unsafe { aarch64::find_substring(haystack, needle) }
        }
    } else {
        #[inline]
        fn find_long(haystack: &[u8], needle: &Needle<'_>) -> usize {
            swar::find_substring(haystack, needle)
        }
    }
}
