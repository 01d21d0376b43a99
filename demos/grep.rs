use memmap2::MmapOptions;
use spanscan::{swar, Needle};
use std::fs::File;

#[inline(never)]
fn search_in_slice(backend: &str, needle: &Needle<'_>, haystack: &[u8]) -> usize {
    if "auto".eq_ignore_ascii_case(backend) {
        return spanscan::find(haystack, needle);
    }
    if "swar".eq_ignore_ascii_case(backend) {
        return swar::find_substring(haystack, needle);
    }
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    if "avx2".eq_ignore_ascii_case(backend) {
        assert!(std::arch::is_x86_feature_detected!("avx2"));
        return unsafe { spanscan::x86::find_substring(haystack, needle) };
    }
    #[cfg(target_arch = "aarch64")]
    if "neon".eq_ignore_ascii_case(backend) {
        return unsafe { spanscan::aarch64::find_substring(haystack, needle) };
    }
    panic!("Invalid backend {:?}", backend);
}

fn main() {
    let usage = "./grep <auto|swar|avx2|neon> <needle> <file>";
    let mut args = std::env::args();
    args.next().expect(usage);
    let backend = args.next().expect(usage);
    let needle = args.next().expect(usage);
    let filename = args.next().expect(usage);
    let file = File::open(&filename).unwrap();
    let data = unsafe { MmapOptions::new().map(&file).unwrap() };
    let index = search_in_slice(&backend, &Needle::new(needle.as_bytes()), &data);
    if index < data.len() {
        println!("Found {:?} in {:?} at byte {}", needle, filename, index);
    } else {
        println!("No match for {:?} in {:?}", needle, filename);
    }
}
