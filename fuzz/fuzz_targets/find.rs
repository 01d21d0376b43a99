#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spanscan::{count_byte, find, Needle};

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    needle: &'a [u8],
    haystack: &'a [u8],
    anomaly_offset: usize,
    byte: u8,
}

fuzz_target!(|input: FuzzInput<'_>| {
    let mut input = input;

    // Clamp into the documented valid range to avoid the constructor panic.
    let bound = input.needle.len().saturating_sub(4);
    if bound > 0 {
        input.anomaly_offset %= bound + 1;
    } else {
        input.anomaly_offset = 0;
    }

    let needle = Needle::with_anomaly(input.needle, input.anomaly_offset);
    let result = find(input.haystack, &needle);

    let expected = match input.needle.len() {
        0 => 0,
        len => input
            .haystack
            .windows(len)
            .position(|window| window == input.needle)
            .unwrap_or(input.haystack.len()),
    };
    assert_eq!(result, expected);

    let counted = count_byte(input.haystack, input.byte);
    let expected = input.haystack.iter().filter(|&&b| b == input.byte).count();
    assert_eq!(counted, expected);
});
