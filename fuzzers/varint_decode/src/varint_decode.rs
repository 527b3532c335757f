use anyhow::{Context, Result};
use tinyfuzz::fuzzer::{Config, FuzzerBuilder};

/// Longest encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

fn main() -> Result<()> {
    let mut fuzzer = FuzzerBuilder::new()
        .with_config(Some(Config::new(0, 5_000)))
        .build();

    fuzzer
        .run(&mut round_trips)
        .context("LEB128 decode/encode round trip")?;

    println!(
        "No defect found in {} iterations",
        fuzzer.config().iterations
    );
    Ok(())
}

/// Decodes the leading varint and checks that encoding the value again
/// reproduces exactly the bytes that were consumed.
fn round_trips(input: &mut [u8]) -> bool {
    match decode(input) {
        Some((value, consumed)) => encode(value) == input[..consumed],
        None => true,
    }
}

/// Unsigned LEB128 decoder. Accepts overlong encodings such as `[0x80, 0x00]`
/// and silently drops bits that overflow the tenth byte.
fn decode(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

fn encode(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}
