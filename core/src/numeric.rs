//! Binary and hexadecimal encodings that pivot through character codes.
//!
//! Input is whitespace-separated groups, one character per group. Groups are
//! nominally 8 bits but any value that names a Unicode scalar is accepted. A
//! single bad group fails the whole conversion.

use crate::error::{MorseError, MorseResult};
use crate::transcode::encode_text;

fn groups_to_text(input: &str, radix: u32) -> MorseResult<String> {
    input
        .split_whitespace()
        .map(|group| {
            let malformed = || MorseError::MalformedGroup {
                group: group.to_string(),
                radix,
            };
            // from_str_radix alone would accept a leading '+'
            if !group.chars().all(|c| c.is_digit(radix)) {
                return Err(malformed());
            }
            let value = u32::from_str_radix(group, radix).map_err(|_| malformed())?;
            char::from_u32(value).ok_or(MorseError::InvalidCodePoint { value })
        })
        .collect()
}

/// "01001000 01001001" -> "HI"
pub fn decode_binary_to_text(binary: &str) -> MorseResult<String> {
    groups_to_text(binary, 2)
}

pub fn encode_binary_to_morse(binary: &str) -> MorseResult<String> {
    decode_binary_to_text(binary).map(|text| encode_text(&text))
}

/// "48 49" -> "HI"
pub fn decode_hex_to_text(hex: &str) -> MorseResult<String> {
    groups_to_text(hex, 16)
}

pub fn encode_hex_to_morse(hex: &str) -> MorseResult<String> {
    decode_hex_to_text(hex).map(|text| encode_text(&text))
}

/// Zero-padded 8-bit groups; wider code points use as many digits as they need.
pub fn text_to_binary(text: &str) -> String {
    text.chars()
        .map(|ch| format!("{:08b}", ch as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase, at least two digits per group.
pub fn text_to_hex(text: &str) -> String {
    text.chars()
        .map(|ch| format!("{:02X}", ch as u32))
        .collect::<Vec<_>>()
        .join(" ")
}
