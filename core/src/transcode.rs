//! Text <-> Morse conversion.
//!
//! Both directions are permissive by default: a character with no pattern is
//! written into the Morse stream as its own token, and a token with no
//! character is written back into the text unchanged. This keeps
//! `decode_morse(encode_text(x)) == x.to_uppercase()` for every input. The
//! `_strict` variants fail on the first unknown instead.

use log::warn;

use crate::error::{MorseError, MorseResult};
use crate::patterns::{get_character, get_morse_pattern};
use crate::types::{DASH_GLYPH, DOT_GLYPH, LETTER_SEPARATOR, WORD_SEPARATOR};

/// Encode text as space-separated Morse tokens, echoing unsupported characters.
pub fn encode_text(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|ch| match get_morse_pattern(ch) {
            Some(pattern) => pattern.to_string(),
            None => ch.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encode text, failing on the first character without a pattern.
pub fn encode_text_strict(text: &str) -> MorseResult<String> {
    let tokens = text
        .to_uppercase()
        .chars()
        .map(|ch| get_morse_pattern(ch).ok_or(MorseError::UnsupportedCharacter { ch }))
        .collect::<MorseResult<Vec<_>>>()?;
    Ok(tokens.join(" "))
}

/// Decode space-separated Morse tokens, echoing unrecognized tokens.
///
/// Empty tokens produced by repeated spaces are skipped.
pub fn decode_morse(morse: &str) -> String {
    tokens(morse)
        .map(|token| match get_character(token) {
            Some(ch) => ch.to_string(),
            None => token.to_string(),
        })
        .collect()
}

/// Decode Morse, failing on the first token without a character.
pub fn decode_morse_strict(morse: &str) -> MorseResult<String> {
    tokens(morse)
        .map(|token| {
            get_character(token).ok_or_else(|| {
                warn!("strict decode rejected token {token:?}");
                MorseError::UnknownToken {
                    token: token.to_string(),
                }
            })
        })
        .collect()
}

/// True iff every character is a dot, dash, space or slash.
///
/// Purely syntactic: "........" is valid even though it decodes to nothing.
pub fn is_valid_morse(input: &str) -> bool {
    input.chars().all(|ch| {
        matches!(ch, DOT_GLYPH | DASH_GLYPH | LETTER_SEPARATOR | WORD_SEPARATOR)
    })
}

fn tokens(morse: &str) -> impl Iterator<Item = &str> {
    morse.split(LETTER_SEPARATOR).filter(|token| !token.is_empty())
}
