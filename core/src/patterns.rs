// Morse code pattern lookup table - O(1) character-to-pattern mapping
use std::collections::HashMap;
use std::sync::OnceLock;

pub type MorsePattern = &'static str;

// Chart order: letters, digits, punctuation, then the word separator.
const CHART: &[(u8, MorsePattern)] = &[
    (b'A', ".-"),
    (b'B', "-..."),
    (b'C', "-.-."),
    (b'D', "-.."),
    (b'E', "."),
    (b'F', "..-."),
    (b'G', "--."),
    (b'H', "...."),
    (b'I', ".."),
    (b'J', ".---"),
    (b'K', "-.-"),
    (b'L', ".-.."),
    (b'M', "--"),
    (b'N', "-."),
    (b'O', "---"),
    (b'P', ".--."),
    (b'Q', "--.-"),
    (b'R', ".-."),
    (b'S', "..."),
    (b'T', "-"),
    (b'U', "..-"),
    (b'V', "...-"),
    (b'W', ".--"),
    (b'X', "-..-"),
    (b'Y', "-.--"),
    (b'Z', "--.."),
    (b'0', "-----"),
    (b'1', ".----"),
    (b'2', "..---"),
    (b'3', "...--"),
    (b'4', "....-"),
    (b'5', "....."),
    (b'6', "-...."),
    (b'7', "--..."),
    (b'8', "---.."),
    (b'9', "----."),
    (b'.', ".-.-.-"),
    (b',', "--..--"),
    (b'?', "..--.."),
    (b'\'', ".----."),
    (b'!', "-.-.--"),
    (b'/', "-..-."),
    (b'(', "-.--."),
    (b')', "-.--.-"),
    (b'&', ".-..."),
    (b':', "---..."),
    (b';', "-.-.-."),
    (b'=', "-...-"),
    (b'+', ".-.-."),
    (b'-', "-....-"),
    (b'_', "..--.-"),
    (b'"', ".-..-."),
    (b'$', "...-..-"),
    (b'@', ".--.-."),
    (b' ', "/"),
];

// Direct lookup table for O(1) access - 256 entries for all possible bytes
static MORSE_PATTERNS: [Option<MorsePattern>; 256] = {
    let mut patterns = [None; 256];
    let mut i = 0;
    while i < CHART.len() {
        let (ch, pattern) = CHART[i];
        patterns[ch as usize] = Some(pattern);
        // Lowercase letters share the uppercase pattern
        if ch.is_ascii_uppercase() {
            patterns[ch.to_ascii_lowercase() as usize] = Some(pattern);
        }
        i += 1;
    }
    patterns
};

static CHARACTERS: OnceLock<HashMap<MorsePattern, char>> = OnceLock::new();

/// Get morse pattern for a character - O(1) lookup
pub fn get_morse_pattern(ch: char) -> Option<MorsePattern> {
    if ch.is_ascii() {
        MORSE_PATTERNS[ch as usize]
    } else {
        None
    }
}

/// Reverse lookup. Patterns carry no case, so letters come back uppercase.
pub fn get_character(pattern: &str) -> Option<char> {
    CHARACTERS
        .get_or_init(|| {
            CHART
                .iter()
                .map(|&(ch, pattern)| (pattern, ch as char))
                .collect()
        })
        .get(pattern)
        .copied()
}

/// The full table in chart order, for reference displays.
pub fn morse_code_chart() -> impl Iterator<Item = (char, MorsePattern)> {
    CHART.iter().map(|&(ch, pattern)| (ch as char, pattern))
}
