//! Caesar and simple substitution ciphers over the ASCII alphabet.

use crate::error::{MorseError, MorseResult};

const ALPHABET_LEN: u8 = 26;

fn normalize_shift(shift: i32) -> u8 {
    shift.rem_euclid(ALPHABET_LEN as i32) as u8
}

fn rotate(ch: char, shift: u8) -> char {
    let base = match ch {
        'A'..='Z' => b'A',
        'a'..='z' => b'a',
        _ => return ch,
    };
    (base + (ch as u8 - base + shift) % ALPHABET_LEN) as char
}

/// Rotate ASCII letters forward by `shift`, preserving case.
///
/// Any shift is accepted and reduced modulo 26, so -1 and 25 are the same.
pub fn caesar_encode(text: &str, shift: i32) -> String {
    let shift = normalize_shift(shift);
    text.chars().map(|ch| rotate(ch, shift)).collect()
}

pub fn caesar_decode(text: &str, shift: i32) -> String {
    let inverse = ALPHABET_LEN - normalize_shift(shift);
    caesar_encode(text, inverse as i32)
}

pub fn rot13(text: &str) -> String {
    caesar_encode(text, 13)
}

/// Every candidate decoding, indexed by shift (0..26).
pub fn caesar_all_shifts(text: &str) -> Vec<String> {
    (0..ALPHABET_LEN as i32)
        .map(|shift| caesar_decode(text, shift))
        .collect()
}

/// A monoalphabetic key: position i holds the cipher letter for plain letter i.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionKey {
    forward: [u8; 26],
    inverse: [u8; 26],
}

impl SubstitutionKey {
    /// Build a key from 26 distinct letters, e.g. "QWERTYUIOPASDFGHJKLZXCVBNM".
    pub fn new(key: &str) -> MorseResult<Self> {
        let letters: Vec<char> = key.chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.len() != ALPHABET_LEN as usize {
            return Err(MorseError::InvalidKey {
                reason: format!("expected 26 letters, got {}", letters.len()),
            });
        }

        let mut forward = [0u8; 26];
        let mut inverse = [u8::MAX; 26];
        for (plain, &cipher) in letters.iter().enumerate() {
            if !cipher.is_ascii_uppercase() {
                return Err(MorseError::InvalidKey {
                    reason: format!("'{cipher}' is not a letter"),
                });
            }
            let slot = (cipher as u8 - b'A') as usize;
            if inverse[slot] != u8::MAX {
                return Err(MorseError::InvalidKey {
                    reason: format!("'{cipher}' appears more than once"),
                });
            }
            forward[plain] = slot as u8;
            inverse[slot] = plain as u8;
        }

        Ok(Self { forward, inverse })
    }

    pub fn encode(&self, text: &str) -> String {
        text.chars().map(|ch| substitute(ch, &self.forward)).collect()
    }

    pub fn decode(&self, text: &str) -> String {
        text.chars().map(|ch| substitute(ch, &self.inverse)).collect()
    }
}

fn substitute(ch: char, table: &[u8; 26]) -> char {
    let base = match ch {
        'A'..='Z' => b'A',
        'a'..='z' => b'a',
        _ => return ch,
    };
    (base + table[(ch as u8 - base) as usize]) as char
}

/// Letter counts for cryptogram solving, most frequent first.
///
/// Case-insensitive; letters that never occur are omitted.
pub fn letter_frequencies(text: &str) -> Vec<(char, usize)> {
    let mut counts = [0usize; 26];
    for ch in text.chars().filter(char::is_ascii_alphabetic) {
        counts[(ch.to_ascii_uppercase() as u8 - b'A') as usize] += 1;
    }

    let mut frequencies: Vec<(char, usize)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| ((b'A' + i as u8) as char, count))
        .collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_caesar_hello_world() {
        assert_eq!(caesar_encode("HELLO WORLD", 3), "KHOOR ZRUOG");
        assert_eq!(caesar_decode("KHOOR ZRUOG", 3), "HELLO WORLD");
    }

    #[test]
    fn test_caesar_preserves_case_and_punctuation() {
        assert_eq!(caesar_encode("Zebra, 42!", 1), "Afcsb, 42!");
    }

    #[test]
    fn test_caesar_zero_shift_is_identity() {
        assert_eq!(caesar_encode("Attack at dawn", 0), "Attack at dawn");
        assert_eq!(caesar_decode("Attack at dawn", 0), "Attack at dawn");
        assert_eq!(caesar_decode("Attack at dawn", 26), "Attack at dawn");
    }

    #[test]
    fn test_caesar_negative_and_large_shifts() {
        assert_eq!(caesar_encode("abc", -1), "zab");
        assert_eq!(caesar_encode("abc", 27), "bcd");
        assert_eq!(caesar_decode("zab", -1), "abc");
    }

    #[test]
    fn test_caesar_involution() {
        let text = "The quick brown fox jumps over the lazy dog.";
        for shift in 0..26 {
            assert_eq!(caesar_decode(&caesar_encode(text, shift), shift), text);
        }
    }

    #[test]
    fn test_caesar_non_ascii_untouched() {
        assert_eq!(caesar_encode("Ärger", 1), "Äshfs");
    }

    #[test]
    fn test_rot13_is_self_inverse() {
        assert_eq!(rot13("Hello"), "Uryyb");
        assert_eq!(rot13(&rot13("Hello")), "Hello");
    }

    #[test]
    fn test_all_shifts_contains_plaintext() {
        let candidates = caesar_all_shifts("KHOOR");
        assert_eq!(candidates.len(), 26);
        assert_eq!(candidates[0], "KHOOR");
        assert_eq!(candidates[3], "HELLO");
    }

    #[test]
    fn test_substitution_round_trip() {
        let key = SubstitutionKey::new("qwertyuiopasdfghjklzxcvbnm").unwrap();
        let cipher = key.encode("Hello, World");
        assert_eq!(cipher, "Itssg, Vgksr");
        assert_eq!(key.decode(&cipher), "Hello, World");
    }

    #[test]
    fn test_substitution_key_validation() {
        assert!(matches!(
            SubstitutionKey::new("ABC"),
            Err(MorseError::InvalidKey { .. })
        ));
        assert!(SubstitutionKey::new("AACDEFGHIJKLMNOPQRSTUVWXYZ").is_err());
        assert!(SubstitutionKey::new("ABCDEFGHIJKLMNOPQRSTUVWXY1").is_err());
    }

    #[test]
    fn test_substitution_key_rejects_non_ascii_letters() {
        assert_eq!(
            SubstitutionKey::new("ÄBCDEFGHIJKLMNOPQRSTUVWXYZ").err(),
            Some(MorseError::InvalidKey {
                reason: "'Ä' is not a letter".to_string()
            })
        );
        assert_eq!(
            SubstitutionKey::new("ÄÖÜ").err(),
            Some(MorseError::InvalidKey {
                reason: "expected 26 letters, got 3".to_string()
            })
        );
    }

    #[test]
    fn test_letter_frequencies() {
        assert_eq!(
            letter_frequencies("Hello, hello!"),
            vec![('L', 4), ('E', 2), ('H', 2), ('O', 2)]
        );
        assert!(letter_frequencies("123").is_empty());
    }
}
