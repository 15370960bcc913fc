//! Phone keypad (T9 layout) and pager code helpers.

const KEYPAD: [(char, &str); 10] = [
    ('0', " "),
    ('1', ".,?!"),
    ('2', "ABC"),
    ('3', "DEF"),
    ('4', "GHI"),
    ('5', "JKL"),
    ('6', "MNO"),
    ('7', "PQRS"),
    ('8', "TUV"),
    ('9', "WXYZ"),
];

const BEEPER_CODES: &[(&str, &str)] = &[
    ("07734", "Hello (upside down on a calculator)"),
    ("143", "I love you"),
    ("1437", "I love you forever"),
    ("187", "Police code for murder"),
    ("411", "Information"),
    ("420", "Marijuana culture reference"),
    ("459", "I love you (I-L-Y on the keypad)"),
    ("555", "Fake phone number prefix"),
    ("823", "Thinking of you"),
    ("911", "Emergency, call me now"),
];

fn key_letters(key: char) -> Option<&'static str> {
    KEYPAD
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, letters)| *letters)
}

/// One press per letter: each key yields its first letter.
pub fn keypad_to_text(input: &str) -> String {
    input
        .chars()
        .map(|ch| {
            key_letters(ch)
                .and_then(|letters| letters.chars().next())
                .unwrap_or(ch)
        })
        .collect()
}

/// Multi-tap: a run of n presses on one key selects its n-th letter, wrapping.
///
/// Whitespace separates two runs on the same key ("44 444" is "HI") and is
/// otherwise dropped. Characters that are not keys pass through.
pub fn multi_tap_to_text(input: &str) -> String {
    let mut text = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        let Some(letters) = key_letters(ch) else {
            text.push(ch);
            continue;
        };

        let mut presses = 1;
        while chars.peek() == Some(&ch) {
            chars.next();
            presses += 1;
        }
        if let Some(letter) = letters.chars().cycle().nth(presses - 1) {
            text.push(letter);
        }
    }

    text
}

fn letter_key(ch: char) -> Option<(char, usize)> {
    let upper = ch.to_ascii_uppercase();
    KEYPAD.iter().find_map(|&(key, letters)| {
        letters.find(upper).map(|index| (key, index + 1))
    })
}

/// "HELLO" -> "43556". Characters without a key are dropped.
pub fn text_to_keypad(text: &str) -> String {
    text.chars()
        .filter_map(letter_key)
        .map(|(key, _)| key)
        .collect()
}

/// "HELLO" -> "44 33 555 555 666". Characters without a key are dropped.
pub fn text_to_multi_tap(text: &str) -> String {
    text.chars()
        .filter_map(letter_key)
        .map(|(key, presses)| key.to_string().repeat(presses))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Meaning of a well-known numeric pager code.
pub fn beeper_code_meaning(code: &str) -> Option<&'static str> {
    let code = code.trim();
    BEEPER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, meaning)| *meaning)
}
