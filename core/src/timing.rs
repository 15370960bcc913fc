use log::debug;

use crate::types::{
    MorseElement, MorseElementType, SignalParams, ToneEvent, ToneSchedule, DASH_GLYPH, DOT_GLYPH,
    LETTER_SEPARATOR, WORD_SEPARATOR,
};

// PARIS timing constants
const DOT_LENGTH_WPM_MS: f64 = 1200.0; // Standard formula: dot duration = 1200 / WPM milliseconds
const DOTS_PER_DASH: f64 = 3.0;
const DOTS_PER_SYMBOL_GAP: f64 = 1.0; // Silence after every dot or dash
const DOTS_PER_LETTER_GAP: f64 = 3.0;
const DOTS_PER_WORD_GAP: f64 = 7.0;

/// Durations in milliseconds derived from a speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingEnvelope {
    pub dot_ms: f64,
    pub dash_ms: f64,
    pub symbol_gap_ms: f64,
    pub letter_gap_ms: f64,
    pub word_gap_ms: f64,
}

impl TimingEnvelope {
    /// Speeds outside [5, 60] WPM are clamped; NaN uses the default speed.
    pub fn from_wpm(wpm: f64) -> Self {
        let wpm = if wpm.is_nan() {
            SignalParams::default().wpm
        } else {
            wpm.clamp(SignalParams::MIN_WPM, SignalParams::MAX_WPM)
        };
        let dot_ms = DOT_LENGTH_WPM_MS / wpm;
        Self {
            dot_ms,
            dash_ms: dot_ms * DOTS_PER_DASH,
            symbol_gap_ms: dot_ms * DOTS_PER_SYMBOL_GAP,
            letter_gap_ms: dot_ms * DOTS_PER_LETTER_GAP,
            word_gap_ms: dot_ms * DOTS_PER_WORD_GAP,
        }
    }

    // (tone, timeline advance) for one character of a Morse string
    fn step(&self, symbol: char) -> Option<(Option<f64>, f64)> {
        match symbol {
            DOT_GLYPH => Some((Some(self.dot_ms), self.dot_ms + self.symbol_gap_ms)),
            DASH_GLYPH => Some((Some(self.dash_ms), self.dash_ms + self.symbol_gap_ms)),
            LETTER_SEPARATOR => Some((None, self.letter_gap_ms)),
            WORD_SEPARATOR => Some((None, self.word_gap_ms)),
            _ => None,
        }
    }
}

/// Expand a Morse string into tone and gap elements.
///
/// Every dot and dash is followed by a one-unit gap. Spaces and slashes add
/// letter and word gaps on top of that; other characters are ignored.
pub fn morse_timing(morse: &str, envelope: &TimingEnvelope) -> Vec<MorseElement> {
    let mut elements = Vec::new();

    for symbol in morse.chars() {
        let Some((tone, advance)) = envelope.step(symbol) else {
            continue;
        };
        match tone {
            Some(duration_ms) => {
                let element_type = if symbol == DOT_GLYPH {
                    MorseElementType::Dot
                } else {
                    MorseElementType::Dash
                };
                elements.push(MorseElement {
                    element_type,
                    duration_ms,
                });
                elements.push(MorseElement {
                    element_type: MorseElementType::Gap,
                    duration_ms: advance - duration_ms,
                });
            }
            None => elements.push(MorseElement {
                element_type: MorseElementType::Gap,
                duration_ms: advance,
            }),
        }
    }

    elements
}

/// Place every tone of a Morse string on a timeline starting at zero.
pub fn tone_schedule(morse: &str, envelope: &TimingEnvelope) -> ToneSchedule {
    let mut events = Vec::new();
    let mut offset_ms = 0.0;

    for symbol in morse.chars() {
        let Some((tone, advance)) = envelope.step(symbol) else {
            continue;
        };
        if let Some(duration_ms) = tone {
            events.push(ToneEvent {
                offset_ms,
                duration_ms,
            });
        }
        offset_ms += advance;
    }

    debug!(
        "scheduled {} tones over {:.1} ms ({:.2} ms per unit)",
        events.len(),
        offset_ms,
        envelope.dot_ms
    );

    ToneSchedule {
        events,
        total_ms: offset_ms,
    }
}

/// Total length of a transmission in milliseconds, without rendering it.
pub fn calculate_transmission_duration(morse: &str, wpm: f64) -> f64 {
    let envelope = TimingEnvelope::from_wpm(wpm);
    morse
        .chars()
        .filter_map(|symbol| envelope.step(symbol))
        .fold(0.0, |total, (_, advance)| total + advance)
}
