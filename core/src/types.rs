use serde::{Deserialize, Serialize};

use crate::error::{MorseError, MorseResult};

/// Short-pulse glyph.
pub const DOT_GLYPH: char = '.';
/// Long-pulse glyph.
pub const DASH_GLYPH: char = '-';
/// Separator between the patterns of one word.
pub const LETTER_SEPARATOR: char = ' ';
/// Token standing for a space in the source text.
pub const WORD_SEPARATOR: char = '/';

/// Fixed sample rate of exported audio.
pub const EXPORT_SAMPLE_RATE: u32 = 44_100;

const MAX_SAMPLE_RATE: u32 = 192_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorseElementType {
    Dot,
    Dash,
    Gap,
}

impl MorseElementType {
    pub fn is_tone(self) -> bool {
        matches!(self, MorseElementType::Dot | MorseElementType::Dash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MorseElement {
    pub element_type: MorseElementType,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveformType {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// Speed and tone settings shared by live playback and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalParams {
    pub wpm: f64,
    pub frequency_hz: f64,
    pub waveform: WaveformType,
    pub volume: f64,
    pub noise_level: f64,
    /// Seed for the interference generator; 0 picks one from the clock.
    pub noise_seed: u64,
    pub sample_rate: u32,
}

impl SignalParams {
    pub const MIN_WPM: f64 = 5.0;
    pub const MAX_WPM: f64 = 60.0;
    pub const MIN_FREQUENCY_HZ: f64 = 300.0;
    pub const MAX_FREQUENCY_HZ: f64 = 1200.0;

    /// Clamp every field into its valid range.
    ///
    /// NaN fields fall back to their defaults. A zero or oversized sample
    /// rate cannot be repaired and is reported instead.
    pub fn normalized(&self) -> MorseResult<Self> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(MorseError::invalid_param(
                "sampleRate",
                format!("{} is outside (0, {}]", self.sample_rate, MAX_SAMPLE_RATE),
            ));
        }

        let defaults = Self::default();
        Ok(Self {
            wpm: clamp_or(self.wpm, defaults.wpm, Self::MIN_WPM, Self::MAX_WPM),
            frequency_hz: clamp_or(
                self.frequency_hz,
                defaults.frequency_hz,
                Self::MIN_FREQUENCY_HZ,
                Self::MAX_FREQUENCY_HZ,
            ),
            waveform: self.waveform,
            volume: clamp_or(self.volume, defaults.volume, 0.0, 1.0),
            noise_level: clamp_or(self.noise_level, defaults.noise_level, 0.0, 1.0),
            noise_seed: self.noise_seed,
            sample_rate: self.sample_rate,
        })
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            wpm: 18.0,
            frequency_hz: 620.0,
            waveform: WaveformType::Sine,
            volume: 0.32,
            noise_level: 0.0,
            noise_seed: 0,
            sample_rate: EXPORT_SAMPLE_RATE,
        }
    }
}

fn clamp_or(value: f64, fallback: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// One tone on the transmission timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneEvent {
    /// Start, relative to the beginning of the transmission.
    pub offset_ms: f64,
    pub duration_ms: f64,
}

impl ToneEvent {
    pub fn end_ms(&self) -> f64 {
        self.offset_ms + self.duration_ms
    }
}

/// Every tone of a Morse string, plus the length of the whole timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneSchedule {
    pub events: Vec<ToneEvent>,
    pub total_ms: f64,
}

impl ToneSchedule {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
