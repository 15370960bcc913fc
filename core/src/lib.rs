// Morse code conversion library
// Text, binary and hex transcoding plus tone synthesis and WAV export

pub mod audio;
pub mod cipher;
pub mod error;
pub mod keypad;
pub mod numeric;
pub mod patterns;
pub mod playback;
pub mod timing;
pub mod transcode;
pub mod types;
pub mod wav;

// Re-export main public API
pub use audio::{morse_audio, morse_audio_size, ToneRenderer};
pub use cipher::{
    caesar_all_shifts, caesar_decode, caesar_encode, letter_frequencies, rot13, SubstitutionKey,
};
pub use error::{MorseError, MorseResult};
pub use keypad::{
    beeper_code_meaning, keypad_to_text, multi_tap_to_text, text_to_keypad, text_to_multi_tap,
};
pub use numeric::{
    decode_binary_to_text, decode_hex_to_text, encode_binary_to_morse, encode_hex_to_morse,
    text_to_binary, text_to_hex,
};
pub use patterns::morse_code_chart;
pub use playback::{AudioOutput, MorsePlayer, NullOutput, Playback, ToneId};
pub use timing::{calculate_transmission_duration, morse_timing, tone_schedule, TimingEnvelope};
pub use transcode::{
    decode_morse, decode_morse_strict, encode_text, encode_text_strict, is_valid_morse,
};
pub use types::*;

// Public API for direct Rust usage
pub fn generate_morse_timing(morse: &str, wpm: f64) -> Vec<MorseElement> {
    timing::morse_timing(morse, &TimingEnvelope::from_wpm(wpm))
}

/// Render a Morse string and package it as a mono 16-bit WAV file.
///
/// Pure byte construction: no audio device is involved.
pub fn generate_morse_audio(morse: &str, params: &SignalParams) -> MorseResult<Vec<u8>> {
    let params = params.normalized()?;
    let samples = audio::morse_audio(morse, &params)?;
    Ok(wav::wav_bytes(&samples, params.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_timing() {
        let result = generate_morse_timing(".", 20.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].element_type, MorseElementType::Dot);
        assert_eq!(result[1].element_type, MorseElementType::Gap);
    }

    #[test]
    fn test_text_to_timing() {
        let result = generate_morse_timing(&encode_text("SOS"), 20.0);
        assert!(result
            .iter()
            .any(|e| e.element_type == MorseElementType::Dot));
        assert!(result
            .iter()
            .any(|e| e.element_type == MorseElementType::Dash));
        assert_eq!(result.iter().filter(|e| e.element_type.is_tone()).count(), 9);
    }

    #[test]
    fn test_wpm_affects_timing() {
        let fast_result = generate_morse_timing(".", 40.0);
        let slow_result = generate_morse_timing(".", 10.0);
        assert!(fast_result[0].duration_ms < slow_result[0].duration_ms);
    }

    #[test]
    fn test_audio_generation() {
        let wav = generate_morse_audio(".", &SignalParams::default()).unwrap();
        assert!(wav.len() > wav::WAV_HEADER_LEN);
        assert_eq!(&wav[0..4], b"RIFF");
    }

    #[test]
    fn test_audio_generation_rejects_bad_sample_rate() {
        let params = SignalParams {
            sample_rate: 500_000,
            ..Default::default()
        };
        assert!(generate_morse_audio(".", &params).is_err());
    }
}
