use std::f64::consts::PI;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::MorseResult;
use crate::timing::{tone_schedule, TimingEnvelope};
use crate::types::{SignalParams, ToneEvent, WaveformType};

// Audio constants
const FADE_SECONDS: f64 = 0.005; // Linear fade in and out to prevent clicks

/// Converts a duration to a whole number of samples.
pub fn ms_to_samples(duration_ms: f64, sample_rate: u32) -> usize {
    (duration_ms * sample_rate as f64 / 1000.0).round().max(0.0) as usize
}

// Waveform generation
pub fn generate_waveform(waveform_type: WaveformType, frequency: f64, time: f64) -> f64 {
    let phase = 2.0 * PI * frequency * time;

    match waveform_type {
        WaveformType::Sine => phase.sin(),

        WaveformType::Square => {
            let s = phase.sin();
            if s > 0.0 {
                1.0
            } else if s < 0.0 {
                -1.0
            } else {
                0.0
            }
        }

        WaveformType::Triangle => (2.0 / PI) * phase.sin().asin(),

        WaveformType::Sawtooth => {
            let cycles = frequency * time;
            2.0 * (cycles - (cycles + 0.5).floor())
        }
    }
}

fn create_rng(seed: u64) -> Pcg32 {
    // Use current time if seed is 0
    let seed = if seed == 0 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    } else {
        seed
    };
    Pcg32::seed_from_u64(seed)
}

/// Renders individual tones. Shared by export and live playback so both
/// produce the same samples for the same settings.
pub struct ToneRenderer {
    params: SignalParams,
    sample_rate: u32,
    fade_samples: usize,
    rng: Pcg32,
}

impl ToneRenderer {
    /// `params` are expected to be normalized already.
    pub fn new(params: &SignalParams, sample_rate: u32) -> Self {
        Self {
            params: params.clone(),
            sample_rate,
            fade_samples: (FADE_SECONDS * sample_rate as f64) as usize,
            rng: create_rng(params.noise_seed),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn tone_samples(&self, duration_ms: f64) -> usize {
        ms_to_samples(duration_ms, self.sample_rate)
    }

    /// A complete tone of the given length.
    pub fn render(&mut self, duration_ms: f64) -> Vec<f32> {
        let mut samples = vec![0.0; self.tone_samples(duration_ms)];
        let len = samples.len();
        self.render_into(&mut samples, len);
        samples
    }

    /// Write the first `out.len()` samples of a tone that is `tone_len`
    /// samples long. The envelope is always shaped for the full length.
    pub fn render_into(&mut self, out: &mut [f32], tone_len: usize) {
        // Clamp envelope lengths to the tone duration
        let fade = self.fade_samples.min(tone_len / 2);
        let release_start = tone_len - fade;
        let volume = self.params.volume;
        let noise_level = self.params.noise_level;

        for (j, sample) in out.iter_mut().enumerate().take(tone_len) {
            let t = j as f64 / self.sample_rate as f64;

            // Calculate envelope
            let envelope = if j < fade {
                j as f64 / fade as f64
            } else if j >= release_start && fade > 0 {
                (tone_len - j) as f64 / fade as f64
            } else {
                1.0
            };

            let waveform = generate_waveform(self.params.waveform, self.params.frequency_hz, t);
            let mut signal = waveform * volume * envelope;

            // Interference sits on top of the tone, outside the envelope
            if noise_level > 0.0 {
                signal += self.rng.gen_range(-1.0..1.0) * noise_level * volume;
            }

            *sample = signal as f32;
        }
    }
}

/// Render a Morse string to mono samples at `params.sample_rate`.
///
/// Silence between tones stays at zero; noise is only mixed into tones.
pub fn morse_audio(morse: &str, params: &SignalParams) -> MorseResult<Vec<f32>> {
    let params = params.normalized()?;
    let schedule = tone_schedule(morse, &TimingEnvelope::from_wpm(params.wpm));
    let mut renderer = ToneRenderer::new(&params, params.sample_rate);

    let mut samples = vec![0.0; ms_to_samples(schedule.total_ms, params.sample_rate)];
    for event in &schedule.events {
        write_tone(&mut renderer, &mut samples, event);
    }

    debug!(
        "rendered {} samples at {} Hz for {} tones",
        samples.len(),
        params.sample_rate,
        schedule.events.len()
    );
    Ok(samples)
}

fn write_tone(renderer: &mut ToneRenderer, samples: &mut [f32], event: &ToneEvent) {
    let start = ms_to_samples(event.offset_ms, renderer.sample_rate());
    let tone_len = renderer.tone_samples(event.duration_ms);
    if start >= samples.len() {
        return;
    }
    let end = (start + tone_len).min(samples.len());
    trace!("tone at sample {start}, {tone_len} samples");
    renderer.render_into(&mut samples[start..end], tone_len);
}

/// Calculate the total number of samples without rendering
pub fn morse_audio_size(morse: &str, params: &SignalParams) -> MorseResult<usize> {
    let params = params.normalized()?;
    let schedule = tone_schedule(morse, &TimingEnvelope::from_wpm(params.wpm));
    Ok(ms_to_samples(schedule.total_ms, params.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_params() -> SignalParams {
        SignalParams {
            wpm: 20.0,
            volume: 1.0,
            noise_seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_waveforms_stay_in_range() {
        for waveform in [
            WaveformType::Sine,
            WaveformType::Square,
            WaveformType::Triangle,
            WaveformType::Sawtooth,
        ] {
            for i in 0..1000 {
                let value = generate_waveform(waveform, 620.0, i as f64 / 44100.0);
                assert!((-1.0..=1.0).contains(&value), "{waveform:?} {value}");
            }
        }
    }

    #[test]
    fn test_waveform_reference_points() {
        // quarter period of a 1 Hz wave
        assert!((generate_waveform(WaveformType::Sine, 1.0, 0.25) - 1.0).abs() < 1e-12);
        assert!((generate_waveform(WaveformType::Triangle, 1.0, 0.25) - 1.0).abs() < 1e-9);
        assert_eq!(generate_waveform(WaveformType::Square, 1.0, 0.25), 1.0);
        assert_eq!(generate_waveform(WaveformType::Square, 1.0, 0.75), -1.0);
        assert_eq!(generate_waveform(WaveformType::Square, 1.0, 0.0), 0.0);
        assert!((generate_waveform(WaveformType::Sawtooth, 1.0, 0.25) - 0.5).abs() < 1e-12);
        assert!((generate_waveform(WaveformType::Sawtooth, 1.0, 0.75) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tone_fades_in_and_out() {
        let mut renderer = ToneRenderer::new(&quiet_params(), 44100);
        let tone = renderer.render(60.0);
        assert_eq!(tone.len(), 2646);
        assert_eq!(tone[0], 0.0);
        // last sample sits one step above zero on the release ramp
        let fade = 220.0;
        assert!(tone[tone.len() - 1].abs() <= (1.0 / fade) as f32 + 1e-6);
        let peak = tone.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.99);
    }

    #[test]
    fn test_short_tone_envelope_is_clamped() {
        let mut renderer = ToneRenderer::new(&quiet_params(), 1000);
        // 4 samples: fade clamps to 2
        let tone = renderer.render(4.0);
        assert_eq!(tone.len(), 4);
        assert_eq!(tone[0], 0.0);
    }

    #[test]
    fn test_noise_is_deterministic_with_seed() {
        let params = SignalParams {
            noise_level: 0.5,
            ..quiet_params()
        };
        let a = morse_audio(".-", &params).unwrap();
        let b = morse_audio(".-", &params).unwrap();
        assert_eq!(a, b);

        let clean = morse_audio(".-", &quiet_params()).unwrap();
        assert_ne!(a, clean);
    }

    #[test]
    fn test_noise_stays_out_of_gaps() {
        let params = SignalParams {
            noise_level: 1.0,
            ..quiet_params()
        };
        let samples = morse_audio(". .", &params).unwrap();
        // first dot: 60 ms tone then silence until the second dot at 300 ms
        let gap_start = ms_to_samples(60.0, 44100);
        let gap_end = ms_to_samples(300.0, 44100);
        assert!(samples[gap_start..gap_end].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_sample_count_matches_duration() {
        let params = quiet_params();
        let samples = morse_audio("... --- ...", &params).unwrap();
        assert_eq!(samples.len(), 79380); // 1.8 s at 44.1 kHz
        assert_eq!(morse_audio_size("... --- ...", &params).unwrap(), samples.len());
    }

    #[test]
    fn test_empty_morse_renders_nothing() {
        assert!(morse_audio("", &quiet_params()).unwrap().is_empty());
        assert!(morse_audio("hello", &quiet_params()).unwrap().is_empty());
    }
}
