//! Live playback over a clock-driven audio output.
//!
//! A Morse string becomes a list of tones, each rendered by the same
//! [`ToneRenderer`] as the export path and handed to an [`AudioOutput`] with
//! an absolute start time on that output's clock. Playback is complete once
//! the clock passes the end of the transmission.

use log::{debug, warn};

use crate::audio::ToneRenderer;
use crate::error::{MorseError, MorseResult};
use crate::timing::{tone_schedule, TimingEnvelope};
use crate::types::SignalParams;

/// Handle for one queued tone, unique per output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneId(pub u64);

/// Platform audio sink with its own clock.
///
/// Implementations are created once by the caller and owned by a
/// [`MorsePlayer`]; the library never tears them down.
pub trait AudioOutput {
    fn sample_rate(&self) -> u32;

    /// Current time on the output clock, in seconds.
    fn current_time(&self) -> f64;

    /// Queue `samples` to start at `start_at` seconds on the output clock.
    fn schedule_tone(&mut self, start_at: f64, samples: Vec<f32>) -> MorseResult<ToneId>;

    /// Drop one queued tone, silencing it if it already started.
    fn cancel_tone(&mut self, id: ToneId);

    /// Drop every queued tone and silence the one currently sounding.
    fn cancel_all(&mut self);
}

/// Completion handle for one transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    started_at: f64,
    duration_ms: f64,
    tone_count: usize,
}

impl Playback {
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Output-clock time (seconds) at which the last tone has ended.
    pub fn ends_at(&self) -> f64 {
        self.started_at + self.duration_ms / 1000.0
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn tone_count(&self) -> usize {
        self.tone_count
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.ends_at()
    }

    pub fn remaining_ms(&self, now: f64) -> f64 {
        ((self.ends_at() - now) * 1000.0).max(0.0)
    }
}

pub struct MorsePlayer<O: AudioOutput> {
    output: O,
}

impl<O: AudioOutput> MorsePlayer<O> {
    pub fn new(output: O) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Schedule every tone of `morse` relative to the output's current time.
    ///
    /// If the output rejects a tone, the tones this call already queued are
    /// cancelled and the error is returned. Tones from earlier calls keep
    /// playing.
    pub fn play(&mut self, morse: &str, params: &SignalParams) -> MorseResult<Playback> {
        let params = params.normalized()?;
        let sample_rate = self.output.sample_rate();
        if sample_rate == 0 {
            warn!("audio output unavailable: zero sample rate");
            return Err(MorseError::audio_unavailable("output reports a zero sample rate"));
        }

        let schedule = tone_schedule(morse, &TimingEnvelope::from_wpm(params.wpm));
        let mut renderer = ToneRenderer::new(&params, sample_rate);
        let started_at = self.output.current_time();

        let mut queued = Vec::with_capacity(schedule.events.len());
        for event in &schedule.events {
            let samples = renderer.render(event.duration_ms);
            let start_at = started_at + event.offset_ms / 1000.0;
            match self.output.schedule_tone(start_at, samples) {
                Ok(id) => queued.push(id),
                Err(err) => {
                    warn!(
                        "aborting playback after {} of {} tones: {err}",
                        queued.len(),
                        schedule.events.len()
                    );
                    for id in queued {
                        self.output.cancel_tone(id);
                    }
                    return Err(err);
                }
            }
        }

        debug!(
            "playing {} tones for {:.1} ms from t={:.3}s",
            schedule.events.len(),
            schedule.total_ms,
            started_at
        );

        Ok(Playback {
            started_at,
            duration_ms: schedule.total_ms,
            tone_count: schedule.events.len(),
        })
    }

    pub fn cancel(&mut self) {
        self.output.cancel_all();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTone {
    pub id: ToneId,
    pub start_at: f64,
    pub samples: Vec<f32>,
}

/// Silent output with a manually advanced clock.
///
/// Records what would have been played; useful in tests and builds without
/// an audio device.
#[derive(Debug, Default)]
pub struct NullOutput {
    sample_rate: u32,
    clock: f64,
    next_id: u64,
    scheduled: Vec<ScheduledTone>,
}

impl NullOutput {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            clock: 0.0,
            next_id: 0,
            scheduled: Vec::new(),
        }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.clock += seconds;
    }

    pub fn scheduled(&self) -> &[ScheduledTone] {
        &self.scheduled
    }
}

impl AudioOutput for NullOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.clock
    }

    fn schedule_tone(&mut self, start_at: f64, samples: Vec<f32>) -> MorseResult<ToneId> {
        let id = ToneId(self.next_id);
        self.next_id += 1;
        self.scheduled.push(ScheduledTone {
            id,
            start_at,
            samples,
        });
        Ok(id)
    }

    fn cancel_tone(&mut self, id: ToneId) {
        self.scheduled.retain(|tone| tone.id != id);
    }

    fn cancel_all(&mut self) {
        self.scheduled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SignalParams {
        SignalParams {
            wpm: 20.0,
            noise_seed: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_play_schedules_relative_to_clock() {
        let mut player = MorsePlayer::new(NullOutput::new(44100));
        player.output_mut().advance(2.0);

        let playback = player.play(".-", &params()).unwrap();
        let starts: Vec<f64> = player
            .output()
            .scheduled()
            .iter()
            .map(|t| t.start_at)
            .collect();

        assert_eq!(starts.len(), 2);
        assert_eq!(starts[0], 2.0);
        assert!((starts[1] - 2.12).abs() < 1e-12);
        assert_eq!(playback.tone_count(), 2);
        assert_eq!(playback.duration_ms(), 360.0);
        assert!((playback.ends_at() - 2.36).abs() < 1e-12);
    }

    #[test]
    fn test_completion() {
        let mut player = MorsePlayer::new(NullOutput::new(8000));
        let playback = player.play("...", &params()).unwrap();

        assert!(!playback.is_finished(0.0));
        assert!((playback.remaining_ms(0.1) - 260.0).abs() < 1e-9);
        player.output_mut().advance(0.36);
        assert!(playback.is_finished(player.output().current_time()));
        assert_eq!(playback.remaining_ms(1.0), 0.0);
    }

    #[test]
    fn test_empty_morse_finishes_immediately() {
        let mut player = MorsePlayer::new(NullOutput::new(44100));
        let playback = player.play("", &params()).unwrap();
        assert_eq!(playback.duration_ms(), 0.0);
        assert!(playback.is_finished(0.0));
        assert!(player.output().scheduled().is_empty());
    }

    #[test]
    fn test_cancel_clears_pending_tones() {
        let mut player = MorsePlayer::new(NullOutput::new(44100));
        player.play("... --- ...", &params()).unwrap();
        assert_eq!(player.output().scheduled().len(), 9);
        player.cancel();
        assert!(player.output().scheduled().is_empty());
    }

    // Accepts a fixed number of tones, then refuses the rest
    struct FailingOutput {
        inner: NullOutput,
        accept: usize,
        cancel_all_calls: usize,
    }

    impl AudioOutput for FailingOutput {
        fn sample_rate(&self) -> u32 {
            self.inner.sample_rate()
        }

        fn current_time(&self) -> f64 {
            self.inner.current_time()
        }

        fn schedule_tone(&mut self, start_at: f64, samples: Vec<f32>) -> MorseResult<ToneId> {
            if self.accept == 0 {
                return Err(MorseError::scheduling("queue full"));
            }
            self.accept -= 1;
            self.inner.schedule_tone(start_at, samples)
        }

        fn cancel_tone(&mut self, id: ToneId) {
            self.inner.cancel_tone(id);
        }

        fn cancel_all(&mut self) {
            self.cancel_all_calls += 1;
            self.inner.cancel_all();
        }
    }

    #[test]
    fn test_rejected_tone_rolls_back_this_transmission() {
        let mut player = MorsePlayer::new(FailingOutput {
            inner: NullOutput::new(44100),
            accept: 5,
            cancel_all_calls: 0,
        });

        // "--" queues two tones, then "..." gets three in before the refusal
        player.play("--", &params()).unwrap();
        let earlier: Vec<ToneId> =
            player.output().inner.scheduled().iter().map(|t| t.id).collect();
        assert_eq!(earlier.len(), 2);

        let result = player.play("... ---", &params());
        assert!(matches!(result, Err(MorseError::Scheduling { .. })));

        let remaining: Vec<ToneId> =
            player.output().inner.scheduled().iter().map(|t| t.id).collect();
        assert_eq!(remaining, earlier);
        assert_eq!(player.output().cancel_all_calls, 0);
    }

    #[test]
    fn test_first_tone_rejected() {
        let mut player = MorsePlayer::new(FailingOutput {
            inner: NullOutput::new(44100),
            accept: 0,
            cancel_all_calls: 0,
        });
        assert!(matches!(
            player.play(".", &params()),
            Err(MorseError::Scheduling { .. })
        ));
        assert!(player.output().inner.scheduled().is_empty());

        // toneless input never touches the output
        assert!(player.play("   ", &params()).is_ok());
    }

    #[test]
    fn test_cancel_tone_removes_only_that_tone() {
        let mut output = NullOutput::new(8000);
        let first = output.schedule_tone(0.0, vec![0.5; 4]).unwrap();
        let second = output.schedule_tone(1.0, vec![0.5; 4]).unwrap();
        assert_ne!(first, second);

        output.cancel_tone(first);
        assert_eq!(output.scheduled().len(), 1);
        assert_eq!(output.scheduled()[0].id, second);
    }

    #[test]
    fn test_zero_sample_rate_is_unavailable() {
        let mut player = MorsePlayer::new(NullOutput::new(0));
        assert!(matches!(
            player.play(".", &params()),
            Err(MorseError::AudioUnavailable { .. })
        ));
    }
}
