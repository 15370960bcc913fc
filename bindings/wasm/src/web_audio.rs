//! Web Audio implementation of the core's audio output.
//!
//! Each tone arrives pre-rendered and is played by its own
//! `AudioBufferSourceNode`, started at an absolute time on the context clock.

use morse_converter_core::{AudioOutput, MorseError, MorseResult, ToneId};
use wasm_bindgen::JsValue;
use web_sys::{AudioBufferSourceNode, AudioContext};

pub struct WebAudioOutput {
    context: AudioContext,
    next_id: u64,
    // Every tone that may still be pending or sounding
    sources: Vec<Source>,
}

struct Source {
    id: ToneId,
    ends_at: f64,
    node: AudioBufferSourceNode,
}

impl Source {
    fn silence(&self) {
        // stop() throws for nodes that already ended; nothing to do then
        let _ = self.node.stop();
        let _ = self.node.disconnect();
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn scheduling_error(value: JsValue) -> MorseError {
    MorseError::scheduling(describe(&value))
}

impl WebAudioOutput {
    /// Open an audio context. Fails when the page has no audio subsystem.
    pub fn new() -> MorseResult<Self> {
        let context =
            AudioContext::new().map_err(|e| MorseError::audio_unavailable(describe(&e)))?;
        Ok(Self {
            context,
            next_id: 0,
            sources: Vec::new(),
        })
    }

    fn prune_finished(&mut self) {
        let now = self.context.current_time();
        self.sources.retain(|source| source.ends_at > now);
    }
}

impl AudioOutput for WebAudioOutput {
    fn sample_rate(&self) -> u32 {
        self.context.sample_rate() as u32
    }

    fn current_time(&self) -> f64 {
        self.context.current_time()
    }

    fn schedule_tone(&mut self, start_at: f64, mut samples: Vec<f32>) -> MorseResult<ToneId> {
        let id = ToneId(self.next_id);
        self.next_id += 1;
        if samples.is_empty() {
            return Ok(id);
        }
        self.prune_finished();

        // Contexts created before a user gesture start suspended
        let _ = self.context.resume();

        let sample_rate = self.context.sample_rate();
        let buffer = self
            .context
            .create_buffer(1, samples.len() as u32, sample_rate)
            .map_err(scheduling_error)?;
        buffer
            .copy_to_channel(&mut samples, 0)
            .map_err(scheduling_error)?;

        let source = self
            .context
            .create_buffer_source()
            .map_err(scheduling_error)?;
        source.set_buffer(Some(&buffer));
        source
            .connect_with_audio_node(&self.context.destination())
            .map_err(scheduling_error)?;
        source.start_with_when(start_at).map_err(scheduling_error)?;

        self.sources.push(Source {
            id,
            ends_at: start_at + samples.len() as f64 / sample_rate as f64,
            node: source,
        });
        Ok(id)
    }

    fn cancel_tone(&mut self, id: ToneId) {
        if let Some(index) = self.sources.iter().position(|source| source.id == id) {
            self.sources.remove(index).silence();
        }
    }

    fn cancel_all(&mut self) {
        for source in self.sources.drain(..) {
            source.silence();
        }
    }
}
