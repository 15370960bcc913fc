// WebAssembly bindings for the browser converter widgets
use std::cell::RefCell;

use js_sys::{Function, Promise};
use morse_converter_core::{AudioOutput, MorseError, MorsePlayer as CorePlayer, Playback, SignalParams};
use wasm_bindgen::prelude::*;

mod support;
mod web_audio;

use support::PendingCompletions;
use web_audio::WebAudioOutput;

// Console logging for debugging
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn to_js(err: MorseError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// Generates `&str -> Result<String, JsValue>` wrappers around fallible core functions
macro_rules! wasm_text_fn {
    ($(#[$meta:meta])* $js_name:ident => $name:ident = $core_fn:path) => {
        $(#[$meta])*
        #[wasm_bindgen(js_name = $js_name)]
        pub fn $name(input: &str) -> Result<String, JsValue> {
            $core_fn(input).map_err(to_js)
        }
    };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

// A zero seed means "seed from the clock", which has no std backing on wasm32
fn signal_params(config_json: &str) -> Result<SignalParams, JsValue> {
    let mut params = support::parse_with_defaults::<SignalParams>(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
    if params.noise_seed == 0 {
        params.noise_seed = support::seed_from_unit(js_sys::Math::random());
    }
    Ok(params)
}

// Text conversion

#[wasm_bindgen(js_name = encodeText)]
pub fn encode_text(text: &str) -> String {
    morse_converter_core::encode_text(text)
}

#[wasm_bindgen(js_name = decodeMorse)]
pub fn decode_morse(morse: &str) -> String {
    morse_converter_core::decode_morse(morse)
}

#[wasm_bindgen(js_name = isValidMorse)]
pub fn is_valid_morse(morse: &str) -> bool {
    morse_converter_core::is_valid_morse(morse)
}

wasm_text_fn! {
    /// Like `encodeText`, but throws on the first unsupported character.
    encodeTextStrict => encode_text_strict = morse_converter_core::encode_text_strict
}

wasm_text_fn! {
    /// Like `decodeMorse`, but throws on the first unknown token.
    decodeMorseStrict => decode_morse_strict = morse_converter_core::decode_morse_strict
}

// Numeric conversion

wasm_text_fn! {
    encodeBinaryToMorse => encode_binary_to_morse = morse_converter_core::encode_binary_to_morse
}

wasm_text_fn! {
    decodeBinaryToText => decode_binary_to_text = morse_converter_core::decode_binary_to_text
}

wasm_text_fn! {
    encodeHexToMorse => encode_hex_to_morse = morse_converter_core::encode_hex_to_morse
}

wasm_text_fn! {
    decodeHexToText => decode_hex_to_text = morse_converter_core::decode_hex_to_text
}

#[wasm_bindgen(js_name = textToBinary)]
pub fn text_to_binary(text: &str) -> String {
    morse_converter_core::text_to_binary(text)
}

#[wasm_bindgen(js_name = textToHex)]
pub fn text_to_hex(text: &str) -> String {
    morse_converter_core::text_to_hex(text)
}

// Ciphers and keypad

#[wasm_bindgen(js_name = caesarEncode)]
pub fn caesar_encode(text: &str, shift: i32) -> String {
    morse_converter_core::caesar_encode(text, shift)
}

#[wasm_bindgen(js_name = caesarDecode)]
pub fn caesar_decode(text: &str, shift: i32) -> String {
    morse_converter_core::caesar_decode(text, shift)
}

#[wasm_bindgen(js_name = caesarAllShifts)]
pub fn caesar_all_shifts(text: &str) -> Vec<String> {
    morse_converter_core::caesar_all_shifts(text)
}

#[wasm_bindgen(js_name = keypadToText)]
pub fn keypad_to_text(digits: &str) -> String {
    morse_converter_core::keypad_to_text(digits)
}

#[wasm_bindgen(js_name = multiTapToText)]
pub fn multi_tap_to_text(presses: &str) -> String {
    morse_converter_core::multi_tap_to_text(presses)
}

#[wasm_bindgen(js_name = beeperCodeMeaning)]
pub fn beeper_code_meaning(code: &str) -> Option<String> {
    morse_converter_core::beeper_code_meaning(code).map(str::to_string)
}

// Timing and audio

#[wasm_bindgen(js_name = calculateTransmissionDuration)]
pub fn calculate_transmission_duration(morse: &str, wpm: f64) -> f64 {
    morse_converter_core::calculate_transmission_duration(morse, wpm)
}

/// Render `morse` to a 16-bit mono WAV file at 44.1 kHz.
#[wasm_bindgen(js_name = generateMorseAudio)]
pub fn generate_morse_audio(morse: &str, config_json: &str) -> Result<Vec<u8>, JsValue> {
    let params = signal_params(config_json)?;
    morse_converter_core::generate_morse_audio(morse, &params).map_err(to_js)
}

// A promise's resolver plus the timeout that will call it
struct Completion {
    resolve: Function,
    timeout: i32,
}

impl Completion {
    fn resolve_now(self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.timeout);
        }
        let _ = self.resolve.call0(&JsValue::NULL);
    }
}

// Resolves once the transmission has ended on the page clock
fn completion_for(playback: &Playback) -> (Promise, Option<Completion>) {
    let delay = playback.duration_ms().max(0.0).ceil() as i32;
    let mut completion = None;
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let scheduled = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window available"))
            .and_then(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, delay)
            });
        match scheduled {
            Ok(timeout) => completion = Some(Completion { resolve, timeout }),
            Err(err) => {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        }
    });
    (promise, completion)
}

/// Live playback handle. Each instance owns one audio context.
#[wasm_bindgen]
pub struct MorsePlayer {
    inner: CorePlayer<WebAudioOutput>,
    pending: PendingCompletions<Completion>,
}

#[wasm_bindgen]
impl MorsePlayer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MorsePlayer, JsValue> {
        let output = WebAudioOutput::new().map_err(to_js)?;
        Ok(MorsePlayer {
            inner: CorePlayer::new(output),
            pending: PendingCompletions::default(),
        })
    }

    /// Schedule every tone of `morse` and return a promise that resolves
    /// when the transmission has finished sounding, or early on `cancel`.
    pub fn play(&mut self, morse: &str, config_json: &str) -> Result<Promise, JsValue> {
        let params = signal_params(config_json)?;
        let playback = self.inner.play(morse, &params).map_err(|e| {
            console_log!("Morse playback failed: {}", e);
            to_js(e)
        })?;
        let (promise, completion) = completion_for(&playback);
        if let Some(completion) = completion {
            let now = self.inner.output().current_time();
            self.pending.track(playback.ends_at(), now, completion);
        }
        Ok(promise)
    }

    /// Stop every tone that is still pending or sounding and resolve the
    /// promises of the transmissions it cut short.
    pub fn cancel(&mut self) {
        self.inner.cancel();
        for completion in self.pending.take_all() {
            completion.resolve_now();
        }
    }
}

thread_local! {
    static SHARED_PLAYER: RefCell<Option<MorsePlayer>> = RefCell::new(None);
}

/// One-shot playback through a lazily created page-wide player.
#[wasm_bindgen(js_name = playMorseCode)]
pub fn play_morse_code(morse: &str, config_json: &str) -> Result<Promise, JsValue> {
    SHARED_PLAYER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(MorsePlayer::new()?);
        }
        slot.as_mut()
            .ok_or_else(|| JsValue::from_str("audio player unavailable"))?
            .play(morse, config_json)
    })
}

/// Stop whatever `playMorseCode` started.
#[wasm_bindgen(js_name = cancelMorseCode)]
pub fn cancel_morse_code() {
    SHARED_PLAYER.with(|cell| {
        if let Some(player) = cell.borrow_mut().as_mut() {
            player.cancel();
        }
    });
}
