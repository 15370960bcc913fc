//! Error types for transcoding and synthesis.

use thiserror::Error;

/// Result type for fallible Morse operations.
pub type MorseResult<T> = Result<T, MorseError>;

/// Errors that can occur while converting or sounding a message.
#[derive(Debug, Error, PartialEq)]
pub enum MorseError {
    /// A binary or hex group that does not parse in its radix.
    #[error("malformed base-{radix} group '{group}'")]
    MalformedGroup {
        /// The offending group.
        group: String,
        /// 2 or 16.
        radix: u32,
    },

    /// A parsed group that is not a Unicode scalar value.
    #[error("{value:#x} is not a valid character code")]
    InvalidCodePoint {
        /// The parsed value.
        value: u32,
    },

    /// Strict decoding met a token with no table entry.
    #[error("unknown Morse token '{token}'")]
    UnknownToken {
        /// The offending token.
        token: String,
    },

    /// Strict encoding met a character with no table entry.
    #[error("character '{ch}' has no Morse pattern")]
    UnsupportedCharacter {
        /// The offending character, after case folding.
        ch: char,
    },

    /// A substitution key that is not a permutation of A-Z.
    #[error("invalid substitution key: {reason}")]
    InvalidKey {
        /// What is wrong with the key.
        reason: String,
    },

    /// A configuration value out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name as it appears in JSON.
        name: String,
        /// Error message.
        message: String,
    },

    /// No audio output could be opened.
    #[error("audio output unavailable: {reason}")]
    AudioUnavailable {
        /// Platform-specific detail.
        reason: String,
    },

    /// The audio output refused a tone.
    #[error("failed to schedule tone: {message}")]
    Scheduling {
        /// Platform-specific detail.
        message: String,
    },
}

impl MorseError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an audio-unavailable error.
    pub fn audio_unavailable(reason: impl Into<String>) -> Self {
        Self::AudioUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a scheduling error.
    pub fn scheduling(message: impl Into<String>) -> Self {
        Self::Scheduling {
            message: message.into(),
        }
    }
}
