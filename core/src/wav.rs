//! Uncompressed WAV container writer.
//!
//! Output is always a canonical 44-byte RIFF/WAVE header followed by 16-bit
//! little-endian PCM, which every common player accepts.

use std::io::{self, Write};

/// Size of the canonical header in bytes.
pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit mono.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = pcm_data.len() as u32;
    let file_size = 36 + data_size; // Total file size minus the 8-byte RIFF preamble

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&FMT_CHUNK_LEN.to_le_bytes())?;
    writer.write_all(&PCM_FORMAT.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Converts samples to 16-bit PCM bytes, clipping to [-1, 1].
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        let value = (clipped * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }

    pcm
}

/// Packages mono samples as an in-memory WAV file.
pub fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let pcm = samples_to_pcm16(samples);
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    // Vec<u8> implements Write infallibly
    let _ = write_wav(&mut buffer, &WavFormat::mono(sample_rate), &pcm);
    buffer
}
