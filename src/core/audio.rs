//! Waveform postprocessing and WAV container encoding
//!
//! Backends return raw f32 waveforms; this module scales them to 16-bit
//! signed PCM and wraps the samples in an in-memory WAV container for
//! delivery over HTTP or WebSocket frames.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::errors::AudioError;

/// Quantized mono audio ready for container encoding.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioClip {
    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Scale a raw waveform so its peak hits full scale, then quantize to
/// 16-bit signed PCM.
///
/// An all-zero waveform has no peak to scale by; it is treated as already
/// silent and quantized directly, never dividing by zero.
pub fn quantize_waveform(waveform: &[f32], sample_rate: u32) -> AudioClip {
    let peak = waveform.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));

    let samples = if peak > 0.0 {
        let scale = f32::from(i16::MAX) / peak;
        waveform
            .iter()
            .map(|s| (s * scale).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16)
            .collect()
    } else {
        vec![0i16; waveform.len()]
    };

    AudioClip {
        samples,
        sample_rate,
    }
}

/// Encode a clip as a complete mono 16-bit WAV file in memory.
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| AudioError::Encode(e.to_string()))?;
        for &sample in &clip.samples {
            writer
                .write_sample(sample)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioError::Encode(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_scales_peak_to_full_range() {
        let clip = quantize_waveform(&[0.0, 0.25, -0.5], 16_000);
        assert_eq!(clip.samples[0], 0);
        assert_eq!(clip.samples[2], -i16::MAX);
        // Half of the peak maps to half of full scale.
        assert!((clip.samples[1] - i16::MAX / 2).abs() <= 1);
    }

    #[test]
    fn zero_waveform_does_not_fault() {
        let clip = quantize_waveform(&[0.0; 128], 22_050);
        assert_eq!(clip.samples.len(), 128);
        assert!(clip.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn empty_waveform_yields_empty_clip() {
        let clip = quantize_waveform(&[], 22_050);
        assert!(clip.samples.is_empty());
    }

    #[test]
    fn wav_round_trips_samples_and_rate() {
        let clip = quantize_waveform(&[0.1, -0.2, 0.3, -0.4], 16_000);
        let bytes = encode_wav(&clip).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 16_000);
        assert_eq!(reader.spec().channels, 1);
        let decoded: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(decoded, clip.samples);
    }

    #[test]
    fn duration_tracks_sample_count() {
        let clip = AudioClip {
            samples: vec![0; 22_050],
            sample_rate: 22_050,
        };
        assert!((clip.duration_secs() - 1.0).abs() < 1e-9);
    }
}
