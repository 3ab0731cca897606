//! Audio domain: procedurally generated clips, used when no file ships for a
//! sound.

use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 22_050;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Noise,
}

/// One tone: a frequency sweep with a linear decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub start_hz: f32,
    pub end_hz: f32,
    pub secs: f32,
    pub gain: f32,
}

impl Tone {
    pub const fn new(wave: Wave, start_hz: f32, end_hz: f32, secs: f32, gain: f32) -> Self {
        Self {
            wave,
            start_hz,
            end_hz,
            secs,
            gain,
        }
    }

    /// A steady pitch, for melodies.
    pub const fn note(wave: Wave, hz: f32, secs: f32, gain: f32) -> Self {
        Self::new(wave, hz, hz, secs, gain)
    }
}

/// Render tones back to back into mono samples in [-1, 1].
pub fn render(tones: &[Tone], decay: bool) -> Vec<f32> {
    let mut samples = Vec::new();
    // Xorshift for the noise wave; any fixed seed will do.
    let mut noise: u32 = 0x9E37_79B9;

    for tone in tones {
        let count = (tone.secs * SAMPLE_RATE as f32) as usize;
        let mut phase = 0.0_f32;
        for i in 0..count {
            let t = i as f32 / count.max(1) as f32;
            let hz = tone.start_hz + (tone.end_hz - tone.start_hz) * t;
            phase = (phase + hz / SAMPLE_RATE as f32).fract();

            let raw = match tone.wave {
                Wave::Sine => (phase * TAU).sin(),
                Wave::Square => {
                    if phase < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
                Wave::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
                Wave::Noise => {
                    noise ^= noise << 13;
                    noise ^= noise >> 17;
                    noise ^= noise << 5;
                    noise as f32 / u32::MAX as f32 * 2.0 - 1.0
                }
            };
            let envelope = if decay { 1.0 - t } else { 1.0 };
            samples.push((raw * tone.gain * envelope).clamp(-1.0, 1.0));
        }
    }

    samples
}

/// 16-bit mono PCM in a RIFF/WAVE container.
pub fn wav_bytes(samples: &[f32]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&pcm.to_le_bytes());
    }

    bytes
}
