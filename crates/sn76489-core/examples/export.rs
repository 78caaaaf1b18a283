//! Renders a short SN76489 jingle to a WAV file.
//!
//! Run with: cargo run --example export -p sn76489 -- [output.wav]

use sn76489::{Sn76489, Variant};
use std::env;

const SMS_CLOCK: u32 = 3_579_545;
const SAMPLE_RATE: u32 = 48_000;
const CLOCKS_PER_FRAME: u32 = SMS_CLOCK / 60;

/// A small arpeggio: (frame, channel, divider, attenuation) events.
const SCORE: &[(u32, u8, u16, u8)] = &[
    (0, 0, 254, 0),    // A4
    (15, 1, 202, 2),   // C#5
    (30, 2, 170, 2),   // E5
    (45, 0, 127, 0),   // A5
    (90, 0, 0x3ff, 15), // fade everything
    (90, 1, 0x3ff, 15),
    (90, 2, 0x3ff, 15),
];

fn write_tone(chip: &mut Sn76489, channel: u8, divider: u16, attenuation: u8) {
    chip.write(0x80 | (channel << 5) | (divider & 0x0f) as u8);
    chip.write((divider >> 4) as u8);
    chip.write(0x90 | (channel << 5) | attenuation);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args().nth(1).unwrap_or_else(|| "jingle.wav".into());

    let mut chip = Sn76489::new(SMS_CLOCK, SAMPLE_RATE, 1024, Variant::SEGA);
    chip.set_gain(0.5);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec)?;

    // The mix is unipolar in [0, 4 * gain]; map that full range onto the
    // signed sample range before widening to i16.
    let full_scale = 4.0 * chip.gain();

    let total_frames = 120;
    for frame in 0..total_frames {
        for &(at, channel, divider, attenuation) in SCORE {
            if at == frame {
                write_tone(&mut chip, channel, divider, attenuation);
            }
        }

        chip.generate_samples(CLOCKS_PER_FRAME);
        for &sample in chip.mixed_buffer() {
            let centered = (2.0 * sample / full_scale - 1.0).clamp(-1.0, 1.0);
            writer.write_sample((centered * f32::from(i16::MAX)) as i16)?;
        }
    }

    writer.finalize()?;
    println!("Wrote {} seconds of audio to {path}", total_frames / 60);
    Ok(())
}
