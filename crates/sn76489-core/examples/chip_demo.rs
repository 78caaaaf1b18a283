//! SN76489 chip demo: programs a chord with noise percussion and prints
//! per-frame output statistics.
//!
//! Run with: cargo run --example chip_demo -p sn76489

use sn76489::{Sn76489, Variant};

const SMS_CLOCK: u32 = 3_579_545;
const SAMPLE_RATE: u32 = 48_000;
const FRAMES: u32 = 60;
const CLOCKS_PER_FRAME: u32 = SMS_CLOCK / 60;

/// Tone divider for a frequency in Hz: freq = clock / (32 * divider).
fn divider_for(freq: f64) -> u16 {
    (f64::from(SMS_CLOCK) / (32.0 * freq)).round() as u16
}

fn program_tone(chip: &mut Sn76489, channel: u8, divider: u16, attenuation: u8) {
    chip.write(0x80 | (channel << 5) | (divider & 0x0f) as u8);
    chip.write((divider >> 4) as u8);
    chip.write(0x90 | (channel << 5) | attenuation);
}

fn main() {
    let mut chip = Sn76489::new(SMS_CLOCK, SAMPLE_RATE, 1024, Variant::SEGA);

    // A major chord
    program_tone(&mut chip, 0, divider_for(440.0), 0);
    program_tone(&mut chip, 1, divider_for(554.4), 2);
    program_tone(&mut chip, 2, divider_for(659.3), 2);

    // White noise hi-hat, silent until frame 30
    chip.write(0xe4);
    chip.write(0xff);

    println!(
        "SN76489 demo: {:.2} clocks/sample, {CLOCKS_PER_FRAME} clocks/frame",
        chip.clocks_per_sample()
    );

    for frame in 0..FRAMES {
        if frame == 30 {
            chip.write(0xf4); // bring in the noise
        }

        let dropped = chip.generate_samples(CLOCKS_PER_FRAME);
        let mixed = chip.mixed_buffer();
        let peak = mixed.iter().cloned().fold(0.0f32, f32::max);
        let rms =
            (mixed.iter().map(|s| s * s).sum::<f32>() / mixed.len().max(1) as f32).sqrt();

        println!(
            "frame {frame:2}: {} samples, dropped {dropped}, peak {peak:.3}, rms {rms:.3}",
            mixed.len()
        );
    }
}
