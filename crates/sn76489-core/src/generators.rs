//! Sound generators for the SN76489 PSG
//!
//! The individual signal sources clocked once per internal tick (every 16
//! input clocks):
//! - Tone generators (3 channels, divide-by-N square waves)
//! - Noise generator (LFSR with a half-rate shift clock)

use crate::variant::Variant;

/// Number of tone channels
pub(crate) const NUM_TONES: usize = 3;

/// Counter reload values for the fixed noise rates (rate field 0..=2).
const NOISE_RATES: [u16; 3] = [0x10, 0x20, 0x40];

/// Square-wave tone generator for a single channel.
///
/// A 10-bit down-counter toggles the output level each time it expires, so a
/// divider value of N produces a half-period of N internal ticks (full
/// period 2N).
#[derive(Clone, Debug, Default)]
pub(crate) struct ToneGenerator {
    /// 10-bit frequency divider from the register file
    pub(crate) reg: u16,
    /// Current down-counter value
    pub(crate) counter: u16,
    /// Square-wave output level
    pub(crate) output: bool,
}

impl ToneGenerator {
    /// Replace the low 4 bits of the divider (latch/data byte nibble).
    #[inline]
    pub fn set_low_nibble(&mut self, data: u8) {
        self.reg = (self.reg & 0x3f0) | (data & 0x0f) as u16;
    }

    /// Replace the high 6 bits of the divider (data byte).
    #[inline]
    pub fn set_high_bits(&mut self, data: u8) {
        self.reg = (self.reg & 0x00f) | (((data & 0x3f) as u16) << 4);
    }

    /// Advance one internal tick.
    ///
    /// `tone_zero_value` is the reload used while the divider register is 0:
    /// 1 on Sega (output toggles every tick, effectively a DC level) or
    /// 1024 on TI.
    #[inline]
    pub fn tick(&mut self, tone_zero_value: u16) {
        if self.counter > 0 {
            self.counter -= 1;
        }
        if self.counter == 0 {
            self.counter = if self.reg == 0 {
                tone_zero_value
            } else {
                self.reg
            };
            self.output = !self.output;
        }
    }

    /// Reset to power-on state.
    pub fn reset(&mut self) {
        self.reg = 0;
        self.counter = 0;
        self.output = false;
    }
}

/// Noise generator.
///
/// The down-counter runs like a tone channel, but the shift register clocks
/// at half the counter rate: each counter expiry inverts an internal toggle
/// flag, and only on the toggle's rising edge is the audio output bit
/// captured and the LFSR shifted. The audio contribution is the captured
/// bit, not the live LSB of the shift register.
#[derive(Clone, Debug)]
pub(crate) struct NoiseGenerator {
    /// 3-bit control register: bit 2 selects white noise, bits 1:0 the rate
    pub(crate) reg: u8,
    /// Current down-counter value
    pub(crate) counter: u16,
    /// LFSR state, never zero
    pub(crate) shift: u16,
    /// Half-rate flag, inverted on every counter expiry
    pub(crate) toggle: bool,
    /// Audio output bit captured on rising toggle edges
    pub(crate) output: bool,

    // Variant constants, inlined at construction
    white_noise_taps: u16,
    feedback_shift: u32,
    lfsr_initial: u16,
}

impl NoiseGenerator {
    /// Create a noise generator for the given chip variant.
    pub fn new(variant: Variant) -> Self {
        Self {
            reg: 0,
            counter: 0,
            shift: variant.lfsr_initial(),
            toggle: false,
            output: false,
            white_noise_taps: variant.white_noise_taps,
            feedback_shift: variant.feedback_shift(),
            lfsr_initial: variant.lfsr_initial(),
        }
    }

    /// Write the 3-bit control register. Any write resets the LFSR.
    #[inline]
    pub fn set_control(&mut self, value: u8) {
        self.reg = value & 0x07;
        self.shift = self.lfsr_initial;
    }

    /// Advance one internal tick.
    ///
    /// Rate 3 slaves the counter reload to tone channel 2's divider, read
    /// live at reload time; `tone_zero_value` substitutes when that divider
    /// is 0.
    #[inline]
    pub fn tick(&mut self, tone2_reg: u16, tone_zero_value: u16) {
        if self.counter > 0 {
            self.counter -= 1;
        }
        if self.counter != 0 {
            return;
        }

        self.counter = match self.reg & 0x03 {
            rate @ 0..=2 => NOISE_RATES[rate as usize],
            _ => {
                if tone2_reg == 0 {
                    tone_zero_value
                } else {
                    tone2_reg
                }
            }
        };

        self.toggle = !self.toggle;
        if self.toggle {
            // Capture the audio bit before shifting
            self.output = self.shift & 1 != 0;

            let feedback = if self.reg & 0x04 != 0 {
                // White noise: parity of the tapped bits
                ((self.shift & self.white_noise_taps).count_ones() as u16 & 1)
                    << self.feedback_shift
            } else {
                // Periodic noise: recirculate the output bit
                (self.shift & 1) << self.feedback_shift
            };
            self.shift = (self.shift >> 1) | feedback;
        }
    }

    /// Reset to power-on state (LFSR back to its initial value).
    pub fn reset(&mut self) {
        self.reg = 0;
        self.counter = 0;
        self.shift = self.lfsr_initial;
        self.toggle = false;
        self.output = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_half_period() {
        let mut tone = ToneGenerator::default();
        tone.set_low_nibble(4);

        // Toggles at ticks 1, N+1, 2N+1: HIGH for 4 ticks, LOW for 4
        let mut outputs = Vec::new();
        for _ in 0..16 {
            tone.tick(1);
            outputs.push(tone.output);
        }
        let expected = [
            true, true, true, true, false, false, false, false, true, true, true, true, false,
            false, false, false,
        ];
        assert_eq!(outputs, expected);
    }

    #[test]
    fn test_tone_toggle_boundaries() {
        for n in [2u16, 3, 5, 10, 100] {
            let mut tone = ToneGenerator::default();
            tone.set_low_nibble((n & 0x0f) as u8);
            tone.set_high_bits((n >> 4) as u8);

            tone.tick(1);
            assert!(tone.output, "N={n}: first toggle at tick 1");

            for _ in 0..n - 1 {
                tone.tick(1);
            }
            assert!(tone.output, "N={n}: premature toggle before tick N+1");

            tone.tick(1);
            assert!(!tone.output, "N={n}: second toggle at tick N+1");

            for _ in 0..n {
                tone.tick(1);
            }
            assert!(tone.output, "N={n}: third toggle at tick 2N+1");
        }
    }

    #[test]
    fn test_tone_zero_as_one_toggles_every_tick() {
        let mut tone = ToneGenerator::default();
        // reg stays 0; Sega reload value 1
        tone.tick(1);
        assert!(tone.output);
        assert_eq!(tone.counter, 1);
        tone.tick(1);
        assert!(!tone.output);
    }

    #[test]
    fn test_tone_zero_as_1024() {
        let mut tone = ToneGenerator::default();
        tone.tick(1024);
        assert_eq!(tone.counter, 1024);
        assert!(tone.output);
    }

    #[test]
    fn test_tone_register_masked_to_ten_bits() {
        let mut tone = ToneGenerator::default();
        tone.set_low_nibble(0xff);
        tone.set_high_bits(0xff);
        assert_eq!(tone.reg, 0x3ff);
    }

    #[test]
    fn test_noise_first_shift_at_tick_one() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x04); // white noise, rate 0

        noise.tick(0, 1);
        assert!(noise.toggle, "first counter expiry must raise the toggle");
        assert_ne!(noise.shift, 0x8000, "LFSR should have shifted at tick 1");
    }

    #[test]
    fn test_noise_shifts_every_two_reloads() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x04); // white noise, rate 0 -> reload 0x10

        noise.tick(0, 1);
        let after_first = noise.shift;

        // Next shift is 2 * 0x10 ticks later; one tick before it nothing moves
        for _ in 0..31 {
            noise.tick(0, 1);
        }
        assert_eq!(noise.shift, after_first);
        noise.tick(0, 1);
        assert_ne!(noise.shift, after_first);
    }

    #[test]
    fn test_periodic_noise_period_sega() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x00); // periodic, rate 0

        // The recirculating LFSR returns to its initial value after exactly
        // 16 rising-edge shifts on the 16-bit Sega register
        let mut shifts = 0;
        loop {
            let before = noise.shift;
            noise.tick(0, 1);
            if noise.shift != before {
                shifts += 1;
                if noise.shift == 0x8000 {
                    break;
                }
            }
            assert!(
                shifts <= 16,
                "Sega periodic noise must repeat within 16 shifts"
            );
        }
        assert_eq!(shifts, 16);
    }

    #[test]
    fn test_periodic_noise_period_ti() {
        let mut noise = NoiseGenerator::new(Variant::TI);
        noise.set_control(0x00);

        let mut shifts = 0;
        loop {
            let before = noise.shift;
            noise.tick(0, 1024);
            if noise.shift != before {
                shifts += 1;
                if noise.shift == 0x4000 {
                    break;
                }
            }
            assert!(shifts <= 15, "TI periodic noise must repeat within 15 shifts");
        }
        assert_eq!(shifts, 15);
    }

    #[test]
    fn test_white_noise_lfsr_stays_in_range_and_nonzero() {
        for (variant, max) in [(Variant::SEGA, 0xffffu32), (Variant::TI, 0x7fff)] {
            let mut noise = NoiseGenerator::new(variant);
            noise.set_control(0x04);
            for _ in 0..100_000 {
                noise.tick(0, 1);
                assert_ne!(noise.shift, 0, "LFSR must never reach zero");
                assert!(u32::from(noise.shift) <= max, "LFSR exceeded {max:#06x}");
            }
        }
    }

    #[test]
    fn test_white_noise_sega_ti_diverge() {
        let mut sega = NoiseGenerator::new(Variant::SEGA);
        let mut ti = NoiseGenerator::new(Variant::TI);
        sega.set_control(0x04);
        ti.set_control(0x04);

        let mut diverged = false;
        for _ in 0..10_000 {
            sega.tick(0, 1);
            ti.tick(0, 1024);
            if sega.shift != ti.shift {
                diverged = true;
                break;
            }
        }
        assert!(diverged, "Sega and TI LFSR sequences should differ");
    }

    #[test]
    fn test_noise_control_write_resets_lfsr() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x04);
        for _ in 0..1000 {
            noise.tick(0, 1);
        }
        assert_ne!(noise.shift, 0x8000);

        noise.set_control(0x05);
        assert_eq!(noise.shift, 0x8000);
        assert_eq!(noise.reg, 0x05);
    }

    #[test]
    fn test_noise_rate_three_uses_tone2_divider() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x07); // white noise, tone-2 rate

        noise.tick(0x105, 1);
        assert_eq!(noise.counter, 0x105);

        // A zero divider falls back to the variant's tone-zero reload
        let mut noise = NoiseGenerator::new(Variant::TI);
        noise.set_control(0x03);
        noise.tick(0, 1024);
        assert_eq!(noise.counter, 1024);
    }

    #[test]
    fn test_output_is_captured_bit_not_live_lsb() {
        let mut noise = NoiseGenerator::new(Variant::SEGA);
        noise.set_control(0x00); // periodic, rate 0

        // First rising edge: the pre-shift LSB of 0x8000 is 0
        noise.tick(0, 1);
        assert!(!noise.output);
        assert_eq!(noise.shift, 0x4000);
    }
}
