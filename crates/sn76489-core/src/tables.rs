//! Volume lookup table
//!
//! Maps the 4-bit attenuation registers to linear amplitudes. The hardware
//! attenuates in 2 dB steps: index 0 is full scale, each step multiplies the
//! amplitude by roughly 0.794, and index 15 switches the channel off
//! entirely rather than continuing the curve.

use std::sync::OnceLock;

/// Static lookup table - initialized once
static VOLUME_TABLE: OnceLock<[f32; 16]> = OnceLock::new();

/// Volume lookup table indexed by attenuation register value.
///
/// `table[i] = 10^(-2i/20)` for `i` in `0..15`, computed in double precision
/// and narrowed to `f32`; `table[15]` is exactly 0.0. Exposed so hosts and
/// tests can reason about exact sample amplitudes.
pub fn volume_table() -> &'static [f32; 16] {
    VOLUME_TABLE.get_or_init(|| {
        let mut table = [0.0f32; 16];
        for (i, level) in table.iter_mut().take(15).enumerate() {
            *level = 10f64.powf(-2.0 * i as f64 / 20.0) as f32;
        }
        table
    })
}

/// Linear amplitude for an attenuation register value (0-15)
///
/// Masks the input to ensure it's in the valid range [0, 15] and returns
/// the corresponding amplitude from the volume table.
#[inline]
pub fn get_volume(attenuation: u8) -> f32 {
    volume_table()[(attenuation & 0x0f) as usize]
}
