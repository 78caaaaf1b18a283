//! State snapshot serialization
//!
//! All mutable chip state packs into a fixed 40-byte little-endian blob so
//! host emulators can fold the PSG into their own save states:
//!
//! | Offset | Size | Field |
//! |-------:|-----:|-------|
//! | 0      | 1    | version byte (currently 1) |
//! | 1      | 6    | tone dividers, 3x u16 |
//! | 7      | 6    | tone counters, 3x u16 |
//! | 13     | 3    | tone outputs, 3x u8 |
//! | 16     | 1    | noise control register |
//! | 17     | 2    | noise counter, u16 |
//! | 19     | 2    | noise LFSR, u16 |
//! | 21     | 1    | noise output (bit 0) and half-rate toggle (bit 1) |
//! | 22     | 4    | attenuation registers, 4x u8 |
//! | 26     | 1    | latched channel |
//! | 27     | 1    | latched type (1 = volume) |
//! | 28     | 4    | clock prescaler divider, i32 |
//! | 32     | 8    | resampler accumulator, f64 bit pattern |
//!
//! Variant constants, the clock ratio, gain, and buffer capacity are host
//! audio configuration; the host restores them by constructing the chip the
//! same way before loading.

use super::Sn76489;
use crate::{Result, Sn76489Error};

/// Snapshot format version.
const SNAPSHOT_VERSION: u8 = 1;

/// Serialized snapshot size in bytes.
const SNAPSHOT_SIZE: usize = 40;

impl Sn76489 {
    /// Number of bytes written by [`serialize`](Self::serialize).
    ///
    /// Constant, so callers can pre-allocate a reusable buffer.
    pub fn serialize_size(&self) -> usize {
        SNAPSHOT_SIZE
    }

    /// Write all mutable chip state into `buf`.
    ///
    /// Fails with [`Sn76489Error::BufferTooSmall`], writing nothing, if
    /// `buf` is shorter than [`serialize_size`](Self::serialize_size).
    pub fn serialize(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < SNAPSHOT_SIZE {
            return Err(Sn76489Error::BufferTooSmall {
                needed: SNAPSHOT_SIZE,
                got: buf.len(),
            });
        }

        buf[0] = SNAPSHOT_VERSION;
        for (i, tone) in self.tones.iter().enumerate() {
            buf[1 + i * 2..3 + i * 2].copy_from_slice(&tone.reg.to_le_bytes());
            buf[7 + i * 2..9 + i * 2].copy_from_slice(&tone.counter.to_le_bytes());
            buf[13 + i] = tone.output as u8;
        }
        buf[16] = self.noise.reg;
        buf[17..19].copy_from_slice(&self.noise.counter.to_le_bytes());
        buf[19..21].copy_from_slice(&self.noise.shift.to_le_bytes());
        // Bit 0: captured output. Bit 1: half-rate toggle phase.
        buf[21] = self.noise.output as u8 | (self.noise.toggle as u8) << 1;
        buf[22..26].copy_from_slice(&self.volume);
        buf[26] = self.latched_channel;
        buf[27] = self.latched_volume as u8;
        buf[28..32].copy_from_slice(&(self.clock_divider as i32).to_le_bytes());
        buf[32..40].copy_from_slice(&self.clock_counter.to_bits().to_le_bytes());
        Ok(())
    }

    /// Restore all mutable chip state from a snapshot produced by
    /// [`serialize`](Self::serialize).
    ///
    /// The chip must have been constructed with the same variant and audio
    /// configuration as the one that was saved. Fails with
    /// [`Sn76489Error::BufferTooSmall`] or
    /// [`Sn76489Error::UnsupportedVersion`]; chip state is untouched on
    /// failure. On success the frame buffer position is reset to 0.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<()> {
        if buf.len() < SNAPSHOT_SIZE {
            return Err(Sn76489Error::BufferTooSmall {
                needed: SNAPSHOT_SIZE,
                got: buf.len(),
            });
        }
        if buf[0] != SNAPSHOT_VERSION {
            return Err(Sn76489Error::UnsupportedVersion(buf[0]));
        }

        for (i, tone) in self.tones.iter_mut().enumerate() {
            tone.reg = u16::from_le_bytes([buf[1 + i * 2], buf[2 + i * 2]]);
            tone.counter = u16::from_le_bytes([buf[7 + i * 2], buf[8 + i * 2]]);
            tone.output = buf[13 + i] != 0;
        }
        self.noise.reg = buf[16];
        self.noise.counter = u16::from_le_bytes([buf[17], buf[18]]);
        self.noise.shift = u16::from_le_bytes([buf[19], buf[20]]);
        self.noise.output = buf[21] & 0x01 != 0;
        self.noise.toggle = buf[21] & 0x02 != 0;
        self.volume.copy_from_slice(&buf[22..26]);
        self.latched_channel = buf[26];
        self.latched_volume = buf[27] != 0;
        self.clock_divider =
            i32::from_le_bytes([buf[28], buf[29], buf[30], buf[31]]) as u32;
        self.clock_counter = f64::from_bits(u64::from_le_bytes([
            buf[32], buf[33], buf[34], buf[35], buf[36], buf[37], buf[38], buf[39],
        ]));
        self.buffer_pos = 0;
        Ok(())
    }
}
