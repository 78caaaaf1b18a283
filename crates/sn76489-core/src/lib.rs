//! SN76489 PSG Emulator
//!
//! A cycle-accurate emulator of the Texas Instruments SN76489 Programmable
//! Sound Generator and its Sega derivative (SN76496), as used in the Sega
//! Master System, Game Gear, Mega Drive/Genesis, ColecoVision, BBC Micro
//! and many arcade boards.
//!
//! # Features
//! - 3 square-wave tone channels with 10-bit frequency dividers
//! - 1 noise channel (white or periodic) with the variant-correct LFSR
//!   (16-bit Sega / 15-bit TI) including tone-2 rate slaving
//! - Cycle-accurate /16 internal clocking driven by host CPU clocks
//! - Per-channel and mixed sample buffers with mid-frame register writes,
//!   for lock-step embedding into system emulators
//! - Compact binary save/restore of all mutable chip state
//!
//! # Quick start
//! ```
//! use sn76489::{Sn76489, Variant};
//!
//! // SMS clock, 48 kHz output, room for one NTSC frame of samples
//! let mut chip = Sn76489::new(3_579_545, 48_000, 1024, Variant::SEGA);
//! chip.write(0x8E); // Latch channel 0 tone, low nibble
//! chip.write(0x0F); // High bits -> divider 254 (~440 Hz)
//! chip.write(0x90); // Channel 0 volume: maximum
//!
//! chip.generate_samples(3_579_545 / 60); // one frame of chip clocks
//! let frame = chip.mixed_buffer();
//! assert!(!frame.is_empty());
//! ```
//!
//! Frames can be split at arbitrary clock boundaries to apply register
//! writes mid-frame:
//! ```
//! # use sn76489::{Sn76489, Variant};
//! # let mut chip = Sn76489::new(3_579_545, 48_000, 1024, Variant::SEGA);
//! chip.reset_buffer();
//! chip.run(20_000);
//! chip.write(0x9F); // channel 0 silent from here on
//! chip.run(20_000);
//! ```

#![warn(missing_docs)]

mod chip;
mod generators;
pub mod tables;
mod variant;

/// Error types for SN76489 chip emulator operations
///
/// The engine's only fallible surface is state snapshotting; writes,
/// clocking, and sample generation cannot fail. Buffer overflow during a
/// frame run is reported as a dropped-sample count, not an error.
#[derive(thiserror::Error, Debug)]
pub enum Sn76489Error {
    /// Snapshot buffer shorter than the fixed serialized size
    #[error("snapshot buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Required buffer length in bytes
        needed: usize,
        /// Length of the buffer that was provided
        got: usize,
    },

    /// Snapshot version byte does not match this implementation
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
}

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, Sn76489Error>;

// Public API exports
pub use chip::Sn76489;
pub use tables::{get_volume, volume_table};
pub use variant::{ToneZero, Variant};
