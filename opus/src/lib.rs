//! Opus encode/decode over the system libopus.
//!
//! This crate owns the unsafe surface: raw declarations for the native
//! encoder/decoder primitives and safe, owned wrappers on top of them. The
//! native state is created explicitly, retuned through the ctl interface
//! (encoder bitrate only) and destroyed on drop.
//!
//! # Example
//!
//! ```ignore
//! use voicekit_opus::{Application, Decoder, Encoder};
//!
//! let mut encoder = Encoder::new(48000, 1, Application::Voip)?;
//! encoder.set_bitrate(128_000)?;
//!
//! let pcm = vec![0i16; 960]; // 20ms at 48kHz
//! let mut packet = vec![0u8; 4000];
//! let bytes = encoder.encode(&pcm, 960, &mut packet)?;
//!
//! let mut decoder = Decoder::new(48000, 1)?;
//! let mut out = vec![0i16; 960];
//! let samples = decoder.decode(&packet[..bytes], &mut out, 960)?;
//! ```

mod decoder;
mod encoder;
pub mod error;
mod ffi;

pub use decoder::Decoder;
pub use encoder::{Application, Encoder};
pub use error::{OpusError, Result};
