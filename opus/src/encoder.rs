//! Opus encoder wrapper.

use crate::error::{OpusError, Result};
use crate::ffi;

/// Encoder tuning profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    /// Best quality for speech signals.
    Voip,
    /// Best quality for general audio.
    Audio,
    /// Minimum possible coding delay.
    RestrictedLowDelay,
}

impl Application {
    /// Returns the raw libopus application code.
    pub fn as_raw(self) -> i32 {
        match self {
            Self::Voip => ffi::OPUS_APPLICATION_VOIP,
            Self::Audio => ffi::OPUS_APPLICATION_AUDIO,
            Self::RestrictedLowDelay => ffi::OPUS_APPLICATION_RESTRICTED_LOWDELAY,
        }
    }

    /// Maps a raw libopus application code back to the profile.
    pub fn from_raw(code: i32) -> Option<Self> {
        match code {
            ffi::OPUS_APPLICATION_VOIP => Some(Self::Voip),
            ffi::OPUS_APPLICATION_AUDIO => Some(Self::Audio),
            ffi::OPUS_APPLICATION_RESTRICTED_LOWDELAY => Some(Self::RestrictedLowDelay),
            _ => None,
        }
    }
}

/// Owned native Opus encoder.
///
/// Sample rate, channel count and application profile are fixed at creation;
/// the bitrate may be retuned at any point through [`Encoder::set_bitrate`].
/// The native state is destroyed on drop.
pub struct Encoder {
    sample_rate: i32,
    channels: i32,
    raw: *mut ffi::OpusEncoder,
}

// The native state carries no thread affinity; it is just not reentrant.
unsafe impl Send for Encoder {}

impl Encoder {
    /// Creates an encoder.
    ///
    /// `sample_rate` must be 8000, 12000, 16000, 24000 or 48000 and
    /// `channels` 1 or 2. Invalid combinations are rejected by the native
    /// create call, not pre-checked here.
    pub fn new(sample_rate: i32, channels: i32, application: Application) -> Result<Self> {
        let mut status = ffi::OPUS_OK;
        let raw = unsafe {
            ffi::opus_encoder_create(sample_rate, channels, application.as_raw(), &mut status)
        };
        if raw.is_null() || status != ffi::OPUS_OK {
            return Err(OpusError::EncoderCreate(ffi::error_string(status)));
        }
        Ok(Self {
            sample_rate,
            channels,
            raw,
        })
    }

    /// Returns the sample rate fixed at creation.
    pub fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    /// Returns the channel count fixed at creation.
    pub fn channels(&self) -> i32 {
        self.channels
    }

    /// Encodes one frame of interleaved PCM into `out`.
    ///
    /// `frame_size` is in samples per channel; `pcm` must hold at least
    /// `frame_size * channels` samples. `out.len()` is the output bound
    /// handed to the native call, and the encoded packet occupies the
    /// returned prefix of `out` on success.
    pub fn encode(&mut self, pcm: &[i16], frame_size: i32, out: &mut [u8]) -> Result<usize> {
        let needed = frame_size.max(0) as usize * self.channels as usize;
        if pcm.len() < needed {
            return Err(OpusError::ShortBuffer {
                needed,
                len: pcm.len(),
            });
        }

        let written = unsafe {
            ffi::opus_encode(
                self.raw,
                pcm.as_ptr(),
                frame_size,
                out.as_mut_ptr(),
                out.len().min(i32::MAX as usize) as i32,
            )
        };

        if written < 0 {
            return Err(OpusError::Encode(ffi::error_string(written)));
        }
        Ok(written as usize)
    }

    /// Retunes the target bitrate in bits per second.
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        let status =
            unsafe { ffi::opus_encoder_ctl(self.raw, ffi::OPUS_SET_BITRATE_REQUEST, bitrate) };
        if status != ffi::OPUS_OK {
            return Err(OpusError::SetOption(ffi::error_string(status)));
        }
        Ok(())
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_encoder_destroy(self.raw) };
    }
}
