//! Opus decoder wrapper.

use std::ptr;

use crate::error::{OpusError, Result};
use crate::ffi;

/// Owned native Opus decoder.
///
/// Sample rate and channel count are fixed at creation. The native state is
/// destroyed on drop.
pub struct Decoder {
    sample_rate: i32,
    channels: i32,
    raw: *mut ffi::OpusDecoder,
}

unsafe impl Send for Decoder {}

impl Decoder {
    /// Creates a decoder.
    ///
    /// `sample_rate` must be 8000, 12000, 16000, 24000 or 48000 and
    /// `channels` 1 or 2. Invalid combinations are rejected by the native
    /// create call.
    pub fn new(sample_rate: i32, channels: i32) -> Result<Self> {
        let mut status = ffi::OPUS_OK;
        let raw = unsafe { ffi::opus_decoder_create(sample_rate, channels, &mut status) };
        if raw.is_null() || status != ffi::OPUS_OK {
            return Err(OpusError::DecoderCreate(ffi::error_string(status)));
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

    /// Decodes one packet into `pcm_out`, returning samples per channel.
    ///
    /// `frame_size` is the expected frame length in samples per channel;
    /// `pcm_out` must hold at least `frame_size * channels` samples. An
    /// empty `packet` is forwarded as a null pointer, which asks libopus for
    /// packet-loss concealment output. Forward error correction is never
    /// requested.
    pub fn decode(&mut self, packet: &[u8], pcm_out: &mut [i16], frame_size: i32) -> Result<usize> {
        let needed = frame_size.max(0) as usize * self.channels as usize;
        if pcm_out.len() < needed {
            return Err(OpusError::ShortBuffer {
                needed,
                len: pcm_out.len(),
            });
        }

        let (data, len) = if packet.is_empty() {
            (ptr::null(), 0)
        } else {
            (packet.as_ptr(), packet.len().min(i32::MAX as usize) as i32)
        };

        let decoded = unsafe {
            ffi::opus_decode(self.raw, data, len, pcm_out.as_mut_ptr(), frame_size, 0)
        };

        if decoded < 0 {
            return Err(OpusError::Decode(ffi::error_string(decoded)));
        }
        Ok(decoded as usize)
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        unsafe { ffi::opus_decoder_destroy(self.raw) };
    }
}
