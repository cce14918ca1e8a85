//! Handle-based Opus codec bridge for embedding in host runtimes.
//!
//! Host runtimes that cannot hold Rust objects drive the codec through
//! opaque integer handles: [`OpusBridge::encoder_create`] returns a non-zero
//! handle, the encode/decode operations marshal caller-owned buffers for one
//! call at a time, and the destroy operations retire the handle. The
//! boundary speaks a two-outcome convention — handle `0` for a failed
//! creation, [`CODEC_ERROR`] for a failed call — and anything finer-grained
//! goes to the operational log stream only.
//!
//! Operations on a single handle must be serialized by the caller;
//! operations on distinct handles are independent and may run concurrently.
//!
//! # Example
//!
//! ```ignore
//! use voicekit_bridge::{OpusBridge, DEFAULT_BITRATE, MAX_PACKET_SIZE};
//!
//! let bridge = OpusBridge::new();
//! let handle = bridge.encoder_create(48000, 1, 2048);
//! assert_ne!(handle, 0);
//! bridge.encoder_set_bitrate(handle, DEFAULT_BITRATE);
//!
//! let pcm = vec![0i16; 960];
//! let mut packet = vec![0u8; MAX_PACKET_SIZE];
//! let bytes = bridge.encoder_encode(handle, &pcm, 960, &mut packet, MAX_PACKET_SIZE as i32);
//! assert!(bytes > 0);
//! bridge.encoder_destroy(handle);
//! ```

mod registry;
mod sink;

pub use registry::{Handle, NULL_HANDLE};
pub use sink::{LogSink, NullSink, TracingSink};

use std::sync::Arc;

use voicekit_opus::{Application, Decoder, Encoder};

use crate::registry::Registry;

/// Result value for a failed encode or decode call.
pub const CODEC_ERROR: i32 = -1;

/// Largest encoded packet the codec can emit, in bytes.
pub const MAX_PACKET_SIZE: usize = 4000;

/// Production transport profile: 48kHz mono, 20ms frames, 128kbps VoIP.
pub const DEFAULT_SAMPLE_RATE: i32 = 48000;
pub const DEFAULT_CHANNELS: i32 = 1;
pub const DEFAULT_FRAME_SIZE: i32 = 960;
pub const DEFAULT_BITRATE: i32 = 128_000;

/// The bridge: one handle registry per codec direction plus the log sink.
///
/// All operations take `&self`; the registries are internally synchronized.
pub struct OpusBridge {
    encoders: Registry<Encoder>,
    decoders: Registry<Decoder>,
    log: Arc<dyn LogSink>,
}

impl Default for OpusBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl OpusBridge {
    /// Creates a bridge that logs through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Creates a bridge with a custom log sink.
    pub fn with_sink(log: Arc<dyn LogSink>) -> Self {
        Self {
            encoders: Registry::new(),
            decoders: Registry::new(),
            log,
        }
    }

    /// Creates an encoder and returns its handle, or [`NULL_HANDLE`] on
    /// failure.
    ///
    /// `application` is the raw tuning-profile code (2048 VoIP, 2049 audio,
    /// 2051 restricted low-delay). Failure causes are not distinguishable
    /// through the return value; the diagnostic goes to the log stream.
    pub fn encoder_create(&self, sample_rate: i32, channels: i32, application: i32) -> Handle {
        let Some(application) = Application::from_raw(application) else {
            self.log.error(&format!(
                "opus: encoder create failed: unknown application code {}",
                application
            ));
            return NULL_HANDLE;
        };
        match Encoder::new(sample_rate, channels, application) {
            Ok(encoder) => {
                let handle = self.encoders.insert(encoder);
                self.log.info(&format!(
                    "opus: encoder created: {} Hz, {} ch (handle {})",
                    sample_rate, channels, handle
                ));
                handle
            }
            Err(err) => {
                self.log.error(&err.to_string());
                NULL_HANDLE
            }
        }
    }

    /// Retunes the bitrate of a live encoder.
    ///
    /// A null or stale handle is silently ignored, so configuration may race
    /// initialization on the caller side without crashing. Native failures
    /// are log-only; bitrate is best-effort tuning, not correctness-critical.
    pub fn encoder_set_bitrate(&self, handle: Handle, bitrate: i32) {
        let Some(encoder) = self.encoders.get(handle) else {
            return;
        };
        if let Err(err) = encoder.lock().set_bitrate(bitrate) {
            self.log.error(&err.to_string());
        }
    }

    /// Encodes one frame, returning the encoded byte count or
    /// [`CODEC_ERROR`].
    ///
    /// `pcm` must hold at least `frame_size * channels` samples and is never
    /// written. `max_bytes` is the caller-declared output bound: the native
    /// call writes at most that many bytes into `out`, and a bound exceeding
    /// `out.len()` fails the call before anything is touched. On a native
    /// failure `out` has already been handed to the codec and its content is
    /// undefined.
    pub fn encoder_encode(
        &self,
        handle: Handle,
        pcm: &[i16],
        frame_size: i32,
        out: &mut [u8],
        max_bytes: i32,
    ) -> i32 {
        let Some(encoder) = self.encoders.get(handle) else {
            self.log
                .error(&format!("opus: encode on invalid encoder handle {}", handle));
            return CODEC_ERROR;
        };
        let out_len = out.len();
        let Some(out) = bounded_mut(out, max_bytes) else {
            self.log.error(&format!(
                "opus: declared output bound {} exceeds buffer of {} bytes",
                max_bytes, out_len
            ));
            return CODEC_ERROR;
        };
        match encoder.lock().encode(pcm, frame_size, out) {
            Ok(written) => written as i32,
            Err(err) => {
                self.log.error(&err.to_string());
                CODEC_ERROR
            }
        }
    }

    /// Destroys an encoder. A null or stale handle is a no-op.
    pub fn encoder_destroy(&self, handle: Handle) {
        if self.encoders.remove(handle).is_some() {
            self.log
                .info(&format!("opus: encoder destroyed (handle {})", handle));
        }
    }

    /// Creates a decoder and returns its handle, or [`NULL_HANDLE`] on
    /// failure.
    pub fn decoder_create(&self, sample_rate: i32, channels: i32) -> Handle {
        match Decoder::new(sample_rate, channels) {
            Ok(decoder) => {
                let handle = self.decoders.insert(decoder);
                self.log.info(&format!(
                    "opus: decoder created: {} Hz, {} ch (handle {})",
                    sample_rate, channels, handle
                ));
                handle
            }
            Err(err) => {
                self.log.error(&err.to_string());
                NULL_HANDLE
            }
        }
    }

    /// Decodes one packet, returning samples written per channel or
    /// [`CODEC_ERROR`].
    ///
    /// `packet_len` is the caller-declared input bound; a zero-length input
    /// is passed through to the codec unmodified (packet-loss concealment),
    /// never rejected here. `pcm_out` must hold at least
    /// `frame_size * channels` samples and keeps whatever the codec wrote
    /// even when the call fails.
    pub fn decoder_decode(
        &self,
        handle: Handle,
        packet: &[u8],
        packet_len: i32,
        pcm_out: &mut [i16],
        frame_size: i32,
    ) -> i32 {
        let Some(decoder) = self.decoders.get(handle) else {
            self.log
                .error(&format!("opus: decode on invalid decoder handle {}", handle));
            return CODEC_ERROR;
        };
        let Some(packet) = bounded(packet, packet_len) else {
            self.log.error(&format!(
                "opus: declared input bound {} exceeds buffer of {} bytes",
                packet_len,
                packet.len()
            ));
            return CODEC_ERROR;
        };
        match decoder.lock().decode(packet, pcm_out, frame_size) {
            Ok(samples) => samples as i32,
            Err(err) => {
                self.log.error(&err.to_string());
                CODEC_ERROR
            }
        }
    }

    /// Destroys a decoder. A null or stale handle is a no-op.
    pub fn decoder_destroy(&self, handle: Handle) {
        if self.decoders.remove(handle).is_some() {
            self.log
                .info(&format!("opus: decoder destroyed (handle {})", handle));
        }
    }

    /// Number of live encoder instances.
    pub fn live_encoders(&self) -> usize {
        self.encoders.len()
    }

    /// Number of live decoder instances.
    pub fn live_decoders(&self) -> usize {
        self.decoders.len()
    }
}

/// Clamps `buf` to the caller-declared element count. `None` when the
/// declaration is negative or exceeds what the caller actually supplied.
fn bounded<T>(buf: &[T], declared: i32) -> Option<&[T]> {
    let declared = usize::try_from(declared).ok()?;
    buf.get(..declared)
}

fn bounded_mut<T>(buf: &mut [T], declared: i32) -> Option<&mut [T]> {
    let declared = usize::try_from(declared).ok()?;
    buf.get_mut(..declared)
}
