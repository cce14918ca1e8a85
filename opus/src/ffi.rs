//! Raw libopus declarations.
//!
//! Only the subset the wrappers drive: encoder/decoder lifecycle, the
//! encode/decode primitives, the bitrate ctl and error-to-text lookup.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

/// Opaque native encoder state.
#[repr(C)]
pub struct OpusEncoder {
    _private: [u8; 0],
}

/// Opaque native decoder state.
#[repr(C)]
pub struct OpusDecoder {
    _private: [u8; 0],
}

// Status codes (opus_defines.h). Everything below OPUS_OK is a failure.
pub const OPUS_OK: c_int = 0;
pub const OPUS_BAD_ARG: c_int = -1;
pub const OPUS_BUFFER_TOO_SMALL: c_int = -2;
pub const OPUS_INTERNAL_ERROR: c_int = -3;
pub const OPUS_INVALID_PACKET: c_int = -4;
pub const OPUS_UNIMPLEMENTED: c_int = -5;
pub const OPUS_INVALID_STATE: c_int = -6;
pub const OPUS_ALLOC_FAIL: c_int = -7;

// Application profiles accepted by opus_encoder_create.
pub const OPUS_APPLICATION_VOIP: c_int = 2048;
pub const OPUS_APPLICATION_AUDIO: c_int = 2049;
pub const OPUS_APPLICATION_RESTRICTED_LOWDELAY: c_int = 2051;

// Ctl request codes.
pub const OPUS_SET_BITRATE_REQUEST: c_int = 4002;

#[link(name = "opus")]
unsafe extern "C" {
    pub fn opus_strerror(error: c_int) -> *const c_char;

    pub fn opus_encoder_create(
        fs: i32,
        channels: c_int,
        application: c_int,
        error: *mut c_int,
    ) -> *mut OpusEncoder;

    pub fn opus_encode(
        st: *mut OpusEncoder,
        pcm: *const i16,
        frame_size: c_int,
        data: *mut u8,
        max_data_bytes: i32,
    ) -> i32;

    pub fn opus_encoder_ctl(st: *mut OpusEncoder, request: c_int, ...) -> c_int;

    pub fn opus_encoder_destroy(st: *mut OpusEncoder);

    pub fn opus_decoder_create(fs: i32, channels: c_int, error: *mut c_int) -> *mut OpusDecoder;

    pub fn opus_decode(
        st: *mut OpusDecoder,
        data: *const u8,
        len: i32,
        pcm: *mut i16,
        frame_size: c_int,
        decode_fec: c_int,
    ) -> c_int;

    pub fn opus_decoder_destroy(st: *mut OpusDecoder);
}

/// Translates a native status code through `opus_strerror`.
pub fn error_string(code: c_int) -> String {
    let ptr = unsafe { opus_strerror(code) };
    if ptr.is_null() {
        return format!("unknown opus error {}", code);
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
