//! Encoding sinks and post-processing of the finished video.
//!
//! Sinks consume rendered frames in timeline order and are used by the render driver. Muxing and
//! looping shell out to the system `ffmpeg`/`ffprobe`.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`) and process helpers.
pub mod ffmpeg;
/// Repeat a finished video without re-encoding.
pub mod looper;
/// Attach a background track to a finished video.
pub mod mux;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
