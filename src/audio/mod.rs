//! Procedural background audio.

/// Signal primitives.
pub mod synth;
/// Ambience, music and the mixed background track.
pub mod track;
