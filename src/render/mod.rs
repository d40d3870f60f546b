//! Timeline playback into frame sinks.

/// Frame-by-frame timeline walker.
pub mod driver;
