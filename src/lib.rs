//! Procedural Halloween projection video: talking, singing pumpkins.
//!
//! The pipeline is a handful of independent steps that can also run one by one:
//!
//! - draw the pumpkin faces ([`generate_assets`])
//! - lay out a [`Script`] as a [`Timeline`] ([`build_timeline`])
//! - turn every frame into a [`FrameState`] and rasterize it ([`RenderDriver`], [`Compositor`])
//!   into a [`FrameSink`] such as [`FfmpegSink`]
//! - synthesize a background track ([`audio::track::background_track`]), mux it under the video
//!   ([`mux_audio`]) and write looped variants ([`loop_video`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod foundation;
mod script;
mod timeline;

/// Procedural background audio.
pub mod audio;
/// Encoding sinks, muxing and looping.
pub mod encode;
/// Timeline playback into frame sinks.
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{PumpkinError, PumpkinResult};

pub use crate::assets::decode::decode_image;
pub use crate::assets::draw::{PumpkinStyle, draw_pumpkin_face, generate_assets, save_png};
pub use crate::assets::store::{AssetStore, PreparedImage, asset_file_name};
pub use crate::compose::raster::{Compositor, Frame, StageLayout};
pub use crate::compose::state::{
    BACKGROUND_CYCLE_FRAMES, BLINK_PERIOD_FRAMES, BackgroundVariant, DialoguePlan, FrameState,
    HARMONY_CYCLE_FRAMES, LyricWindow, SOLO_TURN_FRAMES, SongPlan, frame_count, is_blink_frame,
    mouth_shape_for_char, song_background,
};
pub use crate::config::ProjectConfig;
pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path, is_ffprobe_on_path, probe_duration,
};
pub use crate::encode::looper::{LoopReport, loop_video};
pub use crate::encode::mux::mux_audio;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::driver::{RenderDriver, RenderStats, load_compositor};
pub use crate::script::halloween::{GOURD, JACK, halloween_script};
pub use crate::script::model::{
    ActorId, DialogueLine, Expression, LyricLine, Scene, Script, ScriptSlot, Song,
};
pub use crate::timeline::{Timeline, TimelineEntry, TimelinePayload, build_timeline};
