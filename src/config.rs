use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::compose::raster::StageLayout;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{PumpkinError, PumpkinResult};

/// Project-wide settings shared by every pipeline stage.
///
/// Every field has a default, so a JSON file only needs to name what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Whole frames per second.
    pub fps: u32,
    /// Seed for blinks, fireflies and audio. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Actor placement on stage.
    pub layout: StageLayout,
    /// Directory holding `pumpkin_{actor}_{expression}.png` faces.
    pub asset_dir: PathBuf,
    /// Width of generated face assets.
    pub asset_width: u32,
    /// Height of generated face assets.
    pub asset_height: u32,
    /// Silent rendered video.
    pub video_path: PathBuf,
    /// Background track (WAV).
    pub audio_path: PathBuf,
    /// Video with the background track muxed in.
    pub final_path: PathBuf,
    /// Length of the generated background track in seconds.
    pub audio_duration_secs: f64,
    /// Repetition counts for the looped variants of the final video.
    pub loop_counts: Vec<u32>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 24,
            seed: None,
            layout: StageLayout::default(),
            asset_dir: PathBuf::from("assets"),
            asset_width: 800,
            asset_height: 600,
            video_path: PathBuf::from("out/pumpkin_video.mp4"),
            audio_path: PathBuf::from("out/halloween_background.wav"),
            final_path: PathBuf::from("out/Halloween_Pumpkin_Projection_Video.mp4"),
            audio_duration_secs: 8.5 * 60.0,
            loop_counts: vec![2, 3, 4],
        }
    }
}

impl ProjectConfig {
    /// Load a JSON config file and validate it.
    pub fn from_path(path: &Path) -> PumpkinResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| PumpkinError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the encoder or compositor cannot honor.
    pub fn validate(&self) -> PumpkinResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PumpkinError::validation("width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(PumpkinError::validation(
                "width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.fps == 0 {
            return Err(PumpkinError::validation("fps must be non-zero"));
        }
        if self.asset_width == 0 || self.asset_height == 0 {
            return Err(PumpkinError::validation("asset size must be non-zero"));
        }
        if !self.audio_duration_secs.is_finite() || self.audio_duration_secs <= 0.0 {
            return Err(PumpkinError::validation("audio_duration_secs must be positive"));
        }
        if self.loop_counts.contains(&0) {
            return Err(PumpkinError::validation("loop counts must be non-zero"));
        }
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Output frame rate.
    pub fn frame_rate(&self) -> PumpkinResult<Fps> {
        Fps::whole(self.fps)
    }

    /// Size of generated face assets.
    pub fn asset_size(&self) -> Canvas {
        Canvas {
            width: self.asset_width,
            height: self.asset_height,
        }
    }

    /// Audio duration in whole milliseconds.
    pub fn audio_duration_ms(&self) -> u64 {
        (self.audio_duration_secs * 1000.0).round() as u64
    }

    /// Path of the `count`x looped variant, next to the final video.
    pub fn loop_path(&self, count: u32) -> PathBuf {
        let stem = self
            .final_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_owned());
        self.final_path.with_file_name(format!("{stem}_{count}x_Loop.mp4"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
