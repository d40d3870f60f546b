use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::store::AssetStore;
use crate::compose::raster::{Compositor, Frame};
use crate::compose::state::{DialoguePlan, FrameState, SongPlan};
use crate::config::ProjectConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::PumpkinResult;
use crate::script::model::ActorId;
use crate::timeline::{Timeline, TimelinePayload};

/// Statistics from a full timeline render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// `round(total_duration * fps)` for the rendered timeline.
    pub frames_nominal: u64,
}

impl RenderStats {
    /// Rendered minus nominal frames. Non-zero when scene durations disagree with their lines.
    pub fn drift(&self) -> i64 {
        self.frames_total as i64 - self.frames_nominal as i64
    }
}

/// Walks a [`Timeline`] frame by frame and streams rendered frames into a [`FrameSink`].
///
/// Dialogue entries play each of their scene's lines in order; song entries play once. The driver
/// owns the random source used for idle blinks and fireflies.
pub struct RenderDriver<R = StdRng> {
    compositor: Compositor,
    actors: Vec<ActorId>,
    fps: Fps,
    rng: R,
}

impl RenderDriver<StdRng> {
    /// Create a driver with a seeded random source, or an entropy-seeded one for `None`.
    pub fn new(compositor: Compositor, actors: &[ActorId], fps: Fps, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(compositor, actors, fps, rng)
    }
}

impl<R: Rng> RenderDriver<R> {
    /// Create a driver around an explicit random source.
    pub fn with_rng(compositor: Compositor, actors: &[ActorId], fps: Fps, rng: R) -> Self {
        Self {
            compositor,
            actors: actors.to_vec(),
            fps,
            rng,
        }
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frames a full render of `timeline` will push.
    pub fn planned_frames(&self, timeline: &Timeline<'_>) -> u64 {
        timeline
            .entries
            .iter()
            .map(|e| match e.payload {
                TimelinePayload::Dialogue(scene) => scene
                    .lines
                    .iter()
                    .map(|l| DialoguePlan::new(l, self.fps).frame_count())
                    .sum(),
                TimelinePayload::Song(song) => SongPlan::new(song, self.fps).frame_count(),
            })
            .sum()
    }

    /// Every frame state of `timeline` in playback order, without rasterizing.
    pub fn frame_states(&mut self, timeline: &Timeline<'_>) -> PumpkinResult<Vec<FrameState>> {
        let mut out = Vec::new();
        walk(timeline, &self.actors, self.fps, &mut self.rng, |_, state, _| {
            out.push(state);
            Ok(())
        })?;
        Ok(out)
    }

    /// Render `timeline` into `sink`, calling `begin` and `end` around the frames.
    #[tracing::instrument(
        skip_all,
        fields(entries = timeline.entries.len(), fps = self.fps.as_f64())
    )]
    pub fn render(
        &mut self,
        timeline: &Timeline<'_>,
        sink: &mut dyn FrameSink,
    ) -> PumpkinResult<RenderStats> {
        let canvas = self.compositor.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let compositor = &self.compositor;
        let mut frame = Frame::black(canvas);
        let mut pushed = 0u64;
        walk(timeline, &self.actors, self.fps, &mut self.rng, |idx, state, rng| {
            compositor.render_into(&state, rng, &mut frame);
            sink.push_frame(idx, &frame)?;
            pushed += 1;
            Ok(())
        })?;
        sink.end()?;

        let stats = RenderStats {
            frames_total: pushed,
            frames_nominal: self.fps.secs_to_frames_round(timeline.total_duration),
        };
        if stats.drift() != 0 {
            tracing::warn!(
                frames = stats.frames_total,
                nominal = stats.frames_nominal,
                drift = stats.drift(),
                "rendered frame count differs from the timeline's declared duration"
            );
        }
        tracing::info!(
            frames = stats.frames_total,
            secs = self.fps.frames_to_secs(stats.frames_total),
            "render complete"
        );
        Ok(stats)
    }
}

/// Build the stage for `actors` from the faces in `cfg.asset_dir`, resized to the actor slots.
pub fn load_compositor(cfg: &ProjectConfig, actors: &[ActorId]) -> PumpkinResult<Compositor> {
    let canvas = cfg.canvas();
    let slot = cfg.layout.slot_size(canvas, actors.len())?;
    let assets = AssetStore::load_dir(&cfg.asset_dir, actors, slot)?;
    if assets.is_empty() {
        tracing::warn!(
            dir = %cfg.asset_dir.display(),
            "no face assets found; pumpkins will not be drawn (run the `assets` step first)"
        );
    }
    Ok(Compositor::new(canvas, cfg.layout, actors, assets))
}

/// Visit every frame of `timeline` with its absolute index and state.
fn walk<R, F>(
    timeline: &Timeline<'_>,
    actors: &[ActorId],
    fps: Fps,
    rng: &mut R,
    mut visit: F,
) -> PumpkinResult<()>
where
    R: Rng,
    F: FnMut(FrameIndex, FrameState, &mut R) -> PumpkinResult<()>,
{
    let mut next = 0u64;
    for (i, entry) in timeline.entries.iter().enumerate() {
        let p = entry.payload;
        tracing::info!(
            entry = i + 1,
            of = timeline.entries.len(),
            kind = p.kind_str(),
            label = p.label(),
            start_secs = entry.start_offset,
            "rendering"
        );
        match p {
            TimelinePayload::Dialogue(scene) => {
                for line in &scene.lines {
                    let plan = DialoguePlan::new(line, fps);
                    for f in 0..plan.frame_count() {
                        let state = plan.frame_state(actors, f, rng);
                        visit(FrameIndex(next), state, rng)?;
                        next += 1;
                    }
                }
            }
            TimelinePayload::Song(song) => {
                let plan = SongPlan::new(song, fps);
                for f in 0..plan.frame_count() {
                    visit(FrameIndex(next), plan.frame_state(actors, f), rng)?;
                    next += 1;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
