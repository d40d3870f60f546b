use std::path::PathBuf;

use rand::rngs::mock::StepRng;

use super::*;
use crate::compose::raster::StageLayout;
use crate::compose::state::BackgroundVariant;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::foundation::error::PumpkinError;
use crate::script::model::{DialogueLine, Expression, LyricLine, Scene, Script, ScriptSlot, Song};
use crate::timeline::build_timeline;

const JACK: ActorId = ActorId(1);
const GOURD: ActorId = ActorId(2);

fn hi_script() -> Script {
    Script {
        actors: vec![JACK, GOURD],
        scenes: vec![Scene {
            name: "greeting".to_owned(),
            duration: 1.0,
            lines: vec![DialogueLine {
                speaker: JACK,
                text: "Hi".to_owned(),
                duration: 1.0,
            }],
        }],
        songs: vec![Song {
            title: "duet".to_owned(),
            duration: 2.0,
            lyrics: vec![LyricLine {
                text: "la la".to_owned(),
                duration: 1.0,
                harmony: true,
            }],
        }],
        order: vec![ScriptSlot::Dialogue(0), ScriptSlot::Song(0)],
    }
}

fn driver(rng: StepRng) -> RenderDriver<StepRng> {
    let canvas = Canvas {
        width: 8,
        height: 6,
    };
    let comp = Compositor::new(
        canvas,
        StageLayout::default(),
        &[JACK, GOURD],
        AssetStore::new(),
    );
    RenderDriver::with_rng(comp, &[JACK, GOURD], Fps { num: 10, den: 1 }, rng)
}

#[test]
fn hi_line_lip_syncs_over_ten_frames() {
    let mut script = hi_script();
    script.order = vec![ScriptSlot::Dialogue(0)];
    let timeline = build_timeline(&script).unwrap();

    // A saturated step rng makes every idle blink pick `Closed`.
    let mut d = driver(StepRng::new(u64::MAX, 0));
    assert_eq!(d.planned_frames(&timeline), 10);

    let states = d.frame_states(&timeline).unwrap();
    assert_eq!(states.len(), 10);
    assert_eq!(states[0].expression(JACK), Some(Expression::OpenSmall));
    assert_eq!(states[0].expression(GOURD), Some(Expression::Closed));
    assert_eq!(states[5].expression(JACK), Some(Expression::OpenMedium));
    assert!(
        states
            .iter()
            .all(|s| s.background == BackgroundVariant::Normal)
    );
}

#[test]
fn blink_uses_the_driver_rng() {
    let mut script = hi_script();
    script.order = vec![ScriptSlot::Dialogue(0)];
    let timeline = build_timeline(&script).unwrap();

    let states = driver(StepRng::new(0, 0)).frame_states(&timeline).unwrap();
    assert_eq!(states[0].expression(GOURD), Some(Expression::OpenSmall));
    assert_eq!(states[1].expression(GOURD), Some(Expression::Closed));
}

#[test]
fn song_follows_dialogue() {
    let script = hi_script();
    let timeline = build_timeline(&script).unwrap();
    let mut d = driver(StepRng::new(u64::MAX, 0));
    assert_eq!(d.planned_frames(&timeline), 30);

    let states = d.frame_states(&timeline).unwrap();
    assert_eq!(states.len(), 30);
    // Song frame 0: harmony lead is the first actor over a spooky background.
    assert_eq!(states[10].expression(JACK), Some(Expression::Singing));
    assert_eq!(states[10].expression(GOURD), Some(Expression::OpenMedium));
    assert_eq!(states[10].background, BackgroundVariant::Spooky);
    // Song frame 15: lyric over, everyone idle, background cycle back to normal.
    assert_eq!(states[25], FrameState::idle(&[JACK, GOURD]));
}

#[test]
fn render_streams_ordered_frames_into_the_sink() {
    let script = hi_script();
    let timeline = build_timeline(&script).unwrap();
    let mut sink = InMemorySink::new();
    let stats = driver(StepRng::new(0, 0))
        .render(&timeline, &mut sink)
        .unwrap();

    assert_eq!(stats.frames_total, 30);
    assert_eq!(stats.frames_nominal, 30);
    assert_eq!(stats.drift(), 0);

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (8, 6));
    assert_eq!(cfg.fps, Fps { num: 10, den: 1 });
    assert!(sink.is_finished());

    let frames = sink.frames();
    assert_eq!(frames.len(), 30);
    for (i, (idx, frame)) in frames.iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.data.len(), 8 * 6 * 3);
    }
    assert!(frames[0].1.data.iter().all(|&b| b == 0));
    assert_ne!(frames[10].1.pixel(4, 5), [0, 0, 0]);
}

#[test]
fn drift_reports_scene_slack() {
    let mut script = hi_script();
    script.scenes[0].duration = 3.0;
    let timeline = build_timeline(&script).unwrap();
    let stats = driver(StepRng::new(0, 0))
        .render(&timeline, &mut InMemorySink::new())
        .unwrap();
    assert_eq!(stats.frames_total, 30);
    assert_eq!(stats.frames_nominal, 50);
    assert_eq!(stats.drift(), -20);
}

#[test]
fn zero_duration_units_render_nothing() {
    let mut script = hi_script();
    script.scenes[0].lines[0].duration = 0.0;
    script.songs[0].duration = -1.0;
    let timeline = build_timeline(&script).unwrap();
    let mut sink = InMemorySink::new();
    let stats = driver(StepRng::new(0, 0))
        .render(&timeline, &mut sink)
        .unwrap();
    assert_eq!(stats.frames_total, 0);
    assert!(sink.frames().is_empty());
    assert!(sink.is_finished());
}

struct FailingSink {
    after: u64,
    seen: u64,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PumpkinResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &Frame) -> PumpkinResult<()> {
        self.seen += 1;
        if self.seen > self.after {
            return Err(PumpkinError::evaluation("sink full"));
        }
        Ok(())
    }

    fn end(&mut self) -> PumpkinResult<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_stop_the_render() {
    let script = hi_script();
    let timeline = build_timeline(&script).unwrap();
    let mut sink = FailingSink { after: 3, seen: 0 };
    let err = driver(StepRng::new(0, 0))
        .render(&timeline, &mut sink)
        .unwrap_err();
    assert!(matches!(err, PumpkinError::Evaluation(_)));
    assert_eq!(sink.seen, 4);
}

#[test]
fn seeded_drivers_are_reproducible() {
    let script = hi_script();
    let timeline = build_timeline(&script).unwrap();
    let comp = || {
        Compositor::new(
            Canvas {
                width: 40,
                height: 20,
            },
            StageLayout::default(),
            &[JACK, GOURD],
            AssetStore::new(),
        )
    };
    let fps = Fps { num: 10, den: 1 };

    let mut a = InMemorySink::new();
    let mut b = InMemorySink::new();
    RenderDriver::new(comp(), &[JACK, GOURD], fps, Some(5))
        .render(&timeline, &mut a)
        .unwrap();
    RenderDriver::new(comp(), &[JACK, GOURD], fps, Some(5))
        .render(&timeline, &mut b)
        .unwrap();
    assert_eq!(a.frames(), b.frames());
}

#[test]
fn load_compositor_tolerates_missing_assets() {
    let cfg = ProjectConfig {
        asset_dir: PathBuf::from("target").join("no_faces_here"),
        ..ProjectConfig::default()
    };
    let comp = load_compositor(&cfg, &[JACK, GOURD]).unwrap();
    assert!(comp.assets().is_empty());
    assert_eq!(comp.canvas(), cfg.canvas());

    let cramped = ProjectConfig {
        width: 100,
        ..cfg
    };
    assert!(load_compositor(&cramped, &[JACK, GOURD]).is_err());
}
