//! Frame-state machine: maps a frame offset inside a dialogue line or a song to one expression
//! per actor plus a background variant.
//!
//! Everything here except the idle blink is deterministic. The blink draws from the caller's
//! random source so tests can seed it.

use rand::Rng;

use crate::foundation::core::Fps;
use crate::script::model::{ActorId, DialogueLine, Expression, Song};

/// Dialogue frames where non-speaking actors get a random idle tic.
pub const BLINK_PERIOD_FRAMES: u64 = 60;
/// Length of one harmony cycle; the lead moves to the next actor every half cycle.
pub const HARMONY_CYCLE_FRAMES: u64 = 10;
/// Length of one solo turn.
pub const SOLO_TURN_FRAMES: u64 = 30;
/// Length of one song background cycle; the first half is spooky.
pub const BACKGROUND_CYCLE_FRAMES: u64 = 20;

/// Background treatment for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundVariant {
    /// Solid black.
    Normal,
    /// Purple gradient with fireflies.
    Spooky,
}

/// Expression of every actor plus the background for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameState {
    /// Actor expressions in on-screen order.
    pub expressions: Vec<(ActorId, Expression)>,
    /// Background variant.
    pub background: BackgroundVariant,
}

impl FrameState {
    /// All actors closed over a normal background.
    pub fn idle(actors: &[ActorId]) -> Self {
        Self {
            expressions: actors.iter().map(|&a| (a, Expression::Closed)).collect(),
            background: BackgroundVariant::Normal,
        }
    }

    /// Expression currently shown by `actor`, if it is on stage.
    pub fn expression(&self, actor: ActorId) -> Option<Expression> {
        self.expressions
            .iter()
            .find(|(a, _)| *a == actor)
            .map(|(_, e)| *e)
    }

    fn set(&mut self, actor: ActorId, expr: Expression) {
        if let Some(slot) = self.expressions.iter_mut().find(|(a, _)| *a == actor) {
            slot.1 = expr;
        }
    }
}

/// Number of frames a unit of `duration` seconds occupies: `round(duration * fps)`.
pub fn frame_count(duration: f64, fps: Fps) -> u64 {
    fps.secs_to_frames_round(duration)
}

/// Map one character of spoken text to a mouth shape.
pub fn mouth_shape_for_char(c: char) -> Expression {
    match c {
        'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U' => Expression::OpenMedium,
        'b' | 'p' | 'm' | 'B' | 'P' | 'M' => Expression::Closed,
        'f' | 'v' | 'F' | 'V' => Expression::OpenWide,
        c if c.is_alphabetic() => Expression::OpenSmall,
        _ => Expression::Closed,
    }
}

/// `true` for dialogue frames 0, 60, 120, ...
pub fn is_blink_frame(frame: u64) -> bool {
    frame.is_multiple_of(BLINK_PERIOD_FRAMES)
}

/// Song background for a frame index counted from the start of the song.
pub fn song_background(frame: u64) -> BackgroundVariant {
    if frame % BACKGROUND_CYCLE_FRAMES < BACKGROUND_CYCLE_FRAMES / 2 {
        BackgroundVariant::Spooky
    } else {
        BackgroundVariant::Normal
    }
}

/// Precomputed per-line data for dialogue mode.
#[derive(Clone, Debug)]
pub struct DialoguePlan {
    speaker: ActorId,
    chars: Vec<char>,
    frame_count: u64,
}

impl DialoguePlan {
    /// Plan a dialogue line at `fps`.
    pub fn new(line: &DialogueLine, fps: Fps) -> Self {
        Self {
            speaker: line.speaker,
            chars: line.text.chars().collect(),
            frame_count: frame_count(line.duration, fps),
        }
    }

    /// Frames occupied by the line.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Actor speaking the line.
    pub fn speaker(&self) -> ActorId {
        self.speaker
    }

    /// Index of the character being spoken at `frame`: `floor(frame / frame_count * len)`.
    pub fn char_index(&self, frame: u64) -> usize {
        if self.frame_count == 0 {
            return 0;
        }
        let len = self.chars.len() as u128;
        (u128::from(frame) * len / u128::from(self.frame_count)) as usize
    }

    /// Speaker expression at `frame`; `Closed` once the text is exhausted.
    pub fn speaker_expression(&self, frame: u64) -> Expression {
        self.chars
            .get(self.char_index(frame))
            .map_or(Expression::Closed, |&c| mouth_shape_for_char(c))
    }

    /// Full frame state. Non-speaking actors blink on [`is_blink_frame`] frames.
    pub fn frame_state<R: Rng>(&self, actors: &[ActorId], frame: u64, rng: &mut R) -> FrameState {
        let mut state = FrameState::idle(actors);
        state.set(self.speaker, self.speaker_expression(frame));

        if is_blink_frame(frame) {
            for &actor in actors.iter().filter(|&&a| a != self.speaker) {
                let tic = if rng.gen_bool(0.5) {
                    Expression::OpenSmall
                } else {
                    Expression::Closed
                };
                state.set(actor, tic);
            }
        }
        state
    }
}

/// Frame window of one lyric line inside its song.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LyricWindow {
    /// First frame of the lyric, counted from the song start.
    pub start: u64,
    /// Frames occupied by the lyric.
    pub len: u64,
    /// Copied from the lyric line.
    pub harmony: bool,
}

impl LyricWindow {
    /// `true` when `frame` falls in `[start, start + len)`.
    pub fn contains(&self, frame: u64) -> bool {
        self.start <= frame && frame < self.start + self.len
    }
}

/// Precomputed lyric windows for song mode.
#[derive(Clone, Debug)]
pub struct SongPlan {
    windows: Vec<LyricWindow>,
    frame_count: u64,
}

impl SongPlan {
    /// Plan a song at `fps`. Lyric windows are laid back to back in lyric order.
    pub fn new(song: &Song, fps: Fps) -> Self {
        let mut start = 0;
        let windows = song
            .lyrics
            .iter()
            .map(|lyric| {
                let len = frame_count(lyric.duration, fps);
                let w = LyricWindow {
                    start,
                    len,
                    harmony: lyric.harmony,
                };
                start += len;
                w
            })
            .collect();
        Self {
            windows,
            frame_count: frame_count(song.duration, fps),
        }
    }

    /// Frames occupied by the song.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Lyric windows in order.
    pub fn windows(&self) -> &[LyricWindow] {
        &self.windows
    }

    /// Lyric active at `frame` and its index, by linear search.
    pub fn active_lyric(&self, frame: u64) -> Option<(usize, &LyricWindow)> {
        self.windows.iter().enumerate().find(|(_, w)| w.contains(frame))
    }

    /// Full frame state at `frame`.
    pub fn frame_state(&self, actors: &[ActorId], frame: u64) -> FrameState {
        let mut state = FrameState::idle(actors);
        state.background = song_background(frame);

        let Some((_, lyric)) = self.active_lyric(frame) else {
            return state;
        };
        if actors.is_empty() {
            return state;
        }
        let n = actors.len() as u64;

        if lyric.harmony {
            let half_cycles = (frame - lyric.start) / (HARMONY_CYCLE_FRAMES / 2);
            let lead = actors[(half_cycles % n) as usize];
            for &actor in actors {
                let expr = if actor == lead {
                    Expression::Singing
                } else {
                    Expression::OpenMedium
                };
                state.set(actor, expr);
            }
        } else {
            let singer = actors[((frame / SOLO_TURN_FRAMES) % n) as usize];
            state.set(singer, Expression::Singing);
        }
        state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/state.rs"]
mod tests;
