use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PumpkinError, PumpkinResult};

/// Discrete mouth shape shown by one actor for one frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// Mouth shut (thin line).
    Closed,
    /// Small round opening.
    OpenSmall,
    /// Medium round opening.
    OpenMedium,
    /// Wide opening.
    OpenWide,
    /// Tall rounded singing mouth.
    Singing,
}

impl Expression {
    /// Every expression, in asset-generation order.
    pub const ALL: [Expression; 5] = [
        Expression::Closed,
        Expression::OpenSmall,
        Expression::OpenMedium,
        Expression::OpenWide,
        Expression::Singing,
    ];

    /// Stable snake_case name, used in asset file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Expression::Closed => "closed",
            Expression::OpenSmall => "open_small",
            Expression::OpenMedium => "open_medium",
            Expression::OpenWide => "open_wide",
            Expression::Singing => "singing",
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one animated pumpkin.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One spoken line of a dialogue scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DialogueLine {
    /// Actor speaking the line.
    pub speaker: ActorId,
    /// Spoken text; drives the mouth shapes.
    pub text: String,
    /// Line duration in seconds.
    pub duration: f64,
}

/// A dialogue scene.
///
/// `duration` is informational. It is not required to match the sum of line durations; rendering
/// sizes each line by its own duration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Scene name, used in progress logs.
    pub name: String,
    /// Declared scene duration in seconds.
    pub duration: f64,
    /// Lines in speaking order.
    pub lines: Vec<DialogueLine>,
}

/// One sung line of a song.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LyricLine {
    /// Lyric text.
    pub text: String,
    /// Line duration in seconds.
    pub duration: f64,
    /// Both actors sing together instead of alternating solo turns.
    #[serde(default)]
    pub harmony: bool,
}

/// A song.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Song {
    /// Song title, used in progress logs.
    pub title: String,
    /// Song duration in seconds; sizes the song's frame range.
    pub duration: f64,
    /// Lyric lines in order.
    pub lyrics: Vec<LyricLine>,
}

/// One slot of the hand-specified interleave order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptSlot {
    /// Index into [`Script::scenes`].
    Dialogue(usize),
    /// Index into [`Script::songs`].
    Song(usize),
}

/// Complete show script: cast, scenes, songs and the order they play in.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Actors in on-screen order (left to right).
    pub actors: Vec<ActorId>,
    /// Dialogue scenes.
    pub scenes: Vec<Scene>,
    /// Songs.
    pub songs: Vec<Song>,
    /// Playback order over scenes and songs.
    pub order: Vec<ScriptSlot>,
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json_str(s: &str) -> PumpkinResult<Self> {
        serde_json::from_str(s).map_err(|e| PumpkinError::serde(format!("invalid script: {e}")))
    }

    /// Load a script from a JSON file.
    pub fn from_path(path: &Path) -> PumpkinResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check structural consistency: at least one actor, no duplicate actors, known speakers.
    ///
    /// Durations are not checked; bad durations render as empty frame ranges.
    pub fn validate(&self) -> PumpkinResult<()> {
        if self.actors.is_empty() {
            return Err(PumpkinError::validation("script must declare at least one actor"));
        }
        for (i, a) in self.actors.iter().enumerate() {
            if self.actors[..i].contains(a) {
                return Err(PumpkinError::validation(format!("duplicate actor {a}")));
            }
        }
        for scene in &self.scenes {
            if let Some(line) = scene
                .lines
                .iter()
                .find(|l| !self.actors.contains(&l.speaker))
            {
                return Err(PumpkinError::validation(format!(
                    "scene '{}' has a line spoken by unknown actor {}",
                    scene.name, line.speaker
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
