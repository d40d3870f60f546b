use crate::foundation::error::{PumpkinError, PumpkinResult};
use crate::script::model::{Scene, Script, ScriptSlot, Song};

/// What a timeline entry plays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelinePayload<'a> {
    /// A dialogue scene.
    Dialogue(&'a Scene),
    /// A song.
    Song(&'a Song),
}

impl TimelinePayload<'_> {
    /// Declared duration of the payload in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            TimelinePayload::Dialogue(scene) => scene.duration,
            TimelinePayload::Song(song) => song.duration,
        }
    }

    /// Scene name or song title.
    pub fn label(&self) -> &str {
        match self {
            TimelinePayload::Dialogue(scene) => &scene.name,
            TimelinePayload::Song(song) => &song.title,
        }
    }

    /// `"dialogue"` or `"song"`.
    pub fn kind_str(&self) -> &'static str {
        match self {
            TimelinePayload::Dialogue(_) => "dialogue",
            TimelinePayload::Song(_) => "song",
        }
    }
}

/// One scheduled unit with its start offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry<'a> {
    /// Scheduled scene or song.
    pub payload: TimelinePayload<'a>,
    /// Sum of the declared durations of all prior entries, in seconds.
    pub start_offset: f64,
}

/// Ordered show timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<'a> {
    /// Entries in playback order.
    pub entries: Vec<TimelineEntry<'a>>,
    /// Sum of every entry's declared duration, in seconds.
    pub total_duration: f64,
}

/// Interleave a script's scenes and songs following its `order`.
///
/// Pure and deterministic. Fails only when an order slot points past the scene or song lists.
#[tracing::instrument(skip(script), fields(slots = script.order.len()))]
pub fn build_timeline(script: &Script) -> PumpkinResult<Timeline<'_>> {
    let mut entries = Vec::with_capacity(script.order.len());
    let mut current = 0.0;

    for slot in &script.order {
        let payload = match *slot {
            ScriptSlot::Dialogue(i) => {
                TimelinePayload::Dialogue(script.scenes.get(i).ok_or_else(|| {
                    PumpkinError::validation(format!(
                        "order references dialogue scene {i}, but the script has {}",
                        script.scenes.len()
                    ))
                })?)
            }
            ScriptSlot::Song(i) => TimelinePayload::Song(script.songs.get(i).ok_or_else(|| {
                PumpkinError::validation(format!(
                    "order references song {i}, but the script has {}",
                    script.songs.len()
                ))
            })?),
        };
        entries.push(TimelineEntry {
            payload,
            start_offset: current,
        });
        current += payload.duration();
    }

    Ok(Timeline {
        entries,
        total_duration: current,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
