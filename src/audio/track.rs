use std::ffi::OsString;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use rand::Rng;
use rand::seq::SliceRandom as _;

use crate::audio::synth::{
    SAMPLE_RATE, apply_gain_db, fade_in, fade_out, normalize_peak, overlay, samples_for_ms, silence,
    sine, spooky_tone, wind,
};
use crate::encode::ffmpeg::{ensure_parent_dir, push_args, run_ffmpeg};
use crate::foundation::error::PumpkinResult;

/// Length of one ambience window.
pub const AMBIENCE_WINDOW_MS: u64 = 15_000;
/// Tones start within this many milliseconds of their window start.
pub const AMBIENCE_SPREAD_MS: u64 = 10_000;
/// Chance that a window gets a tone.
pub const AMBIENCE_TONE_CHANCE: f64 = 0.3;
/// Frequencies a spooky ambience tone is drawn from.
pub const AMBIENCE_FREQS: [f64; 4] = [100.0, 150.0, 200.0, 250.0];

/// Length of one chord in the music loop.
pub const CHORD_MS: u64 = 4_000;

/// Am, F, C, G triads.
pub const CHORDS: [(&str, [f64; 3]); 4] = [
    ("Am", [220.0, 261.63, 329.63]),
    ("F", [174.61, 220.0, 261.63]),
    ("C", [261.63, 329.63, 392.0]),
    ("G", [196.0, 246.94, 293.66]),
];

/// Default background track length: 8.5 minutes.
pub const DEFAULT_TRACK_MS: u64 = 510_000;

/// Wind with a chance of a spooky tone in every 15 s window.
pub fn ambience<R: Rng>(ms: u64, rng: &mut R) -> Vec<f32> {
    let mut out = wind(ms, rng);

    let mut window = 0;
    while window < ms {
        if rng.gen_bool(AMBIENCE_TONE_CHANCE) {
            let freq = *AMBIENCE_FREQS.choose(rng).unwrap_or(&AMBIENCE_FREQS[0]);
            let tone_ms = rng.gen_range(1_000..3_000);
            let spread = AMBIENCE_SPREAD_MS.min(ms - window);
            let at = window + rng.gen_range(0..spread);
            overlay(&mut out, &spooky_tone(freq, tone_ms), samples_for_ms(at));
            tracing::debug!(window_ms = window, at_ms = at, freq, tone_ms, "ambience tone");
        }
        window += AMBIENCE_WINDOW_MS;
    }
    out
}

/// One chord: three tones at -25 dB with 200 ms fades.
pub fn chord(freqs: &[f64], ms: u64) -> Vec<f32> {
    let mut out = silence(ms);
    for &f in freqs {
        let mut tone = sine(f, ms);
        apply_gain_db(&mut tone, -25.0);
        fade_in(&mut tone, 200);
        fade_out(&mut tone, 200);
        overlay(&mut out, &tone, 0);
    }
    out
}

/// The chord loop, trimmed to exactly `ms`.
pub fn music(ms: u64) -> Vec<f32> {
    let mut out = silence(ms);
    let rendered: Vec<Vec<f32>> = CHORDS.iter().map(|(_, f)| chord(f, CHORD_MS)).collect();

    let mut at = 0;
    let mut i = 0;
    while at < ms {
        overlay(&mut out, &rendered[i % rendered.len()], samples_for_ms(at));
        at += CHORD_MS;
        i += 1;
    }
    out
}

/// Ambience plus music at -15 dB, normalized to a -0.1 dBFS peak.
#[tracing::instrument(skip(rng))]
pub fn background_track<R: Rng>(ms: u64, rng: &mut R) -> Vec<f32> {
    let mut out = ambience(ms, rng);
    let mut m = music(ms);
    apply_gain_db(&mut m, -15.0);
    overlay(&mut out, &m, 0);
    normalize_peak(&mut out, 0.1);
    tracing::info!(
        secs = out.len() as f64 / f64::from(SAMPLE_RATE),
        "synthesized background track"
    );
    out
}

/// Write mono samples as raw little-endian `f32`.
pub fn write_f32le(path: &Path, samples: &[f32]) -> PumpkinResult<()> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("create pcm file '{}'", path.display()))?;
    let mut w = std::io::BufWriter::new(file);
    for s in samples {
        w.write_all(&s.to_le_bytes())
            .with_context(|| format!("write pcm file '{}'", path.display()))?;
    }
    w.flush()
        .with_context(|| format!("flush pcm file '{}'", path.display()))?;
    Ok(())
}

/// `ffmpeg` arguments that transcode mono `f32le` at [`SAMPLE_RATE`] to 16-bit WAV.
pub fn wav_args(pcm: &Path, wav: &Path) -> Vec<OsString> {
    let mut args = Vec::new();
    push_args(
        &mut args,
        &[
            "-y",
            "-loglevel",
            "error",
            "-f",
            "f32le",
            "-ar",
            &SAMPLE_RATE.to_string(),
            "-ac",
            "1",
            "-i",
        ],
    );
    args.push(pcm.as_os_str().to_owned());
    push_args(&mut args, &["-c:a", "pcm_s16le"]);
    args.push(wav.as_os_str().to_owned());
    args
}

/// Write `samples` to `wav` through a temporary raw file and `ffmpeg`.
#[tracing::instrument(skip_all, fields(wav = %wav.display(), samples = samples.len()))]
pub fn encode_wav(samples: &[f32], wav: &Path) -> PumpkinResult<()> {
    let pcm = wav.with_extension("f32");
    write_f32le(&pcm, samples)?;
    let result = run_ffmpeg(&wav_args(&pcm, wav));
    if let Err(e) = std::fs::remove_file(&pcm) {
        tracing::warn!(path = %pcm.display(), "could not remove temporary pcm: {e}");
    }
    result
}

#[cfg(test)]
#[path = "../../tests/unit/audio/track.rs"]
mod tests;
