use std::ffi::OsString;
use std::path::Path;

use crate::encode::ffmpeg::{ensure_parent_dir, probe_duration, push_args, run_ffmpeg};
use crate::foundation::error::{PumpkinError, PumpkinResult};

/// Build the `ffmpeg` arguments that loop `audio` under `video` and cut at `duration_secs`.
///
/// The video stream is copied; audio is encoded as AAC.
pub fn mux_args(video: &Path, audio: &Path, out: &Path, duration_secs: f64) -> Vec<OsString> {
    let mut args = Vec::new();
    push_args(&mut args, &["-y", "-loglevel", "error", "-i"]);
    args.push(video.as_os_str().to_owned());
    push_args(&mut args, &["-stream_loop", "-1", "-i"]);
    args.push(audio.as_os_str().to_owned());
    push_args(
        &mut args,
        &[
            "-map",
            "0:v:0",
            "-map",
            "1:a:0",
            "-c:v",
            "copy",
            "-c:a",
            "aac",
            "-t",
            &format!("{duration_secs:.6}"),
            "-movflags",
            "+faststart",
        ],
    );
    args.push(out.as_os_str().to_owned());
    args
}

/// Attach `audio` to `video`, looping the audio as needed and trimming it to the video length.
///
/// Returns the probed video duration in seconds.
#[tracing::instrument(
    skip_all,
    fields(video = %video.display(), audio = %audio.display(), out = %out.display())
)]
pub fn mux_audio(video: &Path, audio: &Path, out: &Path) -> PumpkinResult<f64> {
    for input in [video, audio] {
        if !input.is_file() {
            return Err(PumpkinError::validation(format!(
                "mux input '{}' does not exist",
                input.display()
            )));
        }
    }

    let duration = probe_duration(video)?;
    if duration <= 0.0 {
        return Err(PumpkinError::evaluation(format!(
            "video '{}' has no duration",
            video.display()
        )));
    }

    ensure_parent_dir(out)?;
    run_ffmpeg(&mux_args(video, audio, out, duration))?;
    tracing::info!(duration_secs = duration, "muxed background audio");
    Ok(duration)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mux.rs"]
mod tests;
