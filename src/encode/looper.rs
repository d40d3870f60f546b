use std::ffi::OsString;
use std::path::Path;

use crate::encode::ffmpeg::{ensure_parent_dir, probe_duration, push_args, run_ffmpeg};
use crate::foundation::error::{PumpkinError, PumpkinResult};

/// Result of a loop operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopReport {
    /// Repetitions written.
    pub count: u32,
    /// Duration of one repetition in seconds.
    pub original_secs: f64,
    /// `count * original_secs`.
    pub total_secs: f64,
}

/// Build the `ffmpeg` arguments that repeat `input` `count` times without re-encoding.
pub fn loop_args(input: &Path, output: &Path, count: u32) -> PumpkinResult<Vec<OsString>> {
    if count == 0 {
        return Err(PumpkinError::validation("loop count must be at least 1"));
    }
    let mut args = Vec::new();
    push_args(
        &mut args,
        &[
            "-y",
            "-loglevel",
            "error",
            "-stream_loop",
            &(count - 1).to_string(),
            "-i",
        ],
    );
    args.push(input.as_os_str().to_owned());
    push_args(&mut args, &["-map", "0", "-c", "copy", "-movflags", "+faststart"]);
    args.push(output.as_os_str().to_owned());
    Ok(args)
}

/// Write `output` as `input` played back `count` times in a row.
#[tracing::instrument(
    skip_all,
    fields(input = %input.display(), output = %output.display(), count = count)
)]
pub fn loop_video(input: &Path, output: &Path, count: u32) -> PumpkinResult<LoopReport> {
    let args = loop_args(input, output, count)?;
    if !input.is_file() {
        return Err(PumpkinError::validation(format!(
            "loop input '{}' does not exist",
            input.display()
        )));
    }

    let original_secs = probe_duration(input)?;
    ensure_parent_dir(output)?;
    run_ffmpeg(&args)?;

    let report = LoopReport {
        count,
        original_secs,
        total_secs: original_secs * f64::from(count),
    };
    tracing::info!(
        count,
        total_secs = report.total_secs,
        total_mins = report.total_secs / 60.0,
        "wrote looped video"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/looper.rs"]
mod tests;
