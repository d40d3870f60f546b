use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pumpkin_projection::audio::track::{background_track, encode_wav};
use pumpkin_projection::{
    FfmpegSink, FfmpegSinkOpts, ProjectConfig, RenderDriver, Script, build_timeline,
    generate_assets, halloween_script, load_compositor, loop_video, mux_audio,
};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pumpkin", version, about = "Halloween pumpkin projection video generator")]
struct Cli {
    /// Project config JSON. Missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show script JSON. Defaults to the built-in Halloween show.
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw every pumpkin face as a PNG.
    Assets,
    /// Render the silent show video (requires `ffmpeg` on PATH).
    Video,
    /// Synthesize the background track as WAV (requires `ffmpeg` on PATH).
    Audio,
    /// Mux the background track under the show video (requires `ffmpeg`/`ffprobe`).
    Mux,
    /// Write looped variants of the final video (requires `ffmpeg`/`ffprobe`).
    Loop,
    /// Run every step in order.
    All,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => ProjectConfig::from_path(path)?,
        None => ProjectConfig::default(),
    };
    let script = load_script(cli.script.as_deref())?;

    match cli.cmd {
        Command::Assets => cmd_assets(&cfg, &script),
        Command::Video => cmd_video(&cfg, &script),
        Command::Audio => cmd_audio(&cfg),
        Command::Mux => cmd_mux(&cfg),
        Command::Loop => cmd_loop(&cfg),
        Command::All => {
            cmd_assets(&cfg, &script)?;
            cmd_video(&cfg, &script)?;
            cmd_audio(&cfg)?;
            cmd_mux(&cfg)?;
            cmd_loop(&cfg)?;
            tracing::info!(out = %cfg.final_path.display(), "show ready");
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .try_init();
}

fn load_script(path: Option<&Path>) -> anyhow::Result<Script> {
    let script = match path {
        Some(path) => Script::from_path(path)?,
        None => halloween_script(),
    };
    script.validate()?;
    Ok(script)
}

fn cmd_assets(cfg: &ProjectConfig, script: &Script) -> anyhow::Result<()> {
    let written = generate_assets(&cfg.asset_dir, &script.actors, cfg.asset_size())?;
    tracing::info!(count = written.len(), dir = %cfg.asset_dir.display(), "face assets ready");
    Ok(())
}

fn cmd_video(cfg: &ProjectConfig, script: &Script) -> anyhow::Result<()> {
    let timeline = build_timeline(script)?;
    tracing::info!(
        entries = timeline.entries.len(),
        secs = timeline.total_duration,
        mins = timeline.total_duration / 60.0,
        "timeline built"
    );

    let compositor = load_compositor(cfg, &script.actors)?;
    let mut driver = RenderDriver::new(compositor, &script.actors, cfg.frame_rate()?, cfg.seed);
    tracing::info!(frames = driver.planned_frames(&timeline), "rendering video");

    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&cfg.video_path));
    let stats = driver.render(&timeline, &mut sink)?;
    tracing::info!(
        frames = stats.frames_total,
        out = %cfg.video_path.display(),
        "video written"
    );
    Ok(())
}

fn cmd_audio(cfg: &ProjectConfig) -> anyhow::Result<()> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let samples = background_track(cfg.audio_duration_ms(), &mut rng);
    encode_wav(&samples, &cfg.audio_path)?;
    tracing::info!(out = %cfg.audio_path.display(), "audio written");
    Ok(())
}

fn cmd_mux(cfg: &ProjectConfig) -> anyhow::Result<()> {
    let secs = mux_audio(&cfg.video_path, &cfg.audio_path, &cfg.final_path)?;
    tracing::info!(secs, out = %cfg.final_path.display(), "final video written");
    Ok(())
}

fn cmd_loop(cfg: &ProjectConfig) -> anyhow::Result<()> {
    for &count in &cfg.loop_counts {
        let out = cfg.loop_path(count);
        let report = loop_video(&cfg.final_path, &out, count)?;
        tracing::info!(
            count,
            mins = report.total_secs / 60.0,
            out = %out.display(),
            "looped variant written"
        );
    }
    Ok(())
}
