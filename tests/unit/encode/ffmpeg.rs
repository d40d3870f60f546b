use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 24, den: 1 },
    }
}

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn sink_args_stream_rgb24_without_audio() {
    let args = sink_args(&cfg(64, 32), &FfmpegSinkOpts::new("out/a.mp4")).unwrap();
    let args = strings(&args);
    assert_eq!(args[0], "-y");
    let joined = args.join(" ");
    assert!(joined.contains("-f rawvideo -pix_fmt rgb24 -s 64x32 -r 24/1 -i pipe:0"));
    assert!(joined.contains("-an -c:v libx264 -pix_fmt yuv420p"));
    assert_eq!(args.last().map(String::as_str), Some("out/a.mp4"));
}

#[test]
fn sink_args_honor_no_overwrite() {
    let mut opts = FfmpegSinkOpts::new("out/a.mp4");
    opts.overwrite = false;
    let args = strings(&sink_args(&cfg(64, 32), &opts).unwrap());
    assert_eq!(args[0], "-n");
    assert!(!args.iter().any(|a| a == "-c:a"));
}

#[test]
fn sink_args_reject_bad_config() {
    let opts = FfmpegSinkOpts::new("out/a.mp4");
    assert!(sink_args(&cfg(0, 32), &opts).is_err());
    assert!(sink_args(&cfg(63, 32), &opts).is_err());

    let mut zero_fps = cfg(64, 32);
    zero_fps.fps = Fps { num: 0, den: 1 };
    assert!(sink_args(&zero_fps, &opts).is_err());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let frame = Frame {
        width: 2,
        height: 2,
        data: vec![0; 12],
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
