//! Mono `f32` signal primitives at [`SAMPLE_RATE`].
//!
//! Buffers are plain `Vec<f32>` in `[-1, 1]`; lengths are given in milliseconds.

use rand::Rng;

use crate::foundation::math::db_to_gain;

/// Sample rate of every generated buffer.
pub const SAMPLE_RATE: u32 = 48_000;

/// Number of samples covering `ms` milliseconds.
pub fn samples_for_ms(ms: u64) -> usize {
    (ms * u64::from(SAMPLE_RATE) / 1000) as usize
}

/// `ms` milliseconds of silence.
pub fn silence(ms: u64) -> Vec<f32> {
    vec![0.0; samples_for_ms(ms)]
}

/// Full-scale sine at `freq` Hz.
pub fn sine(freq: f64, ms: u64) -> Vec<f32> {
    let step = std::f64::consts::TAU * freq / f64::from(SAMPLE_RATE);
    (0..samples_for_ms(ms))
        .map(|i| (step * i as f64).sin() as f32)
        .collect()
}

/// Uniform white noise in `[-1, 1]`.
pub fn white_noise<R: Rng>(ms: u64, rng: &mut R) -> Vec<f32> {
    (0..samples_for_ms(ms))
        .map(|_| rng.gen_range(-1.0f32..=1.0))
        .collect()
}

/// Scale by `db` decibels.
pub fn apply_gain_db(buf: &mut [f32], db: f32) {
    let g = db_to_gain(db);
    for s in buf {
        *s *= g;
    }
}

/// Linear ramp from silence over the first `ms` milliseconds.
pub fn fade_in(buf: &mut [f32], ms: u64) {
    let n = samples_for_ms(ms).min(buf.len());
    for (i, s) in buf[..n].iter_mut().enumerate() {
        *s *= i as f32 / n as f32;
    }
}

/// Linear ramp to silence over the last `ms` milliseconds.
pub fn fade_out(buf: &mut [f32], ms: u64) {
    let n = samples_for_ms(ms).min(buf.len());
    let start = buf.len() - n;
    for (i, s) in buf[start..].iter_mut().enumerate() {
        *s *= (n - i) as f32 / n as f32;
    }
}

/// Sum `top` into `base` starting at sample `offset`. `base` keeps its length.
pub fn overlay(base: &mut [f32], top: &[f32], offset: usize) {
    let Some(dst) = base.get_mut(offset..) else {
        return;
    };
    for (d, s) in dst.iter_mut().zip(top) {
        *d += *s;
    }
}

/// One-pole low-pass filter with cutoff `cutoff_hz`.
pub fn low_pass(buf: &mut [f32], cutoff_hz: f32) {
    let rc = 1.0 / (std::f32::consts::TAU * cutoff_hz);
    let dt = 1.0 / SAMPLE_RATE as f32;
    let alpha = dt / (rc + dt);

    let mut prev = 0.0f32;
    for s in buf {
        prev += alpha * (*s - prev);
        *s = prev;
    }
}

/// Peak absolute amplitude.
pub fn peak(buf: &[f32]) -> f32 {
    buf.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

/// Scale so the peak sits `headroom_db` below full scale. Silent buffers are left untouched.
pub fn normalize_peak(buf: &mut [f32], headroom_db: f32) {
    let p = peak(buf);
    if p <= f32::EPSILON {
        return;
    }
    let g = db_to_gain(-headroom_db) / p;
    for s in buf {
        *s *= g;
    }
}

/// Sine at `freq` with a fifth above at -20 dB and an octave at -30 dB, with 100 ms fades.
pub fn spooky_tone(freq: f64, ms: u64) -> Vec<f32> {
    let mut tone = sine(freq, ms);
    let mut fifth = sine(freq * 1.5, ms);
    apply_gain_db(&mut fifth, -20.0);
    let mut octave = sine(freq * 2.0, ms);
    apply_gain_db(&mut octave, -30.0);

    overlay(&mut tone, &fifth, 0);
    overlay(&mut tone, &octave, 0);
    fade_in(&mut tone, 100);
    fade_out(&mut tone, 100);
    tone
}

/// White noise at -25 dB through an 800 Hz low-pass.
pub fn wind<R: Rng>(ms: u64, rng: &mut R) -> Vec<f32> {
    let mut noise = white_noise(ms, rng);
    apply_gain_db(&mut noise, -25.0);
    low_pass(&mut noise, 800.0);
    noise
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
