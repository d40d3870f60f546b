use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;

use super::*;
use crate::script::model::LyricLine;

const A1: ActorId = ActorId(1);
const A2: ActorId = ActorId(2);
const CAST: [ActorId; 2] = [A1, A2];

fn fps(n: u32) -> Fps {
    Fps::whole(n).unwrap()
}

fn line(speaker: ActorId, text: &str, duration: f64) -> DialogueLine {
    DialogueLine {
        speaker,
        text: text.to_owned(),
        duration,
    }
}

fn song(duration: f64, lyrics: &[(f64, bool)]) -> Song {
    Song {
        title: "test".to_owned(),
        duration,
        lyrics: lyrics
            .iter()
            .map(|&(duration, harmony)| LyricLine {
                text: "la".to_owned(),
                duration,
                harmony,
            })
            .collect(),
    }
}

// Always answers `true` to `gen_bool(0.5)`.
fn blink_open() -> StepRng {
    StepRng::new(0, 0)
}

// Always answers `false` to `gen_bool(0.5)`.
fn blink_closed() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

#[test]
fn character_classes_map_to_mouth_shapes() {
    assert_eq!(mouth_shape_for_char('a'), Expression::OpenMedium);
    assert_eq!(mouth_shape_for_char('U'), Expression::OpenMedium);
    assert_eq!(mouth_shape_for_char('b'), Expression::Closed);
    assert_eq!(mouth_shape_for_char('M'), Expression::Closed);
    assert_eq!(mouth_shape_for_char('f'), Expression::OpenWide);
    assert_eq!(mouth_shape_for_char('V'), Expression::OpenWide);
    assert_eq!(mouth_shape_for_char('x'), Expression::OpenSmall);
    assert_eq!(mouth_shape_for_char('é'), Expression::OpenSmall);
    assert_eq!(mouth_shape_for_char(' '), Expression::Closed);
    assert_eq!(mouth_shape_for_char('!'), Expression::Closed);
    assert_eq!(mouth_shape_for_char('7'), Expression::Closed);
}

#[test]
fn frame_count_rounds_and_zero_duration_is_empty() {
    assert_eq!(frame_count(4.0, fps(24)), 96);
    assert_eq!(frame_count(1.0, fps(10)), 10);
    assert_eq!(frame_count(0.0, fps(24)), 0);
    assert_eq!(frame_count(0.26, fps(10)), 3);
    assert_eq!(frame_count(-1.0, fps(24)), 0);

    let plan = DialoguePlan::new(&line(A1, "Hello", 0.0), fps(24));
    assert_eq!(plan.frame_count(), 0);
}

#[test]
fn hi_line_walks_characters() {
    let plan = DialoguePlan::new(&line(A1, "Hi", 1.0), fps(10));
    assert_eq!(plan.frame_count(), 10);

    let mut rng = blink_closed();
    let f0 = plan.frame_state(&CAST, 0, &mut rng);
    assert_eq!(f0.expression(A1), Some(Expression::OpenSmall));
    assert_eq!(f0.expression(A2), Some(Expression::Closed));
    assert_eq!(f0.background, BackgroundVariant::Normal);

    for f in 1..5 {
        assert_eq!(plan.char_index(f), 0);
        assert_eq!(plan.speaker_expression(f), Expression::OpenSmall);
    }
    let f5 = plan.frame_state(&CAST, 5, &mut rng);
    assert_eq!(plan.char_index(5), 1);
    assert_eq!(f5.expression(A1), Some(Expression::OpenMedium));
    assert_eq!(f5.expression(A2), Some(Expression::Closed));
}

#[test]
fn past_end_of_text_is_closed() {
    let plan = DialoguePlan::new(&line(A2, "", 1.0), fps(10));
    assert_eq!(plan.speaker_expression(3), Expression::Closed);

    let plan = DialoguePlan::new(&line(A2, "ab", 1.0), fps(10));
    assert_eq!(plan.speaker_expression(10), Expression::Closed);
}

#[test]
fn char_index_counts_unicode_scalars() {
    let plan = DialoguePlan::new(&line(A1, "éa", 1.0), fps(10));
    assert_eq!(plan.speaker_expression(0), Expression::OpenSmall);
    assert_eq!(plan.speaker_expression(5), Expression::OpenMedium);
}

#[test]
fn blink_applies_only_every_sixtieth_frame() {
    let plan = DialoguePlan::new(&line(A1, "zzzzzzzzzz", 10.0), fps(24));
    assert_eq!(plan.frame_count(), 240);

    let mut rng = blink_open();
    for f in 0..plan.frame_count() {
        let state = plan.frame_state(&CAST, f, &mut rng);
        let listener = state.expression(A2).unwrap();
        if f % 60 == 0 {
            assert_eq!(listener, Expression::OpenSmall, "frame {f}");
        } else {
            assert_eq!(listener, Expression::Closed, "frame {f}");
        }
        // The speaker is never touched by the blink.
        assert_eq!(state.expression(A1), Some(Expression::OpenSmall));
    }

    let mut rng = blink_closed();
    let state = plan.frame_state(&CAST, 120, &mut rng);
    assert_eq!(state.expression(A2), Some(Expression::Closed));
}

#[test]
fn blink_draws_both_tics_over_seeds() {
    let plan = DialoguePlan::new(&line(A2, "hello", 1.0), fps(24));
    let mut seen_open = false;
    let mut seen_closed = false;
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        match plan.frame_state(&CAST, 0, &mut rng).expression(A1) {
            Some(Expression::OpenSmall) => seen_open = true,
            Some(Expression::Closed) => seen_closed = true,
            other => panic!("unexpected blink tic {other:?}"),
        }
    }
    assert!(seen_open && seen_closed);
}

#[test]
fn harmony_cycle_swaps_lead_every_five_frames() {
    let plan = SongPlan::new(&song(4.0, &[(4.0, true)]), fps(24));
    for f in 0..plan.frame_count() {
        let state = plan.frame_state(&CAST, f);
        let expected = if f % 10 < 5 {
            (Expression::Singing, Expression::OpenMedium)
        } else {
            (Expression::OpenMedium, Expression::Singing)
        };
        assert_eq!(
            (state.expression(A1).unwrap(), state.expression(A2).unwrap()),
            expected,
            "frame {f}"
        );
    }
}

#[test]
fn harmony_cycle_is_relative_to_lyric_start() {
    // Second lyric starts at frame 7, so its cycle offset 0 is song frame 7.
    let plan = SongPlan::new(&song(2.0, &[(0.7, false), (1.0, true)]), fps(10));
    assert_eq!(plan.windows()[1].start, 7);
    let at = |f| {
        let s = plan.frame_state(&CAST, f);
        (s.expression(A1).unwrap(), s.expression(A2).unwrap())
    };
    assert_eq!(at(7), (Expression::Singing, Expression::OpenMedium));
    assert_eq!(at(11), (Expression::Singing, Expression::OpenMedium));
    assert_eq!(at(12), (Expression::OpenMedium, Expression::Singing));
    assert_eq!(at(16), (Expression::OpenMedium, Expression::Singing));
}

#[test]
fn solo_turns_alternate_every_thirty_frames() {
    let plan = SongPlan::new(&song(5.0, &[(5.0, false)]), fps(24));
    for f in 0..120 {
        let state = plan.frame_state(&CAST, f);
        let pair = (state.expression(A1).unwrap(), state.expression(A2).unwrap());
        if (f / 30) % 2 == 0 {
            assert_eq!(pair, (Expression::Singing, Expression::Closed), "frame {f}");
        } else {
            assert_eq!(pair, (Expression::Closed, Expression::Singing), "frame {f}");
        }
    }
}

#[test]
fn background_cycles_every_twenty_frames() {
    for f in 0..100 {
        let expected = if f % 20 < 10 {
            BackgroundVariant::Spooky
        } else {
            BackgroundVariant::Normal
        };
        assert_eq!(song_background(f), expected, "frame {f}");
    }
}

#[test]
fn frames_outside_lyric_windows_are_idle() {
    // Lyrics cover 2s of a 3s song.
    let plan = SongPlan::new(&song(3.0, &[(1.0, true), (1.0, false)]), fps(10));
    assert_eq!(plan.frame_count(), 30);
    assert_eq!(plan.active_lyric(19).map(|(i, _)| i), Some(1));
    assert!(plan.active_lyric(20).is_none());

    let state = plan.frame_state(&CAST, 25);
    assert_eq!(state.expression(A1), Some(Expression::Closed));
    assert_eq!(state.expression(A2), Some(Expression::Closed));
    // The background keeps cycling while idle.
    assert_eq!(state.background, BackgroundVariant::Spooky);
    assert_eq!(
        plan.frame_state(&CAST, 15).background,
        BackgroundVariant::Normal
    );
}

#[test]
fn lyric_windows_are_back_to_back() {
    let plan = SongPlan::new(&song(13.0, &[(4.0, false), (0.0, true), (5.0, true)]), fps(24));
    let windows = plan.windows();
    assert_eq!(windows[0].start, 0);
    assert_eq!(windows[0].len, 96);
    assert_eq!(windows[1].start, 96);
    assert_eq!(windows[1].len, 0);
    assert_eq!(windows[2].start, 96);
    assert_eq!(windows[2].len, 120);
    // The zero-length lyric never wins the search.
    assert_eq!(plan.active_lyric(96).map(|(i, _)| i), Some(2));
}

#[test]
fn three_actor_cast_rotates_lead_and_soloist() {
    let cast = [A1, A2, ActorId(3)];
    let plan = SongPlan::new(&song(4.0, &[(2.0, false), (2.0, true)]), fps(30));
    let singer = |f| {
        let s = plan.frame_state(&cast, f);
        cast.iter()
            .copied()
            .find(|&a| s.expression(a) == Some(Expression::Singing))
            .unwrap()
    };
    assert_eq!(singer(0), A1);
    assert_eq!(singer(30), A2);
    // Harmony lyric starts at frame 60: lead rotates each half cycle.
    assert_eq!(singer(60), A1);
    assert_eq!(singer(65), A2);
    assert_eq!(singer(70), ActorId(3));
    assert_eq!(singer(74), ActorId(3));
    assert_eq!(singer(75), A1);
    let s = plan.frame_state(&cast, 65);
    assert_eq!(s.expression(A1), Some(Expression::OpenMedium));
    assert_eq!(s.expression(ActorId(3)), Some(Expression::OpenMedium));
}
