use rand::rngs::mock::StepRng;

use super::*;
use crate::script::model::Expression;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PreparedImage {
    let data = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    PreparedImage::from_premul(width, height, data).unwrap()
}

fn tiny_layout() -> StageLayout {
    StageLayout {
        side_margin: 1,
        top_margin: 2,
        width_inset: 2,
        height_inset: 4,
    }
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn default_layout_matches_two_actor_stage() {
    let layout = StageLayout::default();
    let c = canvas(1920, 1080);
    assert_eq!(layout.slot_size(c, 2).unwrap(), canvas(860, 880));
    assert_eq!(layout.anchor(c, 0, 2), (50, 100));
    assert_eq!(layout.anchor(c, 1, 2), (1010, 100));
}

#[test]
fn slot_size_rejects_empty_cast_and_cramped_canvas() {
    let layout = StageLayout::default();
    assert!(layout.slot_size(canvas(1920, 1080), 0).is_err());
    assert!(layout.slot_size(canvas(150, 1080), 2).is_err());
    assert!(layout.slot_size(canvas(1920, 200), 1).is_err());
}

#[test]
fn normal_background_is_black() {
    let comp = Compositor::new(canvas(8, 6), tiny_layout(), &[], AssetStore::new());
    let state = FrameState {
        expressions: Vec::new(),
        background: BackgroundVariant::Normal,
    };
    let frame = comp.render(&state, &mut StepRng::new(0, 0));
    assert_eq!((frame.width, frame.height), (8, 6));
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn spooky_background_fades_from_purple_to_black() {
    let comp = Compositor::new(canvas(400, 100), tiny_layout(), &[], AssetStore::new());
    let state = FrameState {
        expressions: Vec::new(),
        background: BackgroundVariant::Spooky,
    };
    let frame = comp.render(&state, &mut StepRng::new(0, 0));

    // Fireflies from a zeroed rng all land at the origin.
    assert_eq!(frame.pixel(0, 0), [255, 255, 100]);
    assert_eq!(frame.pixel(1, 1), [255, 255, 100]);

    assert_eq!(frame.pixel(200, 0), [30, 0, 40]);
    assert_eq!(frame.pixel(200, 50), [15, 0, 25]);
    assert_eq!(frame.pixel(399, 99), [0, 0, 10]);
}

#[test]
fn faces_are_placed_at_their_anchors() {
    let actors = [ActorId(1), ActorId(2)];
    let mut assets = AssetStore::new();
    assets.insert(ActorId(1), Expression::Closed, solid(2, 2, [255, 0, 0, 255]));
    assets.insert(ActorId(2), Expression::Closed, solid(2, 2, [0, 100, 0, 128]));

    let comp = Compositor::new(canvas(10, 10), tiny_layout(), &actors, assets);
    let frame = comp.render(&FrameState::idle(&actors), &mut StepRng::new(0, 0));

    assert_eq!(frame.pixel(1, 2), [255, 0, 0]);
    assert_eq!(frame.pixel(2, 3), [255, 0, 0]);
    assert_eq!(frame.pixel(0, 2), [0, 0, 0]);
    assert_eq!(frame.pixel(3, 2), [0, 0, 0]);
    assert_eq!(frame.pixel(6, 2), [0, 100, 0]);
    assert_eq!(frame.pixel(7, 3), [0, 100, 0]);
    assert_eq!(frame.pixel(8, 2), [0, 0, 0]);
}

#[test]
fn missing_expression_falls_back_to_closed_face() {
    let actors = [ActorId(1)];
    let mut assets = AssetStore::new();
    assets.insert(ActorId(1), Expression::Closed, solid(2, 2, [9, 9, 9, 255]));

    let comp = Compositor::new(canvas(6, 6), tiny_layout(), &actors, assets);
    let state = FrameState {
        expressions: vec![(ActorId(1), Expression::Singing)],
        background: BackgroundVariant::Normal,
    };
    let frame = comp.render(&state, &mut StepRng::new(0, 0));
    assert_eq!(frame.pixel(1, 2), [9, 9, 9]);
}

#[test]
fn faces_are_clipped_to_the_canvas() {
    let actors = [ActorId(1)];
    let mut assets = AssetStore::new();
    assets.insert(ActorId(1), Expression::Closed, solid(4, 4, [50, 60, 70, 255]));

    let layout = StageLayout {
        side_margin: 4,
        top_margin: 3,
        ..tiny_layout()
    };
    let comp = Compositor::new(canvas(6, 5), layout, &actors, assets);
    let frame = comp.render(&FrameState::idle(&actors), &mut StepRng::new(0, 0));
    assert_eq!(frame.pixel(5, 4), [50, 60, 70]);
    assert_eq!(frame.pixel(3, 4), [0, 0, 0]);
    assert_eq!(frame.data.len(), 6 * 5 * 3);
}

#[test]
fn render_into_reuses_the_buffer() {
    let comp = Compositor::new(canvas(4, 4), tiny_layout(), &[], AssetStore::new());
    let mut out = Frame {
        width: 1,
        height: 1,
        data: vec![7; 3],
    };
    let state = FrameState {
        expressions: Vec::new(),
        background: BackgroundVariant::Normal,
    };
    comp.render_into(&state, &mut StepRng::new(0, 0), &mut out);
    assert_eq!(out, Frame::black(canvas(4, 4)));
}
