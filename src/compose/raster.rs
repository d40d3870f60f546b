use rand::Rng;

use crate::assets::store::{AssetStore, PreparedImage};
use crate::compose::state::{BackgroundVariant, FrameState};
use crate::foundation::core::Canvas;
use crate::foundation::error::{PumpkinError, PumpkinResult};
use crate::foundation::math::mul_div255_u8;
use crate::script::model::ActorId;

/// Peak gradient intensity at the top of the spooky background.
const SPOOKY_TOP_INTENSITY: u32 = 30;
/// Extra blue added to every spooky row.
const SPOOKY_BLUE_TINT: u32 = 10;

/// An opaque RGB8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// Black frame covering `canvas`.
    pub fn black(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.pixel_count() * 3],
        }
    }

    /// RGB value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y as usize) * (self.width as usize) + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Where actors are placed on stage.
///
/// The canvas is split into one column per actor. Each actor's face is inset from its column by
/// `width_inset`/`height_inset` and anchored `side_margin` from the column's left edge and
/// `top_margin` from the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageLayout {
    /// Offset from the left edge of each column.
    pub side_margin: u32,
    /// Offset from the top of the canvas.
    pub top_margin: u32,
    /// Column width minus face width.
    pub width_inset: u32,
    /// Canvas height minus face height.
    pub height_inset: u32,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self {
            side_margin: 50,
            top_margin: 100,
            width_inset: 100,
            height_inset: 200,
        }
    }
}

impl StageLayout {
    /// Face size for a cast of `actor_count` on `canvas`.
    pub fn slot_size(&self, canvas: Canvas, actor_count: usize) -> PumpkinResult<Canvas> {
        if actor_count == 0 {
            return Err(PumpkinError::validation("stage needs at least one actor"));
        }
        let column = canvas.width / actor_count as u32;
        let width = column.saturating_sub(self.width_inset);
        let height = canvas.height.saturating_sub(self.height_inset);
        if width == 0 || height == 0 {
            return Err(PumpkinError::validation(format!(
                "canvas {}x{} leaves no room for {actor_count} actors with this layout",
                canvas.width, canvas.height
            )));
        }
        Ok(Canvas { width, height })
    }

    /// Top-left anchor of the actor at on-screen position `index`.
    pub fn anchor(&self, canvas: Canvas, index: usize, actor_count: usize) -> (i64, i64) {
        let column = i64::from(canvas.width) / actor_count.max(1) as i64;
        (
            index as i64 * column + i64::from(self.side_margin),
            i64::from(self.top_margin),
        )
    }
}

/// Renders [`FrameState`]s into opaque frames.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: Canvas,
    anchors: Vec<(ActorId, (i64, i64))>,
    assets: AssetStore,
}

impl Compositor {
    /// Build a compositor for `actors` (in on-screen order).
    pub fn new(
        canvas: Canvas,
        layout: StageLayout,
        actors: &[ActorId],
        assets: AssetStore,
    ) -> Self {
        let anchors = actors
            .iter()
            .enumerate()
            .map(|(i, &a)| (a, layout.anchor(canvas, i, actors.len())))
            .collect();
        Self {
            canvas,
            anchors,
            assets,
        }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Face store used for lookups.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Render one frame.
    pub fn render<R: Rng>(&self, state: &FrameState, rng: &mut R) -> Frame {
        let mut frame = Frame::black(self.canvas);
        self.render_into(state, rng, &mut frame);
        frame
    }

    /// Render one frame into `out`, overwriting every pixel.
    pub fn render_into<R: Rng>(&self, state: &FrameState, rng: &mut R, out: &mut Frame) {
        out.width = self.canvas.width;
        out.height = self.canvas.height;
        out.data.resize(self.canvas.pixel_count() * 3, 0);

        paint_background(out, state.background);

        for &(actor, expr) in &state.expressions {
            let Some(&(_, (x, y))) = self.anchors.iter().find(|(a, _)| *a == actor) else {
                continue;
            };
            if let Some(img) = self.assets.get(actor, expr) {
                over_at(out, img, x, y);
            }
        }

        if state.background == BackgroundVariant::Spooky {
            scatter_fireflies(out, rng);
        }
    }
}

fn paint_background(frame: &mut Frame, variant: BackgroundVariant) {
    match variant {
        BackgroundVariant::Normal => frame.data.fill(0),
        BackgroundVariant::Spooky => {
            let h = frame.height.max(1);
            let row_len = frame.width as usize * 3;
            if row_len == 0 {
                return;
            }
            for (y, row) in frame.data.chunks_exact_mut(row_len).enumerate() {
                let i = SPOOKY_TOP_INTENSITY * (h - y as u32) / h;
                let rgb = [i as u8, 0, (i + SPOOKY_BLUE_TINT) as u8];
                for px in row.chunks_exact_mut(3) {
                    px.copy_from_slice(&rgb);
                }
            }
        }
    }
}

/// Source-over a premultiplied image onto the opaque frame at `(x, y)`, clipping to the frame.
fn over_at(frame: &mut Frame, img: &PreparedImage, x: i64, y: i64) {
    let fw = i64::from(frame.width);
    let fh = i64::from(frame.height);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(img.width)).min(fw);
    let y1 = (y + i64::from(img.height)).min(fh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src = img.rgba8_premul.as_slice();
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            let si = (sy * img.width as usize + sx) * 4;
            let a = src[si + 3];
            if a == 0 {
                continue;
            }
            let di = (dy as usize * frame.width as usize + dx as usize) * 3;
            let inv = 255u16 - u16::from(a);
            for c in 0..3 {
                let d = mul_div255_u8(u16::from(frame.data[di + c]), inv);
                frame.data[di + c] = src[si + c].saturating_add(d);
            }
        }
    }
}

fn scatter_fireflies<R: Rng>(frame: &mut Frame, rng: &mut R) {
    let count = rng.gen_range(5..=15);
    for _ in 0..count {
        let cx = i64::from(rng.gen_range(0..=frame.width));
        let cy = i64::from(rng.gen_range(0..=frame.height));
        let r: i64 = rng.gen_range(2..=6);
        let color = [255, 255, rng.gen_range(100..=255u8)];
        fill_circle(frame, cx, cy, r, color);
    }
}

fn fill_circle(frame: &mut Frame, cx: i64, cy: i64, r: i64, rgb: [u8; 3]) {
    let w = i64::from(frame.width);
    let h = i64::from(frame.height);
    for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let i = (y as usize * frame.width as usize + x as usize) * 3;
            frame.data[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/raster.rs"]
mod tests;
