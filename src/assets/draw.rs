//! Procedural pumpkin faces.
//!
//! Geometry is laid out on an 800x600 reference face and scaled to the requested size.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use kurbo::{BezPath, Ellipse, Point, Shape as _};

use crate::assets::store::{PreparedImage, asset_file_name};
use crate::foundation::core::Canvas;
use crate::foundation::error::{PumpkinError, PumpkinResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::script::model::{ActorId, Expression};

const REFERENCE_WIDTH: f64 = 800.0;
const FEATURE_FILL: [u8; 3] = [0, 0, 0];
const FEATURE_EDGE: [u8; 3] = [255, 255, 0];
const BODY_EDGE: [u8; 3] = [200, 100, 0];
const GLOW_RINGS: u32 = 10;

/// Colors of one pumpkin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpkinStyle {
    /// Body fill.
    pub body: [u8; 3],
    /// Halo drawn behind the body.
    pub glow: [u8; 3],
}

impl PumpkinStyle {
    /// Style for the actor at on-screen position `index`. Styles repeat after two actors.
    pub fn for_actor_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self {
                body: [255, 140, 0],
                glow: [255, 165, 0],
            }
        } else {
            Self {
                body: [255, 120, 0],
                glow: [255, 140, 0],
            }
        }
    }
}

struct FaceLayout {
    scale: f64,
    body_x: f64,
    body_y: f64,
    body_w: f64,
    body_h: f64,
}

impl FaceLayout {
    fn new(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            scale: w / REFERENCE_WIDTH,
            body_x: w / 4.0,
            body_y: h / 6.0,
            body_w: w / 2.0,
            body_h: h * 2.0 / 3.0,
        }
    }

    fn px(&self, v: f64) -> f64 {
        v * self.scale
    }
}

/// Draw one transparent pumpkin face as premultiplied RGBA8.
pub fn draw_pumpkin_face(
    style: &PumpkinStyle,
    expr: Expression,
    width: u32,
    height: u32,
) -> PumpkinResult<PreparedImage> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PumpkinError::validation("face width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PumpkinError::validation("face height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PumpkinError::validation("face size must be non-zero"));
    }

    let l = FaceLayout::new(width, height);
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    for i in (0..GLOW_RINGS).rev() {
        let grow = l.px(3.0 * f64::from(i));
        let alpha = 50u32.saturating_sub(5 * i) as u8;
        if alpha == 0 {
            continue;
        }
        fill(
            &mut ctx,
            &ellipse_in(
                l.body_x - grow,
                l.body_y - grow,
                l.body_x + l.body_w + grow,
                l.body_y + l.body_h + grow,
            ),
            style.glow,
            alpha,
        );
    }

    let seg_w = l.body_w / 5.0;
    for i in 0..5 {
        let x0 = l.body_x + f64::from(i) * seg_w;
        let seg = ellipse_in(x0, l.body_y, x0 + seg_w + l.px(20.0), l.body_y + l.body_h);
        fill(&mut ctx, &seg, style.body, 255);
        stroke(&mut ctx, &seg, BODY_EDGE, l.px(2.0));
    }

    let eye_y = l.body_y + l.body_h / 3.0;
    let eye_size = l.px(60.0);
    for eye_x in [l.body_x + l.body_w / 3.0, l.body_x + 2.0 * l.body_w / 3.0] {
        let eye = triangle(eye_x, eye_y, eye_size);
        fill(&mut ctx, &eye, FEATURE_FILL, 255);
        stroke(&mut ctx, &eye, FEATURE_EDGE, l.px(3.0));
    }

    let nose_x = l.body_x + l.body_w / 2.0;
    let nose_y = eye_y + eye_size + l.px(20.0);
    let nose_size = l.px(30.0);
    let nose = triangle(nose_x, nose_y, nose_size);
    fill(&mut ctx, &nose, FEATURE_FILL, 255);
    stroke(&mut ctx, &nose, FEATURE_EDGE, l.px(2.0));

    let mouth = Point::new(nose_x, nose_y + nose_size + l.px(30.0));
    draw_mouth(&mut ctx, &l, mouth, expr);

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    PreparedImage::from_premul(width, height, pixmap.data_as_u8_slice().to_vec())
}

fn draw_mouth(ctx: &mut vello_cpu::RenderContext, l: &FaceLayout, c: Point, expr: Expression) {
    let mouth_w = l.px(120.0);
    let mouth_h = l.px(40.0);

    let radii = match expr {
        Expression::Closed => {
            let mut line = BezPath::new();
            line.move_to((c.x - mouth_w / 2.0, c.y));
            line.line_to((c.x + mouth_w / 2.0, c.y));
            stroke(ctx, &line, FEATURE_FILL, l.px(8.0));
            stroke(ctx, &line, FEATURE_EDGE, l.px(4.0));
            return;
        }
        Expression::OpenSmall => (mouth_w / 4.0, mouth_h / 4.0),
        Expression::OpenMedium => (mouth_w / 3.0, mouth_h / 3.0),
        Expression::OpenWide => (mouth_w / 2.0, mouth_h / 2.0),
        Expression::Singing => (mouth_w / 3.0, mouth_h / 2.0),
    };
    let shape = Ellipse::new(c, radii, 0.0).to_path(0.1);
    fill(ctx, &shape, FEATURE_FILL, 255);
    stroke(ctx, &shape, FEATURE_EDGE, l.px(3.0));
}

fn ellipse_in(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Ellipse::from_rect(kurbo::Rect::new(x0, y0, x1, y1)).to_path(0.1)
}

/// Upward-pointing triangle with its apex at `(x, y)`.
fn triangle(x: f64, y: f64, size: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x, y));
    p.line_to((x - size / 2.0, y + size));
    p.line_to((x + size / 2.0, y + size));
    p.close_path();
    p
}

fn fill(ctx: &mut vello_cpu::RenderContext, path: &BezPath, rgb: [u8; 3], alpha: u8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], alpha));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn stroke(ctx: &mut vello_cpu::RenderContext, path: &BezPath, rgb: [u8; 3], width: f64) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width.max(1.0)));
    ctx.stroke_path(&bezpath_to_cpu(path));
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Write a prepared face as a straight-alpha PNG.
pub fn save_png(image: &PreparedImage, path: &Path) -> PumpkinResult<()> {
    let mut straight = image.rgba8_premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    image::save_buffer_with_format(
        path,
        &straight,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Draw every `(actor, expression)` face at `size` into `dir` and return the written paths.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn generate_assets(
    dir: &Path,
    actors: &[ActorId],
    size: Canvas,
) -> PumpkinResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create asset dir '{}'", dir.display()))?;

    let mut written = Vec::with_capacity(actors.len() * Expression::ALL.len());
    for (i, &actor) in actors.iter().enumerate() {
        let style = PumpkinStyle::for_actor_index(i);
        for expr in Expression::ALL {
            let face = draw_pumpkin_face(&style, expr, size.width, size.height)?;
            let path = dir.join(asset_file_name(actor, expr));
            save_png(&face, &path)?;
            tracing::info!(path = %path.display(), "created face asset");
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/draw.rs"]
mod tests;
