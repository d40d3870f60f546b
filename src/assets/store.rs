use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::assets::draw::{PumpkinStyle, draw_pumpkin_face};
use crate::foundation::core::Canvas;
use crate::foundation::error::{PumpkinError, PumpkinResult};
use crate::script::model::{ActorId, Expression};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap premultiplied bytes, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PumpkinResult<Self> {
        if rgba8_premul.len() != (width as usize) * (height as usize) * 4 {
            return Err(PumpkinError::validation(format!(
                "image buffer of {} bytes does not match {width}x{height} rgba8",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Resample to `width`x`height`. Filtering premultiplied pixels keeps edges free of halos.
    pub fn resized(&self, width: u32, height: u32) -> PumpkinResult<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        if width == 0 || height == 0 {
            return Err(PumpkinError::validation("resize target must be non-empty"));
        }
        let src =
            image::RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.to_vec())
                .ok_or_else(|| PumpkinError::evaluation("image buffer size mismatch"))?;
        let out =
            image::imageops::resize(&src, width, height, image::imageops::FilterType::Lanczos3);
        Self::from_premul(width, height, out.into_raw())
    }
}

/// File name of the asset for `(actor, expr)`: `pumpkin_{actor}_{expression}.png`.
pub fn asset_file_name(actor: ActorId, expr: Expression) -> String {
    format!("pumpkin_{actor}_{expr}.png")
}

/// Read-only lookup from `(actor, expression)` to a prepared face image.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    images: HashMap<(ActorId, Expression), PreparedImage>,
}

impl AssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one face.
    pub fn insert(&mut self, actor: ActorId, expr: Expression, image: PreparedImage) {
        self.images.insert((actor, expr), image);
    }

    /// Face for `(actor, expr)`, falling back to the actor's `Closed` face.
    pub fn get(&self, actor: ActorId, expr: Expression) -> Option<&PreparedImage> {
        self.images
            .get(&(actor, expr))
            .or_else(|| self.images.get(&(actor, Expression::Closed)))
    }

    /// `true` when the exact pair is present (no fallback).
    pub fn contains(&self, actor: ActorId, expr: Expression) -> bool {
        self.images.contains_key(&(actor, expr))
    }

    /// Number of stored faces.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when no faces are stored.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Load every `pumpkin_{actor}_{expression}.png` under `dir`, resized to `slot`.
    ///
    /// Missing or undecodable files are skipped; lookups fall back to `Closed` at render time.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path, actors: &[ActorId], slot: Canvas) -> PumpkinResult<Self> {
        let mut store = Self::new();
        for &actor in actors {
            for expr in Expression::ALL {
                let path = dir.join(asset_file_name(actor, expr));
                let bytes = match std::fs::read(&path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), "skipping face asset: {e}");
                        continue;
                    }
                };
                let prepared = match decode_image(&bytes) {
                    Ok(img) => img,
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            "skipping undecodable face asset: {e}"
                        );
                        continue;
                    }
                };
                store.insert(actor, expr, prepared.resized(slot.width, slot.height)?);
            }
        }
        tracing::info!(faces = store.len(), "loaded face assets");
        Ok(store)
    }

    /// Draw every face in memory at `face` size and resize to `slot`, without touching disk.
    #[tracing::instrument(skip(actors), fields(actors = actors.len()))]
    pub fn generated(actors: &[ActorId], face: Canvas, slot: Canvas) -> PumpkinResult<Self> {
        let mut store = Self::new();
        for (i, &actor) in actors.iter().enumerate() {
            let style = PumpkinStyle::for_actor_index(i);
            for expr in Expression::ALL {
                let img = draw_pumpkin_face(&style, expr, face.width, face.height)?;
                store.insert(actor, expr, img.resized(slot.width, slot.height)?);
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
