use crate::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::linear_mapping;
use crate::render::progress::{BACKGROUND_STAGE, ProgressState};
use crate::render::{FrameRgb, RenderBackend, RenderSettings};
use crate::shape::{Sdf, Shape, ShapeRef};

/// Single-threaded scanline compositor.
///
/// Every redraw starts from the background fill, then blends each shape in list order over
/// the pixels of its clipped bounding box. Shapes never read back anything but the pixel they
/// are blending into.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for CpuBackend {
    fn redraw(
        &mut self,
        frame: &mut FrameRgb,
        background: &Color,
        shapes: &[ShapeRef],
        settings: &RenderSettings,
        progress: Option<&ProgressState>,
    ) -> CanvasResult<()> {
        let expected = FrameRgb::byte_len(frame.width, frame.height)?;
        if frame.data.len() != expected {
            return Err(CanvasError::render(
                "frame buffer does not match width*height*3",
            ));
        }

        draw_background(frame, background, progress);
        let mut drawn = 0usize;
        for (index, shape) in shapes.iter().enumerate() {
            if draw_shape(frame, index, shape, settings, progress) {
                drawn += 1;
            }
        }
        tracing::debug!(
            shapes = shapes.len(),
            drawn,
            anti_aliasing = settings.anti_aliasing,
            "redraw complete"
        );
        Ok(())
    }
}

/// Fraction of the pixel at signed distance `sdf` covered by the shape.
pub fn coverage(sdf: f32, anti_aliasing: bool) -> f32 {
    if anti_aliasing {
        linear_mapping(sdf, -0.5, 0.5, 1.0, 0.0)
    } else if sdf <= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// `dst * (1 - alpha) + src * alpha`, truncated to `u8`.
pub fn blend_channel(dst: u8, src: u8, alpha: f32) -> u8 {
    (f32::from(dst) * (1.0 - alpha) + f32::from(src) * alpha) as u8
}

fn draw_background(frame: &mut FrameRgb, background: &Color, progress: Option<&ProgressState>) {
    let (w, h) = (frame.width, frame.height);
    let area = u64::from(w) * u64::from(h);
    if let Color::Solid(c) = background {
        let rgb = [c.red, c.green, c.blue];
        for (i, px) in frame.data.chunks_exact_mut(FrameRgb::CHANNELS).enumerate() {
            if let Some(p) = progress {
                p.publish(BACKGROUND_STAGE, i as u64, area);
            }
            px.copy_from_slice(&rgb);
        }
    } else {
        for y in 0..h {
            for x in 0..w {
                if let Some(p) = progress {
                    p.publish(BACKGROUND_STAGE, u64::from(y) * u64::from(w) + u64::from(x), area);
                }
                let c = background.sample(x as f32 / w as f32, y as f32 / h as f32);
                let i = frame.offset(x, y);
                frame.data[i..i + 3].copy_from_slice(&[c.red, c.green, c.blue]);
            }
        }
    }
}

/// Returns whether any pixel of the shape's box fell on the canvas.
fn draw_shape(
    frame: &mut FrameRgb,
    index: usize,
    shape: &Shape,
    settings: &RenderSettings,
    progress: Option<&ProgressState>,
) -> bool {
    let area = shape.bounds();
    if area.is_empty() {
        tracing::debug!(index, ?area, "skipping shape with empty bounds");
        return false;
    }
    let draw = area.clip_to(frame.width, frame.height);
    if draw.is_empty() {
        tracing::debug!(index, ?area, "skipping shape outside canvas");
        return false;
    }
    tracing::trace!(index, ?area, ?draw, "drawing shape");

    let color = shape.color();
    let solid = color.is_solid().then(|| color.representative());
    if solid.is_some_and(|c| c.is_transparent()) {
        return true;
    }

    // Offsets into the unclipped box can exceed i32 once bounds saturate.
    let (aw, ah) = (f64::from(area.width()), f64::from(area.height()));
    let (ax, ay) = (f64::from(area.left), f64::from(area.top));
    let dw = u64::from(draw.width());
    let pixels = dw * u64::from(draw.height());
    let stage = index as i64;

    for y in draw.top..=draw.bottom {
        for x in draw.left..=draw.right {
            if let Some(p) = progress {
                let scanned = (y - draw.top) as u64 * dw + (x - draw.left) as u64;
                p.publish(stage, scanned, pixels);
            }
            let rgba = match solid {
                Some(c) => c,
                None => color.sample(
                    ((f64::from(x) - ax) / aw) as f32,
                    ((f64::from(y) - ay) / ah) as f32,
                ),
            };
            let sdf = shape.sdf_at(f64::from(x), f64::from(y)) as f32;
            let alpha = coverage(sdf, settings.anti_aliasing) * rgba.alpha();
            if alpha > 0.0 {
                let i = frame.offset(x as u32, y as u32);
                let px = &mut frame.data[i..i + 3];
                px[0] = blend_channel(px[0], rgba.red, alpha);
                px[1] = blend_channel(px[1], rgba.green, alpha);
                px[2] = blend_channel(px[2], rgba.blue, alpha);
            }
        }
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
