//! Compositing: the RGB framebuffer, render settings, the backend seam and the canvas that
//! owns them.

pub mod canvas;
pub mod cpu;
pub mod progress;

use crate::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::shape::ShapeRef;
use progress::ProgressState;

/// Row-major RGB8 pixel buffer (no alpha channel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb {
    pub const CHANNELS: usize = 3;

    /// Zero-filled frame; fails when `width * height * 3` overflows.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let len = Self::byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn byte_len(width: u32, height: u32) -> CanvasResult<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(Self::CHANNELS))
            .ok_or_else(|| CanvasError::validation("frame buffer size overflow"))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }
}

/// Compositor options.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Smooth edges over one pixel using the distance field.
    #[serde(default)]
    pub anti_aliasing: bool,
    /// Refresh cadence of the progress display thread.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

fn default_progress_interval_ms() -> u64 {
    50
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            anti_aliasing: false,
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

/// Redraws a full frame from a background fill and an ordered shape list.
pub trait RenderBackend: Send {
    fn redraw(
        &mut self,
        frame: &mut FrameRgb,
        background: &Color,
        shapes: &[ShapeRef],
        settings: &RenderSettings,
        progress: Option<&ProgressState>,
    ) -> CanvasResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Cpu,
}

pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(cpu::CpuBackend::new()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
