//! Writing finished frames: PNG and the PNM family through `image`, plus ASCII art.

mod ascii;
mod raster;

use std::io::Write;
use std::path::Path;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::FrameRgb;

pub use ascii::{ASCII_RAMP, ascii_char, write_ascii};
pub use raster::{
    gray_level, otsu_threshold, write_pbm, write_pgm, write_png, write_ppm, write_ppm_plain,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Png,
    /// Binary `P6`.
    Ppm,
    /// Plain-text `P3`.
    PpmPlain,
    /// Binary `P5` grayscale.
    Pgm,
    /// Plain-text `P2` grayscale.
    PgmPlain,
    /// Binary `P4` black and white, thresholded with Otsu's method.
    Pbm,
    Ascii,
}

impl ExportFormat {
    /// Pick a format from the file extension (`png`, `ppm`/`pnm`, `pgm`, `pbm`, `txt`/`ascii`).
    ///
    /// Extensions always select the binary PNM variants.
    pub fn from_path(path: &Path) -> CanvasResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                CanvasError::export(format!(
                    "cannot infer image format of '{}' (no extension)",
                    path.display()
                ))
            })?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "ppm" | "pnm" => Ok(Self::Ppm),
            "pgm" => Ok(Self::Pgm),
            "pbm" => Ok(Self::Pbm),
            "txt" | "ascii" => Ok(Self::Ascii),
            other => Err(CanvasError::export(format!(
                "unsupported image extension '.{other}'"
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Ppm | Self::PpmPlain => "ppm",
            Self::Pgm | Self::PgmPlain => "pgm",
            Self::Pbm => "pbm",
            Self::Ascii => "txt",
        }
    }
}

pub(crate) fn check_len(frame: &FrameRgb) -> CanvasResult<()> {
    let expected = FrameRgb::byte_len(frame.width, frame.height)?;
    if frame.data.len() != expected {
        return Err(CanvasError::export(format!(
            "frame data is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }
    Ok(())
}

pub fn write_frame<W: Write>(frame: &FrameRgb, format: ExportFormat, out: W) -> CanvasResult<()> {
    match format {
        ExportFormat::Png => write_png(frame, out),
        ExportFormat::Ppm => write_ppm(frame, out),
        ExportFormat::PpmPlain => write_ppm_plain(frame, out),
        ExportFormat::Pgm => write_pgm(frame, false, out),
        ExportFormat::PgmPlain => write_pgm(frame, true, out),
        ExportFormat::Pbm => write_pbm(frame, out),
        ExportFormat::Ascii => write_ascii(frame, out),
    }
}

/// Write `frame` to `path`, creating missing parent directories.
pub fn export_to_path(frame: &FrameRgb, path: &Path, format: ExportFormat) -> CanvasResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CanvasError::export(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    let file = std::fs::File::create(path)
        .map_err(|e| CanvasError::export(format!("create '{}': {e}", path.display())))?;
    let mut out = std::io::BufWriter::new(file);
    write_frame(frame, format, &mut out)?;
    out.flush()
        .map_err(|e| CanvasError::export(format!("flush '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), ?format, "frame exported");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
