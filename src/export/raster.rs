use std::io::Write;

use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use super::check_len;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::FrameRgb;

pub fn write_png<W: Write>(frame: &FrameRgb, out: W) -> CanvasResult<()> {
    check_len(frame)?;
    PngEncoder::new(out)
        .write_image(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| CanvasError::export(format!("encode png: {e}")))
}

fn write_pnm<W: Write>(
    out: W,
    subtype: PnmSubtype,
    samples: &[u8],
    frame: &FrameRgb,
    color: ExtendedColorType,
) -> CanvasResult<()> {
    PnmEncoder::new(out)
        .with_subtype(subtype)
        .write_image(samples, frame.width, frame.height, color)
        .map_err(|e| CanvasError::export(format!("encode {}: {e}", subtype_name(subtype))))
}

fn subtype_name(subtype: PnmSubtype) -> &'static str {
    match subtype {
        PnmSubtype::Bitmap(_) => "pbm",
        PnmSubtype::Graymap(_) => "pgm",
        PnmSubtype::Pixmap(_) => "ppm",
        PnmSubtype::ArbitraryMap => "pam",
    }
}

/// Binary `P6` pixmap.
pub fn write_ppm<W: Write>(frame: &FrameRgb, out: W) -> CanvasResult<()> {
    check_len(frame)?;
    let subtype = PnmSubtype::Pixmap(SampleEncoding::Binary);
    write_pnm(out, subtype, &frame.data, frame, ExtendedColorType::Rgb8)
}

/// Plain-text `P3` pixmap, one decimal sample per channel.
pub fn write_ppm_plain<W: Write>(frame: &FrameRgb, out: W) -> CanvasResult<()> {
    check_len(frame)?;
    let subtype = PnmSubtype::Pixmap(SampleEncoding::Ascii);
    write_pnm(out, subtype, &frame.data, frame, ExtendedColorType::Rgb8)
}

/// Graymap of [`gray_level`], binary `P5` or plain `P2`.
pub fn write_pgm<W: Write>(frame: &FrameRgb, plain: bool, out: W) -> CanvasResult<()> {
    check_len(frame)?;
    let encoding = if plain {
        SampleEncoding::Ascii
    } else {
        SampleEncoding::Binary
    };
    let gray = gray_levels(frame);
    write_pnm(out, PnmSubtype::Graymap(encoding), &gray, frame, ExtendedColorType::L8)
}

/// Binary `P4` bitmap: pixels darker than the Otsu threshold are black.
pub fn write_pbm<W: Write>(frame: &FrameRgb, out: W) -> CanvasResult<()> {
    check_len(frame)?;
    let gray = gray_levels(frame);
    let threshold = otsu_threshold(&gray);
    tracing::trace!(threshold, "pbm threshold");
    // The encoder packs sample 0 as a black bit and 1 as white.
    let bits: Vec<u8> = gray.iter().map(|&g| u8::from(g >= threshold)).collect();
    let subtype = PnmSubtype::Bitmap(SampleEncoding::Binary);
    write_pnm(out, subtype, &bits, frame, ExtendedColorType::L8)
}

/// Rec. 709 luma with each weighted channel truncated before summing (max 254).
pub fn gray_level(px: &[u8]) -> u8 {
    let weigh = |c: u8, w: f32| (f32::from(c) * w) as u8;
    weigh(px[0], 0.2126) + weigh(px[1], 0.7152) + weigh(px[2], 0.0722)
}

fn gray_levels(frame: &FrameRgb) -> Vec<u8> {
    frame.data.chunks_exact(3).map(gray_level).collect()
}

/// Threshold maximizing between-class variance of the gray histogram.
///
/// Levels below the threshold form the dark class. Returns 0 when no split separates the
/// histogram (a uniform image), so every pixel lands in the light class.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &g in gray {
        histogram[usize::from(g)] += 1;
    }
    let total = gray.len() as f64;
    let level_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &n)| level as f64 * n as f64)
        .sum();

    let (mut below, mut below_sum, mut best) = (0.0f64, 0.0f64, 0.0f64);
    let mut threshold = 0u8;
    for level in 1..=255u8 {
        let prev = usize::from(level - 1);
        below += histogram[prev] as f64;
        below_sum += prev as f64 * histogram[prev] as f64;
        if below == 0.0 || below == total {
            continue;
        }
        let w1 = below / total;
        let u1 = below_sum / below;
        let u2 = (level_sum - below_sum) / (total - below);
        let between = w1 * (1.0 - w1) * (u1 - u2) * (u1 - u2);
        if between > best {
            best = between;
            threshold = level;
        }
    }
    threshold
}
