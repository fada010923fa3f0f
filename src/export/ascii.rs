use std::io::Write;

use super::check_len;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::linear_mapping;
use crate::render::FrameRgb;

/// Dark-to-light character ramp.
pub const ASCII_RAMP: &[u8; 70] =
    b"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

fn luma(px: &[u8]) -> f32 {
    px.iter().zip(LUMA).map(|(&c, w)| f32::from(c) * w).sum()
}

/// Character for the pixel pair at `(x, y)` and `(x, y + 1)`.
///
/// Returns `None` when either pixel is outside the frame.
pub fn ascii_char(frame: &FrameRgb, x: u32, y: u32) -> Option<char> {
    if x >= frame.width || y.checked_add(1)? >= frame.height {
        return None;
    }
    let top = frame.offset(x, y);
    let bottom = frame.offset(x, y + 1);
    let gray = luma(&frame.data[top..top + 3]) + luma(&frame.data[bottom..bottom + 3]);
    let last = ASCII_RAMP.len() - 1;
    let index = linear_mapping(gray, 0.0, 510.0, 0.0, ASCII_RAMP.len() as f32) as usize;
    Some(char::from(ASCII_RAMP[index.min(last)]))
}

/// One text line per two pixel rows; an odd last row is dropped.
pub fn write_ascii<W: Write>(frame: &FrameRgb, mut out: W) -> CanvasResult<()> {
    check_len(frame)?;
    let mut line = String::with_capacity(frame.width as usize + 1);
    let mut y = 0;
    while y + 1 < frame.height {
        line.clear();
        line.extend((0..frame.width).filter_map(|x| ascii_char(frame, x, y)));
        line.push('\n');
        out.write_all(line.as_bytes())
            .map_err(|e| CanvasError::export(format!("write ascii: {e}")))?;
        y += 2;
    }
    Ok(())
}
