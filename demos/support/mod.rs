use std::path::{Path, PathBuf};

use anyhow::Context as _;

use canvasflat::{Canvas, ExportFormat, SolidColor, export_to_path};

/// Where demo colors come from.
pub trait ColorSource {
    fn next_color(&mut self, greyscale: bool, opaque: bool) -> SolidColor;
}

/// Deterministic xorshift64* generator.
pub struct SeededColors {
    state: u64,
}

impl SeededColors {
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero.
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }
}

impl ColorSource for SeededColors {
    fn next_color(&mut self, greyscale: bool, opaque: bool) -> SolidColor {
        let alpha = if opaque {
            1.0
        } else {
            (self.next_u64() % 100 + 1) as f32 / 100.0
        };
        let bits = self.next_u64() as u32;
        let rgb = if greyscale {
            let g = bits & 0xff;
            (g << 16) | (g << 8) | g
        } else {
            bits & 0x00ff_ffff
        };
        SolidColor::rgba(rgb, alpha)
    }
}

/// Cycles through a fixed list of colors.
pub struct Palette {
    colors: Vec<u32>,
    next: usize,
}

impl Palette {
    pub fn new(colors: &[u32]) -> Self {
        Self {
            colors: colors.to_vec(),
            next: 0,
        }
    }
}

impl ColorSource for Palette {
    fn next_color(&mut self, greyscale: bool, opaque: bool) -> SolidColor {
        let Some(&rgb) = self.colors.get(self.next % self.colors.len().max(1)) else {
            return SolidColor::TRANSPARENT;
        };
        self.next += 1;
        let c = SolidColor::rgb(rgb);
        let c = if greyscale {
            let g = ((u32::from(c.red) * 2126 + u32::from(c.green) * 7152 + u32::from(c.blue) * 722)
                / 10_000)
                & 0xff;
            SolidColor::rgb((g << 16) | (g << 8) | g)
        } else {
            c
        };
        if opaque { c } else { c.with_alpha(0.85) }
    }
}

/// Pick a color source from the first CLI argument: a number seeds the generator, anything
/// else (or nothing) uses the given palette.
pub fn color_source_from_args(palette: &[u32]) -> Box<dyn ColorSource> {
    match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => Box::new(SeededColors::new(seed)),
        None => Box::new(Palette::new(palette)),
    }
}

pub fn demo_out_dir() -> PathBuf {
    Path::new("target").join("demos")
}

/// Write `canvas` as `<name>.png` and `<name>.txt` under `target/demos`.
pub fn write_outputs(canvas: &Canvas, name: &str) -> anyhow::Result<()> {
    let dir = demo_out_dir();
    for format in [ExportFormat::Png, ExportFormat::Ascii] {
        let path = dir.join(format!("{name}.{}", format.extension()));
        export_to_path(canvas.frame(), &path, format)
            .with_context(|| format!("write '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
