//! Nested squircles, each scaled and turned relative to the previous one, over a capsule
//! cross. Pass a number to use seeded random colors instead of the palette.
mod support;

use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

use canvasflat::{Canvas, Gradient, Shape, SolidColor, TextProgressBar};

const SIZE: u32 = 512;
const LEVELS: usize = 12;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut colors = support::color_source_from_args(&[
        0x264653, 0x2a9d8f, 0xe9c46a, 0xf4a261, 0xe76f51, 0x8ab17d,
    ]);

    let mut canvas = Canvas::new(SIZE, SIZE)?;
    canvas.set_anti_aliasing(true);
    canvas.set_background(Gradient::radial(
        SolidColor::rgb(0x1b1b2f),
        SolidColor::rgb(0x050508),
    ));

    let c = f64::from(SIZE) / 2.0;
    let bar = Shape::capsule(c, 40.0, c, f64::from(SIZE) - 40.0, 10.0).into_ref();
    let bar_turned = Shape::rotate(&bar, FRAC_PI_4)?.into_ref();
    let cross = Shape::union(&bar, &bar_turned).with_color(colors.next_color(true, false));
    canvas.add_shape(cross.into_ref());

    let mut level = Shape::squircle(c, c, 200.0).into_ref();
    for _ in 0..LEVELS {
        canvas.add_shape(
            Shape::clone(&level)
                .with_color(colors.next_color(false, false))
                .into_ref(),
        );
        let shrunk = Shape::scale(&level, 0.82)?.into_ref();
        level = Shape::rotate(&shrunk, 0.3)?.into_ref();
    }

    canvas.set_progress_sink(Some(Arc::new(TextProgressBar::stderr())));
    canvas.redraw()?;
    support::write_outputs(&canvas, "spiral")
}
