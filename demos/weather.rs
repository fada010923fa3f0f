//! A weather icon: rounded tile, a sun with a bite taken out by the cloud, and the cloud
//! itself. Pass a number to use seeded random colors for the cloud.
mod support;

use canvasflat::{Canvas, Color, Gradient, Shape, SolidColor};

const SIZE: u32 = 256;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut colors = support::color_source_from_args(&[0xf1f5f9, 0xe2e8f0]);

    let mut canvas = Canvas::new(SIZE, SIZE)?;
    canvas.set_anti_aliasing(true);
    canvas.set_background(SolidColor::rgb(0xf8fafc));

    let tile = Shape::rectangle(24.0, 24.0, 208.0, 208.0).into_ref();
    let tile = Shape::round(&tile, 24.0)?.with_color(Gradient::linear(
        SolidColor::rgb(0x38bdf8),
        SolidColor::rgb(0x1d4ed8),
    ));
    canvas.add_shape(tile.into_ref());

    let puff_left = Shape::circle(110.0, 150.0, 30.0).into_ref();
    let puff_right = Shape::circle(150.0, 140.0, 38.0).into_ref();
    let base = Shape::capsule(90.0, 172.0, 180.0, 172.0, 20.0).into_ref();
    let puffs = Shape::union(&puff_left, &puff_right).into_ref();
    let cloud = Shape::union(&puffs, &base).into_ref();

    let sun = Shape::circle(100.0, 100.0, 44.0).into_ref();
    let halo = Shape::round(&sun, 10.0)?.into_ref();
    let cloud_margin = Shape::round(&cloud, 6.0)?.into_ref();
    let sun_visible = Shape::difference(&sun, &cloud_margin).with_color(Gradient::radial(
        SolidColor::rgb(0xfde047),
        SolidColor::rgb(0xf97316),
    ));
    let halo_visible = Shape::difference(&halo, &cloud_margin)
        .with_color(SolidColor::rgba(0xfde68a, 0.35));

    canvas.add_shape(halo_visible.into_ref());
    canvas.add_shape(sun_visible.into_ref());
    canvas.add_shape(
        Shape::clone(&cloud)
            .with_color(Color::from(colors.next_color(false, true)))
            .into_ref(),
    );

    canvas.redraw()?;
    support::write_outputs(&canvas, "weather")
}
