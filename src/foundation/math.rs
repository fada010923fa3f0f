use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Relative float equality: `|a - b|` within `f32::EPSILON` scaled by the larger magnitude.
pub fn float_equal(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= scale * f32::EPSILON
}

/// Wrap an angle into `[0, 2π)`.
pub fn radians_normalize(radians: f32) -> f32 {
    let x = radians % TAU;
    let x = if x < 0.0 { x + TAU } else { x };
    // `x + TAU` may round up to exactly TAU for tiny negative inputs.
    if x >= TAU { 0.0 } else { x }
}

/// Degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Clamped linear remap of `value` from `[l0, r0]` onto `[l1, r1]`.
///
/// Values below `l0` map to `l1`, values above `r0` map to `r1`. A degenerate source window
/// (`l0 == r0`) behaves as a step at `l0`.
pub fn linear_mapping(value: f32, l0: f32, r0: f32, l1: f32, r1: f32) -> f32 {
    if value < l0 {
        l1
    } else if value > r0 {
        r1
    } else if r0 == l0 {
        l1
    } else {
        (value - l0) * (r1 - l1) / (r0 - l0) + l1
    }
}

/// Quarter-turn angles that have exact axis-aligned shortcuts.
pub(crate) const QUARTER_TURNS: [f32; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
