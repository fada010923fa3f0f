pub use kurbo::{Affine, Point, Vec2};

/// Integer axis-aligned box with inclusive bounds.
///
/// A box may extend past the canvas; the compositor clips it. `left > right` or `top > bottom`
/// denotes an empty box (for example the intersection of two disjoint shapes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Smallest integer box covering the float extents `[x0, x1] × [y0, y1]`.
    pub fn enclosing(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(
            saturating_i32(x0.floor()),
            saturating_i32(y0.floor()),
            saturating_i32(x1.ceil()),
            saturating_i32(y1.ceil()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Inclusive pixel width (`right - left + 1`); zero for empty boxes.
    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.right) - i64::from(self.left) + 1).min(i64::from(u32::MAX)) as u32
        }
    }

    /// Inclusive pixel height (`bottom - top + 1`); zero for empty boxes.
    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.bottom) - i64::from(self.top) + 1).min(i64::from(u32::MAX)) as u32
        }
    }

    /// Integer midpoint `left + (right - left) / 2`, truncated toward the top-left.
    ///
    /// Transforms pivot about this point, so odd spans sit half a pixel up and left of the
    /// geometric center.
    pub fn center(&self) -> Point {
        let mid = |lo: i32, hi: i32| {
            let (lo, hi) = (i64::from(lo), i64::from(hi));
            (lo + (hi - lo) / 2) as f64
        };
        Point::new(mid(self.left, self.right), mid(self.top, self.bottom))
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (self.left <= other.left
                && self.top <= other.top
                && self.right >= other.right
                && self.bottom >= other.bottom)
    }

    /// Clip to the pixel grid `[0, width) × [0, height)`.
    pub fn clip_to(&self, width: u32, height: u32) -> Rect {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX).saturating_sub(1);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX).saturating_sub(1);
        self.intersect(&Rect::new(0, 0, max_x, max_y))
    }
}

fn saturating_i32(v: f64) -> i32 {
    // `as` saturates on overflow and maps NaN to 0.
    v as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
