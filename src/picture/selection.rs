/// Bounded pixel coordinate selection.

/// Coordinate used when the image is large enough.
pub const DEFAULT_COORDINATE: u32 = 50;

/// Selected (x, y) within an image of known size.
///
/// `x` always lies in `[0, width - 1]` and `y` in `[0, height - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    x: u32,
    y: u32,
    max_x: u32,
    max_y: u32,
}

impl Selection {
    /// Bounds for a `width` x `height` image with each axis defaulting to
    /// `min(default, dim - 1)`. Dimensions must be non-zero.
    pub fn for_dimensions(width: u32, height: u32, default: u32) -> Self {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        Self {
            x: default.min(max_x),
            y: default.min(max_y),
            max_x,
            max_y,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Inclusive X range.
    pub fn x_range(&self) -> (u32, u32) {
        (0, self.max_x)
    }

    /// Inclusive Y range.
    pub fn y_range(&self) -> (u32, u32) {
        (0, self.max_y)
    }

    pub fn set_x(&mut self, x: u32) {
        self.x = x.min(self.max_x);
    }

    pub fn set_y(&mut self, y: u32) {
        self.y = y.min(self.max_y);
    }

    pub fn step_x(&mut self, delta: i64) {
        self.x = step(self.x, delta, self.max_x);
    }

    pub fn step_y(&mut self, delta: i64) {
        self.y = step(self.y, delta, self.max_y);
    }
}

fn step(value: u32, delta: i64, max: u32) -> u32 {
    (value as i64 + delta).clamp(0, max as i64) as u32
}
