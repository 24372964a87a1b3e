//! Rectangle moving on a wrap-around surface

use glam::IVec2;

/// Side length of the simulated square
pub const RECT_SIZE: i32 = 25;

/// A fixed-size rectangle that wraps around the edges of a `width x height`
/// torus
///
/// Wrapping happens once the rectangle has fully left the surface: past the
/// left edge it reappears with its left side at `width - 1`, past the right
/// edge it reappears fully hidden at `-size`, so it slides back into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappingRect {
    pos: IVec2,
    size: i32,
    bounds: IVec2,
}

impl WrappingRect {
    /// Creates a rectangle at the origin of a `bounds` sized surface
    pub fn new(bounds: IVec2) -> Self {
        Self {
            pos: IVec2::ZERO,
            size: RECT_SIZE,
            bounds,
        }
    }

    /// Builder method to set the starting position
    pub fn with_position(mut self, pos: IVec2) -> Self {
        self.pos = pos;
        self.wrap();
        self
    }

    pub fn position(&self) -> IVec2 {
        self.pos
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn bounds(&self) -> IVec2 {
        self.bounds
    }

    /// Moves by `delta`, then wraps
    pub fn translate(&mut self, delta: IVec2) {
        self.pos += delta;
        self.wrap();
    }

    fn wrap(&mut self) {
        self.pos.x = wrap_axis(self.pos.x, self.size, self.bounds.x);
        self.pos.y = wrap_axis(self.pos.y, self.size, self.bounds.y);
    }
}

fn wrap_axis(value: i32, size: i32, extent: i32) -> i32 {
    if value + size < 0 {
        extent - 1
    } else if value > extent - 1 {
        -size
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: IVec2 = IVec2::new(640, 480);

    #[test]
    fn test_translate_inside_bounds() {
        let mut rect = WrappingRect::new(BOUNDS);
        rect.translate(IVec2::new(10, 5));
        assert_eq!(rect.position(), IVec2::new(10, 5));
    }

    #[test]
    fn test_partially_offscreen_does_not_wrap() {
        let mut rect = WrappingRect::new(BOUNDS);
        rect.translate(IVec2::new(-25, -1));
        assert_eq!(rect.position(), IVec2::new(-25, -1));
    }

    #[test]
    fn test_wraps_left_to_right() {
        let mut rect = WrappingRect::new(BOUNDS);
        // Far edge lands at x = -1
        rect.translate(IVec2::new(-26, 0));
        assert_eq!(rect.position(), IVec2::new(639, 0));
    }

    #[test]
    fn test_wraps_right_to_left() {
        let mut rect = WrappingRect::new(BOUNDS).with_position(IVec2::new(630, 0));
        rect.translate(IVec2::new(10, 0));
        assert_eq!(rect.position(), IVec2::new(-25, 0));
    }

    #[test]
    fn test_wraps_vertically() {
        let mut rect = WrappingRect::new(BOUNDS);
        rect.translate(IVec2::new(0, -26));
        assert_eq!(rect.position(), IVec2::new(0, 479));

        rect.translate(IVec2::new(0, 1));
        assert_eq!(rect.position(), IVec2::new(0, -25));
    }

    #[test]
    fn test_wrapped_position_is_stable() {
        let mut rect = WrappingRect::new(BOUNDS);
        rect.translate(IVec2::new(640, 0));
        assert_eq!(rect.position().x, -25);

        rect.translate(IVec2::ZERO);
        assert_eq!(rect.position().x, -25);
    }
}
