//! Geometry primitives shared by the layout engine and the paging stack.
//!
//! Sizes are in abstract layout units (`f32`). The terminal renderer treats
//! one unit as one cell column/row; nothing in this crate assumes that.

/// A layout axis. Paging stacks lay elements out along one axis and center
/// them on the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The axis at a right angle to this one.
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }

    /// The extent of this size along the given axis.
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Builds a size from an extent parallel to `axis` and one perpendicular
    /// to it.
    pub fn from_axes(parallel: f32, perpendicular: f32, axis: Axis) -> Size {
        match axis {
            Axis::Horizontal => Size::new(parallel, perpendicular),
            Axis::Vertical => Size::new(perpendicular, parallel),
        }
    }
}

/// An x/y position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    /// The coordinate along the given axis.
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn mid_y(&self) -> f32 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_perpendicular() {
        assert_eq!(Axis::Horizontal.perpendicular(), Axis::Vertical);
        assert_eq!(Axis::Vertical.perpendicular(), Axis::Horizontal);
    }

    #[test]
    fn test_size_from_axes_round_trips_along() {
        let size = Size::from_axes(10.0, 4.0, Axis::Vertical);
        assert_eq!(size.along(Axis::Vertical), 10.0);
        assert_eq!(size.along(Axis::Horizontal), 4.0);
        assert_eq!(size, Size::new(4.0, 10.0));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(2.0, 3.0, 10.0, 4.0);
        assert_eq!(rect.min_x(), 2.0);
        assert_eq!(rect.mid_x(), 7.0);
        assert_eq!(rect.max_x(), 12.0);
        assert_eq!(rect.mid_y(), 5.0);
        assert_eq!(rect.max_y(), 7.0);
    }
}
