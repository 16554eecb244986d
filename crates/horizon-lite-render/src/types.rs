//! Basic geometry and color types.
//!
//! Lite targets lay out in whole pixels with signed 16-bit coordinates, so
//! every type here is integer based. Arithmetic that can exceed the 16-bit
//! range goes through [`saturate_i16`] instead of wrapping.

/// Clamp a wide intermediate value into the `i16` range.
#[inline]
pub fn saturate_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

impl From<(i16, i16)> for Point {
    fn from((x, y): (i16, i16)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i16,
    pub height: i16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i16, height: i16) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(i16, i16)> for Size {
    fn from((width, height): (i16, i16)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    #[inline]
    pub fn left(&self) -> i16 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> i16 {
        self.origin.y
    }

    /// Right edge (exclusive), saturating.
    #[inline]
    pub fn right(&self) -> i16 {
        saturate_i16(self.origin.x as i32 + self.size.width as i32)
    }

    /// Bottom edge (exclusive), saturating.
    #[inline]
    pub fn bottom(&self) -> i16 {
        saturate_i16(self.origin.y as i32 + self.size.height as i32)
    }

    #[inline]
    pub fn width(&self) -> i16 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> i16 {
        self.size.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Offset the rectangle by the given amounts.
    pub fn offset(&self, dx: i16, dy: i16) -> Rect {
        Rect::new(
            saturate_i16(self.origin.x as i32 + dx as i32),
            saturate_i16(self.origin.y as i32 + dy as i32),
            self.size.width,
            self.size.height,
        )
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const RED: Self = Self::from_rgb8(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb8(0, 255, 0);
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);
    pub const GRAY: Self = Self::from_rgb8(128, 128, 128);
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);

    /// Create a color from 8-bit RGBA components.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from a packed `0xRRGGBBAA` value.
    pub const fn from_u32(rgba: u32) -> Self {
        Self::from_rgba8(
            (rgba >> 24) as u8,
            (rgba >> 16) as u8,
            (rgba >> 8) as u8,
            rgba as u8,
        )
    }

    /// Pack into `0xRRGGBBAA`.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// Return the components as an array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_clamps_both_ends() {
        assert_eq!(saturate_i16(70_000), i16::MAX);
        assert_eq!(saturate_i16(-70_000), i16::MIN);
        assert_eq!(saturate_i16(123), 123);
    }

    #[test]
    fn rect_edges_saturate() {
        let rect = Rect::new(i16::MAX - 10, 0, 100, 20);
        assert_eq!(rect.right(), i16::MAX);
        assert_eq!(rect.bottom(), 20);
    }

    #[test]
    fn rect_contains() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(29, 29)));
        assert!(!rect.contains(Point::new(30, 10)));
    }

    #[test]
    fn color_packing() {
        let color = Color::from_u32(0x11223344);
        assert_eq!(color.to_array(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(color.to_u32(), 0x11223344);
    }
}
