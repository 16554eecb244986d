//! View base implementation.
//!
//! `ViewBase` holds the state every lite view shares: its rectangle in parent
//! coordinates, padding, visibility and the repaint flag. Widgets embed one and
//! expose the parts that matter to them.

use horizon_lite_render::{Point, Rect, Size, saturate_i16};

/// Space between a view's edge and its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl Padding {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same padding on every side.
    pub const fn uniform(padding: i16) -> Self {
        Self::new(padding, padding, padding, padding)
    }

    /// Same horizontal and same vertical padding.
    pub const fn symmetric(horizontal: i16, vertical: i16) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal padding (left + right).
    #[inline]
    pub fn horizontal(&self) -> i32 {
        self.left as i32 + self.right as i32
    }

    /// Total vertical padding (top + bottom).
    #[inline]
    pub fn vertical(&self) -> i32 {
        self.top as i32 + self.bottom as i32
    }
}

/// Common state of every view.
///
/// Setters report whether anything changed so owners can decide whether to
/// invalidate derived state. Every change requests a repaint.
#[derive(Debug, Clone)]
pub struct ViewBase {
    rect: Rect,
    padding: Padding,
    visible: bool,
    needs_repaint: bool,
}

impl ViewBase {
    /// Create a visible view covering `rect`.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            padding: Padding::ZERO,
            visible: true,
            needs_repaint: true,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The view rectangle in parent coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) -> bool {
        if self.rect == rect {
            return false;
        }
        self.rect = rect;
        self.update();
        true
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.rect.origin
    }

    pub fn set_pos(&mut self, pos: Point) -> bool {
        self.set_rect(Rect {
            origin: pos,
            size: self.rect.size,
        })
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size
    }

    pub fn set_size(&mut self, size: Size) -> bool {
        self.set_rect(Rect {
            origin: self.rect.origin,
            size,
        })
    }

    #[inline]
    pub fn width(&self) -> i16 {
        self.rect.width()
    }

    #[inline]
    pub fn height(&self) -> i16 {
        self.rect.height()
    }

    pub fn set_width(&mut self, width: i16) -> bool {
        self.set_size(Size::new(width, self.rect.height()))
    }

    pub fn set_height(&mut self, height: i16) -> bool {
        self.set_size(Size::new(self.rect.width(), height))
    }

    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) -> bool {
        if self.padding == padding {
            return false;
        }
        self.padding = padding;
        self.update();
        true
    }

    /// The area inside the padding, in parent coordinates.
    ///
    /// Padding wider than the view yields an empty (zero-sized) content rect.
    pub fn content_rect(&self) -> Rect {
        let width = (self.rect.width() as i32 - self.padding.horizontal()).max(0);
        let height = (self.rect.height() as i32 - self.padding.vertical()).max(0);
        Rect::new(
            saturate_i16(self.rect.left() as i32 + self.padding.left as i32),
            saturate_i16(self.rect.top() as i32 + self.padding.top as i32),
            saturate_i16(width),
            saturate_i16(height),
        )
    }

    /// Resize so the content area is `width` wide.
    pub fn set_content_width(&mut self, width: i16) -> bool {
        self.set_width(saturate_i16(width as i32 + self.padding.horizontal()))
    }

    /// Resize so the content area is `height` tall.
    pub fn set_content_height(&mut self, height: i16) -> bool {
        self.set_height(saturate_i16(height as i32 + self.padding.vertical()))
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.update();
        }
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Check if the view needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint of the view.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Clear the repaint flag, returning whether it was set.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_rect_applies_padding() {
        let mut base = ViewBase::new(Rect::new(10, 20, 100, 40));
        base.set_padding(Padding::new(1, 2, 3, 4));
        assert_eq!(base.content_rect(), Rect::new(11, 22, 96, 34));
    }

    #[test]
    fn test_oversized_padding_yields_empty_content() {
        let mut base = ViewBase::new(Rect::new(0, 0, 10, 10));
        base.set_padding(Padding::uniform(8));
        assert!(base.content_rect().is_empty());
        assert_eq!(base.content_rect().width(), 0);
    }

    #[test]
    fn test_set_content_size_adds_padding() {
        let mut base = ViewBase::new(Rect::new(0, 0, 10, 10));
        base.set_padding(Padding::symmetric(5, 2));
        assert!(base.set_content_width(50));
        assert!(base.set_content_height(20));
        assert_eq!(base.size(), Size::new(60, 24));
        assert!(!base.set_content_width(50));
    }

    #[test]
    fn test_repaint_flag() {
        let mut base = ViewBase::new(Rect::new(0, 0, 10, 10));
        assert!(base.take_repaint());
        assert!(!base.needs_repaint());
        assert!(!base.set_width(10));
        assert!(!base.needs_repaint());
        assert!(base.set_width(12));
        assert!(base.take_repaint());
    }

    #[test]
    fn test_visibility_requests_repaint() {
        let mut base = ViewBase::default();
        base.take_repaint();
        base.set_visible(false);
        assert!(!base.is_visible());
        assert!(base.take_repaint());
    }
}
