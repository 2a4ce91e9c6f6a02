//! Integer rectangles and border widths shared by the layout solver and the draw interpreter.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlap of two rectangles; an empty (all zero) rectangle when they do not meet.
    pub fn intersect(self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return Rect::default();
        }

        Rect::new(x, y, right - x, bottom - y)
    }
}

/// Four-sided border; `-1` marks a side that has not been specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Border {
    pub const UNSET: i32 = -1;

    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn unset() -> Self {
        Self::new(Self::UNSET, Self::UNSET, Self::UNSET, Self::UNSET)
    }

    pub const fn horizontal(self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(self) -> i32 {
        self.top + self.bottom
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::unset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_returns_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 3, 10, 4);
        assert_eq!(a.intersect(b), Rect::new(5, 3, 5, 4));
    }

    #[test]
    fn intersect_of_disjoint_rects_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        let overlap = a.intersect(b);
        assert!(overlap.is_empty());
        assert_eq!(overlap, Rect::default());
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(a.intersect(b).is_empty());
    }

    #[test]
    fn unset_border_marks_every_side() {
        let border = Border::unset();
        assert_eq!(border.left, Border::UNSET);
        assert_eq!(border.right, Border::UNSET);
        assert_eq!(border.top, Border::UNSET);
        assert_eq!(border.bottom, Border::UNSET);
    }
}
