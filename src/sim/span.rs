//! Horizontal span geometry for block alignment
//!
//! A span is a 1-D extent along the x axis, defined by:
//! - center: midpoint
//! - width: horizontal extent (left = center - width/2, right = center + width/2)

use serde::{Deserialize, Serialize};

/// A horizontal extent centered at `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Midpoint along the x axis
    pub center: f32,
    /// Horizontal extent (extends center ± width/2)
    pub width: f32,
}

impl Span {
    pub fn new(center: f32, width: f32) -> Self {
        Self { center, width }
    }

    /// Left edge of the span
    #[inline]
    pub fn left(&self) -> f32 {
        self.center - self.width / 2.0
    }

    /// Right edge of the span
    #[inline]
    pub fn right(&self) -> f32 {
        self.center + self.width / 2.0
    }

    /// Width of the intersection with `other` (non-positive when disjoint)
    pub fn overlap(&self, other: &Span) -> f32 {
        self.right().min(other.right()) - self.left().max(other.left())
    }

    /// Midpoint of the intersection with `other`
    ///
    /// Only meaningful when the spans actually overlap.
    pub fn overlap_center(&self, other: &Span) -> f32 {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        (left + right) / 2.0
    }

    /// Clamp a center so that a block of `width` stays inside this span
    ///
    /// With `width > self.width` there is no valid position; the result then
    /// degenerates to the left limit.
    pub fn clamp_center(&self, center: f32, width: f32) -> f32 {
        let half = width / 2.0;
        (self.left() + half).max(center.min(self.right() - half))
    }

    /// Check if `other` lies entirely within this span
    pub fn contains(&self, other: &Span) -> bool {
        other.left() >= self.left() && other.right() <= self.right()
    }

    /// Check if an x coordinate is within the span
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let span = Span::new(180.0, 120.0);
        assert_eq!(span.left(), 120.0);
        assert_eq!(span.right(), 240.0);
    }

    #[test]
    fn test_overlap_aligned() {
        let a = Span::new(180.0, 120.0);
        let b = Span::new(180.0, 120.0);
        assert_eq!(a.overlap(&b), 120.0);
    }

    #[test]
    fn test_overlap_offset() {
        let a = Span::new(180.0, 120.0);
        let b = Span::new(210.0, 120.0);
        // Offset by 30 with equal widths leaves 90 of intersection
        assert_eq!(a.overlap(&b), 90.0);
        assert_eq!(a.overlap_center(&b), 195.0);
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = Span::new(180.0, 120.0);
        let b = Span::new(310.0, 120.0);
        assert!(a.overlap(&b) <= 0.0);
    }

    #[test]
    fn test_clamp_center() {
        let support = Span::new(180.0, 120.0);
        // A 90-wide block may center anywhere in [165, 195]
        assert_eq!(support.clamp_center(210.0, 90.0), 195.0);
        assert_eq!(support.clamp_center(100.0, 90.0), 165.0);
        assert_eq!(support.clamp_center(170.0, 90.0), 170.0);
    }

    #[test]
    fn test_contains() {
        let outer = Span::new(180.0, 120.0);
        assert!(outer.contains(&Span::new(195.0, 90.0)));
        assert!(!outer.contains(&Span::new(230.0, 90.0)));
        assert!(outer.contains_x(120.0));
        assert!(!outer.contains_x(119.0));
    }
}
