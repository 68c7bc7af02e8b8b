use glam::Vec2;

use crate::systems::governor::PerformanceProfile;

/// Unique identifier for a live element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Axis-aligned rectangle in world space. Used for interactive regions
/// (burst suppression) and off-screen sweep bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        // Normalize so min/max always name the actual corners.
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Whether `other` lies entirely outside this rectangle.
    pub fn fully_outside(&self, other: Rect) -> bool {
        other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
    }
}

/// Snapshot of engine state for collaborators (stat displays, debugging).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Total live elements across all layers.
    pub live_element_count: usize,
    /// Live elements on the ambient layer.
    pub ambient_count: usize,
    /// Live elements on the burst layer.
    pub burst_count: usize,
    /// Current performance classification.
    pub profile: PerformanceProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_xywh(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(30.1, 30.0)));
    }

    #[test]
    fn rect_normalizes_corners() {
        let r = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(-5.0, -5.0));
        assert_eq!(r.min, Vec2::new(-5.0, -5.0));
        assert_eq!(r.max, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn fully_outside_requires_no_overlap() {
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let outside = Rect::from_xywh(150.0, 0.0, 10.0, 10.0);
        let touching = Rect::from_xywh(95.0, 0.0, 10.0, 10.0);
        assert!(bounds.fully_outside(outside));
        assert!(!bounds.fully_outside(touching));
    }
}
