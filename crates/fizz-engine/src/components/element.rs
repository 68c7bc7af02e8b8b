use glam::Vec2;

use crate::api::types::{ElementId, Rect};
use crate::components::layer::EffectLayer;
use crate::components::palette::{Shape, TintColor};
use crate::motion::{self, MotionKind, MotionParams, Transform};

/// Fallback lifetime when a caller hands us a non-finite TTL.
const DEFAULT_TTL: f32 = 4.0;
/// Shortest accepted lifetime in seconds.
const MIN_TTL: f32 = 0.05;

/// One transient visual unit (a heart, a bubble, a star).
///
/// Fat struct with builder methods. Once spawned, an element is never
/// mutated — its visual state is a pure function of the virtual clock, so
/// it can be re-evaluated at any time without drift.
#[derive(Debug, Clone)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Which trajectory this element follows.
    pub kind: MotionKind,
    /// Owning layer (ambient or burst pool).
    pub layer: EffectLayer,
    /// Spawn position.
    pub origin: Vec2,
    /// Destination (or algorithm-specific end point).
    pub target: Vec2,
    /// Randomized trajectory inputs, drawn once at spawn.
    pub params: MotionParams,
    /// Rendered size in world units.
    pub size: f32,
    /// Base opacity, multiplied by the motion alpha.
    pub base_alpha: f32,
    /// Total rotation over the element's lifetime, in radians.
    pub rotation_budget: f32,
    /// Time-to-live in seconds. Always strictly positive and finite.
    pub ttl: f32,
    /// Virtual-clock timestamp of creation.
    pub born_at: f64,
    /// Silhouette drawn by the page renderer.
    pub shape: Shape,
    /// Tint drawn by the page renderer.
    pub color: TintColor,
}

impl Element {
    pub fn new(
        id: ElementId,
        kind: MotionKind,
        layer: EffectLayer,
        origin: Vec2,
        target: Vec2,
        params: MotionParams,
        born_at: f64,
    ) -> Self {
        Self {
            id,
            kind,
            layer,
            origin,
            target,
            params,
            size: 16.0,
            base_alpha: 1.0,
            rotation_budget: 0.0,
            ttl: DEFAULT_TTL,
            born_at,
            shape: Shape::Heart,
            color: TintColor::Rose,
        }
    }

    // -- Builder pattern --

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_base_alpha(mut self, alpha: f32) -> Self {
        self.base_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_rotation_budget(mut self, radians: f32) -> Self {
        self.rotation_budget = radians;
        self
    }

    /// Set the lifetime. Non-finite values fall back to the default;
    /// anything below the minimum is raised to it.
    pub fn with_ttl(mut self, ttl: f32) -> Self {
        self.ttl = if ttl.is_finite() { ttl.max(MIN_TTL) } else { DEFAULT_TTL };
        self
    }

    pub fn with_style(mut self, shape: Shape, color: TintColor) -> Self {
        self.shape = shape;
        self.color = color;
        self
    }

    /// Lifetime fraction at virtual time `now`. Not clamped above 1 — the
    /// motion sampler clamps to the terminal state, and the removal timer
    /// is the authority on actual deletion.
    pub fn progress(&self, now: f64) -> f32 {
        (((now - self.born_at) / self.ttl as f64).max(0.0)) as f32
    }

    /// Visual transform at virtual time `now`.
    pub fn transform(&self, now: f64) -> Transform {
        motion::sample(
            self.kind,
            self.origin,
            self.target,
            &self.params,
            self.rotation_budget,
            self.progress(now),
        )
    }

    /// Rendered bounding box at virtual time `now`.
    pub fn bounds(&self, now: f64) -> Rect {
        let tf = self.transform(now);
        let half = Vec2::splat(self.size * tf.scale * 0.5);
        Rect::new(tf.pos - half, tf.pos + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;

    fn element(ttl: f32) -> Element {
        let params = MotionParams::draw(&mut Rng::new(42));
        Element::new(
            ElementId(1),
            MotionKind::LinearDrift,
            EffectLayer::Ambient,
            Vec2::new(50.0, 100.0),
            Vec2::new(50.0, -20.0),
            params,
            10.0,
        )
        .with_ttl(ttl)
    }

    #[test]
    fn progress_tracks_virtual_time() {
        let el = element(4.0);
        assert_eq!(el.progress(10.0), 0.0);
        assert!((el.progress(12.0) - 0.5).abs() < 1e-6);
        assert!((el.progress(14.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn progress_before_birth_is_zero() {
        let el = element(4.0);
        assert_eq!(el.progress(9.0), 0.0);
    }

    #[test]
    fn ttl_is_always_positive_and_finite() {
        assert_eq!(element(f32::NAN).ttl, DEFAULT_TTL);
        assert_eq!(element(f32::INFINITY).ttl, DEFAULT_TTL);
        assert_eq!(element(-3.0).ttl, MIN_TTL);
        assert_eq!(element(0.0).ttl, MIN_TTL);
        assert_eq!(element(2.5).ttl, 2.5);
    }

    #[test]
    fn bounds_are_centered_on_current_position() {
        let el = element(4.0).with_size(20.0);
        let tf = el.transform(10.0);
        let bounds = el.bounds(10.0);
        assert!((bounds.min.x - (tf.pos.x - 10.0 * tf.scale)).abs() < 1e-4);
        assert!((bounds.max.y - (tf.pos.y + 10.0 * tf.scale)).abs() < 1e-4);
    }

    #[test]
    fn transform_is_stable_while_clock_is_frozen() {
        let el = element(4.0);
        let a = el.transform(12.0);
        let b = el.transform(12.0);
        assert_eq!(a, b);
    }
}
