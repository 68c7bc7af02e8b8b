// motion/mod.rs
//
// Trajectory algorithms as pure functions of progress.
//
// Every algorithm maps (origin, destination, randomized params, progress)
// to a visual transform with no hidden state, so a transform can be
// re-evaluated at any progress value. Pause/resume is then just "stop
// advancing progress" — no per-element cooperation required.

pub mod easing;
mod paths;

pub use easing::{ease, ease_vec2, lerp, lerp_vec2, Easing};

use glam::Vec2;

use crate::core::rng::Rng;

/// Visual state of an element at a given progress value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Scale multiplier (1.0 = spawned size).
    pub scale: f32,
    /// Opacity multiplier in [0, 1], applied on top of the element's base
    /// opacity. All algorithms end at 0 so timer-driven removal is
    /// invisible.
    pub alpha: f32,
}

/// The fixed repertoire of trajectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MotionKind {
    /// Drift toward the destination with a one-time random curve offset.
    #[default]
    LinearDrift = 0,
    /// Shrinking spiral around the path to the destination.
    Spiral,
    /// Overshoot toward the destination, settle below full size.
    Bounce,
    /// Lateral sine offset, quantized to 8 steps.
    Zigzag,
    /// Fly outward from the origin along a random polar direction.
    RadialExplosion,
    /// Fade out, reappear at the destination, fade out again.
    Teleport,
}

impl MotionKind {
    pub const ALL: [MotionKind; 6] = [
        Self::LinearDrift,
        Self::Spiral,
        Self::Bounce,
        Self::Zigzag,
        Self::RadialExplosion,
        Self::Teleport,
    ];

    /// Uniform random pick.
    pub fn random(rng: &mut Rng) -> Self {
        *rng.pick(&Self::ALL)
    }
}

/// Per-element randomized inputs, drawn once at spawn and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// One-time lateral/vertical curve offset (LinearDrift). Zero at both
    /// endpoints, peaks mid-flight.
    pub curve: Vec2,
    /// Lateral amplitude of the zigzag wave.
    pub amplitude: f32,
    /// Starting spiral radius, shrinking to zero at the destination.
    pub radius: f32,
    /// Explosion direction in radians.
    pub theta: f32,
    /// Explosion travel distance.
    pub distance: f32,
}

impl MotionParams {
    /// Draw a fresh parameter set from the RNG.
    pub fn draw(rng: &mut Rng) -> Self {
        Self {
            curve: Vec2::new(rng.range_f32(-60.0, 60.0), rng.range_f32(-40.0, 10.0)),
            amplitude: rng.range_f32(10.0, 40.0),
            radius: rng.range_f32(20.0, 80.0),
            theta: rng.range_f32(0.0, std::f32::consts::TAU),
            distance: rng.range_f32(60.0, 220.0),
        }
    }

    /// Destination for an explosion spawned at `origin`.
    pub fn explosion_target(&self, origin: Vec2) -> Vec2 {
        origin + Vec2::new(self.theta.cos(), self.theta.sin()) * self.distance
    }
}

/// Evaluate an element's visual transform at `progress`.
///
/// Progress values at or beyond 1 (a paused clock resuming late, a removal
/// timer about to win) clamp to the terminal visual state — never
/// extrapolated past it.
pub fn sample(
    kind: MotionKind,
    origin: Vec2,
    target: Vec2,
    params: &MotionParams,
    rotation_budget: f32,
    progress: f32,
) -> Transform {
    let t = progress.clamp(0.0, 1.0);
    match kind {
        MotionKind::LinearDrift => paths::linear_drift(origin, target, params, rotation_budget, t),
        MotionKind::Spiral => paths::spiral(origin, target, params, rotation_budget, t),
        MotionKind::Bounce => paths::bounce(origin, target, rotation_budget, t),
        MotionKind::Zigzag => paths::zigzag(origin, target, params, rotation_budget, t),
        MotionKind::RadialExplosion => paths::radial_explosion(origin, target, rotation_budget, t),
        MotionKind::Teleport => paths::teleport(origin, target, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MotionParams {
        MotionParams::draw(&mut Rng::new(42))
    }

    #[test]
    fn all_kinds_start_visible() {
        let origin = Vec2::new(100.0, 200.0);
        let target = Vec2::new(300.0, 50.0);
        for kind in MotionKind::ALL {
            let tf = sample(kind, origin, target, &params(), 1.0, 0.0);
            assert!(tf.alpha > 0.9, "{:?} should start visible", kind);
        }
    }

    #[test]
    fn non_spiral_kinds_start_at_origin() {
        // The spiral starts offset by its initial radius; everything else
        // begins exactly at the spawn point.
        let origin = Vec2::new(100.0, 200.0);
        let target = Vec2::new(300.0, 50.0);
        for kind in MotionKind::ALL {
            if kind == MotionKind::Spiral {
                continue;
            }
            let tf = sample(kind, origin, target, &params(), 1.0, 0.0);
            assert!(
                (tf.pos - origin).length() < 1.0,
                "{:?} should start at origin, got {:?}",
                kind,
                tf.pos
            );
        }
    }

    #[test]
    fn all_kinds_end_transparent() {
        let origin = Vec2::new(100.0, 200.0);
        let target = Vec2::new(300.0, 50.0);
        for kind in MotionKind::ALL {
            let tf = sample(kind, origin, target, &params(), 1.0, 1.0);
            assert!(tf.alpha.abs() < 1e-4, "{:?} should end transparent", kind);
        }
    }

    #[test]
    fn progress_past_one_clamps_to_terminal_state() {
        let origin = Vec2::ZERO;
        let target = Vec2::new(100.0, 0.0);
        for kind in MotionKind::ALL {
            let at_one = sample(kind, origin, target, &params(), 1.0, 1.0);
            let beyond = sample(kind, origin, target, &params(), 1.0, 3.7);
            assert_eq!(at_one, beyond, "{:?} must not extrapolate", kind);
        }
    }

    #[test]
    fn resampling_same_progress_is_identical() {
        // Pure functions: pausing at p and re-evaluating later must yield
        // the same transform.
        let origin = Vec2::new(10.0, 20.0);
        let target = Vec2::new(80.0, -40.0);
        let p = params();
        for kind in MotionKind::ALL {
            let a = sample(kind, origin, target, &p, 2.0, 0.37);
            let b = sample(kind, origin, target, &p, 2.0, 0.37);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn explosion_target_is_polar_offset() {
        let p = MotionParams {
            curve: Vec2::ZERO,
            amplitude: 0.0,
            radius: 0.0,
            theta: 0.0,
            distance: 100.0,
        };
        let target = p.explosion_target(Vec2::new(5.0, 5.0));
        assert!((target - Vec2::new(105.0, 5.0)).length() < 1e-4);
    }
}
