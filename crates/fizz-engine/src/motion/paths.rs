// motion/paths.rs
//
// The six trajectory implementations. All take a pre-clamped progress
// t in [0, 1] and return the full visual transform at that instant.

use std::f32::consts::PI;

use glam::Vec2;

use super::easing::{lerp, lerp_vec2, Easing};
use super::{MotionParams, Transform};

/// Discrete sampling resolution of the spiral path.
pub const SPIRAL_STEPS: f32 = 100.0;
/// Discrete sampling resolution of the zigzag wave.
pub const ZIGZAG_STEPS: f32 = 8.0;
/// Scale a bounced element settles at (below full size).
const BOUNCE_SETTLE: f32 = 0.85;
/// Teleport phase boundaries: fade-out ends, fade-in ends.
const TELEPORT_OUT_END: f32 = 1.0 / 3.0;
const TELEPORT_IN_END: f32 = 2.0 / 3.0;

/// Quantize progress to a fixed step count. t = 1 stays exactly 1 so the
/// terminal state is reachable.
#[inline]
fn quantize(t: f32, steps: f32) -> f32 {
    ((t * steps).floor() / steps).min(1.0).max(0.0)
}

/// Unit perpendicular of the origin→target direction. Zero-length paths
/// get an arbitrary fixed lateral axis.
#[inline]
fn perpendicular(origin: Vec2, target: Vec2) -> Vec2 {
    let dir = (target - origin).normalize_or_zero();
    if dir == Vec2::ZERO {
        Vec2::X
    } else {
        Vec2::new(-dir.y, dir.x)
    }
}

pub fn linear_drift(
    origin: Vec2,
    target: Vec2,
    params: &MotionParams,
    rotation_budget: f32,
    t: f32,
) -> Transform {
    let e = Easing::QuadOut.apply(t);
    // The curve offset is zero at both endpoints and peaks mid-flight.
    let bulge = 4.0 * t * (1.0 - t);
    Transform {
        pos: lerp_vec2(origin, target, e) + params.curve * bulge,
        rotation: rotation_budget * t,
        scale: 1.0,
        alpha: 1.0 - t,
    }
}

pub fn spiral(
    origin: Vec2,
    target: Vec2,
    params: &MotionParams,
    rotation_budget: f32,
    t: f32,
) -> Transform {
    let qt = quantize(t, SPIRAL_STEPS);
    let angle = qt * 4.0 * PI;
    let radius = params.radius * (1.0 - qt);
    Transform {
        pos: lerp_vec2(origin, target, qt) + Vec2::new(angle.cos(), angle.sin()) * radius,
        rotation: rotation_budget * qt,
        scale: 1.0,
        alpha: 1.0 - qt,
    }
}

pub fn bounce(origin: Vec2, target: Vec2, rotation_budget: f32, t: f32) -> Transform {
    let e = Easing::BackOut.apply(t);
    Transform {
        pos: lerp_vec2(origin, target, e),
        rotation: rotation_budget * e,
        // The overshoot in `e` carries the scale past the settle point
        // before it comes to rest below 1.
        scale: lerp(1.0, BOUNCE_SETTLE, e),
        alpha: 1.0 - t * t,
    }
}

pub fn zigzag(
    origin: Vec2,
    target: Vec2,
    params: &MotionParams,
    rotation_budget: f32,
    t: f32,
) -> Transform {
    let qt = quantize(t, ZIGZAG_STEPS);
    let wave = (qt * 3.0 * PI).sin();
    let lateral = perpendicular(origin, target) * params.amplitude * wave;
    Transform {
        pos: lerp_vec2(origin, target, t) + lateral,
        rotation: rotation_budget * t,
        // Scale oscillates in phase with the lateral wave.
        scale: 1.0 + 0.15 * wave,
        alpha: 1.0 - t,
    }
}

pub fn radial_explosion(origin: Vec2, target: Vec2, rotation_budget: f32, t: f32) -> Transform {
    let e = Easing::CubicOut.apply(t);
    Transform {
        pos: lerp_vec2(origin, target, e),
        rotation: rotation_budget * t,
        scale: lerp(1.0, 0.6, t),
        alpha: 1.0 - t,
    }
}

/// Three sequential phases with exact, non-overlapping boundaries:
/// fade out at the origin, reappear at the target and fade in, fade out
/// again. The position jump is discontinuous and must land on a phase
/// boundary where alpha is zero, or the reposition shows as a pop.
pub fn teleport(origin: Vec2, target: Vec2, t: f32) -> Transform {
    let (pos, alpha) = if t < TELEPORT_OUT_END {
        let u = t / TELEPORT_OUT_END;
        (origin, 1.0 - u)
    } else if t < TELEPORT_IN_END {
        let u = (t - TELEPORT_OUT_END) / (TELEPORT_IN_END - TELEPORT_OUT_END);
        (target, u)
    } else {
        let u = (t - TELEPORT_IN_END) / (1.0 - TELEPORT_IN_END);
        (target, 1.0 - u)
    };
    Transform {
        pos,
        rotation: 0.0,
        scale: 1.0,
        alpha,
    }
}
