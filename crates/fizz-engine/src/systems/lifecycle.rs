// systems/lifecycle.rs
//
// The lifecycle manager owns every live element from spawn to removal.
// Scene containers only hold ids; nothing else may create or delete
// elements, which keeps the per-layer counters single-writer.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::ElementId;
use crate::components::config::EmitterConfig;
use crate::components::element::Element;
use crate::components::layer::EffectLayer;
use crate::core::rng::Rng;
use crate::core::timer::{TimerId, TimerRegistry};
use crate::motion::{MotionKind, MotionParams};

/// Grace period added to every removal deadline. The timer is the sole
/// authoritative timeout: it fires even if the motion callback never
/// reached terminal progress (a paused clock, a skipped frame).
pub const DELETION_MARGIN: f32 = 0.5;

/// Owns all live elements, their removal timers, and the per-layer
/// counters.
pub struct LifecycleManager {
    elements: HashMap<ElementId, Element>,
    removal: TimerRegistry<ElementId>,
    removal_handles: HashMap<ElementId, TimerId>,
    counts: [usize; EffectLayer::COUNT],
    next_id: u32,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            removal: TimerRegistry::new(),
            removal_handles: HashMap::new(),
            counts: [0; EffectLayer::COUNT],
            next_id: 1,
        }
    }

    /// Spawn an ambient element rising from below the bottom edge of the
    /// world. Returns None (no side effect) at the layer ceiling.
    pub fn spawn_ambient(
        &mut self,
        config: &EmitterConfig,
        world: Vec2,
        rng: &mut Rng,
        now: f64,
    ) -> Option<ElementId> {
        let size = rng.range_f32(config.size_range.0, config.size_range.1);
        let origin = Vec2::new(rng.range_f32(0.0, world.x), world.y + size);
        self.spawn(config, EffectLayer::Ambient, origin, world, None, rng, now)
    }

    /// Spawn one burst element at a trigger point. Returns None at the
    /// burst layer ceiling.
    pub fn spawn_burst(
        &mut self,
        config: &EmitterConfig,
        world: Vec2,
        origin: Vec2,
        rng: &mut Rng,
        now: f64,
    ) -> Option<ElementId> {
        self.spawn(config, EffectLayer::Burst, origin, world, None, rng, now)
    }

    /// Allocate a new element with randomized parameters, register its
    /// removal timer at `ttl + margin`, and bump the layer counter.
    ///
    /// The motion kind is picked uniformly unless `pinned`.
    pub fn spawn(
        &mut self,
        config: &EmitterConfig,
        layer: EffectLayer,
        origin: Vec2,
        world: Vec2,
        pinned: Option<MotionKind>,
        rng: &mut Rng,
        now: f64,
    ) -> Option<ElementId> {
        if self.counts[layer.index()] >= config.ceiling(layer) {
            return None;
        }

        let kind = pinned.unwrap_or_else(|| MotionKind::random(rng));
        let params = MotionParams::draw(rng);
        let size = rng.range_f32(config.size_range.0, config.size_range.1);
        let ttl = rng.range_f32(config.ttl_range.0, config.ttl_range.1);
        let target = Self::pick_target(kind, origin, world, size, &params, rng);
        let rotation_budget = match kind {
            // Explosions spin harder.
            MotionKind::RadialExplosion => rng.range_f32(-12.0, 12.0),
            _ => rng.range_f32(-4.0, 4.0),
        };

        let id = ElementId(self.next_id);
        self.next_id += 1;

        let element = Element::new(id, kind, layer, origin, target, params, now)
            .with_size(size)
            .with_ttl(ttl)
            .with_base_alpha(rng.range_f32(0.6, 1.0))
            .with_rotation_budget(rotation_budget)
            .with_style(config.style.random_shape(rng), config.style.random_color(rng));

        let deadline = now + (element.ttl + DELETION_MARGIN) as f64;
        let timer = self.removal.schedule(deadline, id);
        self.removal_handles.insert(id, timer);
        self.elements.insert(id, element);
        self.counts[layer.index()] += 1;
        Some(id)
    }

    fn pick_target(
        kind: MotionKind,
        origin: Vec2,
        world: Vec2,
        size: f32,
        params: &MotionParams,
        rng: &mut Rng,
    ) -> Vec2 {
        match kind {
            MotionKind::RadialExplosion => params.explosion_target(origin),
            MotionKind::Teleport => Vec2::new(
                rng.range_f32(world.x * 0.1, world.x * 0.9),
                rng.range_f32(world.y * 0.1, world.y * 0.9),
            ),
            // Everything else drifts up and off the top edge.
            _ => Vec2::new(origin.x + rng.range_f32(-80.0, 80.0), -size),
        }
    }

    /// Remove an element immediately and cancel its removal timer.
    /// Idempotent — a second call for the same id is a no-op.
    pub fn cancel(&mut self, id: ElementId) -> bool {
        let Some(element) = self.elements.remove(&id) else {
            return false;
        };
        self.counts[element.layer.index()] -= 1;
        if let Some(timer) = self.removal_handles.remove(&id) {
            self.removal.cancel(timer);
        }
        true
    }

    /// Remove every element whose removal deadline has passed. Returns the
    /// removed ids so containers can drop their references. Snapshot
    /// semantics: safe to call `cancel` on other ids while iterating the
    /// result.
    pub fn expire_due(&mut self, now: f64) -> Vec<ElementId> {
        let due = self.removal.drain_due(now);
        let mut removed = Vec::with_capacity(due.len());
        for (_, id) in due {
            self.removal_handles.remove(&id);
            if let Some(element) = self.elements.remove(&id) {
                self.counts[element.layer.index()] -= 1;
                removed.push(id);
            }
        }
        removed
    }

    /// Remove everything and cancel every timer. Returns the ids that were
    /// live, for container cleanup.
    pub fn clear(&mut self) -> Vec<ElementId> {
        let ids: Vec<ElementId> = self.elements.keys().copied().collect();
        self.elements.clear();
        self.removal.clear();
        self.removal_handles.clear();
        self.counts = [0; EffectLayer::COUNT];
        ids
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Live elements on one layer.
    pub fn count(&self, layer: EffectLayer) -> usize {
        self.counts[layer.index()]
    }

    /// Live elements across all layers.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Outstanding removal timers (always equals the live count).
    pub fn pending_removals(&self) -> usize {
        self.removal.len()
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
