// systems/container.rs
//
// One container per layer. Containers hold non-owning ids for rendering
// and sweeping; the lifecycle manager remains the only owner of element
// state.

use crate::api::types::{ElementId, Rect};
use crate::components::layer::EffectLayer;

/// Drawable surface for one effect layer.
pub struct SceneContainer {
    layer: EffectLayer,
    ids: Vec<ElementId>,
}

impl SceneContainer {
    pub fn new(layer: EffectLayer) -> Self {
        Self {
            layer,
            ids: Vec::with_capacity(64),
        }
    }

    pub fn layer(&self) -> EffectLayer {
        self.layer
    }

    pub fn attach(&mut self, id: ElementId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Remove an id. A no-op if the id was already detached.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(idx) = self.ids.iter().position(|&e| e == id) {
            self.ids.swap_remove(idx);
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Ids whose rendered bounds lie entirely outside `bounds`. Cheap
    /// reclamation independent of the elements' own timers, used under
    /// memory pressure. Returns a snapshot — callers cancel/detach while
    /// iterating it.
    pub fn sweep_offscreen(
        &self,
        bounds: Rect,
        bounds_of: impl Fn(ElementId) -> Option<Rect>,
    ) -> Vec<ElementId> {
        self.ids
            .iter()
            .copied()
            .filter(|&id| match bounds_of(id) {
                Some(rect) => bounds.fully_outside(rect),
                // Dangling reference: reclaim it too.
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn attach_is_deduplicated() {
        let mut container = SceneContainer::new(EffectLayer::Ambient);
        container.attach(ElementId(1));
        container.attach(ElementId(1));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut container = SceneContainer::new(EffectLayer::Ambient);
        container.attach(ElementId(1));
        container.detach(ElementId(1));
        container.detach(ElementId(1));
        assert!(container.is_empty());
    }

    #[test]
    fn sweep_returns_only_fully_outside_ids() {
        let mut container = SceneContainer::new(EffectLayer::Burst);
        container.attach(ElementId(1)); // fully outside
        container.attach(ElementId(2)); // straddles the edge
        container.attach(ElementId(3)); // inside

        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let swept = container.sweep_offscreen(bounds, |id| match id.0 {
            1 => Some(Rect::from_xywh(200.0, 200.0, 10.0, 10.0)),
            2 => Some(Rect::from_xywh(95.0, 50.0, 10.0, 10.0)),
            _ => Some(Rect::from_xywh(50.0, 50.0, 10.0, 10.0)),
        });
        assert_eq!(swept, vec![ElementId(1)]);
    }

    #[test]
    fn sweep_reclaims_dangling_ids() {
        let mut container = SceneContainer::new(EffectLayer::Burst);
        container.attach(ElementId(7));
        let bounds = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let swept = container.sweep_offscreen(bounds, |_| None);
        assert_eq!(swept, vec![ElementId(7)]);
    }
}
