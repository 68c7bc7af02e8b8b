use bytemuck::{Pod, Zeroable};

use crate::systems::container::SceneContainer;
use crate::systems::lifecycle::LifecycleManager;

/// Per-element render data written to SharedArrayBuffer for the
/// TypeScript renderer. Must match the TypeScript protocol: 8 floats =
/// 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ElementInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered size in world units (spawn size × motion scale).
    pub size: f32,
    /// Tint index into the renderer's color table.
    pub color: f32,
    /// Final opacity (base × motion alpha).
    pub alpha: f32,
    /// Sprite index of the silhouette.
    pub shape: f32,
    /// Owning layer (0 = ambient, 1 = burst).
    pub layer: f32,
}

impl ElementInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffer of live instances, rebuilt once per frame.
pub struct InstanceBuffer {
    pub instances: Vec<ElementInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(128),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ElementInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild the instance buffer from the live containers, sampling every
/// element's motion at virtual time `now`. Containers are walked in layer
/// order so burst elements draw above ambient ones.
pub fn build_instances(
    lifecycle: &LifecycleManager,
    containers: &[SceneContainer],
    now: f64,
    out: &mut InstanceBuffer,
) {
    out.clear();
    for container in containers {
        for &id in container.ids() {
            let Some(element) = lifecycle.get(id) else {
                continue;
            };
            let tf = element.transform(now);
            out.push(ElementInstance {
                x: tf.pos.x,
                y: tf.pos.y,
                rotation: tf.rotation,
                size: element.size * tf.scale,
                color: element.color.as_u8() as f32,
                alpha: element.base_alpha * tf.alpha,
                shape: element.shape.as_u8() as f32,
                layer: element.layer.as_u8() as f32,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::config::EmitterConfig;
    use crate::components::layer::EffectLayer;
    use crate::components::palette::PageStyle;
    use crate::core::rng::Rng;
    use crate::systems::governor::{DensityBudget, PerformanceProfile};
    use glam::Vec2;

    #[test]
    fn element_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<ElementInstance>(), 32);
        assert_eq!(ElementInstance::FLOATS, 8);
    }

    #[test]
    fn build_skips_dangling_ids() {
        let lifecycle = LifecycleManager::new();
        let mut container = SceneContainer::new(EffectLayer::Ambient);
        container.attach(crate::api::types::ElementId(99));

        let mut buffer = InstanceBuffer::new();
        build_instances(&lifecycle, std::slice::from_ref(&container), 0.0, &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn build_emits_one_instance_per_live_element() {
        let mut lifecycle = LifecycleManager::new();
        let mut rng = Rng::new(42);
        let config = EmitterConfig::assemble(
            &DensityBudget::for_profile(PerformanceProfile::Medium),
            true,
            true,
            64,
            (2.0, 4.0),
            PageStyle::for_context("hearts"),
        );
        let mut container = SceneContainer::new(EffectLayer::Ambient);
        for _ in 0..3 {
            let id = lifecycle
                .spawn_ambient(&config, Vec2::new(800.0, 600.0), &mut rng, 0.0)
                .unwrap();
            container.attach(id);
        }

        let mut buffer = InstanceBuffer::new();
        build_instances(&lifecycle, std::slice::from_ref(&container), 0.1, &mut buffer);
        assert_eq!(buffer.instance_count(), 3);
        for instance in &buffer.instances {
            assert!(instance.alpha > 0.0);
            assert_eq!(instance.layer, 0.0);
        }
    }
}
