pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod input;
pub mod motion;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::engine::{Density, EffectsEngine, EngineConfig, EngineState};
pub use api::types::{ElementId, Metrics, Rect};
pub use bridge::protocol::ProtocolLayout;
pub use components::config::EmitterConfig;
pub use components::element::Element;
pub use components::layer::EffectLayer;
pub use components::palette::{PageStyle, Shape, TintColor};
pub use self::core::clock::EffectClock;
pub use self::core::rng::Rng;
pub use self::core::timer::{TimerId, TimerRegistry};
pub use input::queue::{TriggerEvent, TriggerQueue};
pub use motion::{ease, ease_vec2, lerp, lerp_vec2, Easing, MotionKind, MotionParams, Transform};
pub use renderer::instance::{build_instances, ElementInstance, InstanceBuffer};
pub use systems::container::SceneContainer;
pub use systems::emitter::{AmbientEmitter, BurstEmitter, BurstSpawn, EmitterPhase};
pub use systems::governor::{
    DensityBudget, DeviceSignals, FrameRateMonitor, PerformanceProfile, ProfileStep,
};
pub use systems::lifecycle::{LifecycleManager, DELETION_MARGIN};
pub use systems::visibility::{VisibilityChange, VisibilityCoordinator};
