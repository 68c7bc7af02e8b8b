use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Metrics, Rect};
use crate::components::config::{normalize_range, EmitterConfig};
use crate::components::layer::EffectLayer;
use crate::components::palette::PageStyle;
use crate::core::clock::EffectClock;
use crate::core::rng::Rng;
use crate::renderer::instance::{build_instances, InstanceBuffer};
use crate::systems::container::SceneContainer;
use crate::systems::emitter::{AmbientEmitter, BurstEmitter};
use crate::systems::governor::{
    DensityBudget, DeviceSignals, FrameRateMonitor, PerformanceProfile, ProfileStep,
};
use crate::systems::lifecycle::LifecycleManager;
use crate::systems::visibility::{VisibilityChange, VisibilityCoordinator};

/// World-space margin around the sweep bounds. Ambient elements spawn just
/// below the bottom edge and exit past the top, so the reclamation sweep
/// must not eat them at either end.
const SWEEP_MARGIN: f32 = 64.0;

/// Requested density, from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    Medium,
    High,
    /// Classify from device signals, reclassify from the observed frame
    /// rate at runtime.
    #[default]
    Auto,
}

/// Engine configuration, provided by the hosting page (usually as JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Enable the steady ambient trickle.
    pub ambient_enabled: bool,
    /// Enable pointer-triggered bursts.
    pub burst_enabled: bool,
    /// Density request; `auto` derives it from device signals.
    pub density: Density,
    /// Coarse page tag selecting shapes and colors (e.g. "hearts").
    pub page_context: String,
    /// Global live-element cap across all layers.
    pub max_elements: usize,
    /// Element lifetime range in seconds.
    pub ttl_range: (f32, f32),
    /// World width in page units.
    pub world_width: f32,
    /// World height in page units.
    pub world_height: f32,
    /// Honor the host's reduced-motion preference: no ambient trickle,
    /// bursts clamped to the low-profile intensity.
    pub reduced_motion: bool,
    /// RNG seed. Fixed default keeps tests deterministic; pages may
    /// randomize it.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ambient_enabled: true,
            burst_enabled: true,
            density: Density::Auto,
            page_context: String::new(),
            max_elements: 64,
            ttl_range: (3.0, 8.0),
            world_width: 800.0,
            world_height: 600.0,
            reduced_motion: false,
            seed: 7,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Normalize invalid values instead of rejecting them: swapped ranges,
    /// a zero element cap, non-positive world dimensions.
    pub fn normalized(mut self) -> Self {
        self.ttl_range = normalize_range(self.ttl_range.0, self.ttl_range.1);
        self.max_elements = self.max_elements.max(1);
        self.world_width = if self.world_width.is_finite() && self.world_width > 0.0 {
            self.world_width
        } else {
            800.0
        };
        self.world_height = if self.world_height.is_finite() && self.world_height > 0.0 {
            self.world_height
        } else {
            600.0
        };
        self
    }

    pub fn world(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

/// Engine lifecycle. Stopped and Destroyed are terminal; Destroyed
/// additionally turns every later call into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Stopped,
    Destroyed,
}

/// The consolidated effects engine. One instance per visual need; the
/// hosting page owns it and passes it to collaborators that trigger
/// bursts or report visibility.
pub struct EffectsEngine {
    config: EngineConfig,
    state: EngineState,
    /// False when the host surface was missing at construction — the
    /// engine then degrades to a no-op instead of failing the page.
    attached: bool,
    clock: EffectClock,
    rng: Rng,
    profile: PerformanceProfile,
    /// Whether runtime reclassification applies (density = auto).
    auto_density: bool,
    monitor: FrameRateMonitor,
    emitter_config: EmitterConfig,
    lifecycle: LifecycleManager,
    ambient: AmbientEmitter,
    burst: BurstEmitter,
    containers: [SceneContainer; EffectLayer::COUNT],
    visibility: VisibilityCoordinator,
    instances: InstanceBuffer,
    last_fps: Option<f32>,
}

impl EffectsEngine {
    /// Construct with default (absent) device signals — auto density then
    /// classifies as Medium.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_signals(config, DeviceSignals::default())
    }

    /// Construct with sampled device signals.
    pub fn with_signals(config: EngineConfig, signals: DeviceSignals) -> Self {
        let config = config.normalized();
        let (profile, auto_density) = match config.density {
            Density::Low => (PerformanceProfile::Low, false),
            Density::Medium => (PerformanceProfile::Medium, false),
            Density::High => (PerformanceProfile::High, false),
            Density::Auto => (PerformanceProfile::classify(&signals), true),
        };
        let emitter_config = Self::assemble_config(&config, profile);
        let rng = Rng::new(config.seed);

        Self {
            state: EngineState::Idle,
            attached: true,
            clock: EffectClock::new(),
            rng,
            profile,
            auto_density,
            monitor: FrameRateMonitor::new(),
            emitter_config,
            lifecycle: LifecycleManager::new(),
            ambient: AmbientEmitter::new(),
            burst: BurstEmitter::new(),
            containers: [
                SceneContainer::new(EffectLayer::Ambient),
                SceneContainer::new(EffectLayer::Burst),
            ],
            visibility: VisibilityCoordinator::new(),
            instances: InstanceBuffer::new(),
            last_fps: None,
            config,
        }
    }

    /// Construct for a page whose effects surface is missing. `start()` is
    /// refused and counts stay at zero; the condition is logged once.
    pub fn detached(config: EngineConfig) -> Self {
        log::warn!("effects surface missing; engine runs detached and will spawn nothing");
        let mut engine = Self::new(config);
        engine.attached = false;
        engine
    }

    fn assemble_config(config: &EngineConfig, profile: PerformanceProfile) -> EmitterConfig {
        let mut budget = DensityBudget::for_profile(profile);
        if config.reduced_motion {
            budget.burst_intensity = DensityBudget::for_profile(PerformanceProfile::Low).burst_intensity;
        }
        EmitterConfig::assemble(
            &budget,
            config.ambient_enabled && !config.reduced_motion,
            config.burst_enabled,
            config.max_elements,
            config.ttl_range,
            PageStyle::for_context(&config.page_context),
        )
    }

    // -- Lifecycle calls --

    /// Begin emitting. Only valid from Idle; refused while detached.
    pub fn start(&mut self) {
        if self.state != EngineState::Idle || !self.attached {
            return;
        }
        self.state = EngineState::Running;
        if self.emitter_config.ambient_enabled {
            self.ambient.start(self.emitter_config.spawn_interval, &mut self.rng);
        }
        if self.emitter_config.burst_enabled {
            self.burst.start();
        }
        log::info!(
            "effects engine started (profile {:?}, context {:?})",
            self.profile,
            self.config.page_context
        );
    }

    /// Explicit pause: timers and in-flight motion freeze.
    pub fn pause(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        self.state = EngineState::Paused;
        self.clock.pause();
        self.ambient.pause();
        self.burst.pause();
    }

    /// Resume from an explicit pause. While the surface is hidden the
    /// clock stays frozen until it becomes visible again.
    pub fn resume(&mut self) {
        if self.state != EngineState::Paused {
            return;
        }
        self.state = EngineState::Running;
        if self.visibility.is_visible() {
            self.clock.resume();
            self.ambient.resume();
            self.burst.resume();
        }
    }

    /// Tear everything down: all elements removed, all timers cancelled,
    /// emitters stopped for good.
    pub fn stop(&mut self) {
        if matches!(self.state, EngineState::Stopped | EngineState::Destroyed) {
            return;
        }
        self.ambient.stop();
        self.burst.stop();
        self.lifecycle.clear();
        for container in &mut self.containers {
            container.clear();
        }
        self.instances.clear();
        self.state = EngineState::Stopped;
    }

    /// Terminal teardown. Every method call after this is a silent no-op.
    pub fn destroy(&mut self) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.stop();
        self.state = EngineState::Destroyed;
    }

    // -- Per-frame drive --

    /// Advance one frame. All emission, staggered burst release, and
    /// timer-driven removal happens here, serialized on the caller's
    /// frame clock.
    pub fn tick(&mut self, frame_dt: f32) {
        if !matches!(self.state, EngineState::Running | EngineState::Paused) {
            return;
        }
        let dt = self.clock.advance(frame_dt);
        let now = self.clock.now();

        if dt > 0.0 {
            // Adopt a reclassification between spawn cycles, never
            // mid-spawn.
            if self.auto_density {
                if let Some(fps) = self.last_fps {
                    if let Some(step) = self.monitor.observe(fps, dt) {
                        let next = match step {
                            ProfileStep::Down => self.profile.step_down(),
                            ProfileStep::Up => self.profile.step_up(),
                        };
                        if next != self.profile {
                            self.profile = next;
                            self.emitter_config = Self::assemble_config(&self.config, next);
                            log::info!("effects density reclassified to {:?}", next);
                        }
                    }
                }
            }

            // Ambient trickle. A refused spawn (ceiling) skips the cycle;
            // the emitter has already scheduled the next one.
            if self.emitter_config.ambient_enabled {
                let attempts =
                    self.ambient
                        .tick(dt, self.emitter_config.spawn_interval, &mut self.rng);
                for _ in 0..attempts {
                    if let Some(id) = self.lifecycle.spawn_ambient(
                        &self.emitter_config,
                        self.config.world(),
                        &mut self.rng,
                        now,
                    ) {
                        self.containers[EffectLayer::Ambient.index()].attach(id);
                    }
                }
            }

            // Staggered burst releases.
            for spawn in self.burst.release_due(now) {
                if let Some(id) = self.lifecycle.spawn_burst(
                    &self.emitter_config,
                    self.config.world(),
                    spawn.origin,
                    &mut self.rng,
                    now,
                ) {
                    self.containers[EffectLayer::Burst.index()].attach(id);
                }
            }

            // Timer-driven removals: the removal timer wins over visual
            // progress.
            for id in self.lifecycle.expire_due(now) {
                for container in &mut self.containers {
                    container.detach(id);
                }
            }

            // Backpressure: when saturated, reclaim anything already off
            // the world ahead of its timer.
            if self.lifecycle.total() >= self.emitter_config.total_ceiling() {
                self.sweep_offscreen(self.world_sweep_bounds());
            }
        }

        build_instances(&self.lifecycle, &self.containers, now, &mut self.instances);
    }

    // -- Collaborator inputs --

    /// Pointer trigger. Declared-interactive origins and origins inside a
    /// registered interactive region never fire.
    pub fn trigger_burst(&mut self, x: f32, y: f32, interactive: bool) {
        if self.state != EngineState::Running
            || !self.emitter_config.burst_enabled
            || !self.visibility.is_visible()
        {
            return;
        }
        self.burst.trigger(
            Vec2::new(x, y),
            interactive,
            self.emitter_config.burst_intensity,
            self.emitter_config.burst_stagger,
            self.clock.now(),
            &mut self.rng,
        );
    }

    /// Host surface visibility. Hidden freezes the clock (and with it all
    /// removal deadlines and in-flight progress); visible resumes with no
    /// early firings.
    pub fn set_visible(&mut self, visible: bool) {
        if self.state == EngineState::Destroyed {
            return;
        }
        match self.visibility.set_visible(visible) {
            Some(VisibilityChange::Hidden) => {
                self.clock.pause();
                self.ambient.pause();
                self.burst.pause();
            }
            Some(VisibilityChange::Visible) => {
                if self.state == EngineState::Running {
                    self.clock.resume();
                    self.ambient.resume();
                    self.burst.resume();
                }
            }
            None => {}
        }
    }

    /// Externally observed frame rate (frames per second).
    pub fn observe_frame_rate(&mut self, fps: f32) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.last_fps = Some(fps);
    }

    /// Replace the set of interactive regions (buttons, players,
    /// navigation) that suppress bursts.
    pub fn set_interactive_regions(&mut self, regions: Vec<Rect>) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.burst.set_interactive_regions(regions);
    }

    pub fn add_interactive_region(&mut self, region: Rect) {
        if self.state == EngineState::Destroyed {
            return;
        }
        self.burst.add_interactive_region(region);
    }

    /// Cancel every element whose rendered bounds lie entirely outside
    /// `bounds`.
    pub fn sweep_offscreen(&mut self, bounds: Rect) {
        if matches!(self.state, EngineState::Stopped | EngineState::Destroyed) {
            return;
        }
        let now = self.clock.now();
        let mut swept = Vec::new();
        {
            let lifecycle = &self.lifecycle;
            for container in &self.containers {
                swept.extend(
                    container
                        .sweep_offscreen(bounds, |id| lifecycle.get(id).map(|el| el.bounds(now))),
                );
            }
        }
        for id in swept {
            self.lifecycle.cancel(id);
            for container in &mut self.containers {
                container.detach(id);
            }
        }
    }

    fn world_sweep_bounds(&self) -> Rect {
        Rect::new(
            Vec2::splat(-SWEEP_MARGIN),
            self.config.world() + Vec2::splat(SWEEP_MARGIN),
        )
    }

    // -- Queries --

    pub fn metrics(&self) -> Metrics {
        Metrics {
            live_element_count: self.lifecycle.total(),
            ambient_count: self.lifecycle.count(EffectLayer::Ambient),
            burst_count: self.lifecycle.count(EffectLayer::Burst),
            profile: self.profile,
        }
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profile(&self) -> PerformanceProfile {
        self.profile
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == EngineState::Destroyed
    }
}
