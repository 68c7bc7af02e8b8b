use fizz_engine::{
    DeviceSignals, EffectsEngine, EngineConfig, ProtocolLayout, Rect, TriggerEvent, TriggerQueue,
};

/// Generic engine runner that wires up the frame loop.
///
/// Each hosting page creates a `thread_local!` EngineRunner and exports
/// free functions via `#[wasm_bindgen]` (see `export_effects!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct EngineRunner {
    engine: EffectsEngine,
    queue: TriggerQueue,
    layout: ProtocolLayout,
    frame_counter: u32,
}

impl EngineRunner {
    /// Runner for a page with a live effects surface.
    pub fn new(config: EngineConfig, signals: DeviceSignals) -> Self {
        let engine = EffectsEngine::with_signals(config, signals);
        let layout = ProtocolLayout::from_config(engine.config());
        Self {
            engine,
            queue: TriggerQueue::new(),
            layout,
            frame_counter: 0,
        }
    }

    /// Runner for a page whose surface is missing: everything degrades to
    /// a no-op instead of failing the page.
    pub fn detached(config: EngineConfig) -> Self {
        let engine = EffectsEngine::detached(config);
        let layout = ProtocolLayout::from_config(engine.config());
        Self {
            engine,
            queue: TriggerQueue::new(),
            layout,
            frame_counter: 0,
        }
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn destroy(&mut self) {
        self.engine.destroy();
    }

    /// Push a runtime input into the queue (called from JS).
    pub fn push(&mut self, event: TriggerEvent) {
        self.queue.push(event);
    }

    pub fn add_interactive_region(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.engine.add_interactive_region(Rect::from_xywh(x, y, w, h));
    }

    /// Run one frame: dispatch queued inputs, then advance the engine.
    pub fn tick(&mut self, dt: f32) {
        for event in self.queue.drain() {
            match event {
                TriggerEvent::PointerBurst { x, y, interactive } => {
                    self.engine.trigger_burst(x, y, interactive)
                }
                TriggerEvent::VisibilityChange { visible } => self.engine.set_visible(visible),
                TriggerEvent::FrameSample { fps } => self.engine.observe_frame_rate(fps),
            }
        }
        self.engine.tick(dt);
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.engine.instances().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.engine.instances().instance_count()
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    // ---- Capacity accessors (read by TypeScript at init) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn world_width(&self) -> f32 {
        self.engine.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.engine.config().world_height
    }

    // ---- Metrics accessors ----

    pub fn live_count(&self) -> u32 {
        self.engine.metrics().live_element_count as u32
    }

    pub fn ambient_count(&self) -> u32 {
        self.engine.metrics().ambient_count as u32
    }

    pub fn burst_count(&self) -> u32 {
        self.engine.metrics().burst_count as u32
    }

    pub fn profile(&self) -> u32 {
        self.engine.profile().as_u8() as u32
    }

    pub fn engine(&self) -> &EffectsEngine {
        &self.engine
    }
}
