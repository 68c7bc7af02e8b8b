pub mod runner;

pub use runner::EngineRunner;

// Re-exported so `export_effects!` can reach engine types through $crate.
pub use fizz_engine;

use fizz_engine::DeviceSignals;

/// Sample the static device signals the performance governor classifies
/// from. Any signal the browser does not expose is simply absent — the
/// governor defaults to Medium on missing data.
pub fn sample_device_signals() -> DeviceSignals {
    let window = web_sys::window();
    let logical_cores = window
        .as_ref()
        .map(|w| w.navigator().hardware_concurrency())
        .filter(|&c| c > 0.0)
        .map(|c| c as u32);
    let low_power = window
        .as_ref()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| ua.contains("Mobi") || ua.contains("Android"));
    DeviceSignals {
        logical_cores,
        low_power,
    }
}

/// Generate all `#[wasm_bindgen]` exports for a page's effects engine.
///
/// Generates the `thread_local!` storage for the EngineRunner, a
/// `with_runner()` helper, and every export the TypeScript side calls
/// (init, tick, input handlers, data accessors).
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// fizz_web::export_effects!("my-page");
/// ```
///
/// # Arguments
///
/// - `$page_name`: a string literal used in the initialization log message
#[macro_export]
macro_rules! export_effects {
    ($page_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::EngineRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::EngineRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Effects not initialized. Call effects_init() first.");
                f(runner)
            })
        }

        /// Initialize from a JSON config. `has_surface` is the page's
        /// report of whether the effects canvas exists — without it the
        /// runner degrades to a no-op.
        #[wasm_bindgen]
        pub fn effects_init(config_json: &str, has_surface: bool) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = match $crate::fizz_engine::EngineConfig::from_json(config_json) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("invalid effects config, using defaults: {}", err);
                    $crate::fizz_engine::EngineConfig::default()
                }
            };

            let runner = if has_surface {
                $crate::EngineRunner::new(config, $crate::sample_device_signals())
            } else {
                $crate::EngineRunner::detached(config)
            };

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: effects initialized", $page_name);
        }

        #[wasm_bindgen]
        pub fn effects_start() {
            with_runner(|r| r.start());
        }

        #[wasm_bindgen]
        pub fn effects_stop() {
            with_runner(|r| r.stop());
        }

        #[wasm_bindgen]
        pub fn effects_destroy() {
            with_runner(|r| r.destroy());
        }

        #[wasm_bindgen]
        pub fn effects_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn effects_pointer_down(x: f32, y: f32, interactive: bool) {
            with_runner(|r| {
                r.push($crate::fizz_engine::TriggerEvent::PointerBurst { x, y, interactive })
            });
        }

        #[wasm_bindgen]
        pub fn effects_set_visible(visible: bool) {
            with_runner(|r| r.push($crate::fizz_engine::TriggerEvent::VisibilityChange { visible }));
        }

        #[wasm_bindgen]
        pub fn effects_frame_sample(fps: f32) {
            with_runner(|r| r.push($crate::fizz_engine::TriggerEvent::FrameSample { fps }));
        }

        #[wasm_bindgen]
        pub fn effects_add_interactive_region(x: f32, y: f32, w: f32, h: f32) {
            with_runner(|r| r.add_interactive_region(x, y, w, h));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_frame_counter() -> u32 {
            with_runner(|r| r.frame_counter())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Metrics accessors ----

        #[wasm_bindgen]
        pub fn get_live_count() -> u32 {
            with_runner(|r| r.live_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_count() -> u32 {
            with_runner(|r| r.ambient_count())
        }

        #[wasm_bindgen]
        pub fn get_burst_count() -> u32 {
            with_runner(|r| r.burst_count())
        }

        #[wasm_bindgen]
        pub fn get_profile() -> u32 {
            with_runner(|r| r.profile())
        }
    };
}
