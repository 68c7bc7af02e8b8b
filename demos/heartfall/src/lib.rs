use wasm_bindgen::prelude::*;

use fizz_engine::{Density, EngineConfig};

fizz_web::export_effects!("heartfall");

/// The page's default engine configuration: hearts palette, auto density,
/// generous lifetimes for a slow upward drift.
pub fn default_config() -> EngineConfig {
    EngineConfig {
        page_context: "hearts".into(),
        density: Density::Auto,
        max_elements: 48,
        ttl_range: (4.0, 9.0),
        ..EngineConfig::default()
    }
}

/// Default config as JSON, for pages that pass it straight back into
/// `effects_init`.
#[wasm_bindgen]
pub fn heartfall_default_config() -> String {
    serde_json::to_string(&default_config()).unwrap_or_else(|_| "{}".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_json() {
        let json = heartfall_default_config();
        let config = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config.page_context, "hearts");
        assert_eq!(config.max_elements, 48);
        assert_eq!(config.ttl_range, (4.0, 9.0));
    }
}
