/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Instances: max_instances × 8 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::engine::EngineConfig;
use crate::renderer::instance::ElementInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_WORLD_WIDTH: usize = 4;
pub const HEADER_WORLD_HEIGHT: usize = 5;
pub const HEADER_LIVE_COUNT: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Buffer region offsets derived from an engine config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub instances_offset: usize,
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    pub fn from_config(config: &EngineConfig) -> Self {
        let max_instances = config.max_elements;
        let instances_offset = HEADER_FLOATS;
        Self {
            max_instances,
            instances_offset,
            buffer_total_floats: instances_offset + max_instances * ElementInstance::FLOATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_reserves_header_plus_instances() {
        let config = EngineConfig {
            max_elements: 64,
            ..EngineConfig::default()
        };
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.instances_offset, HEADER_FLOATS);
        assert_eq!(
            layout.buffer_total_floats,
            HEADER_FLOATS + 64 * ElementInstance::FLOATS
        );
    }

    #[test]
    fn header_indices_fit_the_header() {
        for idx in [
            HEADER_LOCK,
            HEADER_FRAME_COUNTER,
            HEADER_MAX_INSTANCES,
            HEADER_INSTANCE_COUNT,
            HEADER_WORLD_WIDTH,
            HEADER_WORLD_HEIGHT,
            HEADER_LIVE_COUNT,
            HEADER_PROTOCOL_VERSION,
        ] {
            assert!(idx < HEADER_FLOATS);
        }
    }
}
