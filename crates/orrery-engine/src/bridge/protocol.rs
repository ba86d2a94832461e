/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 24 floats]
/// [Instances: max_instances × 12 floats]
/// [Effects: max_effects_vertices × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::RenderInstance;
use crate::systems::effects::EffectVertex;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_BLEND_SPLIT: usize = 4;
pub const HEADER_MAX_EFFECTS_VERTICES: usize = 5;
pub const HEADER_EFFECTS_VERTEX_COUNT: usize = 6;
pub const HEADER_EFFECTS_POINT_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
pub const HEADER_MOUNT_ID: usize = 11;
pub const HEADER_CAMERA_EYE_X: usize = 12;
pub const HEADER_CAMERA_EYE_Y: usize = 13;
pub const HEADER_CAMERA_EYE_Z: usize = 14;
pub const HEADER_CAMERA_TARGET_X: usize = 15;
pub const HEADER_CAMERA_TARGET_Y: usize = 16;
pub const HEADER_CAMERA_TARGET_Z: usize = 17;
pub const HEADER_CAMERA_FOV: usize = 18;
pub const HEADER_CAMERA_NEAR: usize = 19;
pub const HEADER_CAMERA_FAR: usize = 20;
// 21..24 reserved

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per effects vertex: x, y, z, size, r, g, b, a (wire format).
pub const EFFECTS_VERTEX_FLOATS: usize = EffectVertex::FLOATS;

/// Floats per game event: kind, a, b, c (wire format).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum effects vertices.
    pub max_effects_vertices: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of effects data section in floats.
    pub effects_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where effects data begins.
    pub effects_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_effects_vertices: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let effects_data_floats = max_effects_vertices * EFFECTS_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let effects_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = effects_data_offset + effects_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_effects_vertices,
            max_events,
            instance_data_floats,
            effects_data_floats,
            event_data_floats,
            instance_data_offset,
            effects_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_effects_vertices, config.max_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_instances, 2048);
        assert_eq!(layout.instance_data_floats, 2048 * 12);
        assert_eq!(layout.effects_data_floats, 16384 * 8);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(256, 8192, 64);
        let expected_total = HEADER_FLOATS + 256 * 12 + 8192 * 8 + 64 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 200, 20);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.effects_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.event_data_offset, layout.effects_data_offset + layout.effects_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_fields_fit() {
        assert!(HEADER_CAMERA_FAR < HEADER_FLOATS);
    }
}
