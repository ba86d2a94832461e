use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
/// Ids are never reused within a runner, so a stale id simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Identity of one mounted scene. Bumped every time a game rebuilds its scene
/// from scratch, so the host can drop anything cached for the previous mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MountId(pub u32);

impl MountId {
    pub fn next(self) -> Self {
        MountId(self.0.wrapping_add(1))
    }
}

/// A game event communicated from Rust to TypeScript via SharedArrayBuffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn mount_id_advances() {
        let m = MountId::default();
        assert_eq!(m.next(), MountId(1));
        assert_eq!(m.next().next(), MountId(2));
    }
}
