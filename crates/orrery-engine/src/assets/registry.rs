use std::collections::HashMap;
use crate::assets::manifest::TextureManifest;

/// Handle to a texture slot. The host loads manifest entries in sorted name
/// order, so slot `n` is the n-th name of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Wire value written into render instances; -1 means "no texture".
    pub fn code(id: Option<TextureId>) -> f32 {
        id.map(|t| t.0 as f32).unwrap_or(-1.0)
    }
}

/// Registry of named textures, built from a TextureManifest.
/// Provides name-based lookup for game code.
pub struct TextureRegistry {
    slots: HashMap<String, TextureId>,
    paths: Vec<String>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            paths: Vec::new(),
        }
    }

    /// Build a registry from a parsed TextureManifest.
    pub fn from_manifest(manifest: &TextureManifest) -> Self {
        let mut slots = HashMap::with_capacity(manifest.textures.len());
        let mut paths = Vec::with_capacity(manifest.textures.len());
        for (i, (name, path)) in manifest.textures.iter().enumerate() {
            slots.insert(name.clone(), TextureId(i as u32));
            paths.push(path.clone());
        }
        Self { slots, paths }
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.slots.get(name).copied()
    }

    /// Path the host should load for a slot.
    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.paths.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest_in_name_order() {
        let manifest = TextureManifest::by_convention(["venus.jpg", "earth.jpg"]);
        let reg = TextureRegistry::from_manifest(&manifest);

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("earth.jpg"), Some(TextureId(0)));
        assert_eq!(reg.get("venus.jpg"), Some(TextureId(1)));
        assert_eq!(reg.path(TextureId(1)), Some("/textures/venus.jpg"));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = TextureRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert_eq!(TextureId::code(reg.get("nonexistent")), -1.0);
    }
}
