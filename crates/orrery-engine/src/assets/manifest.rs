use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Directory the host serves textures from when a manifest gives a bare file name.
pub const TEXTURE_ROOT: &str = "/textures";

/// Texture manifest: logical texture name → image path.
/// Loaded from a JSON file at runtime; the host decodes the images itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a manifest that maps every name to `/textures/<name>`.
    pub fn by_convention<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let textures = names
            .into_iter()
            .map(|name| (name.to_string(), texture_path(name)))
            .collect();
        Self { textures }
    }

    /// Merge another manifest into this one; entries in `other` win.
    pub fn merge(&mut self, other: TextureManifest) {
        self.textures.extend(other.textures);
    }
}

/// Path for a texture file under the conventional root.
/// Absolute paths and URLs are passed through unchanged.
pub fn texture_path(file: &str) -> String {
    if file.starts_with('/') || file.contains("://") {
        file.to_string()
    } else {
        format!("{TEXTURE_ROOT}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "textures": {
                "sun.jpg": "/textures/sun.jpg",
                "earth_daymap.jpg": "https://cdn.example.org/earth.jpg"
            }
        }"#;
        let manifest = TextureManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures["sun.jpg"], "/textures/sun.jpg");
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = TextureManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(TextureManifest::from_json("{ \"textures\": [1, 2] }").is_err());
    }

    #[test]
    fn convention_paths() {
        let manifest = TextureManifest::by_convention(["mars.jpg"]);
        assert_eq!(manifest.textures["mars.jpg"], "/textures/mars.jpg");
        assert_eq!(texture_path("/abs/moon.jpg"), "/abs/moon.jpg");
    }

    #[test]
    fn merge_overrides() {
        let mut base = TextureManifest::by_convention(["sun.jpg", "moon.jpg"]);
        let mut extra = TextureManifest::default();
        extra.textures.insert("sun.jpg".into(), "/hd/sun.jpg".into());
        base.merge(extra);
        assert_eq!(base.textures["sun.jpg"], "/hd/sun.jpg");
        assert_eq!(base.textures["moon.jpg"], "/textures/moon.jpg");
    }
}
