//! Terrain types and tile extras.

use serde::{Deserialize, Serialize};

/// Extra flag marking a natural (river-like) defense bonus.
pub const NATURAL_DEFENSE_FLAG: &str = "NaturalDefense";

/// Extra flag making a tile native to the listed classes.
pub const NATIVE_TILE_FLAG: &str = "NativeTile";

/// A terrain type (`[terrain_*]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    /// Section suffix.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Percent defense bonus for units with the `TerrainDefense` class flag.
    pub defense_bonus: i64,
    /// Names of unit classes for which this terrain is native.
    #[serde(default)]
    pub native_unit_classes: Vec<String>,
}

impl Terrain {
    /// Whether units of the named class can stand on this terrain.
    #[must_use]
    pub fn is_native_to(&self, class_name: &str) -> bool {
        self.native_unit_classes.iter().any(|c| c == class_name)
    }
}

/// A tile extra (`[extra_*]`): rivers, roads, fortresses and the like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainExtra {
    /// Section suffix.
    pub id: String,
    /// Display name, matched by `Extra` requirements.
    pub name: String,
    /// Percent defense bonus for native unit classes.
    #[serde(default)]
    pub defense_bonus: i64,
    /// Names of unit classes this extra is native to.
    #[serde(default)]
    pub native_unit_classes: Vec<String>,
    /// Extra flags.
    #[serde(default)]
    pub flags: Vec<String>,
}

impl TerrainExtra {
    /// Whether units of the named class are native to this extra.
    #[must_use]
    pub fn is_native_to(&self, class_name: &str) -> bool {
        self.native_unit_classes.iter().any(|c| c == class_name)
    }

    /// Check if this extra carries a flag.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}
