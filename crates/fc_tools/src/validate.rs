//! Ruleset directory validation.

use std::fmt;
use std::path::Path;

use fc_core::map::resolve_topology_size;
use fc_core::ruleset::Ruleset;
use fc_core::settings::GameSettings;
use serde::Serialize;

use crate::error::Result;
use crate::loader::load_game;

/// Entity counts of a ruleset that loaded cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Unit types.
    pub unit_types: usize,
    /// Unit classes.
    pub unit_classes: usize,
    /// Terrain types.
    pub terrain_types: usize,
    /// Terrain extras.
    pub terrain_extras: usize,
    /// Buildings.
    pub buildings: usize,
    /// Effects.
    pub effects: usize,
    /// The settings after every override.
    pub settings: GameSettings,
    /// Map dimensions the settings produce.
    pub map_width: i64,
    /// See [`ValidationReport::map_width`].
    pub map_height: i64,
}

impl ValidationReport {
    fn new(ruleset: &Ruleset, settings: GameSettings) -> Result<Self> {
        let size = resolve_topology_size(&settings)?;
        Ok(Self {
            unit_types: ruleset.unit_types.len(),
            unit_classes: ruleset.unit_classes.len(),
            terrain_types: ruleset.terrain_types.len(),
            terrain_extras: ruleset.terrain_extras.len(),
            buildings: ruleset.buildings.len(),
            effects: ruleset.effects.len(),
            settings,
            map_width: size.xsize,
            map_height: size.ysize,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unit types:     {}", self.unit_types)?;
        writeln!(f, "unit classes:   {}", self.unit_classes)?;
        writeln!(f, "terrain types:  {}", self.terrain_types)?;
        writeln!(f, "terrain extras: {}", self.terrain_extras)?;
        writeln!(f, "buildings:      {}", self.buildings)?;
        writeln!(f, "effects:        {}", self.effects)?;
        writeln!(f, "topology:       {}", self.settings.topology)?;
        writeln!(f, "shieldbox:      {}", self.settings.shieldbox)?;
        write!(f, "map size:       {}x{}", self.map_width, self.map_height)
    }
}

/// Load and validate the ruleset in `dir` with optional settings files.
///
/// # Errors
///
/// Returns an error if a file cannot be read, the ruleset fails to parse or
/// validate, or the settings are invalid.
pub fn validate_ruleset_dir(dir: &Path, settings: Option<&Path>, players: Option<&Path>) -> Result<ValidationReport> {
    let (ruleset, game) = load_game(dir, settings, players)?;
    let report = ValidationReport::new(&ruleset, game)?;
    tracing::debug!(?report, "validation passed");
    Ok(report)
}
