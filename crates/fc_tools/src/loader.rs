//! Reading ruleset directories and settings files from disk.

use std::fs;
use std::path::Path;

use fc_core::ruleset::extract::{
    BUILDINGS_FILE, CITIES_FILE, EFFECTS_FILE, GAME_FILE, TERRAIN_FILE, UNITS_FILE,
};
use fc_core::ruleset::{self, Ruleset, RulesetSources};
use fc_core::settings::GameSettings;

use crate::error::{Result, ToolError};

/// Contents of the six files of a ruleset directory.
#[derive(Debug, Clone, Default)]
pub struct RulesetFiles {
    /// `effects.ruleset`
    pub effects: String,
    /// `units.ruleset`
    pub units: String,
    /// `terrain.ruleset`
    pub terrain: String,
    /// `game.ruleset`
    pub game: String,
    /// `buildings.ruleset`
    pub buildings: String,
    /// `cities.ruleset`
    pub cities: String,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ToolError::io(path, e))
}

impl RulesetFiles {
    /// Read the six files from `dir`.
    pub fn read_dir(dir: &Path) -> Result<Self> {
        tracing::debug!(dir = %dir.display(), "reading ruleset directory");
        Ok(Self {
            effects: read(&dir.join(EFFECTS_FILE))?,
            units: read(&dir.join(UNITS_FILE))?,
            terrain: read(&dir.join(TERRAIN_FILE))?,
            game: read(&dir.join(GAME_FILE))?,
            buildings: read(&dir.join(BUILDINGS_FILE))?,
            cities: read(&dir.join(CITIES_FILE))?,
        })
    }

    /// Borrow the contents for the parser.
    #[must_use]
    pub fn sources(&self) -> RulesetSources<'_> {
        RulesetSources {
            effects: &self.effects,
            units: &self.units,
            terrain: &self.terrain,
            game: &self.game,
            buildings: &self.buildings,
            cities: &self.cities,
        }
    }
}

fn read_optional(path: Option<&Path>) -> Result<String> {
    path.map_or_else(|| Ok(String::new()), read)
}

/// Load the ruleset in `dir` and the settings that apply to it.
///
/// A missing settings or players file is treated as empty.
pub fn load_game(dir: &Path, settings: Option<&Path>, players: Option<&Path>) -> Result<(Ruleset, GameSettings)> {
    let files = RulesetFiles::read_dir(dir)?;
    let settings_text = read_optional(settings)?;
    let players_text = read_optional(players)?;
    Ok(ruleset::load_ruleset(&files.sources(), &settings_text, &players_text)?)
}
