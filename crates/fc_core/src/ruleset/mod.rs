//! The ruleset model and its loader.
//!
//! A [`Ruleset`] is built once from six ruleset files and never mutated
//! afterwards. This module contains no IO; callers hand in file contents
//! through [`RulesetSources`].

mod city_data;
mod effect_data;
pub mod extract;
mod terrain_data;
mod unit_data;

pub use city_data::{Building, CitizenSettings, CityParameters, InciteCosts};
pub use effect_data::{Effect, Requirement, RequirementRange};
pub use terrain_data::{Terrain, TerrainExtra, NATIVE_TILE_FLAG, NATURAL_DEFENSE_FLAG};
pub use unit_data::{UnitClass, UnitType, UnitTypeBonus, VeteranLevel};

use serde::{Deserialize, Serialize};

use crate::error::{FcError, Result};
use crate::ini::parse_document;
use crate::settings::{merge_settings, GameSettings, SettingsOverrides};

/// Complete game-balance data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// All effects, in file order.
    pub effects: Vec<Effect>,
    /// All unit types.
    pub unit_types: Vec<UnitType>,
    /// All unit classes.
    pub unit_classes: Vec<UnitClass>,
    /// Levels from `[veteran_system]`.
    pub default_veteran_levels: Vec<VeteranLevel>,
    /// All terrain types.
    pub terrain_types: Vec<Terrain>,
    /// All tile extras.
    pub terrain_extras: Vec<TerrainExtra>,
    /// Movement fragments per whole move.
    pub move_frags: i64,
    /// Incite and bribe constants.
    pub incite_costs: InciteCosts,
    /// All buildings and wonders.
    pub buildings: Vec<Building>,
    /// City constants.
    pub city_parameters: CityParameters,
    /// Citizen constants.
    pub citizen_settings: CitizenSettings,
}

fn unknown(kind: &'static str, id: &str) -> FcError {
    FcError::UnknownEntity {
        kind,
        id: id.to_string(),
    }
}

impl Ruleset {
    /// Unit type by id.
    pub fn unit_type(&self, id: &str) -> Result<&UnitType> {
        self.unit_types
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| unknown("unit type", id))
    }

    /// Unit class by its name.
    pub fn unit_class_by_name(&self, name: &str) -> Result<&UnitClass> {
        self.unit_classes
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| unknown("unit class", name))
    }

    /// The class a unit type belongs to.
    pub fn unit_class_of(&self, unit: &UnitType) -> Result<&UnitClass> {
        self.unit_classes
            .iter()
            .find(|c| c.name == unit.class)
            .ok_or_else(|| FcError::UnknownUnitClass {
                unit: unit.id.clone(),
                class: unit.class.clone(),
            })
    }

    /// Terrain by id.
    pub fn terrain(&self, id: &str) -> Result<&Terrain> {
        self.terrain_types
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| unknown("terrain", id))
    }

    /// Tile extra by id.
    pub fn extra(&self, id: &str) -> Result<&TerrainExtra> {
        self.terrain_extras
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| unknown("extra", id))
    }

    /// Building by id.
    pub fn building(&self, id: &str) -> Result<&Building> {
        self.buildings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| unknown("building", id))
    }

    /// Effects of one kind.
    pub fn effects_of_type<'r>(&'r self, effect_type: &'r str) -> impl Iterator<Item = &'r Effect> {
        self.effects
            .iter()
            .filter(move |e| e.effect_type == effect_type)
    }

    /// Check the cross-record invariants: every unit class reference
    /// resolves, every unit has positive hit points, and `move_frags` is
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if self.move_frags <= 0 {
            return Err(FcError::InvalidRuleset(format!(
                "move_fragments must be positive, found {}",
                self.move_frags
            )));
        }

        for unit in &self.unit_types {
            self.unit_class_of(unit)?;
            if unit.hitpoints <= 0 {
                return Err(FcError::InvalidRuleset(format!(
                    "unit type '{}' has non-positive hitpoints {}",
                    unit.id, unit.hitpoints
                )));
            }
        }

        Ok(())
    }
}

/// Text of the six ruleset files.
#[derive(Debug, Clone, Copy)]
pub struct RulesetSources<'a> {
    /// `effects.ruleset`
    pub effects: &'a str,
    /// `units.ruleset`
    pub units: &'a str,
    /// `terrain.ruleset`
    pub terrain: &'a str,
    /// `game.ruleset`
    pub game: &'a str,
    /// `buildings.ruleset`
    pub buildings: &'a str,
    /// `cities.ruleset`
    pub cities: &'a str,
}

/// Parse and extract all six files, returning the ruleset and the overrides
/// from its `[settings]` table.
pub fn parse_ruleset_with_settings(sources: &RulesetSources<'_>) -> Result<(Ruleset, SettingsOverrides)> {
    let units_doc = parse_document(sources.units, extract::UNITS_FILE)?;
    let terrain_doc = parse_document(sources.terrain, extract::TERRAIN_FILE)?;
    let effects_doc = parse_document(sources.effects, extract::EFFECTS_FILE)?;
    let game_doc = parse_document(sources.game, extract::GAME_FILE)?;
    let buildings_doc = parse_document(sources.buildings, extract::BUILDINGS_FILE)?;
    let cities_doc = parse_document(sources.cities, extract::CITIES_FILE)?;

    let (unit_classes, unit_types, default_veteran_levels) = extract::extract_units(&units_doc)?;
    let (terrain_types, terrain_extras, move_frags) = extract::extract_terrain(&terrain_doc)?;
    let effects = extract::extract_effects(&effects_doc)?;
    let (incite_costs, overrides) = extract::extract_game(&game_doc)?;
    let buildings = extract::extract_buildings(&buildings_doc)?;
    let (city_parameters, citizen_settings) = extract::extract_cities(&cities_doc)?;

    let ruleset = Ruleset {
        effects,
        unit_types,
        unit_classes,
        default_veteran_levels,
        terrain_types,
        terrain_extras,
        move_frags,
        incite_costs,
        buildings,
        city_parameters,
        citizen_settings,
    };
    ruleset.validate()?;

    tracing::info!(
        units = ruleset.unit_types.len(),
        effects = ruleset.effects.len(),
        terrains = ruleset.terrain_types.len(),
        "ruleset loaded"
    );
    Ok((ruleset, overrides))
}

/// Parse and extract all six files into a validated [`Ruleset`].
pub fn parse_ruleset(sources: &RulesetSources<'_>) -> Result<Ruleset> {
    parse_ruleset_with_settings(sources).map(|(ruleset, _)| ruleset)
}

/// Load a ruleset and the game settings that apply to it.
///
/// Settings precedence, lowest first: defaults, the ruleset's `[settings]`
/// table, `settings_text`, `players_text`.
pub fn load_ruleset(
    sources: &RulesetSources<'_>,
    settings_text: &str,
    players_text: &str,
) -> Result<(Ruleset, GameSettings)> {
    let (ruleset, overrides) = parse_ruleset_with_settings(sources)?;
    let settings = merge_settings(&overrides, settings_text, players_text)?;
    Ok((ruleset, settings))
}
