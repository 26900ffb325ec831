//! Buildings and the city, citizen and cost constants.

use serde::{Deserialize, Serialize};

/// A city improvement or wonder (`[building_*]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// Section suffix.
    pub id: String,
    /// Display name, matched by `Building` requirements.
    pub name: String,
    /// Shield cost before the shieldbox setting is applied.
    pub build_cost: i64,
}

/// Incite and bribe constants from `game.ruleset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InciteCosts {
    /// `[incite_cost] base_incite_cost`.
    pub base_incite_cost: i64,
    /// Multiplier on each building's shield cost.
    pub improvement_factor: i64,
    /// Multiplier on each unit's shield cost.
    pub unit_factor: i64,
    /// Final multiplier.
    pub total_factor: i64,
    /// `[civstyle] base_bribe_cost`.
    pub base_bribe_cost: i64,
}

/// City constants from `cities.ruleset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CityParameters {
    /// Minimum size at which a city can celebrate.
    pub celebrate_size_limit: i64,
}

/// Citizen constants from `cities.ruleset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CitizenSettings {
    /// Whether citizens track their nationality.
    pub nationality: bool,
}
