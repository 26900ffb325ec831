//! Gold costs of inciting a city to revolt and of bribing a unit.

use serde::{Deserialize, Serialize};

use crate::effects::{self, RequirementContext, INCITE_COST_PCT};
use crate::error::{FcError, Result};
use crate::map::{map_distance, Coordinates, MapSize};
use crate::ruleset::{Building, Ruleset, UnitType};
use crate::settings::GameSettings;

/// Incite costs at or above this are reported as impossible.
pub const INCITE_IMPOSSIBLE_COST: f64 = 1_000_000_000.0;

/// Distances to the capital are capped here; a city or unit whose owner
/// has no capital counts as this far away.
pub const MAX_CAPITAL_DISTANCE: i64 = 32;

/// Shield cost of a unit after the shieldbox setting, at least 1.
#[must_use]
pub fn unit_build_cost(unit: &UnitType, settings: &GameSettings) -> i64 {
    (unit.build_cost * settings.shieldbox / 100).max(1)
}

/// Shield cost of a building after the shieldbox setting, at least 1.
#[must_use]
pub fn improvement_build_cost(building: &Building, settings: &GameSettings) -> i64 {
    (building.build_cost * settings.shieldbox / 100).max(1)
}

fn capital_distance(
    from: Coordinates,
    capital: Option<Coordinates>,
    map_size: MapSize,
    settings: &GameSettings,
) -> i64 {
    capital.map_or(MAX_CAPITAL_DISTANCE, |capital| {
        map_distance(from, capital, map_size, &settings.topology).min(MAX_CAPITAL_DISTANCE)
    })
}

/// Citizen moods of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CitizenBreakdown {
    /// Happy citizens.
    pub happy: i64,
    /// Content citizens.
    pub content: i64,
    /// Unhappy citizens.
    pub unhappy: i64,
    /// Angry citizens.
    pub angry: i64,
}

/// Who founded or first owned the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginalOwner {
    /// The player holding the city now.
    CurrentOwner,
    /// The player trying to incite it.
    Inciter,
    /// Somebody else.
    ThirdParty,
}

/// Citizens by nationality, used when the ruleset tracks nationality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NationalityBreakdown {
    /// Citizens of the inciting player's nation.
    pub inciter: i64,
    /// Citizens of the current owner's nation.
    pub current_owner: i64,
    /// Citizens of any other nation.
    pub third_parties: i64,
}

/// A city someone wants to incite.
#[derive(Debug, Clone)]
pub struct IncitedCity<'r> {
    /// Gold of the city's owner.
    pub owner_gold: i64,
    /// Units supported by the city.
    pub units: Vec<&'r UnitType>,
    /// Buildings in the city.
    pub buildings: Vec<&'r Building>,
    /// City size, at least 1.
    pub size: i64,
    /// Citizen moods.
    pub citizens: CitizenBreakdown,
    /// Required when the ruleset does not track nationality.
    pub original_owner: Option<OriginalOwner>,
    /// Required when the ruleset tracks nationality.
    pub nationality: Option<NationalityBreakdown>,
    /// Position of the city.
    pub position: Coordinates,
    /// Position of the owner's capital, if any.
    pub capital: Option<Coordinates>,
    /// Map dimensions.
    pub map_size: MapSize,
}

impl IncitedCity<'_> {
    fn is_unhappy(&self) -> bool {
        let c = &self.citizens;
        c.happy < c.unhappy + 2 * c.angry
    }

    fn is_celebrating(&self, ruleset: &Ruleset) -> bool {
        let c = &self.citizens;
        self.size >= ruleset.city_parameters.celebrate_size_limit
            && c.happy >= (self.size + 1) / 2
            && c.unhappy == 0
            && c.angry == 0
    }
}

/// Incite cost in gold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InciteCost {
    /// Cost in gold.
    pub cost: f64,
    /// The city cannot be incited at all.
    pub impossible: bool,
}

/// Gold needed to incite `city` to revolt.
///
/// # Errors
///
/// [`FcError::InvalidInput`] if the city size is below 1, or if the
/// ownership information the ruleset's nationality setting needs is missing.
pub fn calculate_incite_cost(
    ruleset: &Ruleset,
    city: &IncitedCity<'_>,
    settings: &GameSettings,
) -> Result<InciteCost> {
    if city.size < 1 {
        return Err(FcError::InvalidInput(format!(
            "city size must be at least 1, found {}",
            city.size
        )));
    }
    let factors = &ruleset.incite_costs;
    let nationality = ruleset.citizen_settings.nationality;

    let mut cost = (city.owner_gold + factors.base_incite_cost) as f64;
    for unit in &city.units {
        cost += (unit_build_cost(unit, settings) * factors.unit_factor) as f64;
    }
    for building in &city.buildings {
        cost += (improvement_build_cost(building, settings) * factors.improvement_factor) as f64;
    }

    if !city.is_unhappy() {
        cost *= 2.0;
    }
    if city.is_celebrating(ruleset) {
        cost *= 2.0;
    }

    if !nationality {
        let owner = city.original_owner.ok_or_else(|| {
            FcError::InvalidInput("original owner is required when nationality is disabled".into())
        })?;
        match owner {
            OriginalOwner::CurrentOwner => {}
            OriginalOwner::Inciter => cost /= 2.0,
            OriginalOwner::ThirdParty => cost = cost * 2.0 / 3.0,
        }
    }

    let c = &city.citizens;
    let mood_size = (city.size + c.happy - c.unhappy - 3 * c.angry).max(1);
    cost *= mood_size as f64;
    cost *= factors.total_factor as f64;

    let distance = capital_distance(city.position, city.capital, city.map_size, settings);
    cost /= (distance + 3) as f64;

    if nationality {
        let breakdown = city.nationality.ok_or_else(|| {
            FcError::InvalidInput("nationality breakdown is required when nationality is enabled".into())
        })?;
        let per_citizen = (cost / city.size as f64).floor();
        cost = per_citizen
            * (breakdown.current_owner as f64
                + 0.7 * breakdown.third_parties as f64
                + 0.5 * breakdown.inciter as f64);
    }

    let building_names: Vec<&str> = city.buildings.iter().map(|b| b.name.as_str()).collect();
    let ctx = RequirementContext {
        in_city: true,
        city_size: city.size,
        buildings: &building_names,
        ..Default::default()
    };
    let pct = effects::resolve_type(ruleset, INCITE_COST_PCT, &ctx);
    cost += cost * pct as f64 / 100.0;
    cost /= 100.0;

    tracing::debug!(cost, distance, pct, "incite cost");
    Ok(InciteCost {
        cost,
        impossible: cost >= INCITE_IMPOSSIBLE_COST,
    })
}

/// A unit someone wants to bribe.
#[derive(Debug, Clone, Copy)]
pub struct BribedUnit<'r> {
    /// Unit type.
    pub unit_type: &'r UnitType,
    /// Index into the unit type's veteran levels.
    pub veteran_level: usize,
    /// Current hit points.
    pub hp: i64,
    /// Gold of the unit's owner.
    pub owner_gold: i64,
    /// Position of the unit.
    pub position: Coordinates,
    /// Position of the owner's capital, if any.
    pub capital: Option<Coordinates>,
    /// Map dimensions.
    pub map_size: MapSize,
}

/// Bribe cost in gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BribeCost {
    /// Cost in gold.
    pub cost: i64,
}

/// Gold needed to bribe `unit`. Every step truncates toward zero.
///
/// # Errors
///
/// [`FcError::UnknownEntity`] for a veteran level the unit type lacks,
/// [`FcError::InvalidRuleset`] if the unit type has no hit points or the
/// ruleset no move fragments, [`FcError::InvalidInput`] for hit points
/// outside `1..=hitpoints` or a cost too large for `i64`.
pub fn calculate_bribe_cost(unit: &BribedUnit<'_>, ruleset: &Ruleset, settings: &GameSettings) -> Result<BribeCost> {
    let unit_type = unit.unit_type;
    let level = unit_type
        .veteran_level(unit.veteran_level)
        .ok_or_else(|| FcError::UnknownEntity {
            kind: "veteran level",
            id: format!("{} of unit type '{}'", unit.veteran_level, unit_type.id),
        })?;
    if unit_type.hitpoints <= 0 {
        return Err(FcError::InvalidRuleset(format!(
            "unit type '{}' has non-positive hitpoints {}",
            unit_type.id, unit_type.hitpoints
        )));
    }
    if ruleset.move_frags <= 0 {
        return Err(FcError::InvalidRuleset(format!(
            "move_fragments must be positive, found {}",
            ruleset.move_frags
        )));
    }
    if unit.hp < 1 || unit.hp > unit_type.hitpoints {
        return Err(FcError::InvalidInput(format!(
            "unit of type '{}' has {} hit points, expected 1 to {}",
            unit_type.id, unit.hp, unit_type.hitpoints
        )));
    }

    let distance = capital_distance(unit.position, unit.capital, unit.map_size, settings);
    let overflow = || FcError::InvalidInput(format!("bribe cost of unit type '{}' overflows", unit_type.id));

    let mut cost = unit
        .owner_gold
        .checked_add(ruleset.incite_costs.base_bribe_cost)
        .ok_or_else(overflow)?;
    cost /= distance + 2;
    cost = cost
        .checked_mul(unit_build_cost(unit_type, settings) / 10)
        .and_then(|c| c.checked_mul(level.power_factor))
        .ok_or_else(overflow)?
        / 100;
    let move_frags = if unit_type.move_rate > 0 {
        unit_type
            .move_rate
            .checked_mul(ruleset.move_frags)
            .ok_or_else(overflow)?
    } else {
        ruleset.move_frags
    };
    cost = cost
        .checked_mul(level.move_bonus)
        .and_then(|bonus| cost.checked_add(bonus / move_frags))
        .ok_or_else(overflow)?;

    let health = 1.0 + unit.hp as f64 / unit_type.hitpoints as f64;
    let cost = (cost as f64 / 2.0 * health).floor() as i64;

    tracing::debug!(unit = %unit_type.id, cost, distance, "bribe cost");
    Ok(BribeCost { cost })
}
