//! Combat queries by ruleset id.

use std::fmt;

use fc_core::combat::{self, AttackerState, CombatResult, DefenderMeta, DefenderState, WorldState};
use fc_core::ruleset::Ruleset;
use serde::Serialize;

use crate::error::Result;

/// A fight described with ruleset ids.
///
/// Unset hit points mean full health, unset moves mean the attacker's full
/// move allowance.
#[derive(Debug, Clone, Default)]
pub struct CombatRequest {
    /// Attacking unit type id.
    pub attacker: String,
    /// Defending unit type id.
    pub defender: String,
    /// Terrain id of the defender's tile.
    pub terrain: String,
    /// Attacker veteran level.
    pub attacker_vet: usize,
    /// Defender veteran level.
    pub defender_vet: usize,
    /// Attacker hit points.
    pub attacker_hp: Option<i64>,
    /// Defender hit points.
    pub defender_hp: Option<i64>,
    /// Attacker move fragments left.
    pub moves: Option<i64>,
    /// The defender is fortified.
    pub fortified: bool,
    /// The defender is in a city.
    pub in_city: bool,
    /// Size of that city.
    pub city_size: i64,
    /// Extra ids on the defender's tile.
    pub extras: Vec<String>,
    /// Building ids in the city.
    pub buildings: Vec<String>,
    /// Building ids of wonders the defender's owner holds.
    pub wonders: Vec<String>,
}

/// Strengths and outcome distributions of a fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatReport {
    /// Attack strength.
    pub attack_power: i64,
    /// Defense strength.
    pub defense_power: i64,
    /// Attacker firepower after adjustments.
    pub attacker_firepower: i64,
    /// Defender firepower after adjustments.
    pub defender_firepower: i64,
    /// Attacker outcome.
    pub attacker: CombatResult,
    /// Defender outcome.
    pub defender: CombatResult,
}

fn building_names<'r>(ruleset: &'r Ruleset, ids: &[String]) -> Result<Vec<&'r str>> {
    ids.iter()
        .map(|id| Ok(ruleset.building(id)?.name.as_str()))
        .collect()
}

/// Resolve the ids in `request` and build the combat query.
pub fn build_world<'r>(ruleset: &'r Ruleset, request: &CombatRequest) -> Result<WorldState<'r>> {
    let attacker = ruleset.unit_type(&request.attacker)?;
    let defender = ruleset.unit_type(&request.defender)?;
    let terrain = ruleset.terrain(&request.terrain)?;
    let extras = request
        .extras
        .iter()
        .map(|id| ruleset.extra(id))
        .collect::<fc_core::error::Result<Vec<_>>>()?;

    Ok(WorldState {
        attacker: AttackerState {
            unit_type: attacker,
            veteran_level: request.attacker_vet,
            hp: request.attacker_hp.unwrap_or(attacker.hitpoints),
            moves: request.moves.unwrap_or(attacker.move_rate * ruleset.move_frags),
        },
        defender: DefenderState {
            unit_type: defender,
            veteran_level: request.defender_vet,
            hp: request.defender_hp.unwrap_or(defender.hitpoints),
            fortified: request.fortified,
        },
        defender_meta: DefenderMeta {
            terrain,
            in_city: request.in_city,
            city_size: request.city_size,
            extras,
            buildings: building_names(ruleset, &request.buildings)?,
            wonders: building_names(ruleset, &request.wonders)?,
        },
    })
}

/// Run the fight described by `request`.
pub fn run_combat(ruleset: &Ruleset, request: &CombatRequest) -> Result<CombatReport> {
    let world = build_world(ruleset, request)?;
    let (attacker_firepower, defender_firepower) = combat::firepower(ruleset, &world)?;
    let (attacker, defender) = combat::calculate_combat(ruleset, &world)?;

    Ok(CombatReport {
        attack_power: combat::attack_power(ruleset, &world)?,
        defense_power: combat::defense_power(ruleset, &world)?,
        attacker_firepower,
        defender_firepower,
        attacker,
        defender,
    })
}

fn write_side(f: &mut fmt::Formatter<'_>, label: &str, result: &CombatResult) -> fmt::Result {
    writeln!(
        f,
        "{label}: win {:.2}%, lost hp {:.2} +/- {:.2}",
        result.win_chance * 100.0,
        result.average_lost_hp,
        result.lost_hp_std_error
    )?;
    for chance in &result.hp_chances {
        writeln!(f, "  {:>3} hp  {:>8.4}%", chance.hp, chance.probability * 100.0)?;
    }
    Ok(())
}

impl fmt::Display for CombatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "strength {} vs {}, firepower {} vs {}",
            self.attack_power, self.defense_power, self.attacker_firepower, self.defender_firepower
        )?;
        write_side(f, "attacker", &self.attacker)?;
        write_side(f, "defender", &self.defender)
    }
}
