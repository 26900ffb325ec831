//! Requirement matching and effect tallies.
//!
//! An effect contributes its value only if every one of its requirements
//! passes. A requirement passes when the fact it names holds at its range
//! exactly when `present` is set. Requirement kinds that are not modelled
//! disqualify the effect instead of failing the calculation.

use crate::ruleset::{Effect, Requirement, RequirementRange, Ruleset, TerrainExtra, UnitClass, UnitType};

/// Effect kind scaling defense strength.
pub const DEFEND_BONUS: &str = "Defend_Bonus";
/// Effect kind scaling defense strength of fortified or in-city units.
pub const FORTIFY_DEFENSE_BONUS: &str = "Fortify_Defense_Bonus";
/// Effect kind scaling the cost of inciting a city.
pub const INCITE_COST_PCT: &str = "Incite_Cost_Pct";

/// The scenario requirements are checked against.
///
/// Facts that a scenario does not have (no attacker when pricing a city,
/// for instance) simply never hold.
#[derive(Debug, Clone, Default)]
pub struct RequirementContext<'a> {
    /// Attacking unit type, if any.
    pub attacker: Option<&'a UnitType>,
    /// Defending unit type, if any.
    pub defender: Option<&'a UnitType>,
    /// Class of the defending unit.
    pub defender_class: Option<&'a UnitClass>,
    /// The defender is fortified.
    pub fortified: bool,
    /// The tile is a city center.
    pub in_city: bool,
    /// Size of that city.
    pub city_size: i64,
    /// Extras on the tile.
    pub extras: &'a [&'a TerrainExtra],
    /// Names of buildings in the city.
    pub buildings: &'a [&'a str],
    /// Names of wonders the owner holds.
    pub wonders: &'a [&'a str],
}

/// Outcome of checking one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Pass,
    Fail,
    /// The requirement cannot be evaluated; the effect does not apply.
    Unsupported,
}

impl RequirementContext<'_> {
    /// Whether the fact a requirement names holds, or `None` if the
    /// requirement kind or range is not modelled.
    fn fact(&self, req: &Requirement) -> Option<bool> {
        let local = req.range == RequirementRange::Local;
        let fact = match req.req_type.as_str() {
            "Building" => match req.range {
                RequirementRange::City => {
                    self.in_city && self.buildings.iter().any(|b| *b == req.name)
                }
                RequirementRange::Player => self.wonders.iter().any(|w| *w == req.name),
                _ => return None,
            },
            "CityTile" => local && self.in_city,
            "MinSize" => {
                req.range == RequirementRange::City
                    && self.in_city
                    && req
                        .name
                        .trim()
                        .parse::<i64>()
                        .is_ok_and(|min| self.city_size >= min)
            }
            "Extra" => local && self.extras.iter().any(|e| e.name == req.name),
            "UnitClass" => local && self.attacker.is_some_and(|a| a.class == req.name),
            "Activity" => local && req.name == "Fortified" && self.fortified,
            "UnitClassFlag" => local && self.defender_class.is_some_and(|c| c.has_flag(&req.name)),
            "UnitFlag" => local && self.defender.is_some_and(|d| d.has_flag(&req.name)),
            _ => return None,
        };
        Some(fact)
    }

    fn check(&self, req: &Requirement) -> Check {
        match self.fact(req) {
            Some(fact) if fact == req.present => Check::Pass,
            Some(_) => Check::Fail,
            None => Check::Unsupported,
        }
    }

    /// Whether every requirement of `effect` passes.
    #[must_use]
    pub fn applies(&self, effect: &Effect) -> bool {
        for req in &effect.requirements {
            match self.check(req) {
                Check::Pass => {}
                Check::Fail => return false,
                Check::Unsupported => {
                    tracing::warn!(
                        effect = %effect.id,
                        requirement = %req.req_type,
                        range = %req.range,
                        "unsupported requirement, effect skipped"
                    );
                    return false;
                }
            }
        }
        true
    }
}

/// Sum of the values of all effects in `effects` that apply in `ctx`.
pub fn resolve<'e>(effects: impl IntoIterator<Item = &'e Effect>, ctx: &RequirementContext<'_>) -> i64 {
    effects
        .into_iter()
        .filter(|e| ctx.applies(e))
        .map(|e| e.value)
        .sum()
}

/// Sum of the values of the ruleset's effects of one kind that apply in
/// `ctx`.
pub fn resolve_type(ruleset: &Ruleset, effect_type: &str, ctx: &RequirementContext<'_>) -> i64 {
    resolve(ruleset.effects_of_type(effect_type), ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(req_type: &str, name: &str, range: RequirementRange, present: bool) -> Requirement {
        Requirement {
            req_type: req_type.into(),
            name: name.into(),
            range,
            present,
        }
    }

    fn effect(value: i64, requirements: Vec<Requirement>) -> Effect {
        Effect {
            id: "test".into(),
            effect_type: DEFEND_BONUS.into(),
            value,
            requirements,
        }
    }

    fn unit(class: &str, flags: &[&str]) -> UnitType {
        UnitType {
            id: "u".into(),
            name: "U".into(),
            class: class.into(),
            build_cost: 10,
            attack: 1,
            defense: 1,
            firepower: 1,
            hitpoints: 10,
            move_rate: 1,
            flags: flags.iter().map(|f| f.to_string()).collect(),
            bonuses: vec![],
            veteran_levels: vec![],
        }
    }

    #[test]
    fn test_building_city_range_needs_city() {
        let walls = effect(100, vec![req("Building", "City Walls", RequirementRange::City, true)]);
        let buildings = ["City Walls"];

        let mut ctx = RequirementContext {
            buildings: &buildings,
            ..Default::default()
        };
        assert_eq!(resolve([&walls], &ctx), 0, "buildings only count inside a city");

        ctx.in_city = true;
        assert_eq!(resolve([&walls], &ctx), 100);
    }

    #[test]
    fn test_absent_requirement_inverts() {
        let not_in_city = effect(50, vec![req("CityTile", "Center", RequirementRange::Local, false)]);
        let mut ctx = RequirementContext::default();
        assert_eq!(resolve([&not_in_city], &ctx), 50);
        ctx.in_city = true;
        assert_eq!(resolve([&not_in_city], &ctx), 0);
    }

    #[test]
    fn test_range_mismatch_makes_fact_false() {
        // CityTile at city range never holds, so only the absent form passes
        let present = effect(10, vec![req("CityTile", "Center", RequirementRange::City, true)]);
        let absent = effect(20, vec![req("CityTile", "Center", RequirementRange::City, false)]);
        let ctx = RequirementContext {
            in_city: true,
            ..Default::default()
        };
        assert_eq!(resolve([&present, &absent], &ctx), 20);
    }

    #[test]
    fn test_min_size() {
        let big = effect(25, vec![req("MinSize", "9", RequirementRange::City, true)]);
        let mut ctx = RequirementContext {
            in_city: true,
            city_size: 8,
            ..Default::default()
        };
        assert_eq!(resolve([&big], &ctx), 0);
        ctx.city_size = 9;
        assert_eq!(resolve([&big], &ctx), 25);
    }

    #[test]
    fn test_unit_class_uses_attacker() {
        let vs_land = effect(100, vec![req("UnitClass", "Land", RequirementRange::Local, true)]);
        let attacker = unit("Land", &[]);
        let ctx = RequirementContext {
            attacker: Some(&attacker),
            ..Default::default()
        };
        assert_eq!(resolve([&vs_land], &ctx), 100);
        assert_eq!(resolve([&vs_land], &RequirementContext::default()), 0);
    }

    #[test]
    fn test_fortified_and_flags() {
        let defender = unit("Land", &["Horse"]);
        let class = UnitClass {
            id: "land".into(),
            name: "Land".into(),
            flags: vec!["CanFortify".into()],
        };
        let fortify = effect(
            50,
            vec![
                req("Activity", "Fortified", RequirementRange::Local, true),
                req("UnitClassFlag", "CanFortify", RequirementRange::Local, true),
                req("UnitFlag", "Cant_Fortify", RequirementRange::Local, false),
            ],
        );

        let mut ctx = RequirementContext {
            defender: Some(&defender),
            defender_class: Some(&class),
            ..Default::default()
        };
        assert_eq!(resolve([&fortify], &ctx), 0);
        ctx.fortified = true;
        assert_eq!(resolve([&fortify], &ctx), 50);
    }

    #[test]
    fn test_unsupported_requirement_skips_effect() {
        let gov = effect(30, vec![req("Gov", "Despotism", RequirementRange::Player, true)]);
        let player_building = effect(40, vec![req("Building", "Great Wall", RequirementRange::Continent, false)]);
        let plain = effect(5, vec![]);
        assert_eq!(
            resolve([&gov, &player_building, &plain], &RequirementContext::default()),
            5
        );
    }

    #[test]
    fn test_wonder_at_player_range() {
        let wall = effect(100, vec![req("Building", "Great Wall", RequirementRange::Player, true)]);
        let wonders = ["Great Wall"];
        let ctx = RequirementContext {
            wonders: &wonders,
            ..Default::default()
        };
        assert_eq!(resolve([&wall], &ctx), 100);
    }

    #[test]
    fn test_negative_values_sum() {
        let a = effect(-25, vec![]);
        let b = effect(10, vec![]);
        assert_eq!(resolve([&a, &b], &RequirementContext::default()), -15);
    }
}
