//! Exact combat outcome distributions.
//!
//! Freeciv combat is a sequence of rounds. Each round the attacker wins with
//! probability `attack / (attack + defense)` and the loser of the round
//! loses the winner's firepower in hit points. The fight ends when one side
//! reaches 0 hit points. The number of rounds each side must win is fixed,
//! so the outcome distribution follows from the binomial distribution.
//!
//! Strength calculations use integer arithmetic with truncation after every
//! step, in the same order as the game server.

use serde::{Deserialize, Serialize};

use crate::effects::{self, RequirementContext, DEFEND_BONUS, FORTIFY_DEFENSE_BONUS};
use crate::error::{FcError, Result};
use crate::math::{binomial_cumulative, binomial_mass};
use crate::ruleset::{
    Ruleset, Terrain, TerrainExtra, UnitClass, UnitType, VeteranLevel, NATIVE_TILE_FLAG,
    NATURAL_DEFENSE_FLAG,
};

/// Scale applied to base attack and defense values.
pub const POWER_FACTOR: i64 = 10;

/// The attacking unit.
#[derive(Debug, Clone, Copy)]
pub struct AttackerState<'r> {
    /// Unit type.
    pub unit_type: &'r UnitType,
    /// Index into the unit type's veteran levels.
    pub veteran_level: usize,
    /// Current hit points, at least 1.
    pub hp: i64,
    /// Remaining move fragments.
    pub moves: i64,
}

/// The defending unit.
#[derive(Debug, Clone, Copy)]
pub struct DefenderState<'r> {
    /// Unit type.
    pub unit_type: &'r UnitType,
    /// Index into the unit type's veteran levels.
    pub veteran_level: usize,
    /// Current hit points, at least 1.
    pub hp: i64,
    /// The defender is fortified.
    pub fortified: bool,
}

/// Where the defender stands.
#[derive(Debug, Clone)]
pub struct DefenderMeta<'r> {
    /// Terrain of the tile.
    pub terrain: &'r Terrain,
    /// The tile is a city center.
    pub in_city: bool,
    /// Size of that city.
    pub city_size: i64,
    /// Extras on the tile.
    pub extras: Vec<&'r TerrainExtra>,
    /// Names of buildings in the city.
    pub buildings: Vec<&'r str>,
    /// Names of wonders the defender's owner holds.
    pub wonders: Vec<&'r str>,
}

/// A single combat query.
#[derive(Debug, Clone)]
pub struct WorldState<'r> {
    /// The attacking unit.
    pub attacker: AttackerState<'r>,
    /// The defending unit.
    pub defender: DefenderState<'r>,
    /// The defender's tile.
    pub defender_meta: DefenderMeta<'r>,
}

/// Probability that a side ends the fight with exactly `hp` hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HpChance {
    /// Remaining hit points; 0 means the side lost.
    pub hp: i64,
    /// Probability of this outcome.
    pub probability: f64,
}

/// Outcome distribution for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    /// Probability that this side wins.
    pub win_chance: f64,
    /// Remaining hit point distribution, winning outcomes first, the losing
    /// outcome (`hp == 0`) last.
    pub hp_chances: Vec<HpChance>,
    /// Expected hit point loss.
    pub average_lost_hp: f64,
    /// Standard deviation of the hit point loss.
    pub lost_hp_std_error: f64,
}

/// Lookups shared by the strength and firepower calculations.
struct Combatants<'w> {
    attacker: &'w UnitType,
    defender: &'w UnitType,
    defender_class: &'w UnitClass,
    attacker_level: &'w VeteranLevel,
    defender_level: &'w VeteranLevel,
    defend_bonus: i64,
    fortify_bonus: i64,
}

fn veteran_level(unit: &UnitType, level: usize) -> Result<&VeteranLevel> {
    unit.veteran_level(level).ok_or_else(|| FcError::UnknownEntity {
        kind: "veteran level",
        id: format!("{} of unit type '{}'", level, unit.id),
    })
}

impl<'w> Combatants<'w> {
    fn new(ruleset: &'w Ruleset, world: &'w WorldState<'_>) -> Result<Self> {
        if world.attacker.hp < 1 || world.defender.hp < 1 {
            return Err(FcError::InvalidInput(format!(
                "hit points must be at least 1 (attacker {}, defender {})",
                world.attacker.hp, world.defender.hp
            )));
        }
        for (side, hp, unit) in [
            ("attacker", world.attacker.hp, world.attacker.unit_type),
            ("defender", world.defender.hp, world.defender.unit_type),
        ] {
            if hp > unit.hitpoints {
                return Err(FcError::InvalidInput(format!(
                    "{side} has {hp} hit points, more than the {} of unit type '{}'",
                    unit.hitpoints, unit.id
                )));
            }
        }
        if world.attacker.moves < 0 {
            return Err(FcError::InvalidInput(format!(
                "attacker moves must not be negative, found {}",
                world.attacker.moves
            )));
        }

        let attacker = world.attacker.unit_type;
        let defender = world.defender.unit_type;
        let defender_class = ruleset.unit_class_of(defender)?;
        let meta = &world.defender_meta;

        let ctx = RequirementContext {
            attacker: Some(attacker),
            defender: Some(defender),
            defender_class: Some(defender_class),
            fortified: world.defender.fortified,
            in_city: meta.in_city,
            city_size: meta.city_size,
            extras: &meta.extras,
            buildings: &meta.buildings,
            wonders: &meta.wonders,
        };

        Ok(Self {
            attacker,
            defender,
            defender_class,
            attacker_level: veteran_level(attacker, world.attacker.veteran_level)?,
            defender_level: veteran_level(defender, world.defender.veteran_level)?,
            defend_bonus: effects::resolve_type(ruleset, DEFEND_BONUS, &ctx),
            fortify_bonus: effects::resolve_type(ruleset, FORTIFY_DEFENSE_BONUS, &ctx),
        })
    }

    fn attack_power(&self, ruleset: &Ruleset, world: &WorldState<'_>) -> i64 {
        let mut power = self.attacker.attack * POWER_FACTOR * self.attacker_level.power_factor / 100;
        if world.attacker.moves < ruleset.move_frags {
            power = power * world.attacker.moves / ruleset.move_frags;
        }
        power
    }

    fn defense_power(&self, world: &WorldState<'_>) -> i64 {
        let meta = &world.defender_meta;

        let mut power = self.defender.defense * POWER_FACTOR * self.defender_level.power_factor / 100;
        if self.defender_class.has_flag("TerrainDefense") {
            power = power * (100 + meta.terrain.defense_bonus) / 100;
        }

        let multiplier = 100
            + self.defender.bonus_against("DefenseMultiplierPct", &self.attacker.flags)
            + 100 * self.defender.bonus_against("DefenseMultiplier", &self.attacker.flags);
        let divider = (100
            + self.attacker.bonus_against("DefenseDividerPct", &self.defender.flags)
            + 100 * self.attacker.bonus_against("DefenseDivider", &self.defender.flags))
        .max(1);

        power = power * multiplier / 100;
        power = (power * (100 + self.defend_bonus) / 100).max(0);
        power = power * 100 / divider;
        power += power * extras_defense_bonus(&meta.extras, &self.defender.class) / 100;
        power * (100 + self.fortify_bonus) / 100
    }

    fn firepower(&self, world: &WorldState<'_>) -> (i64, i64) {
        let meta = &world.defender_meta;
        let mut attacker_fp = self.attacker.firepower;
        let mut defender_fp = self.defender.firepower;

        if self.attacker.has_flag("CityBuster") && meta.in_city {
            attacker_fp *= 2;
        }
        if self.attacker.has_flag("BadWallAttacker") && self.defend_bonus > 0 {
            attacker_fp = 1;
        }
        if self.defender.has_flag("BadCityDefender") && meta.in_city {
            attacker_fp *= 2;
            defender_fp = 1;
        }
        if self.defender.bonus_against("Firepower1", &self.attacker.flags) > 0 {
            defender_fp = 1;
        }
        // also fires for non-land attackers onto non-native terrain
        if is_land_bombardment(&self.attacker.class, meta) {
            attacker_fp = 1;
            defender_fp = 1;
        }

        (attacker_fp, defender_fp)
    }
}

/// Combined percent bonus of the extras native to the defender's class.
///
/// Natural defenses and fortifications each add up within their pool; the
/// two pools compound.
fn extras_defense_bonus(extras: &[&TerrainExtra], class_name: &str) -> i64 {
    let pool = |natural: bool| -> i64 {
        extras
            .iter()
            .filter(|e| {
                e.is_native_to(class_name)
                    && e.has_flag(NATURAL_DEFENSE_FLAG) == natural
                    && e.defense_bonus > 0
            })
            .map(|e| e.defense_bonus)
            .sum()
    };
    (pool(true) + 100) * (pool(false) + 100) / 100 - 100
}

fn is_land_bombardment(attacker_class: &str, meta: &DefenderMeta<'_>) -> bool {
    !meta.terrain.is_native_to(attacker_class)
        && !meta
            .extras
            .iter()
            .any(|e| e.has_flag(NATIVE_TILE_FLAG) && e.is_native_to(attacker_class))
        && !meta.in_city
}

/// Attack strength after veterancy and partial-move scaling.
pub fn attack_power(ruleset: &Ruleset, world: &WorldState<'_>) -> Result<i64> {
    Ok(Combatants::new(ruleset, world)?.attack_power(ruleset, world))
}

/// Defense strength after terrain, unit bonuses, effects and extras.
pub fn defense_power(ruleset: &Ruleset, world: &WorldState<'_>) -> Result<i64> {
    Ok(Combatants::new(ruleset, world)?.defense_power(world))
}

/// Firepower of attacker and defender after all modifiers.
pub fn firepower(ruleset: &Ruleset, world: &WorldState<'_>) -> Result<(i64, i64)> {
    Ok(Combatants::new(ruleset, world)?.firepower(world))
}

/// Expected value and standard deviation of `(value, probability)` pairs.
fn moments(outcomes: &[(f64, f64)]) -> (f64, f64) {
    let mean: f64 = outcomes.iter().map(|(x, p)| x * p).sum();
    let mean_sq: f64 = outcomes.iter().map(|(x, p)| x * x * p).sum();
    (mean, (mean_sq - mean * mean).max(0.0).sqrt())
}

/// Hit points left when one side wins while the other won `i` rounds.
///
/// `max_lost` is the number of rounds the winner can lose and still win,
/// `wins_before_last` the rounds it must win before the final one and
/// `round_p` its chance to win a round.
fn survivor_chances(hp: i64, opponent_fp: i64, max_lost: u32, wins_before_last: u32, round_p: f64) -> Vec<HpChance> {
    (0..=max_lost)
        .map(|i| HpChance {
            hp: hp - i64::from(i) * opponent_fp,
            probability: binomial_mass(wins_before_last + i, i, 1.0 - round_p) * round_p,
        })
        .collect()
}

fn side_result(full_hp: i64, win_chance: f64, mut hp_chances: Vec<HpChance>) -> CombatResult {
    let mut outcomes: Vec<(f64, f64)> = hp_chances
        .iter()
        .map(|c| ((full_hp - c.hp) as f64, c.probability))
        .collect();
    outcomes.push((full_hp as f64, 1.0 - win_chance));
    let (average_lost_hp, lost_hp_std_error) = moments(&outcomes);

    hp_chances.push(HpChance {
        hp: 0,
        probability: 1.0 - win_chance,
    });

    CombatResult {
        win_chance,
        hp_chances,
        average_lost_hp,
        lost_hp_std_error,
    }
}

/// A fight one side wins with certainty because the other deals no damage.
fn certain_win(winner_hp: i64, loser_hp: i64) -> (CombatResult, CombatResult) {
    (
        side_result(winner_hp, 1.0, vec![HpChance { hp: winner_hp, probability: 1.0 }]),
        side_result(loser_hp, 0.0, Vec::new()),
    )
}

fn rounds_to_kill(hp: i64, fp: i64) -> Result<u32> {
    let rounds = hp / fp + i64::from(hp % fp != 0);
    u32::try_from(rounds).map_err(|_| {
        FcError::InvalidInput(format!("{hp} hit points at firepower {fp} is too many rounds"))
    })
}

/// Win chances and hit point distributions for attacker and defender.
///
/// # Errors
///
/// [`FcError::InvalidInput`] for hit points below 1 or above the unit
/// type's maximum, or negative moves,
/// [`FcError::UnknownEntity`] for a veteran level the unit type lacks,
/// [`FcError::UnknownUnitClass`] for a defender whose class is missing and
/// [`FcError::DegenerateCombat`] when neither side can ever win.
pub fn calculate_combat(ruleset: &Ruleset, world: &WorldState<'_>) -> Result<(CombatResult, CombatResult)> {
    let combatants = Combatants::new(ruleset, world)?;
    let attack = combatants.attack_power(ruleset, world);
    let defense = combatants.defense_power(world);
    let (attacker_fp, defender_fp) = combatants.firepower(world);

    tracing::debug!(
        attacker = %combatants.attacker.id,
        defender = %combatants.defender.id,
        attack,
        defense,
        attacker_fp,
        defender_fp,
        "combat strengths"
    );

    let p = if attack + defense == 0 {
        0.5
    } else {
        attack as f64 / (attack + defense) as f64
    };
    let q = 1.0 - p;
    let attacker_hp = world.attacker.hp;
    let defender_hp = world.defender.hp;

    let attacker_can_win = attacker_fp > 0 && p > 0.0;
    let defender_can_win = defender_fp > 0 && q > 0.0;
    match (attacker_can_win, defender_can_win) {
        (false, false) => {
            return Err(FcError::DegenerateCombat(format!(
                "neither side can win (strength {attack}/{defense}, firepower {attacker_fp}/{defender_fp})"
            )))
        }
        (true, false) if defender_fp <= 0 => return Ok(certain_win(attacker_hp, defender_hp)),
        (false, true) if attacker_fp <= 0 => {
            let (defender, attacker) = certain_win(defender_hp, attacker_hp);
            return Ok((attacker, defender));
        }
        _ => {}
    }

    let attacker_required = rounds_to_kill(defender_hp, attacker_fp)?;
    let defender_required = rounds_to_kill(attacker_hp, defender_fp)?;
    let attacker_max_lost = defender_required.saturating_sub(1);
    let defender_max_lost = attacker_required.saturating_sub(1);

    let defender_win = binomial_cumulative(
        attacker_required + defender_required - 1,
        defender_max_lost,
        p,
    );
    let attacker_win = 1.0 - defender_win;

    let attacker_chances = survivor_chances(attacker_hp, defender_fp, attacker_max_lost, defender_max_lost, p);
    let defender_chances = survivor_chances(defender_hp, attacker_fp, defender_max_lost, attacker_max_lost, q);

    Ok((
        side_result(attacker_hp, attacker_win, attacker_chances),
        side_result(defender_hp, defender_win, defender_chances),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::{CitizenSettings, CityParameters, InciteCosts};

    fn level(power_factor: i64) -> VeteranLevel {
        VeteranLevel {
            name: "green".into(),
            power_factor,
            base_raise_chance: 50,
            move_bonus: 0,
        }
    }

    fn unit(id: &str, attack: i64, defense: i64, flags: &[&str]) -> UnitType {
        UnitType {
            id: id.into(),
            name: id.into(),
            class: "Land".into(),
            build_cost: 10,
            attack,
            defense,
            firepower: 1,
            hitpoints: 10,
            move_rate: 1,
            flags: flags.iter().map(|f| f.to_string()).collect(),
            bonuses: vec![],
            veteran_levels: vec![level(100), level(150)],
        }
    }

    fn ruleset(units: Vec<UnitType>, class_flags: &[&str]) -> Ruleset {
        Ruleset {
            effects: vec![],
            unit_types: units,
            unit_classes: vec![UnitClass {
                id: "land".into(),
                name: "Land".into(),
                flags: class_flags.iter().map(|f| f.to_string()).collect(),
            }],
            default_veteran_levels: vec![level(100)],
            terrain_types: vec![],
            terrain_extras: vec![],
            move_frags: 1,
            incite_costs: InciteCosts::default(),
            buildings: vec![],
            city_parameters: CityParameters::default(),
            citizen_settings: CitizenSettings::default(),
        }
    }

    fn grassland() -> Terrain {
        Terrain {
            id: "grassland".into(),
            name: "Grassland".into(),
            defense_bonus: 0,
            native_unit_classes: vec!["Land".into()],
        }
    }

    fn world<'r>(attacker: &'r UnitType, defender: &'r UnitType, terrain: &'r Terrain) -> WorldState<'r> {
        WorldState {
            attacker: AttackerState {
                unit_type: attacker,
                veteran_level: 0,
                hp: 10,
                moves: 1,
            },
            defender: DefenderState {
                unit_type: defender,
                veteran_level: 0,
                hp: 10,
                fortified: false,
            },
            defender_meta: DefenderMeta {
                terrain,
                in_city: false,
                city_size: 0,
                extras: vec![],
                buildings: vec![],
                wonders: vec![],
            },
        }
    }

    #[test]
    fn test_basic_strengths() {
        let rules = ruleset(vec![unit("a", 4, 1, &[]), unit("d", 1, 2, &[])], &[]);
        let terrain = grassland();
        let w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);

        assert_eq!(attack_power(&rules, &w).unwrap(), 40);
        assert_eq!(defense_power(&rules, &w).unwrap(), 20);
        assert_eq!(firepower(&rules, &w).unwrap(), (1, 1));
    }

    #[test]
    fn test_partial_moves_reduce_attack() {
        let mut rules = ruleset(vec![unit("a", 4, 1, &[]), unit("d", 1, 2, &[])], &[]);
        rules.move_frags = 3;
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.attacker.moves = 1;

        // 40 * 1 / 3, truncated
        assert_eq!(attack_power(&rules, &w).unwrap(), 13);
    }

    #[test]
    fn test_terrain_bonus_needs_class_flag() {
        let hills = Terrain {
            defense_bonus: 50,
            ..grassland()
        };
        let plain = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 2, &[])], &[]);
        let flagged = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 2, &[])], &["TerrainDefense"]);

        let w = world(&plain.unit_types[0], &plain.unit_types[1], &hills);
        assert_eq!(defense_power(&plain, &w).unwrap(), 20);
        let w = world(&flagged.unit_types[0], &flagged.unit_types[1], &hills);
        assert_eq!(defense_power(&flagged, &w).unwrap(), 30);
    }

    #[test]
    fn test_extras_pools_compound() {
        let river = TerrainExtra {
            id: "river".into(),
            name: "River".into(),
            defense_bonus: 25,
            native_unit_classes: vec!["Land".into()],
            flags: vec![NATURAL_DEFENSE_FLAG.into()],
        };
        let fortress = TerrainExtra {
            id: "fortress".into(),
            name: "Fortress".into(),
            defense_bonus: 100,
            native_unit_classes: vec!["Land".into()],
            flags: vec![],
        };
        // (25 + 100) * (100 + 100) / 100 - 100
        assert_eq!(extras_defense_bonus(&[&river, &fortress], "Land"), 150);
        assert_eq!(extras_defense_bonus(&[&river, &fortress], "Sea"), 0);
    }

    #[test]
    fn test_land_bombardment_sets_firepower_to_one() {
        let mut a = unit("a", 1, 1, &[]);
        a.firepower = 2;
        a.class = "Sea".into();
        let mut d = unit("d", 1, 1, &[]);
        d.firepower = 2;
        let rules = ruleset(vec![a, d], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);

        assert_eq!(firepower(&rules, &w).unwrap(), (1, 1));
        w.defender_meta.in_city = true;
        assert_eq!(firepower(&rules, &w).unwrap(), (2, 2));
    }

    #[test]
    fn test_bad_city_defender() {
        let rules = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 1, &["BadCityDefender"])], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.defender_meta.in_city = true;
        assert_eq!(firepower(&rules, &w).unwrap(), (2, 1));
    }

    #[test]
    fn test_four_versus_two() {
        let rules = ruleset(vec![unit("a", 4, 1, &[]), unit("d", 1, 2, &[])], &[]);
        let terrain = grassland();
        let w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);

        let (att, def) = calculate_combat(&rules, &w).unwrap();
        assert!(att.win_chance > 0.9, "{}", att.win_chance);
        assert!((att.win_chance + def.win_chance - 1.0).abs() < 1e-9);

        let att_mass: f64 = att.hp_chances.iter().map(|c| c.probability).sum();
        let def_mass: f64 = def.hp_chances.iter().map(|c| c.probability).sum();
        assert!((att_mass - 1.0).abs() < 1e-9);
        assert!((def_mass - 1.0).abs() < 1e-9);
        assert_eq!(att.hp_chances.last().unwrap().hp, 0);
    }

    #[test]
    fn test_veteran_level_scales_power() {
        let rules = ruleset(vec![unit("a", 4, 1, &[]), unit("d", 1, 2, &[])], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.attacker.veteran_level = 1;
        assert_eq!(attack_power(&rules, &w).unwrap(), 60);

        w.attacker.veteran_level = 5;
        assert!(matches!(
            attack_power(&rules, &w),
            Err(FcError::UnknownEntity { kind: "veteran level", .. })
        ));
    }

    #[test]
    fn test_zero_attack_cannot_win() {
        let rules = ruleset(vec![unit("a", 0, 1, &[]), unit("d", 1, 2, &[])], &[]);
        let terrain = grassland();
        let w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        let (att, def) = calculate_combat(&rules, &w).unwrap();
        assert_eq!(att.win_chance, 0.0);
        assert!((def.win_chance - 1.0).abs() < 1e-12);
        assert!((att.average_lost_hp - 10.0).abs() < 1e-9);
        assert!(def.average_lost_hp.abs() < 1e-9);
    }

    #[test]
    fn test_zero_firepower() {
        let mut a = unit("a", 1, 1, &[]);
        a.firepower = 0;
        let rules = ruleset(vec![a, unit("d", 1, 1, &[])], &[]);
        let terrain = grassland();
        let w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);

        let (att, def) = calculate_combat(&rules, &w).unwrap();
        assert_eq!(att.win_chance, 0.0);
        assert_eq!(def.win_chance, 1.0);
        assert!(att.hp_chances.iter().all(|c| c.probability.is_finite()));
    }

    #[test]
    fn test_degenerate_combat() {
        let mut a = unit("a", 0, 0, &[]);
        a.firepower = 0;
        let mut d = unit("d", 0, 0, &[]);
        d.firepower = 0;
        let rules = ruleset(vec![a, d], &[]);
        let terrain = grassland();
        let w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        assert!(matches!(
            calculate_combat(&rules, &w),
            Err(FcError::DegenerateCombat(_))
        ));
    }

    #[test]
    fn test_zero_hp_is_rejected() {
        let rules = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 1, &[])], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.defender.hp = 0;
        assert!(matches!(calculate_combat(&rules, &w), Err(FcError::InvalidInput(_))));
    }

    #[test]
    fn test_hp_above_unit_maximum_is_rejected() {
        let rules = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 1, &[])], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.defender.hp = 11;
        assert!(matches!(calculate_combat(&rules, &w), Err(FcError::InvalidInput(_))));

        w.defender.hp = 10;
        w.attacker.hp = (1 << 32) + 1;
        assert!(matches!(attack_power(&rules, &w), Err(FcError::InvalidInput(_))));
    }

    #[test]
    fn test_rounds_to_kill_does_not_truncate() {
        assert_eq!(rounds_to_kill(10, 3).unwrap(), 4);
        assert_eq!(rounds_to_kill(9, 3).unwrap(), 3);
        assert!(rounds_to_kill((1 << 32) + 1, 1).is_err());
        assert_eq!(rounds_to_kill(i64::MAX, i64::MAX).unwrap(), 1);
    }

    #[test]
    fn test_single_round_fight() {
        let rules = ruleset(vec![unit("a", 1, 1, &[]), unit("d", 1, 1, &[])], &[]);
        let terrain = grassland();
        let mut w = world(&rules.unit_types[0], &rules.unit_types[1], &terrain);
        w.attacker.hp = 1;
        w.defender.hp = 1;

        let (att, def) = calculate_combat(&rules, &w).unwrap();
        assert!((att.win_chance - 0.5).abs() < 1e-12);
        assert_eq!(att.hp_chances.len(), 2);
        assert!((att.average_lost_hp - 0.5).abs() < 1e-12);
        assert!((att.lost_hp_std_error - 0.5).abs() < 1e-12);
        assert!((def.win_chance - 0.5).abs() < 1e-12);
    }
}
