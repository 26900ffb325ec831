//! Unit types, unit classes and veteran levels.

use serde::{Deserialize, Serialize};

/// A named experience tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranLevel {
    /// Display name ("green", "veteran", ...).
    pub name: String,
    /// Percent multiplier on attack and defense strength.
    pub power_factor: i64,
    /// Percent chance to reach the next level after winning.
    pub base_raise_chance: i64,
    /// Extra move fragments granted at this level.
    pub move_bonus: i64,
}

/// One row of a unit type's `bonuses` table.
///
/// The bonus applies when the opposing unit carries `flag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTypeBonus {
    /// Opponent unit flag that triggers the bonus.
    pub flag: String,
    /// Bonus kind (`DefenseMultiplier`, `DefenseDividerPct`, `Firepower1`, ...).
    #[serde(rename = "type")]
    pub bonus_type: String,
    /// Bonus amount; meaning depends on the kind.
    pub value: i64,
}

/// A unit class (`[unitclass_*]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitClass {
    /// Section suffix.
    pub id: String,
    /// Class name, referenced by unit types and `native_to` lists.
    pub name: String,
    /// Class flags (`TerrainDefense`, `CanFortify`, ...).
    #[serde(default)]
    pub flags: Vec<String>,
}

impl UnitClass {
    /// Check if this class carries a flag.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

/// A unit type (`[unit_*]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitType {
    /// Section suffix.
    pub id: String,
    /// Display name with any `?context:` prefix removed.
    pub name: String,
    /// Name of the [`UnitClass`] this unit belongs to.
    pub class: String,
    /// Shield cost before the shieldbox setting is applied.
    pub build_cost: i64,
    /// Base attack strength.
    pub attack: i64,
    /// Base defense strength.
    pub defense: i64,
    /// Damage dealt per won combat round.
    pub firepower: i64,
    /// Maximum hit points, always positive.
    pub hitpoints: i64,
    /// Whole moves per turn.
    pub move_rate: i64,
    /// Unit flags (`CityBuster`, `BadCityDefender`, ...).
    #[serde(default)]
    pub flags: Vec<String>,
    /// Combat bonuses against units with particular flags.
    #[serde(default)]
    pub bonuses: Vec<UnitTypeBonus>,
    /// Veteran levels; the ruleset default list when the section has none.
    pub veteran_levels: Vec<VeteranLevel>,
}

impl UnitType {
    /// Check if this unit type carries a flag.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Veteran level by index, 0 being the lowest.
    #[must_use]
    pub fn veteran_level(&self, level: usize) -> Option<&VeteranLevel> {
        self.veteran_levels.get(level)
    }

    /// Sum of the values of all bonuses of `bonus_type` whose flag is one of
    /// `opponent_flags`.
    #[must_use]
    pub fn bonus_against(&self, bonus_type: &str, opponent_flags: &[String]) -> i64 {
        self.bonuses
            .iter()
            .filter(|b| b.bonus_type == bonus_type && opponent_flags.contains(&b.flag))
            .map(|b| b.value)
            .sum()
    }
}
