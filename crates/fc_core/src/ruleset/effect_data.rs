//! Effects and the requirements that gate them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scope at which a requirement is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementRange {
    /// No particular scope.
    None,
    /// The unit or tile itself.
    Local,
    /// Cardinally adjacent tiles.
    CAdjacent,
    /// Adjacent tiles.
    Adjacent,
    /// The city.
    City,
    /// The continent.
    Continent,
    /// The owning player.
    Player,
    /// The owning player and allies.
    Allied,
    /// Every player.
    World,
}

impl RequirementRange {
    /// All ranges, in ruleset order.
    pub const ALL: [Self; 9] = [
        Self::None,
        Self::Local,
        Self::CAdjacent,
        Self::Adjacent,
        Self::City,
        Self::Continent,
        Self::Player,
        Self::Allied,
        Self::World,
    ];

    /// Lower-case ruleset name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Local => "local",
            Self::CAdjacent => "cadjacent",
            Self::Adjacent => "adjacent",
            Self::City => "city",
            Self::Continent => "continent",
            Self::Player => "player",
            Self::Allied => "allied",
            Self::World => "world",
        }
    }

    /// Parse a range name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(name))
    }
}

impl Default for RequirementRange {
    fn default() -> Self {
        Self::Local
    }
}

impl fmt::Display for RequirementRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One condition gating an effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement kind (`Building`, `UnitClass`, ...).
    #[serde(rename = "type")]
    pub req_type: String,
    /// Subject of the requirement; its meaning depends on the kind.
    pub name: String,
    /// Scope at which the requirement is checked.
    pub range: RequirementRange,
    /// `false` inverts the requirement.
    pub present: bool,
}

impl Default for Requirement {
    fn default() -> Self {
        Self {
            req_type: String::new(),
            name: String::new(),
            range: RequirementRange::Local,
            present: true,
        }
    }
}

/// A conditional numeric bonus (`[effect_*]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Section suffix.
    pub id: String,
    /// Effect kind (`Defend_Bonus`, `Incite_Cost_Pct`, ...).
    #[serde(rename = "type")]
    pub effect_type: String,
    /// Signed amount contributed when every requirement passes.
    pub value: i64,
    /// Conjunctive requirement list.
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_names_ignore_case() {
        assert_eq!(RequirementRange::from_name("City"), Some(RequirementRange::City));
        assert_eq!(RequirementRange::from_name("CAdjacent"), Some(RequirementRange::CAdjacent));
        assert_eq!(RequirementRange::from_name("WORLD"), Some(RequirementRange::World));
        assert_eq!(RequirementRange::from_name("Tile"), None);
    }

    #[test]
    fn test_every_range_round_trips_its_name() {
        for range in RequirementRange::ALL {
            assert_eq!(RequirementRange::from_name(range.as_str()), Some(range));
        }
    }
}
