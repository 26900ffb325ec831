//! Test fixtures and helpers.
//!
//! A small but complete ruleset in the shape of the classic rulesets, plus
//! builders for combat, incite and bribe scenarios on top of it.

use std::io;
use std::path::Path;

use fc_core::combat::{AttackerState, DefenderMeta, DefenderState, WorldState};
use fc_core::costs::{BribedUnit, CitizenBreakdown, IncitedCity, OriginalOwner};
use fc_core::map::{Coordinates, MapSize};
use fc_core::ruleset::{load_ruleset, parse_ruleset, Ruleset, RulesetSources};
use fc_core::settings::GameSettings;

/// `effects.ruleset`
pub const EFFECTS: &str = r#"
; Defense effects
[effect_city_walls]
type    = "Defend_Bonus"
value   = 100
reqs    =
    { "type", "name", "range"
      "Building", "City Walls", "City"
      "UnitClass", "Land", "Local"
    }

[effect_great_wall]
type    = "Defend_Bonus"
value   = 100
reqs    =
    { "type", "name", "range", "present"
      "Building", "Great Wall", "Player", TRUE
      "Building", "City Walls", "City", FALSE
      "UnitClass", "Land", "Local", TRUE
    }

[effect_coastal_defense]
type    = "Defend_Bonus"
value   = 100
reqs    =
    { "type", "name", "range"
      "Building", "Coastal Defense", "City"
      "UnitClass", "Sea", "Local"
    }

[effect_fortified]
type    = "Fortify_Defense_Bonus"
value   = 50
reqs    =
    { "type", "name", "range", "present"
      "Activity", "Fortified", "Local", TRUE
      "UnitClassFlag", "CanFortify", "Local", TRUE
      "UnitFlag", "Cant_Fortify", "Local", FALSE
      "CityTile", "Center", "Local", FALSE
    }

[effect_city_fortified]
type    = "Fortify_Defense_Bonus"
value   = 50
reqs    =
    { "type", "name", "range"
      "CityTile", "Center", "Local"
      "UnitClassFlag", "CanFortify", "Local"
    }

[effect_large_city_defense]
type    = "Fortify_Defense_Bonus"
value   = 25
reqs    =
    { "type", "name", "range"
      "CityTile", "Center", "Local"
      "MinSize", "9", "City"
    }

# Incite effects
[effect_courthouse_incite]
type    = "Incite_Cost_Pct"
value   = 300
reqs    =
    { "type", "name", "range"
      "Building", "Courthouse", "City"
    }

[effect_democracy_incite]
type    = "Incite_Cost_Pct"
value   = 200
reqs    =
    { "type", "name", "range"
      "Gov", "Democracy", "Player"
    }
"#;

/// `units.ruleset`
pub const UNITS: &str = r#"
[veteran_system]
veteran_names = _("green"), _("veteran"), _("hardened"), _("elite")
veteran_power_fact = 100, 150, 175, 200
veteran_base_raise_chance = 50, 33, 20, 0
veteran_move_bonus = 0, 0, 0, 0

[unitclass_land]
name  = _("?unitclass:Land")
flags = "TerrainDefense", "CanFortify"

[unitclass_big_land]
name  = _("Big Land")
flags = "TerrainDefense"

[unitclass_sea]
name  = _("?unitclass:Sea")
flags = ""

[unit_warriors]
name       = _("Warriors")
class      = "Land"
build_cost = 10
attack     = 1
defense    = 1
firepower  = 1
hitpoints  = 10
move_rate  = 1
flags      = ""

[unit_phalanx]
name       = _("Phalanx")
class      = "Land"
build_cost = 20
attack     = 1
defense    = 2
firepower  = 1
hitpoints  = 10
move_rate  = 1

[unit_archers]
name       = _("Archers")
class      = "Land"
build_cost = 30
attack     = 3
defense    = 2
firepower  = 1
hitpoints  = 10
move_rate  = 1

[unit_horsemen]
name       = _("Horsemen")
class      = "Land"
build_cost = 20
attack     = 2
defense    = 1
firepower  = 1
hitpoints  = 10
move_rate  = 2
flags      = "Horse"

[unit_pikemen]
name       = _("Pikemen")
class      = "Land"
build_cost = 20
attack     = 1
defense    = 2
firepower  = 1
hitpoints  = 10
move_rate  = 1
bonuses    =
    { "flag", "type", "value"
      "Horse", "DefenseMultiplier", 1
    }

[unit_catapult]
name       = _("Catapult")
class      = "Big Land"
build_cost = 40
attack     = 6
defense    = 1
firepower  = 1
hitpoints  = 10
move_rate  = 1
flags      = "BadCityDefender"

[unit_trireme]
name       = _("Trireme")
class      = "Sea"
build_cost = 40
attack     = 1
defense    = 1
firepower  = 1
hitpoints  = 10
move_rate  = 3
flags      = "BadCityDefender"

[unit_musketeers]
name       = _("Musketeers")
class      = "Land"
build_cost = 30
attack     = 3
defense    = 3
firepower  = 1
hitpoints  = 20
move_rate  = 1
veteran_names = _("green"), _("veteran")
veteran_power_fact = 100, 150
veteran_base_raise_chance = 50, 33
veteran_move_bonus = 0, 3
"#;

/// `terrain.ruleset`
pub const TERRAIN: &str = r#"
[parameters]
move_fragments = 9

[terrain_grassland]
name          = _("Grassland")
defense_bonus = 0
native_to     = "Land", "Big Land"

[terrain_hills]
name          = _("Hills")
defense_bonus = 50
native_to     = "Land", "Big Land"

[terrain_mountains]
name          = _("Mountains")
defense_bonus = 100
native_to     = "Land"

[terrain_ocean]
name          = _("Ocean")
defense_bonus = 0
native_to     = "Sea"

[extra_river]
name          = _("River")
defense_bonus = 25
native_to     = "Land", "Big Land", "Sea"
flags         = "NaturalDefense", "NativeTile"

[extra_fortress]
name          = _("Fortress")
defense_bonus = 100
native_to     = "Land", "Big Land"

[extra_road]
name          = _("Road")
native_to     = "Land", "Big Land"
"#;

/// `game.ruleset`
pub const GAME: &str = r#"
[civstyle]
base_bribe_cost = 750

[incite_cost]
base_incite_cost   = 1000
improvement_factor = 1
unit_factor        = 2
total_factor       = 100

[settings]
set =
    { "name", "value"
      "topology", "WRAPX|ISO"
      "shieldbox", 100
      "killstack", FALSE
    }
"#;

/// `buildings.ruleset`
pub const BUILDINGS: &str = r#"
[building_city_walls]
name       = _("City Walls")
build_cost = 60

[building_coastal_defense]
name       = _("Coastal Defense")
build_cost = 60

[building_courthouse]
name       = _("Courthouse")
build_cost = 60

[building_great_wall]
name       = _("Great Wall")
build_cost = 180

[building_palace]
name       = _("Palace")
build_cost = 70
"#;

/// `cities.ruleset`
pub const CITIES: &str = r#"
[parameters]
celebrate_size_limit = 3

[citizen]
nationality = FALSE
"#;

/// Server settings file.
pub const SETTINGS: &str = "\
# server settings
set aifill 7
set shieldbox 80
set mapsize FULLSIZE
set size 4 # thousands of tiles
";

/// Per-game players file.
pub const PLAYERS: &str = "\
set shieldbox 70
set landmass 40
";

/// The six ruleset files with their on-disk names.
pub const RULESET_FILES: [(&str, &str); 6] = [
    ("effects.ruleset", EFFECTS),
    ("units.ruleset", UNITS),
    ("terrain.ruleset", TERRAIN),
    ("game.ruleset", GAME),
    ("buildings.ruleset", BUILDINGS),
    ("cities.ruleset", CITIES),
];

/// Sources of the sample ruleset.
#[must_use]
pub fn sample_sources() -> RulesetSources<'static> {
    RulesetSources {
        effects: EFFECTS,
        units: UNITS,
        terrain: TERRAIN,
        game: GAME,
        buildings: BUILDINGS,
        cities: CITIES,
    }
}

/// The parsed sample ruleset.
///
/// # Panics
///
/// Panics if the embedded ruleset fails to load.
#[must_use]
pub fn sample_ruleset() -> Ruleset {
    parse_ruleset(&sample_sources()).expect("sample ruleset must load")
}

/// The sample ruleset and the settings from [`SETTINGS`] and [`PLAYERS`].
///
/// # Panics
///
/// Panics if the embedded ruleset fails to load.
#[must_use]
pub fn sample_game() -> (Ruleset, GameSettings) {
    load_ruleset(&sample_sources(), SETTINGS, PLAYERS).expect("sample game must load")
}

/// Write the six sample ruleset files into `dir`.
pub fn write_sample_ruleset(dir: &Path) -> io::Result<()> {
    for (name, text) in RULESET_FILES {
        std::fs::write(dir.join(name), text)?;
    }
    Ok(())
}

/// A fight between two full-health green units on open terrain.
///
/// The attacker has its full move allowance.
///
/// # Panics
///
/// Panics if an id is not in the ruleset.
#[must_use]
pub fn world<'r>(ruleset: &'r Ruleset, attacker: &str, defender: &str, terrain: &str) -> WorldState<'r> {
    let attacker = ruleset.unit_type(attacker).expect("unknown attacker");
    let defender = ruleset.unit_type(defender).expect("unknown defender");
    let terrain = ruleset.terrain(terrain).expect("unknown terrain");

    WorldState {
        attacker: AttackerState {
            unit_type: attacker,
            veteran_level: 0,
            hp: attacker.hitpoints,
            moves: attacker.move_rate * ruleset.move_frags,
        },
        defender: DefenderState {
            unit_type: defender,
            veteran_level: 0,
            hp: defender.hitpoints,
            fortified: false,
        },
        defender_meta: DefenderMeta {
            terrain,
            in_city: false,
            city_size: 0,
            extras: Vec::new(),
            buildings: Vec::new(),
            wonders: Vec::new(),
        },
    }
}

/// Put the defender of `world` into a city of `size` with the named
/// buildings.
#[must_use]
pub fn in_city<'r>(mut world: WorldState<'r>, size: i64, buildings: &[&'r str]) -> WorldState<'r> {
    world.defender_meta.in_city = true;
    world.defender_meta.city_size = size;
    world.defender_meta.buildings = buildings.to_vec();
    world
}

/// A content size-8 city next to its capital, owned by its founder.
#[must_use]
pub fn content_city<'r>() -> IncitedCity<'r> {
    IncitedCity {
        owner_gold: 100,
        units: Vec::new(),
        buildings: Vec::new(),
        size: 8,
        citizens: CitizenBreakdown {
            happy: 2,
            content: 6,
            unhappy: 0,
            angry: 0,
        },
        original_owner: Some(OriginalOwner::CurrentOwner),
        nationality: None,
        position: Coordinates::new(10, 10),
        capital: Some(Coordinates::new(10, 10)),
        map_size: MapSize { xsize: 54, ysize: 72 },
    }
}

/// A full-health green unit of `unit_type` two tiles from its capital.
///
/// # Panics
///
/// Panics if the id is not in the ruleset.
#[must_use]
pub fn bribed_unit<'r>(ruleset: &'r Ruleset, unit_type: &str) -> BribedUnit<'r> {
    let unit_type = ruleset.unit_type(unit_type).expect("unknown unit type");
    BribedUnit {
        unit_type,
        veteran_level: 0,
        hp: unit_type.hitpoints,
        owner_gold: 100,
        position: Coordinates::new(12, 10),
        capital: Some(Coordinates::new(10, 10)),
        map_size: MapSize { xsize: 54, ysize: 72 },
    }
}
