//! Turning parsed documents into ruleset records.
//!
//! One function per ruleset file. Entities live in sections named
//! `<prefix><id>`; required entries missing from a section fail the whole
//! file.

use crate::error::ExtractionError;
use crate::ini::{Document, Scalar, Section, Table, Value};
use crate::ruleset::city_data::{Building, CitizenSettings, CityParameters, InciteCosts};
use crate::ruleset::effect_data::{Effect, Requirement, RequirementRange};
use crate::ruleset::terrain_data::{Terrain, TerrainExtra};
use crate::ruleset::unit_data::{UnitClass, UnitType, UnitTypeBonus, VeteranLevel};
use crate::settings::SettingsOverrides;

type Result<T> = std::result::Result<T, ExtractionError>;

/// File names used in errors.
pub const EFFECTS_FILE: &str = "effects.ruleset";
/// See [`EFFECTS_FILE`].
pub const UNITS_FILE: &str = "units.ruleset";
/// See [`EFFECTS_FILE`].
pub const TERRAIN_FILE: &str = "terrain.ruleset";
/// See [`EFFECTS_FILE`].
pub const GAME_FILE: &str = "game.ruleset";
/// See [`EFFECTS_FILE`].
pub const BUILDINGS_FILE: &str = "buildings.ruleset";
/// See [`EFFECTS_FILE`].
pub const CITIES_FILE: &str = "cities.ruleset";

/// Drop a leading `?context:` qualifier from a translatable name.
#[must_use]
pub fn clean_translatable_name(name: &str) -> &str {
    match name.strip_prefix('?') {
        Some(rest) => rest.split_once(':').map_or(name, |(_, tail)| tail),
        None => name,
    }
}

/// Resolve backslash escapes: `\x` becomes `x`.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn display_name(raw: &str) -> String {
    unescape(clean_translatable_name(raw))
}

fn find_section<'d>(doc: &'d Document, file: &str, name: &str) -> Result<&'d Section> {
    doc.section(name).ok_or_else(|| ExtractionError::MissingSection {
        file: file.to_string(),
        section: name.to_string(),
    })
}

/// Typed access to the entries of one section.
struct Fields<'s> {
    section: &'s Section,
}

impl<'s> Fields<'s> {
    fn new(section: &'s Section) -> Self {
        Self { section }
    }

    fn wrong_type(&self, field: &str, expected: &'static str) -> ExtractionError {
        ExtractionError::WrongType {
            section: self.section.name.clone(),
            field: field.to_string(),
            expected,
        }
    }

    fn optional(&self, field: &str) -> Option<&'s Value> {
        self.section.entry(field).map(|e| &e.value)
    }

    fn required(&self, field: &str) -> Result<&'s Value> {
        self.optional(field)
            .ok_or_else(|| ExtractionError::MissingField {
                section: self.section.name.clone(),
                field: field.to_string(),
            })
    }

    fn scalar_string(&self, field: &str, scalar: &Scalar) -> Result<String> {
        scalar
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }

    fn scalar_int(&self, field: &str, scalar: &Scalar) -> Result<i64> {
        let n = scalar
            .as_number()
            .ok_or_else(|| self.wrong_type(field, "a number"))?;
        if n.fract() != 0.0 {
            return Err(ExtractionError::NotAnInteger {
                section: self.section.name.clone(),
                field: field.to_string(),
                value: n,
            });
        }
        Ok(n as i64)
    }

    fn single<'v>(&self, field: &str, value: &'v Value, expected: &'static str) -> Result<&'v Scalar> {
        value.as_scalar().ok_or_else(|| self.wrong_type(field, expected))
    }

    fn string(&self, field: &str) -> Result<String> {
        let value = self.required(field)?;
        self.scalar_string(field, self.single(field, value, "a string")?)
    }

    fn name(&self) -> Result<String> {
        self.string("name").map(|raw| display_name(&raw))
    }

    fn int(&self, field: &str) -> Result<i64> {
        let value = self.required(field)?;
        self.scalar_int(field, self.single(field, value, "a number")?)
    }

    fn optional_int(&self, field: &str) -> Result<i64> {
        match self.optional(field) {
            Some(value) => self.scalar_int(field, self.single(field, value, "a number")?),
            None => Ok(0),
        }
    }

    fn bool(&self, field: &str) -> Result<bool> {
        let value = self.required(field)?;
        self.single(field, value, "a boolean")?
            .as_bool()
            .ok_or_else(|| self.wrong_type(field, "a boolean"))
    }

    fn list<'v>(&self, field: &str, value: &'v Value) -> Result<&'v [Scalar]> {
        value.as_list().ok_or_else(|| self.wrong_type(field, "a list"))
    }

    fn strings(&self, field: &str) -> Result<Vec<String>> {
        let value = self.required(field)?;
        self.list(field, value)?
            .iter()
            .map(|s| self.scalar_string(field, s))
            .collect()
    }

    fn ints(&self, field: &str) -> Result<Vec<i64>> {
        let value = self.required(field)?;
        self.list(field, value)?
            .iter()
            .map(|s| self.scalar_int(field, s))
            .collect()
    }

    /// Optional string list with empty strings dropped.
    fn flags(&self, field: &str) -> Result<Vec<String>> {
        if self.optional(field).is_none() {
            return Ok(Vec::new());
        }
        let mut flags = self.strings(field)?;
        flags.retain(|f| !f.is_empty());
        Ok(flags)
    }

    fn table(&self, field: &str, value: &'s Value) -> Result<&'s Table> {
        value.as_table().ok_or_else(|| self.wrong_type(field, "a table"))
    }

    fn malformed(&self, field: &str, message: impl Into<String>) -> ExtractionError {
        ExtractionError::MalformedTable {
            section: self.section.name.clone(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Index of a column that must exist.
    fn column(&self, field: &str, table: &Table, column: &str) -> Result<usize> {
        table
            .column(column)
            .ok_or_else(|| self.malformed(field, format!("no '{column}' column")))
    }

    fn cell<'t>(&self, field: &str, row: &'t [Scalar], index: usize) -> Result<&'t Scalar> {
        row.get(index)
            .ok_or_else(|| self.malformed(field, format!("row has no column {}", index + 1)))
    }
}

/// Zip the four veteran arrays of a section into levels.
fn veteran_levels(fields: &Fields<'_>) -> Result<Vec<VeteranLevel>> {
    let names = fields.strings("veteran_names")?;
    let power_factors = fields.ints("veteran_power_fact")?;
    let raise_chances = fields.ints("veteran_base_raise_chance")?;
    let move_bonuses = fields.ints("veteran_move_bonus")?;

    let len = names.len();
    if power_factors.len() != len || raise_chances.len() != len || move_bonuses.len() != len {
        return Err(ExtractionError::VeteranLevelMismatch {
            section: fields.section.name.clone(),
        });
    }

    Ok(names
        .iter()
        .zip(power_factors)
        .zip(raise_chances)
        .zip(move_bonuses)
        .map(|(((name, power_factor), base_raise_chance), move_bonus)| VeteranLevel {
            name: display_name(name),
            power_factor,
            base_raise_chance,
            move_bonus,
        })
        .collect())
}

fn unit_bonuses(fields: &Fields<'_>) -> Result<Vec<UnitTypeBonus>> {
    const FIELD: &str = "bonuses";
    let Some(value) = fields.optional(FIELD) else {
        return Ok(Vec::new());
    };
    let table = fields.table(FIELD, value)?;
    if table.rows.is_empty() {
        return Ok(Vec::new());
    }

    let flag_col = fields.column(FIELD, table, "flag")?;
    let type_col = fields.column(FIELD, table, "type")?;
    let value_col = fields.column(FIELD, table, "value")?;

    table
        .rows
        .iter()
        .map(|row| {
            Ok(UnitTypeBonus {
                flag: fields.scalar_string("flag", fields.cell(FIELD, row, flag_col)?)?,
                bonus_type: fields.scalar_string("type", fields.cell(FIELD, row, type_col)?)?,
                value: fields.scalar_int("value", fields.cell(FIELD, row, value_col)?)?,
            })
        })
        .collect()
}

fn unit_type(id: &str, section: &Section) -> Result<UnitType> {
    let fields = Fields::new(section);

    let veteran_levels = if fields.optional("veteran_names").is_some() {
        veteran_levels(&fields)?
    } else {
        Vec::new()
    };

    Ok(UnitType {
        id: id.to_string(),
        name: fields.name()?,
        class: fields.string("class")?,
        build_cost: fields.int("build_cost")?,
        attack: fields.int("attack")?,
        defense: fields.int("defense")?,
        firepower: fields.int("firepower")?,
        hitpoints: fields.int("hitpoints")?,
        move_rate: fields.int("move_rate")?,
        flags: fields.flags("flags")?,
        bonuses: unit_bonuses(&fields)?,
        veteran_levels,
    })
}

/// Unit classes, unit types and the default veteran levels.
///
/// Unit types without their own veteran levels receive a copy of the
/// `[veteran_system]` levels.
pub fn extract_units(
    doc: &Document,
) -> Result<(Vec<UnitClass>, Vec<UnitType>, Vec<VeteranLevel>)> {
    let classes = doc
        .sections_with_prefix("unitclass_")
        .map(|(id, section)| {
            let fields = Fields::new(section);
            Ok(UnitClass {
                id: id.to_string(),
                name: fields.name()?,
                flags: fields.flags("flags")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut units = doc
        .sections_with_prefix("unit_")
        .map(|(id, section)| unit_type(id, section))
        .collect::<Result<Vec<_>>>()?;

    let veteran_system = find_section(doc, UNITS_FILE, "veteran_system")?;
    let default_levels = veteran_levels(&Fields::new(veteran_system))?;

    for unit in units.iter_mut().filter(|u| u.veteran_levels.is_empty()) {
        unit.veteran_levels.clone_from(&default_levels);
    }

    tracing::debug!(
        classes = classes.len(),
        units = units.len(),
        veteran_levels = default_levels.len(),
        "extracted units"
    );
    Ok((classes, units, default_levels))
}

/// Convert a `reqs` table into requirements, column by column.
///
/// A row shorter than the heading keeps defaults for the missing columns,
/// unless it ends before both a type and a name were read.
fn requirements(fields: &Fields<'_>, table: &Table) -> Result<Vec<Requirement>> {
    if table.heading.is_empty() || table.rows.is_empty() {
        return Ok(Vec::new());
    }

    table
        .rows
        .iter()
        .map(|row| {
            let mut req = Requirement::default();
            for (i, column) in table.heading.iter().enumerate() {
                let Some(cell) = row.get(i) else {
                    if req.req_type.is_empty() && req.name.is_empty() {
                        return Err(ExtractionError::EmptyRequirement {
                            section: fields.section.name.clone(),
                        });
                    }
                    break;
                };

                match column.as_str() {
                    "type" => req.req_type = fields.scalar_string("type", cell)?,
                    "name" => req.name = unescape(&fields.scalar_string("name", cell)?),
                    "range" => {
                        let text = fields.scalar_string("range", cell)?;
                        req.range = RequirementRange::from_name(&text).ok_or_else(|| {
                            ExtractionError::InvalidRange {
                                section: fields.section.name.clone(),
                                value: text.clone(),
                            }
                        })?;
                    }
                    "present" => {
                        req.present = cell
                            .as_bool()
                            .ok_or_else(|| fields.wrong_type("present", "a boolean"))?;
                    }
                    _ => {}
                }
            }
            Ok(req)
        })
        .collect()
}

/// Every `[effect_*]` section.
pub fn extract_effects(doc: &Document) -> Result<Vec<Effect>> {
    let effects = doc
        .sections_with_prefix("effect_")
        .map(|(id, section)| {
            let fields = Fields::new(section);
            let requirements = match fields.optional("reqs") {
                Some(value) => requirements(&fields, fields.table("reqs", value)?)?,
                None => Vec::new(),
            };
            Ok(Effect {
                id: id.to_string(),
                effect_type: fields.string("type")?,
                value: fields.int("value")?,
                requirements,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(effects = effects.len(), "extracted effects");
    Ok(effects)
}

/// Terrain types, tile extras and `move_fragments`.
pub fn extract_terrain(doc: &Document) -> Result<(Vec<Terrain>, Vec<TerrainExtra>, i64)> {
    let terrains = doc
        .sections_with_prefix("terrain_")
        .map(|(id, section)| {
            let fields = Fields::new(section);
            Ok(Terrain {
                id: id.to_string(),
                name: fields.name()?,
                defense_bonus: fields.int("defense_bonus")?,
                native_unit_classes: fields.flags("native_to")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let extras = doc
        .sections_with_prefix("extra_")
        .map(|(id, section)| {
            let fields = Fields::new(section);
            Ok(TerrainExtra {
                id: id.to_string(),
                name: fields.name()?,
                defense_bonus: fields.optional_int("defense_bonus")?,
                native_unit_classes: fields.flags("native_to")?,
                flags: fields.flags("flags")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let parameters = find_section(doc, TERRAIN_FILE, "parameters")?;
    let move_frags = Fields::new(parameters).int("move_fragments")?;

    tracing::debug!(
        terrains = terrains.len(),
        extras = extras.len(),
        move_frags,
        "extracted terrain"
    );
    Ok((terrains, extras, move_frags))
}

/// Render a table cell the way a settings file would spell it.
fn setting_value(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => s.clone(),
        Scalar::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        Scalar::Number(n) => n.to_string(),
        Scalar::Bool(true) => "TRUE".to_string(),
        Scalar::Bool(false) => "FALSE".to_string(),
    }
}

fn ruleset_settings(doc: &Document) -> Result<SettingsOverrides> {
    const FIELD: &str = "set";
    let mut overrides = SettingsOverrides::new();

    let Some(section) = doc.section("settings") else {
        return Ok(overrides);
    };
    let fields = Fields::new(section);
    let Some(value) = fields.optional(FIELD) else {
        return Ok(overrides);
    };
    let table = fields.table(FIELD, value)?;

    let name_col = fields.column(FIELD, table, "name")?;
    let value_col = fields.column(FIELD, table, "value")?;
    for row in &table.rows {
        let name = fields.scalar_string("name", fields.cell(FIELD, row, name_col)?)?;
        let value = setting_value(fields.cell(FIELD, row, value_col)?);
        overrides.push(name, value);
    }
    Ok(overrides)
}

/// Incite/bribe constants and the ruleset's own settings overrides.
pub fn extract_game(doc: &Document) -> Result<(InciteCosts, SettingsOverrides)> {
    let incite = Fields::new(find_section(doc, GAME_FILE, "incite_cost")?);
    let civstyle = Fields::new(find_section(doc, GAME_FILE, "civstyle")?);

    let costs = InciteCosts {
        base_incite_cost: incite.int("base_incite_cost")?,
        improvement_factor: incite.int("improvement_factor")?,
        unit_factor: incite.int("unit_factor")?,
        total_factor: incite.int("total_factor")?,
        base_bribe_cost: civstyle.int("base_bribe_cost")?,
    };

    let overrides = ruleset_settings(doc)?;
    tracing::debug!(settings = overrides.len(), "extracted game constants");
    Ok((costs, overrides))
}

/// Every `[building_*]` section.
pub fn extract_buildings(doc: &Document) -> Result<Vec<Building>> {
    let buildings = doc
        .sections_with_prefix("building_")
        .map(|(id, section)| {
            let fields = Fields::new(section);
            Ok(Building {
                id: id.to_string(),
                name: fields.name()?,
                build_cost: fields.int("build_cost")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(buildings = buildings.len(), "extracted buildings");
    Ok(buildings)
}

/// Celebration threshold and the citizen nationality switch.
pub fn extract_cities(doc: &Document) -> Result<(CityParameters, CitizenSettings)> {
    let parameters = Fields::new(find_section(doc, CITIES_FILE, "parameters")?);
    let citizen = Fields::new(find_section(doc, CITIES_FILE, "citizen")?);

    Ok((
        CityParameters {
            celebrate_size_limit: parameters.int("celebrate_size_limit")?,
        },
        CitizenSettings {
            nationality: citizen.bool("nationality")?,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini::parse_document;

    fn doc(text: &str) -> Document {
        parse_document(text, "test.ruleset").unwrap()
    }

    const UNITS: &str = r#"
[veteran_system]
veteran_names = _("green"), _("veteran"), _("hardened")
veteran_power_fact = 100, 150, 175
veteran_base_raise_chance = 50, 33, 20
veteran_move_bonus = 0, 0, 0

[unitclass_land]
name = _("?unitclass:Land")
flags = "TerrainDefense", "CanFortify"

[unit_warriors]
name = _("Warriors")
class = "Land"
build_cost = 10
attack = 1
defense = 1
firepower = 1
hitpoints = 10
move_rate = 1
flags = ""

[unit_elite]
name = _("Elite")
class = "Land"
build_cost = 30
attack = 3
defense = 2
firepower = 1
hitpoints = 10
move_rate = 1
flags = "Horse"
veteran_names = _("elite")
veteran_power_fact = 200
veteran_base_raise_chance = 0
veteran_move_bonus = 3
bonuses =
    { "flag", "type", "value"
      "Horse", "DefenseMultiplier", 1
    }
"#;

    #[test]
    fn test_clean_translatable_name() {
        assert_eq!(clean_translatable_name("?unitclass:Land"), "Land");
        assert_eq!(clean_translatable_name("?nocolon"), "?nocolon");
        assert_eq!(clean_translatable_name("Warriors"), "Warriors");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"back\\slash"), r"back\slash");
    }

    #[test]
    fn test_extract_units() {
        let (classes, units, defaults) = extract_units(&doc(UNITS)).unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].id, "land");
        assert_eq!(classes[0].name, "Land");

        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults[1].power_factor, 150);

        let warriors = &units[0];
        assert_eq!(warriors.id, "warriors");
        assert!(warriors.flags.is_empty(), "empty flag strings are dropped");
        assert_eq!(warriors.veteran_levels, defaults, "inherits the default levels");

        let elite = &units[1];
        assert_eq!(elite.veteran_levels.len(), 1);
        assert_eq!(elite.veteran_levels[0].move_bonus, 3);
        assert_eq!(elite.bonuses[0].bonus_type, "DefenseMultiplier");
    }

    #[test]
    fn test_missing_required_field_names_section_and_field() {
        let text = UNITS.replace("attack = 3\n", "");
        let err = extract_units(&doc(&text)).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingField {
                section: "unit_elite".into(),
                field: "attack".into(),
            }
        );
    }

    #[test]
    fn test_fractional_integer_is_rejected() {
        let text = UNITS.replace("build_cost = 10", "build_cost = 10.5");
        assert!(matches!(
            extract_units(&doc(&text)),
            Err(ExtractionError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_veteran_mismatch() {
        let text = UNITS.replace("veteran_move_bonus = 0, 0, 0", "veteran_move_bonus = 0, 0");
        assert_eq!(
            extract_units(&doc(&text)).unwrap_err(),
            ExtractionError::VeteranLevelMismatch {
                section: "veteran_system".into()
            }
        );
    }

    #[test]
    fn test_missing_veteran_system() {
        let err = extract_units(&doc("[unitclass_land]\nname = \"Land\"")).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingSection { section, .. } if section == "veteran_system"));
    }

    #[test]
    fn test_requirement_rows() {
        let effects = extract_effects(&doc(
            r#"
[effect_walls]
type = "Defend_Bonus"
value = 100
reqs =
    { "type", "name", "range", "present", "quiet"
      "Building", "City Walls", "City", TRUE, FALSE
      "UnitClass", "Land", "Local"
    }

[effect_plain]
type = "Fortify_Defense_Bonus"
value = -25
"#,
        ))
        .unwrap();

        assert_eq!(effects.len(), 2);
        let walls = &effects[0];
        assert_eq!(walls.requirements.len(), 2);
        assert_eq!(walls.requirements[0].range, RequirementRange::City);
        assert_eq!(walls.requirements[1].name, "Land");
        assert!(walls.requirements[1].present, "missing column keeps its default");
        assert_eq!(effects[1].value, -25);
        assert!(effects[1].requirements.is_empty());
    }

    #[test]
    fn test_invalid_range_is_error() {
        let err = extract_effects(&doc(
            "[effect_x]\ntype = \"Defend_Bonus\"\nvalue = 1\nreqs = { \"type\", \"name\", \"range\"\n \"Extra\", \"River\", \"Tile\" }",
        ))
        .unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidRange { value, .. } if value == "Tile"));
    }

    #[test]
    fn test_empty_requirement_row_is_error() {
        let err = extract_effects(&doc(
            "[effect_x]\ntype = \"Defend_Bonus\"\nvalue = 1\nreqs = { \"range\", \"type\", \"name\"\n \"Local\" }",
        ))
        .unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyRequirement { .. }));
    }

    #[test]
    fn test_present_must_be_boolean() {
        let err = extract_effects(&doc(
            "[effect_x]\ntype = \"Defend_Bonus\"\nvalue = 1\nreqs = { \"type\", \"name\", \"present\"\n \"Extra\", \"River\", \"yes\" }",
        ))
        .unwrap_err();
        assert!(matches!(err, ExtractionError::WrongType { field, .. } if field == "present"));
    }

    #[test]
    fn test_extract_game_with_settings_table() {
        let (costs, overrides) = extract_game(&doc(
            r#"
[incite_cost]
base_incite_cost = 1000
improvement_factor = 1
unit_factor = 2
total_factor = 100

[civstyle]
base_bribe_cost = 750

[settings]
set =
    { "name", "value"
      "topology", "WRAPX|ISO|HEX"
      "shieldbox", 50
      "killstack", FALSE
    }
"#,
        ))
        .unwrap();

        assert_eq!(costs.unit_factor, 2);
        assert_eq!(costs.base_bribe_cost, 750);
        let pairs: Vec<(&str, &str)> = overrides.iter().collect();
        assert_eq!(
            pairs,
            vec![("topology", "WRAPX|ISO|HEX"), ("shieldbox", "50"), ("killstack", "FALSE")]
        );
    }

    #[test]
    fn test_settings_table_needs_columns() {
        let err = extract_game(&doc(
            "[incite_cost]\nbase_incite_cost = 1\nimprovement_factor = 1\nunit_factor = 1\ntotal_factor = 1\n[civstyle]\nbase_bribe_cost = 1\n[settings]\nset = { \"setting\", \"value\"\n \"shieldbox\", 50 }",
        ))
        .unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedTable { .. }));
    }

    #[test]
    fn test_extract_terrain_and_extras() {
        let (terrains, extras, move_frags) = extract_terrain(&doc(
            r#"
[parameters]
move_fragments = 9

[terrain_hills]
name = _("Hills")
defense_bonus = 50
native_to = "Land", "Big Land"

[extra_river]
name = _("River")
defense_bonus = 25
native_to = "Land"
flags = "NaturalDefense"

[extra_road]
name = _("Road")
"#,
        ))
        .unwrap();

        assert_eq!(move_frags, 9);
        assert!(terrains[0].is_native_to("Big Land"));
        assert_eq!(extras[0].defense_bonus, 25);
        assert_eq!(extras[1].defense_bonus, 0);
        assert!(extras[1].flags.is_empty());
    }

    #[test]
    fn test_extract_cities() {
        let (params, citizens) = extract_cities(&doc(
            "[parameters]\ncelebrate_size_limit = 3\n[citizen]\nnationality = TRUE",
        ))
        .unwrap();
        assert_eq!(params.celebrate_size_limit, 3);
        assert!(citizens.nationality);
    }
}
