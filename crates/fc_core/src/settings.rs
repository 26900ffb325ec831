//! Server game settings and the flat `set <name> <value>` file format.
//!
//! Settings are layered: built-in defaults, then the ruleset's own
//! `[settings]` table, then the server settings file, then the players file.
//! Later layers override earlier ones name by name.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FcError, Result};

/// Map topology flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Topology {
    /// The map wraps east-west.
    pub wrap_x: bool,
    /// The map wraps north-south.
    pub wrap_y: bool,
    /// Isometric layout.
    pub iso: bool,
    /// Hexagonal tiles.
    pub hex: bool,
}

impl Topology {
    /// Parse a `|`-separated flag list such as `WRAPX|ISO`. An empty string
    /// means no flags.
    pub fn parse(value: &str) -> Result<Self> {
        let mut topology = Self::default();
        for flag in value.split('|').filter(|f| !f.is_empty()) {
            match flag {
                "WRAPX" => topology.wrap_x = true,
                "WRAPY" => topology.wrap_y = true,
                "ISO" => topology.iso = true,
                "HEX" => topology.hex = true,
                _ => {
                    return Err(FcError::InvalidSetting {
                        name: "topology".into(),
                        value: value.into(),
                    })
                }
            }
        }
        Ok(topology)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<&str> = [
            (self.wrap_x, "WRAPX"),
            (self.wrap_y, "WRAPY"),
            (self.iso, "ISO"),
            (self.hex, "HEX"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();
        f.write_str(&flags.join("|"))
    }
}

/// How the map dimensions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapSizeMode {
    /// From the `size` setting, in thousands of tiles.
    FullSize,
    /// From the number of players and tiles per player.
    Player,
    /// From explicit `xsize` and `ysize`.
    XySize,
}

impl MapSizeMode {
    /// Parse `FULLSIZE`, `PLAYER` or `XYSIZE`.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "FULLSIZE" => Ok(Self::FullSize),
            "PLAYER" => Ok(Self::Player),
            "XYSIZE" => Ok(Self::XySize),
            _ => Err(FcError::InvalidSetting {
                name: "mapsize".into(),
                value: value.into(),
            }),
        }
    }
}

/// The server settings the calculators depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Map topology.
    pub topology: Topology,
    /// Percent scaling of every shield cost.
    pub shieldbox: i64,
    /// Number of players the server fills up to.
    pub aifill: i64,
    /// Map sizing mode.
    pub mapsize: MapSizeMode,
    /// Map width for [`MapSizeMode::XySize`].
    pub xsize: i64,
    /// Map height for [`MapSizeMode::XySize`].
    pub ysize: i64,
    /// Map size in thousands of tiles for [`MapSizeMode::FullSize`].
    pub size: i64,
    /// Land tiles per player for [`MapSizeMode::Player`].
    pub tilesperplayer: i64,
    /// Percent of the map that is land.
    pub landmass: i64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            topology: Topology {
                wrap_x: true,
                wrap_y: false,
                iso: true,
                hex: false,
            },
            shieldbox: 100,
            aifill: 5,
            mapsize: MapSizeMode::FullSize,
            xsize: 64,
            ysize: 64,
            size: 4,
            tilesperplayer: 100,
            landmass: 30,
        }
    }
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value.parse().map_err(|_| FcError::InvalidSetting {
        name: name.into(),
        value: value.into(),
    })
}

impl GameSettings {
    /// Set one setting by its server name. Unknown names are ignored.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "topology" => self.topology = Topology::parse(value)?,
            "shieldbox" => self.shieldbox = parse_int(name, value)?,
            "aifill" => self.aifill = parse_int(name, value)?,
            "mapsize" => self.mapsize = MapSizeMode::parse(value)?,
            "xsize" => self.xsize = parse_int(name, value)?,
            "ysize" => self.ysize = parse_int(name, value)?,
            "size" => self.size = parse_int(name, value)?,
            "tilesperplayer" => self.tilesperplayer = parse_int(name, value)?,
            "landmass" => self.landmass = parse_int(name, value)?,
            _ => tracing::trace!(name, value, "ignoring unknown setting"),
        }
        Ok(())
    }

    /// Apply a whole layer of overrides in order.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Result<Self> {
        for (name, value) in overrides.iter() {
            self.apply(name, value)?;
        }
        Ok(self)
    }
}

/// An ordered list of `name = value` setting assignments from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    values: Vec<(String, String)>,
}

impl SettingsOverrides {
    /// Create an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one assignment.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push((name.into(), value.into()));
    }

    /// Assignments in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the layer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Collect every `set` line of a server settings file. Lines that do not
    /// match the pattern are skipped.
    #[must_use]
    pub fn from_settings_file(text: &str) -> Self {
        let mut overrides = Self::new();
        for line in text.split(['\r', '\n']).filter(|l| !l.is_empty()) {
            match parse_settings_line(line) {
                Some((name, value)) => overrides.push(name, value),
                None => tracing::trace!(line, "skipping settings line"),
            }
        }
        overrides
    }
}

/// Match one line against
/// `set <name> <value>` or `set <name> "<value>"`, optionally followed by
/// whitespace and a `#` comment.
///
/// `<name>` is `[A-Za-z0-9_]+`; the value may contain no quote, space or tab.
#[must_use]
pub fn parse_settings_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("set ")?;

    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if name_len == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(name_len);
    let rest = rest.strip_prefix(' ')?;

    let is_value_byte = |b: u8| !matches!(b, b'"' | b'\t' | b' ');
    let (value, rest) = if let Some(quoted) = rest.strip_prefix('"') {
        let len = quoted.bytes().take_while(|&b| is_value_byte(b)).count();
        let (value, after) = quoted.split_at(len);
        (value, after.strip_prefix('"')?)
    } else {
        let len = rest.bytes().take_while(|&b| is_value_byte(b)).count();
        rest.split_at(len)
    };
    if value.is_empty() {
        return None;
    }

    if !rest.is_empty() {
        let comment = rest.trim_start_matches([' ', '\t']);
        if comment.len() == rest.len() || comment.len() < 2 || !comment.starts_with('#') {
            return None;
        }
    }

    Some((name, value))
}

/// Merge a server settings file and a players file over the defaults.
pub fn load_settings(settings_text: &str, players_text: &str) -> Result<GameSettings> {
    merge_settings(&SettingsOverrides::new(), settings_text, players_text)
}

/// Merge, in order of increasing precedence: defaults, the ruleset's own
/// overrides, the server settings file and the players file.
pub fn merge_settings(
    ruleset: &SettingsOverrides,
    settings_text: &str,
    players_text: &str,
) -> Result<GameSettings> {
    GameSettings::default()
        .with_overrides(ruleset)?
        .with_overrides(&SettingsOverrides::from_settings_file(settings_text))?
        .with_overrides(&SettingsOverrides::from_settings_file(players_text))
}
