//! Tile distances on wrapping, isometric and hexagonal maps.
//!
//! Wrapping is done in native coordinates, where every row of the map has
//! the same length regardless of the isometric skew. Distances are then
//! measured on the map-coordinate delta.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FcError, Result};
use crate::settings::{GameSettings, MapSizeMode, Topology};

/// A tile position in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl Coordinates {
    /// Create coordinates.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinates {
    type Err = FcError;

    /// Parse `X,Y`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FcError::InvalidInput(format!("expected coordinates as X,Y, found '{s}'"));
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            x: x.trim().parse().map_err(|_| invalid())?,
            y: y.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Map dimensions in native coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSize {
    /// Width.
    pub xsize: i64,
    /// Height.
    pub ysize: i64,
}

fn map_to_native(pos: Coordinates, size: MapSize, topology: &Topology) -> Coordinates {
    if !topology.iso {
        return pos;
    }
    let nat_y = pos.x + pos.y - size.xsize;
    let nat_x = (2 * pos.x - nat_y - (nat_y & 1)) / 2;
    Coordinates::new(nat_x, nat_y)
}

fn native_to_map(pos: Coordinates, size: MapSize, topology: &Topology) -> Coordinates {
    if !topology.iso {
        return pos;
    }
    let map_x = (pos.y + (pos.y & 1)) / 2 + pos.x;
    let map_y = pos.y - map_x + size.xsize;
    Coordinates::new(map_x, map_y)
}

/// Wrap `delta` into `[-size/2, size - size/2)`.
///
/// On an even axis a delta of exactly half the size can go either way;
/// both candidates are returned in that case.
fn wrap_delta(delta: i64, size: i64) -> Vec<i64> {
    if size <= 0 {
        return vec![delta];
    }
    let half = size / 2;
    let wrapped = (delta + half).rem_euclid(size) - half;
    if size % 2 == 0 && wrapped == -half {
        vec![wrapped, half]
    } else {
        vec![wrapped]
    }
}

fn vector_to_distance(dx: i64, dy: i64, topology: &Topology) -> i64 {
    if !topology.hex {
        return dx.abs() + dy.abs();
    }
    let opposite = (dx < 0 && dy > 0) || (dx > 0 && dy < 0);
    let same = (dx > 0 && dy > 0) || (dx < 0 && dy < 0);
    let sums = if topology.iso { opposite } else { same };
    if sums {
        dx.abs() + dy.abs()
    } else {
        dx.abs().max(dy.abs())
    }
}

/// Movement distance from `a` to `b`.
///
/// Without hex tiles this is the Manhattan distance of the shortest
/// (wrapped) vector. The result is symmetric in `a` and `b`.
#[must_use]
pub fn map_distance(a: Coordinates, b: Coordinates, size: MapSize, topology: &Topology) -> i64 {
    if !topology.wrap_x && !topology.wrap_y {
        return vector_to_distance(b.x - a.x, b.y - a.y, topology);
    }

    let nat_a = map_to_native(a, size, topology);
    let nat_b = map_to_native(b, size, topology);
    let dx = nat_b.x - nat_a.x;
    let dy = nat_b.y - nat_a.y;

    let dxs = if topology.wrap_x { wrap_delta(dx, size.xsize) } else { vec![dx] };
    let dys = if topology.wrap_y { wrap_delta(dy, size.ysize) } else { vec![dy] };

    let origin = native_to_map(nat_a, size, topology);
    let mut best = i64::MAX;
    for &dx in &dxs {
        for &dy in &dys {
            let end = native_to_map(Coordinates::new(nat_a.x + dx, nat_a.y + dy), size, topology);
            best = best.min(vector_to_distance(end.x - origin.x, end.y - origin.y, topology));
        }
    }
    best
}

/// Width and height ratio for a wrapping configuration.
fn axis_ratio(topology: &Topology) -> (i64, i64) {
    match (topology.wrap_x, topology.wrap_y) {
        (true, false) => (3, 2),
        (false, true) => (2, 3),
        _ => (1, 1),
    }
}

fn invalid(name: &str, value: i64) -> FcError {
    FcError::InvalidSetting {
        name: name.into(),
        value: value.to_string(),
    }
}

/// Map dimensions the server generates for `settings`.
///
/// # Errors
///
/// [`FcError::InvalidSetting`] if the inputs the chosen mode uses are not
/// positive.
pub fn resolve_topology_size(settings: &GameSettings) -> Result<MapSize> {
    let tiles = match settings.mapsize {
        MapSizeMode::XySize => {
            if settings.xsize <= 0 {
                return Err(invalid("xsize", settings.xsize));
            }
            if settings.ysize <= 0 {
                return Err(invalid("ysize", settings.ysize));
            }
            return Ok(MapSize {
                xsize: settings.xsize,
                ysize: settings.ysize,
            });
        }
        MapSizeMode::FullSize => {
            if settings.size <= 0 {
                return Err(invalid("size", settings.size));
            }
            (settings.size * 1000) as f64
        }
        MapSizeMode::Player => {
            if settings.landmass <= 0 {
                return Err(invalid("landmass", settings.landmass));
            }
            (settings.aifill * settings.tilesperplayer * 100) as f64 / settings.landmass as f64
        }
    };

    let topology = &settings.topology;
    let (x_ratio, y_ratio) = axis_ratio(topology);
    let iso = if topology.iso { 2 } else { 1 };
    let scale = (tiles.max(0.0) / (x_ratio * y_ratio * iso * 4) as f64).sqrt() + 0.49;
    let i_size = scale.floor() as i64;

    let size = MapSize {
        xsize: x_ratio * i_size * 2,
        ysize: y_ratio * i_size * 2 * iso,
    };
    tracing::debug!(tiles, xsize = size.xsize, ysize = size.ysize, "resolved map size");
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topo(wrap_x: bool, wrap_y: bool, iso: bool, hex: bool) -> Topology {
        Topology { wrap_x, wrap_y, iso, hex }
    }

    const SIZE: MapSize = MapSize { xsize: 10, ysize: 10 };

    #[test]
    fn test_plain_manhattan() {
        let d = map_distance(Coordinates::new(0, 0), Coordinates::new(3, 4), SIZE, &Topology::default());
        assert_eq!(d, 7);
    }

    #[test]
    fn test_wrap_x_takes_short_way() {
        let t = topo(true, false, false, false);
        assert_eq!(map_distance(Coordinates::new(0, 0), Coordinates::new(9, 0), SIZE, &t), 1);
        assert_eq!(map_distance(Coordinates::new(1, 2), Coordinates::new(8, 2), SIZE, &t), 3);
    }

    #[test]
    fn test_half_size_is_symmetric() {
        for t in [
            topo(true, false, false, false),
            topo(true, false, true, false),
            topo(true, true, true, true),
        ] {
            let a = Coordinates::new(2, 7);
            let b = Coordinates::new(7, 3);
            assert_eq!(map_distance(a, b, SIZE, &t), map_distance(b, a, SIZE, &t), "{t}");
        }
    }

    #[test]
    fn test_iso_native_round_trip() {
        let t = topo(true, false, true, false);
        for (x, y) in [(0, 0), (5, 7), (12, 3), (-3, 4)] {
            let pos = Coordinates::new(x, y);
            assert_eq!(native_to_map(map_to_native(pos, SIZE, &t), SIZE, &t), pos);
        }
    }

    #[test]
    fn test_hex_branches() {
        let hex = topo(false, false, false, true);
        let iso_hex = topo(false, false, true, true);
        let o = Coordinates::new(0, 0);
        assert_eq!(map_distance(o, Coordinates::new(2, 3), SIZE, &hex), 5);
        assert_eq!(map_distance(o, Coordinates::new(2, -3), SIZE, &hex), 3);
        assert_eq!(map_distance(o, Coordinates::new(2, 3), SIZE, &iso_hex), 3);
        assert_eq!(map_distance(o, Coordinates::new(2, -3), SIZE, &iso_hex), 5);
    }

    #[test]
    fn test_zero_size_does_not_wrap() {
        let t = topo(true, true, false, false);
        let empty = MapSize { xsize: 0, ysize: 0 };
        assert_eq!(map_distance(Coordinates::new(0, 0), Coordinates::new(3, 4), empty, &t), 7);
    }

    #[test]
    fn test_coordinates_from_str() {
        assert_eq!("3,-4".parse::<Coordinates>().unwrap(), Coordinates::new(3, -4));
        assert_eq!(" 1 , 2 ".parse::<Coordinates>().unwrap(), Coordinates::new(1, 2));
        assert!("3".parse::<Coordinates>().is_err());
        assert!("a,b".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_resolve_full_size() {
        let settings = GameSettings::default();
        // 4000 tiles, 3:2 ratio, iso: floor(sqrt(4000 / 48) + 0.49) = 9
        assert_eq!(
            resolve_topology_size(&settings).unwrap(),
            MapSize { xsize: 54, ysize: 72 }
        );
    }

    #[test]
    fn test_resolve_player_and_xy() {
        let mut settings = GameSettings {
            mapsize: MapSizeMode::Player,
            topology: Topology::default(),
            ..GameSettings::default()
        };
        // 5 * 100 * 100 / 30 = 1666.6 tiles, 1:1: floor(sqrt(416.6) + 0.49) = 20
        assert_eq!(
            resolve_topology_size(&settings).unwrap(),
            MapSize { xsize: 40, ysize: 40 }
        );

        settings.landmass = 0;
        assert!(matches!(
            resolve_topology_size(&settings),
            Err(FcError::InvalidSetting { .. })
        ));

        settings.mapsize = MapSizeMode::XySize;
        settings.xsize = 80;
        settings.ysize = 50;
        assert_eq!(
            resolve_topology_size(&settings).unwrap(),
            MapSize { xsize: 80, ysize: 50 }
        );
    }
}
