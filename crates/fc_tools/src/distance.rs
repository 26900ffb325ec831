//! Tile distance queries.

use std::fmt;

use fc_core::map::{map_distance, Coordinates, MapSize};
use fc_core::settings::Topology;
use serde::Serialize;

/// A distance between two tiles on a given map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceReport {
    /// Start tile.
    pub from: Coordinates,
    /// End tile.
    pub to: Coordinates,
    /// Map dimensions.
    pub size: MapSize,
    /// Map topology.
    pub topology: Topology,
    /// Movement distance.
    pub distance: i64,
}

impl DistanceReport {
    /// Measure the distance from `from` to `to`.
    #[must_use]
    pub fn measure(from: Coordinates, to: Coordinates, size: MapSize, topology: Topology) -> Self {
        Self {
            from,
            to,
            size,
            topology,
            distance: map_distance(from, to, size, &topology),
        }
    }
}

impl fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} on {}x{} [{}]: {}",
            self.from, self.to, self.size.xsize, self.size.ysize, self.topology, self.distance
        )
    }
}
