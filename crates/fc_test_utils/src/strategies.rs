//! Proptest strategies for map geometry, ruleset documents and combat
//! scenarios over the sample ruleset.

use fc_core::ini::{Document, Entry, FileInclusion, Scalar, Section, Table, Value};
use fc_core::map::{Coordinates, MapSize};
use fc_core::settings::Topology;
use proptest::prelude::*;

/// Unit type ids of the sample ruleset.
pub const SAMPLE_UNITS: [&str; 8] = [
    "warriors",
    "phalanx",
    "archers",
    "horsemen",
    "pikemen",
    "catapult",
    "trireme",
    "musketeers",
];

/// Terrain ids of the sample ruleset.
pub const SAMPLE_TERRAINS: [&str; 4] = ["grassland", "hills", "mountains", "ocean"];

/// Any combination of topology flags.
pub fn topology() -> impl Strategy<Value = Topology> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(wrap_x, wrap_y, iso, hex)| Topology {
        wrap_x,
        wrap_y,
        iso,
        hex,
    })
}

/// Map sizes from tiny to mid-sized. Widths may be odd; heights are even,
/// as iso maps require.
pub fn map_size() -> impl Strategy<Value = MapSize> {
    (1i64..80, 1i64..40).prop_map(|(xsize, half_height)| MapSize {
        xsize,
        ysize: 2 * half_height,
    })
}

/// Coordinates inside a `size` map.
pub fn coordinates(size: MapSize) -> impl Strategy<Value = Coordinates> {
    (0..size.xsize, 0..size.ysize).prop_map(|(x, y)| Coordinates::new(x, y))
}

/// A map size with two points on it.
pub fn map_with_points() -> impl Strategy<Value = (MapSize, Coordinates, Coordinates)> {
    map_size().prop_flat_map(|size| (Just(size), coordinates(size), coordinates(size)))
}

/// A sample unit type id.
pub fn unit_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SAMPLE_UNITS.to_vec())
}

/// A sample terrain id.
pub fn terrain_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SAMPLE_TERRAINS.to_vec())
}

/// Scalars that print and re-parse unchanged.
pub fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        (-100_000i64..100_000).prop_map(|n| Scalar::Number(n as f64)),
        (-1000i64..1000, 1u32..4).prop_map(|(n, digits)| Scalar::Number(n as f64 / 10f64.powi(digits as i32))),
        "[A-Za-z0-9 _.,:|?-]{0,12}".prop_map(Scalar::String),
    ]
}

fn string_cell() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_map(String::from)
}

/// Tables whose rows are never longer than the heading.
pub fn table() -> impl Strategy<Value = Table> {
    prop::collection::vec(string_cell(), 1..5).prop_flat_map(|heading| {
        let width = heading.len();
        let rows = prop::collection::vec(prop::collection::vec(scalar(), 1..=width), 0..4);
        (Just(heading), rows).prop_map(|(heading, rows)| Table { heading, rows })
    })
}

/// Scalar, list (at least two items) or table values.
pub fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        scalar().prop_map(Value::Scalar),
        prop::collection::vec(scalar(), 2..5).prop_map(Value::List),
        table().prop_map(Value::Table),
    ]
}

fn entry() -> impl Strategy<Value = Entry> {
    ("e_[a-z0-9_]{0,8}", value()).prop_map(|(name, value)| Entry { name, value })
}

fn section() -> impl Strategy<Value = Section> {
    ("[a-z][a-z0-9_]{0,10}", prop::collection::vec(entry(), 0..5))
        .prop_map(|(name, entries)| Section { name, entries })
}

/// Documents that survive a print/parse round trip.
pub fn document() -> impl Strategy<Value = Document> {
    (
        prop::collection::vec(section(), 0..5),
        prop::collection::vec("[a-z]{1,8}", 0..2),
    )
        .prop_map(|(sections, includes)| Document {
            sections,
            file_inclusions: includes
                .into_iter()
                .map(|name| FileInclusion {
                    file: format!("\"{name}.ruleset\""),
                })
                .collect(),
        })
}
