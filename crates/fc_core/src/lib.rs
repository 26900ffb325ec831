//! # FC Core
//!
//! Freeciv ruleset parsing and game-balance calculators.
//!
//! This crate contains **only** pure computation:
//! - No IO (callers hand in file contents)
//! - No shared mutable state
//! - No randomness (combat outcomes are exact distributions)
//!
//! Every function is safe to call concurrently on the same immutable
//! [`ruleset::Ruleset`] and [`settings::GameSettings`].
//!
//! ## Crate Structure
//!
//! - [`ini`] - Ruleset text lexer, parser and document model
//! - [`ruleset`] - Typed ruleset records and the document extractor
//! - [`settings`] - Server settings and the settings file format
//! - [`effects`] - Requirement matching and effect tallies
//! - [`combat`] - Combat strength and outcome distributions
//! - [`map`] - Tile distances and map sizing
//! - [`costs`] - Incite and bribe costs
//! - [`math`] - Binomial distribution helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod combat;
pub mod costs;
pub mod effects;
pub mod error;
pub mod ini;
pub mod map;
pub mod math;
pub mod ruleset;
pub mod settings;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::combat::{
        calculate_combat, AttackerState, CombatResult, DefenderMeta, DefenderState, HpChance,
        WorldState,
    };
    pub use crate::costs::{
        calculate_bribe_cost, calculate_incite_cost, BribeCost, BribedUnit, CitizenBreakdown,
        IncitedCity, InciteCost, NationalityBreakdown, OriginalOwner,
    };
    pub use crate::effects::{resolve, RequirementContext};
    pub use crate::error::{ExtractionError, FcError, LexError, ParseError, Result};
    pub use crate::ini::{parse_document, Document, Section, Value};
    pub use crate::map::{map_distance, resolve_topology_size, Coordinates, MapSize};
    pub use crate::ruleset::{
        load_ruleset, parse_ruleset, Building, Effect, Requirement, RequirementRange, Ruleset,
        RulesetSources, Terrain, TerrainExtra, UnitClass, UnitType, VeteranLevel,
    };
    pub use crate::settings::{load_settings, GameSettings, MapSizeMode, Topology};
}
