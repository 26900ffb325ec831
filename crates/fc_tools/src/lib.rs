//! # FC Development Tools
//!
//! Command-line tools around `fc_core`:
//! - Ruleset directory loader and validator
//! - RON dump of a parsed ruleset
//! - Combat and distance calculators

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod combat;
pub mod distance;
pub mod dump;
pub mod error;
pub mod loader;
pub mod validate;
