//! Error types for ruleset loading and the calculators.

use thiserror::Error;

/// Result type alias using [`FcError`].
pub type Result<T> = std::result::Result<T, FcError>;

/// A character sequence the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexing error in {file} at line {line}, column {column}: unexpected {found:?}")]
pub struct LexError {
    /// Ruleset file being lexed.
    pub file: String,
    /// 1-based line of the offending character.
    pub line: u32,
    /// 1-based column of the offending character.
    pub column: u32,
    /// The unmatched text (up to the end of its line).
    pub found: String,
}

/// A token sequence that does not match the ruleset grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parser error in {file} at line {line}: {message}")]
pub struct ParseError {
    /// Ruleset file being parsed.
    pub file: String,
    /// 1-based line of the token where parsing failed.
    pub line: u32,
    /// What was expected or what went wrong.
    pub message: String,
}

/// Failure to turn a parsed document into domain records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// A required section is absent.
    #[error("Section '{section}' missing in {file}")]
    MissingSection {
        /// Ruleset file.
        file: String,
        /// Section name.
        section: String,
    },

    /// A required entry is absent from its section.
    #[error("Missing field '{field}' in section '{section}'")]
    MissingField {
        /// Section name.
        section: String,
        /// Entry name.
        field: String,
    },

    /// An entry holds a value of the wrong kind.
    #[error("Expected '{field}' in section '{section}' to be {expected}")]
    WrongType {
        /// Section name.
        section: String,
        /// Entry name (or table column).
        field: String,
        /// Description of the expected kind.
        expected: &'static str,
    },

    /// A numeric entry that must be whole has a fractional part.
    #[error("Expected '{field}' in section '{section}' to be an integer, found {value}")]
    NotAnInteger {
        /// Section name.
        section: String,
        /// Entry name.
        field: String,
        /// The offending number.
        value: f64,
    },

    /// A requirement range outside the closed set.
    #[error("Invalid requirement range '{value}' in section '{section}'")]
    InvalidRange {
        /// Section name.
        section: String,
        /// The offending range text.
        value: String,
    },

    /// A table is missing a column or has a short row where one is needed.
    #[error("Malformed table '{field}' in section '{section}': {message}")]
    MalformedTable {
        /// Section name.
        section: String,
        /// Entry holding the table.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A requirement row without a type or name.
    #[error("Empty requirement entry in section '{section}'")]
    EmptyRequirement {
        /// Section name.
        section: String,
    },

    /// Veteran arrays that cannot be zipped.
    #[error("Veteran level arrays in section '{section}' have differing lengths")]
    VeteranLevelMismatch {
        /// Section name.
        section: String,
    },
}

/// Top-level error type for all core operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FcError {
    /// Lexing failed.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Extraction of domain records failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// A unit type references a class that does not exist.
    #[error("Unit type '{unit}' references unknown unit class '{class}'")]
    UnknownUnitClass {
        /// Unit type id.
        unit: String,
        /// Referenced class name.
        class: String,
    },

    /// The ruleset violates a domain invariant.
    #[error("Invalid ruleset: {0}")]
    InvalidRuleset(String),

    /// A settings value could not be interpreted.
    #[error("Invalid value '{value}' for setting '{name}'")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// Offending value.
        value: String,
    },

    /// Lookup of a ruleset entity by id failed.
    #[error("Unknown {kind} '{id}'")]
    UnknownEntity {
        /// Entity kind ("unit type", "terrain", ...).
        kind: &'static str,
        /// Requested id.
        id: String,
    },

    /// Combat input for which no outcome is defined.
    #[error("Degenerate combat: {0}")]
    DegenerateCombat(String),

    /// Calculator input that is structurally invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
