//! Language-agnostic document produced by the parser.
//!
//! A [`Document`] is an ordered list of sections, each holding ordered
//! entries. Entry names are not unique within a section; lookups return the
//! first match. Strings keep their backslash escapes verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// `TRUE` / `FALSE`.
    Bool(bool),
    /// Any number literal, always finite.
    Number(f64),
    /// String contents without delimiters.
    String(String),
}

impl Scalar {
    /// The string contents, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Human-readable kind name for error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

/// A table: column names plus rows that are never longer than the heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names.
    pub heading: Vec<String>,
    /// Data rows.
    pub rows: Vec<Vec<Scalar>>,
}

impl Table {
    /// Index of a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.heading.iter().position(|h| h == name)
    }
}

/// Value of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A single scalar.
    Scalar(Scalar),
    /// Two or more comma-separated scalars.
    List(Vec<Scalar>),
    /// A braced table.
    Table(Table),
}

impl Value {
    /// The value as a list; a lone scalar is a one-element list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Self::Scalar(s) => Some(std::slice::from_ref(s)),
            Self::List(items) => Some(items),
            Self::Table(_) => None,
        }
    }

    /// The scalar, if this is a single value.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The table, if this is a table.
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A named value inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: Value,
}

/// A `[name]` section and its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section name without brackets.
    pub name: String,
    /// Entries in file order.
    pub entries: Vec<Entry>,
}

impl Section {
    /// First entry with the given name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// A `*include` directive. Recorded, never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInclusion {
    /// The include target exactly as written, delimiters included.
    pub file: String,
}

/// A parsed ruleset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Sections in file order.
    pub sections: Vec<Section>,
    /// Include directives in file order.
    pub file_inclusions: Vec<FileInclusion>,
}

impl Document {
    /// First section with the given name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Sections whose name starts with `prefix`, paired with the remaining
    /// suffix.
    pub fn sections_with_prefix<'d>(
        &'d self,
        prefix: &'d str,
    ) -> impl Iterator<Item = (&'d str, &'d Section)> + 'd {
        self.sections
            .iter()
            .filter_map(move |s| s.name.strip_prefix(prefix).map(|id| (id, s)))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => {
                let quote = ['"', '\'', '*']
                    .into_iter()
                    .find(|&q| !has_unescaped(s, q))
                    .unwrap_or('"');
                write!(f, "{quote}{s}{quote}")
            }
        }
    }
}

/// Whether `s` contains `quote` not preceded by an escaping backslash.
fn has_unescaped(s: &str, quote: char) -> bool {
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return true;
        }
    }
    false
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Scalar]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::List(items) => write_list(f, items),
            Self::Table(table) => {
                f.write_str("{")?;
                if !table.heading.is_empty() {
                    f.write_str(" ")?;
                    let heading: Vec<Scalar> =
                        table.heading.iter().cloned().map(Scalar::String).collect();
                    write_list(f, &heading)?;
                }
                for row in &table.rows {
                    f.write_str("\n    ")?;
                    write_list(f, row)?;
                }
                f.write_str("\n}")
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inclusion in &self.file_inclusions {
            writeln!(f, "*include {}", inclusion.file)?;
        }
        for section in &self.sections {
            writeln!(f, "\n[{}]", section.name)?;
            for entry in &section.entries {
                writeln!(f, "{} = {}", entry.name, entry.value)?;
            }
        }
        Ok(())
    }
}
