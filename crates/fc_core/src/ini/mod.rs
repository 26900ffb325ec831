//! The ruleset text format: tokenizer, parser and document model.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Document, Entry, FileInclusion, Scalar, Section, Table, Value};

use crate::error::Result;

/// Parse one ruleset file into a [`Document`].
///
/// `file` is only used to name the file in errors.
pub fn parse_document(text: &str, file: &str) -> Result<Document> {
    let tokens = lexer::tokenize(text, file)?;
    let document = parser::parse_tokens(&tokens, file)?;
    tracing::trace!(
        file,
        sections = document.sections.len(),
        "parsed ruleset document"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FcError;

    #[test]
    fn test_round_trip_through_display() {
        let text = r#"
*include "common.ruleset"

[unit_settlers]
name = _("Settlers")
flags = "Settlers", "NonMil", 'say "hi"'
attack = 0
hp_loss = -0.5
obsolete = FALSE
bonuses =
    { "flag", "type", "value"
      "Horse", "DefenseMultiplier", 1
    }
"#;
        let doc = parse_document(text, "units.ruleset").unwrap();
        let again = parse_document(&doc.to_string(), "units.ruleset").unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn test_errors_carry_file_name() {
        match parse_document("[a]\nb = @", "cities.ruleset") {
            Err(FcError::Lex(e)) => assert_eq!(e.file, "cities.ruleset"),
            other => panic!("expected lex error, got {other:?}"),
        }
        match parse_document("[a]\nb = = 1", "cities.ruleset") {
            Err(FcError::Parse(e)) => assert_eq!(e.file, "cities.ruleset"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
