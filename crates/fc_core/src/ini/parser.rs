//! Recursive-descent parser from tokens to [`Document`].
//!
//! ```text
//! document      := (section | file_inclusion)*
//! file_inclusion:= '*include' string
//! section       := section_name entry*
//! entry         := entry_name '=' (table | value_list | single_value)
//! value_list    := single_value (',' single_value)+
//! table         := '{' value_list* '}'
//! ```
//!
//! Inside a table, one list ends where a value is not followed by a comma;
//! the first list is the heading.

use crate::error::ParseError;
use crate::ini::ast::{Document, Entry, FileInclusion, Scalar, Section, Table, Value};
use crate::ini::lexer::{Token, TokenKind};

/// Build a [`Document`] from a token stream.
///
/// # Errors
///
/// Returns a [`ParseError`] naming `file` and the line of the first token
/// that does not fit the grammar.
pub fn parse_tokens(tokens: &[Token<'_>], file: &str) -> Result<Document, ParseError> {
    Parser::new(tokens, file).parse_document()
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    file: &'t str,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], file: &'t str) -> Self {
        Self {
            tokens,
            pos: 0,
            file,
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn cur_line(&self) -> u32 {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            file: self.file.to_string(),
            line: self.cur_line(),
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(t) => self.err(format!("expected {expected}, found '{}'", t.text)),
            None => self.err(format!("expected {expected}, found end of file")),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, ParseError> {
        if self.peek_kind() == Some(kind) {
            self.advance().ok_or_else(|| self.unexpected(expected))
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn parse_document(mut self) -> Result<Document, ParseError> {
        let mut doc = Document::default();

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Include => {
                    self.advance();
                    let target = self.expect(TokenKind::String, "include file name")?;
                    doc.file_inclusions.push(FileInclusion {
                        file: target.text.to_string(),
                    });
                }
                TokenKind::SectionName => {
                    let section = self.parse_section()?;
                    doc.sections.push(section);
                }
                _ => return Err(self.unexpected("section name or '*include'")),
            }
        }

        Ok(doc)
    }

    fn parse_section(&mut self) -> Result<Section, ParseError> {
        let header = self.expect(TokenKind::SectionName, "section name")?;
        let name = header.text[1..header.text.len() - 1].to_string();

        let mut entries = Vec::new();
        while self.peek_kind() == Some(TokenKind::EntryName) {
            entries.push(self.parse_entry()?);
        }

        Ok(Section { name, entries })
    }

    fn parse_entry(&mut self) -> Result<Entry, ParseError> {
        let name = self.expect(TokenKind::EntryName, "entry name")?.text.to_string();
        self.expect(TokenKind::Equals, "'='")?;

        let value = if self.peek_kind() == Some(TokenKind::BraceOpen) {
            Value::Table(self.parse_table()?)
        } else {
            let mut items = self.parse_value_list()?;
            if items.len() == 1 {
                Value::Scalar(items.remove(0))
            } else {
                Value::List(items)
            }
        };

        Ok(Entry { name, value })
    }

    /// One or more values joined by commas.
    fn parse_value_list(&mut self) -> Result<Vec<Scalar>, ParseError> {
        let mut items = vec![self.parse_single_value()?];
        while self.peek_kind() == Some(TokenKind::Comma) {
            self.advance();
            items.push(self.parse_single_value()?);
        }
        Ok(items)
    }

    fn parse_single_value(&mut self) -> Result<Scalar, ParseError> {
        let Some(token) = self.peek().copied() else {
            return Err(self.unexpected("a value"));
        };

        let scalar = match token.kind {
            TokenKind::Boolean => Scalar::Bool(token.text.eq_ignore_ascii_case("TRUE")),
            TokenKind::Number => {
                let n: f64 = token
                    .text
                    .parse()
                    .map_err(|_| self.err(format!("invalid number '{}'", token.text)))?;
                if !n.is_finite() {
                    return Err(self.err(format!("number '{}' is not finite", token.text)));
                }
                Scalar::Number(n)
            }
            // delimiters are single ASCII characters
            TokenKind::String => Scalar::String(token.text[1..token.text.len() - 1].to_string()),
            _ => return Err(self.unexpected("a value")),
        };

        self.advance();
        Ok(scalar)
    }

    fn parse_table(&mut self) -> Result<Table, ParseError> {
        self.expect(TokenKind::BraceOpen, "'{'")?;
        let mut table = Table::default();
        let mut first = true;

        loop {
            match self.peek_kind() {
                Some(TokenKind::BraceClose) => {
                    self.advance();
                    return Ok(table);
                }
                Some(kind) if kind.is_value() => {
                    let line = self.cur_line();
                    let values = self.parse_value_list()?;
                    if first {
                        table.heading = values
                            .into_iter()
                            .map(|v| match v {
                                Scalar::String(s) => Ok(s),
                                other => Err(ParseError {
                                    file: self.file.to_string(),
                                    line,
                                    message: format!(
                                        "table heading must be strings, found {}",
                                        other.kind_name()
                                    ),
                                }),
                            })
                            .collect::<Result<_, _>>()?;
                        first = false;
                    } else {
                        if values.len() > table.heading.len() {
                            return Err(ParseError {
                                file: self.file.to_string(),
                                line,
                                message: format!(
                                    "table row has {} values but the heading has {} columns",
                                    values.len(),
                                    table.heading.len()
                                ),
                            });
                        }
                        table.rows.push(values);
                    }
                }
                _ => return Err(self.unexpected("a value or '}'")),
            }
        }
    }
}
