//! Tokenizer for the ruleset text dialect.
//!
//! Comments (`#` or `;` to end of line), whitespace and the translation
//! wrapper `_( ... )` are discarded. Tokens borrow their text from the input;
//! turning that text into values is the parser's job.

use crate::error::LexError;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `*include`
    Include,
    /// `[name]`, brackets included.
    SectionName,
    /// Bare entry name.
    EntryName,
    /// `TRUE` / `FALSE`.
    Boolean,
    /// Signed decimal number.
    Number,
    /// Quoted string, delimiters included.
    String,
}

impl TokenKind {
    /// Whether the token can start a scalar value.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Boolean | Self::Number | Self::String)
    }
}

/// A token with its source text and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token kind.
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub text: &'a str,
    /// 1-based line where the token starts.
    pub line: u32,
    /// 1-based column where the token starts.
    pub column: u32,
}

/// Characters allowed between the brackets of a section name.
const fn is_section_char(b: u8) -> bool {
    matches!(b, b' '..=b'Z' | b'^'..=b'~')
}

const fn is_name_edge_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

const fn is_name_char(b: u8) -> bool {
    is_name_edge_char(b) || b == b'.'
}

/// Split `text` into tokens.
///
/// # Errors
///
/// Returns a [`LexError`] naming `file` at the first character that starts
/// no token, or at an unterminated string.
pub fn tokenize<'a>(text: &'a str, file: &str) -> Result<Vec<Token<'a>>, LexError> {
    Lexer::new(text, file).run()
}

struct Lexer<'a, 'f> {
    text: &'a str,
    bytes: &'a [u8],
    file: &'f str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a, 'f> Lexer<'a, 'f> {
    fn new(text: &'a str, file: &'f str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            file,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();

        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                b'#' | b';' => self.skip_comment(),
                b',' => tokens.push(self.take(TokenKind::Comma, 1)),
                b'=' => tokens.push(self.take(TokenKind::Equals, 1)),
                b'{' => tokens.push(self.take(TokenKind::BraceOpen, 1)),
                b'}' => tokens.push(self.take(TokenKind::BraceClose, 1)),
                // translation wrapper, not a value
                b'_' if self.bytes.get(self.pos + 1) == Some(&b'(') => self.pos += 2,
                b')' => self.pos += 1,
                b'*' if self.at_include() => {
                    tokens.push(self.take(TokenKind::Include, "*include".len()));
                }
                b'[' => {
                    let len = self.section_len().ok_or_else(|| self.error())?;
                    tokens.push(self.take(TokenKind::SectionName, len));
                }
                b'"' | b'\'' | b'*' => {
                    let len = self.string_len().ok_or_else(|| self.error())?;
                    tokens.push(self.take(TokenKind::String, len));
                }
                _ => {
                    let (kind, len) = self.word().ok_or_else(|| self.error())?;
                    tokens.push(self.take(kind, len));
                }
            }
        }

        Ok(tokens)
    }

    fn take(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.pos;
        let token = Token {
            kind,
            text: &self.text[start..start + len],
            line: self.line,
            column: (start - self.line_start + 1) as u32,
        };

        // strings may span lines
        for (offset, &b) in self.bytes[start..start + len].iter().enumerate() {
            if b == b'\n' {
                self.line += 1;
                self.line_start = start + offset + 1;
            }
        }
        self.pos = start + len;
        token
    }

    fn skip_comment(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn at_include(&self) -> bool {
        let rest = &self.bytes[self.pos..];
        if !rest.starts_with(b"*include") {
            return false;
        }
        matches!(
            rest.get("*include".len()),
            None | Some(b' ' | b'\t' | b'\r' | b'\n' | b'"' | b'\'')
        )
    }

    fn section_len(&self) -> Option<usize> {
        let body = self.bytes[self.pos + 1..]
            .iter()
            .take_while(|&&b| is_section_char(b))
            .count();
        let close = self.bytes.get(self.pos + 1 + body)?;
        (body > 0 && *close == b']').then_some(body + 2)
    }

    /// A string ends at the next unescaped copy of its opening character;
    /// `\` escapes exactly one following character.
    fn string_len(&self) -> Option<usize> {
        let quote = self.bytes[self.pos];
        let mut offset = self.pos + 1;
        while let Some(&b) = self.bytes.get(offset) {
            if b == b'\\' {
                offset += 2;
            } else if b == quote {
                return Some(offset + 1 - self.pos);
            } else {
                offset += 1;
            }
        }
        None
    }

    /// Longest of boolean, number and entry name; ties go to the first of
    /// those three.
    fn word(&self) -> Option<(TokenKind, usize)> {
        let rest = &self.bytes[self.pos..];

        let boolean = if rest.starts_with(b"TRUE") {
            4
        } else if rest.starts_with(b"FALSE") {
            5
        } else {
            0
        };

        let candidates = [
            (TokenKind::Boolean, boolean),
            (TokenKind::Number, number_len(rest)),
            (TokenKind::EntryName, name_len(rest)),
        ];

        let mut best: Option<(TokenKind, usize)> = None;
        for (kind, len) in candidates {
            if len > 0 && best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((kind, len));
            }
        }
        best
    }

    fn error(&self) -> LexError {
        let found: String = self.text[self.pos..]
            .chars()
            .take_while(|&c| c != '\n' && c != '\r')
            .take(20)
            .collect();
        LexError {
            file: self.file.to_string(),
            line: self.line,
            column: (self.pos - self.line_start + 1) as u32,
            found,
        }
    }
}

/// Length of `[+-]?[0-9]+(\.[0-9]+)?` at the start of `rest`, or 0.
fn number_len(rest: &[u8]) -> usize {
    let sign = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
    let int_digits = rest[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if int_digits == 0 {
        return 0;
    }
    let mut len = sign + int_digits;
    if rest.get(len) == Some(&b'.') {
        let frac_digits = rest[len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_digits > 0 {
            len += 1 + frac_digits;
        }
    }
    len
}

/// Length of an entry name at the start of `rest`, or 0. Dots may only
/// appear inside the name.
fn name_len(rest: &[u8]) -> usize {
    match rest.first() {
        Some(&b) if is_name_edge_char(b) => {}
        _ => return 0,
    }
    let mut len = 1 + rest[1..].iter().take_while(|&&b| is_name_char(b)).count();
    while rest[len - 1] == b'.' {
        len -= 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text, "test.ruleset")
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_punctuation_and_names() {
        use TokenKind::*;
        assert_eq!(
            kinds("[unit_warriors]\nname = _(\"Warriors\")\nflags = \"A\", \"B\""),
            vec![SectionName, EntryName, Equals, String, EntryName, Equals, String, Comma, String]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("# comment\n; another = 1\nvalue = 3 # trailing"),
            vec![TokenKind::EntryName, TokenKind::Equals, TokenKind::Number]
        );
    }

    #[test]
    fn test_word_disambiguation() {
        assert_eq!(kinds("TRUE"), vec![TokenKind::Boolean]);
        assert_eq!(kinds("TRUEx"), vec![TokenKind::EntryName]);
        assert_eq!(kinds("-1"), vec![TokenKind::Number]);
        assert_eq!(kinds("+2.5"), vec![TokenKind::Number]);
        assert_eq!(kinds("1st"), vec![TokenKind::EntryName]);
        assert_eq!(kinds("move_rate"), vec![TokenKind::EntryName]);
    }

    #[test]
    fn test_name_cannot_end_with_dot() {
        let tokens = tokenize("a.b.", "test.ruleset");
        // the trailing dot starts no token
        assert!(tokens.is_err());
        assert_eq!(tokenize("a.b", "test.ruleset").unwrap()[0].text, "a.b");
    }

    #[test]
    fn test_string_delimiters_and_escapes() {
        let tokens = tokenize(r#"'it"s' "a \" b" *file*"#, "test.ruleset").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec![r#"'it"s'"#, r#""a \" b""#, "*file*"]);
    }

    #[test]
    fn test_include_marker() {
        let tokens = tokenize("*include \"other.ruleset\"", "test.ruleset").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Include);
        assert_eq!(tokens[1].kind, TokenKind::String);
    }

    #[test]
    fn test_multiline_string_tracks_lines() {
        let tokens = tokenize("a = \"one\ntwo\"\nb = 1", "test.ruleset").unwrap();
        let b = tokens.iter().find(|t| t.text == "b").unwrap();
        assert_eq!(b.line, 3);
        assert_eq!(b.column, 1);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = tokenize("name = \"Warriors", "units.ruleset").unwrap_err();
        assert_eq!(err.file, "units.ruleset");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_unknown_character_is_error() {
        let err = tokenize("\nvalue = @", "game.ruleset").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.found, "@");
    }

    #[test]
    fn test_section_name_body() {
        assert_eq!(kinds("[veteran_system]"), vec![TokenKind::SectionName]);
        assert!(tokenize("[]", "test.ruleset").is_err());
        assert!(tokenize("[a[b]", "test.ruleset").is_err());
    }
}
