//! Splits GEDCOM text into lines and matches each against the line grammar.
use crate::error::{GedcomError, Result};
use crate::grammar;

/// One structure line, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the input.
    pub number: usize,
    pub level: usize,
    pub xref: Option<&'a str>,
    pub tag: &'a str,
    pub pointer: Option<&'a str>,
    /// The line string as written, `@@` escape included.
    pub text: Option<&'a str>,
}

impl<'a> Line<'a> {
    /// The line string with a leading `@@` unescaped, or empty.
    pub fn payload(&self) -> &'a str {
        match self.text {
            Some(text) if text.starts_with("@@") => &text[1..],
            Some(text) => text,
            None => "",
        }
    }
}

/// An iterator over the lines of a GEDCOM text.
///
/// Lines end in `\r\n`, `\r` or `\n`. A byte order mark at the start is
/// skipped, as is the empty segment after a final line terminator. Lines
/// that do not match the grammar are yielded as errors and the iteration
/// carries on with the next line.
pub struct Tokenizer<'a> {
    rest: Option<&'a str>,
    number: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: Some(input.strip_prefix('\u{feff}').unwrap_or(input)),
            number: 0,
        }
    }
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let rest = self.rest?;
        if rest.is_empty() {
            self.rest = None;
            return None;
        }
        self.number += 1;
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let next = if rest[end..].starts_with("\r\n") { end + 2 } else { end + 1 };
                self.rest = Some(&rest[next..]);
                Some((self.number, &rest[..end]))
            }
            None => {
                self.rest = None;
                Some((self.number, rest))
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Line<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        let (number, content) = self.next_line()?;
        Some(scan(number, content))
    }
}

fn scan(number: usize, content: &str) -> Result<Line<'_>> {
    let unrecognized = || GedcomError::parse(format!("unrecognized line {:?}", content), number);
    let captures = grammar::LINE.captures(content).ok_or_else(unrecognized)?;
    let field = |name| captures.name(name).map(|m| m.as_str());
    let (Some(level), Some(tag)) = (field("level"), field("tag")) else {
        return Err(unrecognized());
    };
    Ok(Line {
        number,
        level: level
            .parse()
            .map_err(|_| GedcomError::parse(format!("level {} is out of range", level), number))?,
        xref: field("xref"),
        tag,
        pointer: field("pointer"),
        text: field("linestr"),
    })
}
