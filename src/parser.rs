//! Assembles tokenized lines into the structure tree of a [`Document`].
//!
//! The parser keeps one open structure per level. A line at level `L` is
//! attached under the open structure at level `L - 1` and becomes the open
//! structure at level `L`, closing everything deeper. `CONT` lines are not
//! structures of their own: their text is appended, after a line break, to
//! the open structure one level up.
//!
//! Extension tags declared with `TAG` under `HEAD.SCHMA` are replaced by
//! their type identifier in every later line of the same document.

// used for logging
use tracing::{debug, trace, warn};
// used for the parse mode setting
use serde::Deserialize;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{GedcomError, Result};
use crate::schema::{CONT, HEAD, SCHMA, Schema, TAG, TagHasher};
use crate::structure::{Document, Structure, StructureId};
use crate::tokenizer::{Line, Tokenizer};

/// How lines that cannot be placed in the tree are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Log a warning and skip the line.
    #[default]
    Lenient,
    /// Fail the parse with the line number.
    Strict,
}

// ------------- Extensions -------------
/// Extension tags and the type identifiers they were declared with.
#[derive(Debug, Default)]
pub struct ExtensionKeeper {
    kept: HashMap<String, String, TagHasher>,
}

impl ExtensionKeeper {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
        }
    }
    /// Returns true if the tag was already declared. A later declaration
    /// replaces an earlier one.
    pub fn keep(&mut self, tag: &str, uri: &str) -> bool {
        self.kept.insert(tag.to_owned(), uri.to_owned()).is_some()
    }
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.kept.get(tag).map(String::as_str)
    }
    /// The declared type identifier for an extension tag, or the tag itself.
    pub fn resolve<'t>(&'t self, tag: &'t str) -> &'t str {
        self.get(tag).unwrap_or(tag)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.kept.iter().map(|(tag, uri)| (tag.as_str(), uri.as_str()))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Parser -------------
#[derive(Debug, Clone)]
pub struct Parser {
    schema: Arc<Schema>,
    mode: ParseMode,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A lenient parser using the built-in GEDCOM 7 schema.
    pub fn new() -> Self {
        Self::with_schema(Schema::gedcom7())
    }
    pub fn with_schema(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            mode: ParseMode::default(),
        }
    }
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let schema = match &settings.schema.path {
            Some(path) => {
                debug!(path = %path.display(), "Loading schema");
                Arc::new(Schema::from_path(path)?)
            }
            None => Schema::gedcom7(),
        };
        Ok(Self::with_schema(schema).mode(settings.parser.mode))
    }
    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }
    pub fn strict(self) -> Self {
        self.mode(ParseMode::Strict)
    }
    pub fn parse_mode(&self) -> ParseMode {
        self.mode
    }
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn parse(&self, input: &str) -> Result<Document> {
        let mut document = Document::new(Arc::clone(&self.schema));
        let mut extensions = ExtensionKeeper::new();
        // the open structure at each level, context[level]
        let mut context: Vec<StructureId> = Vec::new();
        let mut skipped = 0usize;
        for token in Tokenizer::new(input) {
            let line = match token {
                Ok(line) => line,
                Err(error) => {
                    self.reject(error)?;
                    skipped += 1;
                    continue;
                }
            };
            trace!(line = line.number, level = line.level, tag = line.tag, "Read line");
            if line.tag == CONT {
                match line.level.checked_sub(1).and_then(|owner| context.get(owner)) {
                    Some(owner) => document.continue_text(*owner, line.payload()),
                    None => {
                        self.reject(GedcomError::parse(
                            "continuation line without a structure to continue",
                            line.number,
                        ))?;
                        skipped += 1;
                    }
                }
                continue;
            }
            let parent = match line.level {
                0 => None,
                level => match context.get(level - 1) {
                    Some(parent) => Some(*parent),
                    None => {
                        self.reject(GedcomError::parse(
                            format!("level {} has no enclosing structure at level {}", level, level - 1),
                            line.number,
                        ))?;
                        skipped += 1;
                        continue;
                    }
                },
            };
            context.truncate(line.level);
            let tag = extensions.resolve(line.tag).to_owned();
            if tag == TAG && self.within_schema(&document, &context) {
                self.declare(&mut extensions, &line)?;
            }
            let id = document.push(record(tag, &line), parent);
            context.push(id);
        }
        debug!(
            records = document.len(),
            structures = document.structure_count(),
            extensions = extensions.len(),
            skipped,
            "Parsed document"
        );
        document.set_extensions(extensions);
        Ok(document)
    }

    // the enclosing structures are HEAD and SCHMA
    fn within_schema(&self, document: &Document, context: &[StructureId]) -> bool {
        match context {
            [head, schema, ..] => {
                document.structure(*head).tag() == HEAD && document.structure(*schema).tag() == SCHMA
            }
            _ => false,
        }
    }

    fn declare(&self, extensions: &mut ExtensionKeeper, line: &Line) -> Result<()> {
        match line.payload().split_once(' ') {
            Some((tag, uri)) => {
                let previously_kept = extensions.keep(tag, uri);
                debug!(tag, uri, previously_kept, "Registered extension tag");
            }
            None => self.reject(GedcomError::parse(
                format!("extension declaration {:?} lacks a type identifier", line.payload()),
                line.number,
            ))?,
        }
        Ok(())
    }

    fn reject(&self, error: GedcomError) -> Result<()> {
        match self.mode {
            ParseMode::Strict => Err(error),
            ParseMode::Lenient => {
                warn!(%error, "Skipping line");
                Ok(())
            }
        }
    }
}

fn record(tag: String, line: &Line) -> Structure {
    Structure::new(
        tag,
        line.xref.map(str::to_owned),
        line.pointer.map(str::to_owned),
        line.payload().to_owned(),
        line.level,
        line.number,
    )
}
