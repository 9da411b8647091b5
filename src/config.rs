//! Layered settings for the parser.
//!
//! The embedded `defaults/gedcom7.default.toml` is always the base layer.
//! [`Loader`] can put files, `GEDCOM7_*` environment variables and single
//! overrides on top before deserializing into [`Settings`].
//!
//! ```toml
//! [parser]
//! mode = "strict"
//!
//! [schema]
//! path = "custom-schema.json"
//! ```
//! The same keys can be given in the environment as `GEDCOM7_PARSER__MODE`
//! and `GEDCOM7_SCHEMA__PATH`.

// used to layer the sources
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::ParseMode;

const DEFAULT_TOML: &str = include_str!("../defaults/gedcom7.default.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub parser: ParserSettings,
    #[serde(default)]
    pub schema: SchemaSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParserSettings {
    #[serde(default)]
    pub mode: ParseMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchemaSettings {
    /// A schema JSON document used instead of the built-in GEDCOM 7 schema.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }
    /// Layers a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }
    /// Layers a TOML file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }
    pub fn with_environment(mut self) -> Self {
        let source = Environment::with_prefix("GEDCOM7")
            .prefix_separator("_")
            .separator("__");
        self.builder = self.builder.add_source(source);
        self
    }
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }
    pub fn build(self) -> Result<Settings> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<Settings> {
    Loader::new().build()
}
