//! gedcom7 – a parser and typed value caster for GEDCOM 7 genealogical data.
//!
//! A GEDCOM document is a sequence of lines, each carrying a level number, an
//! optional cross-reference identifier, a tag and an optional payload. The
//! levels nest the lines into a tree of *structures*:
//! * A top-level structure is a *record* (`INDI`, `FAM`, `SOUR`, ...), with the
//!   `HEAD` header first and the `TRLR` trailer last.
//! * Every structure has a *type identifier*, a URI found from its tag and the
//!   type identifier of its parent through the [`schema::Schema`].
//! * The type identifier decides the *payload kind*, and with it how the
//!   payload text is cast into a [`value::Value`].
//!
//! Parsing never interprets payloads: type identifiers and values are worked
//! out on demand from a [`structure::Node`], so a document with payloads that
//! do not fit their grammar still parses and only the offending values fail.
//!
//! ## Modules
//! * [`tokenizer`] – Splits the text into lines and matches the line grammar.
//! * [`parser`] – Assembles lines into the structure tree, folding `CONT` lines
//!   and honoring extension tags declared in `HEAD.SCHMA`.
//! * [`structure`] – The [`structure::Document`] arena and [`structure::Node`] handles.
//! * [`schema`] – Substructure and payload tables, the built-in GEDCOM 7 schema.
//! * [`cast`] – Payload grammars applied per payload kind.
//! * [`value`] – Typed values: ages, times, the date shapes, names, media types.
//! * [`convert`] – Exact dates and times as `chrono` types.
//! * [`config`] – Layered settings for the parse mode and schema.
//!
//! ## Quick Start
//! ```
//! use gedcom7::value::{PersonalName, Value};
//! let document = gedcom7::loads(
//!     "0 HEAD\n1 GEDC\n2 VERS 7.0\n0 @I1@ INDI\n1 NAME John /Doe/\n0 TRLR\n",
//! ).unwrap();
//! let person = document.record("@I1@").unwrap();
//! let name = person.first_child_with_tag("NAME").unwrap();
//! assert_eq!(name.type_id().unwrap(), "https://gedcom.io/terms/v7/INDI-NAME");
//! assert_eq!(
//!     name.value().unwrap(),
//!     Some(Value::PersonalName(PersonalName {
//!         fullname: "John Doe".into(),
//!         surname: Some("Doe".into()),
//!     }))
//! );
//! ```
//!
//! ## Parse Modes
//! By default malformed lines are logged through `tracing` and skipped. A
//! parser in [`parser::ParseMode::Strict`] fails on them instead, reporting
//! the line number.

pub mod cast;
pub mod config;
pub mod convert;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod schema;
pub mod structure;
pub mod tokenizer;
pub mod value;

pub use error::{GedcomError, Result};
pub use parser::{ParseMode, Parser};
pub use schema::{PayloadKind, Schema};
pub use structure::{Document, Node};
pub use value::Value;

/// Parses GEDCOM text with the built-in schema, skipping malformed lines.
pub fn loads(text: &str) -> Result<Document> {
    Parser::new().parse(text)
}
