//! The schema assigns a type identifier to every structure from its tag and
//! the type identifier of its parent, and a payload kind to every type
//! identifier.
//!
//! A schema is plain configuration data: it is loaded once (the built-in
//! GEDCOM 7 schema is embedded as JSON), shared behind an [`Arc`] and never
//! mutated afterwards, so any number of parses may use it at the same time.
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use seahash::SeaHasher;
use serde::Deserialize;

use crate::error::{GedcomError, Result};

// reserved tags that the parser and the type resolver treat specially
pub const HEAD: &str = "HEAD";
pub const TRLR: &str = "TRLR";
pub const SCHMA: &str = "SCHMA";
pub const TAG: &str = "TAG";
pub const CONT: &str = "CONT";

pub const HEAD_PSEUDOSTRUCTURE: &str = "HEAD pseudostructure";
pub const TRLR_PSEUDOSTRUCTURE: &str = "TRLR pseudostructure";

/// A tag containing this is already a fully qualified type identifier.
pub const URI_MARKER: &str = "://";

// substructures of records live under the empty parent
const DOCUMENT_ROOT: &str = "";

const GEDCOM7_JSON: &str = include_str!("../data/gedcom7.json");

pub type TagHasher = BuildHasherDefault<SeaHasher>;
type TagMap = HashMap<String, String, TagHasher>;

lazy_static! {
    static ref GEDCOM7: Arc<Schema> = Arc::new(
        Schema::from_json(GEDCOM7_JSON).expect("the embedded GEDCOM 7 schema is valid JSON")
    );
}

/// The value family a payload is cast into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Boolean,
    Integer,
    Text,
    Language,
    FilePath,
    Pointer,
    ListText,
    ListEnum,
    Enum,
    MediaType,
    PersonalName,
    Time,
    Age,
    DateExact,
    Date,
    DatePeriod,
    DateRange,
    DateApprox,
    /// Any of the date shapes, tried in a fixed order.
    DateValue,
    /// The type is known but declares no payload.
    Untyped,
}

impl PayloadKind {
    const ALL: [PayloadKind; 20] = [
        Self::Boolean,
        Self::Integer,
        Self::Text,
        Self::Language,
        Self::FilePath,
        Self::Pointer,
        Self::ListText,
        Self::ListEnum,
        Self::Enum,
        Self::MediaType,
        Self::PersonalName,
        Self::Time,
        Self::Age,
        Self::DateExact,
        Self::Date,
        Self::DatePeriod,
        Self::DateRange,
        Self::DateApprox,
        Self::DateValue,
        Self::Untyped,
    ];

    /// Maps a payload URI, as found in the schema's payload table.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let kind = match uri {
            "Y|<NULL>" => Self::Boolean,
            "http://www.w3.org/2001/XMLSchema#string" => Self::Text,
            "http://www.w3.org/2001/XMLSchema#Language" => Self::Language,
            "http://www.w3.org/2001/XMLSchema#nonNegativeInteger" => Self::Integer,
            "http://www.w3.org/ns/dcat#mediaType" => Self::MediaType,
            "https://gedcom.io/terms/v7/type-Age" => Self::Age,
            "https://gedcom.io/terms/v7/type-Date" => Self::DateValue,
            "https://gedcom.io/terms/v7/type-Date#exact" => Self::DateExact,
            "https://gedcom.io/terms/v7/type-Date#period" => Self::DatePeriod,
            "https://gedcom.io/terms/v7/type-Enum" => Self::Enum,
            "https://gedcom.io/terms/v7/type-List#Enum" => Self::ListEnum,
            "https://gedcom.io/terms/v7/type-List#Text" => Self::ListText,
            "https://gedcom.io/terms/v7/type-Name" => Self::PersonalName,
            "https://gedcom.io/terms/v7/type-Time" => Self::Time,
            "https://gedcom.io/terms/v7/type-FilePath" => Self::FilePath,
            pointer if pointer.starts_with("@<") && pointer.ends_with(">@") => Self::Pointer,
            _ => return None,
        };
        Some(kind)
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Text => "Text",
            Self::Language => "Language",
            Self::FilePath => "FilePath",
            Self::Pointer => "Pointer",
            Self::ListText => "ListText",
            Self::ListEnum => "ListEnum",
            Self::Enum => "Enum",
            Self::MediaType => "MediaType",
            Self::PersonalName => "PersonalName",
            Self::Time => "Time",
            Self::Age => "Age",
            Self::DateExact => "DateExact",
            Self::Date => "Date",
            Self::DatePeriod => "DatePeriod",
            Self::DateRange => "DateRange",
            Self::DateApprox => "DateApprox",
            Self::DateValue => "DateValue",
            Self::Untyped => "Untyped",
        }
    }
}
impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for PayloadKind {
    type Err = GedcomError;
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GedcomError::Schema(format!("unknown payload kind {s}")))
    }
}

/// Substructure and payload tables.
///
/// ```json
/// { "substructures": { "<parent type id>": { "<TAG>": "<child type id>" } },
///   "payloads": { "<type id>": "<payload uri>" } }
/// ```
/// Record types are listed under the empty parent `""`; a `null` payload
/// marks a type without a payload.
#[derive(Debug, Deserialize)]
pub struct Schema {
    substructures: HashMap<String, TagMap, TagHasher>,
    payloads: HashMap<String, Option<String>, TagHasher>,
}

impl Schema {
    /// The built-in GEDCOM 7 schema, parsed on first use and shared afterwards.
    pub fn gedcom7() -> Arc<Schema> {
        Arc::clone(&GEDCOM7)
    }
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
    /// Type identifier of a structure without a parent.
    pub fn root_type(&self, tag: &str) -> Result<&str> {
        match tag {
            HEAD => Ok(HEAD_PSEUDOSTRUCTURE),
            TRLR => Ok(TRLR_PSEUDOSTRUCTURE),
            _ => self.substructure(DOCUMENT_ROOT, tag),
        }
    }
    /// Type identifier of a `tag` structure nested under a `parent_type` structure.
    pub fn substructure(&self, parent_type: &str, tag: &str) -> Result<&str> {
        self.substructures
            .get(parent_type)
            .and_then(|tags| tags.get(tag))
            .map(String::as_str)
            .ok_or_else(|| GedcomError::UnresolvedType {
                tag: tag.to_owned(),
                parent: if parent_type == DOCUMENT_ROOT {
                    String::from("the document root")
                } else {
                    parent_type.to_owned()
                },
            })
    }
    /// `None` when the type identifier is not in the payload table at all,
    /// or its payload URI is not one we know how to cast.
    pub fn payload_kind(&self, type_id: &str) -> Option<PayloadKind> {
        match self.payloads.get(type_id)? {
            Some(uri) => PayloadKind::from_uri(uri),
            None => Some(PayloadKind::Untyped),
        }
    }
    pub fn contains_type(&self, type_id: &str) -> bool {
        self.payloads.contains_key(type_id)
    }
    pub fn len(&self) -> usize {
        self.payloads.len()
    }
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
