//! The structure tree of a parsed document.
//!
//! Structures are kept in an arena owned by the [`Document`] and refer to
//! each other through [`StructureId`] indexes. A [`Node`] pairs an index with
//! the document it belongs to and is what callers navigate with.

// used to share the schema between documents
use std::sync::Arc;
// used to resolve the type identifier at most once per structure
use std::sync::OnceLock;
// used to print out readable forms of a node
use std::fmt;

use crate::cast;
use crate::error::Result;
use crate::parser::ExtensionKeeper;
use crate::schema::{PayloadKind, Schema, URI_MARKER};
use crate::value::Value;

// ------------- Structure -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureId(usize);

impl StructureId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A structure as recorded by the parser. Continuation lines are already
/// folded into the text.
#[derive(Debug)]
pub struct Structure {
    tag: String,
    xref: Option<String>,
    pointer: Option<String>,
    text: String,
    level: usize,
    line: usize,
    parent: Option<StructureId>,
    children: Vec<StructureId>,
    type_id: OnceLock<String>,
}

impl Structure {
    pub fn new(
        tag: String,
        xref: Option<String>,
        pointer: Option<String>,
        text: String,
        level: usize,
        line: usize,
    ) -> Self {
        Self {
            tag,
            xref,
            pointer,
            text,
            level,
            line,
            parent: None,
            children: Vec::new(),
            type_id: OnceLock::new(),
        }
    }
    /// The tag, or the type identifier an extension tag was declared with.
    pub fn tag(&self) -> &str {
        &self.tag
    }
    pub fn xref(&self) -> Option<&str> {
        self.xref.as_deref()
    }
    pub fn pointer(&self) -> Option<&str> {
        self.pointer.as_deref()
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn level(&self) -> usize {
        self.level
    }
    pub fn line(&self) -> usize {
        self.line
    }
}

// ------------- Document -------------
/// A parsed GEDCOM document: its top-level records in order, and every
/// structure below them.
#[derive(Debug)]
pub struct Document {
    schema: Arc<Schema>,
    structures: Vec<Structure>,
    records: Vec<StructureId>,
    extensions: ExtensionKeeper,
}

impl Document {
    pub(crate) fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            structures: Vec::new(),
            records: Vec::new(),
            extensions: ExtensionKeeper::new(),
        }
    }
    pub(crate) fn push(&mut self, mut structure: Structure, parent: Option<StructureId>) -> StructureId {
        let id = StructureId(self.structures.len());
        structure.parent = parent;
        self.structures.push(structure);
        match parent {
            Some(parent) => self.structures[parent.0].children.push(id),
            None => self.records.push(id),
        }
        id
    }
    pub(crate) fn continue_text(&mut self, id: StructureId, text: &str) {
        let owner = &mut self.structures[id.0].text;
        owner.push('\n');
        owner.push_str(text);
    }
    pub(crate) fn structure(&self, id: StructureId) -> &Structure {
        &self.structures[id.0]
    }
    pub(crate) fn set_extensions(&mut self, extensions: ExtensionKeeper) {
        self.extensions = extensions;
    }
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    /// Extension tags declared in the header, with their type identifiers.
    pub fn extensions(&self) -> &ExtensionKeeper {
        &self.extensions
    }
    /// Top-level structures in document order, the header and trailer included.
    pub fn records(&self) -> Vec<Node<'_>> {
        self.records.iter().map(|id| self.node(*id)).collect()
    }
    /// Number of top-level structures.
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Number of structures at any level.
    pub fn structure_count(&self) -> usize {
        self.structures.len()
    }
    /// Every structure in document order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.structures.len()).map(|index| self.node(StructureId(index)))
    }
    pub fn get(&self, id: StructureId) -> Option<Node<'_>> {
        (id.0 < self.structures.len()).then(|| self.node(id))
    }
    /// The record carrying the given cross-reference identifier.
    pub fn record(&self, xref: &str) -> Option<Node<'_>> {
        self.records()
            .into_iter()
            .find(|record| record.xref() == Some(xref))
    }
    fn node(&self, id: StructureId) -> Node<'_> {
        Node { document: self, id }
    }
}

// ------------- Node -------------
/// A structure together with the document it lives in.
#[derive(Clone, Copy)]
pub struct Node<'d> {
    document: &'d Document,
    id: StructureId,
}

impl<'d> Node<'d> {
    pub fn id(&self) -> StructureId {
        self.id
    }
    pub fn structure(&self) -> &'d Structure {
        self.document.structure(self.id)
    }
    pub fn tag(&self) -> &'d str {
        self.structure().tag()
    }
    pub fn xref(&self) -> Option<&'d str> {
        self.structure().xref()
    }
    pub fn pointer(&self) -> Option<&'d str> {
        self.structure().pointer()
    }
    /// The payload text, continuation lines joined with `\n`. Empty when the
    /// payload is a pointer or absent.
    pub fn text(&self) -> &'d str {
        self.structure().text()
    }
    pub fn level(&self) -> usize {
        self.structure().level()
    }
    pub fn line(&self) -> usize {
        self.structure().line()
    }
    pub fn parent(&self) -> Option<Node<'d>> {
        self.structure().parent.map(|id| self.document.node(id))
    }
    pub fn children(&self) -> Vec<Node<'d>> {
        self.structure()
            .children
            .iter()
            .map(|id| self.document.node(*id))
            .collect()
    }
    pub fn children_with_tag<'t>(self, tag: &'t str) -> impl Iterator<Item = Node<'d>> + 't
    where
        'd: 't,
    {
        let document = self.document;
        self.structure()
            .children
            .iter()
            .map(move |id| document.node(*id))
            .filter(move |child| child.tag() == tag)
    }
    pub fn first_child_with_tag(&self, tag: &str) -> Option<Node<'d>> {
        self.children_with_tag(tag).next()
    }
    /// The type identifier, resolved from the tag and the parent's type
    /// identifier on first use and cached afterwards.
    ///
    /// Ancestors are resolved first, top-down and without recursion, so
    /// arbitrarily deep nesting fails with an error at the first structure
    /// the schema does not allow.
    pub fn type_id(&self) -> Result<&'d str> {
        if let Some(resolved) = self.cached_type_id() {
            return Ok(resolved);
        }
        // unresolved structures from this one up to a cached, URI or root one
        let mut chain = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current {
            if node.cached_type_id().is_some() {
                break;
            }
            chain.push(node);
            if node.tag().contains(URI_MARKER) {
                break;
            }
            current = node.parent();
        }
        let schema = self.document.schema();
        let mut parent_type = chain
            .last()
            .and_then(|top| top.parent())
            .and_then(|parent| parent.cached_type_id());
        let mut resolved = "";
        for node in chain.into_iter().rev() {
            let structure = node.structure();
            let found = if structure.tag.contains(URI_MARKER) {
                structure.tag.clone()
            } else {
                let found = match parent_type {
                    Some(parent_type) => schema.substructure(parent_type, &structure.tag)?,
                    None => schema.root_type(&structure.tag)?,
                };
                found.to_owned()
            };
            resolved = structure.type_id.get_or_init(|| found).as_str();
            parent_type = Some(resolved);
        }
        Ok(resolved)
    }
    fn cached_type_id(&self) -> Option<&'d str> {
        self.structure().type_id.get().map(String::as_str)
    }
    /// The payload text cast according to the structure's type.
    pub fn value(&self) -> Result<Option<Value>> {
        let type_id = self.type_id()?;
        cast::cast_value(self.text(), type_id, self.document.schema())
    }
    /// The payload text cast as the given kind, whatever the structure's type.
    pub fn value_as(&self, kind: PayloadKind) -> Result<Option<Value>> {
        let text = self.text();
        if text.is_empty() {
            return Ok(None);
        }
        cast::cast_as(text, kind).map(Some)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}
impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("line", &self.line())
            .field("level", &self.level())
            .field("tag", &self.tag())
            .field("xref", &self.xref())
            .field("pointer", &self.pointer())
            .field("text", &self.text())
            .finish()
    }
}
