//! Span-tracking JSON document trees
//!
//! The validation engine never works on raw text; it walks a tree of
//! [`JsonNode`]s in which every node carries its byte offset and length in
//! the source document. Diagnostics point back into the text through these
//! spans. The tree shape is the engine's input contract: any producer that
//! builds the same shape can feed the validator. [`parse`] is the bundled
//! reference producer.

mod parse;

pub use parse::parse;

use serde::{Deserialize, Serialize};

/// Kind of a JSON tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    /// An object member; its two children are the name node and value node
    Property,
}

/// Scalar payload of a leaf node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// A node of the parsed document tree with its source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonNode {
    pub kind: JsonKind,
    /// Byte offset of the node's first character
    pub offset: usize,
    /// Byte length of the node's source text
    pub length: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonScalar>,
}

/// Name and value of an object member
#[derive(Debug, Clone, Copy)]
pub struct PropertyPair<'a> {
    pub name: &'a JsonNode,
    pub value: &'a JsonNode,
}

impl JsonNode {
    /// Exclusive end offset of the node's span
    pub fn span_end(&self) -> usize {
        self.offset + self.length
    }

    /// Check if another node's span nests inside this one
    pub fn encloses(&self, other: &JsonNode) -> bool {
        self.offset <= other.offset && other.span_end() <= self.span_end()
    }

    /// View a Property node as a name/value pair
    pub fn as_property(&self) -> Option<PropertyPair<'_>> {
        if self.kind != JsonKind::Property || self.children.len() != 2 {
            return None;
        }
        Some(PropertyPair {
            name: &self.children[0],
            value: &self.children[1],
        })
    }

    /// Look up a direct member of an Object node by name
    pub fn member(&self, name: &str) -> Option<&JsonNode> {
        if self.kind != JsonKind::Object {
            return None;
        }
        self.children
            .iter()
            .filter_map(JsonNode::as_property)
            .find(|pair| pair.name.string_value() == Some(name))
            .map(|pair| pair.value)
    }

    /// Scalar string payload, if this is a string node
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            Some(JsonScalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Scalar number payload, if this is a number node
    pub fn number_value(&self) -> Option<f64> {
        match self.value {
            Some(JsonScalar::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Scalar boolean payload, if this is a boolean node
    pub fn bool_value(&self) -> Option<bool> {
        match self.value {
            Some(JsonScalar::Bool(b)) => Some(b),
            _ => None,
        }
    }

    /// Path of nodes from this node down to `target`, inclusive on both
    /// ends. Spans nest strictly in a parse tree, so containment is enough
    /// to steer the descent.
    pub fn path_to<'a>(&'a self, target: &JsonNode) -> Option<Vec<&'a JsonNode>> {
        if !self.encloses(target) {
            return None;
        }
        if self.offset == target.offset && self.length == target.length && self.kind == target.kind
        {
            return Some(vec![self]);
        }
        for child in &self.children {
            if let Some(mut tail) = child.path_to(target) {
                let mut path = Vec::with_capacity(tail.len() + 1);
                path.push(self);
                path.append(&mut tail);
                return Some(path);
            }
        }
        None
    }
}
