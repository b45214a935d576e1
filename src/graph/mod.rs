//! Model type graph
//!
//! The modeling language's meta-model as a graph of class and property
//! nodes, compiled once from the definition documents by [`builder`] and
//! queried read-only afterwards ([`query`]). Nodes live in an arena keyed
//! by qualified identifier; adjacency (subclasses, declared properties,
//! polymorphic ranges) is by identifier, so a node can be referenced by an
//! edge before the edge that defines it arrives. After the build completes
//! the graph is never mutated.

pub mod builder;
pub mod query;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::keywords;

/// Container kind of a JSON-LD context entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerKind {
    #[default]
    None,
    /// `@list` / `@set`: the property holds an array
    Array,
    /// `@language`: the property holds a language-tagged string map
    Language,
}

/// Build-time record of a context entry: the short name a document author
/// writes plus the entry's container kind. Not part of the finished graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextNode {
    pub name: String,
    pub container: ContainerKind,
}

/// Value constraints attached to a class or property node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ConstraintNode {
    /// True if at least one constraint field is set
    pub fn is_meaningful(&self) -> bool {
        self.min_items.is_some()
            || self.max_items.is_some()
            || self.min_length.is_some()
            || self.max_length.is_some()
            || self.pattern.is_some()
            || !self.required.is_empty()
    }
}

/// Availability window of a node across language versions.
///
/// Re-introduction after removal is unsupported: a node has at most one
/// window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_since: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_since: Option<u32>,
}

impl VersionNode {
    /// A node exists at `version` iff its window covers it
    pub fn available_at(&self, version: u32) -> bool {
        self.include_since.map_or(true, |since| since <= version)
            && self.exclude_since.map_or(true, |until| until > version)
    }

    /// True if at least one bound is set
    pub fn is_meaningful(&self) -> bool {
        self.include_since.is_some() || self.exclude_since.is_some()
    }
}

/// A class of the meta-model: an object shape, an enumeration, or an
/// abstract grouping of subclasses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
    /// Subclass ids, in edge order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Declared property ids; after expansion also the inherited ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    /// Enumeration value names; non-empty marks this class as an enum
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<ConstraintNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionNode>,
}

/// A property of the meta-model, with a polymorphic "is-a one of" range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Ordered class-id alternatives this property's value may conform to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<ConstraintNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionNode>,
}

/// The compiled model graph
///
/// Built once by [`builder::GraphBuilder`], immutable afterwards. Callers
/// must check [`ModelGraph::initialized`] before querying: a missing or
/// malformed definition set leaves the graph empty rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelGraph {
    pub(crate) class_nodes: HashMap<String, ClassNode>,
    pub(crate) property_nodes: HashMap<String, PropertyNode>,
    /// Short name → qualified id
    pub(crate) reversed_index: HashMap<String, String>,
    /// Context document URI → language version
    pub(crate) context_versions: HashMap<String, u32>,
    pub(crate) vocabulary: String,
}

impl ModelGraph {
    /// Check if the graph was built from a usable definition set
    pub fn initialized(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Base URI prefix shared by all vocabulary identifiers
    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    /// Qualify a short name into a node identifier
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.vocabulary, name)
    }

    /// Number of class nodes
    pub fn class_count(&self) -> usize {
        self.class_nodes.len()
    }

    /// Number of property nodes
    pub fn property_count(&self) -> usize {
        self.property_nodes.len()
    }

    /// The synthesized whole-document entry property, if the definition
    /// set declared both top-level document classes
    pub fn entry_node(&self) -> Option<&PropertyNode> {
        self.property_nodes.get(keywords::ENTRY)
    }
}
