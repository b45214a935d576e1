//! Twindl Model Graph
//!
//! A type graph and validation engine for a JSON-LD based digital twin
//! modeling language. Three declarative definition documents (a vocabulary
//! context, constraint rules, and an RDF-style edge list) are compiled once
//! into an immutable in-memory graph of class and property nodes; model
//! documents are then validated against that graph as parsed JSON trees,
//! producing diagnostics with exact text-offset spans.
//!
//! ## Architecture
//!
//! ```text
//! definitions/
//! ├── context.json     @vocab + short-name mapping (JSON-LD context)
//! ├── constraint.json  per-label constraints + context version map
//! └── graph.json       RDF edge list (type/label/domain/range/subClassOf)
//!          │
//!          ▼ build once
//!     ModelGraph  ──────  read-only queries (ranges, children, enums)
//!          │
//!          ▼ per document
//!     Validator(json tree) ──► Vec<Problem { offset, length, message }>
//! ```
//!
//! The engine never parses text itself during validation; it consumes a
//! [`syntax::JsonNode`] tree produced by the bundled reader (or any other
//! producer of the same shape) and never mutates it.

pub mod error;
pub mod graph;
pub mod keywords;
pub mod syntax;
pub mod validate;

pub use error::{GraphError, Result};
pub use graph::{ClassNode, ConstraintNode, ModelGraph, PropertyNode, VersionNode};
pub use syntax::{JsonKind, JsonNode, PropertyPair};
pub use validate::{Problem, Validator};
