//! Definition document compiler
//!
//! Compiles the three definition documents (JSON-LD context, constraint
//! rules, RDF edge list) into a [`ModelGraph`]. The build is strictly
//! best-effort: a missing or malformed document leaves the graph empty and
//! callers detect that through `initialized()`. Individual malformed edges
//! or constraint entries are skipped, never fatal.
//!
//! Nodes are created lazily the first time an edge mentions them (an edge
//! may reference a node before the edge that defines it) and enriched from
//! their context entry at creation: short label, array flag, language
//! marker range, by-label constraint and version gate.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::{
    ClassNode, ConstraintNode, ContainerKind, ContextNode, ModelGraph, PropertyNode, VersionNode,
};
use crate::error::{GraphError, Result};
use crate::keywords::{self, edge_type, node_type, value_schema};

/// One row of the edge-list document
#[derive(Debug, Deserialize)]
struct Edge {
    #[serde(rename = "SourceNode")]
    source: EdgeEnd,
    #[serde(rename = "TargetNode")]
    target: EdgeEnd,
    #[serde(rename = "Label")]
    label: String,
}

#[derive(Debug, Deserialize)]
struct EdgeEnd {
    #[serde(rename = "Id", default)]
    id: Option<String>,
    #[serde(rename = "Value", default)]
    value: Option<Value>,
}

/// A constraint-document entry: constraint fields and the optional version
/// window of the node carrying the same label
#[derive(Debug, Deserialize)]
struct ConstraintEntry {
    #[serde(flatten)]
    constraint: ConstraintNode,
    #[serde(flatten)]
    version: VersionNode,
}

/// One-shot compiler from definition documents to a [`ModelGraph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: ModelGraph,
    context_nodes: HashMap<String, ContextNode>,
    constraint_nodes: HashMap<String, ConstraintNode>,
    version_gates: HashMap<String, VersionNode>,
}

impl ModelGraph {
    /// Load and compile a definition set from a directory holding
    /// `context.json`, `constraint.json` and `graph.json`.
    ///
    /// Never fails: on any load error the cause is logged and an empty,
    /// uninitialized graph is returned.
    pub fn from_directory(dir: &Path) -> Self {
        match load_documents(dir) {
            Ok((context, constraint, edges)) => Self::from_documents(&context, &constraint, &edges),
            Err(err) => {
                warn!(%err, path = %dir.display(), "definition set unavailable; model graph left empty");
                ModelGraph::default()
            }
        }
    }

    /// Compile a definition set from already-parsed documents
    pub fn from_documents(context: &Value, constraint: &Value, edges: &Value) -> Self {
        GraphBuilder::default().build(context, constraint, edges)
    }
}

fn load_documents(dir: &Path) -> Result<(Value, Value, Value)> {
    Ok((
        read_json(dir, keywords::CONTEXT_FILE)?,
        read_json(dir, keywords::CONSTRAINT_FILE)?,
        read_json(dir, keywords::GRAPH_FILE)?,
    ))
}

fn read_json(dir: &Path, name: &str) -> Result<Value> {
    let text = fs::read_to_string(dir.join(name))
        .map_err(|_| GraphError::MissingDefinition(name.to_string()))?;
    serde_json::from_str(&text).map_err(|err| GraphError::MalformedDefinition {
        name: name.to_string(),
        reason: err.to_string(),
    })
}

impl GraphBuilder {
    /// Run the build phases in order and hand the finished graph over
    pub fn build(mut self, context: &Value, constraint: &Value, edges: &Value) -> ModelGraph {
        if !self.build_context(context) {
            warn!("context definition has no usable @context/@vocab; model graph left empty");
            return ModelGraph::default();
        }
        self.build_constraint(constraint);
        self.build_edges(edges);
        self.adjust_nodes();
        self.expand_properties();
        self.build_entry_node();
        debug!(
            classes = self.graph.class_count(),
            properties = self.graph.property_count(),
            "model graph built"
        );
        self.graph
    }

    /// Record the vocabulary and one [`ContextNode`] per short name, plus
    /// the reverse short-name index
    fn build_context(&mut self, document: &Value) -> bool {
        let Some(context) = document.get(keywords::CONTEXT).and_then(Value::as_object) else {
            return false;
        };
        let Some(vocabulary) = context.get(keywords::VOCABULARY).and_then(Value::as_str) else {
            return false;
        };
        self.graph.vocabulary = vocabulary.to_string();
        for (key, entry) in context {
            if keywords::is_reserved(key) {
                continue;
            }
            let (fragment, container) = match entry {
                Value::String(fragment) => (fragment.as_str(), ContainerKind::None),
                Value::Object(fields) => {
                    let Some(fragment) = fields.get(keywords::ID).and_then(Value::as_str) else {
                        debug!(key = %key, "context entry has no @id; skipping");
                        continue;
                    };
                    (fragment, resolve_container(fields))
                }
                _ => continue,
            };
            let id = self.graph.qualify(fragment);
            self.context_nodes.insert(
                id.clone(),
                ContextNode {
                    name: key.clone(),
                    container,
                },
            );
            self.graph.reversed_index.insert(key.clone(), id);
        }
        true
    }

    /// Record per-label constraints and version gates, and the context
    /// URI → version map kept under the reserved `@context` key
    fn build_constraint(&mut self, document: &Value) {
        let Some(entries) = document.as_object() else {
            warn!("constraint definition is not an object; skipping");
            return;
        };
        for (key, entry) in entries {
            if key == keywords::CONTEXT {
                let Some(versions) = entry.as_object() else {
                    continue;
                };
                for (version_key, uri) in versions {
                    let version = version_key
                        .strip_prefix('v')
                        .and_then(|digits| digits.parse::<u32>().ok());
                    if let (Some(uri), Some(version)) = (uri.as_str(), version) {
                        self.graph.context_versions.insert(uri.to_string(), version);
                    }
                }
                continue;
            }
            match serde_json::from_value::<ConstraintEntry>(entry.clone()) {
                Ok(parsed) => {
                    if parsed.version.is_meaningful() {
                        self.version_gates.insert(key.clone(), parsed.version);
                    }
                    if parsed.constraint.is_meaningful() {
                        self.constraint_nodes.insert(key.clone(), parsed.constraint);
                    }
                }
                Err(err) => debug!(key = %key, %err, "skipping malformed constraint entry"),
            }
        }
    }

    /// Dispatch every well-formed edge row on its RDF predicate
    fn build_edges(&mut self, document: &Value) {
        let Some(rows) = document.get("Edges").and_then(Value::as_array) else {
            warn!("graph definition has no Edges array; skipping");
            return;
        };
        for row in rows {
            match serde_json::from_value::<Edge>(row.clone()) {
                Ok(edge) => self.handle_edge(&edge),
                Err(err) => debug!(%err, "skipping malformed edge"),
            }
        }
    }

    fn handle_edge(&mut self, edge: &Edge) {
        match edge.label.as_str() {
            edge_type::TYPE => self.handle_type_edge(edge),
            edge_type::LABEL => self.handle_label_edge(edge),
            edge_type::DOMAIN => self.handle_domain_edge(edge),
            edge_type::RANGE => self.handle_range_edge(edge),
            edge_type::SUB_CLASS_OF => self.handle_subclass_edge(edge),
            edge_type::COMMENT => self.handle_comment_edge(edge),
            _ => {}
        }
    }

    /// A Type edge either declares a class/property node, or — when the
    /// target is neither marker — records the source as an enum value of
    /// the target class
    fn handle_type_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(target)) = (edge.source.id.as_deref(), edge.target.id.as_deref())
        else {
            return;
        };
        match target {
            node_type::CLASS => {
                self.ensure_class_node(id);
            }
            node_type::PROPERTY => {
                self.ensure_property_node(id);
            }
            _ => {
                let enum_value = self
                    .context_nodes
                    .get(id)
                    .map(|context| context.name.clone())
                    .unwrap_or_else(|| id.to_string());
                self.ensure_class_node(target).enums.push(enum_value);
            }
        }
    }

    /// Labels apply to class nodes only and never overwrite a label set
    /// earlier; properties got theirs from their context entry
    fn handle_label_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(label)) = (
            edge.source.id.as_deref(),
            edge.target.value.as_ref().and_then(Value::as_str),
        ) else {
            return;
        };
        if self.graph.property_nodes.contains_key(id) {
            return;
        }
        let constraint = self.constraint_nodes.get(label).cloned();
        let gate = self.version_gates.get(label).copied();
        let class = self.ensure_class_node(id);
        if class.label.is_none() {
            class.label = Some(label.to_string());
            class.constraint = constraint;
            if gate.is_some() {
                class.version = gate;
            }
        }
    }

    /// Domain: the property belongs to the target class
    fn handle_domain_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(class_id)) = (edge.source.id.as_deref(), edge.target.id.as_deref())
        else {
            return;
        };
        self.ensure_property_node(id);
        self.ensure_class_node(class_id)
            .properties
            .push(id.to_string());
    }

    /// Range: the property accepts values of the target class; multiple
    /// edges accumulate into a polymorphic union
    fn handle_range_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(class_id)) = (edge.source.id.as_deref(), edge.target.id.as_deref())
        else {
            return;
        };
        self.ensure_class_node(class_id);
        self.ensure_property_node(id).range.push(class_id.to_string());
    }

    /// SubClassOf: register the source as a child of the target class
    fn handle_subclass_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(base_id)) = (edge.source.id.as_deref(), edge.target.id.as_deref())
        else {
            return;
        };
        self.ensure_class_node(id);
        self.ensure_class_node(base_id).children.push(id.to_string());
    }

    /// Comments attach to property nodes only
    fn handle_comment_edge(&mut self, edge: &Edge) {
        let (Some(id), Some(comment)) = (
            edge.source.id.as_deref(),
            edge.target.value.as_ref().and_then(Value::as_str),
        ) else {
            return;
        };
        if let Some(property) = self.graph.property_nodes.get_mut(id) {
            property.comment = Some(comment.to_string());
        }
    }

    /// Get or create a class node, enriching a fresh stub from its context
    /// entry
    fn ensure_class_node(&mut self, id: &str) -> &mut ClassNode {
        if !self.graph.class_nodes.contains_key(id) {
            let mut node = ClassNode {
                id: id.to_string(),
                ..Default::default()
            };
            if let Some(context) = self.context_nodes.get(id) {
                node.label = Some(context.name.clone());
                node.constraint = self.constraint_nodes.get(&context.name).cloned();
                node.version = self.version_gates.get(&context.name).copied();
            }
            self.graph.class_nodes.insert(id.to_string(), node);
        }
        self.graph.class_nodes.entry(id.to_string()).or_default()
    }

    /// Get or create a property node; a language-container context entry
    /// wires the language marker class into the fresh stub's range
    fn ensure_property_node(&mut self, id: &str) -> &mut PropertyNode {
        if !self.graph.property_nodes.contains_key(id) {
            let mut node = PropertyNode {
                id: id.to_string(),
                ..Default::default()
            };
            if let Some(context) = self.context_nodes.get(id).cloned() {
                node.label = Some(context.name.clone());
                node.is_array = context.container == ContainerKind::Array;
                if context.container == ContainerKind::Language {
                    let language = self.ensure_class_node(keywords::LANGUAGE);
                    language.label = Some(keywords::LANGUAGE.to_string());
                    node.range.push(keywords::LANGUAGE.to_string());
                }
                node.constraint = self.constraint_nodes.get(&context.name).cloned();
                node.version = self.version_gates.get(&context.name).copied();
            }
            self.graph.property_nodes.insert(id.to_string(), node);
        }
        self.graph.property_nodes.entry(id.to_string()).or_default()
    }

    /// Fixups that cannot be derived from the edge list
    fn adjust_nodes(&mut self) {
        // reserved identity property with a plain-string range
        self.ensure_class_node(value_schema::STRING);
        self.build_reserved_property(keywords::ID, value_schema::STRING);

        // classes that only ever appear through their subclasses
        self.mark_abstract(keywords::SCHEMA_CLASS);
        self.mark_abstract(keywords::UNIT_CLASS);

        self.patch_interface_schema();
    }

    /// Synthesize a property that is referenced everywhere but has no own
    /// edges. Stored under its reserved key, outside the vocabulary.
    fn build_reserved_property(&mut self, id: &str, range_id: &str) {
        let node = PropertyNode {
            id: id.to_string(),
            range: vec![range_id.to_string()],
            constraint: self.constraint_nodes.get(id).cloned(),
            ..Default::default()
        };
        self.graph.property_nodes.insert(id.to_string(), node);
    }

    fn mark_abstract(&mut self, name: &str) {
        let id = self.graph.qualify(name);
        if let Some(class) = self.graph.class_nodes.get_mut(&id) {
            class.is_abstract = true;
        }
    }

    /// The interface-schema property is written as the key `schema` inside
    /// an implements entry, where it may also hold a plain reference
    /// string. Relabel it and widen its range accordingly.
    fn patch_interface_schema(&mut self) {
        let id = self.graph.qualify(keywords::INTERFACE_SCHEMA_NODE);
        let constraint = self.constraint_nodes.get(keywords::ID).cloned();
        if let Some(property) = self.graph.property_nodes.get_mut(&id) {
            property.label = Some(keywords::SCHEMA_PROPERTY.to_string());
            if !property.range.is_empty() {
                property.range.push(value_schema::STRING.to_string());
                property.constraint = constraint;
            }
        }
    }

    /// Walk the subclass hierarchy breadth-first from the base class;
    /// every non-enum descendant inherits its ancestors' accumulated
    /// property list, appended after its own declared properties
    fn expand_properties(&mut self) {
        let root = self.graph.qualify(keywords::BASE_CLASS);
        if !self.graph.class_nodes.contains_key(&root) {
            return;
        }
        self.check_subclass_cycles();
        let mut queue = VecDeque::from([root]);
        let mut visited = HashSet::new();
        while let Some(id) = queue.pop_front() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let Some(parent) = self.graph.class_nodes.get(&id) else {
                continue;
            };
            let inherited = parent.properties.clone();
            let children = parent.children.clone();
            for child_id in children {
                let Some(child) = self.graph.class_nodes.get_mut(&child_id) else {
                    continue;
                };
                if !child.enums.is_empty() {
                    continue;
                }
                child.properties.extend(inherited.iter().cloned());
                queue.push_back(child_id);
            }
        }
    }

    /// The subclass relation must form a DAG; the expansion walk keeps a
    /// visited set, so a cycle degrades to a warning instead of a hang
    fn check_subclass_cycles(&self) {
        let mut hierarchy = DiGraph::<&str, ()>::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
        for id in self.graph.class_nodes.keys() {
            indices.insert(id.as_str(), hierarchy.add_node(id.as_str()));
        }
        for (id, class) in &self.graph.class_nodes {
            for child in &class.children {
                if let (Some(&base), Some(&derived)) =
                    (indices.get(id.as_str()), indices.get(child.as_str()))
                {
                    hierarchy.add_edge(base, derived, ());
                }
            }
        }
        for group in kosaraju_scc(&hierarchy) {
            let cyclic = group.len() > 1
                || group
                    .first()
                    .map_or(false, |&index| hierarchy.contains_edge(index, index));
            if cyclic {
                let members: Vec<&str> = group
                    .iter()
                    .filter_map(|&index| hierarchy.node_weight(index).copied())
                    .collect();
                warn!(
                    classes = ?members,
                    "subclass cycle detected; property expansion will not revisit these classes"
                );
            }
        }
    }

    /// Synthesize the virtual property that stands for "the whole
    /// document": its range is the set of top-level document classes
    fn build_entry_node(&mut self) {
        let interface = self.graph.qualify(keywords::INTERFACE_CLASS);
        let capability_model = self.graph.qualify(keywords::CAPABILITY_MODEL_CLASS);
        if self.graph.class_nodes.contains_key(&interface)
            && self.graph.class_nodes.contains_key(&capability_model)
        {
            let entry = PropertyNode {
                id: keywords::ENTRY.to_string(),
                range: vec![interface, capability_model],
                ..Default::default()
            };
            self.graph.property_nodes.insert(entry.id.clone(), entry);
        }
    }
}

fn resolve_container(fields: &serde_json::Map<String, Value>) -> ContainerKind {
    match fields.get(keywords::CONTAINER).and_then(Value::as_str) {
        Some(keywords::LIST) | Some(keywords::SET) => ContainerKind::Array,
        Some(keywords::LANGUAGE) => ContainerKind::Language,
        _ => ContainerKind::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vocab(name: &str) -> String {
        format!("http://example.org/test/schema/{name}")
    }

    fn context_document() -> Value {
        json!({
            "@context": {
                "@vocab": "http://example.org/test/schema/",
                "Interface": "Interface",
                "CapabilityModel": "CapabilityModel",
                "Telemetry": "Telemetry",
                "displayName": "displayName",
                "contents": { "@id": "contents", "@container": "@set" },
                "description": { "@id": "description", "@container": "@language" },
                "boolean": "boolean",
                "double": "double"
            }
        })
    }

    fn constraint_document() -> Value {
        json!({
            "@context": {
                "v1": "http://example.org/test/v1/context.json",
                "v2": "http://example.org/test/v2/context.json"
            },
            "displayName": { "minLength": 1, "maxLength": 64 },
            "Interface": { "required": ["@context", "contents"] },
            "unit": { "includeSince": 2, "minLength": 1 }
        })
    }

    fn type_edge(source: &str, target: &str) -> Value {
        json!({
            "SourceNode": { "Id": source },
            "TargetNode": { "Id": target },
            "Label": edge_type::TYPE
        })
    }

    fn id_edge(source: &str, target: &str, label: &str) -> Value {
        json!({
            "SourceNode": { "Id": source },
            "TargetNode": { "Id": target },
            "Label": label
        })
    }

    fn graph_document() -> Value {
        json!({ "Edges": [
            type_edge(&vocab("Entity"), node_type::CLASS),
            type_edge(&vocab("Interface"), node_type::CLASS),
            type_edge(&vocab("CapabilityModel"), node_type::CLASS),
            type_edge(&vocab("Telemetry"), node_type::CLASS),
            type_edge(&vocab("Schema"), node_type::CLASS),
            type_edge(&vocab("PrimitiveSchema"), node_type::CLASS),
            id_edge(&vocab("Interface"), &vocab("Entity"), edge_type::SUB_CLASS_OF),
            id_edge(&vocab("CapabilityModel"), &vocab("Entity"), edge_type::SUB_CLASS_OF),
            id_edge(&vocab("Telemetry"), &vocab("Entity"), edge_type::SUB_CLASS_OF),
            id_edge(&vocab("PrimitiveSchema"), &vocab("Schema"), edge_type::SUB_CLASS_OF),
            // enum values of PrimitiveSchema
            type_edge(&vocab("boolean"), &vocab("PrimitiveSchema")),
            type_edge(&vocab("double"), &vocab("PrimitiveSchema")),
            // displayName property on the base class
            type_edge(&vocab("displayName"), node_type::PROPERTY),
            id_edge(&vocab("displayName"), &vocab("Entity"), edge_type::DOMAIN),
            id_edge(&vocab("displayName"), value_schema::STRING, edge_type::RANGE),
            // contents on Interface, polymorphic range
            type_edge(&vocab("contents"), node_type::PROPERTY),
            id_edge(&vocab("contents"), &vocab("Interface"), edge_type::DOMAIN),
            id_edge(&vocab("contents"), &vocab("Telemetry"), edge_type::RANGE),
            {
                "SourceNode": { "Id": vocab("Schema") },
                "TargetNode": { "Value": "Schema" },
                "Label": edge_type::LABEL
            },
        ]})
    }

    fn build() -> ModelGraph {
        ModelGraph::from_documents(&context_document(), &constraint_document(), &graph_document())
    }

    #[test]
    fn context_builds_reverse_index() {
        let graph = build();
        assert!(graph.initialized());
        assert_eq!(graph.vocabulary(), "http://example.org/test/schema/");
        let interface = graph.class_node("Interface").unwrap();
        assert_eq!(interface.id, vocab("Interface"));
        assert_eq!(interface.label.as_deref(), Some("Interface"));
    }

    #[test]
    fn context_version_map_is_parsed() {
        let graph = build();
        assert_eq!(
            graph.context_version("http://example.org/test/v1/context.json"),
            1
        );
        assert_eq!(
            graph.context_version("http://example.org/test/v2/context.json"),
            2
        );
        assert_eq!(graph.context_version("http://elsewhere.org/ctx.json"), 0);
    }

    #[test]
    fn enum_values_attach_to_target_class() {
        let graph = build();
        let primitive = graph.class_node("PrimitiveSchema").unwrap();
        assert_eq!(primitive.enums, vec!["boolean", "double"]);
    }

    #[test]
    fn label_edge_does_not_override_context_label() {
        let graph = build();
        // Schema got its label from the Label edge; it had no context entry
        let schema = graph.class_node("Schema").unwrap();
        assert_eq!(schema.label.as_deref(), Some("Schema"));
        assert!(schema.is_abstract);
    }

    #[test]
    fn properties_expand_down_the_hierarchy() {
        let graph = build();
        let display_name = vocab("displayName");
        for class in ["Interface", "CapabilityModel", "Telemetry"] {
            let node = graph.class_node(class).unwrap();
            assert!(
                node.properties.contains(&display_name),
                "{class} should inherit displayName"
            );
        }
        // contents is declared on Interface only
        let telemetry = graph.class_node("Telemetry").unwrap();
        assert!(!telemetry.properties.contains(&vocab("contents")));
    }

    #[test]
    fn inherited_properties_follow_declared_ones() {
        let graph = build();
        let interface = graph.class_node("Interface").unwrap();
        let contents_at = interface
            .properties
            .iter()
            .position(|id| id == &vocab("contents"));
        let display_at = interface
            .properties
            .iter()
            .position(|id| id == &vocab("displayName"));
        assert!(contents_at.unwrap() < display_at.unwrap());
    }

    #[test]
    fn enum_classes_do_not_inherit() {
        let graph = build();
        let primitive = graph.class_node("PrimitiveSchema").unwrap();
        assert!(primitive.properties.is_empty());
    }

    #[test]
    fn entry_node_spans_document_classes() {
        let graph = build();
        let entry = graph.entry_node().unwrap();
        assert_eq!(
            entry.range,
            vec![vocab("Interface"), vocab("CapabilityModel")]
        );
        assert!(!entry.is_array);
    }

    #[test]
    fn reserved_identity_property_is_synthesized() {
        let graph = build();
        let identity = graph.property_node(keywords::ID).unwrap();
        assert_eq!(identity.range, vec![value_schema::STRING.to_string()]);
    }

    #[test]
    fn version_gate_rides_on_constraint_entry() {
        let context = json!({
            "@context": {
                "@vocab": "http://example.org/test/schema/",
                "unit": "unit"
            }
        });
        let edges = json!({ "Edges": [
            type_edge(&vocab("unit"), node_type::PROPERTY),
            id_edge(&vocab("unit"), value_schema::STRING, edge_type::RANGE),
        ]});
        let graph = ModelGraph::from_documents(&context, &constraint_document(), &edges);
        let unit = graph.property_node("unit").unwrap();
        assert_eq!(
            unit.version,
            Some(VersionNode {
                include_since: Some(2),
                exclude_since: None
            })
        );
        // the constraint half of the same entry is attached too
        assert_eq!(unit.constraint.as_ref().unwrap().min_length, Some(1));
    }

    #[test]
    fn missing_vocabulary_leaves_graph_uninitialized() {
        let graph =
            ModelGraph::from_documents(&json!({}), &constraint_document(), &graph_document());
        assert!(!graph.initialized());
        assert_eq!(graph.class_count(), 0);
    }

    #[test]
    fn malformed_edges_are_skipped() {
        let edges = json!({ "Edges": [
            { "bogus": true },
            type_edge(&vocab("Entity"), node_type::CLASS),
        ]});
        let graph = ModelGraph::from_documents(&context_document(), &json!({}), &edges);
        assert!(graph.initialized());
        assert_eq!(graph.class_count(), 2); // Entity + synthesized string class
    }

    #[test]
    fn subclass_cycle_does_not_hang_expansion() {
        let edges = json!({ "Edges": [
            type_edge(&vocab("Entity"), node_type::CLASS),
            type_edge(&vocab("A"), node_type::CLASS),
            type_edge(&vocab("B"), node_type::CLASS),
            id_edge(&vocab("A"), &vocab("Entity"), edge_type::SUB_CLASS_OF),
            id_edge(&vocab("B"), &vocab("A"), edge_type::SUB_CLASS_OF),
            id_edge(&vocab("A"), &vocab("B"), edge_type::SUB_CLASS_OF),
        ]});
        let graph = ModelGraph::from_documents(&context_document(), &json!({}), &edges);
        // reaching here is the assertion; also sanity-check the nodes exist
        assert!(graph.class_node("A").is_some());
        assert!(graph.class_node("B").is_some());
    }

    #[test]
    fn from_directory_degrades_silently() {
        let dir = tempfile::tempdir().unwrap();
        let graph = ModelGraph::from_directory(dir.path());
        assert!(!graph.initialized());

        std::fs::write(
            dir.path().join(keywords::CONTEXT_FILE),
            context_document().to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join(keywords::CONSTRAINT_FILE),
            constraint_document().to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join(keywords::GRAPH_FILE),
            graph_document().to_string(),
        )
        .unwrap();
        let graph = ModelGraph::from_directory(dir.path());
        assert!(graph.initialized());
    }
}
