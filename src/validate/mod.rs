//! Document validation
//!
//! A recursive descent over a parsed document tree, driven by the model
//! graph. Every violation becomes a [`Problem`] pointing at the offending
//! span; a malformed document can only ever produce more problems, never
//! an error or panic. The pass is a pure read of the graph and the tree,
//! so validating the same document twice yields the identical list.

pub mod language;

use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::graph::{ClassNode, ModelGraph, PropertyNode};
use crate::keywords::{self, value_schema};
use crate::syntax::{JsonKind, JsonNode, PropertyPair};

/// Diagnostic message fragments. List-shaped messages join their items
/// with line feeds.
pub mod message {
    pub const MISSING_TYPE: &str = "@type is missing.";
    pub const INVALID_TYPE: &str = "Invalid type. Valid types:";
    pub const UNEXPECTED_PROPERTY: &str = "is unexpected.";
    pub const MISSING_REQUIRED_PROPERTIES: &str = "Missing required properties:";
    pub const SHORTER_THAN_MIN_LENGTH: &str = "String is shorter than the minimum length of";
    pub const LONGER_THAN_MAX_LENGTH: &str = "String is longer than the maximum length of";
    pub const NOT_MATCH_PATTERN: &str = "String does not match the pattern of";
    pub const NOT_OBJECT_TYPE: &str = "Object is not expected.";
    pub const EMPTY_OBJECT: &str = "Object is empty.";
    pub const EMPTY_STRING: &str = "String is empty.";
    pub const EMPTY_ARRAY: &str = "Array cannot be empty.";
    pub const TOO_FEW_ITEMS: &str = "Array has too few items. Minimum count is";
    pub const TOO_MANY_ITEMS: &str = "Array has too many items. Maximum count is";
    pub const DUPLICATE_ITEM: &str = "has been assigned to another item.";
    pub const DUPLICATE_TYPE: &str = "is duplicated.";
    pub const INVALID_VALUE: &str = "Invalid value. Valid values:";
    pub const INVALID_CONTEXT: &str = "Invalid context.";
    pub const CONFLICT_TYPE: &str = "Conflict type:";
    pub const VALUE_NOT_STRING: &str = "Value is not string.";
}

const LINE_FEED: &str = "\n";

/// A single schema violation, spanning the offending source text.
///
/// Problems at a container (an object missing members, an empty array) use
/// length 0 at the container's offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub offset: usize,
    pub length: usize,
    pub message: String,
}

/// Validates parsed documents against a model graph
pub struct Validator<'a> {
    graph: &'a ModelGraph,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a ModelGraph) -> Self {
        Self { graph }
    }

    /// Validate a whole document tree.
    ///
    /// The target language version is resolved once from the document's
    /// `@context` member. A document without a recognized context is not a
    /// document of this language, so the result is empty — as it is when
    /// the graph never initialized.
    pub fn validate(&self, document: &JsonNode) -> Vec<Problem> {
        let mut problems = Vec::new();
        if !self.graph.initialized() {
            return problems;
        }
        let Some(version) = self.document_version(document) else {
            return problems;
        };
        let Some(entry) = self.graph.entry_node() else {
            return problems;
        };
        let pass = Pass {
            graph: self.graph,
            version,
        };
        pass.validate_node(document, entry, &mut problems);
        problems
    }

    /// Target version declared by the document, through the context map
    pub fn document_version(&self, document: &JsonNode) -> Option<u32> {
        let context = document.member(keywords::CONTEXT)?;
        let version = resolve_context_version(self.graph, context);
        (version > 0).then_some(version)
    }
}

/// Version a `@context` value denotes: a string resolves through the
/// context map, an array resolves to its first recognized entry, anything
/// else to 0 (unknown)
fn resolve_context_version(graph: &ModelGraph, node: &JsonNode) -> u32 {
    match node.kind {
        JsonKind::String => node
            .string_value()
            .map(|uri| graph.context_version(uri))
            .unwrap_or(0),
        JsonKind::Array => node
            .children
            .iter()
            .filter_map(JsonNode::string_value)
            .map(|uri| graph.context_version(uri))
            .find(|version| *version > 0)
            .unwrap_or(0),
        _ => 0,
    }
}

/// One validation pass: the graph plus the resolved target version
struct Pass<'g> {
    graph: &'g ModelGraph,
    version: u32,
}

impl<'g> Pass<'g> {
    fn validate_node(&self, node: &JsonNode, property: &PropertyNode, problems: &mut Vec<Problem>) {
        match node.kind {
            JsonKind::Object => self.validate_object(node, property, problems),
            JsonKind::Array => self.validate_array(node, property, problems),
            JsonKind::String => self.validate_string(node, property, problems),
            JsonKind::Number => self.validate_number(node, property, problems),
            JsonKind::Boolean => self.validate_boolean(node, property, problems),
            JsonKind::Null | JsonKind::Property => {}
        }
    }

    fn validate_object(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        let classes = self.graph.object_classes(property, self.version);
        if classes.is_empty() {
            push(problems, node, message::NOT_OBJECT_TYPE);
            return;
        }
        if node.children.is_empty() {
            push_at_container(problems, node, message::EMPTY_OBJECT);
            return;
        }
        let type_node = node.member(keywords::TYPE);
        let class = match type_node {
            // a single candidate is adopted implicitly, but only when the
            // type key is fully absent
            None if classes.len() == 1 => classes[0],
            None => {
                push_at_container(problems, node, message::MISSING_TYPE);
                return;
            }
            Some(type_node) => match self.valid_object_type(type_node, &classes, problems) {
                Some(class) => class,
                None => return,
            },
        };
        if ModelGraph::is_language_node(class) {
            self.validate_language_map(node, property, problems);
            return;
        }
        let mut present = HashSet::new();
        self.validate_properties(node, class, problems, &mut present);
        self.check_required_properties(node, class, property, &present, problems);
    }

    /// Settle the concrete class named by the type discriminator.
    ///
    /// A string names one candidate. An array multi-types the object: each
    /// element must name a known candidate, duplicates and unknown names
    /// are flagged per element, and two elements naming different concrete
    /// classes conflict — which abandons the rest of the object.
    fn valid_object_type(
        &self,
        type_node: &JsonNode,
        classes: &[&'g ClassNode],
        problems: &mut Vec<Problem>,
    ) -> Option<&'g ClassNode> {
        match type_node.kind {
            JsonKind::String => {
                let value = type_node.string_value().unwrap_or_default();
                let class = find_class(classes, value);
                if class.is_none() {
                    self.push_invalid_type(type_node, classes, problems);
                }
                class
            }
            JsonKind::Array => {
                let mut resolved: Option<&ClassNode> = None;
                let mut seen = HashSet::new();
                let flagged_before = problems.len();
                for element in &type_node.children {
                    let Some(value) = element.string_value() else {
                        self.push_invalid_type(element, classes, problems);
                        continue;
                    };
                    if !seen.insert(value) {
                        push(
                            problems,
                            element,
                            format!("{value} {}", message::DUPLICATE_TYPE),
                        );
                        continue;
                    }
                    match find_class(classes, value) {
                        Some(current) => {
                            if let Some(previous) = resolved {
                                if previous.id != current.id {
                                    let conflict = format!(
                                        "{} {} and {}",
                                        message::CONFLICT_TYPE,
                                        ModelGraph::class_display_name(previous),
                                        ModelGraph::class_display_name(current)
                                    );
                                    push(problems, type_node, conflict);
                                    return None;
                                }
                            } else {
                                resolved = Some(current);
                            }
                        }
                        None => self.push_invalid_type(element, classes, problems),
                    }
                }
                if resolved.is_none() && problems.len() == flagged_before {
                    self.push_invalid_type(type_node, classes, problems);
                }
                resolved
            }
            _ => {
                self.push_invalid_type(type_node, classes, problems);
                None
            }
        }
    }

    /// Validate an object's members against the settled class
    fn validate_properties(
        &self,
        node: &JsonNode,
        class: &ClassNode,
        problems: &mut Vec<Problem>,
        present: &mut HashSet<String>,
    ) {
        let expected: HashMap<&str, &PropertyNode> = self
            .graph
            .properties_of_class(class, self.version)
            .into_iter()
            .filter_map(|property| property.label.as_deref().map(|label| (label, property)))
            .collect();
        for child in &node.children {
            let Some(pair) = child.as_property() else {
                continue;
            };
            let Some(name) = pair.name.string_value() else {
                continue;
            };
            present.insert(name.to_string());
            match name {
                keywords::ID => {
                    // identity is allowed on every class
                    if let Some(identity) = self.graph.property_node(keywords::ID) {
                        self.validate_node(pair.value, identity, problems);
                    }
                }
                keywords::CONTEXT => self.validate_context_member(&pair, class, problems),
                keywords::TYPE => {} // already settled
                _ => match expected.get(name) {
                    Some(property) => self.validate_node(pair.value, property, problems),
                    None => push(
                        problems,
                        pair.name,
                        format!("{name} {}", message::UNEXPECTED_PROPERTY),
                    ),
                },
            }
        }
    }

    /// The context key is allowed only where the class requires it, and
    /// must then denote exactly the validation target version
    fn validate_context_member(
        &self,
        pair: &PropertyPair<'_>,
        class: &ClassNode,
        problems: &mut Vec<Problem>,
    ) {
        let required = class
            .constraint
            .as_ref()
            .map_or(false, |constraint| {
                constraint.required.iter().any(|name| name == keywords::CONTEXT)
            });
        if !required {
            push(
                problems,
                pair.name,
                format!("{} {}", keywords::CONTEXT, message::UNEXPECTED_PROPERTY),
            );
            return;
        }
        let version = resolve_context_version(self.graph, pair.value);
        if version != self.version {
            push(problems, pair.value, message::INVALID_CONTEXT);
        }
    }

    /// Aggregate the class's required properties that are absent. Only
    /// properties that exist at the target version are demanded, and the
    /// context requirement is waived on an inline interface under the
    /// dual-purpose schema key.
    fn check_required_properties(
        &self,
        node: &JsonNode,
        class: &ClassNode,
        property: &PropertyNode,
        present: &HashSet<String>,
        problems: &mut Vec<Problem>,
    ) {
        let Some(constraint) = &class.constraint else {
            return;
        };
        let inline_schema = property.label.as_deref() == Some(keywords::SCHEMA_PROPERTY);
        let missing: Vec<&str> = constraint
            .required
            .iter()
            .map(String::as_str)
            .filter(|name| {
                if present.contains(*name) {
                    return false;
                }
                if *name == keywords::CONTEXT && inline_schema {
                    return false;
                }
                self.required_at_this_version(name)
            })
            .collect();
        if !missing.is_empty() {
            push_at_container(
                problems,
                node,
                join_list(message::MISSING_REQUIRED_PROPERTIES, &missing),
            );
        }
    }

    fn required_at_this_version(&self, name: &str) -> bool {
        if keywords::is_reserved(name) {
            return true;
        }
        match self.graph.property_node(name) {
            Some(property) => ModelGraph::is_available(property.version.as_ref(), self.version),
            None => true,
        }
    }

    fn validate_array(&self, node: &JsonNode, property: &PropertyNode, problems: &mut Vec<Problem>) {
        if !property.is_array {
            self.push_invalid_value_type(node, property, problems);
            return;
        }
        if node.children.is_empty() {
            push_at_container(problems, node, message::EMPTY_ARRAY);
            return;
        }
        if let Some(constraint) = &property.constraint {
            if let Some(min) = constraint.min_items {
                if node.children.len() < min {
                    push_at_container(
                        problems,
                        node,
                        format!("{} {min}.", message::TOO_FEW_ITEMS),
                    );
                }
            }
            if let Some(max) = constraint.max_items {
                if node.children.len() > max {
                    push_at_container(
                        problems,
                        node,
                        format!("{} {max}.", message::TOO_MANY_ITEMS),
                    );
                }
            }
        }
        // elements recurse against the same property; object elements with
        // a string name must be unique among their siblings
        let mut names = HashSet::new();
        for element in &node.children {
            if let Some(pair) = name_member(element) {
                if let Some(name) = pair.value.string_value() {
                    if !names.insert(name.to_string()) {
                        push(
                            problems,
                            pair.value,
                            format!("{name} {}", message::DUPLICATE_ITEM),
                        );
                    }
                }
            }
            self.validate_node(element, property, problems);
        }
    }

    fn validate_string(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        if self.value_class(property, value_schema::STRING).is_none() {
            // no plain-string alternative: the value must be an enum member
            self.validate_enum_value(node, property, problems);
            return;
        }
        self.check_string_constraints(node, property, problems);
    }

    /// Ordinary string checks, first violation wins
    fn check_string_constraints(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        let value = node.string_value().unwrap_or_default();
        if value.is_empty() {
            push(problems, node, message::EMPTY_STRING);
            return;
        }
        let Some(constraint) = &property.constraint else {
            return;
        };
        let length = value.chars().count();
        if let Some(min) = constraint.min_length {
            if length < min {
                push(
                    problems,
                    node,
                    format!("{} {min}.", message::SHORTER_THAN_MIN_LENGTH),
                );
                return;
            }
        }
        if let Some(max) = constraint.max_length {
            if length > max {
                push(
                    problems,
                    node,
                    format!("{} {max}.", message::LONGER_THAN_MAX_LENGTH),
                );
                return;
            }
        }
        if let Some(pattern) = &constraint.pattern {
            // an unparseable pattern is a definition-set defect; degrade to
            // no check rather than failing the document
            if let Ok(regex) = Regex::new(pattern) {
                if !regex.is_match(value) {
                    push(
                        problems,
                        node,
                        format!("{} {pattern}.", message::NOT_MATCH_PATTERN),
                    );
                }
            }
        }
    }

    fn validate_enum_value(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        let enums = self.graph.enums_of_property(property, self.version);
        if enums.is_empty() {
            self.push_invalid_value_type(node, property, problems);
            return;
        }
        let value = node.string_value().unwrap_or_default();
        if !enums.contains(&value) {
            push(problems, node, join_list(message::INVALID_VALUE, &enums));
        }
    }

    /// Numbers must have an int alternative and be mathematically exact
    /// integers; there is no separate floating-point path
    fn validate_number(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        let integral = node
            .number_value()
            .map_or(false, |n| n.is_finite() && n.fract() == 0.0);
        if self.value_class(property, value_schema::INT).is_none() || !integral {
            self.push_invalid_value_type(node, property, problems);
        }
    }

    fn validate_boolean(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        if self.value_class(property, value_schema::BOOLEAN).is_none() {
            self.push_invalid_value_type(node, property, problems);
        }
    }

    /// Every key must be a recognized language code, every value a plain
    /// string meeting the property's ordinary string constraints
    fn validate_language_map(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        for child in &node.children {
            let Some(pair) = child.as_property() else {
                continue;
            };
            let Some(code) = pair.name.string_value() else {
                continue;
            };
            if !language::is_language_code(code) {
                push(
                    problems,
                    pair.name,
                    format!("{code} {}", message::UNEXPECTED_PROPERTY),
                );
            } else if pair.value.kind != JsonKind::String {
                push(problems, pair.value, message::VALUE_NOT_STRING);
            } else {
                self.check_string_constraints(pair.value, property, problems);
            }
        }
    }

    /// Range alternative with the given value-schema id, if available
    fn value_class(&self, property: &PropertyNode, id: &str) -> Option<&ClassNode> {
        self.graph
            .range_of_property(property, self.version)
            .into_iter()
            .find(|class| class.id == id)
    }

    fn push_invalid_type(
        &self,
        node: &JsonNode,
        classes: &[&ClassNode],
        problems: &mut Vec<Problem>,
    ) {
        let names: Vec<&str> = classes
            .iter()
            .map(|class| ModelGraph::class_display_name(class))
            .collect();
        push(problems, node, join_list(message::INVALID_TYPE, &names));
    }

    /// Wrong-kind problem listing the value types the property accepts
    fn push_invalid_value_type(
        &self,
        node: &JsonNode,
        property: &PropertyNode,
        problems: &mut Vec<Problem>,
    ) {
        let names: Vec<&str> = self
            .graph
            .range_of_property(property, self.version)
            .into_iter()
            .map(value_type_name)
            .collect();
        push(problems, node, join_list(message::INVALID_TYPE, &names));
    }
}

/// Value classes read better under their short type names
fn value_type_name(class: &ClassNode) -> &str {
    match class.id.as_str() {
        value_schema::STRING => "string",
        value_schema::INT => "int",
        value_schema::BOOLEAN => "boolean",
        _ => ModelGraph::class_display_name(class),
    }
}

fn find_class<'g>(classes: &[&'g ClassNode], name: &str) -> Option<&'g ClassNode> {
    classes
        .iter()
        .copied()
        .find(|class| ModelGraph::class_display_name(class) == name)
}

/// The `name` member pair of an object node, used for sibling uniqueness
fn name_member(node: &JsonNode) -> Option<PropertyPair<'_>> {
    if node.kind != JsonKind::Object {
        return None;
    }
    node.children
        .iter()
        .filter_map(JsonNode::as_property)
        .find(|pair| pair.name.string_value() == Some(keywords::NAME_PROPERTY))
}

fn push(problems: &mut Vec<Problem>, node: &JsonNode, message: impl Into<String>) {
    problems.push(Problem {
        offset: node.offset,
        length: node.length,
        message: message.into(),
    });
}

/// Container problems anchor at the container's offset with no span
fn push_at_container(problems: &mut Vec<Problem>, node: &JsonNode, message: impl Into<String>) {
    problems.push(Problem {
        offset: node.offset,
        length: 0,
        message: message.into(),
    });
}

fn join_list(head: &str, items: &[&str]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(head);
    lines.extend_from_slice(items);
    lines.join(LINE_FEED)
}
