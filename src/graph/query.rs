//! Read-only queries over the compiled graph
//!
//! Everything the validator — and any other tooling such as completion or
//! hover providers — may ask of the graph: name resolution through the
//! reverse index, version-filtered range/children/property lookup,
//! abstract-class expansion, enum extraction, and the one documented
//! special case of the dual-purpose `schema` key. Every method degrades to
//! an empty result on unknown input instead of failing.

use super::{ClassNode, ModelGraph, PropertyNode, VersionNode};
use crate::keywords;
use crate::syntax::{JsonKind, JsonNode, PropertyPair};

impl ModelGraph {
    /// Resolve a property node by short name, falling back to treating the
    /// name as an already-qualified (or reserved) identifier
    pub fn property_node(&self, name: &str) -> Option<&PropertyNode> {
        let id = self
            .reversed_index
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        self.property_nodes.get(id)
    }

    /// Resolve a class node by short name, qualifying the name through the
    /// vocabulary when the reverse index has no entry for it
    pub fn class_node(&self, name: &str) -> Option<&ClassNode> {
        match self.reversed_index.get(name) {
            Some(id) => self.class_nodes.get(id),
            None => self.class_nodes.get(&self.qualify(name)),
        }
    }

    /// Language version a context document URI denotes; 0 when unknown
    pub fn context_version(&self, uri: &str) -> u32 {
        self.context_versions.get(uri).copied().unwrap_or(0)
    }

    /// Version-availability of an optional gate
    pub fn is_available(gate: Option<&VersionNode>, version: u32) -> bool {
        gate.map_or(true, |gate| gate.available_at(version))
    }

    /// Range alternatives of a property that exist at `version`
    pub fn range_of_property(&self, property: &PropertyNode, version: u32) -> Vec<&ClassNode> {
        property
            .range
            .iter()
            .filter_map(|id| self.class_nodes.get(id))
            .filter(|class| Self::is_available(class.version.as_ref(), version))
            .collect()
    }

    /// Subclasses of a class that exist at `version`
    pub fn children_of_class(&self, class: &ClassNode, version: u32) -> Vec<&ClassNode> {
        class
            .children
            .iter()
            .filter_map(|id| self.class_nodes.get(id))
            .filter(|child| Self::is_available(child.version.as_ref(), version))
            .collect()
    }

    /// Declared (and inherited) properties of a class that exist at
    /// `version`
    pub fn properties_of_class(&self, class: &ClassNode, version: u32) -> Vec<&PropertyNode> {
        class
            .properties
            .iter()
            .filter_map(|id| self.property_nodes.get(id))
            .filter(|property| Self::is_available(property.version.as_ref(), version))
            .collect()
    }

    /// Concrete object-class candidates of a property's range.
    ///
    /// Object-shaped classes pass through; an abstract class is replaced by
    /// its version-filtered non-enum children (one level — nested
    /// abstraction stays unexpanded); enum classes drop out.
    pub fn object_classes(&self, property: &PropertyNode, version: u32) -> Vec<&ClassNode> {
        let mut classes = Vec::new();
        for class in self.range_of_property(property, version) {
            if Self::is_object_class(class) {
                classes.push(class);
            } else if class.is_abstract {
                for child in self.children_of_class(class, version) {
                    if child.enums.is_empty() {
                        classes.push(child);
                    }
                }
            }
        }
        classes
    }

    /// Union of enum values across a property's expanded range
    pub fn enums_of_property(&self, property: &PropertyNode, version: u32) -> Vec<&str> {
        let mut values = Vec::new();
        for class in self.range_of_property(property, version) {
            if !class.enums.is_empty() {
                values.extend(class.enums.iter().map(String::as_str));
            } else if class.is_abstract {
                for child in self.children_of_class(class, version) {
                    values.extend(child.enums.iter().map(String::as_str));
                }
            }
        }
        values
    }

    /// A class usable as a concrete object value type
    pub fn is_object_class(class: &ClassNode) -> bool {
        !class.is_abstract && class.enums.is_empty() && class.label.is_some()
    }

    /// The marker class standing for a language-tagged string map
    pub fn is_language_node(class: &ClassNode) -> bool {
        class.id == keywords::LANGUAGE
    }

    /// Name a class goes by in documents and diagnostics
    pub fn class_display_name(class: &ClassNode) -> &str {
        class.label.as_deref().unwrap_or(&class.id)
    }
}

/// Resolve the effective property name of an object member.
///
/// The key `schema` denotes two distinct graph properties depending on
/// structural position: inside an entry of the `implements` array it means
/// the interface-schema property. The graph format has no notion of
/// role-dependent meaning, so this one case is resolved here, by walking
/// the enclosing nodes from the document root.
pub fn resolve_property_name(root: &JsonNode, pair: &PropertyPair<'_>) -> String {
    let Some(name) = pair.name.string_value() else {
        return String::new();
    };
    if name != keywords::SCHEMA_PROPERTY {
        return name.to_string();
    }
    let Some(path) = root.path_to(pair.name) else {
        return name.to_string();
    };
    // path ends with [.., object, member, name]; the holder of that object
    // sits one level up, or two when the object is an array element
    if path.len() < 4 {
        return name.to_string();
    }
    let object_at = path.len() - 3;
    if path[object_at].kind != JsonKind::Object {
        return name.to_string();
    }
    let mut holder = path[object_at - 1];
    if holder.kind == JsonKind::Array {
        if object_at < 2 {
            return name.to_string();
        }
        holder = path[object_at - 2];
    }
    if let Some(outer) = holder.as_property() {
        if outer.name.string_value() == Some(keywords::IMPLEMENTS_PROPERTY) {
            return keywords::INTERFACE_SCHEMA_PROPERTY.to_string();
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn graph_with(
        classes: Vec<ClassNode>,
        properties: Vec<PropertyNode>,
    ) -> ModelGraph {
        let mut graph = ModelGraph {
            vocabulary: "http://example.org/test/schema/".to_string(),
            ..Default::default()
        };
        for class in classes {
            if let Some(label) = &class.label {
                graph
                    .reversed_index
                    .insert(label.clone(), class.id.clone());
            }
            graph.class_nodes.insert(class.id.clone(), class);
        }
        for property in properties {
            if let Some(label) = &property.label {
                graph
                    .reversed_index
                    .insert(label.clone(), property.id.clone());
            }
            graph.property_nodes.insert(property.id.clone(), property);
        }
        graph
    }

    fn class(id: &str, label: &str) -> ClassNode {
        ClassNode {
            id: id.to_string(),
            label: Some(label.to_string()),
            ..Default::default()
        }
    }

    fn gated(mut node: ClassNode, include: Option<u32>, exclude: Option<u32>) -> ClassNode {
        node.version = Some(VersionNode {
            include_since: include,
            exclude_since: exclude,
        });
        node
    }

    #[test]
    fn range_is_version_filtered() {
        let classes = vec![
            class("c:Old", "Old"),
            gated(class("c:New", "New"), Some(2), None),
            gated(class("c:Gone", "Gone"), None, Some(2)),
        ];
        let property = PropertyNode {
            id: "p:thing".to_string(),
            range: vec!["c:Old".into(), "c:New".into(), "c:Gone".into()],
            ..Default::default()
        };
        let graph = graph_with(classes, vec![property.clone()]);

        let names = |version| {
            graph
                .range_of_property(&property, version)
                .iter()
                .map(|c| ModelGraph::class_display_name(c).to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(1), vec!["Old", "Gone"]);
        assert_eq!(names(2), vec!["Old", "New"]);
        assert_eq!(names(3), vec!["Old", "New"]);
    }

    #[test]
    fn abstract_classes_expand_one_level() {
        let mut base = class("c:Base", "Base");
        base.is_abstract = true;
        base.children = vec!["c:Leaf".into(), "c:Values".into(), "c:Inner".into()];
        let leaf = class("c:Leaf", "Leaf");
        let mut values = class("c:Values", "Values");
        values.enums = vec!["a".into(), "b".into()];
        let mut inner = class("c:Inner", "Inner");
        inner.is_abstract = true;
        inner.children = vec!["c:Deep".into()];
        let deep = class("c:Deep", "Deep");

        let property = PropertyNode {
            id: "p:thing".to_string(),
            range: vec!["c:Base".into()],
            ..Default::default()
        };
        let graph = graph_with(vec![base, leaf, values, inner, deep], vec![property.clone()]);

        let names: Vec<&str> = graph
            .object_classes(&property, 1)
            .iter()
            .map(|c| ModelGraph::class_display_name(c))
            .collect();
        // enum child drops, nested abstract child passes through unexpanded
        assert_eq!(names, vec!["Leaf", "Inner"]);

        assert_eq!(graph.enums_of_property(&property, 1), vec!["a", "b"]);
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let graph = graph_with(vec![], vec![]);
        assert!(graph.property_node("nope").is_none());
        assert!(graph.class_node("nope").is_none());
        assert_eq!(graph.context_version("nope"), 0);
    }

    #[test]
    fn schema_key_remaps_inside_implements() {
        let text = r#"{
            "implements": [
                { "name": "env", "schema": { "contents": [] } }
            ],
            "contents": [
                { "schema": "double" }
            ]
        }"#;
        let root = parse(text).unwrap();

        let implements_entry = &root.children[0].as_property().unwrap().value.children[0];
        let schema_member = implements_entry.children[1].as_property().unwrap();
        assert_eq!(
            resolve_property_name(&root, &schema_member),
            keywords::INTERFACE_SCHEMA_PROPERTY
        );

        let contents_entry = &root.children[1].as_property().unwrap().value.children[0];
        let plain_schema = contents_entry.children[0].as_property().unwrap();
        assert_eq!(resolve_property_name(&root, &plain_schema), "schema");
    }

    #[test]
    fn non_schema_keys_pass_through() {
        let root = parse(r#"{"name": "x"}"#).unwrap();
        let pair = root.children[0].as_property().unwrap();
        assert_eq!(resolve_property_name(&root, &pair), "name");
    }
}
