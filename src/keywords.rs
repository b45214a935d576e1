//! Reserved names and well-known identifiers of the modeling language
//!
//! The definition documents use JSON-LD keywords for structure and W3C RDF
//! vocabulary URIs as edge predicates. Everything a document author can
//! write that is not part of the user vocabulary lives here.

/// JSON-LD reserved key prefix
pub const RESERVED_PREFIX: char = '@';

/// JSON-LD context key
pub const CONTEXT: &str = "@context";
/// Vocabulary base URI key inside the context document
pub const VOCABULARY: &str = "@vocab";
/// Identity key, available on every object
pub const ID: &str = "@id";
/// Type discriminator key
pub const TYPE: &str = "@type";
/// Container kind key inside a context entry
pub const CONTAINER: &str = "@container";
/// Ordered-array container marker
pub const LIST: &str = "@list";
/// Unordered-array container marker
pub const SET: &str = "@set";
/// Multi-lingual map container marker; also the id of the synthesized
/// language marker class
pub const LANGUAGE: &str = "@language";
/// Id of the synthesized whole-document entry property
pub const ENTRY: &str = "@entry";

/// Root of the subclass hierarchy the property expansion walks from
pub const BASE_CLASS: &str = "Entity";
/// Top-level document class: a single interface
pub const INTERFACE_CLASS: &str = "Interface";
/// Top-level document class: a capability model
pub const CAPABILITY_MODEL_CLASS: &str = "CapabilityModel";
/// Abstract value-schema class
pub const SCHEMA_CLASS: &str = "Schema";
/// Abstract unit class
pub const UNIT_CLASS: &str = "Unit";

/// Short name of the dual-purpose schema key as written in documents
pub const SCHEMA_PROPERTY: &str = "schema";
/// Effective property the schema key denotes inside an implements entry
pub const INTERFACE_SCHEMA_PROPERTY: &str = "interfaceSchema";
/// Qualified name fragment of the interface-schema property node
pub const INTERFACE_SCHEMA_NODE: &str = "InterfaceInstance/schema";
/// Array property whose entries re-map the schema key
pub const IMPLEMENTS_PROPERTY: &str = "implements";
/// Object member used for sibling uniqueness checks inside arrays
pub const NAME_PROPERTY: &str = "name";

/// Definition document file names inside a definitions directory
pub const CONTEXT_FILE: &str = "context.json";
pub const CONSTRAINT_FILE: &str = "constraint.json";
pub const GRAPH_FILE: &str = "graph.json";

/// RDF node type markers used as Type-edge targets
pub mod node_type {
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
}

/// RDF predicates used as edge labels
pub mod edge_type {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// XML Schema value types appearing as plain-value range alternatives
pub mod value_schema {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// Check if a document key is reserved (not part of the user vocabulary)
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}
