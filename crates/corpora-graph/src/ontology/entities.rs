//! Ontology entities and node classification.

use serde::{Deserialize, Serialize};

use crate::model::Node;

/// Role labels.
pub mod labels {
    pub const CLASS: &str = "Class";
    pub const OBJECT: &str = "Object";
    pub const DATATYPE_PROPERTY: &str = "DatatypeProperty";
    pub const OBJECT_PROPERTY: &str = "ObjectProperty";
}

/// Relationship types.
pub mod rel {
    pub const SUBCLASS_OF: &str = "SUBCLASS_OF";
    pub const DOMAIN: &str = "domain";
    pub const RANGE: &str = "range";
    pub const RDF_TYPE: &str = "rdf__type";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub uri: String,
    pub title: String,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub uri: String,
    pub title: String,
    pub class_uri: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatatypeProperty {
    pub uri: String,
    pub title: String,
    pub class_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperty {
    pub uri: String,
    pub title: String,
    pub class_uri: Option<String>,
    pub range_class_uri: Option<String>,
}

/// Attributes declared on a class through `domain` edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSignature {
    pub class_uri: String,
    pub datatype_properties: Vec<DatatypeProperty>,
    pub object_properties: Vec<ObjectProperty>,
}

/// Whole-graph snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ontology {
    pub classes: Vec<Class>,
    pub objects: Vec<Object>,
}

/// Snapshot keyed by class signature instead of class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OntologySignatures {
    pub signatures: Vec<ClassSignature>,
    pub objects: Vec<Object>,
}

/// A node interpreted through its role label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Class(Class),
    Object(Object),
    DatatypeProperty(DatatypeProperty),
    ObjectProperty(ObjectProperty),
}

impl Entity {
    pub fn into_class(self) -> Option<Class> {
        match self {
            Entity::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Object> {
        match self {
            Entity::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn into_datatype_property(self) -> Option<DatatypeProperty> {
        match self {
            Entity::DatatypeProperty(prop) => Some(prop),
            _ => None,
        }
    }

    pub fn into_object_property(self) -> Option<ObjectProperty> {
        match self {
            Entity::ObjectProperty(prop) => Some(prop),
            _ => None,
        }
    }
}

/// Interpret a node as an ontology entity.
///
/// Nodes without a string `uri` and `title` are malformed and yield `None`,
/// as do nodes with no role label. When a node carries several role labels
/// the first of Class, Object, DatatypeProperty, ObjectProperty wins.
pub fn classify(node: &Node) -> Option<Entity> {
    let uri = node.prop_str("uri")?.to_string();
    let title = node.prop_str("title")?.to_string();
    let description = node.prop_str("description").map(str::to_string);
    let class_uri = node.prop_str("class_uri").map(str::to_string);

    if node.has_label(labels::CLASS) {
        Some(Entity::Class(Class {
            uri,
            title,
            description,
            labels: Some(node.labels.clone()),
        }))
    } else if node.has_label(labels::OBJECT) {
        Some(Entity::Object(Object {
            uri,
            title,
            class_uri,
            description,
        }))
    } else if node.has_label(labels::DATATYPE_PROPERTY) {
        Some(Entity::DatatypeProperty(DatatypeProperty {
            uri,
            title,
            class_uri,
        }))
    } else if node.has_label(labels::OBJECT_PROPERTY) {
        Some(Entity::ObjectProperty(ObjectProperty {
            uri,
            title,
            class_uri,
            range_class_uri: node.prop_str("range_class_uri").map(str::to_string),
        }))
    } else {
        None
    }
}
