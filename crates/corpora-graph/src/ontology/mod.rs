//! Ontology layer: classes, objects and their attributes on top of a
//! [`crate::GraphStore`].

pub mod cypher;
pub mod entities;
pub mod repository;

pub use entities::{
    classify, Class, ClassSignature, DatatypeProperty, Entity, Object, ObjectProperty, Ontology,
    OntologySignatures,
};
pub use repository::{NewObject, ObjectPatch, OntologyRepository, RelationDirection, RelationParam};
