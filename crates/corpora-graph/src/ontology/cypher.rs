//! Cypher statements used by the ontology repository.
//!
//! Edges point from the specific to the general:
//! `(child)-[:SUBCLASS_OF]->(parent)`, `(object)-[:rdf__type]->(class)`,
//! `(property)-[:domain]->(class)`, `(property)-[:range]->(class)`.

use crate::store::Statement;

/// Upper bound on hierarchy depth walked by the cycle check.
pub const MAX_HIERARCHY_DEPTH: usize = 32;

/// Statement names, usable as match patterns.
pub mod names {
    pub const PARENT_CLASSES: &str = "parent_classes";
    pub const CLASS_PARENTS: &str = "class_parents";
    pub const CLASS_CHILDREN: &str = "class_children";
    pub const CLASS_OBJECTS: &str = "class_objects";
    pub const OBJECT_TYPES: &str = "object_types";
    pub const OBJECT_WITH_CLASS: &str = "object_with_class";
    pub const DELETE_CLASS: &str = "delete_class";
    pub const DATATYPE_SIGNATURE: &str = "datatype_signature";
    pub const OBJECT_SIGNATURE: &str = "object_signature";
    pub const SUBCLASS_EDGES: &str = "subclass_edges";
    pub const ANCESTOR_PATHS: &str = "ancestor_paths";
}

/// Parent classes: classes no other class is declared a subclass of.
pub const PARENT_CLASSES: Statement = Statement {
    name: names::PARENT_CLASSES,
    cypher: "MATCH (c:Class)
             WHERE NOT (c)<-[:SUBCLASS_OF]-(:Class)
             RETURN c",
    columns: &["c"],
};

pub const CLASS_PARENTS: Statement = Statement {
    name: names::CLASS_PARENTS,
    cypher: "MATCH (c:Class {uri: $uri})-[:SUBCLASS_OF]->(parent:Class)
             RETURN parent",
    columns: &["parent"],
};

pub const CLASS_CHILDREN: Statement = Statement {
    name: names::CLASS_CHILDREN,
    cypher: "MATCH (c:Class {uri: $uri})<-[:SUBCLASS_OF]-(child:Class)
             RETURN child",
    columns: &["child"],
};

pub const CLASS_OBJECTS: Statement = Statement {
    name: names::CLASS_OBJECTS,
    cypher: "MATCH (o:Object)-[:rdf__type]->(c:Class {uri: $uri})
             RETURN o",
    columns: &["o"],
};

/// Class of every typed object, for snapshots.
pub const OBJECT_TYPES: Statement = Statement {
    name: names::OBJECT_TYPES,
    cypher: "MATCH (o:Object)-[:rdf__type]->(c:Class)
             RETURN o.uri AS object_uri, c.uri AS class_uri",
    columns: &["object_uri", "class_uri"],
};

pub const OBJECT_WITH_CLASS: Statement = Statement {
    name: names::OBJECT_WITH_CLASS,
    cypher: "MATCH (o:Object {uri: $uri})
             OPTIONAL MATCH (o)-[:rdf__type]->(c:Class)
             RETURN o, c.uri AS class_uri
             LIMIT 1",
    columns: &["o", "class_uri"],
};

/// Removes the class, every subclass below it, and the objects and
/// attributes hanging off any of them.
pub const DELETE_CLASS: Statement = Statement {
    name: names::DELETE_CLASS,
    cypher: "MATCH (c:Class {uri: $uri})
             OPTIONAL MATCH (c)<-[:SUBCLASS_OF*]-(child:Class)
             WITH c, collect(DISTINCT child) AS children
             UNWIND [c] + children AS doomed
             OPTIONAL MATCH (doomed)<-[:rdf__type]-(o:Object)
             OPTIONAL MATCH (doomed)<-[:domain]-(q)
             DETACH DELETE o, q, doomed",
    columns: &[],
};

pub const DATATYPE_SIGNATURE: Statement = Statement {
    name: names::DATATYPE_SIGNATURE,
    cypher: "MATCH (dtp:DatatypeProperty)-[:domain]->(c:Class {uri: $class_uri})
             RETURN dtp",
    columns: &["dtp"],
};

pub const OBJECT_SIGNATURE: Statement = Statement {
    name: names::OBJECT_SIGNATURE,
    cypher: "MATCH (op:ObjectProperty)-[:domain]->(c:Class {uri: $class_uri})
             OPTIONAL MATCH (op)-[:range]->(rng:Class)
             RETURN op, rng.uri AS range_uri",
    columns: &["op", "range_uri"],
};

/// Number of existing `child -> parent` subclass edges.
pub const SUBCLASS_EDGES: Statement = Statement {
    name: names::SUBCLASS_EDGES,
    cypher: "MATCH (:Class {uri: $child})-[r:SUBCLASS_OF]->(:Class {uri: $parent})
             RETURN count(r) AS edges",
    columns: &["edges"],
};

/// Paths from `parent` up to `child`; any hit means `child` is already an
/// ancestor of `parent`.
pub const ANCESTOR_PATHS: Statement = Statement {
    name: names::ANCESTOR_PATHS,
    cypher: "MATCH p = (:Class {uri: $parent})-[:SUBCLASS_OF*1..32]->(:Class {uri: $child})
             RETURN count(p) AS paths",
    columns: &["paths"],
};
