//! Ontology operations composed from [`GraphStore`] primitives.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::cypher;
use super::entities::{
    classify, labels, rel, Class, ClassSignature, DatatypeProperty, Entity, Object, ObjectProperty,
    Ontology, OntologySignatures,
};
use crate::error::{GraphError, GraphResult};
use crate::model::{Node, Properties};
use crate::store::{generate_uri, GraphQuery, GraphStore, DEFAULT_REL_TYPE};

/// Which end of a relation the new object sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RelationDirection {
    /// `(object)-[rel]->(value)`, sent as `1`.
    Outgoing,
    /// `(value)-[rel]->(object)`, any other number.
    Incoming,
}

impl From<i64> for RelationDirection {
    fn from(flag: i64) -> Self {
        if flag == 1 {
            Self::Outgoing
        } else {
            Self::Incoming
        }
    }
}

impl From<RelationDirection> for i64 {
    fn from(direction: RelationDirection) -> Self {
        match direction {
            RelationDirection::Outgoing => 1,
            RelationDirection::Incoming => 0,
        }
    }
}

/// One relation to wire when creating an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationParam {
    pub direction: RelationDirection,
    pub value_uri: String,
    /// Empty means [`DEFAULT_REL_TYPE`].
    #[serde(default)]
    pub rel_type: String,
}

impl RelationParam {
    pub fn outgoing(rel_type: &str, value_uri: &str) -> Self {
        Self {
            direction: RelationDirection::Outgoing,
            value_uri: value_uri.to_string(),
            rel_type: rel_type.to_string(),
        }
    }

    pub fn incoming(rel_type: &str, value_uri: &str) -> Self {
        Self {
            direction: RelationDirection::Incoming,
            value_uri: value_uri.to_string(),
            rel_type: rel_type.to_string(),
        }
    }
}

/// Core fields of a new object. An empty `uri` gets a generated one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    #[serde(default)]
    pub uri: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields of an object to overwrite. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatch {
    pub uri: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ObjectPatch {
    fn into_props(self) -> Properties {
        let mut props = Properties::new();
        for (key, value) in [
            ("uri", self.uri),
            ("title", self.title),
            ("description", self.description),
        ] {
            if let Some(value) = value {
                props.insert(key.to_string(), Value::String(value));
            }
        }
        props
    }
}

/// Ontology data access over a shared graph store handle.
///
/// Writes that touch more than one node or arc are a fixed sequence of
/// independent store calls. A missing endpoint rolls back the node the
/// sequence created; a driver failure midway does not.
#[derive(Clone)]
pub struct OntologyRepository {
    store: std::sync::Arc<dyn GraphStore>,
}

impl OntologyRepository {
    pub fn new(store: std::sync::Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    // ---- snapshots ----

    /// Every class and object in the graph, in scan order.
    pub async fn get_ontology(&self) -> GraphResult<Ontology> {
        let nodes = self.store.get_all_nodes().await?;
        self.build_ontology(&nodes).await
    }

    /// One page of the scan, for graphs too large to read at once.
    pub async fn get_ontology_page(&self, skip: usize, limit: usize) -> GraphResult<Ontology> {
        let nodes = self.store.get_nodes_page(skip, limit).await?;
        self.build_ontology(&nodes).await
    }

    /// Signature of every class, plus every object.
    pub async fn get_ontology_signatures(&self) -> GraphResult<OntologySignatures> {
        let ontology = self.get_ontology().await?;
        let mut signatures = Vec::with_capacity(ontology.classes.len());
        for class in &ontology.classes {
            signatures.push(self.collect_signature(&class.uri).await?);
        }
        Ok(OntologySignatures {
            signatures,
            objects: ontology.objects,
        })
    }

    async fn build_ontology(&self, nodes: &[Node]) -> GraphResult<Ontology> {
        let types = self.object_types().await?;
        let mut ontology = Ontology::default();
        for entity in nodes.iter().filter_map(classify) {
            match entity {
                Entity::Class(class) => ontology.classes.push(class),
                Entity::Object(mut object) => {
                    if object.class_uri.is_none() {
                        object.class_uri = types.get(&object.uri).cloned();
                    }
                    ontology.objects.push(object);
                }
                _ => {}
            }
        }
        Ok(ontology)
    }

    /// object uri -> class uri, from `rdf__type` edges.
    async fn object_types(&self) -> GraphResult<HashMap<String, String>> {
        let rows = self.run(GraphQuery::statement(&cypher::OBJECT_TYPES)).await?;
        Ok(rows
            .iter()
            .filter_map(|row| Some((row.str("object_uri")?.to_string(), row.str("class_uri")?.to_string())))
            .collect())
    }

    // ---- classes ----

    /// Classes that no other class is a subclass of.
    pub async fn get_ontology_parent_classes(&self) -> GraphResult<Vec<Class>> {
        self.classes_from(GraphQuery::statement(&cypher::PARENT_CLASSES), "c")
            .await
    }

    pub async fn get_class(&self, uri: &str) -> GraphResult<Option<Class>> {
        Ok(self
            .store
            .get_node_by_uri(uri)
            .await?
            .filter(|node| node.has_label(labels::CLASS))
            .and_then(|node| classify(&node))
            .and_then(Entity::into_class))
    }

    pub async fn get_class_parents(&self, uri: &str) -> GraphResult<Vec<Class>> {
        let query = GraphQuery::statement(&cypher::CLASS_PARENTS).param("uri", uri);
        self.classes_from(query, "parent").await
    }

    pub async fn get_class_children(&self, uri: &str) -> GraphResult<Vec<Class>> {
        let query = GraphQuery::statement(&cypher::CLASS_CHILDREN).param("uri", uri);
        self.classes_from(query, "child").await
    }

    /// Objects typed to the class through `rdf__type`.
    pub async fn get_class_objects(&self, uri: &str) -> GraphResult<Vec<Object>> {
        let query = GraphQuery::statement(&cypher::CLASS_OBJECTS).param("uri", uri);
        let rows = self.run(query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.node("o"))
            .filter_map(classify)
            .filter_map(Entity::into_object)
            .map(|mut object| {
                object.class_uri.get_or_insert_with(|| uri.to_string());
                object
            })
            .collect())
    }

    /// Create a class, optionally under `parent_uri`.
    pub async fn create_class(
        &self,
        title: &str,
        description: Option<&str>,
        parent_uri: Option<&str>,
    ) -> GraphResult<Class> {
        let uri = generate_uri();
        let node = self
            .create_role_node(labels::CLASS, &uri, title, description)
            .await?;

        if let Some(parent_uri) = parent_uri.filter(|p| !p.is_empty()) {
            self.link_or_rollback(&node.uri, parent_uri, rel::SUBCLASS_OF, &node.uri)
                .await?;
        }

        info!(uri = %node.uri, title, "Class created");
        expect_entity(&node, Entity::into_class)
    }

    /// Merge `props` into a class. `None` when `uri` is not a class.
    pub async fn update_class(&self, uri: &str, props: Properties) -> GraphResult<Option<Class>> {
        check_identity(&props)?;
        if self.get_class(uri).await?.is_none() {
            return Ok(None);
        }
        Ok(self
            .store
            .update_node(uri, props)
            .await?
            .and_then(|node| classify(&node))
            .and_then(Entity::into_class))
    }

    /// Delete a class together with its subclasses and everything typed to
    /// or declared on any of them.
    pub async fn delete_class(&self, uri: &str) -> GraphResult<()> {
        let query = GraphQuery::statement(&cypher::DELETE_CLASS).param("uri", uri);
        self.run(query).await?;
        info!(uri, "Class deleted");
        Ok(())
    }

    /// Make `parent_uri` a parent of `target_uri`.
    ///
    /// Returns `false` when the edge already exists. Self-parenting and
    /// edges that would close a cycle are rejected.
    pub async fn add_class_parent(&self, parent_uri: &str, target_uri: &str) -> GraphResult<bool> {
        if parent_uri == target_uri {
            return Err(GraphError::Cycle {
                parent: parent_uri.to_string(),
                child: target_uri.to_string(),
            });
        }
        if self.get_class(parent_uri).await?.is_none() || self.get_class(target_uri).await?.is_none() {
            return Err(GraphError::EndpointNotFound {
                from: target_uri.to_string(),
                to: parent_uri.to_string(),
            });
        }

        let edges = GraphQuery::statement(&cypher::SUBCLASS_EDGES)
            .param("child", target_uri)
            .param("parent", parent_uri);
        if self.count(edges, "edges").await? > 0 {
            debug!(parent_uri, target_uri, "Parent edge already present");
            return Ok(false);
        }

        let paths = GraphQuery::statement(&cypher::ANCESTOR_PATHS)
            .param("parent", parent_uri)
            .param("child", target_uri);
        if self.count(paths, "paths").await? > 0 {
            return Err(GraphError::Cycle {
                parent: parent_uri.to_string(),
                child: target_uri.to_string(),
            });
        }

        self.store
            .create_arc(target_uri, parent_uri, rel::SUBCLASS_OF)
            .await?
            .ok_or_else(|| GraphError::EndpointNotFound {
                from: target_uri.to_string(),
                to: parent_uri.to_string(),
            })?;
        Ok(true)
    }

    // ---- attributes ----

    /// Declare a datatype attribute on a class.
    pub async fn add_class_attribute(&self, class_uri: &str, title: &str) -> GraphResult<DatatypeProperty> {
        let uri = generate_uri();
        let node = self
            .create_role_node(labels::DATATYPE_PROPERTY, &uri, title, None)
            .await?;
        self.link_or_rollback(&node.uri, class_uri, rel::DOMAIN, &node.uri)
            .await?;

        let mut prop = expect_entity(&node, Entity::into_datatype_property)?;
        prop.class_uri = Some(class_uri.to_string());
        Ok(prop)
    }

    /// Declare an object attribute on `class_uri` pointing at `range_class_uri`.
    pub async fn add_class_object_attribute(
        &self,
        class_uri: &str,
        name: &str,
        range_class_uri: &str,
    ) -> GraphResult<ObjectProperty> {
        let uri = generate_uri();
        let node = self
            .create_role_node(labels::OBJECT_PROPERTY, &uri, name, None)
            .await?;
        self.link_or_rollback(&node.uri, class_uri, rel::DOMAIN, &node.uri)
            .await?;
        self.link_or_rollback(&node.uri, range_class_uri, rel::RANGE, &node.uri)
            .await?;

        let mut prop = expect_entity(&node, Entity::into_object_property)?;
        prop.class_uri = Some(class_uri.to_string());
        prop.range_class_uri = Some(range_class_uri.to_string());
        Ok(prop)
    }

    pub async fn delete_class_attribute(&self, uri: &str) -> GraphResult<()> {
        self.store.delete_node_by_uri(uri).await
    }

    pub async fn delete_class_object_attribute(&self, uri: &str) -> GraphResult<()> {
        self.store.delete_node_by_uri(uri).await
    }

    /// Datatype and object attributes declared on a class.
    pub async fn collect_signature(&self, class_uri: &str) -> GraphResult<ClassSignature> {
        let query = GraphQuery::statement(&cypher::DATATYPE_SIGNATURE).param("class_uri", class_uri);
        let datatype_properties = self
            .run(query)
            .await?
            .iter()
            .filter_map(|row| row.node("dtp"))
            .filter_map(classify)
            .filter_map(Entity::into_datatype_property)
            .map(|mut prop| {
                prop.class_uri = Some(class_uri.to_string());
                prop
            })
            .collect();

        let query = GraphQuery::statement(&cypher::OBJECT_SIGNATURE).param("class_uri", class_uri);
        let object_properties = self
            .run(query)
            .await?
            .iter()
            .filter_map(|row| {
                let mut prop = classify(row.node("op")?)?.into_object_property()?;
                prop.class_uri = Some(class_uri.to_string());
                prop.range_class_uri = row.str("range_uri").map(str::to_string);
                Some(prop)
            })
            .collect();

        Ok(ClassSignature {
            class_uri: class_uri.to_string(),
            datatype_properties,
            object_properties,
        })
    }

    // ---- objects ----

    /// An object with its class resolved from the `rdf__type` edge.
    pub async fn get_object(&self, uri: &str) -> GraphResult<Option<Object>> {
        let query = GraphQuery::statement(&cypher::OBJECT_WITH_CLASS).param("uri", uri);
        let Some(row) = self.run(query).await?.into_iter().next() else {
            return Ok(None);
        };
        let Some(mut object) = row.node("o").and_then(classify).and_then(Entity::into_object) else {
            return Ok(None);
        };
        if let Some(class_uri) = row.str("class_uri") {
            object.class_uri = Some(class_uri.to_string());
        }
        Ok(Some(object))
    }

    pub async fn delete_object(&self, uri: &str) -> GraphResult<()> {
        self.store.delete_node_by_uri(uri).await
    }

    /// Create an object and wire one arc per relation, in order.
    pub async fn create_object(&self, params: NewObject, relations: &[RelationParam]) -> GraphResult<Object> {
        let uri = if params.uri.is_empty() {
            generate_uri()
        } else {
            params.uri
        };
        let node = self
            .create_role_node(labels::OBJECT, &uri, &params.title, params.description.as_deref())
            .await?;

        for relation in relations {
            let (from, to) = match relation.direction {
                RelationDirection::Outgoing => (node.uri.as_str(), relation.value_uri.as_str()),
                RelationDirection::Incoming => (relation.value_uri.as_str(), node.uri.as_str()),
            };
            let rel_type = match relation.rel_type.as_str() {
                "" => DEFAULT_REL_TYPE,
                other => other,
            };
            self.link_or_rollback(from, to, rel_type, &node.uri).await?;
        }

        let mut object = expect_entity(&node, Entity::into_object)?;
        object.class_uri = relations
            .iter()
            .find(|r| r.direction == RelationDirection::Outgoing && r.rel_type == rel::RDF_TYPE)
            .map(|r| r.value_uri.clone());
        info!(uri = %object.uri, relations = relations.len(), "Object created");
        Ok(object)
    }

    /// Overwrite the core fields of an object. Relations are left as they are.
    pub async fn update_object(&self, uri: &str, patch: ObjectPatch) -> GraphResult<Option<Node>> {
        let props = patch.into_props();
        check_identity(&props)?;
        match self.store.get_node_by_uri(uri).await? {
            Some(node) if node.has_label(labels::OBJECT) => {}
            _ => return Ok(None),
        }
        self.store.update_node(uri, props).await
    }

    // ---- helpers ----

    async fn run(&self, query: GraphQuery) -> GraphResult<Vec<crate::model::Record>> {
        self.store.run_custom_query(query).await
    }

    async fn count(&self, query: GraphQuery, column: &str) -> GraphResult<i64> {
        let rows = self.run(query).await?;
        Ok(rows.first().and_then(|row| row.int(column)).unwrap_or(0))
    }

    async fn classes_from(&self, query: GraphQuery, column: &str) -> GraphResult<Vec<Class>> {
        let rows = self.run(query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.node(column))
            .filter_map(classify)
            .filter_map(Entity::into_class)
            .collect())
    }

    /// Create a node labeled with its role and with its own uri.
    async fn create_role_node(
        &self,
        role: &str,
        uri: &str,
        title: &str,
        description: Option<&str>,
    ) -> GraphResult<Node> {
        let mut props = Properties::new();
        props.insert("uri".to_string(), json!(uri));
        props.insert("title".to_string(), json!(title));
        props.insert("description".to_string(), json!(description));
        let node_labels = [role.to_string(), uri.to_string()];
        self.store.create_node(props, &node_labels).await
    }

    /// Create an arc; if an endpoint is missing, delete `created` again.
    async fn link_or_rollback(&self, from: &str, to: &str, rel_type: &str, created: &str) -> GraphResult<()> {
        if self.store.create_arc(from, to, rel_type).await?.is_some() {
            return Ok(());
        }
        self.store.delete_node_by_uri(created).await?;
        debug!(from, to, rel_type, created, "Endpoint missing, node rolled back");
        Err(GraphError::EndpointNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// A merge may change `uri` or `title` but never clear them.
fn check_identity(props: &Properties) -> GraphResult<()> {
    for key in ["uri", "title"] {
        match props.get(key) {
            None => {}
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(_) => {
                return Err(GraphError::Invalid(format!("'{key}' must be a non-empty string")));
            }
        }
    }
    Ok(())
}

/// Classify a node the repository just wrote.
fn expect_entity<T>(node: &Node, pick: fn(Entity) -> Option<T>) -> GraphResult<T> {
    classify(node)
        .and_then(pick)
        .ok_or_else(|| GraphError::decode(format!("node '{}' does not classify as expected", node.uri)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flag() {
        let outgoing: RelationParam =
            serde_json::from_str(r#"{"direction": 1, "value_uri": "a", "rel_type": "rdf__type"}"#).unwrap();
        assert_eq!(outgoing.direction, RelationDirection::Outgoing);

        let incoming: RelationParam =
            serde_json::from_str(r#"{"direction": 0, "value_uri": "a", "rel_type": "owns"}"#).unwrap();
        assert_eq!(incoming.direction, RelationDirection::Incoming);

        let other: RelationDirection = serde_json::from_str("7").unwrap();
        assert_eq!(other, RelationDirection::Incoming);
    }

    #[test]
    fn test_check_identity() {
        let mut props = Properties::new();
        props.insert("description".into(), Value::Null);
        assert!(check_identity(&props).is_ok());

        props.insert("title".into(), json!("Felis"));
        assert!(check_identity(&props).is_ok());

        for bad in [Value::Null, json!(""), json!("  "), json!(7)] {
            let mut props = Properties::new();
            props.insert("uri".into(), bad);
            assert!(matches!(check_identity(&props), Err(GraphError::Invalid(_))));
        }
    }

    #[test]
    fn test_patch_keeps_only_given_fields() {
        let patch = ObjectPatch {
            title: Some("Rex".into()),
            ..Default::default()
        };
        let props = patch.into_props();
        assert_eq!(props.len(), 1);
        assert_eq!(props["title"], json!("Rex"));
    }
}
