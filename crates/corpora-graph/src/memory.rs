//! In-process graph store.
//!
//! Implements every [`GraphStore`] primitive plus the named ontology
//! statements, so the whole stack runs without a Neo4j server
//! (`graph.uri = "memory://"`). Ad-hoc Cypher is not interpreted.

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::model::{Arc, Node, Properties, Record, RecordValue};
use crate::ontology::cypher::{names, MAX_HIERARCHY_DEPTH};
use crate::ontology::entities::{labels, rel};
use crate::store::{generate_uri, node_creation_props, GraphQuery, GraphStore};

#[derive(Default)]
struct MemoryState {
    nodes: Vec<Node>,
    arcs: Vec<Arc>,
    next_id: u64,
}

impl MemoryState {
    fn node(&self, uri: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.uri == uri)
    }

    fn has(&self, uri: &str, label: &str) -> bool {
        self.node(uri).is_some_and(|n| n.has_label(label))
    }

    /// Targets of `uri`'s outgoing `rel_type` arcs that carry `label`.
    fn targets(&self, uri: &str, rel_type: &str, label: &str) -> Vec<&Node> {
        self.arcs
            .iter()
            .filter(|a| a.from_uri == uri && a.label == rel_type)
            .filter_map(|a| self.node(&a.to_uri))
            .filter(|n| n.has_label(label))
            .collect()
    }

    /// Sources of arcs of `rel_type` pointing at `uri` that carry `label`.
    fn sources(&self, uri: &str, rel_type: &str, label: Option<&str>) -> Vec<&Node> {
        self.arcs
            .iter()
            .filter(|a| a.to_uri == uri && a.label == rel_type)
            .filter_map(|a| self.node(&a.from_uri))
            .filter(|n| label.is_none_or(|l| n.has_label(l)))
            .collect()
    }

    fn remove_node(&mut self, uri: &str) {
        self.nodes.retain(|n| n.uri != uri);
        self.arcs.retain(|a| a.from_uri != uri && a.to_uri != uri);
    }

    fn run_statement(&mut self, name: &str, query: &GraphQuery) -> GraphResult<Vec<Record>> {
        let uri = query.param_str("uri").unwrap_or_default().to_string();
        let class_uri = query.param_str("class_uri").unwrap_or_default().to_string();
        let node_rows = |column: &str, nodes: Vec<&Node>| -> Vec<Record> {
            nodes
                .into_iter()
                .map(|n| Record::new().with(column, RecordValue::Node(n.clone())))
                .collect()
        };

        let rows = match name {
            names::PARENT_CLASSES => {
                let parents = self
                    .nodes
                    .iter()
                    .filter(|n| n.has_label(labels::CLASS))
                    .filter(|n| self.sources(&n.uri, rel::SUBCLASS_OF, Some(labels::CLASS)).is_empty())
                    .collect();
                node_rows("c", parents)
            }
            names::CLASS_PARENTS if self.has(&uri, labels::CLASS) => {
                node_rows("parent", self.targets(&uri, rel::SUBCLASS_OF, labels::CLASS))
            }
            names::CLASS_CHILDREN if self.has(&uri, labels::CLASS) => node_rows(
                "child",
                self.sources(&uri, rel::SUBCLASS_OF, Some(labels::CLASS)),
            ),
            names::CLASS_OBJECTS if self.has(&uri, labels::CLASS) => {
                node_rows("o", self.sources(&uri, rel::RDF_TYPE, Some(labels::OBJECT)))
            }
            names::CLASS_PARENTS | names::CLASS_CHILDREN | names::CLASS_OBJECTS => Vec::new(),
            names::OBJECT_TYPES => self
                .arcs
                .iter()
                .filter(|a| a.label == rel::RDF_TYPE)
                .filter(|a| self.has(&a.from_uri, labels::OBJECT) && self.has(&a.to_uri, labels::CLASS))
                .map(|a| {
                    Record::new()
                        .with("object_uri", RecordValue::Scalar(json!(a.from_uri)))
                        .with("class_uri", RecordValue::Scalar(json!(a.to_uri)))
                })
                .collect(),
            names::OBJECT_WITH_CLASS => match self.node(&uri) {
                Some(node) if node.has_label(labels::OBJECT) => {
                    let class = self
                        .targets(&uri, rel::RDF_TYPE, labels::CLASS)
                        .first()
                        .map(|c| json!(c.uri))
                        .unwrap_or(Value::Null);
                    vec![Record::new()
                        .with("o", RecordValue::Node(node.clone()))
                        .with("class_uri", RecordValue::Scalar(class))]
                }
                _ => Vec::new(),
            },
            names::DELETE_CLASS => {
                self.delete_class_cascade(&uri);
                Vec::new()
            }
            names::DATATYPE_SIGNATURE if self.has(&class_uri, labels::CLASS) => node_rows(
                "dtp",
                self.sources(&class_uri, rel::DOMAIN, Some(labels::DATATYPE_PROPERTY)),
            ),
            names::OBJECT_SIGNATURE if self.has(&class_uri, labels::CLASS) => {
                let mut rows = Vec::new();
                for op in self.sources(&class_uri, rel::DOMAIN, Some(labels::OBJECT_PROPERTY)) {
                    let ranges = self.targets(&op.uri, rel::RANGE, labels::CLASS);
                    let range_uris: Vec<Value> = if ranges.is_empty() {
                        vec![Value::Null]
                    } else {
                        ranges.iter().map(|r| json!(r.uri)).collect()
                    };
                    for range_uri in range_uris {
                        rows.push(
                            Record::new()
                                .with("op", RecordValue::Node(op.clone()))
                                .with("range_uri", RecordValue::Scalar(range_uri)),
                        );
                    }
                }
                rows
            }
            names::DATATYPE_SIGNATURE | names::OBJECT_SIGNATURE => Vec::new(),
            names::SUBCLASS_EDGES => {
                let child = query.param_str("child").unwrap_or_default();
                let parent = query.param_str("parent").unwrap_or_default();
                let edges = if self.has(child, labels::CLASS) && self.has(parent, labels::CLASS) {
                    self.arcs
                        .iter()
                        .filter(|a| a.label == rel::SUBCLASS_OF && a.from_uri == child && a.to_uri == parent)
                        .count()
                } else {
                    0
                };
                vec![Record::new().with("edges", RecordValue::Scalar(json!(edges)))]
            }
            names::ANCESTOR_PATHS => {
                let child = query.param_str("child").unwrap_or_default();
                let parent = query.param_str("parent").unwrap_or_default();
                let paths = usize::from(self.reaches_ancestor(parent, child));
                vec![Record::new().with("paths", RecordValue::Scalar(json!(paths)))]
            }
            other => return Err(GraphError::UnsupportedQuery(other.to_string())),
        };
        Ok(rows)
    }

    /// Can `ancestor` be reached from `start` by climbing SUBCLASS_OF?
    fn reaches_ancestor(&self, start: &str, ancestor: &str) -> bool {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([(start.to_string(), 0usize)]);
        while let Some((uri, depth)) = queue.pop_front() {
            if depth >= MAX_HIERARCHY_DEPTH {
                continue;
            }
            for parent in self.targets(&uri, rel::SUBCLASS_OF, labels::CLASS) {
                if parent.uri == ancestor {
                    return true;
                }
                if seen.insert(parent.uri.clone()) {
                    queue.push_back((parent.uri.clone(), depth + 1));
                }
            }
        }
        false
    }

    fn delete_class_cascade(&mut self, uri: &str) {
        if !self.has(uri, labels::CLASS) {
            return;
        }

        let mut doomed: Vec<String> = vec![uri.to_string()];
        let mut seen: HashSet<String> = doomed.iter().cloned().collect();
        let mut cursor = 0;
        while cursor < doomed.len() {
            let children: Vec<String> = self
                .sources(&doomed[cursor], rel::SUBCLASS_OF, Some(labels::CLASS))
                .into_iter()
                .map(|n| n.uri.clone())
                .collect();
            for child in children {
                if seen.insert(child.clone()) {
                    doomed.push(child);
                }
            }
            cursor += 1;
        }

        let mut dependents = Vec::new();
        for class in &doomed {
            for node in self.sources(class, rel::RDF_TYPE, Some(labels::OBJECT)) {
                dependents.push(node.uri.clone());
            }
            for node in self.sources(class, rel::DOMAIN, None) {
                dependents.push(node.uri.clone());
            }
        }

        for victim in dependents.iter().chain(doomed.iter()) {
            self.remove_node(victim);
        }
        debug!(uri, classes = doomed.len(), dependents = dependents.len(), "Class cascade deleted");
    }
}

/// Graph kept in process memory. Cheap to create; nothing is persisted.
#[derive(Default)]
pub struct MemoryGraph {
    state: RwLock<MemoryState>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes and arcs currently held.
    pub async fn counts(&self) -> (usize, usize) {
        let state = self.state.read().await;
        (state.nodes.len(), state.arcs.len())
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn run_custom_query(&self, query: GraphQuery) -> GraphResult<Vec<Record>> {
        let name = query
            .name
            .ok_or_else(|| GraphError::UnsupportedQuery(query.cypher.clone()))?;
        let mut state = self.state.write().await;
        state.run_statement(name, &query)
    }

    async fn get_all_nodes(&self) -> GraphResult<Vec<Node>> {
        Ok(self.state.read().await.nodes.clone())
    }

    async fn get_nodes_page(&self, skip: usize, limit: usize) -> GraphResult<Vec<Node>> {
        let mut nodes = self.state.read().await.nodes.clone();
        nodes.sort_by(|a, b| a.uri.cmp(&b.uri));
        Ok(nodes.into_iter().skip(skip).take(limit).collect())
    }

    async fn get_all_nodes_and_arcs(&self) -> GraphResult<Vec<Node>> {
        let state = self.state.read().await;
        let mut out = Vec::new();
        for node in &state.nodes {
            let arcs: Vec<Arc> = state
                .arcs
                .iter()
                .filter(|a| a.from_uri == node.uri)
                .cloned()
                .collect();
            if !arcs.is_empty() {
                out.push(Node {
                    arcs: Some(arcs),
                    ..node.clone()
                });
            }
        }
        Ok(out)
    }

    async fn get_nodes_by_labels(&self, labels: &[String]) -> GraphResult<Vec<Node>> {
        let state = self.state.read().await;
        Ok(state
            .nodes
            .iter()
            .filter(|n| labels.iter().all(|l| n.has_label(l)))
            .cloned()
            .collect())
    }

    async fn get_node_by_uri(&self, uri: &str) -> GraphResult<Option<Node>> {
        Ok(self.state.read().await.node(uri).cloned())
    }

    async fn create_node(&self, props: Properties, labels: &[String]) -> GraphResult<Node> {
        let mut props = node_creation_props(&props);
        // Null properties are not stored, same as Neo4j.
        props.retain(|_, v| !v.is_null());

        let mut state = self.state.write().await;
        state.next_id += 1;
        let node = Node::new(state.next_id.to_string(), labels.to_vec(), props);
        state.nodes.push(node.clone());
        Ok(node)
    }

    async fn create_arc(
        &self,
        from_uri: &str,
        to_uri: &str,
        rel_type: &str,
    ) -> GraphResult<Option<Arc>> {
        let mut state = self.state.write().await;
        if state.node(from_uri).is_none() || state.node(to_uri).is_none() {
            return Ok(None);
        }

        let id = generate_uri();
        let mut props = Properties::new();
        props.insert("id".to_string(), json!(id));
        props.insert("uri".to_string(), json!(rel_type));
        let arc = Arc {
            id,
            label: rel_type.to_string(),
            props,
            from_uri: from_uri.to_string(),
            to_uri: to_uri.to_string(),
        };
        state.arcs.push(arc.clone());
        Ok(Some(arc))
    }

    async fn update_node(&self, uri: &str, props: Properties) -> GraphResult<Option<Node>> {
        let mut state = self.state.write().await;
        let Some(index) = state.nodes.iter().position(|n| n.uri == uri) else {
            return Ok(None);
        };

        let node = &mut state.nodes[index];
        for (key, value) in props {
            if value.is_null() {
                node.props.remove(&key);
            } else {
                node.props.insert(key, value);
            }
        }
        let new_uri = node.prop_str("uri").unwrap_or_default().to_string();
        node.uri = new_uri.clone();
        let updated = node.clone();

        // Arcs are keyed by endpoint uri here, so follow a renamed node.
        if new_uri != uri {
            for arc in state.arcs.iter_mut() {
                if arc.from_uri == uri {
                    arc.from_uri = new_uri.clone();
                }
                if arc.to_uri == uri {
                    arc.to_uri = new_uri.clone();
                }
            }
        }
        Ok(Some(updated))
    }

    async fn delete_node_by_uri(&self, uri: &str) -> GraphResult<()> {
        self.state.write().await.remove_node(uri);
        Ok(())
    }

    async fn delete_arc_by_id(&self, id: &str) -> GraphResult<()> {
        self.state.write().await.arcs.retain(|a| a.id != id);
        Ok(())
    }
}
