//! Node/arc model of the property graph.
//!
//! Plain data: nothing here talks to a store. Both the Neo4j adapter and
//! the in-memory graph produce these types, and the ontology layer only
//! ever looks at them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property map of a node or arc. Values are JSON scalars (or lists of them).
pub type Properties = BTreeMap<String, Value>;

/// A vertex of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned identifier.
    pub id: String,
    /// Application-assigned unique key (the `uri` property).
    pub uri: String,
    /// Role tags in store order. Membership is what matters; see [`Node::has_label`].
    pub labels: Vec<String>,
    pub props: Properties,
    /// Outgoing arcs, only populated by whole-graph traversals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arcs: Option<Vec<Arc>>,
}

impl Node {
    /// Build a node, taking `uri` from the property map.
    pub fn new(id: impl Into<String>, labels: Vec<String>, props: Properties) -> Self {
        let uri = props
            .get("uri")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            id: id.into(),
            uri,
            labels,
            props,
            arcs: None,
        }
    }

    /// Does this node carry `label`?
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// String value of a property, if present and a string.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

/// A directed, labeled edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub id: String,
    /// Relationship type.
    pub label: String,
    pub props: Properties,
    pub from_uri: String,
    pub to_uri: String,
}

/// One value of a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Node(Node),
    Arc(Arc),
    Scalar(Value),
}

/// One row returned by a custom query, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, RecordValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: RecordValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RecordValue) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RecordValue> {
        self.values.get(column)
    }

    pub fn node(&self, column: &str) -> Option<&Node> {
        match self.values.get(column) {
            Some(RecordValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Move a node out of the record.
    pub fn take_node(&mut self, column: &str) -> Option<Node> {
        match self.values.remove(column) {
            Some(RecordValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn str(&self, column: &str) -> Option<&str> {
        match self.values.get(column) {
            Some(RecordValue::Scalar(value)) => value.as_str(),
            _ => None,
        }
    }

    pub fn int(&self, column: &str) -> Option<i64> {
        match self.values.get(column) {
            Some(RecordValue::Scalar(value)) => value.as_i64(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
