//! The graph store seam.
//!
//! [`GraphStore`] is the only interface the ontology layer has to
//! persistence. [`crate::GraphClient`] implements it on Neo4j and
//! [`crate::MemoryGraph`] implements it in process.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::GraphResult;
use crate::model::{Arc, Node, Properties, Record};

/// Relationship type used by `create_arc` when the caller has no better one.
pub const DEFAULT_REL_TYPE: &str = "RELATED";

/// A named, parametrized Cypher statement known ahead of time.
#[derive(Debug, Clone, Copy)]
pub struct Statement {
    /// Stable identifier; lets stores that cannot parse Cypher dispatch on it.
    pub name: &'static str,
    pub cypher: &'static str,
    /// Columns to read back from every row.
    pub columns: &'static [&'static str],
}

/// A query ready to run: Cypher text, parameters, and the columns to return.
#[derive(Debug, Clone, Default)]
pub struct GraphQuery {
    pub name: Option<&'static str>,
    pub cypher: String,
    pub params: Properties,
    pub columns: Vec<String>,
}

impl GraphQuery {
    /// An ad-hoc query. No validation is done on the text.
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            ..Default::default()
        }
    }

    /// A query for one of the known statements.
    pub fn statement(statement: &Statement) -> Self {
        Self {
            name: Some(statement.name),
            cypher: statement.cypher.to_string(),
            params: Properties::new(),
            columns: statement.columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Columns to read back from each row.
    pub fn returns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Primitive operations over a property graph.
///
/// Every call is independent: there is no transaction spanning two calls,
/// so a sequence of writes can be left half-applied by a failure.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run arbitrary Cypher and return one [`Record`] per row.
    async fn run_custom_query(&self, query: GraphQuery) -> GraphResult<Vec<Record>>;

    /// Every node in the graph. Unbounded; see [`GraphStore::get_nodes_page`].
    async fn get_all_nodes(&self) -> GraphResult<Vec<Node>>;

    /// One page of the full node scan, ordered by `uri`.
    async fn get_nodes_page(&self, skip: usize, limit: usize) -> GraphResult<Vec<Node>>;

    /// Every node with at least one outgoing arc, with `arcs` populated.
    async fn get_all_nodes_and_arcs(&self) -> GraphResult<Vec<Node>>;

    /// Nodes carrying all of `labels`.
    async fn get_nodes_by_labels(&self, labels: &[String]) -> GraphResult<Vec<Node>>;

    async fn get_node_by_uri(&self, uri: &str) -> GraphResult<Option<Node>>;

    /// Insert a node with `uri`, `title` and `description` taken from `props`
    /// (a fresh uri is generated when it is missing or empty) and `labels`.
    async fn create_node(&self, props: Properties, labels: &[String]) -> GraphResult<Node>;

    /// Link two existing nodes. `None` when either endpoint does not exist.
    async fn create_arc(
        &self,
        from_uri: &str,
        to_uri: &str,
        rel_type: &str,
    ) -> GraphResult<Option<Arc>>;

    /// Merge `props` into a node. `None` when no node has `uri`.
    async fn update_node(&self, uri: &str, props: Properties) -> GraphResult<Option<Node>>;

    /// Detach-delete a node. Absent nodes are not an error.
    async fn delete_node_by_uri(&self, uri: &str) -> GraphResult<()>;

    /// Delete an arc by its `id` property. Absent arcs are not an error.
    async fn delete_arc_by_id(&self, id: &str) -> GraphResult<()>;
}

/// A fresh random uri (UUID v4).
pub fn generate_uri() -> String {
    Uuid::new_v4().to_string()
}

/// The three properties `create_node` writes, with a uri filled in.
pub(crate) fn node_creation_props(props: &Properties) -> Properties {
    let uri = match props.get("uri").and_then(Value::as_str) {
        Some(uri) if !uri.is_empty() => uri.to_string(),
        _ => generate_uri(),
    };

    let mut out = Properties::new();
    out.insert("uri".to_string(), Value::String(uri));
    for key in ["title", "description"] {
        out.insert(key.to_string(), props.get(key).cloned().unwrap_or(Value::Null));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creation_props_generate_uri() {
        let mut props = Properties::new();
        props.insert("uri".into(), json!(""));
        props.insert("title".into(), json!("Animal"));
        props.insert("colour".into(), json!("brown"));

        let out = node_creation_props(&props);
        assert_eq!(out.len(), 3);
        assert_eq!(out["title"], json!("Animal"));
        assert_eq!(out["description"], Value::Null);
        assert!(Uuid::parse_str(out["uri"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_creation_props_keep_uri() {
        let mut props = Properties::new();
        props.insert("uri".into(), json!("fixed"));
        assert_eq!(node_creation_props(&props)["uri"], json!("fixed"));
    }

    #[test]
    fn test_query_builder() {
        let query = GraphQuery::new("MATCH (n {uri: $uri}) RETURN n")
            .param("uri", "a")
            .returns(["n"]);
        assert_eq!(query.param_str("uri"), Some("a"));
        assert_eq!(query.columns, vec!["n".to_string()]);
        assert!(query.name.is_none());
    }
}
