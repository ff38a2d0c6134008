//! Neo4j connection client and [`GraphStore`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use tracing::debug;

use crate::convert::{
    arc_from_bolt, label_suffix, node_from_bolt, props_to_bolt, quote_ident, record_from_row, to_bolt,
};
use crate::error::{GraphError, GraphResult};
use crate::model::{Arc, Node, Properties, Record};
use crate::store::{node_creation_props, GraphQuery, GraphStore};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://127.0.0.1:7687".to_string(),
            user: "neo4j".to_string(),
            password: "12345678".to_string(),
            database: "neo4j".to_string(),
            max_connections: 8,
        }
    }
}

impl GraphConfig {
    /// `memory://` selects the in-process graph instead of Neo4j.
    pub fn is_in_memory(&self) -> bool {
        self.uri.starts_with("memory://")
    }
}

/// Client for Neo4j. Holds the connection pool; each call checks out its
/// own pooled session and hands it back when the call returns.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping runs right
    /// away to surface an unreachable server at startup.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(200)
            .build()?;

        let graph = Graph::connect(neo4j_config).await?;
        graph.run(Query::new("RETURN 1".to_string())).await?;

        debug!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> GraphResult<()> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> GraphResult<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn query_nodes(&self, query: Query, column: &str) -> GraphResult<Vec<Node>> {
        let rows = self.query(query).await?;
        let mut nodes = Vec::with_capacity(rows.len());
        for row in rows {
            let node: neo4rs::Node = row.get(column).map_err(GraphError::decode)?;
            nodes.push(node_from_bolt(&node)?);
        }
        Ok(nodes)
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn run_custom_query(&self, query: GraphQuery) -> GraphResult<Vec<Record>> {
        debug!(name = query.name.unwrap_or("custom"), "Running graph query");

        let mut cypher = Query::new(query.cypher.clone());
        for (key, value) in &query.params {
            cypher = cypher.param(key, to_bolt(value));
        }

        let rows = self.query(cypher).await?;
        rows.iter()
            .map(|row| record_from_row(row, &query.columns))
            .collect()
    }

    async fn get_all_nodes(&self) -> GraphResult<Vec<Node>> {
        self.query_nodes(Query::new("MATCH (n) RETURN n".to_string()), "n")
            .await
    }

    async fn get_nodes_page(&self, skip: usize, limit: usize) -> GraphResult<Vec<Node>> {
        let query = Query::new("MATCH (n) RETURN n ORDER BY n.uri SKIP $skip LIMIT $limit".to_string())
            .param("skip", skip as i64)
            .param("limit", limit as i64);
        self.query_nodes(query, "n").await
    }

    async fn get_all_nodes_and_arcs(&self) -> GraphResult<Vec<Node>> {
        let query = Query::new(
            "MATCH (n)-[r]->(m)
             RETURN n, r, m.uri AS to_uri"
                .to_string(),
        );
        let rows = self.query(query).await?;

        // Rows come one per arc; fold them into nodes keeping first-seen order.
        let mut nodes: Vec<Node> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for row in rows {
            let node: neo4rs::Node = row.get("n").map_err(GraphError::decode)?;
            let rel: neo4rs::Relation = row.get("r").map_err(GraphError::decode)?;
            let to_uri: String = row.get("to_uri").unwrap_or_default();

            let node = node_from_bolt(&node)?;
            let slot = match index.get(&node.uri) {
                Some(&slot) => slot,
                None => {
                    index.insert(node.uri.clone(), nodes.len());
                    nodes.push(Node {
                        arcs: Some(Vec::new()),
                        ..node.clone()
                    });
                    nodes.len() - 1
                }
            };
            let arc = arc_from_bolt(&rel, &node.uri, &to_uri)?;
            if let Some(arcs) = nodes[slot].arcs.as_mut() {
                arcs.push(arc);
            }
        }
        Ok(nodes)
    }

    async fn get_nodes_by_labels(&self, labels: &[String]) -> GraphResult<Vec<Node>> {
        let query = Query::new(format!("MATCH (n{}) RETURN n", label_suffix(labels)));
        self.query_nodes(query, "n").await
    }

    async fn get_node_by_uri(&self, uri: &str) -> GraphResult<Option<Node>> {
        let query = Query::new("MATCH (n {uri: $uri}) RETURN n LIMIT 1".to_string()).param("uri", uri);
        Ok(self.query_nodes(query, "n").await?.into_iter().next())
    }

    async fn create_node(&self, props: Properties, labels: &[String]) -> GraphResult<Node> {
        let props = node_creation_props(&props);
        let mut query = Query::new(format!(
            "CREATE (n{} {{uri: $uri, title: $title, description: $description}})
             RETURN n",
            label_suffix(labels)
        ));
        for (key, value) in &props {
            query = query.param(key, to_bolt(value));
        }

        let node = self
            .query_nodes(query, "n")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::decode("CREATE returned no node"))?;
        debug!(uri = %node.uri, labels = ?node.labels, "Node created");
        Ok(node)
    }

    async fn create_arc(
        &self,
        from_uri: &str,
        to_uri: &str,
        rel_type: &str,
    ) -> GraphResult<Option<Arc>> {
        let query = Query::new(format!(
            "MATCH (a {{uri: $from_uri}}), (b {{uri: $to_uri}})
             CREATE (a)-[r:{} {{id: randomUUID(), uri: $rel_type}}]->(b)
             RETURN r",
            quote_ident(rel_type)
        ))
        .param("from_uri", from_uri)
        .param("to_uri", to_uri)
        .param("rel_type", rel_type);

        let rows = self.query(query).await?;
        match rows.first() {
            Some(row) => {
                let rel: neo4rs::Relation = row.get("r").map_err(GraphError::decode)?;
                debug!(from_uri, to_uri, rel_type, "Arc created");
                Ok(Some(arc_from_bolt(&rel, from_uri, to_uri)?))
            }
            None => Ok(None),
        }
    }

    async fn update_node(&self, uri: &str, props: Properties) -> GraphResult<Option<Node>> {
        let query = Query::new(
            "MATCH (n {uri: $uri})
             SET n += $props
             RETURN n"
                .to_string(),
        )
        .param("uri", uri)
        .param("props", props_to_bolt(&props));
        Ok(self.query_nodes(query, "n").await?.into_iter().next())
    }

    async fn delete_node_by_uri(&self, uri: &str) -> GraphResult<()> {
        let query = Query::new("MATCH (n {uri: $uri}) DETACH DELETE n".to_string()).param("uri", uri);
        self.execute(query).await
    }

    async fn delete_arc_by_id(&self, id: &str) -> GraphResult<()> {
        let query = Query::new("MATCH ()-[r]->() WHERE r.id = $id DELETE r".to_string()).param("id", id);
        self.execute(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.database, "neo4j");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GraphConfig = serde_json::from_str(r#"{"uri": "memory://"}"#).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.user, "neo4j");
    }
}
