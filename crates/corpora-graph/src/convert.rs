//! Conversions between neo4rs values and the graph model.

use neo4rs::{BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType};
use serde_json::Value;

use crate::error::{GraphError, GraphResult};
use crate::model::{Arc, Node, Properties, Record, RecordValue};

/// JSON parameter to Bolt. Numbers that fit an `i64` stay integers.
pub(crate) fn to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or_default())),
        },
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::Array(items) => {
            let mut list = BoltList::new();
            for item in items {
                list.push(to_bolt(item));
            }
            BoltType::List(list)
        }
        Value::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, item) in map {
                bolt.put(BoltString::new(key), to_bolt(item));
            }
            BoltType::Map(bolt)
        }
    }
}

/// Property map to a Bolt map parameter.
pub(crate) fn props_to_bolt(props: &Properties) -> BoltType {
    let mut bolt = BoltMap::new();
    for (key, value) in props {
        bolt.put(BoltString::new(key), to_bolt(value));
    }
    BoltType::Map(bolt)
}

pub(crate) fn node_from_bolt(node: &neo4rs::Node) -> GraphResult<Node> {
    let mut props = Properties::new();
    for key in node.keys() {
        let key = key.to_string();
        let value: Value = node.get(&key).map_err(GraphError::decode)?;
        props.insert(key, value);
    }
    let labels = node.labels().iter().map(|l| l.to_string()).collect();
    Ok(Node::new(node.id().to_string(), labels, props))
}

/// Endpoint uris are not part of a relation value; callers pass what they know.
pub(crate) fn arc_from_bolt(rel: &neo4rs::Relation, from_uri: &str, to_uri: &str) -> GraphResult<Arc> {
    let mut props = Properties::new();
    for key in rel.keys() {
        let key = key.to_string();
        let value: Value = rel.get(&key).map_err(GraphError::decode)?;
        props.insert(key, value);
    }
    // Arcs created here carry a random `id` property; fall back to the store id.
    let id = props
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| rel.id().to_string());
    Ok(Arc {
        id,
        label: rel.typ().to_string(),
        props,
        from_uri: from_uri.to_string(),
        to_uri: to_uri.to_string(),
    })
}

/// Read the requested columns of a row. Nodes and relations keep their
/// structure; everything else becomes plain JSON.
pub(crate) fn record_from_row(row: &neo4rs::Row, columns: &[String]) -> GraphResult<Record> {
    let mut record = Record::new();
    for column in columns {
        let value = if let Ok(node) = row.get::<neo4rs::Node>(column) {
            RecordValue::Node(node_from_bolt(&node)?)
        } else if let Ok(rel) = row.get::<neo4rs::Relation>(column) {
            RecordValue::Arc(arc_from_bolt(&rel, "", "")?)
        } else {
            RecordValue::Scalar(row.get::<Value>(column).unwrap_or(Value::Null))
        };
        record.insert(column.as_str(), value);
    }
    Ok(record)
}

/// Quote a label or relationship type for interpolation into Cypher.
pub(crate) fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// `:A:B` label suffix, or empty when there are no labels.
pub(crate) fn label_suffix(labels: &[String]) -> String {
    labels.iter().map(|l| format!(":{}", quote_ident(l))).collect()
}
