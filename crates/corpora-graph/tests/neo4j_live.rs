//! Runs the ontology statements against a live Neo4j server.
//!
//! Ignored by default. Run with
//! `NEO4J_URI=neo4j://127.0.0.1:7687 cargo test -p corpora-graph -- --ignored`
//! (`NEO4J_USER`, `NEO4J_PASSWORD` and `NEO4J_DB` are read as well).
//! Every node is created with a fresh uri and removed again, so a shared
//! database is left as it was found.

use corpora_graph::ontology::{NewObject, RelationParam};
use corpora_graph::{GraphConfig, GraphError, OntologyRepository};

async fn live_repo() -> Option<OntologyRepository> {
    let uri = std::env::var("NEO4J_URI").ok()?;
    let defaults = GraphConfig::default();
    let config = GraphConfig {
        uri,
        user: std::env::var("NEO4J_USER").unwrap_or(defaults.user.clone()),
        password: std::env::var("NEO4J_PASSWORD").unwrap_or(defaults.password.clone()),
        database: std::env::var("NEO4J_DB").unwrap_or(defaults.database.clone()),
        ..defaults
    };
    let store = corpora_graph::open_store(&config).await.unwrap();
    Some(OntologyRepository::new(store))
}

fn object(title: &str) -> NewObject {
    NewObject {
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "needs a running Neo4j (NEO4J_URI)"]
async fn test_live_hierarchy_and_parent_classes() {
    let Some(repo) = live_repo().await else {
        return;
    };
    let animal = repo.create_class("Animal", None, None).await.unwrap();
    let dog = repo
        .create_class("Dog", None, Some(&animal.uri))
        .await
        .unwrap();

    let parents: Vec<String> = repo
        .get_ontology_parent_classes()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.uri)
        .collect();
    assert!(parents.contains(&dog.uri));
    assert!(!parents.contains(&animal.uri));

    let up = repo.get_class_parents(&dog.uri).await.unwrap();
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].uri, animal.uri);
    let down = repo.get_class_children(&animal.uri).await.unwrap();
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].uri, dog.uri);

    assert!(!repo.add_class_parent(&animal.uri, &dog.uri).await.unwrap());
    let err = repo
        .add_class_parent(&dog.uri, &animal.uri)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Cycle { .. }));

    repo.delete_class(&animal.uri).await.unwrap();
}

#[tokio::test]
#[ignore = "needs a running Neo4j (NEO4J_URI)"]
async fn test_live_signature_and_cascade() {
    let Some(repo) = live_repo().await else {
        return;
    };
    let animal = repo.create_class("Animal", None, None).await.unwrap();
    let dog = repo
        .create_class("Dog", None, Some(&animal.uri))
        .await
        .unwrap();
    let legs = repo.add_class_attribute(&animal.uri, "legs").await.unwrap();
    let kin = repo
        .add_class_object_attribute(&dog.uri, "kin", &animal.uri)
        .await
        .unwrap();
    let rex = repo
        .create_object(object("Rex"), &[RelationParam::outgoing("rdf__type", &dog.uri)])
        .await
        .unwrap();

    let signature = repo.collect_signature(&dog.uri).await.unwrap();
    assert!(signature.datatype_properties.is_empty());
    assert_eq!(signature.object_properties.len(), 1);
    assert_eq!(
        signature.object_properties[0].range_class_uri.as_deref(),
        Some(animal.uri.as_str())
    );
    let signature = repo.collect_signature(&animal.uri).await.unwrap();
    assert_eq!(signature.datatype_properties[0].uri, legs.uri);

    let fetched = repo.get_object(&rex.uri).await.unwrap().unwrap();
    assert_eq!(fetched.class_uri.as_deref(), Some(dog.uri.as_str()));

    repo.delete_class(&animal.uri).await.unwrap();

    assert!(repo.get_class(&dog.uri).await.unwrap().is_none());
    assert!(repo.get_object(&rex.uri).await.unwrap().is_none());
    for uri in [&legs.uri, &kin.uri] {
        assert!(repo.store().get_node_by_uri(uri).await.unwrap().is_none());
    }
}
