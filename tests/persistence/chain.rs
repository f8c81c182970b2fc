use std::sync::Arc;

use repository_persistence::{
    Id, InMemoryPersistence, NoPersistence, Persistence, PersistenceChain, PersistenceExt,
};
use serde_json::json;

use crate::support::{init_tracing, json_store, record, yaml_store};

#[test]
fn create_replicates_to_every_member() {
    init_tracing();
    let (_json_dir, json) = json_store();
    let (_yaml_dir, yaml) = yaml_store();
    let json = json.shared();
    let yaml = yaml.shared();

    let chain = PersistenceChain::default()
        .with(Arc::clone(&json))
        .with(Arc::clone(&yaml));

    let id = chain.create(record(json!({"id": "rep", "v": 1}))).unwrap();
    assert_eq!(id, Id::from("rep"));
    assert_eq!(json.read(&id).unwrap(), record(json!({"id": "rep", "v": 1})));
    assert_eq!(yaml.read(&id).unwrap(), record(json!({"id": "rep", "v": 1})));
}

#[test]
fn create_returns_first_successful_id() {
    init_tracing();
    let primary = InMemoryPersistence::new();
    let replica = InMemoryPersistence::new();
    let chain = PersistenceChain::default()
        .with(primary.clone())
        .with(replica.clone());

    // without an id each in-memory member generates its own
    let id = chain.create(record(json!({"name": "X"}))).unwrap();
    assert!(primary.read(&id).is_ok());
    assert_eq!(replica.len().unwrap(), 1);
}

#[test]
fn read_falls_back_past_misses() {
    init_tracing();
    let empty = InMemoryPersistence::new();
    let (_dir, files) = json_store();
    files.create(record(json!({"id": "k", "from": "files"}))).unwrap();

    let chain = PersistenceChain::default().with(empty).with(files);
    assert_eq!(
        chain.read(&Id::from("k")).unwrap().get("from"),
        Some(&json!("files"))
    );
    assert!(chain.read(&Id::from("nope")).unwrap_err().is_not_found());
}

#[test]
fn read_all_uses_first_member_with_records() {
    init_tracing();
    let first = InMemoryPersistence::new();
    let second = InMemoryPersistence::with_records([("b", record(json!({"id": "b"})))]);

    let chain = PersistenceChain::default()
        .with(NoPersistence::default())
        .with(first)
        .with(second);
    assert_eq!(chain.read_all().unwrap(), vec![record(json!({"id": "b"}))]);
}

#[test]
fn update_sums_members_that_hold_the_record() {
    init_tracing();
    let memory = InMemoryPersistence::new();
    let (_dir, files) = json_store();
    files.create(record(json!({"id": "u", "v": 1}))).unwrap();

    let chain = PersistenceChain::default().with(memory.clone()).with(files);

    // the file member rejects unknown ids, the in-memory member upserts
    assert_eq!(chain.update(record(json!({"id": "u", "v": 2}))).unwrap(), 2);
    assert_eq!(chain.update(record(json!({"id": "fresh"}))).unwrap(), 1);
    assert_eq!(memory.len().unwrap(), 2);
}

#[test]
fn delete_cleans_up_everywhere() {
    init_tracing();
    let a = InMemoryPersistence::new();
    let b = InMemoryPersistence::new();
    let chain = PersistenceChain::default().with(a.clone()).with(b.clone());

    chain.create(record(json!({"id": "d"}))).unwrap();
    assert_eq!(chain.delete(&Id::from("d")).unwrap(), 2);
    assert_eq!(chain.delete(&Id::from("d")).unwrap(), 0);
    assert!(a.is_empty().unwrap() && b.is_empty().unwrap());
}

#[test]
fn repository_on_chain_saves_to_all_replicas() {
    init_tracing();
    let a = InMemoryPersistence::new();
    let b = InMemoryPersistence::new();
    let repo = PersistenceChain::default()
        .with(a.clone())
        .with(b.clone())
        .repository();

    assert!(repo.save(&json!({"title": "replicated"})).unwrap());
    assert_eq!(a.records().unwrap(), b.records().unwrap());
    assert_eq!(repo.find_all().unwrap().len(), 1);
}
