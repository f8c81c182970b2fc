use std::fs;

use repository_persistence::{
    FileBackend, FileConfig, Id, JsonFormat, Persistence, PersistenceDecorator, YamlFilePersistence,
};
use serde_json::json;
use tempfile::TempDir;

use crate::support::{json_store, record, yaml_store};

#[test]
fn json_round_trip_keeps_fields_and_order() {
    let (temp_dir, store) = json_store();
    let data = record(json!({"id": "r1", "zeta": 1, "alpha": [1, 2], "nested": {"k": "v"}}));

    let id = store.create(data.clone()).unwrap();
    assert_eq!(id, Id::from("r1"));
    assert_eq!(store.read(&id).unwrap(), data);

    let raw = fs::read_to_string(temp_dir.path().join("r1.json")).unwrap();
    assert!(JsonFormat::validate(&raw));
    assert!(raw.find("zeta").unwrap() < raw.find("alpha").unwrap());
}

#[test]
fn yaml_round_trip() {
    let (temp_dir, store) = yaml_store();
    let data = record(json!({"id": 7, "name": "seven", "tags": ["a", "b"]}));

    let id = store.create(data.clone()).unwrap();
    assert_eq!(id, Id::Int(7));
    assert!(temp_dir.path().join("7.yaml").is_file());
    assert_eq!(store.read(&id).unwrap(), data);
}

#[test]
fn delete_twice_returns_one_then_zero() {
    let (_temp_dir, store) = json_store();
    let id = store.create(record(json!({"id": "gone"}))).unwrap();

    assert_eq!(store.delete(&id).unwrap(), 1);
    assert_eq!(store.delete(&id).unwrap(), 0);
    assert_eq!(store.delete(&Id::from("never-there")).unwrap(), 0);
}

#[test]
fn update_of_missing_record_is_invalid() {
    let (_temp_dir, store) = yaml_store();
    let err = store.update(record(json!({"id": "missing", "v": 1}))).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn read_all_lists_only_own_extension() {
    let temp_dir = TempDir::new().unwrap();
    let json = repository_persistence::JsonFilePersistence::new(temp_dir.path()).unwrap();
    let yaml = YamlFilePersistence::new(temp_dir.path()).unwrap();

    json.create(record(json!({"id": "j"}))).unwrap();
    yaml.create(record(json!({"id": "y1"}))).unwrap();
    yaml.create(record(json!({"id": "y2"}))).unwrap();

    assert_eq!(json.read_all().unwrap().len(), 1);
    assert_eq!(yaml.read_all().unwrap().len(), 2);
}

#[test]
fn corrupt_file_surfaces_as_runtime_error() {
    let (temp_dir, store) = yaml_store();
    fs::write(temp_dir.path().join("broken.yaml"), "key: [unclosed").unwrap();

    let err = store.read(&Id::from("broken")).unwrap_err();
    assert!(err.is_runtime());
    assert!(err.to_string().contains("broken"));
    assert!(store.read_all().unwrap_err().is_runtime());
}

#[test]
fn configured_extension_and_nested_base_dir() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("data").join("notes");
    let config = FileConfig::builder(&base).extension(".yml").build();
    let store = YamlFilePersistence::with_config(config).unwrap();

    let id = store.create(record(json!({"id": "n"}))).unwrap();
    assert!(base.join("n.yml").is_file());
    assert_eq!(store.file_path(&id).unwrap(), base.join("n.yml"));
}

#[test]
fn decorator_forwards_to_file_backend() {
    let (temp_dir, store) = json_store();
    let decorated = PersistenceDecorator::new(store);

    let id = decorated.create(record(json!({"title": "through"}))).unwrap();
    assert!(temp_dir.path().join(format!("{}.json", id)).is_file());
    assert_eq!(decorated.read_all().unwrap().len(), 1);
    assert_eq!(decorated.inner().extension(), "json");
}
