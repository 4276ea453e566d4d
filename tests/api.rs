use json_dict::{JsonDict, Options, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_path(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{name}.json"));
    (dir, path)
}

// ---- construction -----------------------------------------------------------

#[test]
fn new_does_not_load_existing_file() {
    let (_dir, path) = temp_path("no_implicit_load");
    std::fs::write(&path, r#"{"a": 1}"#).unwrap();

    let db = JsonDict::new(&path);
    assert!(db.is_empty());
}

#[test]
fn new_does_not_create_the_file() {
    let (_dir, path) = temp_path("no_create");
    let _db = JsonDict::new(&path);
    assert!(!path.exists());
}

#[test]
fn open_loads_when_present() {
    let (_dir, path) = temp_path("open_present");
    std::fs::write(&path, r#"{"a": 1}"#).unwrap();

    let db = JsonDict::open(&path).unwrap();
    assert_eq!(db.get("a"), Some(&Value::Int(1)));
}

#[test]
fn open_missing_file_is_empty() {
    let (_dir, path) = temp_path("open_missing");
    let db = JsonDict::open(&path).unwrap();
    assert!(db.is_empty());
}

#[test]
fn open_still_reports_parse_errors() {
    let (_dir, path) = temp_path("open_garbage");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        JsonDict::open(&path),
        Err(json_dict::Error::Parse(_))
    ));
}

#[test]
fn defaults() {
    let (_dir, path) = temp_path("defaults");
    let db = JsonDict::new(&path);
    assert_eq!(db.path(), path.as_path());
    assert!(!db.is_compressed());
    assert!(!db.is_autosave());
    assert_eq!(*db.options(), Options::default());
}

// ---- reads ------------------------------------------------------------------

#[test]
fn len_contains_key_is_empty() {
    let (_dir, path) = temp_path("len_contains");
    let mut db = JsonDict::new(&path);

    assert!(db.is_empty());
    assert!(!db.contains_key("a"));

    db.insert("a", 1).unwrap();
    db.insert("b", 2).unwrap();
    assert_eq!(db.len(), 2);
    assert!(db.contains_key("a"));
    assert!(!db.contains_key("z"));
}

#[test]
fn iteration_is_in_key_order() {
    let (_dir, path) = temp_path("iter_order");
    let mut db = JsonDict::new(&path);
    db.update([("c", 3), ("a", 1), ("b", 2)]).unwrap();

    let keys: Vec<_> = db.keys().cloned().collect();
    assert_eq!(keys, ["a", "b", "c"]);

    let values: Vec<_> = db.values().filter_map(Value::as_i64).collect();
    assert_eq!(values, [1, 2, 3]);

    let mut seen = Vec::new();
    for (k, v) in &db {
        seen.push((k.as_str(), v.as_i64().unwrap()));
    }
    assert_eq!(seen, [("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(db.iter().count(), 3);
}

#[test]
fn index_by_key() {
    let (_dir, path) = temp_path("index");
    let mut db = JsonDict::new(&path);
    db.insert("name", "widget").unwrap();
    assert_eq!(db["name"].as_str(), Some("widget"));
}

#[test]
#[should_panic(expected = "not found")]
fn index_missing_key_panics() {
    let (_dir, path) = temp_path("index_missing");
    let db = JsonDict::new(&path);
    let _ = &db["nope"];
}

// ---- writes -----------------------------------------------------------------

#[test]
fn insert_returns_previous() {
    let (_dir, path) = temp_path("insert_prev");
    let mut db = JsonDict::new(&path);
    assert_eq!(db.insert("a", 1).unwrap(), None);
    assert_eq!(db.insert("a", 2).unwrap(), Some(Value::Int(1)));
    assert_eq!(db.get("a"), Some(&Value::Int(2)));
}

#[test]
fn remove_returns_value() {
    let (_dir, path) = temp_path("remove");
    let mut db = JsonDict::new(&path);
    db.insert("a", true).unwrap();
    assert_eq!(db.remove("a").unwrap(), Some(Value::Bool(true)));
    assert_eq!(db.remove("a").unwrap(), None);
    assert!(db.is_empty());
}

#[test]
fn update_overwrites_existing() {
    let (_dir, path) = temp_path("update_overwrite");
    let mut db = JsonDict::new(&path);
    db.insert("a", 1).unwrap();

    db.update([("a", 99), ("b", 2)]).unwrap();
    assert_eq!(db.get("a"), Some(&Value::Int(99)));
    assert_eq!(db.get("b"), Some(&Value::Int(2)));
}

#[test]
fn clear_removes_all_entries() {
    let (_dir, path) = temp_path("clear");
    let mut db = JsonDict::new(&path);
    db.update([("a", 1), ("b", 2)]).unwrap();
    db.clear().unwrap();
    assert!(db.is_empty());
    assert_eq!(db.get("a"), None);
}

#[test]
fn update_with_existing_key() {
    let (_dir, path) = temp_path("update_with");
    let mut db = JsonDict::new(&path);
    db.insert("counter", 10).unwrap();

    let found = db
        .update_with("counter", |v| {
            if let Value::Int(n) = v {
                *n += 5;
            }
        })
        .unwrap();
    assert!(found);
    assert_eq!(db.get("counter"), Some(&Value::Int(15)));
}

#[test]
fn update_with_missing_key_returns_false() {
    let (_dir, path) = temp_path("update_with_missing");
    let mut db = JsonDict::new(&path);
    let found = db.update_with("nope", |v| *v = Value::Null).unwrap();
    assert!(!found);
    assert!(db.is_empty());
}

#[test]
fn get_or_insert_with_only_computes_when_missing() {
    let (_dir, path) = temp_path("goiw");
    let mut db = JsonDict::new(&path);
    db.insert("key", 10).unwrap();

    let val = db
        .get_or_insert_with("key", || -> i32 { panic!("should not be called") })
        .unwrap();
    assert_eq!(val, &Value::Int(10));

    let val = db.get_or_insert_with("other", || 7 * 6).unwrap();
    assert_eq!(val, &Value::Int(42));
    assert_eq!(db.len(), 2);
}

// ---- misc -------------------------------------------------------------------

#[test]
fn equality_ignores_path_and_options() {
    let (_dir, path) = temp_path("eq");
    let mut a = JsonDict::new(&path);
    let mut b = JsonDict::builder(path.with_extension("gz"))
        .compress(true)
        .build();
    a.insert("x", "y").unwrap();
    assert_ne!(a, b);
    b.insert("x", "y").unwrap();
    assert_eq!(a, b);
}

#[test]
fn display_matches_saved_document() {
    let (_dir, path) = temp_path("display");
    let mut db = JsonDict::new(&path);
    db.insert("a", 1).unwrap();
    db.save().unwrap();

    assert_eq!(db.to_string(), std::fs::read_to_string(&path).unwrap());
    assert_eq!(db.to_json_string().unwrap(), "{\n  \"a\": 1\n}");
}

#[test]
fn display_with_unencodable_value_does_not_panic() {
    let (_dir, path) = temp_path("display_nan");
    let mut db = JsonDict::new(&path);
    db.insert("bad", f64::NAN).unwrap();

    let text = db.to_string();
    assert!(text.starts_with("<unencodable:"), "got {text}");
    assert!(db.to_json_string().is_err());
}

#[test]
fn debug_impls_dont_panic() {
    let (_dir, path) = temp_path("debug");
    let db = JsonDict::new(&path);
    let dbg = format!("{db:?}");
    assert!(dbg.contains("JsonDict"));
    assert!(dbg.contains("path"));

    let builder = JsonDict::builder(&path);
    assert!(format!("{builder:?}").contains("JsonDictBuilder"));
}

#[test]
fn unicode_keys_survive_reload() {
    let (_dir, path) = temp_path("unicode");
    {
        let mut db = JsonDict::new(&path);
        db.insert("ыыы", 1).unwrap();
        db.save().unwrap();
    }
    let db = JsonDict::open(&path).unwrap();
    assert_eq!(db.get("ыыы"), Some(&Value::Int(1)));
}
