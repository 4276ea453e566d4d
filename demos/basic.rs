use json_dict::chrono::Utc;
use json_dict::{JsonDict, Value};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), json_dict::Error> {
    // RUST_LOG=json_dict=debug shows every load/save
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::temp_dir().join("json_dict_example_basic.json");
    let mut db = JsonDict::new(&path);

    // insert / get / remove
    db.insert("apples", 3)?;
    db.insert("bananas", 5)?;
    db.insert("created", Utc::now())?;
    println!("apples  = {:?}", db.get("apples"));
    println!("bananas = {:?}", db.get("bananas"));

    // edit in place
    db.update_with("apples", |v| *v = Value::from(v.as_i64().unwrap_or(0) + 1))?;
    println!("apples after update = {:?}", db.get("apples"));

    // bulk merge
    db.update([("grapes", 12), ("lemons", 7)])?;
    db.remove("bananas")?;

    println!("keys = {:?}", db.keys().collect::<Vec<_>>());
    println!("len  = {}", db.len());

    // persist, then read it back into a fresh dict
    db.save()?;
    let mut copy = JsonDict::new(&path);
    copy.load()?;
    println!("on disk:\n{copy}");
    println!("created is a datetime again: {:?}", copy["created"].as_datetime());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
