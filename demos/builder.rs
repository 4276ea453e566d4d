use json_dict::JsonDict;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::temp_dir().join("json_dict_example_builder.json.gz");

    // gzip because of the extension, and save on every change
    let mut db = JsonDict::builder(&path)
        .detect_compression()
        .autosave(true)
        .open()?;

    db.insert("name", "json-dict")?;
    db.insert("version", "0.1.0")?;
    db.insert("tags", vec!["json", "persistence"])?;

    // no save() needed, the file is already up to date
    let mut contents = String::new();
    flate2::read::GzDecoder::new(std::fs::File::open(db.path())?).read_to_string(&mut contents)?;
    println!("On-disk JSON (decompressed):\n{contents}");

    println!("\nDebug output: {db:?}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
