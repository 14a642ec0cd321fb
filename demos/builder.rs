use casebook::models::CaseUpdate;
use casebook::{FileStore, RecordStore};

fn main() -> Result<(), casebook::Error> {
    let dir = std::env::temp_dir().join("casebook_example_builder");

    // compact JSON instead of the default indented output
    let updates = FileStore::<CaseUpdate>::builder(&dir, "updates.json")
        .pretty(false)
        .build();

    updates.create(CaseUpdate::system("c1", "received"))?;
    updates.create(CaseUpdate::new("c1", "looking into it", "admin-1"))?;

    let contents = std::fs::read_to_string(updates.path())?;
    println!("On-disk JSON:\n{contents}");
    println!("\nDebug output: {updates:?}");

    let removed = updates.delete(&|u: &CaseUpdate| u.is_system())?;
    println!("removed system entries: {removed}");

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
