use casebook::models::Case;
use casebook::{BackendKind, RecordStore, Storage, StoreConfig};

// CASEBOOK_REST_URL=https://<project>.supabase.co/rest/v1 CASEBOOK_REST_KEY=... \
//     cargo run --example remote
fn main() -> Result<(), casebook::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casebook=debug".into()),
        )
        .init();

    let storage = Storage::open(StoreConfig::from_env())?;
    if storage.kind() != BackendKind::Remote {
        eprintln!("set CASEBOOK_REST_URL and CASEBOOK_REST_KEY to talk to a remote table");
        return Ok(());
    }

    match storage.cases.read_all() {
        Ok(cases) => println!("{} cases on the remote table", cases.len()),
        Err(e) => eprintln!("remote table unavailable: {e}"),
    }
    let published = storage
        .cases
        .find_many(&|c: &Case| c.published_at.is_some())?;
    println!("{} published", published.len());
    Ok(())
}
