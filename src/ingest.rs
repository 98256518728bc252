use crate::cli::Cli;
use crate::document::RawDocument;
use crate::error::Result;
use crate::record::GameRecord;
use crate::store::{GameStore, StoredRow, TABLE};

/// Runs the whole pipeline once: load, extract, validate, then insert one row.
///
/// Progress goes to stdout for the calling process to capture. The id read
/// and the insert are not in a transaction, so two concurrent runs against
/// the same file can pick the same id.
pub fn ingest(cli: &Cli) -> Result<StoredRow> {
    println!("Starting game import...");
    println!("Reading JSON: {}", cli.json_path.display());
    println!("Target database: {}", cli.db_path.display());

    let document = RawDocument::load(&cli.json_path)?;
    let record = GameRecord::from_document(document)?;

    println!("Extracted -> Name: {} | URL: ... (ok)", record.name);

    let store = GameStore::open(&cli.db_path)?;

    match store.has_table() {
        Ok(true) => {}
        Ok(false) => tracing::warn!(table = TABLE, "table not found, insert will fail"),
        Err(err) => tracing::debug!(error = %err, "could not list tables"),
    }

    let appid = store.next_appid().value();
    println!("Generated ID: {}", appid);

    let row = store.insert(appid, record)?;
    println!("SUCCESS: game inserted into database.");

    Ok(row)
}
