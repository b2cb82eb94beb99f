use super::load_input;
use crate::cli::FindArgs;
use crate::error::{CliError, Result};
use seqview::core::search::{self, ColumnScope};
use seqview::engine::store::DatasetStore;
use tracing::info;

pub async fn run(args: FindArgs) -> Result<()> {
    let mut store = DatasetStore::new();
    let uid = load_input(&mut store, &args.input)?;
    let dataset = store.get(uid)?;
    let table = dataset.table();

    if search::is_clear_signal(&args.query) {
        println!("Empty query, nothing to find.");
        return Ok(());
    }

    let scope = match args.column {
        Some(name) if table.column_index(&name).is_none() => {
            return Err(CliError::Argument(format!(
                "Column '{}' does not exist in '{}'",
                name, dataset.name
            )));
        }
        Some(name) => ColumnScope::Named(name),
        None => ColumnScope::All,
    };

    let names: Vec<&str> = table.column_names().collect();
    let mut count = 0usize;
    for hit in search::find(table, &args.query, &scope) {
        let value = table
            .cell(hit.row, hit.column)
            .map(|cell| cell.to_string())
            .unwrap_or_default();
        println!("{}\t{}\t{}", hit.row + 1, names[hit.column], value);
        count += 1;
    }

    info!(matches = count, "Searched '{}' for '{}'", dataset.name, args.query);
    println!("{} matching cell(s) in '{}'.", count, dataset.name);
    Ok(())
}
