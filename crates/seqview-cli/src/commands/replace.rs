use super::{default_extension, load_input, write_output};
use crate::cli::ReplaceArgs;
use crate::config::builder::resolve_use_regex;
use crate::error::Result;
use seqview::engine::store::DatasetStore;
use seqview::workflows::search;
use tracing::info;

pub async fn run(args: ReplaceArgs) -> Result<()> {
    let use_regex = resolve_use_regex(&args)?;
    let mut store = DatasetStore::new();
    let source = load_input(&mut store, &args.input)?;

    info!(use_regex, "Replacing '{}' with '{}'", args.query, args.replacement);
    let result = search::replace(
        &mut store,
        source,
        &args.query,
        &args.replacement,
        use_regex,
    )?;
    if result == source {
        println!("Nothing to replace.");
        return Ok(());
    }

    let dataset = store.get(result)?;
    let path = write_output(dataset, args.output.as_deref(), default_extension(dataset))?;
    println!(
        "✓ '{}' ({} row(s)) written to: {}",
        dataset.name,
        dataset.n_rows(),
        path.display()
    );
    Ok(())
}
