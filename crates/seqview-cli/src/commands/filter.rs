use super::{default_extension, load_input, write_output};
use crate::cli::FilterArgs;
use crate::error::Result;
use seqview::engine::store::DatasetStore;
use seqview::workflows::search;

pub async fn run(args: FilterArgs) -> Result<()> {
    let mut store = DatasetStore::new();
    let source = load_input(&mut store, &args.input)?;

    let filtered = search::filter(&mut store, source, &args.query)?;
    if filtered == source {
        println!("Input has no rows, nothing to filter.");
        return Ok(());
    }

    let dataset = store.get(filtered)?;
    let path = write_output(dataset, args.output.as_deref(), default_extension(dataset))?;
    println!(
        "✓ Kept {} of {} row(s) as '{}', written to: {}",
        dataset.n_rows(),
        store.get(source)?.n_rows(),
        dataset.name,
        path.display()
    );
    Ok(())
}
