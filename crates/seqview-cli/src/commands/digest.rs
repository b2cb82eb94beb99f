use super::{load_input, run_in_background, write_output};
use crate::cli::DigestArgs;
use crate::config::builder::build_digestion_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use seqview::engine::error::EngineError;
use seqview::engine::store::DatasetStore;
use seqview::workflows::digest;
use tracing::info;

pub async fn run(args: DigestArgs) -> Result<()> {
    let config = build_digestion_config(&args)?;
    let mut store = DatasetStore::new();
    let source = load_input(&mut store, &args.input)?;

    let progress_handler = CliProgressHandler::new();
    let task = digest::task(store.get(source)?, config, progress_handler.reporter())?;

    println!("Starting digestion...");
    let outcome = run_in_background("digest", task).await?;
    let fragments = outcome.result.map_err(EngineError::from)?;
    info!(fragments = fragments.len(), "Digestion task completed");

    let uid = digest::register(&mut store, outcome.label, fragments)?;
    let dataset = store.get(uid)?;
    let path = write_output(dataset, args.output.as_deref(), "fasta")?;
    println!(
        "✓ {} peptide(s) as '{}' written to: {}",
        dataset.n_rows(),
        dataset.name,
        path.display()
    );
    Ok(())
}
