use super::{load_input, run_in_background, write_output};
use crate::cli::MzArgs;
use crate::config::builder::build_mass_charge_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use seqview::engine::error::EngineError;
use seqview::engine::store::DatasetStore;
use seqview::workflows::mass_charge;
use tracing::{info, warn};

pub async fn run(args: MzArgs) -> Result<()> {
    let config = build_mass_charge_config(&args)?;
    let mut store = DatasetStore::new();
    let source = load_input(&mut store, &args.input)?;

    let progress_handler = CliProgressHandler::new();
    let task = mass_charge::task(store.get(source)?, config, progress_handler.reporter())?;

    println!("Computing [M+H]+ values...");
    let outcome = run_in_background("mass-charge", task).await?;
    let batch = outcome.result.map_err(EngineError::from)?;

    for skipped in &batch.skipped {
        info!(row = skipped.index + 1, "Skipped '{}': {:?}", skipped.id, skipped.reason);
    }
    if batch.rows.is_empty() {
        warn!("No record was eligible for the inclusion list.");
    }

    let uid = mass_charge::register(&mut store, outcome.label, &batch)?;
    let dataset = store.get(uid)?;
    let path = write_output(dataset, args.output.as_deref(), "csv")?;
    println!(
        "✓ {} compound(s) as '{}' written to: {} ({} skipped)",
        batch.rows.len(),
        dataset.name,
        path.display(),
        batch.skipped.len()
    );
    Ok(())
}
