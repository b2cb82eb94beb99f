use crate::core::digest::digest_with;
use crate::core::digest::rule::CleavageRule;
use crate::core::models::dataset::Dataset;
use crate::core::models::ids::DatasetId;
use crate::core::models::record::SequenceRecord;
use crate::core::models::table::Table;
use crate::engine::config::DigestionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::runner::Task;
use crate::engine::store::DatasetStore;
use std::convert::Infallible;
use tracing::{info, instrument};

pub const TRYPTIC_SUFFIX: &str = " Tryptic Peptides";

/// Display name for the digest of `source_name` under `rule`.
pub fn peptides_name(source_name: &str, rule: &CleavageRule) -> String {
    if rule.name == CleavageRule::trypsin().name {
        format!("{}{}", source_name, TRYPTIC_SUFFIX)
    } else {
        format!("{} {} Peptides", source_name, rule.name)
    }
}

#[instrument(skip_all, name = "digestion_workflow")]
pub fn run(
    records: &[SequenceRecord],
    config: &DigestionConfig,
    reporter: &ProgressReporter,
) -> Vec<SequenceRecord> {
    info!(records = records.len(), "Digesting with {}", config.rule);
    let fragments = reporter.per_record("Digestion", records.len(), |tick| {
        digest_with(records, &config.rule, tick)
    });
    info!(fragments = fragments.len(), "Digestion finished");
    fragments
}

/// Builds a background task digesting the records of `source`.
///
/// The task label is the display name its result should be registered under.
pub fn task(
    source: &Dataset,
    config: DigestionConfig,
    reporter: ProgressReporter<'static>,
) -> Result<Task<Vec<SequenceRecord>, Vec<SequenceRecord>>, EngineError> {
    let records = super::source_records(source)?;
    let label = peptides_name(&source.name, &config.rule);
    Ok(Task::new(label, records, move |records: Vec<SequenceRecord>| {
        Ok::<_, Infallible>(run(&records, &config, &reporter))
    }))
}

/// Registers digestion fragments as a linked dataset.
pub fn register(
    store: &mut DatasetStore,
    label: impl Into<String>,
    fragments: Vec<SequenceRecord>,
) -> Result<DatasetId, EngineError> {
    let table = Table::from_records(&fragments);
    store.register(table, Some(fragments), label)
}
