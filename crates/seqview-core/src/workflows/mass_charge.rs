use super::digest::TRYPTIC_SUFFIX;
use crate::core::mass::{MassChargeBatch, compute_with};
use crate::core::models::dataset::Dataset;
use crate::core::models::ids::DatasetId;
use crate::core::models::record::SequenceRecord;
use crate::engine::config::MassChargeConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::runner::Task;
use crate::engine::store::DatasetStore;
use std::convert::Infallible;
use tracing::{info, instrument};

pub const INCLUSION_SUFFIX: &str = " Thermo Ready";

/// Display name of the inclusion list derived from `source_name`.
///
/// A trailing digestion suffix is dropped first, so the peptides of
/// `proteins.fasta` become `proteins.fasta Thermo Ready`.
pub fn inclusion_list_name(source_name: &str) -> String {
    let base = source_name
        .strip_suffix(TRYPTIC_SUFFIX)
        .unwrap_or(source_name);
    format!("{}{}", base, INCLUSION_SUFFIX)
}

#[instrument(skip_all, name = "mass_charge_workflow")]
pub fn run(
    records: &[SequenceRecord],
    config: &MassChargeConfig,
    reporter: &ProgressReporter,
) -> MassChargeBatch {
    let batch = reporter.per_record("Mass-Charge", records.len(), |tick| {
        compute_with(records, &config.policy, tick)
    });
    info!(
        included = batch.rows.len(),
        skipped = batch.skipped.len(),
        "Computed [M+H]+ for inclusion list"
    );
    if !batch.skipped.is_empty() {
        reporter.note(format!(
            "Skipped {} record(s) not eligible for the inclusion list",
            batch.skipped.len()
        ));
    }
    batch
}

/// Builds a background task computing the inclusion list for `source`.
pub fn task(
    source: &Dataset,
    config: MassChargeConfig,
    reporter: ProgressReporter<'static>,
) -> Result<Task<Vec<SequenceRecord>, MassChargeBatch>, EngineError> {
    let records = super::source_records(source)?;
    let label = inclusion_list_name(&source.name);
    Ok(Task::new(label, records, move |records: Vec<SequenceRecord>| {
        Ok::<_, Infallible>(run(&records, &config, &reporter))
    }))
}

/// Registers an inclusion list as a pure tabular dataset.
pub fn register(
    store: &mut DatasetStore,
    label: impl Into<String>,
    batch: &MassChargeBatch,
) -> Result<DatasetId, EngineError> {
    let table = batch.to_table()?;
    store.register(table, None, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mass::{CHARGE_RANGE_COLUMN, MASS_COLUMN, SkipReason};
    use crate::core::models::table::{Cell, Column, Table};
    use crate::engine::config::MassChargeConfigBuilder;
    use crate::engine::runner::TaskRunner;
    use std::sync::mpsc;
    use std::time::Duration;

    fn default_config() -> MassChargeConfig {
        MassChargeConfigBuilder::new()
            .min_length(6)
            .excluded_residues(vec!['X'])
            .charge_range(2, 5)
            .build()
            .unwrap()
    }

    fn peptides() -> Vec<SequenceRecord> {
        vec![
            SequenceRecord::new("a", "a", "a Fragment 1", "PEPTIDE"),
            SequenceRecord::new("a", "a", "a Fragment 2", "MK"),
            SequenceRecord::new("b", "b", "b Fragment 1", "SAMXPLER"),
            SequenceRecord::new("b", "b", "b Fragment 2", "GSAMPLER"),
        ]
    }

    #[test]
    fn inclusion_list_name_drops_digestion_suffix() {
        assert_eq!(
            inclusion_list_name("proteins.fasta Tryptic Peptides"),
            "proteins.fasta Thermo Ready"
        );
        assert_eq!(inclusion_list_name("peptides.csv"), "peptides.csv Thermo Ready");
        assert_eq!(
            inclusion_list_name("Peptides Tryptic Peptides"),
            "Peptides Thermo Ready"
        );
    }

    #[test]
    fn run_filters_ineligible_records() {
        let batch = run(&peptides(), &default_config(), &ProgressReporter::new());
        let sequences: Vec<_> = batch.rows.iter().map(|r| r.sequence.as_str()).collect();
        assert_eq!(sequences, vec!["PEPTIDE", "GSAMPLER"]);
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(batch.skipped[1].reason, SkipReason::ExcludedResidue('X'));
        assert!(batch.rows.iter().all(|r| r.charge_range == "2-5"));
    }

    #[test]
    fn task_accepts_tables_with_biological_columns() {
        let table = Table::new(vec![
            Column::new("Name", vec![Cell::from("p")]),
            Column::new("ID", vec![Cell::from("p")]),
            Column::new("Description", vec![Cell::from("p Fragment 1")]),
            Column::new("Sequence", vec![Cell::from("PEPTIDE")]),
        ])
        .unwrap();
        let mut store = DatasetStore::new();
        let source = store.register(table, None, "peptides.csv").unwrap();

        let task = task(
            store.get(source).unwrap(),
            default_config(),
            ProgressReporter::new(),
        )
        .unwrap();
        let runner = TaskRunner::new("mz-test");
        let (tx, rx) = mpsc::channel();
        runner
            .submit(task, move |outcome| {
                let _ = tx.send(outcome);
            })
            .unwrap();
        runner.wait();

        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.label, "peptides.csv Thermo Ready");
        let batch = outcome.result.unwrap();
        let uid = register(&mut store, outcome.label, &batch).unwrap();

        let dataset = store.get(uid).unwrap();
        assert!(!dataset.has_records());
        let table = dataset.table();
        let mass_col = table.column_index(MASS_COLUMN).unwrap();
        let z_col = table.column_index(CHARGE_RANGE_COLUMN).unwrap();
        match table.cell(0, mass_col) {
            Some(Cell::Float(m)) => assert!((m - 800.3672).abs() < 1e-3),
            other => panic!("unexpected mass cell: {:?}", other),
        }
        assert_eq!(table.cell(0, z_col), Some(&Cell::from("2-5")));
    }
}
