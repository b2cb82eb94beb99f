pub mod digest;
pub mod filter;
pub mod find;
pub mod mz;
pub mod replace;

use crate::error::{CliError, Result};
use seqview::core::models::dataset::Dataset;
use seqview::core::models::ids::DatasetId;
use seqview::engine::error::EngineError;
use seqview::engine::runner::{Task, TaskOutcome, TaskRunner};
use seqview::engine::store::DatasetStore;
use seqview::workflows::io;
use std::path::{Path, PathBuf};
use tokio::sync::oneshot;
use tracing::info;

const FASTA_EXTENSIONS: [&str; 3] = ["fasta", "fa", "faa"];

fn is_fasta(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FASTA_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Imports `path` into `store`, choosing the reader by file extension.
pub(crate) fn load_input(store: &mut DatasetStore, path: &Path) -> Result<DatasetId> {
    info!("Loading input dataset from {:?}", path);
    let uid = if is_fasta(path) {
        io::import_fasta(store, path)?
    } else {
        io::import_csv(store, path)?
    };
    Ok(uid)
}

/// Writes `dataset` to `output`, or to a file named after the dataset when no
/// output is given. FASTA is chosen by extension.
pub(crate) fn write_output(
    dataset: &Dataset,
    output: Option<&Path>,
    default_extension: &str,
) -> Result<PathBuf> {
    let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.{}",
            io::export_file_stem(&dataset.name),
            default_extension
        ))
    });
    if is_fasta(&path) {
        io::export_fasta(dataset, &path)?;
    } else {
        io::export_csv(dataset, &path)?;
    }
    Ok(path)
}

pub(crate) fn default_extension(dataset: &Dataset) -> &'static str {
    if dataset.has_records() { "fasta" } else { "csv" }
}

/// Submits `task` to a fresh runner and awaits its completion callback.
pub(crate) async fn run_in_background<I, O>(
    runner_name: &str,
    task: Task<I, O>,
) -> Result<TaskOutcome<O>>
where
    I: Send + 'static,
    O: Send + 'static,
{
    let label = task.label().to_string();
    let runner = TaskRunner::new(runner_name);
    let (sender, receiver) = oneshot::channel();

    runner
        .submit(task, move |outcome| {
            let _ = sender.send(outcome);
        })
        .map_err(EngineError::from)?;

    let outcome = receiver.await.map_err(|_| CliError::TaskLost(label))?;
    tokio::task::block_in_place(|| runner.wait());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::tempdir;

    #[test]
    fn fasta_detection_is_case_insensitive() {
        assert!(is_fasta(Path::new("a.fasta")));
        assert!(is_fasta(Path::new("a.FA")));
        assert!(is_fasta(Path::new("dir/a.faa")));
        assert!(!is_fasta(Path::new("a.csv")));
        assert!(!is_fasta(Path::new("fasta")));
    }

    #[test]
    fn load_input_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let fasta = dir.path().join("p.fa");
        let csv = dir.path().join("t.csv");
        fs::write(&fasta, ">sp|P1|A desc\nPEPTIDEK\n").unwrap();
        fs::write(&csv, "a,b\n1,2\n").unwrap();

        let mut store = DatasetStore::new();
        let fasta_uid = load_input(&mut store, &fasta).unwrap();
        let csv_uid = load_input(&mut store, &csv).unwrap();

        assert!(store.get(fasta_uid).unwrap().has_records());
        assert!(!store.get(csv_uid).unwrap().has_records());
    }

    #[test]
    fn write_output_defaults_to_dataset_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("t.csv");
        fs::write(&input, "a\n1\n").unwrap();
        let mut store = DatasetStore::new();
        let uid = load_input(&mut store, &input).unwrap();
        let dataset = store.get(uid).unwrap();

        let target = dir.path().join("copy.csv");
        let written = write_output(dataset, Some(&target), "csv").unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "a\n1\n");
        assert_eq!(default_extension(dataset), "csv");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn run_in_background_delivers_the_outcome() {
        let (started, observed) = mpsc::channel();
        let task = Task::new("double", 21, move |n: i32| {
            let _ = started.send(());
            Ok::<_, std::convert::Infallible>(n * 2)
        });

        let outcome = run_in_background("test", task).await.unwrap();
        assert!(observed.try_recv().is_ok());
        assert_eq!(outcome.label, "double");
        assert_eq!(outcome.result, Ok(42));
    }
}
