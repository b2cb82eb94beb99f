use crate::core::io::fasta::FastaFile;
use crate::core::io::tabular::CsvFile;
use crate::core::io::traits::DatasetFile;
use crate::core::models::dataset::Dataset;
use crate::core::models::ids::DatasetId;
use crate::core::models::record::SequenceRecord;
use crate::core::models::table::Table;
use crate::engine::error::EngineError;
use crate::engine::store::DatasetStore;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, instrument};

pub fn read_csv_from(reader: impl Read) -> Result<Table, EngineError> {
    Ok(CsvFile::read_from(&mut BufReader::new(reader))?)
}

pub fn write_csv_to(table: &Table, mut writer: impl Write) -> Result<(), EngineError> {
    Ok(CsvFile::write_to(table, &mut writer)?)
}

pub fn read_fasta_from(reader: impl Read) -> Result<Vec<SequenceRecord>, EngineError> {
    Ok(FastaFile::read_from(&mut BufReader::new(reader))?)
}

pub fn write_fasta_to(records: &[SequenceRecord], mut writer: impl Write) -> Result<(), EngineError> {
    Ok(FastaFile::write_records(records, &mut writer)?)
}

/// Imports a CSV file as a pure tabular dataset named after the file.
#[instrument(skip_all, name = "import_csv")]
pub fn import_csv(store: &mut DatasetStore, path: &Path) -> Result<DatasetId, EngineError> {
    let table = read_csv_from(open(path)?)?;
    info!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "Imported CSV from '{}'",
        path.display()
    );
    store.register(table, None, display_name(path))
}

/// Imports a FASTA file as a linked dataset named after the file.
#[instrument(skip_all, name = "import_fasta")]
pub fn import_fasta(store: &mut DatasetStore, path: &Path) -> Result<DatasetId, EngineError> {
    let records = read_fasta_from(open(path)?)?;
    info!(
        records = records.len(),
        "Imported FASTA from '{}'",
        path.display()
    );
    let table = Table::from_records(&records);
    store.register(table, Some(records), display_name(path))
}

pub fn export_csv(dataset: &Dataset, path: &Path) -> Result<(), EngineError> {
    let mut writer = BufWriter::new(create(path)?);
    write_csv_to(dataset.table(), &mut writer)?;
    writer.flush().map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(rows = dataset.n_rows(), "Exported '{}' to '{}'", dataset.name, path.display());
    Ok(())
}

/// Writes the linked records of `dataset` as FASTA.
///
/// # Errors
///
/// Returns [`EngineError::NoRecords`] for pure tabular datasets.
pub fn export_fasta(dataset: &Dataset, path: &Path) -> Result<(), EngineError> {
    let records = dataset.records().ok_or_else(|| EngineError::NoRecords {
        name: dataset.name.clone(),
    })?;
    let mut writer = BufWriter::new(create(path)?);
    write_fasta_to(records, &mut writer)?;
    writer.flush().map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        records = records.len(),
        "Exported '{}' to '{}'",
        dataset.name,
        path.display()
    );
    Ok(())
}

/// Default file stem for saving a dataset: spaces become underscores and
/// colons are dropped.
pub fn export_file_stem(display_name: &str) -> String {
    display_name.replace(' ', "_").replace(':', "")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open(path: &Path) -> Result<File, EngineError> {
    File::open(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<File, EngineError> {
    File::create(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
