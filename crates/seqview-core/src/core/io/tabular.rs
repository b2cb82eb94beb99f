use crate::core::io::traits::DatasetFile;
use crate::core::models::dataset::DatasetError;
use crate::core::models::table::{Cell, Table};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Comma-separated values with a header row, mapped onto the table view.
pub struct CsvFile;

impl DatasetFile for CsvFile {
    type View = Table;
    type Error = TabularError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::View, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let header: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Ok(Table::empty());
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(Cell::infer).collect());
        }

        Ok(Table::from_rows(header, rows)?)
    }

    fn write_to(view: &Self::View, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if view.n_columns() == 0 {
            return Ok(());
        }
        csv_writer.write_record(view.column_names())?;
        for row in 0..view.n_rows() {
            let cells = view
                .columns()
                .iter()
                .map(|column| column.cells()[row].to_string());
            csv_writer.write_record(cells)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
