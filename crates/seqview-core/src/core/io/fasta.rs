use crate::core::io::traits::DatasetFile;
use crate::core::models::record::SequenceRecord;
use bio::io::fasta;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence of record '{id}' is not valid UTF-8")]
    InvalidUtf8 { id: String },
}

/// FASTA adapter for the record view of a dataset.
///
/// On read, `name` and `id` are the first header token and `description` is
/// the whole header line. On write, a description that already begins with the
/// id is used as the header verbatim, so imported records round-trip unchanged.
pub struct FastaFile;

impl FastaFile {
    fn header_description(record: &SequenceRecord) -> Option<&str> {
        let description = record.description.as_str();
        let rest = match description.strip_prefix(record.id.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                rest.trim_start()
            }
            _ => description,
        };
        (!rest.is_empty()).then_some(rest)
    }

    /// Writes records from a borrowed slice; [`DatasetFile::write_to`] delegates here.
    pub fn write_records(
        records: &[SequenceRecord],
        writer: &mut impl Write,
    ) -> Result<(), FastaError> {
        let mut fasta_writer = fasta::Writer::new(writer);
        for record in records {
            fasta_writer.write(
                &record.id,
                Self::header_description(record),
                record.sequence.as_bytes(),
            )?;
        }
        fasta_writer.flush()?;
        Ok(())
    }
}

impl DatasetFile for FastaFile {
    type View = Vec<SequenceRecord>;
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::View, Self::Error> {
        let mut records = Vec::new();
        for result in fasta::Reader::new(reader).records() {
            let record = result?;
            let id = record.id().to_string();
            let sequence = String::from_utf8(record.seq().to_vec())
                .map_err(|_| FastaError::InvalidUtf8 { id: id.clone() })?;
            let description = match record.desc() {
                Some(desc) if !desc.is_empty() => format!("{} {}", id, desc),
                _ => id.clone(),
            };
            records.push(SequenceRecord::new(id.clone(), id, description, sequence));
        }
        Ok(records)
    }

    fn write_to(view: &Self::View, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_records(view, writer)
    }
}
