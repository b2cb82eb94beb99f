use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Common interface for reading and writing one view of a dataset.
pub trait DatasetFile {
    /// The in-memory view this format reads into and writes from.
    type View;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a view from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::View, Self::Error>;

    /// Writes a view to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the writer fails.
    fn write_to(view: &Self::View, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::View, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(view: &Self::View, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(view, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
