use std::fmt;

/// A single biological sequence with its identifying metadata.
///
/// Records are never mutated by the transformations in this crate; digestion
/// and filtering build new records instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceRecord {
    pub name: String,        // Short name, usually the first header token
    pub id: String,          // Accession or identifier
    pub description: String, // Free text, digestion appends a fragment ordinal
    pub sequence: String,    // Residues in one-letter code
}

impl SequenceRecord {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        description: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }

    /// Number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Builds a record that shares this record's name and id but carries a new
    /// sequence and description.
    pub(crate) fn derive(&self, description: String, sequence: String) -> Self {
        Self {
            name: self.name.clone(),
            id: self.id.clone(),
            description,
            sequence,
        }
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} [{} aa]",
            self.id,
            self.name,
            self.description,
            self.len()
        )
    }
}
