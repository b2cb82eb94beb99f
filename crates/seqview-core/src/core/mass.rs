//! Peptide precursor mass computation and the inclusion-list policy.

use crate::core::chemistry::{PROTON_MASS, WATER_MONOISOTOPIC, residue_mass};
use crate::core::models::dataset::DatasetError;
use crate::core::models::record::SequenceRecord;
use crate::core::models::table::{Cell, Column, Table};
use thiserror::Error;
use tracing::warn;

pub const COMPOUND_COLUMN: &str = "Compound";
pub const FORMULA_COLUMN: &str = "Formula";
pub const MASS_COLUMN: &str = "M";
pub const CHARGE_RANGE_COLUMN: &str = "z range";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MassError {
    #[error("Residue '{residue}' at position {position} has no known monoisotopic mass")]
    UnknownResidue { residue: char, position: usize },

    #[error("Charge state must be at least 1")]
    ZeroCharge,

    #[error("Cannot compute the mass of an empty sequence")]
    EmptySequence,
}

/// Monoisotopic m/z of a peptide carrying `charge` protons.
///
/// `(sum(residues) + H2O + charge * H+) / charge`
pub fn peptide_mass(sequence: &str, charge: u8) -> Result<f64, MassError> {
    if charge == 0 {
        return Err(MassError::ZeroCharge);
    }
    if sequence.is_empty() {
        return Err(MassError::EmptySequence);
    }

    let mut neutral = WATER_MONOISOTOPIC;
    for (position, residue) in sequence.chars().enumerate() {
        neutral += residue_mass(residue).ok_or(MassError::UnknownResidue { residue, position })?;
    }

    let z = f64::from(charge);
    Ok((neutral + z * PROTON_MASS) / z)
}

/// Which records are eligible for the inclusion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionPolicy {
    pub min_length: usize,
    pub excluded_residues: Vec<char>,
    pub charge_range: (u8, u8),
}

impl InclusionPolicy {
    pub fn charge_range_label(&self) -> String {
        format!("{}-{}", self.charge_range.0, self.charge_range.1)
    }
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            excluded_residues: vec!['X'],
            charge_range: (2, 5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MassChargeRow {
    pub sequence: String,
    pub mass: f64,
    pub charge_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingSequence,
    TooShort { length: usize, min_length: usize },
    ExcludedResidue(char),
    UnknownResidue(char),
}

/// Audit entry for a record left out of the inclusion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MassChargeBatch {
    pub rows: Vec<MassChargeRow>,
    pub skipped: Vec<SkippedRecord>,
}

impl MassChargeBatch {
    /// Renders the batch as an inclusion list with `Compound`, `Formula`, `M`
    /// and `z range` columns. The formula column is left blank.
    pub fn to_table(&self) -> Result<Table, DatasetError> {
        Table::new(vec![
            Column::new(
                COMPOUND_COLUMN,
                self.rows.iter().map(|r| Cell::from(r.sequence.clone())).collect(),
            ),
            Column::new(FORMULA_COLUMN, vec![Cell::Null; self.rows.len()]),
            Column::new(MASS_COLUMN, self.rows.iter().map(|r| Cell::Float(r.mass)).collect()),
            Column::new(
                CHARGE_RANGE_COLUMN,
                self.rows.iter().map(|r| Cell::from(r.charge_range.clone())).collect(),
            ),
        ])
    }
}

/// Classifies a single record against the policy, or returns its [M+H]+.
pub fn evaluate(record: &SequenceRecord, policy: &InclusionPolicy) -> Result<f64, SkipReason> {
    let sequence = record.sequence.as_str();
    if sequence.is_empty() {
        return Err(SkipReason::MissingSequence);
    }
    let length = record.len();
    if length < policy.min_length {
        return Err(SkipReason::TooShort {
            length,
            min_length: policy.min_length,
        });
    }
    if let Some(residue) = sequence.chars().find(|c| policy.excluded_residues.contains(c)) {
        return Err(SkipReason::ExcludedResidue(residue));
    }
    peptide_mass(sequence, 1).map_err(|e| match e {
        MassError::UnknownResidue { residue, .. } => SkipReason::UnknownResidue(residue),
        _ => SkipReason::MissingSequence,
    })
}

/// Computes [M+H]+ for every eligible record.
///
/// Ineligible records are skipped and recorded in the batch audit; they never
/// fail the batch.
pub fn compute(records: &[SequenceRecord], policy: &InclusionPolicy) -> MassChargeBatch {
    compute_with(records, policy, || {})
}

/// Like [`compute`], calling `on_record` once per input record.
pub fn compute_with(
    records: &[SequenceRecord],
    policy: &InclusionPolicy,
    mut on_record: impl FnMut(),
) -> MassChargeBatch {
    let label = policy.charge_range_label();
    let mut batch = MassChargeBatch::default();

    for (index, record) in records.iter().enumerate() {
        on_record();
        match evaluate(record, policy) {
            Ok(mass) => batch.rows.push(MassChargeRow {
                sequence: record.sequence.clone(),
                mass,
                charge_range: label.clone(),
            }),
            Err(reason) => {
                warn!(
                    "Skipping record #{} ('{}') for m/z computation: {:?}",
                    index, record.id, reason
                );
                batch.skipped.push(SkippedRecord {
                    index,
                    id: record.id.clone(),
                    reason,
                });
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-3;

    fn record(sequence: &str) -> SequenceRecord {
        SequenceRecord::new("n", "id", "desc", sequence)
    }

    #[test]
    fn peptide_mass_of_peptide_matches_reference() {
        let mass = peptide_mass("PEPTIDE", 1).unwrap();
        assert!((mass - 800.3672).abs() < TOLERANCE, "got {}", mass);
    }

    #[test]
    fn peptide_mass_at_higher_charge_divides_by_z() {
        let neutral = peptide_mass("PEPTIDE", 1).unwrap() - PROTON_MASS;
        let doubly = peptide_mass("PEPTIDE", 2).unwrap();
        assert!((doubly - (neutral + 2.0 * PROTON_MASS) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn peptide_mass_reports_unknown_residue_position() {
        assert_eq!(
            peptide_mass("PEPXIDE", 1),
            Err(MassError::UnknownResidue {
                residue: 'X',
                position: 3
            })
        );
    }

    #[test]
    fn peptide_mass_rejects_zero_charge_and_empty_sequence() {
        assert_eq!(peptide_mass("PEPTIDE", 0), Err(MassError::ZeroCharge));
        assert_eq!(peptide_mass("", 1), Err(MassError::EmptySequence));
    }

    #[test]
    fn five_residues_are_excluded_and_six_are_included() {
        let batch = compute(&[record("PEPTI"), record("PEPTID")], &InclusionPolicy::default());
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].sequence, "PEPTID");
        assert_eq!(
            batch.skipped[0].reason,
            SkipReason::TooShort {
                length: 5,
                min_length: 6
            }
        );
    }

    #[test]
    fn sequences_with_x_are_excluded_regardless_of_length() {
        let batch = compute(
            &[record("PEPTIDEXPEPTIDEPEPTIDE"), record("XAAAAAAAAA")],
            &InclusionPolicy::default(),
        );
        assert!(batch.rows.is_empty());
        assert!(
            batch
                .skipped
                .iter()
                .all(|s| s.reason == SkipReason::ExcludedResidue('X'))
        );
    }

    #[test]
    fn missing_sequences_and_unknown_residues_are_skipped_not_fatal() {
        let batch = compute(
            &[record(""), record("PEPTBDE"), record("PEPTIDE")],
            &InclusionPolicy::default(),
        );
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.skipped.len(), 2);
        assert_eq!(batch.skipped[0].reason, SkipReason::MissingSequence);
        assert_eq!(batch.skipped[1].reason, SkipReason::UnknownResidue('B'));
        assert_eq!(batch.skipped[1].index, 1);
    }

    #[test]
    fn rows_carry_charge_range_annotation() {
        let batch = compute(&[record("PEPTIDE")], &InclusionPolicy::default());
        assert_eq!(batch.rows[0].charge_range, "2-5");

        let policy = InclusionPolicy {
            charge_range: (1, 3),
            ..InclusionPolicy::default()
        };
        assert_eq!(compute(&[record("PEPTIDE")], &policy).rows[0].charge_range, "1-3");
    }

    #[test]
    fn to_table_produces_inclusion_list_columns() {
        let batch = compute(&[record("PEPTIDE"), record("SAMPLER")], &InclusionPolicy::default());
        let table = batch.to_table().unwrap();
        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["Compound", "Formula", "M", "z range"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(0, 0), Some(&Cell::from("PEPTIDE")));
        assert!(table.cell(1, 1).unwrap().is_null());
        match table.cell(0, 2) {
            Some(Cell::Float(m)) => assert!((m - 800.3672).abs() < TOLERANCE),
            other => panic!("unexpected mass cell: {:?}", other),
        }
    }

    #[test]
    fn empty_batch_renders_empty_table_with_header() {
        let table = MassChargeBatch::default().to_table().unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_columns(), 4);
    }
}
