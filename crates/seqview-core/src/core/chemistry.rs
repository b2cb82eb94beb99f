//! Monoisotopic masses used for peptide precursor calculations.
//!
//! Residue values are the standard monoisotopic residue masses (amino acid
//! minus water) used by proteomics search tools; water and proton follow NIST.

use phf::{Map, phf_map};

/// Monoisotopic mass of H2O (2 × 1.00782503207 + 15.99491461956).
pub const WATER_MONOISOTOPIC: f64 = 18.010_564_683_7;

/// Mass of a proton, the charge carrier of an [M+H]+ ion.
pub const PROTON_MASS: f64 = 1.007_276_466_77;

static RESIDUE_MONOISOTOPIC_MASSES: Map<char, f64> = phf_map! {
    'G' => 57.02146,
    'A' => 71.03711,
    'S' => 87.03203,
    'P' => 97.05276,
    'V' => 99.06841,
    'T' => 101.04768,
    'C' => 103.00919,
    'L' => 113.08406,
    'I' => 113.08406,
    'J' => 113.08406, // Leu/Ile indistinguishable
    'N' => 114.04293,
    'D' => 115.02694,
    'Q' => 128.05858,
    'K' => 128.09496,
    'E' => 129.04259,
    'M' => 131.04049,
    'H' => 137.05891,
    'F' => 147.06841,
    'U' => 150.95364, // selenocysteine
    'R' => 156.10111,
    'Y' => 163.06333,
    'W' => 186.07931,
    'O' => 237.14773, // pyrrolysine
};

/// Returns the monoisotopic residue mass for a one-letter amino acid code.
///
/// Codes are case-sensitive; ambiguity codes such as `X`, `B` and `Z` have no mass.
pub fn residue_mass(code: char) -> Option<f64> {
    RESIDUE_MONOISOTOPIC_MASSES.get(&code).copied()
}
