//! Proteolytic digestion.
//!
//! A [`rule::CleavageRule`] decides where an enzyme cuts; [`cleave`] splits one
//! sequence with zero missed cleavages and [`digest`] turns whole records into
//! ordered fragment records.

pub mod registry;
pub mod rule;

use crate::core::models::record::SequenceRecord;
use rule::CleavageRule;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Byte offsets at which `rule` cuts `sequence`, in ascending order.
pub fn cleavage_sites(sequence: &str, rule: &CleavageRule) -> Vec<usize> {
    let residues: Vec<(usize, char)> = sequence.char_indices().collect();
    residues
        .windows(2)
        .filter(|pair| rule.cuts_between(pair[0].1, pair[1].1))
        .map(|pair| pair[1].0)
        .collect()
}

/// Splits a sequence at every cleavage site.
///
/// Fragments keep their original order and concatenate back to `sequence`. An
/// empty sequence yields no fragments.
pub fn cleave(sequence: &str, rule: &CleavageRule) -> Vec<String> {
    if sequence.is_empty() {
        return Vec::new();
    }

    let sites = cleavage_sites(sequence, rule);
    let mut fragments = Vec::with_capacity(sites.len() + 1);
    let mut start = 0;
    for site in sites {
        fragments.push(sequence[start..site].to_string());
        start = site;
    }
    fragments.push(sequence[start..].to_string());
    fragments
}

/// Digests a single record into fragment records numbered from 1.
pub fn digest_record(record: &SequenceRecord, rule: &CleavageRule) -> Vec<SequenceRecord> {
    cleave(&record.sequence, rule)
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| {
            record.derive(format!("{} Fragment {}", record.description, i + 1), fragment)
        })
        .collect()
}

/// Digests every record, preserving source order then fragment order.
pub fn digest(records: &[SequenceRecord], rule: &CleavageRule) -> Vec<SequenceRecord> {
    digest_with(records, rule, || {})
}

/// Like [`digest`], calling `on_record` once per source record as it finishes.
pub fn digest_with<F>(
    records: &[SequenceRecord],
    rule: &CleavageRule,
    on_record: F,
) -> Vec<SequenceRecord>
where
    F: Fn() + Sync,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = records.iter();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter();

    let per_record: Vec<Vec<SequenceRecord>> = iterator
        .map(|record| {
            let fragments = digest_record(record, rule);
            on_record();
            fragments
        })
        .collect();

    per_record.into_iter().flatten().collect()
}
