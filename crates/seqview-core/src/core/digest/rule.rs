use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side of the specificity residue on which the enzyme cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminus {
    /// Cut after the residue (trypsin, Lys-C, Glu-C).
    C,
    /// Cut before the residue (Asp-N, Lys-N).
    N,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RuleError {
    #[error("Unknown enzyme '{0}'. Expected one of: {known}", known = KNOWN_ENZYMES.join(", "))]
    UnknownEnzyme(String),

    #[error("Cleavage rule '{0}' must name at least one cleavage residue")]
    EmptySpecificity(String),

    #[error("Restriction for rule '{name}' must be a single residue, got '{value}'")]
    InvalidRestriction { name: String, value: String },
}

const KNOWN_ENZYMES: [&str; 8] = [
    "trypsin",
    "trypsin/p",
    "lys-c",
    "lys-n",
    "arg-c",
    "asp-n",
    "glu-c",
    "chymotrypsin",
];

/// A proteolytic cleavage specificity.
///
/// For a C-terminal rule a site lies after any residue in `cleave_at` unless the
/// next residue is `restrict`. For an N-terminal rule a site lies before any
/// residue in `cleave_at` unless the previous residue is `restrict`. Sites are
/// never placed at either end of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleavageRule {
    pub name: String,
    cleave_at: Vec<char>,
    restrict: Option<char>,
    terminus: Terminus,
}

impl CleavageRule {
    pub fn new(
        name: impl Into<String>,
        cleave_at: &str,
        restrict: Option<char>,
        terminus: Terminus,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let cleave_at: Vec<char> = cleave_at.chars().filter(|c| !c.is_whitespace()).collect();
        if cleave_at.is_empty() {
            return Err(RuleError::EmptySpecificity(name));
        }
        Ok(Self {
            name,
            cleave_at,
            restrict,
            terminus,
        })
    }

    fn builtin(name: &str, cleave_at: &[char], restrict: Option<char>, terminus: Terminus) -> Self {
        Self {
            name: name.to_string(),
            cleave_at: cleave_at.to_vec(),
            restrict,
            terminus,
        }
    }

    /// Cleaves C-terminal to K or R unless followed by P.
    pub fn trypsin() -> Self {
        Self::builtin("trypsin", &['K', 'R'], Some('P'), Terminus::C)
    }

    pub fn cleave_at(&self) -> &[char] {
        &self.cleave_at
    }

    pub fn restrict(&self) -> Option<char> {
        self.restrict
    }

    pub fn terminus(&self) -> Terminus {
        self.terminus
    }

    /// Whether the rule cuts the bond between two adjacent residues.
    pub fn cuts_between(&self, previous: char, next: char) -> bool {
        match self.terminus {
            Terminus::C => self.cleave_at.contains(&previous) && self.restrict != Some(next),
            Terminus::N => self.cleave_at.contains(&next) && self.restrict != Some(previous),
        }
    }
}

impl Default for CleavageRule {
    fn default() -> Self {
        Self::trypsin()
    }
}

impl FromStr for CleavageRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = match s.trim().to_lowercase().as_str() {
            "trypsin" => Self::trypsin(),
            "trypsin/p" => Self::builtin("trypsin/p", &['K', 'R'], None, Terminus::C),
            "lys-c" | "lysc" => Self::builtin("lys-c", &['K'], Some('P'), Terminus::C),
            "lys-n" | "lysn" => Self::builtin("lys-n", &['K'], None, Terminus::N),
            "arg-c" | "argc" => Self::builtin("arg-c", &['R'], Some('P'), Terminus::C),
            "asp-n" | "aspn" => Self::builtin("asp-n", &['D'], None, Terminus::N),
            "glu-c" | "gluc" => Self::builtin("glu-c", &['E'], Some('P'), Terminus::C),
            "chymotrypsin" => Self::builtin("chymotrypsin", &['F', 'W', 'Y'], Some('P'), Terminus::C),
            _ => return Err(RuleError::UnknownEnzyme(s.to_string())),
        };
        Ok(rule)
    }
}

impl fmt::Display for CleavageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let residues: String = self.cleave_at.iter().collect();
        match (self.terminus, self.restrict) {
            (Terminus::C, Some(p)) => write!(f, "{}: after [{}], not before {}", self.name, residues, p),
            (Terminus::C, None) => write!(f, "{}: after [{}]", self.name, residues),
            (Terminus::N, Some(p)) => write!(f, "{}: before [{}], not after {}", self.name, residues, p),
            (Terminus::N, None) => write!(f, "{}: before [{}]", self.name, residues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trypsin_cuts_after_lysine_and_arginine() {
        let rule = CleavageRule::trypsin();
        assert!(rule.cuts_between('K', 'A'));
        assert!(rule.cuts_between('R', 'G'));
        assert!(!rule.cuts_between('A', 'K'));
    }

    #[test]
    fn trypsin_does_not_cut_before_proline() {
        let rule = CleavageRule::trypsin();
        assert!(!rule.cuts_between('K', 'P'));
        assert!(!rule.cuts_between('R', 'P'));
    }

    #[test]
    fn n_terminal_rule_cuts_before_residue() {
        let rule: CleavageRule = "asp-n".parse().unwrap();
        assert_eq!(rule.terminus(), Terminus::N);
        assert!(rule.cuts_between('A', 'D'));
        assert!(!rule.cuts_between('D', 'A'));
    }

    #[test]
    fn from_str_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("Trypsin".parse::<CleavageRule>().unwrap(), CleavageRule::trypsin());
        assert_eq!("LysC".parse::<CleavageRule>().unwrap().name, "lys-c");
        assert_eq!("TRYPSIN/P".parse::<CleavageRule>().unwrap().restrict(), None);
    }

    #[test]
    fn from_str_rejects_unknown_enzyme() {
        let result = "pepsin".parse::<CleavageRule>();
        assert_eq!(result, Err(RuleError::UnknownEnzyme("pepsin".to_string())));
    }

    #[test]
    fn new_rejects_empty_specificity() {
        let result = CleavageRule::new("none", "  ", None, Terminus::C);
        assert_eq!(result, Err(RuleError::EmptySpecificity("none".to_string())));
    }

    #[test]
    fn display_describes_the_rule() {
        assert_eq!(
            CleavageRule::trypsin().to_string(),
            "trypsin: after [KR], not before P"
        );
    }
}
