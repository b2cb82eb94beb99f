use crate::core::digest::rule::CleavageRule;
use crate::core::mass::InclusionPolicy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    Invalid {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestionConfig {
    pub rule: CleavageRule,
}

#[derive(Default)]
pub struct DigestionConfigBuilder {
    rule: Option<CleavageRule>,
}

impl DigestionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: CleavageRule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn build(self) -> Result<DigestionConfig, ConfigError> {
        Ok(DigestionConfig {
            rule: self.rule.ok_or(ConfigError::MissingParameter("rule"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassChargeConfig {
    pub policy: InclusionPolicy,
}

#[derive(Default)]
pub struct MassChargeConfigBuilder {
    min_length: Option<usize>,
    excluded_residues: Option<Vec<char>>,
    charge_range: Option<(u8, u8)>,
}

impl MassChargeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
    pub fn excluded_residues(mut self, residues: Vec<char>) -> Self {
        self.excluded_residues = Some(residues);
        self
    }
    pub fn charge_range(mut self, low: u8, high: u8) -> Self {
        self.charge_range = Some((low, high));
        self
    }

    pub fn build(self) -> Result<MassChargeConfig, ConfigError> {
        let min_length = self
            .min_length
            .ok_or(ConfigError::MissingParameter("min_length"))?;
        let excluded_residues = self
            .excluded_residues
            .ok_or(ConfigError::MissingParameter("excluded_residues"))?;
        let charge_range = self
            .charge_range
            .ok_or(ConfigError::MissingParameter("charge_range"))?;

        if min_length == 0 {
            return Err(ConfigError::Invalid {
                parameter: "min_length",
                reason: "must be at least 1".to_string(),
            });
        }
        let (low, high) = charge_range;
        if low == 0 || low > high {
            return Err(ConfigError::Invalid {
                parameter: "charge_range",
                reason: format!("expected 1 <= low <= high, got {}-{}", low, high),
            });
        }

        Ok(MassChargeConfig {
            policy: InclusionPolicy {
                min_length,
                excluded_residues: excluded_residues
                    .into_iter()
                    .map(|c| c.to_ascii_uppercase())
                    .collect(),
                charge_range,
            },
        })
    }
}
