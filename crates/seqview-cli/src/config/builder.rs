use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{ConfigArgs, DigestArgs, MzArgs, ReplaceArgs};
use crate::error::{CliError, Result};
use seqview::core::digest::registry::EnzymeRegistry;
use seqview::engine::config::{
    DigestionConfig, DigestionConfigBuilder, MassChargeConfig, MassChargeConfigBuilder,
};
use seqview::engine::error::EngineError;
use tracing::debug;

pub fn load_file_config(args: &ConfigArgs) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &args.set_values)
}

pub fn build_digestion_config(args: &DigestArgs) -> Result<DigestionConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let digestion_file = file_config.digestion.take().unwrap_or_default();

    let enzyme = args
        .enzyme
        .clone()
        .or(digestion_file.enzyme)
        .unwrap_or(defaults.enzyme);
    let enzyme_file = args.enzyme_file.clone().or(digestion_file.enzyme_file);

    let registry = match &enzyme_file {
        Some(path) => EnzymeRegistry::load(path)?,
        None => EnzymeRegistry::new(),
    };
    debug!(
        custom_rules = registry.len(),
        "Resolving enzyme '{}'", enzyme
    );
    let rule = registry
        .resolve(&enzyme)
        .map_err(|e| CliError::Config(e.to_string()))?;

    DigestionConfigBuilder::new()
        .rule(rule)
        .build()
        .map_err(|e| EngineError::from(e).into())
}

pub fn build_mass_charge_config(args: &MzArgs) -> Result<MassChargeConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let mass_file = file_config.mass_charge.take().unwrap_or_default();

    let min_length = args
        .min_length
        .or(mass_file.min_length)
        .unwrap_or(defaults.min_length);
    let excluded_residues = mass_file
        .excluded_residues
        .unwrap_or(defaults.excluded_residues);
    let (low, high) = mass_file.charge_range.unwrap_or(defaults.charge_range);

    MassChargeConfigBuilder::new()
        .min_length(min_length)
        .excluded_residues(parse_residues(&excluded_residues))
        .charge_range(low, high)
        .build()
        .map_err(|e| EngineError::from(e).into())
}

pub fn resolve_use_regex(args: &ReplaceArgs) -> Result<bool> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let search_file = file_config.search.take().unwrap_or_default();

    Ok(
        match (args.pattern_mode.regex, args.pattern_mode.literal) {
            (true, false) => true,
            (false, true) => false,
            _ => search_file.use_regex.unwrap_or(defaults.use_regex),
        },
    )
}

fn parse_residues(value: &str) -> Vec<char> {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

fn parse_charge_range(key: &str, value: &str) -> Result<(u8, u8)> {
    let invalid = || {
        CliError::Config(format!(
            "Invalid charge range for {}: '{}'. Expected LOW-HIGH.",
            key, value
        ))
    };
    let (low, high) = value.split_once('-').ok_or_else(invalid)?;
    let low = low.trim().parse().map_err(|_| invalid())?;
    let high = high.trim().parse().map_err(|_| invalid())?;
    Ok((low, high))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0];
        let value_str = parts[1];

        match key {
            "digestion.enzyme" => {
                config
                    .digestion
                    .get_or_insert_with(Default::default)
                    .enzyme = Some(value_str.to_string());
            }
            "digestion.enzyme-file" => {
                config
                    .digestion
                    .get_or_insert_with(Default::default)
                    .enzyme_file = Some(value_str.into());
            }
            "mass-charge.min-length" => {
                config
                    .mass_charge
                    .get_or_insert_with(Default::default)
                    .min_length = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "mass-charge.excluded-residues" => {
                config
                    .mass_charge
                    .get_or_insert_with(Default::default)
                    .excluded_residues = Some(value_str.to_string());
            }
            "mass-charge.charge-range" => {
                config
                    .mass_charge
                    .get_or_insert_with(Default::default)
                    .charge_range = Some(parse_charge_range(key, value_str)?);
            }
            "search.use-regex" => {
                config.search.get_or_insert_with(Default::default).use_regex =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
