use seqview::core::digest::registry::EnzymeLoadError;
use seqview::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Everything a `seqview` subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Seqview(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config file '{path}': {source}", path = path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to load enzyme rules: {0}")]
    EnzymeFile(#[from] EnzymeLoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Background task '{0}' ended without reporting a result")]
    TaskLost(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqview::core::models::ids::DatasetId;
    use seqview::engine::error::Lookup;
    use seqview::engine::runner::RunnerError;

    #[test]
    fn engine_errors_pass_through_unchanged() {
        let engine = EngineError::NotFound(Lookup::Position(3));
        let expected = engine.to_string();
        let cli: CliError = engine.into();
        assert_eq!(cli.to_string(), expected);
    }

    #[test]
    fn busy_runner_is_still_recognisable() {
        let busy = EngineError::from(RunnerError::Busy {
            label: "proteins.fasta Tryptic Peptides".to_string(),
        });
        assert!(matches!(CliError::from(busy), CliError::Seqview(ref e) if e.is_busy()));

        let missing = EngineError::NotFound(Lookup::Uid(DatasetId::default()));
        assert!(matches!(CliError::from(missing), CliError::Seqview(ref e) if !e.is_busy()));
    }

    #[test]
    fn config_file_error_names_the_path() {
        let source = toml::from_str::<toml::Table>("a = ").unwrap_err();
        let err = CliError::ConfigFile {
            path: PathBuf::from("seqview.toml"),
            source,
        };
        assert!(err.to_string().contains("seqview.toml"));
    }
}
