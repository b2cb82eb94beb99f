use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Prashanth Ciryam",
    version,
    about = "SeqView CLI - Search, filter, digest and compute precursor m/z values for CSV and FASTA sequence data.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every cell matching a regular expression.
    Find(FindArgs),
    /// Keep only the rows with at least one matching cell.
    Filter(FilterArgs),
    /// Replace text in every cell, or filter when the replacement is empty.
    Replace(ReplaceArgs),
    /// Digest protein sequences into peptides with a proteolytic enzyme.
    Digest(DigestArgs),
    /// Compute [M+H]+ values and write an inclusion list.
    Mz(MzArgs),
}

/// Options shared by every subcommand that reads the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S mass-charge.min-length=7
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `find` subcommand.
#[derive(Args, Debug)]
pub struct FindArgs {
    /// Input file (.csv, or .fasta/.fa/.faa).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Regular expression matched against each cell's text.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict the search to one column.
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,
}

/// Arguments for the `filter` subcommand.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input file (.csv, or .fasta/.fa/.faa).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Regular expression a row must match in at least one cell.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output file. FASTA is written for .fasta/.fa/.faa, CSV otherwise.
    /// Defaults to the derived dataset name in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `replace` subcommand.
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Input file (.csv, or .fasta/.fa/.faa).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Text (or regular expression with --regex) to look for.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Replacement text. An empty string filters instead.
    #[arg(value_name = "REPLACEMENT")]
    pub replacement: String,

    /// Override `search.use-regex` from the config file.
    #[command(flatten)]
    pub pattern_mode: PatternMode,

    /// Output file. FASTA is written for .fasta/.fa/.faa, CSV otherwise.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Mutually exclusive flags choosing how the replace query is interpreted.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct PatternMode {
    /// Treat the query as a regular expression and expand `$1` in the replacement.
    #[arg(long)]
    pub regex: bool,
    /// Treat the query and replacement as literal text.
    #[arg(long)]
    pub literal: bool,
}

/// Arguments for the `digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Input file with sequences (.fasta/.fa/.faa, or a CSV with
    /// Name, ID, Description and Sequence columns).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file. FASTA is written for .fasta/.fa/.faa, CSV otherwise.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Enzyme name, e.g. 'trypsin', 'lys-c' or a rule from the enzyme file.
    #[arg(short, long, value_name = "NAME")]
    pub enzyme: Option<String>,

    /// TOML file with custom cleavage rules.
    #[arg(long, value_name = "PATH")]
    pub enzyme_file: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `mz` subcommand.
#[derive(Args, Debug)]
pub struct MzArgs {
    /// Input file with peptide sequences (.fasta/.fa/.faa, or a CSV with
    /// Name, ID, Description and Sequence columns).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file for the inclusion list.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the minimum peptide length.
    #[arg(long, value_name = "INT")]
    pub min_length: Option<usize>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
