use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Translate between class-definition models and columnar warehouse schemas.
///
/// Parses `.pure` model files, builds columnar table schemas from them,
/// applies those schemas to a warehouse, and regenerates model text from
/// what the warehouse holds.
#[derive(Parser)]
#[command(
    name = "schema-bridge",
    version,
    about = "Translate between class-definition models and columnar warehouse schemas",
    after_help = "Use 'schema-bridge <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// Configuration file path [env: SCHEMA_BRIDGE_CONFIG]
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "SCHEMA_BRIDGE_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Warehouse directory holding one <table>.json per table [env: SCHEMA_BRIDGE_WAREHOUSE_DIR]
    #[arg(
        long = "warehouse-dir",
        global = true,
        env = "SCHEMA_BRIDGE_WAREHOUSE_DIR"
    )]
    pub warehouse_dir: Option<PathBuf>,

    /// Type mapping profile: minimal (String, Any) or standard
    #[arg(long = "types", global = true, value_parser = ["minimal", "standard"])]
    pub types: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse and validate .pure model files
    Parse(ParseArgs),

    /// Build a columnar schema document from .pure model files
    Build(BuildArgs),

    /// Emit model text from a columnar schema document
    Emit(EmitArgs),

    /// Apply .pure model files to the warehouse
    Apply(ApplyArgs),

    /// Extract warehouse tables back into model text
    Extract(ExtractArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

// ---------------------------------------------------------------------------
// Individual command argument structs
// ---------------------------------------------------------------------------

/// Arguments for `schema-bridge parse`.
#[derive(Args)]
pub struct ParseArgs {
    /// Model files or directories to parse (default: [cli] default_schema_dir)
    pub paths: Vec<PathBuf>,

    /// Print the parsed classes as canonical model text
    #[arg(long = "print")]
    pub print: bool,
}

/// Arguments for `schema-bridge build`.
#[derive(Args)]
pub struct BuildArgs {
    /// Model files or directories to build (default: [cli] default_schema_dir)
    pub paths: Vec<PathBuf>,

    /// Output file for the schema document (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for `schema-bridge emit`.
#[derive(Args)]
pub struct EmitArgs {
    /// Columnar schema document (JSON array of tables)
    pub file: PathBuf,

    /// Output file for the model text (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for `schema-bridge apply`.
#[derive(Args)]
pub struct ApplyArgs {
    /// Model files or directories to apply (default: [cli] default_schema_dir)
    pub paths: Vec<PathBuf>,

    /// Dry-run: show what would be applied without writing
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
}

/// Arguments for `schema-bridge extract`.
#[derive(Args)]
pub struct ExtractArgs {
    /// Tables to extract, in output order
    #[arg(required = true)]
    pub tables: Vec<String>,

    /// Output file for the model text (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for `schema-bridge completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
