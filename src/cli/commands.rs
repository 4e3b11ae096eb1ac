use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generates TypeScript declarations for i18n message catalogs
#[derive(Parser, Debug)]
#[command(
    name = "i18n-typegen",
    about = "Generate TypeScript declarations for i18n message catalogs",
    version,
    long_about = "i18n-typegen infers the structure of merged i18n messages and number/datetime \
                  format tables and renders a declaration file augmenting vue-i18n, keeping it \
                  up to date while locale files change."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Print the inferred interface body for a message file",
        long_about = "Reads a JSON message tree and prints the body of the generated \
                      message interface.\n\n\
                      Examples:\n  \
                      i18n-typegen infer locales/en.json"
    )]
    Infer(InferArgs),

    #[command(
        about = "Fetch merged options once and write the declaration file",
        long_about = "Fetches the merged options from the dev server (or reads them from a \
                      file) and writes the declaration file once.\n\n\
                      Examples:\n  \
                      i18n-typegen generate\n  \
                      i18n-typegen generate --from-file merged.json --out-dir .build"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Keep the declaration file up to date during development",
        long_about = "Runs a development session: fetches merged options once the dev server \
                      is reachable, then regenerates whenever a locale or i18n config file \
                      changes.\n\n\
                      Examples:\n  \
                      i18n-typegen watch --root . --locales locales --config i18n.config.ts"
    )]
    Watch(WatchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InferArgs {
    #[arg(value_name = "FILE", help = "JSON file holding a message tree")]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(
        long,
        value_name = "URL",
        help = "Dev server root URL (overrides I18N_TYPEGEN_DEV_SERVER_URL)"
    )]
    pub dev_server_url: Option<String>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Build directory receiving the declaration (overrides I18N_TYPEGEN_OUT_DIR)"
    )]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Read merged options from a JSON file instead of the dev server"
    )]
    pub from_file: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[arg(long, value_name = "DIR", default_value = ".", help = "Project root")]
    pub root: PathBuf,

    #[arg(
        long = "locales",
        value_name = "DIR",
        help = "Directory of locale files (repeatable)"
    )]
    pub locale_dirs: Vec<PathBuf>,

    #[arg(long = "config", value_name = "FILE", help = "i18n config file (repeatable)")]
    pub config_files: Vec<PathBuf>,

    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 2,
        help = "Seconds between reload signals while waiting for the dev server"
    )]
    pub reload_interval: u64,

    #[command(flatten)]
    pub source: SourceArgs,
}
