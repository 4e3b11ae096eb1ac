use i18n_typegen::cli::commands::{CliArgs, Commands};
use i18n_typegen::cli::handlers::{handle_generate, handle_infer, handle_watch};
use i18n_typegen::util::logging::{config_from_env, init_logging, parse_level};
use i18n_typegen::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("i18n-typegen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Infer(infer_args) => handle_infer(infer_args).await,
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet).await,
        Commands::Watch(watch_args) => handle_watch(watch_args).await,
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = config_from_env();
    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }
    init_logging(config);
}
