pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Commands, GenerateArgs, InferArgs, SourceArgs, WatchArgs};
pub use handlers::{exit_code_for, handle_generate, handle_infer, handle_watch, CliError};
