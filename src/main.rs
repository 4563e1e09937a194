use anyhow::Result;

use padel_journal::cli::Command;
use padel_journal::{
    handle_completions, handle_delete, handle_import, handle_log, handle_recent, handle_serve,
    handle_stats, handle_watch, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Log(args) => handle_log(args.into()),
        Command::Stats { json } => handle_stats(json),
        Command::Recent { limit } => handle_recent(limit),
        Command::Delete { id } => handle_delete(&id),
        Command::Watch => handle_watch(),
        Command::Import { file } => handle_import(&file),
        Command::Serve { port } => handle_serve(port),
        Command::Completions { shell } => handle_completions(shell),
    }
}
