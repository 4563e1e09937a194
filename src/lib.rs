pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod report;
pub mod services;
pub mod session;
pub mod stats;
pub mod store;

use std::path::Path;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::MatchDraft;
use crate::services::journal::JournalService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_log(draft: MatchDraft) -> Result<()> {
    run_journal(|journal| async move {
        let record = journal.log_match(draft).await?;
        println!("{} match #{}", "Logged".green().bold(), record.id);
        print!("{}", report::render_matches(std::slice::from_ref(&record)));
        Ok(journal)
    })
}

pub fn handle_stats(json: bool) -> Result<()> {
    run_journal(|journal| async move {
        let snapshot = journal.snapshot();
        let recent_limit = journal.config().session.recent_limit;
        if json {
            let response = api::models::StatsResponse::from_snapshot(&snapshot, recent_limit);
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            print!("{}", report::render_snapshot(&snapshot, recent_limit));
        }
        Ok(journal)
    })
}

pub fn handle_recent(limit: Option<usize>) -> Result<()> {
    run_journal(|journal| async move {
        print!("{}", report::render_matches(&journal.recent_matches(limit)));
        Ok(journal)
    })
}

pub fn handle_delete(id: &str) -> Result<()> {
    run_journal(|journal| async move {
        let record = journal.delete_match(id).await?;
        println!(
            "{} match #{} from {}",
            "Deleted".red().bold(),
            record.id,
            record.date.format("%Y-%m-%d")
        );
        Ok(journal)
    })
}

pub fn handle_watch() -> Result<()> {
    run_journal(|journal| async move {
        journal.watch().await?;
        Ok(journal)
    })
}

pub fn handle_import(file: &Path) -> Result<()> {
    run_journal(|journal| async move {
        let report = journal.import(file).await?;
        println!("{} {} matches", "Migrated".green().bold(), report.migrated);
        for error in &report.errors {
            println!("  {}", error.yellow());
        }
        Ok(journal)
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn run_journal<F, Fut>(job: F) -> Result<()>
where
    F: FnOnce(JournalService) -> Fut,
    Fut: std::future::Future<Output = Result<JournalService>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let journal = JournalService::open(AppConfig::from_env()).await?;
        let journal = job(journal).await?;
        journal.close().await;
        Ok(())
    })
}
