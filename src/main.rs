//! insight CLI - query tabular datasets

use clap::{Parser, Subcommand};
use insight::config::Manifest;
use insight::{InsightFacade, Row};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Query tabular datasets with JSON filter queries", long_about = None)]
struct Cli {
    /// Manifest listing the datasets to load
    #[arg(short, long, default_value = "insight.yaml")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one JSON query
    Query {
        /// The query, e.g. '{"WHERE": {}, "OPTIONS": {"COLUMNS": ["courses_dept"]}}'
        query: String,
    },

    /// List loaded datasets
    List,

    /// Start interactive REPL mode
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let facade = InsightFacade::new();
    Manifest::load(&cli.manifest)?.apply(&facade).await?;

    match cli.command {
        Commands::Query { query } => execute_query(&facade, &query).await,
        Commands::List => list_datasets(&facade).await,
        Commands::Repl => run_repl(&facade).await,
    }
}

async fn execute_query(facade: &InsightFacade, query: &str) -> anyhow::Result<()> {
    match facade.perform_query_str(query).await {
        Ok(rows) => print_rows(&rows),
        Err(e) => {
            if let Some(hint) = e.suggestion() {
                eprintln!("hint: {}", hint);
            }
            Err(e.into())
        }
    }
}

async fn list_datasets(facade: &InsightFacade) -> anyhow::Result<()> {
    let datasets = facade.list_datasets().await;

    if datasets.is_empty() {
        println!("No datasets loaded.");
        return Ok(());
    }

    println!("Datasets:");
    for info in datasets {
        println!("  {} ({}, {} rows)", info.id, info.kind, info.num_rows);
    }

    Ok(())
}

async fn run_repl(facade: &InsightFacade) -> anyhow::Result<()> {
    use std::io::{self, BufRead, Write};

    println!("insight Interactive Shell");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("iql> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.to_lowercase().as_str() {
            "exit" | "quit" | "\\q" => break,
            "list" | "\\l" => {
                list_datasets(facade).await?;
                continue;
            }
            "help" | "\\h" => {
                println!("Enter one JSON query per line:");
                println!("  {{\"WHERE\": {{\"GT\": {{\"courses_avg\": 95}}}},");
                println!("   \"OPTIONS\": {{\"COLUMNS\": [\"courses_dept\", \"courses_avg\"], \"ORDER\": \"courses_avg\"}}}}");
                println!();
                println!("Special:");
                println!("  list, \\l  - List loaded datasets");
                println!("  help, \\h  - Show this help");
                println!("  exit, \\q  - Exit the shell");
                continue;
            }
            _ => {}
        }

        match facade.perform_query_str(line).await {
            Ok(rows) => {
                print_rows(&rows)?;
                println!("({} row(s))", rows.len());
            }
            Err(e) => {
                println!("Error: {}", e);
                if let Some(hint) = e.suggestion() {
                    println!("Hint: {}", hint);
                }
            }
        }
        println!();
    }

    println!("Goodbye!");
    Ok(())
}

fn print_rows(rows: &[Row]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
