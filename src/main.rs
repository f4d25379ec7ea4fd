use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use sqlport::schema::key_lookup;
use sqlport::{plan_update, DialectKind, PlanOptions};

#[derive(Parser)]
#[command(name = "sqlport")]
#[command(author, version, about = "Schema and data migration via portable XML snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the tables in a snapshot document
    Inspect {
        /// Path to the snapshot document
        document: PathBuf,
    },

    /// Print the statements an update would execute against a current snapshot
    Plan {
        /// Path to the desired-state document
        document: PathBuf,

        /// Path to a snapshot of the current structure
        #[arg(short, long)]
        current: PathBuf,

        /// Target dialect (mysql, sqlite)
        #[arg(short, long, default_value = "mysql")]
        dialect: String,

        /// Table name prefix replacing the #__ wildcard
        #[arg(short, long, default_value = "")]
        prefix: String,

        /// Include row data as INSERT statements
        #[arg(long)]
        with_data: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { document } => inspect(&document),
        Commands::Plan {
            document,
            current,
            dialect,
            prefix,
            with_data,
        } => plan(&document, &current, &dialect, prefix, with_data),
    }
}

fn inspect(path: &Path) -> Result<()> {
    let xml = std::fs::read_to_string(path)?;
    let document = sqlport::document::parse_document(&xml)?;

    for table in &document.tables {
        println!(
            "{}: {} columns, {} keys, {} rows",
            table.name,
            table.columns.len(),
            key_lookup(&table.keys).len(),
            table.rows.len()
        );
    }

    Ok(())
}

fn plan(document: &Path, current: &Path, dialect: &str, prefix: String, with_data: bool) -> Result<()> {
    let dialect = dialect
        .parse::<DialectKind>()
        .map_err(anyhow::Error::msg)?;

    let options = PlanOptions {
        dialect,
        desired_xml: std::fs::read_to_string(document)?,
        current_xml: std::fs::read_to_string(current)?,
        prefix,
        with_data,
    };

    let statements = plan_update(&options)?;
    for sql in &statements {
        println!("{};", sql);
    }
    println!();
    println!("{} actions planned.", statements.len());

    Ok(())
}
