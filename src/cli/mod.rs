use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::application::{LedgerConfig, LedgerStore};
use crate::domain::{is_numeric_amount, DeleteOutcome, IdPolicy, RecordId};
use crate::storage::DEFAULT_LEDGER_FILE;

/// Expenses - Personal Expense Ledger
#[derive(Parser)]
#[command(name = "expenses")]
#[command(about = "Track personal expenses in a plain comma-separated file")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, global = true, env = "EXPENSES_FILE", default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,

    /// How ids are assigned to new expenses: row-count or next-after-max
    #[arg(long, global = true, default_value = "row-count")]
    pub id_policy: IdPolicy,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new expense
    Add {
        /// Description of the expense
        #[arg(short, long)]
        description: String,

        /// Amount of the expense (e.g., "20" or "12.50")
        #[arg(short, long, value_parser = parse_amount_arg)]
        amount: String,
    },

    /// Delete an expense
    Delete {
        /// Id of the expense to delete
        #[arg(long)]
        id: RecordId,
    },

    /// Show all expenses
    List,

    /// Show total expenses, optionally for one month
    Summary {
        /// Month number to filter by (e.g., 3 for March)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// Verify ledger file integrity
    Check,
}

fn parse_amount_arg(input: &str) -> Result<String, String> {
    if is_numeric_amount(input) {
        Ok(input.to_string())
    } else {
        Err(format!("'{}' is not a number", input))
    }
}

impl Cli {
    /// Install the stderr log subscriber. Warnings only unless `--verbose`.
    pub fn init_logging(&self) {
        let level = if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn config(&self) -> LedgerConfig {
        LedgerConfig::new(&self.file).with_id_policy(self.id_policy)
    }

    pub fn run(self) -> Result<()> {
        let store = LedgerStore::new(self.config());

        match self.command {
            Commands::Add {
                description,
                amount,
            } => {
                let id = store.add(&description, &amount)?;
                println!("# Expense added successfully (ID: {})", id);
            }

            Commands::Delete { id } => match store.delete(id)? {
                DeleteOutcome::Removed(_) => println!("# Expense deleted successfully"),
                DeleteOutcome::NoMatch => println!("# No expense found with ID: {}", id),
            },

            Commands::List => run_list_command(&store)?,

            Commands::Summary { month } => {
                let summary = store.summary(month)?;
                println!(
                    "# Total expenses for month {}: ${}",
                    summary.label(),
                    summary.total
                );
            }

            Commands::Check => run_check_command(&store)?,
        }

        Ok(())
    }
}

fn run_list_command(store: &LedgerStore) -> Result<()> {
    let records = store.list()?;
    if records.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    for record in records {
        println!(
            "# {:<3} {:<10} {:<15} ${}",
            record.id, record.date, record.description, record.amount
        );
    }
    Ok(())
}

fn run_check_command(store: &LedgerStore) -> Result<()> {
    println!("Checking ledger {}...\n", store.path().display());

    let report = store.check()?;

    println!("Records: {}", report.record_count);
    println!("Total:   ${}", report.total);
    println!();

    if report.is_healthy() {
        println!("Ledger is consistent.");
    } else {
        println!("Issues found:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
        anyhow::bail!("Ledger integrity check failed");
    }

    Ok(())
}
