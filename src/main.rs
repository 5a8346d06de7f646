mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "whatson")]
#[command(about = "Decode, expand and filter whatson event feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every entry in a content export and report decode failures
    Validate {
        /// Path to a content-API JSON export
        file: PathBuf,

        /// Locale to decode under (defaults to the configured locale)
        #[arg(short, long)]
        locale: Option<String>,
    },
    /// Print the filtered event list, expanded and grouped by day
    List {
        /// Path to a content-API JSON export
        file: PathBuf,

        /// Locale to decode under (defaults to the configured locale)
        #[arg(short, long)]
        locale: Option<String>,

        /// Start of the date filter (YYYY-MM-DD); defaults to --to
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End of the date filter (YYYY-MM-DD); defaults to --from
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Time-of-day bucket (morning/afternoon/evening/night); repeatable
        #[arg(long = "time")]
        time: Vec<String>,

        /// Category name, e.g. "Music"; repeatable
        #[arg(long = "category")]
        category: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;

    match cli.command {
        Commands::Validate { file, locale } => {
            let locale = locale.unwrap_or(config.default_locale);
            commands::validate::run(&file, &locale)
        }
        Commands::List {
            file,
            locale,
            from,
            to,
            time,
            category,
        } => {
            let locale = locale.unwrap_or(config.default_locale);
            commands::list::run(&file, &locale, from, to, &time, &category)
        }
    }
}
