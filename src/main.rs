//! msgload CLI - Join categorized messages and load them into SQLite
//!
//! # Commands
//!
//! ```bash
//! msgload process messages.csv categories.csv response.db   # Run the pipeline
//! msgload parse input.csv                                   # Debug: parse one file to JSON
//! ```

use clap::{Parser, Subcommand};
use msgload::{
    clean::{drop_duplicates, drop_invalid},
    load, read_file, save, ProcessOptions,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "msgload")]
#[command(about = "Join categorized disaster messages and load them into SQLite", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: load, clean, save
    Process {
        /// Messages CSV file
        messages: PathBuf,

        /// Categories CSV file
        categories: PathBuf,

        /// Destination SQLite database
        database: PathBuf,

        /// Destination table name
        #[arg(long, default_value = msgload::DEFAULT_TABLE)]
        table: String,

        /// Field delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Parse a delimited file and output its records as JSON
    Parse {
        /// Input file
        input: PathBuf,

        /// Field delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            messages,
            categories,
            database,
            table,
            delimiter,
        } => cmd_process(&messages, &categories, &database, table, delimiter),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_process(
    messages: &Path,
    categories: &Path,
    database: &Path,
    table: String,
    delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ProcessOptions {
        table_name: table,
        delimiter,
    };

    println!(
        "Loading data...\n    MESSAGES: {}\n    CATEGORIES: {}",
        messages.display(),
        categories.display()
    );
    let loaded = load(messages, categories, &options)?;

    println!("Cleaning data...");
    let loaded_rows = loaded.len();
    let deduped = drop_duplicates(loaded);
    let cleaned = drop_invalid(deduped)?;
    info!(
        rows = cleaned.len(),
        removed = loaded_rows - cleaned.len(),
        "cleaned rows"
    );

    println!("Saving data...\n    DATABASE: {}", database.display());
    save(&cleaned, database, &options.table_name)?;

    println!("Cleaned data saved to database!");
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = read_file(input, delimiter)?;

    eprintln!("Parsed: {}", input.display());
    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        match parsed.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        },
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", parsed.table.columns().join(", "));
    eprintln!("   Rows: {}", parsed.table.len());

    let json = serde_json::to_string_pretty(&parsed.table.to_records())?;
    write_output(&json, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
