use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{
    handle_add, handle_export_command, handle_filter, handle_history_command,
    handle_import_command, handle_list, handle_summary, ExportFormat, FilterArgs, Menu,
};
use expense_tracker::config::{Settings, TrackerPaths};
use expense_tracker::display::separator;
use expense_tracker::models::NewExpense;
use expense_tracker::services::Ledger;
use expense_tracker::storage::JsonLedgerStore;

/// Environment variable holding the log filter
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track personal expenses in a JSON ledger",
    long_about = "Record dated, categorised expenses in a single JSON file, then list, \
                  filter and summarise them. Run without a subcommand for the \
                  interactive menu."
)]
struct Cli {
    /// Ledger file (defaults to $EXPENSE_TRACKER_FILE, then ./expenses.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (the default)
    Menu,

    /// Add an expense
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Amount, e.g. "12.50"
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category
        category: String,
        /// Description
        #[arg(default_value = "")]
        description: String,
    },

    /// List all expenses
    #[command(alias = "ls")]
    List,

    /// List expenses by category or date range
    Filter(FilterArgs),

    /// Show the overall and per-category totals
    Summary,

    /// Export the ledger to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Import expenses from a CSV file
    Import {
        /// Path to CSV file
        #[arg(id = "import_file", value_name = "FILE")]
        file: PathBuf,
    },

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show resolved paths and settings
    Config {
        /// Write a default settings file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let paths = TrackerPaths::resolve(cli.file);
    let settings = Settings::load_or_create(&paths)?;
    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Config { init }) => return show_config(&paths, &settings, init),
        Some(Commands::History { limit }) => {
            handle_history_command(&audit, limit)?;
            return Ok(());
        }
        _ => {}
    }

    let mut ledger = Ledger::open(JsonLedgerStore::new(paths.ledger_file()))?;
    if settings.audit_enabled {
        ledger = ledger.with_audit(audit);
    }

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(&mut ledger, &settings, stdin.lock(), stdout.lock()).run()?;
        }
        Some(Commands::Add {
            date,
            amount,
            category,
            description,
        }) => {
            handle_add(
                &mut ledger,
                &settings,
                NewExpense::new(date, amount, category, description),
            )?;
        }
        Some(Commands::List) => handle_list(&ledger, &settings)?,
        Some(Commands::Filter(args)) => handle_filter(&ledger, &settings, &args)?,
        Some(Commands::Summary) => handle_summary(&ledger, &settings)?,
        Some(Commands::Export {
            output,
            format,
            pretty,
        }) => handle_export_command(ledger.records(), &output, format, pretty)?,
        Some(Commands::Import { file }) => handle_import_command(&mut ledger, &file)?,
        Some(Commands::Config { .. }) | Some(Commands::History { .. }) => {}
    }

    Ok(())
}

fn show_config(paths: &TrackerPaths, settings: &Settings, init: bool) -> Result<()> {
    if init {
        if paths.settings_file().exists() {
            println!(
                "Settings file already exists: {}",
                paths.settings_file().display()
            );
        } else {
            settings.save(paths)?;
            println!("Wrote default settings to {}", paths.settings_file().display());
        }
        println!();
    }

    println!("Expense Tracker Configuration");
    println!("{}", separator(29));
    println!("Ledger file:   {}", paths.ledger_file().display());
    println!("Settings file: {}", paths.settings_file().display());
    println!("Audit log:     {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Category case:   {:?}", settings.category_case);
    println!("  Audit enabled:   {}", settings.audit_enabled);

    Ok(())
}
