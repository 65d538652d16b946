use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;

use notion_expenses::cli::{
    handle_cache_command, handle_dashboard_command, handle_export_command, handle_list_command,
    handle_report_command, CacheCommands, ExportCommands, FilterArgs, ReportCommands,
};
use notion_expenses::config::credentials::{DATABASE_ID_VAR, TOKEN_VAR};
use notion_expenses::config::{Credentials, ExpensePaths, Settings};
use notion_expenses::logging;
use notion_expenses::models::ExpenseRecord;
use notion_expenses::notion::HttpTransport;
use notion_expenses::services::{ExpenseService, LoadSource};
use notion_expenses::storage::SnapshotCache;

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Terminal expense dashboard backed by a Notion database",
    long_about = "Fetches every page of a Notion expenses database, flattens the \
                  Name, Date, Category, Amount and Comment properties into rows, \
                  and prints the dashboard, reports or an export of the result."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Notion integration token
    #[arg(long, env = TOKEN_VAR, hide_env_values = true, global = true)]
    token: Option<String>,

    /// Id of the expenses database
    #[arg(long, env = DATABASE_ID_VAR, global = true)]
    database_id: Option<String>,

    /// Notion API root (overrides the settings file)
    #[arg(long, env = "NOTION_API_URL", global = true)]
    api_url: Option<String>,

    /// Ignore the cached snapshot and fetch again
    #[arg(long, global = true)]
    refresh: bool,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full dashboard (default)
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List expenses in date order
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show only the most recent N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Report commands
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Snapshot cache commands
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Show current configuration and paths
    Config,

    /// Write the default settings file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths, logging and settings
    let paths = ExpensePaths::new()?;
    logging::init(cli.global.verbose, Some(&paths.log_file()));
    let settings = Settings::load_or_create(&paths)?;

    let command = cli.command.unwrap_or(Commands::Dashboard {
        filter: FilterArgs::default(),
    });

    match command {
        Commands::Dashboard { filter } => {
            let records = load_expenses(&cli.global, &paths, &settings)?;
            handle_dashboard_command(records, &settings, &filter)?;
        }
        Commands::List { filter, limit } => {
            let records = load_expenses(&cli.global, &paths, &settings)?;
            handle_list_command(records, &settings, &filter, limit)?;
        }
        Commands::Report(cmd) => {
            let records = load_expenses(&cli.global, &paths, &settings)?;
            handle_report_command(records, &settings, cmd)?;
        }
        Commands::Export(cmd) => {
            let records = load_expenses(&cli.global, &paths, &settings)?;
            handle_export_command(records, cmd)?;
        }
        Commands::Cache(cmd) => handle_cache_command(&paths, cmd)?,
        Commands::Config => print_config(&cli.global, &paths, &settings),
        Commands::Init => {
            println!("Initializing notion-expenses at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!();
            println!("Provide credentials through the environment:");
            println!("  export {}=secret_...", TOKEN_VAR);
            println!("  export {}=...", DATABASE_ID_VAR);
            println!("or in {}", paths.secrets_file().display());
            println!();
            println!("Run 'expenses dashboard' to fetch and display your expenses.");
        }
    }

    Ok(())
}

/// Resolve credentials and load expenses through the snapshot cache
fn load_expenses(
    global: &GlobalArgs,
    paths: &ExpensePaths,
    settings: &Settings,
) -> Result<Vec<ExpenseRecord>> {
    let credentials =
        Credentials::resolve(global.token.clone(), global.database_id.clone(), paths)?;

    let base_url = global
        .api_url
        .as_deref()
        .unwrap_or(settings.api_base_url.as_str());
    let transport = HttpTransport::with_base_url(settings, credentials.token, base_url)?;

    let service = ExpenseService::new(transport, credentials.database_id, settings.clone())
        .with_cache(SnapshotCache::new(paths.cache_dir()));

    let loaded = service
        .load(global.refresh)
        .context("Failed to load expenses from Notion")?;

    info!(
        count = loaded.records.len(),
        cached = loaded.source == LoadSource::Cache,
        "Expenses loaded"
    );
    Ok(loaded.records)
}

fn print_config(global: &GlobalArgs, paths: &ExpensePaths, settings: &Settings) {
    let status = |value: &Option<String>| {
        if value.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            "set"
        } else {
            "not set (checked in secrets.json at load time)"
        }
    };

    println!("notion-expenses Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Secrets file:   {}", paths.secrets_file().display());
    println!("Log file:       {}", paths.log_file().display());
    println!("Cache:          {}", paths.cache_dir().display());
    println!();
    println!("Settings:");
    println!(
        "  API URL:          {}",
        global.api_url.as_deref().unwrap_or(&settings.api_base_url)
    );
    println!("  Notion-Version:   {}", settings.notion_version);
    println!("  Page size:        {}", settings.effective_page_size());
    println!("  Cache TTL:        {}s", settings.cache_ttl_secs);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  UTC offset:       {} min", settings.utc_offset_minutes);
    println!(
        "  Properties:       {} / {} / {} / {} / {}",
        settings.properties.name,
        settings.properties.date,
        settings.properties.category,
        settings.properties.amount,
        settings.properties.description
    );
    println!();
    println!("Credentials:");
    println!("  {}: {}", TOKEN_VAR, status(&global.token));
    println!("  {}: {}", DATABASE_ID_VAR, status(&global.database_id));
}
