//! CLI commands for the snapshot cache

use crate::config::ExpensePaths;
use crate::error::ExpenseResult;
use crate::storage::SnapshotCache;
use clap::Subcommand;

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Delete all cached snapshots
    Clear,

    /// Show where snapshots are stored
    Path,
}

/// Handle cache commands
pub fn handle_cache_command(paths: &ExpensePaths, cmd: CacheCommands) -> ExpenseResult<()> {
    let cache = SnapshotCache::new(paths.cache_dir());
    match cmd {
        CacheCommands::Clear => {
            let removed = cache.clear()?;
            println!("Removed {} cached snapshot(s).", removed);
        }
        CacheCommands::Path => {
            println!("{}", paths.cache_dir().display());
        }
    }
    Ok(())
}
