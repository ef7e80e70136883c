//! Migrate command - users table schema management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: nothing runs until the action says so
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations");
            db.run_migrations().await?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration");
            db.rollback_migration().await?;
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            if status.is_empty() {
                println!("no migrations defined");
            }
            for (name, applied) in status {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables; every account will be removed");
            db.fresh_migrations().await?;
            tracing::info!("Fresh schema created");
        }
    }

    Ok(())
}
