//! Migrate command - manages the users, appointments and messages schema.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let outcome = match args.action {
        MigrateAction::Up => db.run_migrations().await.map(|_| "Schema is up to date"),
        MigrateAction::Down => db
            .rollback_migration()
            .await
            .map(|_| "Rolled back the latest migration"),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping every table, all hospital records will be lost");
            db.fresh_migrations().await.map(|_| "Schema rebuilt from scratch")
        }
        MigrateAction::Status => db.migration_status().await.map(|migrations| {
            for (name, applied) in migrations {
                println!("{:<50} {}", name, if applied { "applied" } else { "pending" });
            }
            "Migration status listed"
        }),
    };

    let summary = outcome.map_err(|e| AppError::internal(format!("Migration failed: {}", e)))?;
    tracing::info!(action = ?args.action, "{}", summary);
    Ok(())
}
