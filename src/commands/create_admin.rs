//! Create-admin command - bootstraps the first admin account.
//!
//! Admin routes need an admin session, so the first admin has to come
//! from outside the API.

use std::str::FromStr;
use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{Gender, Registration};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, DiskStorage};
use crate::services::{ServiceContainer, Services};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let registration = Registration {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        phone: args.phone,
        nic: args.nic,
        dob: args.dob,
        gender: Gender::from_str(&args.gender).map_err(AppError::validation)?,
        password: args.password,
    };

    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(
        db.get_connection(),
        &config,
        Arc::new(DiskStorage::from_config(&config)),
    );

    let admin = services.auth().add_admin(registration).await?;
    tracing::info!(user_id = %admin.id, email = %admin.email, "Admin created");
    println!("Created admin {} <{}>", admin.id, admin.email);

    Ok(())
}
