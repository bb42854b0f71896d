//! Provision a back-office account.
//!
//! ```text
//! create-admin <email> <password>
//! ```
//!
//! Reads `DATABASE_URL` from the environment (or `.env`), applies pending
//! migrations and inserts the account with the `admin` role.

use std::process::ExitCode;

use showcase_api::auth::password::{hash_password, validate_password_strength};
use showcase_core::roles::ROLE_ADMIN;
use showcase_db::repositories::AdminUserRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [email, password] = args.as_slice() else {
        eprintln!("usage: create-admin <email> <password>");
        return ExitCode::from(2);
    };

    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        eprintln!("'{email}' is not an email address");
        return ExitCode::from(2);
    }
    if let Err(msg) = validate_password_strength(password) {
        eprintln!("{msg}");
        return ExitCode::from(2);
    }

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    match provision(&database_url, email, password).await {
        Ok(id) => {
            tracing::info!(user_id = %id, email, "Admin account created");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create admin account");
            ExitCode::FAILURE
        }
    }
}

async fn provision(
    database_url: &str,
    email: &str,
    password: &str,
) -> Result<uuid::Uuid, String> {
    let pool = showcase_db::create_pool(database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;
    showcase_db::run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run migrations: {e}"))?;

    let hash = hash_password(password).map_err(|e| format!("Password hashing failed: {e}"))?;
    let user = AdminUserRepo::create(&pool, email, &hash, ROLE_ADMIN)
        .await
        .map_err(|e| format!("Insert failed: {e}"))?;

    pool.close().await;
    Ok(user.id)
}
