//! # kala-init
//!
//! Prepares a database from the command line: schema, first admin and,
//! optionally, the starting catalog.
//!
//! ## Usage
//! ```bash
//! # Schema + admin from ADMIN_EMAIL / ADMIN_PASSWORD (or the defaults)
//! cargo run -p kala-db --bin kala-init
//!
//! # Also load the price list
//! cargo run -p kala-db --bin kala-init -- --seed
//!
//! # Another database file
//! cargo run -p kala-db --bin kala-init -- --database-url sqlite://data/kala.db
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kala_db::migrations::migration_status;
use kala_db::{bootstrap_admin, seed_catalog, BootstrapOutcome, Database, DbConfig};

#[derive(Parser, Debug)]
#[command(name = "kala-init")]
#[command(about = "Create the Kala schema, the first admin and (optionally) the catalog")]
struct Args {
    /// sqlx connection URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://kala.db")]
    database_url: String,

    /// Email of the bootstrap admin
    #[arg(long, env = "ADMIN_EMAIL", default_value = "admin@kala")]
    admin_email: String,

    /// Password of the bootstrap admin
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "kala123", hide_env_values = true)]
    admin_password: String,

    /// Load the salon's starting services and products
    #[arg(long, default_value_t = false)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "kala_db=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let db = Database::new(DbConfig::from_url(&args.database_url))
        .await
        .with_context(|| format!("opening {}", args.database_url))?;

    let (total, applied) = migration_status(db.pool()).await?;
    println!("Migraciones aplicadas: {applied}/{total}");

    match bootstrap_admin(&db, &args.admin_email, &args.admin_password)
        .await
        .context("creating the admin account")?
    {
        BootstrapOutcome::Created { email } => println!("Admin creado: {email}"),
        BootstrapOutcome::AlreadyInitialized => println!("Ya hay usuarios creados."),
    }

    if args.seed {
        let summary = seed_catalog(&db).await.context("loading the catalog")?;
        println!(
            "Catálogo: {} servicios y {} productos nuevos",
            summary.services, summary.products
        );
    }

    db.close().await;
    println!("BD lista.");
    Ok(())
}
