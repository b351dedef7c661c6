//! Tenant Console CLI
//!
//! Thin operator entry point: establishes (or restores) an admin session,
//! fetches the first directory page plus statistics, and prints them.
//! Configuration comes from the environment:
//! - TC_API_URL: base URL of the admin API (default http://localhost:5000)
//! - TC_STATE_DIR: where the session credential is persisted (default .tc-data)
//! - TC_ADMIN_USER / TC_ADMIN_PASSWORD: used to log in when no persisted
//!   session exists

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenant_console::AdminConsole;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenant_console=info,tc_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("TC_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let state_dir = std::env::var("TC_STATE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".tc-data"));

    tracing::info!("Connecting to {} (state dir {:?})", base_url, state_dir);
    let console = AdminConsole::connect(base_url, state_dir)
        .await
        .context("Failed to initialize console")?;

    if !console.is_authenticated() {
        let username = std::env::var("TC_ADMIN_USER").ok();
        let password = std::env::var("TC_ADMIN_PASSWORD").ok();
        match (username, password) {
            (Some(username), Some(password)) => {
                let profile = console
                    .login(&username, &password)
                    .await
                    .context("Login failed")?;
                tracing::info!("Logged in as {}", profile.username);
            }
            _ => bail!(
                "No persisted session; set TC_ADMIN_USER and TC_ADMIN_PASSWORD to log in"
            ),
        }
    } else {
        console.coordinator().refresh().await;
        console.coordinator().refresh_statistics().await;
    }

    let snapshot = console.directory().snapshot().await;
    if let Some(error) = &snapshot.error {
        bail!("Directory query failed: {}", error);
    }

    if let Some(stats) = &snapshot.statistics {
        println!(
            "{} tenants | {} active | {} trial | {} suspended | {} expiring soon",
            stats.total_tenants, stats.active, stats.trial, stats.suspended, stats.expiring_soon
        );
    }

    if let Some(info) = snapshot.page_info {
        println!("Page {}/{} ({} total)", info.page, info.total_pages, info.total_count);
    }
    for tenant in &snapshot.tenants {
        println!(
            "{:<36} {:<30} {:<10} {:<10} {} users",
            tenant.id,
            tenant.company_name,
            tenant.status.as_str(),
            tenant.plan.as_str(),
            tenant.user_count
        );
    }

    Ok(())
}
