//! Dashboard binary: loads configuration, opens the configured record
//! store, seeds the configured teams, and prints the current month's
//! budget dashboard.

use team_budget_tracker::config::{self, database};
use team_budget_tracker::core::dates::current_reporting_month;
use team_budget_tracker::core::report::format_dashboard;
use team_budget_tracker::core::rollup::{compute_dashboard_summary, compute_rollups};
use team_budget_tracker::core::series::build_daily_series;
use team_budget_tracker::errors::Result;
use team_budget_tracker::store::{self, DatabaseStore, LocalStore, RecordStore, Store};

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Open the configured store backend
    let record_store = match &app_config.database_url {
        Some(url) => {
            let db = database::create_connection(url).await?;
            if !database::tables_exist(&db).await {
                database::create_tables(&db).await?;
                info!("created database schema");
            }
            Store::Database(DatabaseStore::new(db))
        }
        None => Store::Local(LocalStore::open(&app_config.local_store_path)?),
    };

    // 5. Seed configured teams that are not present yet
    let seeded = store::seed_teams(&record_store, &app_config.seed_teams).await?;
    if seeded > 0 {
        info!(count = seeded, "seeded missing teams");
    }

    // 6. Compute and render the current month's dashboard
    let (year, month) = current_reporting_month();
    let teams = record_store.list_teams().await?;
    let members = record_store.list_members(None).await?;
    let expenditures = record_store.list_expenditures(Some((year, month))).await?;

    let rollups = compute_rollups(&teams, &members, &expenditures);
    let summary = compute_dashboard_summary(&rollups);
    let series = build_daily_series(year, month, &teams, &expenditures)?;

    let month_label = format!("{year}-{month:02}");
    println!("{}", format_dashboard(&summary, &rollups, &series, &month_label));

    Ok(())
}
