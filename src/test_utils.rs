//! Shared test utilities for the budget tracker.
//!
//! Provides pure entity fixtures for the aggregation engine tests and
//! store-backed factories for the persistence tests.

use crate::config::database::create_tables;
use crate::entities::{expenditure, member, team};
use crate::errors::Result;
use crate::store::{DatabaseStore, LocalStore, NewExpenditure, NewMember, NewTeam, RecordStore};
use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` string. Panics on bad input; test-only.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date must be valid")
}

/// Builds an in-memory team model without touching a store.
#[must_use]
pub fn team_fixture(id: &str, name: &str, budget: f64) -> team::Model {
    team::Model {
        id: id.to_string(),
        name: name.to_string(),
        budget,
        color: "#3b82f6".to_string(),
        created_at: chrono::Utc::now(),
    }
}

/// Builds an in-memory member model without touching a store.
#[must_use]
pub fn member_fixture(
    id: &str,
    team_id: &str,
    name: &str,
    is_leader: bool,
    budget: f64,
) -> member::Model {
    member::Model {
        id: id.to_string(),
        team_id: team_id.to_string(),
        name: name.to_string(),
        is_leader,
        budget,
    }
}

/// Builds an in-memory expenditure model without touching a store.
/// `amount` is derived from `unit_price * quantity` like the write path.
#[must_use]
pub fn expenditure_fixture(
    id: &str,
    team_id: &str,
    member_id: Option<&str>,
    unit_price: f64,
    quantity: i32,
    day: &str,
) -> expenditure::Model {
    expenditure::Model {
        id: id.to_string(),
        team_id: team_id.to_string(),
        member_id: member_id.map(ToString::to_string),
        unit_price,
        quantity,
        amount: unit_price * f64::from(quantity),
        description: format!("fixture {id}"),
        date: date(day),
        created_at: chrono::Utc::now(),
        team_name_historical: None,
        member_name_historical: None,
    }
}

/// Creates a `DatabaseStore` over an in-memory `SQLite` database with all
/// tables initialized. The standard setup for store integration tests.
pub async fn setup_database_store() -> Result<DatabaseStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(DatabaseStore::new(db))
}

/// Creates a `LocalStore` in a fresh temporary directory. The directory
/// guard must be kept alive for the store's lifetime.
pub fn setup_local_store() -> Result<(tempfile::TempDir, LocalStore)> {
    let dir = tempfile::tempdir()?;
    let store = LocalStore::open(dir.path().join("store.json"))?;
    Ok((dir, store))
}

/// Creates a team through the store with a default color.
pub async fn create_test_team<S: RecordStore>(
    store: &S,
    name: &str,
    budget: f64,
) -> Result<team::Model> {
    store
        .create_team(NewTeam {
            name: name.to_string(),
            budget,
            color: "#10b981".to_string(),
        })
        .await
}

/// Creates a member through the store.
pub async fn create_test_member<S: RecordStore>(
    store: &S,
    team_id: &str,
    name: &str,
    is_leader: bool,
) -> Result<member::Model> {
    store
        .create_member(NewMember {
            team_id: team_id.to_string(),
            name: name.to_string(),
            is_leader,
        })
        .await
}

/// Creates an expenditure through the store with a default description.
pub async fn create_test_expenditure<S: RecordStore>(
    store: &S,
    team_id: &str,
    member_id: Option<&str>,
    unit_price: f64,
    quantity: i32,
    day: &str,
) -> Result<expenditure::Model> {
    store
        .create_expenditure(NewExpenditure {
            team_id: team_id.to_string(),
            member_id: member_id.map(ToString::to_string),
            unit_price,
            quantity,
            description: "Test expenditure".to_string(),
            date: date(day),
        })
        .await
}
