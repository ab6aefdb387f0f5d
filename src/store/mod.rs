//! Record store - the persistence boundary for teams, members, and
//! expenditures.
//!
//! The aggregation engine never touches persistence; it consumes in-memory
//! collections handed to it by whoever holds a [`RecordStore`]. Two
//! backends exist: [`DatabaseStore`] (SeaORM, the primary path) and
//! [`LocalStore`] (a JSON file, the fallback when no `DATABASE_URL` is
//! configured). [`Store`] dispatches to whichever one configuration
//! selected, so callers depend only on the trait.
//!
//! All write-path validation lives here: by the time records reach the
//! engine they are well-typed, non-negative, and carry a consistent
//! `amount == unit_price * quantity`.

pub mod database;
pub mod local;

pub use database::DatabaseStore;
pub use local::LocalStore;

use crate::entities::{expenditure, member, team};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use tracing::info;

/// Default individual budget for non-leader members, in currency units.
pub const DEFAULT_MEMBER_BUDGET: f64 = 1400.0;

/// Input for creating a team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    /// Display name
    pub name: String,
    /// Monthly budget cap
    pub budget: f64,
    /// Hex chart color
    pub color: String,
}

/// Partial update for a team; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    /// New display name
    pub name: Option<String>,
    /// New monthly budget cap
    pub budget: Option<f64>,
    /// New chart color
    pub color: Option<String>,
}

/// Input for creating a member. Non-leaders receive
/// [`DEFAULT_MEMBER_BUDGET`]; leaders carry no cap.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Owning team id
    pub team_id: String,
    /// Display name
    pub name: String,
    /// Whether this member is the team leader
    pub is_leader: bool,
}

/// Partial update for a member; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    /// New display name
    pub name: Option<String>,
    /// New individual budget (rejected for leaders)
    pub budget: Option<f64>,
}

/// Input for creating an expenditure. `amount` is not accepted from
/// callers; the store computes it as `unit_price * quantity`.
#[derive(Debug, Clone)]
pub struct NewExpenditure {
    /// Owning team id
    pub team_id: String,
    /// Member who spent it, or `None` for unassigned team spending
    pub member_id: Option<String>,
    /// Price per unit
    pub unit_price: f64,
    /// Number of units
    pub quantity: i32,
    /// Description of the purchase
    pub description: String,
    /// Calendar day of the spend
    pub date: NaiveDate,
}

/// Partial update for an expenditure; `None` fields are left unchanged.
/// `member_id` is doubly optional so "set to unassigned" (`Some(None)`) is
/// distinct from "leave alone" (`None`). Changing `unit_price` or
/// `quantity` recomputes `amount`.
#[derive(Debug, Clone, Default)]
pub struct ExpenditurePatch {
    /// New member assignment
    pub member_id: Option<Option<String>>,
    /// New unit price
    pub unit_price: Option<f64>,
    /// New quantity
    pub quantity: Option<i32>,
    /// New description
    pub description: Option<String>,
    /// New calendar day
    pub date: Option<NaiveDate>,
}

/// CRUD access to teams, members, and expenditures.
///
/// The read surface (`list_*`) is what the aggregation engine's callers
/// need; the write surface backs the admin operations. Implementations
/// must uphold the write-path invariants enforced by this module's
/// validation helpers.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Lists all teams.
    async fn list_teams(&self) -> Result<Vec<team::Model>>;
    /// Finds a team by id.
    async fn get_team(&self, id: &str) -> Result<Option<team::Model>>;
    /// Creates a team.
    async fn create_team(&self, new: NewTeam) -> Result<team::Model>;
    /// Applies a partial update to a team.
    async fn update_team(&self, id: &str, patch: TeamPatch) -> Result<team::Model>;
    /// Deletes a team, cascading to its members and expenditures.
    async fn delete_team(&self, id: &str) -> Result<()>;

    /// Lists members, optionally scoped to one team.
    async fn list_members(&self, team_id: Option<&str>) -> Result<Vec<member::Model>>;
    /// Creates a member.
    async fn create_member(&self, new: NewMember) -> Result<member::Model>;
    /// Applies a partial update to a member.
    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<member::Model>;
    /// Deletes a member. Its expenditures are kept with
    /// `member_name_historical` stamped for display.
    async fn delete_member(&self, id: &str) -> Result<()>;

    /// Lists expenditures, optionally scoped to one (year, month),
    /// newest first.
    async fn list_expenditures(&self, month: Option<(i32, u32)>)
    -> Result<Vec<expenditure::Model>>;
    /// Creates an expenditure, computing `amount` server-side.
    async fn create_expenditure(&self, new: NewExpenditure) -> Result<expenditure::Model>;
    /// Applies a partial update to an expenditure, recomputing `amount`
    /// when price or quantity change.
    async fn update_expenditure(
        &self,
        id: &str,
        patch: ExpenditurePatch,
    ) -> Result<expenditure::Model>;
    /// Deletes an expenditure.
    async fn delete_expenditure(&self, id: &str) -> Result<()>;
}

/// The configured store backend.
#[derive(Debug)]
pub enum Store {
    /// Relational store behind SeaORM
    Database(DatabaseStore),
    /// JSON-file fallback store
    Local(LocalStore),
}

impl RecordStore for Store {
    async fn list_teams(&self) -> Result<Vec<team::Model>> {
        match self {
            Self::Database(s) => s.list_teams().await,
            Self::Local(s) => s.list_teams().await,
        }
    }

    async fn get_team(&self, id: &str) -> Result<Option<team::Model>> {
        match self {
            Self::Database(s) => s.get_team(id).await,
            Self::Local(s) => s.get_team(id).await,
        }
    }

    async fn create_team(&self, new: NewTeam) -> Result<team::Model> {
        match self {
            Self::Database(s) => s.create_team(new).await,
            Self::Local(s) => s.create_team(new).await,
        }
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> Result<team::Model> {
        match self {
            Self::Database(s) => s.update_team(id, patch).await,
            Self::Local(s) => s.update_team(id, patch).await,
        }
    }

    async fn delete_team(&self, id: &str) -> Result<()> {
        match self {
            Self::Database(s) => s.delete_team(id).await,
            Self::Local(s) => s.delete_team(id).await,
        }
    }

    async fn list_members(&self, team_id: Option<&str>) -> Result<Vec<member::Model>> {
        match self {
            Self::Database(s) => s.list_members(team_id).await,
            Self::Local(s) => s.list_members(team_id).await,
        }
    }

    async fn create_member(&self, new: NewMember) -> Result<member::Model> {
        match self {
            Self::Database(s) => s.create_member(new).await,
            Self::Local(s) => s.create_member(new).await,
        }
    }

    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<member::Model> {
        match self {
            Self::Database(s) => s.update_member(id, patch).await,
            Self::Local(s) => s.update_member(id, patch).await,
        }
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        match self {
            Self::Database(s) => s.delete_member(id).await,
            Self::Local(s) => s.delete_member(id).await,
        }
    }

    async fn list_expenditures(
        &self,
        month: Option<(i32, u32)>,
    ) -> Result<Vec<expenditure::Model>> {
        match self {
            Self::Database(s) => s.list_expenditures(month).await,
            Self::Local(s) => s.list_expenditures(month).await,
        }
    }

    async fn create_expenditure(&self, new: NewExpenditure) -> Result<expenditure::Model> {
        match self {
            Self::Database(s) => s.create_expenditure(new).await,
            Self::Local(s) => s.create_expenditure(new).await,
        }
    }

    async fn update_expenditure(
        &self,
        id: &str,
        patch: ExpenditurePatch,
    ) -> Result<expenditure::Model> {
        match self {
            Self::Database(s) => s.update_expenditure(id, patch).await,
            Self::Local(s) => s.update_expenditure(id, patch).await,
        }
    }

    async fn delete_expenditure(&self, id: &str) -> Result<()> {
        match self {
            Self::Database(s) => s.delete_expenditure(id).await,
            Self::Local(s) => s.delete_expenditure(id).await,
        }
    }
}

/// Seeds teams from configuration, skipping names that already exist.
///
/// Returns the number of teams created. Used at startup so a fresh store
/// comes up with the configured dashboard teams.
pub async fn seed_teams<S: RecordStore>(
    store: &S,
    configs: &[crate::config::teams::TeamConfig],
) -> Result<usize> {
    let existing = store.list_teams().await?;
    let mut created = 0;

    for config in configs {
        if existing.iter().any(|t| t.name == config.name) {
            continue;
        }
        store
            .create_team(NewTeam {
                name: config.name.clone(),
                budget: config.budget,
                color: config.color.clone(),
            })
            .await?;
        info!(team = %config.name, "seeded team");
        created += 1;
    }

    Ok(created)
}

/// Generates a fresh entity id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validates and trims an entity name.
pub(crate) fn validate_name(name: &str, what: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Config {
            message: format!("{what} name cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

/// Validates a monetary value: finite and non-negative.
pub(crate) fn validate_money(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Validates an expenditure quantity: non-negative.
pub(crate) fn validate_quantity(quantity: i32) -> Result<i32> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

/// Computes an expenditure amount from validated inputs.
pub(crate) fn compute_amount(unit_price: f64, quantity: i32) -> f64 {
    unit_price * f64::from(quantity)
}

/// Budget assigned to a newly created member.
pub(crate) fn initial_member_budget(is_leader: bool) -> f64 {
    if is_leader { 0.0 } else { DEFAULT_MEMBER_BUDGET }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::teams::TeamConfig;
    use crate::core::report::format_dashboard;
    use crate::core::rollup::{compute_dashboard_summary, compute_rollups};
    use crate::core::series::build_daily_series;
    use crate::test_utils::{create_test_expenditure, create_test_member, setup_database_store};

    fn seed_config() -> Vec<TeamConfig> {
        vec![
            TeamConfig {
                name: "Chen Long".to_string(),
                budget: 9800.0,
                color: "#3b82f6".to_string(),
            },
            TeamConfig {
                name: "Tianyi".to_string(),
                budget: 8400.0,
                color: "#f59e0b".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_seed_teams_is_idempotent() -> Result<()> {
        let store = Store::Database(setup_database_store().await?);
        let configs = seed_config();

        assert_eq!(seed_teams(&store, &configs).await?, 2);
        assert_eq!(seed_teams(&store, &configs).await?, 0);
        assert_eq!(store.list_teams().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_store_to_dashboard_end_to_end() -> Result<()> {
        let store = Store::Database(setup_database_store().await?);
        seed_teams(&store, &seed_config()).await?;

        let teams = store.list_teams().await?;
        let chen_long = teams
            .iter()
            .find(|t| t.name == "Chen Long")
            .expect("seeded team");
        let member = create_test_member(&store, &chen_long.id, "Alice", false).await?;
        create_test_expenditure(&store, &chen_long.id, None, 50.0, 2, "2024-03-03").await?;
        create_test_expenditure(&store, &chen_long.id, Some(&member.id), 30.0, 1, "2024-03-04")
            .await?;
        // Outside the reporting month; must not show up
        create_test_expenditure(&store, &chen_long.id, None, 999.0, 1, "2024-04-01").await?;

        let members = store.list_members(None).await?;
        let expenditures = store.list_expenditures(Some((2024, 3))).await?;

        let rollups = compute_rollups(&teams, &members, &expenditures);
        let chen_rollup = rollups
            .iter()
            .find(|r| r.team.id == chen_long.id)
            .expect("rollup for seeded team");
        assert_eq!(chen_rollup.total_spent, 130.0);
        assert_eq!(chen_rollup.unassigned_spending, 100.0);
        let tianyi_rollup = rollups
            .iter()
            .find(|r| r.team.name == "Tianyi")
            .expect("rollup for seeded team");
        assert_eq!(tianyi_rollup.total_spent, 0.0);

        let summary = compute_dashboard_summary(&rollups);
        assert_eq!(summary.total_budget, 18200.0);
        assert_eq!(summary.total_spent, 130.0);

        let series = build_daily_series(2024, 3, &teams, &expenditures)?;
        assert_eq!(series.len(), 31);
        assert_eq!(series[2].totals["Chen Long"], 100.0);
        assert_eq!(series[3].totals["Chen Long"], 30.0);

        let rendered = format_dashboard(&summary, &rollups, &series, "2024-03");
        assert!(rendered.contains("Chen Long"));
        assert!(rendered.contains("Total Spent: 130.00U"));
        Ok(())
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Chen Long ", "Team").unwrap(), "Chen Long");
        assert!(validate_name("   ", "Team").is_err());
    }

    #[test]
    fn test_validate_money_rejects_bad_values() {
        assert!(validate_money(-1.0).is_err());
        assert!(validate_money(f64::NAN).is_err());
        assert!(validate_money(f64::INFINITY).is_err());
        assert_eq!(validate_money(0.0).unwrap(), 0.0);
        assert_eq!(validate_money(12.5).unwrap(), 12.5);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(-1).is_err());
        assert_eq!(validate_quantity(0).unwrap(), 0);
        assert_eq!(validate_quantity(3).unwrap(), 3);
    }

    #[test]
    fn test_compute_amount() {
        assert_eq!(compute_amount(50.0, 2), 100.0);
        assert_eq!(compute_amount(0.5, 3), 1.5);
        assert_eq!(compute_amount(10.0, 0), 0.0);
    }

    #[test]
    fn test_initial_member_budget() {
        assert_eq!(initial_member_budget(false), DEFAULT_MEMBER_BUDGET);
        assert_eq!(initial_member_budget(true), 0.0);
    }
}
