//! SeaORM-backed record store.
//!
//! The primary persistence path: SQLite by default, any `DATABASE_URL`
//! SeaORM accepts. Multi-row mutations (team cascade, member deletion with
//! historical stamping) run inside database transactions so they succeed
//! or fail as a unit.

use crate::core::dates::month_bounds;
use crate::entities::{Expenditure, Member, Team, expenditure, member, team};
use crate::errors::{Error, Result};
use crate::store::{
    ExpenditurePatch, MemberPatch, NewExpenditure, NewMember, NewTeam, RecordStore, TeamPatch,
    compute_amount, initial_member_budget, new_id, validate_money, validate_name,
    validate_quantity,
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};

/// Record store backed by a SeaORM connection.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Wraps an established connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection, for schema setup.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn require_team<C: ConnectionTrait>(conn: &C, id: &str) -> Result<team::Model> {
        Team::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| Error::TeamNotFound { id: id.to_string() })
    }

    async fn require_member<C: ConnectionTrait>(conn: &C, id: &str) -> Result<member::Model> {
        Member::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| Error::MemberNotFound { id: id.to_string() })
    }

    /// Checks that a member assignment is valid for the given team.
    async fn check_assignment<C: ConnectionTrait>(
        conn: &C,
        team_id: &str,
        member_id: &str,
    ) -> Result<()> {
        let member = Self::require_member(conn, member_id).await?;
        if member.team_id != team_id {
            return Err(Error::Config {
                message: format!("Member {member_id} does not belong to team {team_id}"),
            });
        }
        Ok(())
    }
}

impl RecordStore for DatabaseStore {
    async fn list_teams(&self) -> Result<Vec<team::Model>> {
        Team::find()
            .order_by_asc(team::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn get_team(&self, id: &str) -> Result<Option<team::Model>> {
        Team::find_by_id(id).one(&self.db).await.map_err(Into::into)
    }

    async fn create_team(&self, new: NewTeam) -> Result<team::Model> {
        let name = validate_name(&new.name, "Team")?;
        let budget = validate_money(new.budget)?;

        let model = team::ActiveModel {
            id: Set(new_id()),
            name: Set(name),
            budget: Set(budget),
            color: Set(new.color),
            created_at: Set(chrono::Utc::now()),
        };

        model.insert(&self.db).await.map_err(Into::into)
    }

    async fn update_team(&self, id: &str, patch: TeamPatch) -> Result<team::Model> {
        let existing = Self::require_team(&self.db, id).await?;
        let mut active: team::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(validate_name(&name, "Team")?);
        }
        if let Some(budget) = patch.budget {
            active.budget = Set(validate_money(budget)?);
        }
        if let Some(color) = patch.color {
            active.color = Set(color);
        }

        active.update(&self.db).await.map_err(Into::into)
    }

    async fn delete_team(&self, id: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = Self::require_team(&txn, id).await?;

        // Cascade: the team's expenditures and members go with it
        Expenditure::delete_many()
            .filter(expenditure::Column::TeamId.eq(id))
            .exec(&txn)
            .await?;
        Member::delete_many()
            .filter(member::Column::TeamId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_members(&self, team_id: Option<&str>) -> Result<Vec<member::Model>> {
        let mut query = Member::find().order_by_asc(member::Column::Name);
        if let Some(team_id) = team_id {
            query = query.filter(member::Column::TeamId.eq(team_id));
        }
        query.all(&self.db).await.map_err(Into::into)
    }

    async fn create_member(&self, new: NewMember) -> Result<member::Model> {
        let name = validate_name(&new.name, "Member")?;
        Self::require_team(&self.db, &new.team_id).await?;

        let model = member::ActiveModel {
            id: Set(new_id()),
            team_id: Set(new.team_id),
            name: Set(name),
            is_leader: Set(new.is_leader),
            budget: Set(initial_member_budget(new.is_leader)),
        };

        model.insert(&self.db).await.map_err(Into::into)
    }

    async fn update_member(&self, id: &str, patch: MemberPatch) -> Result<member::Model> {
        let existing = Self::require_member(&self.db, id).await?;
        let is_leader = existing.is_leader;
        let mut active: member::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(validate_name(&name, "Member")?);
        }
        if let Some(budget) = patch.budget {
            if is_leader {
                return Err(Error::Config {
                    message: "Leaders carry no budget cap".to_string(),
                });
            }
            active.budget = Set(validate_money(budget)?);
        }

        active.update(&self.db).await.map_err(Into::into)
    }

    async fn delete_member(&self, id: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = Self::require_member(&txn, id).await?;

        // Keep the member's expenditures; stamp the display fallback so the
        // records stay readable after the member row is gone.
        Expenditure::update_many()
            .col_expr(
                expenditure::Column::MemberNameHistorical,
                Expr::value(existing.name.clone()),
            )
            .filter(expenditure::Column::MemberId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list_expenditures(
        &self,
        month: Option<(i32, u32)>,
    ) -> Result<Vec<expenditure::Model>> {
        let mut query = Expenditure::find().order_by_desc(expenditure::Column::CreatedAt);

        if let Some((year, m)) = month {
            let (first, last) = month_bounds(year, m)?;
            query = query
                .filter(expenditure::Column::Date.gte(first))
                .filter(expenditure::Column::Date.lte(last));
        }

        query.all(&self.db).await.map_err(Into::into)
    }

    async fn create_expenditure(&self, new: NewExpenditure) -> Result<expenditure::Model> {
        let unit_price = validate_money(new.unit_price)?;
        let quantity = validate_quantity(new.quantity)?;
        let description = validate_name(&new.description, "Expenditure")?;

        Self::require_team(&self.db, &new.team_id).await?;
        if let Some(member_id) = &new.member_id {
            Self::check_assignment(&self.db, &new.team_id, member_id).await?;
        }

        let model = expenditure::ActiveModel {
            id: Set(new_id()),
            team_id: Set(new.team_id),
            member_id: Set(new.member_id),
            unit_price: Set(unit_price),
            quantity: Set(quantity),
            amount: Set(compute_amount(unit_price, quantity)),
            description: Set(description),
            date: Set(new.date),
            created_at: Set(chrono::Utc::now()),
            team_name_historical: Set(None),
            member_name_historical: Set(None),
        };

        model.insert(&self.db).await.map_err(Into::into)
    }

    async fn update_expenditure(
        &self,
        id: &str,
        patch: ExpenditurePatch,
    ) -> Result<expenditure::Model> {
        let existing = Expenditure::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::ExpenditureNotFound { id: id.to_string() })?;

        let unit_price = match patch.unit_price {
            Some(p) => validate_money(p)?,
            None => existing.unit_price,
        };
        let quantity = match patch.quantity {
            Some(q) => validate_quantity(q)?,
            None => existing.quantity,
        };

        let team_id = existing.team_id.clone();
        let mut active: expenditure::ActiveModel = existing.into();

        if let Some(assignment) = patch.member_id {
            if let Some(member_id) = &assignment {
                Self::check_assignment(&self.db, &team_id, member_id).await?;
            }
            active.member_id = Set(assignment);
            // Reassignment supersedes any stale display fallback
            active.member_name_historical = Set(None);
        }
        if let Some(description) = patch.description {
            active.description = Set(validate_name(&description, "Expenditure")?);
        }
        if let Some(date) = patch.date {
            active.date = Set(date);
        }

        active.unit_price = Set(unit_price);
        active.quantity = Set(quantity);
        active.amount = Set(compute_amount(unit_price, quantity));

        active.update(&self.db).await.map_err(Into::into)
    }

    async fn delete_expenditure(&self, id: &str) -> Result<()> {
        let existing = Expenditure::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::ExpenditureNotFound { id: id.to_string() })?;

        existing.delete(&self.db).await?;
        Ok(())
    }
}
