//! Expenditure entity - A single dated spend record.
//!
//! Each expenditure belongs to a team and optionally to a member
//! (`member_id` of `None` means "unassigned to any individual"). The store
//! enforces `amount == unit_price * quantity` at write time; nothing
//! downstream recomputes it. The `*_name_historical` fields preserve a
//! display name when the owning team or member has since been deleted and
//! are never consulted by the aggregation layer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expenditure database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenditures")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Id of the team this expenditure is attributed to
    pub team_id: String,
    /// Id of the member who spent it, or None for unassigned team spending
    pub member_id: Option<String>,
    /// Price per unit in currency units
    pub unit_price: f64,
    /// Number of units purchased
    pub quantity: i32,
    /// Total amount, always `unit_price * quantity` at write time
    pub amount: f64,
    /// Human-readable description of the purchase
    pub description: String,
    /// Calendar day the spend happened on
    pub date: Date,
    /// When the record was created
    pub created_at: DateTimeUtc,
    /// Display fallback when the owning team has been deleted
    pub team_name_historical: Option<String>,
    /// Display fallback when the owning member has been deleted
    pub member_name_historical: Option<String>,
}

/// Defines relationships between Expenditure and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expenditure belongs to one team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
