//! Member entity - An individual inside a team.
//!
//! Non-leaders carry an individual budget (defaulting to a fixed per-member
//! amount at creation); leaders are exempt and treated as unlimited, so the
//! aggregation layer never computes a percentage against a leader's budget.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Id of the team this member belongs to
    pub team_id: String,
    /// Display name of the member
    pub name: String,
    /// Whether this member is the team leader (no budget cap)
    pub is_leader: bool,
    /// Individual monthly budget in currency units (advisory; 0 for leaders)
    pub budget: f64,
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each member belongs to one team
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
