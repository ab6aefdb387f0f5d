//! Team entity - A budgeted team on the dashboard.
//!
//! Each team has a monthly budget cap (in abstract currency units) and a
//! display color used by the chart layer. Ids are UUID strings generated at
//! creation time by the record store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the team
    pub name: String,
    /// Monthly budget cap in currency units
    pub budget: f64,
    /// Hex color used for the team's chart line and progress bar
    pub color: String,
    /// When the team was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Team and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One team has many members
    #[sea_orm(has_many = "super::member::Entity")]
    Members,
    /// One team has many expenditures
    #[sea_orm(has_many = "super::expenditure::Entity")]
    Expenditures,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::expenditure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenditures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
