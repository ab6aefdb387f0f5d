//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod expenditure;
pub mod member;
pub mod team;

// Re-export specific types to avoid conflicts
pub use expenditure::{
    Column as ExpenditureColumn, Entity as Expenditure, Model as ExpenditureModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use team::{Column as TeamColumn, Entity as Team, Model as TeamModel};
