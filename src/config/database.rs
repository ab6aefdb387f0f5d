//! Database configuration module.
//!
//! Handles database connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the
//! Rust structs without hand-written SQL.

use crate::entities::{Expenditure, Member, Team};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Safe to call on an existing database only when the tables are absent;
/// callers guard with [`tables_exist`].
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let team_table = schema.create_table_from_entity(Team);
    let member_table = schema.create_table_from_entity(Member);
    let expenditure_table = schema.create_table_from_entity(Expenditure);

    db.execute(builder.build(&team_table)).await?;
    db.execute(builder.build(&member_table)).await?;
    db.execute(builder.build(&expenditure_table)).await?;

    Ok(())
}

/// Returns true when the schema has already been created.
pub async fn tables_exist(db: &DatabaseConnection) -> bool {
    use sea_orm::{EntityTrait, QuerySelect};
    Team::find().limit(1).all(db).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        expenditure::Model as ExpenditureModel, member::Model as MemberModel,
        team::Model as TeamModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if querying them succeeds
        let _: Vec<TeamModel> = Team::find().limit(1).all(&db).await?;
        let _: Vec<MemberModel> = Member::find().limit(1).all(&db).await?;
        let _: Vec<ExpenditureModel> = Expenditure::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_tables_exist() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        assert!(!tables_exist(&db).await);

        create_tables(&db).await?;
        assert!(tables_exist(&db).await);
        Ok(())
    }
}
