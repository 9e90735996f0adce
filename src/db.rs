use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    // Every pooled connection to `sqlite::memory:` would open its own empty database.
    if database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    }
    let db = Database::connect(opts).await?;

    pragma(&db, "PRAGMA journal_mode=WAL").await?;
    pragma(&db, "PRAGMA synchronous=NORMAL").await?;

    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn pragma(db: &DatabaseConnection, sql: &str) -> AppResult<()> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string())).await?;
    Ok(())
}

#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:").await.expect("in-memory database")
}
