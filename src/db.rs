use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::ApiResult;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

pub async fn connect_and_migrate(database_url: &str) -> ApiResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url.to_string());
    if database_url.contains(":memory:") {
        // A pooled in-memory sqlite database exists per connection; keep the
        // pool at one so every query sees the same database.
        opts.max_connections(1).min_connections(1);
    }
    let db = Database::connect(opts).await?;

    // Pragma tuning only applies to file-backed databases.
    if !database_url.contains(":memory:") {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA journal_mode=WAL".to_string(),
        ))
        .await?;

        db.execute(Statement::from_string(
            db.get_database_backend(),
            "PRAGMA synchronous=NORMAL".to_string(),
        ))
        .await?;
    }

    run_sql(&db, MIGRATION_001).await?;
    Ok(db)
}

async fn run_sql(db: &DatabaseConnection, sql: &str) -> ApiResult<()> {
    for stmt in sql.split(';') {
        let stmt = stmt.trim();
        if stmt.is_empty() {
            continue;
        }
        db.execute(Statement::from_string(db.get_database_backend(), stmt.to_string())).await?;
    }
    Ok(())
}
