use contracts::domain::a001_bank_slip::aggregate::BankSlip;
use contracts::domain::common::AggregateRoot;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// SQLite connection URL for a database file, created on first connect
pub fn sqlite_url(db_file: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Open the database file and make sure the schema exists
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file);
    tracing::info!("Connecting to {}", db_url);
    let conn = Database::connect(&db_url).await?;

    ensure_bank_slip_table(&conn).await?;
    Ok(conn)
}

/// Minimal schema bootstrap, no migration history
async fn ensure_bank_slip_table(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let table = BankSlip::full_name();

    let check_table = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check_table))
        .await?;
    if !existing.is_empty() {
        tracing::debug!("Table {} already exists", table);
        return Ok(());
    }

    tracing::info!("Creating {} table", table);
    let create_table_sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY NOT NULL,
            due_date TEXT NOT NULL,
            total_in_cents INTEGER NOT NULL,
            customer TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'PENDING',
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
        table
    );
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_table_sql,
    ))
    .await?;

    Ok(())
}
