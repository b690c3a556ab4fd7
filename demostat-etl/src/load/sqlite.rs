//! SQLite loader
//!
//! Persists the enriched batch into a `users` table. The pool/table helpers
//! are exposed separately so tests can run against `sqlite::memory:`.

use async_trait::async_trait;
use demostat_common::models::EnrichedUser;
use demostat_common::Result;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::load::Loader;

/// Relational loader producing `<output_dir>/<filename>`
pub struct SqliteLoader {
    filename: String,
}

impl SqliteLoader {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Open (creating if needed) the database at `db_path` and ensure the schema
pub async fn init_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;
    Ok(pool)
}

/// Create the users table if it does not exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            first_name TEXT,
            last_name TEXT,
            gender TEXT,
            country TEXT,
            age INTEGER,
            email TEXT,
            age_group TEXT,
            age_category TEXT,
            email_domain TEXT,
            email_preference TEXT,
            is_outlier INTEGER,
            region TEXT,
            population INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert every enriched record
pub async fn insert_users(pool: &SqlitePool, users: &[EnrichedUser]) -> Result<()> {
    for user in users {
        sqlx::query(
            r#"
            INSERT INTO users (
                first_name, last_name, gender, country, age, email,
                age_group, age_category, email_domain, email_preference,
                is_outlier, region, population
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.record.first_name)
        .bind(&user.record.last_name)
        .bind(&user.record.gender)
        .bind(&user.record.country)
        .bind(i64::from(user.record.age))
        .bind(&user.record.email)
        .bind(user.age_group.label())
        .bind(user.age_group.category())
        .bind(&user.email_domain)
        .bind(user.email_preference.as_str())
        .bind(user.is_outlier)
        .bind(&user.region)
        .bind(user.population as i64)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl Loader for SqliteLoader {
    async fn load(&self, users: &[EnrichedUser], output_dir: &Path) -> Result<()> {
        if users.is_empty() {
            warn!("No records to export, skipping SQLite");
            return Ok(());
        }

        let db_path = output_dir.join(&self.filename);
        let pool = init_pool(&db_path).await?;
        insert_users(&pool, users).await?;
        pool.close().await;

        info!(path = %db_path.display(), records = users.len(), "SQLite written");
        Ok(())
    }
}
