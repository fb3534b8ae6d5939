//! Pool construction, `problems` table DDL and example data.

use crate::error::AppError;
use crate::model::{NewProblem, Status};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub const PROBLEMS_TABLE: &str = "problems";

/// Open a pool for `database_url`, creating the database file if missing.
/// In-memory databases are pinned to a single long-lived connection so every
/// query sees the same data.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true);
    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?
    };
    Ok(pool)
}

/// Create the `problems` table if it does not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            topic TEXT,
            difficulty INTEGER,
            status TEXT NOT NULL DEFAULT 'Not Started'
                CHECK (status IN ('Not Started', 'In Progress', 'Completed')),
            deadline_date DATE
        )
        "#,
        PROBLEMS_TABLE
    );
    tracing::debug!(sql = %ddl, "ensure table");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// The two example problems, due on `today`.
pub fn example_problems(today: NaiveDate) -> Vec<NewProblem> {
    vec![
        NewProblem {
            title: "Two Sum".into(),
            topic: Some("Arrays".into()),
            difficulty: Some(1),
            status: Status::Completed,
            deadline_date: Some(today),
        },
        NewProblem {
            title: "Binary Search".into(),
            topic: Some("Searching".into()),
            difficulty: Some(2),
            status: Status::InProgress,
            deadline_date: Some(today),
        },
    ]
}

/// Insert each example problem unless a problem with the same title already
/// exists. Safe to run on every startup. Returns how many rows were inserted.
pub async fn seed_examples(pool: &SqlitePool, today: NaiveDate) -> Result<u64, AppError> {
    let sql = format!(
        "INSERT INTO {table} (title, topic, difficulty, status, deadline_date) \
         SELECT ?, ?, ?, ?, ? \
         WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE title = ?)",
        table = PROBLEMS_TABLE
    );
    let mut inserted = 0;
    let mut tx = pool.begin().await?;
    for p in example_problems(today) {
        tracing::debug!(sql = %sql, title = %p.title, "seed");
        let result = sqlx::query(&sql)
            .bind(&p.title)
            .bind(&p.topic)
            .bind(p.difficulty)
            .bind(p.status.as_str())
            .bind(p.deadline_date)
            .bind(&p.title)
            .execute(&mut *tx)
            .await;
        match result {
            Ok(r) => inserted += r.rows_affected(),
            Err(e) => {
                tx.rollback().await?;
                return Err(e.into());
            }
        }
    }
    tx.commit().await?;
    Ok(inserted)
}
