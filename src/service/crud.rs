//! Problem persistence against SQLite.

use crate::error::AppError;
use crate::model::{NewProblem, Problem, ProblemRow, Status};
use crate::store::PROBLEMS_TABLE;
use sqlx::{Sqlite, SqlitePool, Transaction};

const COLUMNS: &str = "id, title, topic, difficulty, status, deadline_date";

/// Storage adapter for the `problems` table. Cheap to clone; every clone shares
/// the same pool.
#[derive(Clone)]
pub struct ProblemStore {
    pool: SqlitePool,
}

impl ProblemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial statement to confirm the database answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// All problems ordered by difficulty, then deadline, then insertion order.
    pub async fn list_all(&self) -> Result<Vec<Problem>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY difficulty ASC, deadline_date ASC, id ASC",
            COLUMNS, PROBLEMS_TABLE
        );
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<ProblemRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Problem::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Problem, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", COLUMNS, PROBLEMS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<ProblemRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(AppError::NotFound)?.try_into()
    }

    /// Insert one problem and return it with its assigned id.
    pub async fn insert(&self, new: &NewProblem) -> Result<Problem, AppError> {
        let sql = format!(
            "INSERT INTO {} (title, topic, difficulty, status, deadline_date) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            PROBLEMS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, title = %new.title, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, ProblemRow>(&sql)
            .bind(&new.title)
            .bind(&new.topic)
            .bind(new.difficulty)
            .bind(new.status.as_str())
            .bind(new.deadline_date)
            .fetch_one(&mut *tx)
            .await;
        let row = finish(tx, result).await?;
        row.try_into()
    }

    /// Set the status of one problem; `NotFound` if the id is absent.
    pub async fn update_status(&self, id: i64, status: Status) -> Result<Problem, AppError> {
        let sql = format!(
            "UPDATE {} SET status = ? WHERE id = ? RETURNING {}",
            PROBLEMS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id, status = %status, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, ProblemRow>(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&mut *tx)
            .await;
        let row = finish(tx, result).await?;
        row.ok_or(AppError::NotFound)?.try_into()
    }

    /// Remove one problem; `NotFound` if the id is absent.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", PROBLEMS_TABLE);
        tracing::debug!(sql = %sql, id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await;
        let done = finish(tx, result).await?;
        if done.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Commit on success, roll back on failure.
async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    result: Result<T, sqlx::Error>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{connect, ensure_tables};
    use chrono::NaiveDate;

    async fn store() -> ProblemStore {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        ensure_tables(&pool).await.unwrap();
        ProblemStore::new(pool)
    }

    fn new_problem(title: &str, difficulty: Option<i64>, deadline: Option<(i32, u32, u32)>) -> NewProblem {
        NewProblem {
            title: title.into(),
            topic: None,
            difficulty,
            status: Status::default(),
            deadline_date: deadline.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = store().await;
        let a = store.insert(&new_problem("a", None, None)).await.unwrap();
        let b = store.insert(&new_problem("b", None, None)).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(store.get(a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn list_orders_by_difficulty_then_deadline() {
        let store = store().await;
        store.insert(&new_problem("hard", Some(2), Some((2025, 1, 1)))).await.unwrap();
        store.insert(&new_problem("easy-late", Some(1), Some((2025, 6, 1)))).await.unwrap();
        store.insert(&new_problem("easy-early", Some(1), Some((2025, 3, 1)))).await.unwrap();

        let titles: Vec<String> = store.list_all().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["easy-early", "easy-late", "hard"]);
    }

    #[tokio::test]
    async fn list_breaks_ties_by_insertion_order() {
        let store = store().await;
        for title in ["first", "second", "third"] {
            store.insert(&new_problem(title, Some(1), Some((2025, 1, 1)))).await.unwrap();
        }
        let titles: Vec<String> = store.list_all().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = store().await;
        assert!(matches!(store.get(42).await, Err(AppError::NotFound)));
        assert!(matches!(store.update_status(42, Status::Completed).await, Err(AppError::NotFound)));
        assert!(matches!(store.delete(42).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_then_delete() {
        let store = store().await;
        let p = store.insert(&new_problem("x", Some(3), None)).await.unwrap();
        let updated = store.update_status(p.id, Status::InProgress).await.unwrap();
        assert_eq!(updated.status, Status::InProgress);
        assert_eq!(updated.title, "x");

        store.delete(p.id).await.unwrap();
        assert!(matches!(store.get(p.id).await, Err(AppError::NotFound)));
    }

    /// Make every UPDATE and DELETE on the table abort at the storage layer.
    async fn block_mutations(store: &ProblemStore) {
        for ddl in [
            "CREATE TRIGGER no_update BEFORE UPDATE ON problems BEGIN SELECT RAISE(ABORT, 'read only'); END",
            "CREATE TRIGGER no_delete BEFORE DELETE ON problems BEGIN SELECT RAISE(ABORT, 'read only'); END",
        ] {
            sqlx::query(ddl).execute(&store.pool).await.unwrap();
        }
    }

    #[tokio::test]
    async fn failed_update_and_delete_leave_row_unchanged() {
        let store = store().await;
        let p = store.insert(&new_problem("kept", Some(1), Some((2025, 5, 1)))).await.unwrap();
        block_mutations(&store).await;

        let err = store.update_status(p.id, Status::Completed).await.unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        let err = store.delete(p.id).await.unwrap_err();
        assert!(matches!(err, AppError::Db(_)));

        assert_eq!(store.get(p.id).await.unwrap(), p);
        assert_eq!(store.list_all().await.unwrap(), vec![p]);
    }

    #[tokio::test]
    async fn ping_reports_database_reachable() {
        let store = store().await;
        store.ping().await.unwrap();
        store.pool.close().await;
        assert!(matches!(store.ping().await, Err(AppError::Db(_))));
    }

    #[tokio::test]
    async fn failed_insert_leaves_store_unchanged() {
        let store = store().await;
        // rejected by the table's CHECK constraint
        let err = store.insert(&new_problem("   ", None, None)).await.unwrap_err();
        assert!(matches!(err, AppError::Db(_)));
        assert!(store.list_all().await.unwrap().is_empty());
        // the pool is still usable after the rollback
        store.insert(&new_problem("ok", None, None)).await.unwrap();
    }
}
