use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::budget::Budget;

#[derive(Clone)]
pub struct BudgetRepo {
    pool: SqlitePool,
}

impl BudgetRepo {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// All budgets owned by the user, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Budget>, AppError> {
        let budgets = sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(budgets)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Budget>, AppError> {
        let budget = sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(budget)
    }

    pub async fn insert(&self, name: &str, amount: f64, user_id: i64) -> Result<Budget, AppError> {
        let budget = sqlx::query_as::<_, Budget>(
            "INSERT INTO budgets (name, amount, user_id) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(name)
        .bind(amount)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(budget)
    }

    pub async fn update(&self, id: i64, name: &str, amount: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE budgets SET name = ?, amount = ? WHERE id = ?")
            .bind(name)
            .bind(amount)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Deletes the budget and all of its expenses in one transaction.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM expenses WHERE budget_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM budgets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
