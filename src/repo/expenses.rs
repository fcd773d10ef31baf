use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::expense::Expense;

#[derive(Clone)]
pub struct ExpenseRepo {
    pool: SqlitePool,
}

impl ExpenseRepo {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(expense)
    }

    pub async fn list_for_budget(&self, budget_id: i64) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE budget_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(budget_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn insert(
        &self,
        name: &str,
        amount: f64,
        budget_id: i64,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (name, amount, budget_id) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(name)
        .bind(amount)
        .bind(budget_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn update(&self, id: i64, name: &str, amount: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE expenses SET name = ?, amount = ? WHERE id = ?")
            .bind(name)
            .bind(amount)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
