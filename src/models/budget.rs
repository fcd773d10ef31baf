use serde::Serialize;

use super::expense::Expense;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
}

/// Budget detail response with its expenses eager-loaded.
#[derive(Debug, Serialize)]
pub struct BudgetWithExpenses {
    #[serde(flatten)]
    pub budget: Budget,
    pub expenses: Vec<Expense>,
}
