use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub budget_id: i64,
    pub created_at: chrono::NaiveDateTime,
}
