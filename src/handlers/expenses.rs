use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::MessageResponse;
use crate::access;
use crate::error::{AppError, FieldError};
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::user::Identity;
use crate::validate::Rules;
use crate::AppState;

#[derive(Deserialize)]
pub struct ExpensePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<Value>,
}

fn validate_input(payload: &ExpensePayload) -> Result<f64, AppError> {
    let mut rules = Rules::new();
    rules.require("name", &payload.name, "Name is required");
    let amount = rules.amount("amount", payload.amount.as_ref());
    rules.finish()?;
    amount.ok_or_else(|| {
        AppError::Validation(vec![FieldError::new("amount", "Amount is required")])
    })
}

/// Runs the full chain for expense-scoped routes: resolve budget, check
/// ownership, resolve expense, check it belongs to that budget.
async fn authorize(
    state: &AppState,
    identity: &Identity,
    budget_id: &str,
    expense_id: &str,
) -> Result<(Budget, Expense), AppError> {
    let budget = access::resolve_budget(&state.budgets(), budget_id).await?;
    access::check_budget_access(identity, &budget)?;
    let expense = access::resolve_expense(&state.expenses(), expense_id).await?;
    access::check_expense_membership(&expense, &budget)?;
    Ok((budget, expense))
}

pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Path(budget_id): Path<String>,
    Json(payload): Json<ExpensePayload>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let budget = access::resolve_budget(&state.budgets(), &budget_id).await?;
    access::check_budget_access(&identity, &budget)?;

    let amount = validate_input(&payload)?;
    state
        .expenses()
        .insert(&payload.name, amount, budget.id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Expense created")),
    ))
}

pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path((budget_id, expense_id)): Path<(String, String)>,
) -> Result<Json<Expense>, AppError> {
    let (_, expense) = authorize(&state, &identity, &budget_id, &expense_id).await?;
    Ok(Json(expense))
}

pub async fn update_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path((budget_id, expense_id)): Path<(String, String)>,
    Json(payload): Json<ExpensePayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let (_, expense) = authorize(&state, &identity, &budget_id, &expense_id).await?;

    let amount = validate_input(&payload)?;
    state
        .expenses()
        .update(expense.id, &payload.name, amount)
        .await?;
    Ok(Json(MessageResponse::new("Expense updated")))
}

pub async fn delete_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path((budget_id, expense_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let (_, expense) = authorize(&state, &identity, &budget_id, &expense_id).await?;

    state.expenses().delete(expense.id).await?;
    Ok(Json(MessageResponse::new("Expense deleted")))
}
