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
use crate::models::budget::{Budget, BudgetWithExpenses};
use crate::models::user::Identity;
use crate::validate::Rules;
use crate::AppState;

#[derive(Deserialize)]
pub struct BudgetPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<Value>,
}

fn validate_input(payload: &BudgetPayload) -> Result<f64, AppError> {
    let mut rules = Rules::new();
    rules.require("name", &payload.name, "Name is required");
    let amount = rules.amount("amount", payload.amount.as_ref());
    rules.finish()?;
    // finish() already errored unless every amount rule passed
    amount.ok_or_else(|| {
        AppError::Validation(vec![FieldError::new("amount", "Amount is required")])
    })
}

pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let budgets = state.budgets().list_for_user(identity.id).await?;
    Ok(Json(budgets))
}

pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<BudgetPayload>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let amount = validate_input(&payload)?;
    state
        .budgets()
        .insert(&payload.name, amount, identity.id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Budget created")),
    ))
}

pub async fn get_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(budget_id): Path<String>,
) -> Result<Json<BudgetWithExpenses>, AppError> {
    let budget = access::resolve_budget(&state.budgets(), &budget_id).await?;
    access::check_budget_access(&identity, &budget)?;

    let expenses = state.expenses().list_for_budget(budget.id).await?;
    Ok(Json(BudgetWithExpenses { budget, expenses }))
}

pub async fn update_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(budget_id): Path<String>,
    Json(payload): Json<BudgetPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let budget = access::resolve_budget(&state.budgets(), &budget_id).await?;
    access::check_budget_access(&identity, &budget)?;

    let amount = validate_input(&payload)?;
    state.budgets().update(budget.id, &payload.name, amount).await?;
    Ok(Json(MessageResponse::new("Budget updated")))
}

pub async fn delete_by_id(
    identity: Identity,
    State(state): State<AppState>,
    Path(budget_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let budget = access::resolve_budget(&state.budgets(), &budget_id).await?;
    access::check_budget_access(&identity, &budget)?;

    state.budgets().delete(budget.id).await?;
    Ok(Json(MessageResponse::new("Budget deleted")))
}
