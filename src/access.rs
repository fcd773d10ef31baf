//! Access control chain for budget and expense routes.
//!
//! Stages run in a fixed order and each one either returns the enriched
//! context value for the next stage or short-circuits with an error:
//! authenticate, resolve budget, check ownership, resolve expense, check
//! membership. Nothing downstream of a failed stage executes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, FieldError};
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::user::Identity;
use crate::repo::{BudgetRepo, ExpenseRepo};
use crate::{session, AppState};

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Token is required"))?;

        let token = bearer
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Token is required"))?;

        let user_id = session::verify(token, &state.config.jwt_secret)?;

        state
            .users()
            .identity_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid token"))
    }
}

/// Path ids must be positive integers; anything else is rejected before the
/// store is touched.
pub fn parse_id(raw: &str, path: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::Validation(vec![FieldError::new(
            path,
            "Id not valid",
        )])),
    }
}

pub async fn resolve_budget(repo: &BudgetRepo, raw_id: &str) -> Result<Budget, AppError> {
    let id = parse_id(raw_id, "budgetId")?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Budget not found"))
}

pub fn check_budget_access(identity: &Identity, budget: &Budget) -> Result<(), AppError> {
    if budget.user_id != identity.id {
        return Err(AppError::unauthorized("Access denied"));
    }
    Ok(())
}

pub async fn resolve_expense(repo: &ExpenseRepo, raw_id: &str) -> Result<Expense, AppError> {
    let id = parse_id(raw_id, "expenseId")?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Expense not found"))
}

/// An expense id that exists under a different budget is indistinguishable
/// from a missing one.
pub fn check_expense_membership(expense: &Expense, budget: &Budget) -> Result<(), AppError> {
    if expense.budget_id != budget.id {
        return Err(AppError::not_found("Expense not found"));
    }
    Ok(())
}
