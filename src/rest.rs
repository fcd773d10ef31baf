use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, budgets, expenses};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/create-account", post(auth::create_account))
        .route("/auth/confirm-account", post(auth::confirm_account))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/validate-token", post(auth::validate_token))
        .route("/auth/reset-password/:token", post(auth::reset_password))
        .route("/auth/user", get(auth::user))
        .route("/auth/update-password", post(auth::update_password))
        .route("/auth/check-password", post(auth::check_password))
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route(
            "/budgets/:budgetId",
            get(budgets::get_by_id)
                .put(budgets::update_by_id)
                .delete(budgets::delete_by_id),
        )
        .route("/budgets/:budgetId/expenses", post(expenses::create))
        .route(
            "/budgets/:budgetId/expenses/:expenseId",
            get(expenses::get_by_id)
                .put(expenses::update_by_id)
                .delete(expenses::delete_by_id),
        )
        .with_state(state)
}
