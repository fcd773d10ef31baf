use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::error::AppError;
use crate::mailer::Mailer;
use crate::models::user::Identity;
use crate::validate::Rules;
use crate::{credentials, session, AppState};

#[derive(Deserialize)]
pub struct CreateAccountPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ConfirmAccountPayload {
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordPayload {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct ValidateTokenPayload {
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordPayload {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordPayload {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct CheckPasswordPayload {
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let mut rules = Rules::new();
    rules
        .require("name", &payload.name, "Name is required")
        .min_len(
            "password",
            &payload.password,
            6,
            "Password must be at least 6 characters",
        )
        .email("email", &payload.email, "Email is not valid");
    rules.finish()?;

    if state.users().find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let digest = credentials::hash_password(&payload.password)?;
    let code = credentials::generate_short_code();
    let user = state
        .users()
        .insert(&payload.name, &payload.email, &digest, &code)
        .await?;

    dispatch_email(&state, user.name, user.email, code.clone(), Email::Confirmation);

    let mut response = MessageResponse::new("Account created");
    if state.config.expose_tokens {
        response.token = Some(code);
    }
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn confirm_account(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmAccountPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut rules = Rules::new();
    rules.exact_len("token", &payload.token, 6, "Token not valid");
    rules.finish()?;

    let user = state
        .users()
        .find_by_token(&payload.token)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

    state.users().confirm(user.id).await?;
    Ok(Json(MessageResponse::new("Account confirmed")))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    let mut rules = Rules::new();
    rules
        .email("email", &payload.email, "Email is not valid")
        .require("password", &payload.password, "Password is required");
    rules.finish()?;

    let user = state
        .users()
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !user.confirmed {
        return Err(AppError::forbidden("Account not confirmed"));
    }

    if !credentials::verify_password(&payload.password, &user.password) {
        return Err(AppError::unauthorized("Invalid password"));
    }

    let token = session::sign(user.id, &state.config.jwt_secret)?;
    Ok(Json(LoginResponse { token }))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut rules = Rules::new();
    rules.email("email", &payload.email, "Email is not valid");
    rules.finish()?;

    let user = state
        .users()
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // A second request simply overwrites the previous code; last one wins.
    let code = credentials::generate_short_code();
    state.users().set_token(user.id, &code).await?;

    dispatch_email(&state, user.name, user.email, code.clone(), Email::PasswordReset);

    let mut response = MessageResponse::new("Check your email for instructions");
    if state.config.expose_tokens {
        response.token = Some(code);
    }
    Ok(Json(response))
}

pub async fn validate_token(
    State(state): State<AppState>,
    Json(payload): Json<ValidateTokenPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut rules = Rules::new();
    rules.exact_len("token", &payload.token, 6, "Token not valid");
    rules.finish()?;

    state
        .users()
        .find_by_token(&payload.token)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid token"))?;

    Ok(Json(MessageResponse::new("Token is valid")))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut rules = Rules::new();
    rules.exact_len("token", &token, 6, "Token not valid").min_len(
        "password",
        &payload.password,
        6,
        "Password must be at least 6 characters",
    );
    rules.finish()?;

    let user = state
        .users()
        .find_by_token(&token)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid token"))?;

    let digest = credentials::hash_password(&payload.password)?;
    state
        .users()
        .set_password_clear_token(user.id, &digest)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

pub async fn user(identity: Identity) -> Json<Identity> {
    Json(identity)
}

pub async fn update_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePasswordPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut rules = Rules::new();
    rules
        .require(
            "currentPassword",
            &payload.current_password,
            "Current password is required",
        )
        .min_len(
            "password",
            &payload.password,
            6,
            "Password must be at least 6 characters",
        );
    rules.finish()?;

    let user = state
        .users()
        .find_by_id(identity.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !credentials::verify_password(&payload.current_password, &user.password) {
        return Err(AppError::forbidden("Current password is incorrect"));
    }

    let digest = credentials::hash_password(&payload.password)?;
    state.users().set_password(user.id, &digest).await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

pub async fn check_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(payload): Json<CheckPasswordPayload>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = state
        .users()
        .find_by_id(identity.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !credentials::verify_password(&payload.password, &user.password) {
        return Err(AppError::forbidden("Password is incorrect"));
    }

    Ok(Json(MessageResponse::new("Password is correct")))
}

enum Email {
    Confirmation,
    PasswordReset,
}

/// Email delivery is best-effort: the send runs on its own task and a
/// failure is logged, never surfaced to the caller.
fn dispatch_email(state: &AppState, name: String, email: String, token: String, kind: Email) {
    let mailer = Arc::clone(&state.mailer);
    tokio::spawn(async move {
        let result = match kind {
            Email::Confirmation => mailer.send_confirmation(&name, &email, &token).await,
            Email::PasswordReset => mailer.send_password_reset(&name, &email, &token).await,
        };
        if let Err(e) = result {
            tracing::warn!("email dispatch to {email} failed: {e}");
        }
    });
}
