use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub confirmed: bool,
    /// Outstanding confirmation or password-reset code; cleared on use.
    #[serde(skip)]
    pub token: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// The minimal identity attached to a request after authentication.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
}
