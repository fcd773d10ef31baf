pub mod auth;
pub mod budgets;
pub mod expenses;

use serde::Serialize;

/// Plain success body for lifecycle and mutating CRUD operations. The
/// `token` side channel is only populated in test mode (`EXPOSE_TOKENS`).
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            token: None,
        }
    }
}
