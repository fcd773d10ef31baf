use async_trait::async_trait;

/// Outbound email seam. Delivery is an external collaborator; the lifecycle
/// handlers spawn sends and never fail a request on a delivery error.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_confirmation(&self, name: &str, email: &str, token: &str) -> Result<(), String>;

    async fn send_password_reset(&self, name: &str, email: &str, token: &str)
        -> Result<(), String>;
}

/// Records dispatches through tracing instead of talking to an SMTP relay.
/// Stands in for real delivery in development and tests.
pub struct LogMailer {
    pub frontend_url: String,
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_confirmation(&self, name: &str, email: &str, token: &str) -> Result<(), String> {
        tracing::info!(
            to = email,
            token,
            link = %format!("{}/auth/confirm-account", self.frontend_url),
            "confirmation email for {name}"
        );
        Ok(())
    }

    async fn send_password_reset(
        &self,
        name: &str,
        email: &str,
        token: &str,
    ) -> Result<(), String> {
        tracing::info!(
            to = email,
            token,
            link = %format!("{}/auth/new-password", self.frontend_url),
            "password reset email for {name}"
        );
        Ok(())
    }
}
