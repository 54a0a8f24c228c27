use async_trait::async_trait;

/// Outgoing message to a single recipient.
#[derive(Debug, Clone)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery seam for transactional email (password recovery links).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message) -> anyhow::Result<()>;
}

/// Mailer that writes messages to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: Message) -> anyhow::Result<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Outgoing email"
        );
        Ok(())
    }
}
