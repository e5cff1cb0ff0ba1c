use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::account::models::VerificationEmail;

/// Serializable envelope for mail requests consumed by the mailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum NotificationMessage {
    VerificationEmailRequested(VerificationEmailMessage),
}

/// Rendered verification email, ready to hand to a mail transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationEmailMessage {
    pub event_id: String,
    pub user_id: String,
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub link: String,
    pub expires_at: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
}

/// Static parts of every verification email.
#[derive(Debug, Clone)]
pub struct MailTemplate {
    pub sender: String,
    pub frontend_url: String,
    pub link_ttl_hours: i64,
}

impl MailTemplate {
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify/{}", self.frontend_url.trim_end_matches('/'), token)
    }

    pub fn render(&self, email: &VerificationEmail) -> VerificationEmailMessage {
        let link = self.verification_link(&email.token);
        let body = format!(
            "Hi {username},\n\n\
             Thank you for registering! Please verify your email by clicking the link below:\n\
             {link}\n\n\
             This link will expire in {hours} hour(s).\n\n\
             If you didn't create this account, you can safely ignore this email.\n",
            username = email.username,
            link = link,
            hours = self.link_ttl_hours,
        );

        VerificationEmailMessage {
            event_id: Uuid::new_v4().to_string(),
            user_id: email.user_id.to_string(),
            recipient: email.recipient.to_string(),
            sender: self.sender.clone(),
            subject: "Verify your account".to_string(),
            body,
            link,
            expires_at: email.expires_at,
            requested_at: Utc::now(),
        }
    }
}

impl From<VerificationEmailMessage> for NotificationMessage {
    fn from(message: VerificationEmailMessage) -> Self {
        NotificationMessage::VerificationEmailRequested(message)
    }
}
