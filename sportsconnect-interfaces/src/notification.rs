//! Outbound notification interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Mail provider rejected message: {0}")]
    Rejected(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    #[error("Mailer is not configured: {0}")]
    NotConfigured(String),
}

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }

    /// Invitation sent to a nearby player
    pub fn game_invitation(to: impl Into<String>, game: &str, time: &str, address: &str) -> Self {
        Self::new(
            to,
            format!("Game Invitation: {}", game),
            format!("You're invited to play {} at {} near {}!", game, time, address),
        )
    }

    /// Password reset link
    pub fn password_reset(to: impl Into<String>, reset_url: &str) -> Self {
        Self::new(
            to,
            "Password Reset Request",
            format!(
                "You requested a password reset. Use the link below to set a new password. \
                 The link expires in one hour.\n\n{}",
                reset_url
            ),
        )
    }
}

/// Sends email through whichever provider is configured
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_invitation_wording() {
        let msg = EmailMessage::game_invitation("p@example.com", "Football", "6 PM", "Baner Road");
        assert_eq!(msg.subject, "Game Invitation: Football");
        assert_eq!(msg.text, "You're invited to play Football at 6 PM near Baner Road!");
    }

    #[test]
    fn test_password_reset_contains_link() {
        let msg = EmailMessage::password_reset("p@example.com", "http://localhost/reset/abc");
        assert!(msg.text.contains("http://localhost/reset/abc"));
    }
}
