use serde::Deserialize;

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const PASSWORD_UPDATED: &str = "Password updated successfully!";
pub const PASSWORD_RESET_DONE: &str =
    "Your password has been updated successfully. Redirecting to login page...";
pub const RESET_EMAIL_SENT: &str = "Password reset email sent. Please check your inbox.";

/// Admin login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request for a password reset link.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
}

/// New password entered twice.
#[derive(Debug, Deserialize)]
pub struct NewPasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// URL fragment of a recovery link, posted by the reset page's script.
#[derive(Debug, Deserialize)]
pub struct RecoverySessionForm {
    #[serde(default)]
    pub fragment: String,
}

impl NewPasswordForm {
    pub fn validate(&self) -> Result<&str, AppError> {
        if self.password != self.confirm_password {
            return Err(AppError::Validation("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(&self.password)
    }
}
