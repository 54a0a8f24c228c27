use std::fmt::Display;

pub const NO_SESSION: &str =
    "No valid session found. Please use the password reset link sent to your email.";
pub const NOT_ESTABLISHED: &str =
    "Failed to establish a valid session. Please try resetting your password again.";

/// Parameters carried in the fragment of a password recovery link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecoveryFragment {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub kind: Option<String>,
}

impl RecoveryFragment {
    /// A fragment only starts a recovery when it carries a token and `type=recovery`.
    pub fn is_recovery(&self) -> bool {
        !self.access_token.is_empty() && self.kind.as_deref() == Some("recovery")
    }
}

/// Parse `#access_token=..&refresh_token=..&token_type=..&type=recovery`.
///
/// Returns `None` when no access token is present.
pub fn parse_fragment(fragment: &str) -> Option<RecoveryFragment> {
    let fragment = fragment.trim().trim_start_matches('#');
    let mut parsed = RecoveryFragment::default();

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => parsed.access_token = value.into_owned(),
            "refresh_token" => parsed.refresh_token = Some(value.into_owned()),
            "token_type" => parsed.token_type = Some(value.into_owned()),
            "type" => parsed.kind = Some(value.into_owned()),
            _ => {}
        }
    }

    if parsed.access_token.is_empty() {
        None
    } else {
        Some(parsed)
    }
}

/// Result of exchanging a recovery link for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Established,
    SessionError(String),
    NotEstablished,
    NoSession,
}

impl RecoveryOutcome {
    /// Classify an exchange attempt. `None` means the link carried no
    /// recovery token; `Some(Ok(false))` means the token was accepted but
    /// did not resolve to an account.
    pub fn classify<E: Display>(exchange: Option<Result<bool, E>>) -> Self {
        match exchange {
            None => Self::NoSession,
            Some(Err(e)) => Self::SessionError(e.to_string()),
            Some(Ok(false)) => Self::NotEstablished,
            Some(Ok(true)) => Self::Established,
        }
    }

    /// Message shown on the reset page, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Established => None,
            Self::SessionError(reason) => Some(format!("Error setting session: {reason}")),
            Self::NotEstablished => Some(NOT_ESTABLISHED.to_string()),
            Self::NoSession => Some(NO_SESSION.to_string()),
        }
    }
}

/// Link mailed to an admin who asked for a password reset.
pub fn recovery_link(public_url: &str, token: &str) -> String {
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("access_token", token)
        .append_pair("token_type", "bearer")
        .append_pair("type", "recovery")
        .finish();
    format!(
        "{}/admin/reset-password#{encoded}",
        public_url.trim_end_matches('/')
    )
}
