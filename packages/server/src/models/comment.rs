use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Public comment form submission.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub content: String,
}

/// Trimmed, validated comment fields.
#[derive(Debug, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub content: String,
}

/// Why a comment was not posted. The code travels in the redirect query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStatus {
    Posted,
    MissingFields,
    InvalidEmail,
    Failed,
}

impl CommentStatus {
    pub fn code(self) -> &'static str {
        match self {
            Self::Posted => "posted",
            Self::MissingFields => "missing_fields",
            Self::InvalidEmail => "invalid_email",
            Self::Failed => "failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "posted" => Some(Self::Posted),
            "missing_fields" => Some(Self::MissingFields),
            "invalid_email" => Some(Self::InvalidEmail),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Posted => "Comment submitted successfully!",
            Self::MissingFields => "All fields are required.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::Failed => "Error adding comment, please try again later.",
        }
    }

    pub fn is_error(self) -> bool {
        self != Self::Posted
    }
}

static EMAIL: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    match EMAIL.as_ref() {
        Ok(re) => re.is_match(email),
        Err(e) => {
            tracing::error!("Email pattern failed to compile: {e}");
            false
        }
    }
}

pub fn validate_comment(form: &CommentForm) -> Result<NewComment, CommentStatus> {
    let name = form.name.trim();
    let email = form.email.trim();
    let content = form.content.trim();

    if name.is_empty() || email.is_empty() || content.is_empty() {
        return Err(CommentStatus::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(CommentStatus::InvalidEmail);
    }

    Ok(NewComment {
        name: name.to_string(),
        email: email.to_string(),
        content: content.to_string(),
    })
}
