use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// What an admin token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Session,
    Recovery,
}

/// JWT claims for admin session and recovery tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Email
    pub uid: i32,    // Admin user ID
    /// `admin_user.token_version` at signing time.
    pub ver: i32,
    pub purpose: Purpose,
    pub exp: usize,
}

/// JWT claims for a brokered client upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadClaims {
    /// Object key the holder may write.
    pub pathname: String,
    pub content_type: String,
    /// Admin user the token was issued to.
    pub uid: i32,
    pub exp: usize,
}

fn expiry(ttl: Duration) -> Result<DateTime<Utc>> {
    Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow!("token expiry out of range"))
}

/// Sign a session or recovery token for an admin user.
pub fn sign(
    user_id: i32,
    email: &str,
    version: i32,
    purpose: Purpose,
    ttl: Duration,
    secret: &str,
) -> Result<String> {
    let claims = Claims {
        sub: email.to_owned(),
        uid: user_id,
        ver: version,
        purpose,
        exp: expiry(ttl)?.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a token, requiring the given purpose.
pub fn verify(token: &str, purpose: Purpose, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if token_data.claims.purpose != purpose {
        return Err(anyhow!("token was not issued for this purpose"));
    }
    Ok(token_data.claims)
}

/// Sign a client upload token bound to one object key and content type.
pub fn sign_upload(
    user_id: i32,
    pathname: &str,
    content_type: &str,
    ttl: Duration,
    secret: &str,
) -> Result<(String, DateTime<Utc>)> {
    let expires_at = expiry(ttl)?;
    let claims = UploadClaims {
        pathname: pathname.to_owned(),
        content_type: content_type.to_owned(),
        uid: user_id,
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

pub fn verify_upload(token: &str, secret: &str) -> Result<UploadClaims> {
    let token_data = decode::<UploadClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
