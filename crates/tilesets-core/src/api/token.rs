// crates/tilesets-core/src/api/token.rs

//! Reads the account name out of an access token.
//!
//! Tokens are JWT-shaped (`prefix.payload.signature`); the payload is a
//! base64 JSON object whose `u` claim is the username. Padding is optional.

use crate::error::{Result, TilesetsError};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;

pub fn token_username(token: &str) -> Result<String> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| TilesetsError::Token(format!("Token {token} does not contain a payload component")))?;

    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| TilesetsError::Token(format!("Token {token} has an undecodable payload: {e}")))?;
    let body: Value = serde_json::from_slice(&bytes)?;

    body.get("u")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TilesetsError::Token(format!("Token {token} does not contain a username")))
}

/// Fails unless the token belongs to `username`.
pub fn ensure_token_username(token: &str, username: &str) -> Result<()> {
    let owner = token_username(token)?;
    if owner != username {
        return Err(TilesetsError::Token(format!(
            "Token username {owner} does not match username {username}"
        )));
    }
    Ok(())
}
