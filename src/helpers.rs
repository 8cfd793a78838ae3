// Client-side checks run before a request leaves the process.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::TokenError;

#[derive(Deserialize)]
struct Claims {
    exp: Option<serde_json::Value>,
}

/// Fail if the bearer token's `exp` claim is in the past.
///
/// The signature is not verified; the server remains the authority. This
/// only saves a round trip when the operator's token has obviously lapsed.
pub fn check_token_expiration(token: &str) -> Result<(), TokenError> {
    check_token_expiration_at(token, chrono::Utc::now().timestamp())
}

pub(crate) fn check_token_expiration_at(token: &str, now: i64) -> Result<(), TokenError> {
    let exp = token_expiry(token)?;
    if exp <= now {
        tracing::debug!(exp, now, "access token expired");
        return Err(TokenError::Expired);
    }
    Ok(())
}

fn token_expiry(token: &str) -> Result<i64, TokenError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(TokenError::Malformed(
                "expected three dot-separated segments".into(),
            ))
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Malformed(format!("invalid payload encoding: {e}")))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("invalid payload: {e}")))?;

    let exp = claims
        .exp
        .ok_or_else(|| TokenError::Malformed("missing exp claim".into()))?;
    numeric_date(&exp)
        .ok_or_else(|| TokenError::Malformed(format!("exp claim is not a number: {exp}")))
}

/// NumericDate seconds, truncated. Issuers send integers, fractions, or
/// decimal strings.
fn numeric_date(value: &serde_json::Value) -> Option<i64> {
    let secs = match value {
        serde_json::Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64())?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    secs.is_finite().then(|| secs.trunc() as i64)
}

/// Reject filepaths containing characters that are unsafe to embed in a
/// request. Reports every offending character.
pub fn check_valid_chars(filepath: &str) -> Result<(), String> {
    let disallowed: Vec<String> = filepath
        .chars()
        .filter(|c| is_disallowed(*c))
        .map(|c| format!("{:?}", c))
        .collect();

    if disallowed.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "filepath '{}' contains disallowed characters: {}",
            filepath.escape_debug(),
            disallowed.join(", ")
        ))
    }
}

fn is_disallowed(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\\' | '<'
                | '>'
                | '"'
                | '|'
                | '!'
                | '*'
                | '\''
                | '('
                | ')'
                | ';'
                | ':'
                | '@'
                | '&'
                | '='
                | '+'
                | '$'
                | ','
                | '?'
                | '%'
                | '#'
                | '['
                | ']'
        )
}
