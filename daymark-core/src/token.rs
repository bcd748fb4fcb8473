//! Remote-id derivation and sync-token handling.
//!
//! The remote id binds a local profile to one remote snapshot. It is
//! derived deterministically from the login identity so that every device
//! logging in with the same name lands on the same snapshot. It doubles as
//! the user-visible "sync token" for manual cross-device transfer. This is
//! a namespace key, not a secret.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::{DaymarkError, DaymarkResult};

/// Length remote ids are truncated to.
const REMOTE_ID_LEN: usize = 24;

/// Longest token accepted on import.
const MAX_TOKEN_LEN: usize = 64;

/// Derive the remote snapshot id for a login identity.
///
/// Case and surrounding whitespace in the identity are normalized away, so
/// "Alice" and "alice " map to the same snapshot.
pub fn derive_remote_id(identity: &str) -> String {
    let normalized = identity.trim().to_lowercase();
    let encoded = URL_SAFE_NO_PAD.encode(normalized.as_bytes());

    encoded.chars().take(REMOTE_ID_LEN).collect::<String>().to_lowercase()
}

/// Normalize and validate a user-pasted sync token.
///
/// Tokens travel by copy/paste, so stray whitespace and case differences
/// are forgiven; anything outside the id alphabet is rejected before we
/// ever put it in a URL.
pub fn normalize_token(token: &str) -> DaymarkResult<String> {
    let trimmed = token.trim().to_lowercase();

    if trimmed.is_empty() {
        return Err(DaymarkError::InvalidToken("token is empty".to_string()));
    }
    if trimmed.len() > MAX_TOKEN_LEN {
        return Err(DaymarkError::InvalidToken(format!(
            "token is longer than {MAX_TOKEN_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(DaymarkError::InvalidToken(
            "token contains unexpected characters".to_string(),
        ));
    }

    Ok(trimmed)
}
