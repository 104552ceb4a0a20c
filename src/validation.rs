//! Session id validation and filename helpers

/// Longest session id accepted by the stores.
pub const MAX_SESSION_ID_LEN: usize = 64;

/// Session id validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    #[error("Session id is empty")]
    Empty,

    #[error("Session id is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Session id contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Validate a session id: ASCII letters, digits, `-` and `_`, at most
/// [`MAX_SESSION_ID_LEN`] characters. Uuid strings always pass.
pub fn validate_session_id(id: &str) -> Result<&str, SessionIdError> {
    if id.is_empty() {
        return Err(SessionIdError::Empty);
    }
    if id.len() > MAX_SESSION_ID_LEN {
        return Err(SessionIdError::TooLong {
            max: MAX_SESSION_ID_LEN,
        });
    }
    let bad: String = id
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .collect();
    if !bad.is_empty() {
        return Err(SessionIdError::InvalidCharacters { chars: bad });
    }
    Ok(id)
}

/// Generate a fresh session id.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Percent-encode a session id so it is always a single safe path component.
pub fn safe_filename(session_id: &str) -> String {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    utf8_percent_encode(session_id, NON_ALPHANUMERIC).to_string()
}
