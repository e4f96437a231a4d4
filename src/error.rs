//! Chineur error types

use std::time::Duration;

/// Chineur error types
#[derive(Debug, thiserror::Error)]
pub enum ChineurError {
    // Client input errors
    #[error("invalid keyword")]
    InvalidKeyword,

    #[error("unknown category: {0}")]
    InvalidCategory(String),

    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("invalid upstream parameter: {0}")]
    InvalidParameter(String),

    #[error("missing upstream parameter: {0}")]
    MissingParameter(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ChineurError {
    /// HTTP status the endpoint boundary responds with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidKeyword
            | Self::InvalidCategory(_)
            | Self::InvalidParameter(_)
            | Self::MissingParameter(_) => 400,
            Self::AuthenticationFailed => 401,
            Self::RateLimited { .. } => 429,
            Self::Timeout(_) => 504,
            _ => 500,
        }
    }

    /// User-facing message for the JSON error body.
    ///
    /// Messages are French, matching what the frontend displays inline.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidKeyword => "Mot-clé invalide",
            Self::InvalidCategory(_) => "Catégorie non valide",
            Self::InvalidParameter(_) | Self::MissingParameter(_) => "Requête Amazon invalide",
            Self::AuthenticationFailed => "Authentification Amazon refusée",
            Self::RateLimited { .. } => "Trop de requêtes vers l'API Amazon",
            Self::Timeout(_) => "L'API Amazon n'a pas répondu à temps",
            _ => "Erreur lors de l'appel à l'API Amazon",
        }
    }

    /// Whether this is a client input error (no `details` in the body).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidKeyword | Self::InvalidCategory(_))
    }
}

/// Result type alias for Chineur operations
pub type Result<T> = std::result::Result<T, ChineurError>;
