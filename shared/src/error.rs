use serde_json::Value;
use thiserror::Error;

/// Failures of a call to the MeuFuturo backend.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Erro de conexão: {0}")]
    Network(String),

    /// The backend rejected the session (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-success status and the raw response body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| default_message(status).to_string());
        if status == 401 {
            ApiError::Unauthorized(message)
        } else {
            ApiError::Http { status, message }
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        401 => "Sessão expirada. Faça login novamente.",
        403 => "Acesso negado.",
        404 => "Recurso não encontrado.",
        422 => "Dados de entrada inválidos.",
        429 => "Muitas requisições. Tente novamente em instantes.",
        500..=599 => "Erro interno do servidor.",
        _ => "Erro inesperado.",
    }
}

/// Pull the human-readable message out of an error body.
///
/// The backend wraps messages as `{"error": true, "message": ...}` where
/// `message` is either a string or, for re-raised exceptions, another object
/// of the same shape. FastAPI's own errors use `detail` instead.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    message_from_value(&value)
}

fn message_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(message_from_value)
            .or_else(|| map.get("detail").and_then(message_from_value)),
        _ => None,
    }
}
