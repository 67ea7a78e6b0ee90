use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use itinex_core::{DocumentError, ItinexError, PipelineError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Internal(String),
}

impl From<ItinexError> for ApiError {
    fn from(err: ItinexError) -> Self {
        match &err {
            ItinexError::Document(DocumentError::UnsupportedFormat(name)) => {
                ApiError::BadRequest(format!("formato de archivo no soportado: {name}"))
            }
            ItinexError::Document(_) | ItinexError::Pipeline(PipelineError::NoText) => {
                ApiError::Unprocessable(user_message(&err))
            }
            _ => {
                tracing::error!(error = %err, "pipeline failure");
                ApiError::Internal(user_message(&err))
            }
        }
    }
}

/// Human-readable message for the caller. Never a stack trace.
pub fn user_message(err: &ItinexError) -> String {
    match err {
        ItinexError::Document(DocumentError::UnsupportedFormat(name)) => {
            format!("formato de archivo no soportado: {name}")
        }
        ItinexError::Document(_) => {
            "no se pudo extraer texto del documento".to_string()
        }
        ItinexError::Pipeline(PipelineError::NoText) => {
            "el documento no contiene texto extraíble".to_string()
        }
        ItinexError::Pipeline(PipelineError::Cancelled) => {
            "la extracción fue cancelada".to_string()
        }
        _ => "error inesperado procesando el documento".to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = axum::Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
