//! Document upload endpoint: one file in, one structured plan out,
//! optionally as a progress-streaming NDJSON response.

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use itinex_core::{
    ChannelSink, DocumentFormat, ExtractedPlan, ExtractionSource, ItinexError, NullSink,
    PipelineError, ProgressEvent, ProgressSink,
};

use crate::error::{user_message, ApiError};
use crate::state::AppState;

/// Upload size cap: 50 MB.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn routes() -> Router<AppState> {
    // The body limit carries some slack above the file cap so oversize
    // uploads reach the handler and get the descriptive 400 instead of a
    // bare 413 from the limit layer.
    Router::new()
        .route("/plans/extract", post(extract))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024))
}

#[derive(Debug, Serialize)]
struct ExtractResponse {
    plan: ExtractedPlan,
    source: ExtractionSource,
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut stream_mode = false;
    let mut advisor: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("carga multipart inválida: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("no se pudo leer el archivo: {e}")))?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            "stream" => {
                let value = field.text().await.unwrap_or_default();
                stream_mode = matches!(value.trim(), "true" | "1");
            }
            "advisor" => {
                let value = field.text().await.unwrap_or_default();
                let value = value.trim();
                if !value.is_empty() {
                    advisor = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| {
        ApiError::BadRequest("no se adjuntó ningún archivo".to_string())
    })?;

    if file.data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(
            "el archivo supera el límite de 50 MB".to_string(),
        ));
    }

    let format = DocumentFormat::detect(&file.filename, file.content_type.as_deref())
        .map_err(|_| {
            ApiError::BadRequest(format!(
                "formato de archivo no soportado: {}",
                file.filename
            ))
        })?;

    tracing::info!(
        filename = %file.filename,
        size = file.data.len(),
        streaming = stream_mode,
        "extraction request"
    );

    if stream_mode {
        Ok(stream_response(state, file.data, format, advisor))
    } else {
        let orchestrator = state.orchestrator();
        let mut sink = NullSink;
        let outcome = orchestrator
            .run(&file.data, format, advisor.as_deref(), &mut sink)
            .await
            .map_err(ApiError::from)?;

        Ok(Json(ExtractResponse {
            plan: outcome.plan,
            source: outcome.source,
        })
        .into_response())
    }
}

/// Chunked NDJSON response. The pipeline runs in its own task and feeds
/// the body through a channel; a disconnected client drops the receiver,
/// which stops the pipeline without further writes. Failures after the
/// stream has begun still end with a final error line.
fn stream_response(
    state: AppState,
    data: Bytes,
    format: DocumentFormat,
    advisor: Option<String>,
) -> Response {
    let (tx, rx) = mpsc::channel::<String>(32);

    tokio::spawn(async move {
        let orchestrator = state.orchestrator();
        let mut sink = ChannelSink::new(tx.clone());
        match orchestrator
            .run(&data, format, advisor.as_deref(), &mut sink)
            .await
        {
            Ok(_) => {}
            Err(ItinexError::Pipeline(PipelineError::Cancelled)) => {
                tracing::debug!("client disconnected mid-stream");
            }
            Err(e) => {
                let mut error_sink = ChannelSink::new(tx);
                let _ = error_sink.emit(ProgressEvent::error(user_message(&e))).await;
            }
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    ([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response()
}
