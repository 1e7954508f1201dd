use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::convert::ConversionError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Render(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RENDER_ERROR",
                e.to_string(),
            ),
            AppError::Conversion(ConversionError::TempResource(e)) => {
                tracing::error!("Temporary file error during conversion: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMP_RESOURCE_ERROR",
                    "A temporary file error occurred".to_string(),
                )
            }
            AppError::Conversion(ConversionError::TimedOut(limit)) => {
                tracing::error!("PDF conversion timed out after {limit:?}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "CONVERSION_TIMEOUT",
                    "PDF conversion took too long".to_string(),
                )
            }
            AppError::Conversion(e) => {
                tracing::error!("PDF conversion failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "CONVERSION_FAILED",
                    "The PDF could not be generated".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_each_variant_maps_to_its_status_and_code() {
        let cases = [
            (
                AppError::Validation("bad body".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                AppError::Render(RenderError::Package("zip".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
                "RENDER_ERROR",
            ),
            (
                AppError::Conversion(ConversionError::TempResource(std::io::Error::other("disk"))),
                StatusCode::INTERNAL_SERVER_ERROR,
                "TEMP_RESOURCE_ERROR",
            ),
            (
                AppError::Conversion(ConversionError::TimedOut(Duration::from_secs(60))),
                StatusCode::GATEWAY_TIMEOUT,
                "CONVERSION_TIMEOUT",
            ),
            (
                AppError::Conversion(ConversionError::NoOutput),
                StatusCode::BAD_GATEWAY,
                "CONVERSION_FAILED",
            ),
        ];

        for (error, status, code) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), status);
            assert_eq!(error_body(response).await["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn test_conversion_details_are_not_leaked() {
        let response = AppError::Conversion(ConversionError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "/tmp/resume-convert-x/resume.docx: bad".to_string(),
        })
        .into_response();
        let body = error_body(response).await;
        assert_eq!(body["error"]["message"], "The PDF could not be generated");
    }
}
