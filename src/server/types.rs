use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::parse::{Flashcard, QuizQuestion};

#[derive(Debug, Serialize, Deserialize)]
pub struct FlashcardResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
    pub quiz_questions: Vec<QuizQuestion>,
}

/// Error envelope returned for every 4xx/5xx response. Always JSON, never
/// bare text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

/// Wraps crate errors for the HTTP boundary: client-side failures map to
/// 400, everything else to 500.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            message: self.0.to_string(),
            error: format!("HTTP {}", status.as_u16()),
        };
        (status, Json(body)).into_response()
    }
}
