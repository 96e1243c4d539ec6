use super::types::{ApiError, FlashcardResponse, QuizResponse};
use crate::{
    Error,
    agent::{MaterialKind, Runner},
    config::Config,
    content::{self, UploadedFile},
    parse,
};
use axum::{Json, extract::Multipart, extract::State, response::IntoResponse};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<Runner>,
    pub config: Arc<Config>,
}

/// Root endpoint with API information.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "StudyWithAI API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Generate flashcards and quizzes from educational content",
        "endpoints": {
            "POST /generate-flashcards": "Generate flashcards from prompt and optional files",
            "POST /generate-quiz": "Generate quiz from prompt and optional files",
            "GET /health": "Health check endpoint"
        }
    }))
}

/// Health check endpoint. Constant payload, no dependency on the agent
/// runtime.
pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy", "service": "StudyWithAI API"}))
}

/// The validated multipart form of a generation request.
struct GenerationForm {
    prompt: String,
    num_items: u32,
    files: Vec<UploadedFile>,
}

/// Reads the multipart form shared by both generation endpoints. `count_field`
/// names the per-endpoint item count field; `default_count` applies when it
/// is absent.
async fn read_generation_form(
    mut multipart: Multipart,
    count_field: &str,
    default_count: u32,
) -> Result<GenerationForm, Error> {
    let mut prompt: Option<String> = None;
    let mut num_items: Option<u32> = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Invalid multipart form: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "prompt" {
            let value = field
                .text()
                .await
                .map_err(|e| Error::validation(format!("Invalid prompt field: {e}")))?;
            prompt = Some(value);
        } else if name == count_field {
            let value = field
                .text()
                .await
                .map_err(|e| Error::validation(format!("Invalid {count_field} field: {e}")))?;
            let count: i64 = value
                .trim()
                .parse()
                .map_err(|_| Error::validation(format!("{count_field} must be an integer")))?;
            if count < 1 {
                return Err(Error::validation(format!(
                    "{count_field} must be a positive integer"
                )));
            }
            num_items = Some(count as u32);
        } else if name == "files" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::validation(format!("Failed to read uploaded file: {e}")))?;
            files.push(UploadedFile::new(filename, data.to_vec()));
        }
    }

    let prompt = prompt.ok_or_else(|| Error::validation("Missing required form field: prompt"))?;
    if prompt.trim().is_empty() {
        return Err(Error::validation("Form field 'prompt' must not be empty"));
    }

    Ok(GenerationForm {
        prompt,
        num_items: num_items.unwrap_or(default_count),
        files,
    })
}

/// Generate flashcards from prompt and optional PDF files.
pub async fn generate_flashcards(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FlashcardResponse>, ApiError> {
    let form = read_generation_form(
        multipart,
        "num_flashcards",
        state.config.generation.default_num_flashcards,
    )
    .await?;

    info!(
        "Flashcard request: {} files, {} cards requested",
        form.files.len(),
        form.num_items
    );

    let content = content::assemble(&form.prompt, &form.files)?;

    // Fresh session per call: the endpoint is stateless from the caller's
    // perspective.
    let session_id = Uuid::new_v4().to_string();

    let response = state
        .runner
        .generate(&content, MaterialKind::Flashcards, &session_id, form.num_items)
        .await
        .inspect_err(|e| error!("Flashcard generation failed for session {session_id}: {e}"))?;

    let flashcards = parse::parse_flashcards(&response);

    Ok(Json(FlashcardResponse {
        success: true,
        message: format!("Generated {} flashcards successfully", flashcards.len()),
        session_id,
        flashcards,
    }))
}

/// Generate a quiz from prompt and optional PDF files.
pub async fn generate_quiz(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuizResponse>, ApiError> {
    let form = read_generation_form(
        multipart,
        "num_questions",
        state.config.generation.default_num_questions,
    )
    .await?;

    info!(
        "Quiz request: {} files, {} questions requested",
        form.files.len(),
        form.num_items
    );

    let content = content::assemble(&form.prompt, &form.files)?;

    let session_id = Uuid::new_v4().to_string();

    let response = state
        .runner
        .generate(&content, MaterialKind::Quiz, &session_id, form.num_items)
        .await
        .inspect_err(|e| error!("Quiz generation failed for session {session_id}: {e}"))?;

    let quiz_questions = parse::parse_quiz_questions(&response);

    Ok(Json(QuizResponse {
        success: true,
        message: format!(
            "Generated {} quiz questions successfully",
            quiz_questions.len()
        ),
        session_id,
        quiz_questions,
    }))
}
