use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub number: u32,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub number: u32,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

/// Truncates a raw payload for log output.
pub(crate) fn truncate_for_log(text: &str) -> &str {
    let max = 500;
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strips an optional markdown code-fence wrapping from a model reply.
fn strip_code_fence(response: &str) -> &str {
    let mut clean = response.trim();
    if let Some(rest) = clean.strip_prefix("```json") {
        clean = rest;
    }
    if let Some(rest) = clean.strip_suffix("```") {
        clean = rest;
    }
    clean.trim()
}

/// Decodes a model reply and returns the named array field, or `None` when
/// the reply is not valid JSON. A well-formed document without the field is
/// an empty array, not a failure.
fn decode_array_field(response: &str, field: &str) -> Option<Vec<Value>> {
    let clean = strip_code_fence(response);

    let data: Value = match serde_json::from_str(clean) {
        Ok(data) => data,
        Err(e) => {
            error!("JSON parsing error: {}", e);
            error!(
                "Failed to parse response: {}...",
                truncate_for_log(response)
            );
            return None;
        }
    };

    match data.get(field) {
        Some(Value::Array(items)) => Some(items.clone()),
        _ => {
            warn!("No '{}' key found in response data", field);
            Some(Vec::new())
        }
    }
}

fn str_field(item: &Value, field: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn number_field(item: &Value, position: usize) -> u32 {
    item.get("number")
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(position as u32)
}

/// Parses a flashcard reply. Cards missing front or back content are
/// dropped; a reply that is not valid JSON degrades to an empty list.
pub fn parse_flashcards(response: &str) -> Vec<Flashcard> {
    info!("Raw flashcard response: {}...", truncate_for_log(response));

    let Some(raw_flashcards) = decode_array_field(response, "flashcards") else {
        return Vec::new();
    };
    info!("Found {} raw flashcards", raw_flashcards.len());

    let mut flashcards = Vec::new();
    for (i, card) in raw_flashcards.iter().enumerate() {
        let position = i + 1;
        if !card.is_object() {
            continue;
        }

        let flashcard = Flashcard {
            number: number_field(card, position),
            front: str_field(card, "front"),
            back: str_field(card, "back"),
        };

        if !flashcard.front.is_empty() && !flashcard.back.is_empty() {
            flashcards.push(flashcard);
        } else {
            warn!("Skipped flashcard {}: missing front or back content", position);
        }
    }

    info!("Returning {} valid flashcards", flashcards.len());
    flashcards
}

/// Parses a quiz reply. Questions missing question or answer content are
/// dropped; a reply that is not valid JSON degrades to an empty list.
pub fn parse_quiz_questions(response: &str) -> Vec<QuizQuestion> {
    let Some(raw_questions) = decode_array_field(response, "quiz_questions") else {
        return Vec::new();
    };

    let mut quiz_questions = Vec::new();
    for (i, question) in raw_questions.iter().enumerate() {
        let position = i + 1;
        if !question.is_object() {
            continue;
        }

        let options = question
            .get("options")
            .and_then(Value::as_array)
            .map(|opts| {
                opts.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let quiz_question = QuizQuestion {
            number: number_field(question, position),
            question_type: {
                let t = str_field(question, "type");
                if t.is_empty() { "multiple_choice".to_string() } else { t }
            },
            difficulty: {
                let d = str_field(question, "difficulty");
                if d.is_empty() { "medium".to_string() } else { d }
            },
            question: str_field(question, "question"),
            options,
            answer: str_field(question, "answer"),
            explanation: str_field(question, "explanation"),
        };

        if !quiz_question.question.is_empty() && !quiz_question.answer.is_empty() {
            quiz_questions.push(quiz_question);
        } else {
            warn!("Skipped quiz question {}: missing question or answer", position);
        }
    }

    quiz_questions
}
