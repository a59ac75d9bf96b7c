use std::collections::BTreeMap;

use poem::middleware::Tracing;
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::{Object, OpenApiService};
use serde_json::Value;

use crate::app_error::{AppError, AppResult, render_error};
use crate::models::{Category, Question};
use crate::state::AppState;

pub mod categories;
pub mod health_check;
pub mod questions;
pub mod quizzes;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    id: i64,
    question: String,
    answer: String,
    difficulty: i32,
    category: i64,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            difficulty: q.difficulty,
            category: q.category,
        }
    }
}

/// `{id: type}` as the game client expects it.
fn category_map(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|c| (c.id.to_string(), c.kind.clone()))
        .collect()
}

/// Accepts a JSON integer or a numeric string. Zero, negatives, and anything
/// else count as absent.
fn positive_int(value: Option<&Value>) -> Option<i64> {
    let n = match value? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (n > 0).then_some(n)
}

/// Path ids that are not integers behave like an unmatched route.
fn path_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::NotFound)
}

pub fn build_app(state: AppState, server_url: String) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (
            health_check::HealthCheckApi {
                state: state.clone(),
            },
            categories::CategoriesApi {
                state: state.clone(),
            },
            questions::QuestionsApi {
                state: state.clone(),
            },
            quizzes::QuizzesApi { state },
        ),
        "Trivia API",
        "1.0",
    )
    .server(server_url);

    // Swagger UI for testing & docs
    let swagger = api_service.swagger_ui();

    Route::new()
        .nest(API_PREFIX, api_service)
        .nest("/", swagger)
        .catch_all_error(render_error)
        .with(Tracing)
}
