use poem_openapi::{Object, OpenApi, payload::Json};
use serde_json::Value;

use crate::app_error::{AppError, AppResult, store_failure};
use crate::routes::{QuestionResponse, positive_int};
use crate::services::quiz::{ALL_CATEGORIES_SENTINEL, CategoryScope, QuizSelector};
use crate::state::AppState;

#[derive(Clone)]
pub struct QuizzesApi {
    pub state: AppState,
}

#[derive(Debug)]
struct QuizCategory {
    id: Option<Value>,
    kind: Option<String>,
}

impl QuizCategory {
    /// Expects `{id, type}`; any other shape is unprocessable.
    fn from_value(value: &Value) -> AppResult<Self> {
        let obj = value.as_object().ok_or(AppError::Unprocessable)?;
        let kind = match obj.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(AppError::Unprocessable),
        };
        let id = obj.get("id").filter(|v| !v.is_null()).cloned();
        Ok(Self { id, kind })
    }

    fn scope(&self) -> AppResult<CategoryScope> {
        let kind = self.kind.as_deref();
        if kind == Some(ALL_CATEGORIES_SENTINEL) || is_zero(self.id.as_ref()) {
            return Ok(CategoryScope::All);
        }
        let id = positive_int(self.id.as_ref()).ok_or(AppError::Unprocessable)?;
        Ok(CategoryScope::resolve(id, kind))
    }
}

fn is_zero(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_i64() == Some(0),
        Some(Value::String(s)) => s.trim() == "0",
        _ => false,
    }
}

/// Absent or `null` means nothing was shown yet; otherwise a list of integer ids.
fn previous_ids(value: Option<&Value>) -> AppResult<Vec<i64>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_i64().ok_or(AppError::Unprocessable))
            .collect(),
        Some(_) => Err(AppError::Unprocessable),
    }
}

/// Both fields are loosely typed so a wrong shape surfaces as 422 instead of a parse error.
#[derive(Object, Debug)]
struct PlayQuizRequest {
    /// `{id, type}`; id `0` or type `"click"` selects every category
    quiz_category: Option<Value>,
    /// Ids already shown to the player
    previous_questions: Option<Value>,
}

#[derive(Object, Debug)]
struct PlayQuizResponse {
    success: bool,
    /// `null` once every eligible question has been shown
    question: Option<QuestionResponse>,
}

#[OpenApi]
impl QuizzesApi {
    /// Next random question the player has not seen yet
    #[oai(path = "/quizzes", method = "post")]
    async fn play(&self, Json(body): Json<PlayQuizRequest>) -> poem::Result<Json<PlayQuizResponse>> {
        let category = body
            .quiz_category
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or(AppError::Unprocessable)?;
        let scope = QuizCategory::from_value(category)?.scope()?;
        let previous = previous_ids(body.previous_questions.as_ref())?;

        let question = QuizSelector::new(self.state.store.as_ref())
            .next_question(scope, &previous)
            .await
            .map_err(|e| store_failure("next_question failed", e))?;

        Ok(Json(PlayQuizResponse {
            success: true,
            question: question.map(Into::into),
        }))
    }
}
