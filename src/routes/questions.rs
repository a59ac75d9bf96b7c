use std::collections::BTreeMap;

use poem_openapi::{Object, OpenApi, param::Path, param::Query, payload::Json};
use serde_json::Value;
use tracing::info;

use crate::app_error::{AppError, AppResult, store_failure};
use crate::models::NewQuestion;
use crate::repos::QuestionFilter;
use crate::routes::{QuestionResponse, category_map, path_id, positive_int};
use crate::services::pagination::Page;
use crate::state::AppState;

pub struct QuestionsApi {
    pub state: AppState,
}

#[derive(Object, Debug)]
struct QuestionPageResponse {
    success: bool,
    questions: Vec<QuestionResponse>,
    #[oai(rename = "totalQuestions")]
    total_questions: i64,
    categories: BTreeMap<String, String>,
    #[oai(rename = "currentCategory")]
    current_category: Option<String>,
}

/// Fields are optional so that missing ones surface as 422 instead of a parse error.
#[derive(Object, Debug)]
struct CreateQuestionRequest {
    question: Option<String>,
    answer: Option<String>,
    /// Integer or numeric string
    difficulty: Option<Value>,
    /// Category id, integer or numeric string
    category: Option<Value>,
}

impl CreateQuestionRequest {
    /// Every field must be present and truthy.
    fn validate(self) -> AppResult<NewQuestion> {
        let question = self.question.filter(|s| !s.is_empty());
        let answer = self.answer.filter(|s| !s.is_empty());
        let difficulty = positive_int(self.difficulty.as_ref()).and_then(|d| i32::try_from(d).ok());
        let category = positive_int(self.category.as_ref());

        match (question, answer, difficulty, category) {
            (Some(question), Some(answer), Some(difficulty), Some(category)) => Ok(NewQuestion {
                question,
                answer,
                difficulty,
                category,
            }),
            _ => Err(AppError::Unprocessable),
        }
    }
}

#[derive(Object, Debug)]
struct CreateQuestionResponse {
    success: bool,
    question: QuestionResponse,
}

#[derive(Object, Debug)]
struct DeleteQuestionResponse {
    success: bool,
    id: i64,
}

#[derive(Object, Debug)]
struct SearchQuestionsRequest {
    #[oai(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Object, Debug)]
struct SearchQuestionsResponse {
    success: bool,
    current_category: Option<String>,
    questions: Vec<QuestionResponse>,
    total_questions: i64,
}

#[OpenApi]
impl QuestionsApi {
    /// One page of questions plus the category table. 404 when the page is empty.
    #[oai(path = "/questions", method = "get")]
    async fn list_questions(
        &self,
        page: Query<Option<String>>,
    ) -> poem::Result<Json<QuestionPageResponse>> {
        let store = self.state.store.as_ref();
        let everything = QuestionFilter::default();
        let window = Page::parse_lenient(page.0.as_deref())
            .window()
            .ok_or(AppError::NotFound)?;

        let questions = store
            .list_questions(&everything, Some(window))
            .await
            .map_err(|e| store_failure("list_questions failed", e))?;
        if questions.is_empty() {
            return Err(AppError::NotFound.into());
        }

        let categories = store
            .list_categories()
            .await
            .map_err(|e| store_failure("list_categories failed", e))?;
        let Some(first) = categories.first() else {
            return Err(AppError::NotFound.into());
        };

        let total_questions = store
            .count_questions(&everything)
            .await
            .map_err(|e| store_failure("count_questions failed", e))?;

        Ok(Json(QuestionPageResponse {
            success: true,
            current_category: Some(first.kind.clone()),
            categories: category_map(&categories),
            questions: questions.into_iter().map(Into::into).collect(),
            total_questions,
        }))
    }

    #[oai(path = "/questions", method = "post")]
    async fn create_question(
        &self,
        Json(body): Json<CreateQuestionRequest>,
    ) -> poem::Result<Json<CreateQuestionResponse>> {
        let new = body.validate()?;

        let question = self
            .state
            .store
            .insert_question(new)
            .await
            .map_err(|e| store_failure("insert_question failed", e))?;
        info!(id = question.id, category = question.category, "question created");

        Ok(Json(CreateQuestionResponse {
            success: true,
            question: question.into(),
        }))
    }

    #[oai(path = "/questions/:id", method = "delete")]
    async fn delete_question(&self, id: Path<String>) -> poem::Result<Json<DeleteQuestionResponse>> {
        let id = path_id(&id.0)?;

        self.state
            .store
            .delete_question(id)
            .await
            .map_err(|e| store_failure("delete_question failed", e))?;
        info!(id, "question deleted");

        Ok(Json(DeleteQuestionResponse { success: true, id }))
    }

    /// Case-insensitive substring search. Zero matches is still a success.
    #[oai(path = "/questions/search", method = "post")]
    async fn search_questions(
        &self,
        page: Query<Option<String>>,
        Json(body): Json<SearchQuestionsRequest>,
    ) -> poem::Result<Json<SearchQuestionsResponse>> {
        let term = body
            .search_term
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unprocessable)?;
        let store = self.state.store.as_ref();
        let filter = QuestionFilter::search(term);

        let questions = match Page::parse_lenient(page.0.as_deref()).window() {
            Some(window) => store
                .list_questions(&filter, Some(window))
                .await
                .map_err(|e| store_failure("search_questions failed", e))?,
            None => Vec::new(),
        };
        let total_questions = store
            .count_questions(&filter)
            .await
            .map_err(|e| store_failure("count_questions failed", e))?;
        let categories = store
            .list_categories()
            .await
            .map_err(|e| store_failure("list_categories failed", e))?;

        Ok(Json(SearchQuestionsResponse {
            success: true,
            current_category: categories.into_iter().next().map(|c| c.kind),
            questions: questions.into_iter().map(Into::into).collect(),
            total_questions,
        }))
    }
}
