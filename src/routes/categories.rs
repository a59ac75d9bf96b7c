use std::collections::BTreeMap;

use poem_openapi::{Object, OpenApi, param::Path, payload::Json};

use crate::app_error::{AppError, store_failure, store_failure_as};
use crate::repos::QuestionFilter;
use crate::routes::{QuestionResponse, category_map, path_id};
use crate::state::AppState;

pub struct CategoriesApi {
    pub state: AppState,
}

#[derive(Object, Debug)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<String, String>,
}

#[derive(Object, Debug)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<QuestionResponse>,
    total_questions: i64,
    current_category: i64,
}

#[OpenApi]
impl CategoriesApi {
    /// All categories as `{id: type}`
    #[oai(path = "/categories", method = "get")]
    async fn list_categories(&self) -> poem::Result<Json<CategoriesResponse>> {
        let categories = self
            .state
            .store
            .list_categories()
            .await
            .map_err(|e| store_failure("list_categories failed", e))?;
        if categories.is_empty() {
            return Err(AppError::NotFound.into());
        }

        Ok(Json(CategoriesResponse {
            success: true,
            categories: category_map(&categories),
        }))
    }

    /// Every question of one category, unpaginated.
    #[oai(path = "/categories/:category_id/questions", method = "get")]
    async fn questions_by_category(
        &self,
        category_id: Path<String>,
    ) -> poem::Result<Json<CategoryQuestionsResponse>> {
        let category_id = path_id(&category_id.0)?;

        let questions = self
            .state
            .store
            .list_questions(&QuestionFilter::in_category(category_id), None)
            .await
            .map_err(|e| store_failure_as("questions_by_category failed", e, AppError::NotFound))?;

        Ok(Json(CategoryQuestionsResponse {
            success: true,
            total_questions: questions.len() as i64,
            questions: questions.into_iter().map(Into::into).collect(),
            current_category: category_id,
        }))
    }
}
