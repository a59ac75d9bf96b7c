use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{Category, NewQuestion, Question};
use crate::services::pagination::PageWindow;

pub mod category_repo;
pub mod memory;
pub mod question_repo;

use category_repo::CategoryRepo;
use question_repo::QuestionRepo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("question {0} not found")]
    QuestionNotFound(i64),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Predicates applied to question queries. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Case-insensitive substring of the question text.
    pub search: Option<String>,
    pub category: Option<i64>,
    /// Ids that must not be returned.
    pub exclude: Vec<i64>,
}

impl QuestionFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn in_category(category: i64) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude.extend(ids);
        self
    }

    pub fn matches(&self, q: &Question) -> bool {
        if let Some(term) = &self.search {
            if !q.question.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if q.category != category {
                return false;
            }
        }
        !self.exclude.contains(&q.id)
    }
}

/// Persistence seen by the handlers. Results are ordered by id ascending.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        window: Option<PageWindow>,
    ) -> StoreResult<Vec<Question>>;

    async fn count_questions(&self, filter: &QuestionFilter) -> StoreResult<i64>;

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>>;

    async fn insert_question(&self, new: NewQuestion) -> StoreResult<Question>;

    /// Fails with [`StoreError::QuestionNotFound`] when nothing was deleted.
    async fn delete_question(&self, id: i64) -> StoreResult<()>;
}

pub type DynStore = Arc<dyn TriviaStore>;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    questions: QuestionRepo,
    categories: CategoryRepo,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            questions: QuestionRepo::new(pool.clone()),
            categories: CategoryRepo::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.list_categories().await?)
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        window: Option<PageWindow>,
    ) -> StoreResult<Vec<Question>> {
        Ok(self.questions.list_questions(filter, window).await?)
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> StoreResult<i64> {
        Ok(self.questions.count_questions(filter).await?)
    }

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.questions.get_question(id).await?)
    }

    async fn insert_question(&self, new: NewQuestion) -> StoreResult<Question> {
        Ok(self.questions.insert_question(&new).await?)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<()> {
        match self.questions.delete_question(id).await? {
            0 => Err(StoreError::QuestionNotFound(id)),
            _ => Ok(()),
        }
    }
}
