//! In-process [`TriviaStore`] used by the test suite and by `DATABASE_URL=memory://`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Category, NewQuestion, Question};
use crate::repos::{QuestionFilter, StoreError, StoreResult, TriviaStore};
use crate::services::pagination::PageWindow;

pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    questions: Vec<Question>,
    last_question_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Store holding the same categories the migrations seed.
    pub fn with_default_categories() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES)
    }

    /// Categories get ids 1, 2, ... in order.
    pub fn with_categories<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = kinds
            .into_iter()
            .zip(1..)
            .map(|(kind, id)| Category {
                id,
                kind: kind.into(),
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                categories,
                ..Tables::default()
            }),
        }
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        window: Option<PageWindow>,
    ) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        let matching: Vec<Question> = tables
            .questions
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();

        Ok(match window {
            Some(window) => window.slice(&matching),
            None => matching,
        })
    }

    async fn count_questions(&self, filter: &QuestionFilter) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        let count = tables.questions.iter().filter(|q| filter.matches(q)).count();
        Ok(count as i64)
    }

    async fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        let tables = self.tables.read().await;
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn insert_question(&self, new: NewQuestion) -> StoreResult<Question> {
        let mut tables = self.tables.write().await;
        tables.last_question_id += 1;
        let question = new.into_question(tables.last_question_id);
        // ids only grow, so pushing keeps the id order
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let pos = tables
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::QuestionNotFound(id))?;
        tables.questions.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            difficulty: 2,
            category,
        }
    }

    #[tokio::test]
    async fn seeds_default_categories_in_order() {
        let store = MemoryStore::with_default_categories();
        let categories = store.list_categories().await.unwrap();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::with_default_categories();
        let a = store.insert_question(new_question("a", 1)).await.unwrap();
        let b = store.insert_question(new_question("b", 1)).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.get_question(2).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::default();
        store.insert_question(new_question("a", 1)).await.unwrap();
        store.delete_question(1).await.unwrap();
        let b = store.insert_question(new_question("b", 1)).await.unwrap();

        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn delete_missing_question_is_an_error() {
        let store = MemoryStore::default();
        let err = store.delete_question(42).await.unwrap_err();

        assert!(matches!(err, StoreError::QuestionNotFound(42)));
    }

    #[tokio::test]
    async fn windowed_listing_and_count_share_the_filter() {
        let store = MemoryStore::with_default_categories();
        for i in 0..15 {
            let text = if i % 3 == 0 { "Which title?" } else { "Who?" };
            store.insert_question(new_question(text, 1)).await.unwrap();
        }
        let filter = QuestionFilter::search("title");
        let window = PageWindow {
            offset: 0,
            limit: 3,
        };

        let page = store.list_questions(&filter, Some(window)).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|q| q.id).collect();

        assert_eq!(ids, vec![1, 4, 7]);
        assert_eq!(store.count_questions(&filter).await.unwrap(), 5);
    }
}
