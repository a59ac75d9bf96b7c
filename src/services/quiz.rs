use crate::models::Question;
use crate::repos::{QuestionFilter, StoreResult, TriviaStore};
use crate::services::rand::pick_uniform;

/// Category type the game client sends when the player picks "ALL".
pub const ALL_CATEGORIES_SENTINEL: &str = "click";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    All,
    Only(i64),
}

impl CategoryScope {
    /// Id 0 never names a stored category, so it widens to every category too.
    pub fn resolve(id: i64, kind: Option<&str>) -> Self {
        if kind == Some(ALL_CATEGORIES_SENTINEL) || id == 0 {
            Self::All
        } else {
            Self::Only(id)
        }
    }

    fn filter(self) -> QuestionFilter {
        match self {
            Self::All => QuestionFilter::default(),
            Self::Only(id) => QuestionFilter::in_category(id),
        }
    }
}

pub struct QuizSelector<'a> {
    store: &'a dyn TriviaStore,
}

impl<'a> QuizSelector<'a> {
    pub fn new(store: &'a dyn TriviaStore) -> Self {
        Self { store }
    }

    /// Questions in `scope` that are not in `previous`.
    pub async fn eligible(
        &self,
        scope: CategoryScope,
        previous: &[i64],
    ) -> StoreResult<Vec<Question>> {
        let filter = scope.filter().excluding(previous.iter().copied());
        self.store.list_questions(&filter, None).await
    }

    /// One eligible question picked uniformly at random, `None` once all were shown.
    pub async fn next_question(
        &self,
        scope: CategoryScope,
        previous: &[i64],
    ) -> StoreResult<Option<Question>> {
        let candidates = self.eligible(scope, previous).await?;
        Ok(pick_uniform(candidates, &mut rand::rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_store;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sentinel_type_or_zero_id_means_all_categories() {
        assert_eq!(CategoryScope::resolve(0, Some("click")), CategoryScope::All);
        assert_eq!(CategoryScope::resolve(3, Some("click")), CategoryScope::All);
        assert_eq!(CategoryScope::resolve(0, None), CategoryScope::All);
        assert_eq!(
            CategoryScope::resolve(1, Some("Science")),
            CategoryScope::Only(1)
        );
        assert_eq!(CategoryScope::resolve(2, None), CategoryScope::Only(2));
    }

    #[tokio::test]
    async fn eligible_respects_category_and_history() {
        let store = seeded_store().await;
        let selector = QuizSelector::new(&store);

        let eligible = selector
            .eligible(CategoryScope::Only(2), &[11])
            .await
            .unwrap();
        let ids: Vec<i64> = eligible.iter().map(|q| q.id).collect();

        assert_eq!(ids, vec![12]);
    }

    #[tokio::test]
    async fn never_repeats_a_question() {
        let store = seeded_store().await;
        let selector = QuizSelector::new(&store);
        let mut rng = StdRng::seed_from_u64(99);
        let mut previous = Vec::new();

        loop {
            let candidates = selector
                .eligible(CategoryScope::Only(1), &previous)
                .await
                .unwrap();
            let Some(q) = pick_uniform(candidates, &mut rng) else {
                break;
            };
            assert_eq!(q.category, 1);
            assert!(!previous.contains(&q.id));
            previous.push(q.id);
        }

        assert_eq!(previous.len(), 10);
    }

    #[tokio::test]
    async fn exhausted_history_yields_none() {
        let store = seeded_store().await;
        let selector = QuizSelector::new(&store);
        let everything: Vec<i64> = (1..=12).collect();

        let next = selector
            .next_question(CategoryScope::All, &everything)
            .await
            .unwrap();

        assert_eq!(next, None);
    }
}
