use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{NewQuestion, Question};
use crate::repos::QuestionFilter;
use crate::services::pagination::PageWindow;

#[derive(Clone)]
pub struct QuestionRepo {
    pool: PgPool,
}

impl QuestionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_questions(
        &self,
        filter: &QuestionFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, question, answer, difficulty, category FROM questions",
        );
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        if let Some(window) = window {
            qb.push(" LIMIT ")
                .push_bind(window.limit)
                .push(" OFFSET ")
                .push_bind(window.offset);
        }

        qb.build_query_as::<Question>().fetch_all(&self.pool).await
    }

    pub async fn count_questions(&self, filter: &QuestionFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM questions");
        push_filter(&mut qb, filter);

        qb.build_query_scalar::<i64>().fetch_one(&self.pool).await
    }

    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, difficulty, category
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert_question(&self, new: &NewQuestion) -> Result<Question, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, difficulty, category
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.difficulty)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await
    }

    /// Returns the number of deleted rows.
    pub async fn delete_question(&self, id: i64) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected())
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &QuestionFilter) {
    qb.push(" WHERE TRUE");
    if let Some(term) = &filter.search {
        qb.push(" AND question ILIKE ")
            .push_bind(like_pattern(term))
            .push(r" ESCAPE '\'");
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if !filter.exclude.is_empty() {
        qb.push(" AND id <> ALL(")
            .push_bind(filter.exclude.clone())
            .push(")");
    }
}

/// Wraps `term` in `%` after escaping the LIKE metacharacters it contains.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
