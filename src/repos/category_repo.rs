use sqlx::PgPool;

use crate::models::Category;

#[derive(Clone)]
pub struct CategoryRepo {
    pool: PgPool,
}

impl CategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(r#"SELECT id, type FROM categories ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
    }
}
