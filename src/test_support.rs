//! Shared fixtures for the in-crate tests.

use std::sync::Arc;

use poem::Endpoint;
use poem::test::{TestClient, TestResponse};
use serde_json::Value;

use crate::models::NewQuestion;
use crate::repos::TriviaStore;
use crate::repos::memory::MemoryStore;
use crate::routes::build_app;
use crate::state::AppState;

const SEED_QUESTIONS: [(&str, &str, i32, i64); 12] = [
    ("What is the heaviest organ in the human body?", "The Liver", 4, 1),
    ("Who discovered penicillin?", "Alexander Fleming", 3, 1),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 4, 1),
    ("What is the chemical symbol for gold?", "Au", 1, 1),
    ("Which planet has the most moons?", "Saturn", 2, 1),
    ("What gas do plants absorb from the air?", "Carbon dioxide", 1, 1),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 2, 1),
    ("What is the speed of light in km/s, roughly?", "300000", 3, 1),
    ("What is the title of the 1990 fantasy directed by Tim Burton?", "Edward Scissorhands", 3, 1),
    ("How many bones are in the adult human body?", "206", 2, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", 3, 2),
    ("Which Dutch graphic artist was initials M C a creator of optical illusions?", "Escher", 1, 2),
];

/// Three categories and twelve questions: ids 1-10 in category 1, 11-12 in category 2.
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::with_categories(["Science", "Art", "Geography"]);
    for (question, answer, difficulty, category) in SEED_QUESTIONS {
        store
            .insert_question(NewQuestion {
                question: question.to_string(),
                answer: answer.to_string(),
                difficulty,
                category,
            })
            .await
            .unwrap();
    }
    store
}

pub fn test_client(store: MemoryStore) -> TestClient<impl Endpoint> {
    shared_client(Arc::new(store))
}

/// Client over a store the test keeps a handle to.
pub fn shared_client(store: Arc<MemoryStore>) -> TestClient<impl Endpoint> {
    let app = build_app(AppState::new(store), "http://localhost/api/v1".to_string());
    TestClient::new(app)
}

pub async fn seeded_client() -> TestClient<impl Endpoint> {
    test_client(seeded_store().await)
}

pub async fn body_json(resp: TestResponse) -> Value {
    resp.0.into_body().into_json().await.unwrap()
}
