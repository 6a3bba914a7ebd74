//! In-process stand-in for the habits REST API.
//!
//! Runs an axum server on an ephemeral port in a background thread with its
//! own runtime, so both `#[tokio::test]` and plain `assert_cmd` tests can use it.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "correct horse";

#[derive(Default)]
pub struct MockDb {
    pub user: Value,
    pub habits: Vec<Value>,
    pub completions: Vec<Value>,
    pub categories: Vec<Value>,
    pub logged_out: bool,
    /// `User-Agent` of every request that reached a recording handler
    pub user_agents: Vec<String>,
    next_id: i64,
}

impl MockDb {
    fn seeded() -> Self {
        Self {
            user: json!({"id": 1, "username": "jo", "email": "jo@example.com"}),
            categories: vec![json!({"id": 1, "title": "Health"})],
            habits: vec![
                json!({
                    "id": 1, "title": "Drink water", "frequency": "daily",
                    "repeat_interval": 1, "custom_days": [],
                    "start_date": "2024-01-01", "end_date": null,
                    "category_id": 1, "user_id": 1
                }),
                json!({
                    "id": 2, "title": "Weekly review", "frequency": "weekly",
                    "repeat_interval": 1, "custom_days": [],
                    "start_date": "2024-01-01", "end_date": null,
                    "category_id": null, "user_id": 1
                }),
                json!({
                    "id": 3, "title": "Gym", "frequency": "custom",
                    "repeat_interval": 2, "custom_days": ["monday"],
                    "start_date": "2024-01-01T00:00:00Z", "end_date": "2024-12-31",
                    "category_id": 1, "user_id": 1
                }),
            ],
            completions: vec![json!({
                "id": 1, "habit_id": 1, "date": "2024-01-01T08:30:00.000Z"
            })],
            logged_out: false,
            user_agents: Vec::new(),
            next_id: 100,
        }
    }

    fn record_user_agent(&mut self, headers: &HeaderMap) {
        let agent = headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        self.user_agents.push(agent.to_string());
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<MockDb>>;

pub struct MockApi {
    pub base_url: String,
    pub db: Shared,
}

impl MockApi {
    pub fn start() -> Self {
        let db: Shared = Arc::new(Mutex::new(MockDb::seeded()));
        let app = Router::new().nest("/api", routes()).with_state(db.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });
        let addr = rx.recv().unwrap();

        Self {
            base_url: format!("http://{}/api", addr),
            db,
        }
    }

    pub fn completion_count(&self, habit_id: i64) -> usize {
        let db = self.db.lock().unwrap();
        db.completions
            .iter()
            .filter(|c| c["habit_id"] == habit_id)
            .count()
    }
}

fn routes() -> Router<Shared> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/users/me", get(me).patch(update_me))
        .route("/habits", get(list_habits).post(create_habit))
        .route(
            "/habits/{id}",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
        .route(
            "/habit-completions",
            get(list_completions).post(create_completion),
        )
        .route(
            "/habit-completions/{id}",
            axum::routing::delete(delete_completion),
        )
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            axum::routing::put(update_category).delete(delete_category),
        )
}

fn error(status: StatusCode, key: &str, message: &str) -> Response {
    (status, Json(json!({ key: message }))).into_response()
}

fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "error", "invalid or missing token")),
    }
}

fn day(value: &Value) -> String {
    value.as_str().unwrap_or_default().chars().take(10).collect()
}

// ── auth ─────────────────────────────────────────────────────────────

async fn register(State(db): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return error(StatusCode::CONFLICT, "error", "username already taken");
    }
    let mut db = db.lock().unwrap();
    let id = db.next_id();
    let user = json!({"id": id, "username": body["username"], "email": body["email"]});
    db.user = user.clone();
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn login(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut db = db.lock().unwrap();
    db.record_user_agent(&headers);
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "error", "invalid credentials");
    }
    Json(json!({"token": TOKEN, "user": db.user})).into_response()
}

async fn logout(State(db): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    db.lock().unwrap().logged_out = true;
    StatusCode::NO_CONTENT.into_response()
}

async fn me(State(db): State<Shared>, headers: HeaderMap) -> Response {
    let mut db = db.lock().unwrap();
    db.record_user_agent(&headers);
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    Json(db.user.clone()).into_response()
}

async fn update_me(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    for key in ["username", "email"] {
        if let Some(v) = body.get(key) {
            db.user[key] = v.clone();
        }
    }
    Json(db.user.clone()).into_response()
}

// ── habits ───────────────────────────────────────────────────────────

async fn list_habits(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let db = db.lock().unwrap();
    let habits: Vec<Value> = db
        .habits
        .iter()
        .filter(|h| match query.get("category_id") {
            Some(id) => h["category_id"].to_string() == *id,
            None => true,
        })
        .cloned()
        .collect();
    Json(habits).into_response()
}

async fn get_habit(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let db = db.lock().unwrap();
    match db.habits.iter().find(|h| h["id"] == id) {
        Some(h) => Json(h.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "error", "habit not found"),
    }
}

async fn create_habit(State(db): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    if body["title"].as_str().unwrap_or_default().trim().is_empty() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "message", "title is required");
    }
    let mut db = db.lock().unwrap();
    let id = db.next_id();
    body["id"] = json!(id);
    body["user_id"] = json!(1);
    body["created_at"] = json!("2024-01-01T00:00:00Z");
    db.habits.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_habit(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    match db.habits.iter_mut().find(|h| h["id"] == id) {
        Some(h) => {
            body["id"] = json!(id);
            body["user_id"] = json!(1);
            *h = body.clone();
            Json(body).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "error", "habit not found"),
    }
}

async fn delete_habit(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    let before = db.habits.len();
    db.habits.retain(|h| h["id"] != id);
    if db.habits.len() == before {
        return error(StatusCode::NOT_FOUND, "error", "habit not found");
    }
    db.completions.retain(|c| c["habit_id"] != id);
    StatusCode::NO_CONTENT.into_response()
}

// ── completions ──────────────────────────────────────────────────────

async fn list_completions(
    State(db): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let db = db.lock().unwrap();
    let completions: Vec<Value> = db
        .completions
        .iter()
        .filter(|c| {
            let date = day(&c["date"]);
            query
                .get("habit_id")
                .is_none_or(|id| c["habit_id"].to_string() == *id)
                && query.get("from").is_none_or(|from| date >= *from)
                && query.get("to").is_none_or(|to| date <= *to)
        })
        .cloned()
        .collect();
    Json(completions).into_response()
}

async fn create_completion(State(db): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    let id = db.next_id();
    body["id"] = json!(id);
    db.completions.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn delete_completion(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    let before = db.completions.len();
    db.completions.retain(|c| c["id"] != id);
    if db.completions.len() == before {
        return error(StatusCode::NOT_FOUND, "error", "completion not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

// ── categories ───────────────────────────────────────────────────────

async fn list_categories(State(db): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    Json(db.lock().unwrap().categories.clone()).into_response()
}

async fn create_category(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    let id = db.next_id();
    let category = json!({"id": id, "title": body["title"]});
    db.categories.push(category.clone());
    (StatusCode::CREATED, Json(category)).into_response()
}

async fn update_category(
    State(db): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    match db.categories.iter_mut().find(|c| c["id"] == id) {
        Some(c) => {
            c["title"] = body["title"].clone();
            Json(c.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "error", "category not found"),
    }
}

async fn delete_category(State(db): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(resp) = authorize(&headers) {
        return resp;
    }
    let mut db = db.lock().unwrap();
    db.categories.retain(|c| c["id"] != id);
    for habit in db.habits.iter_mut() {
        if habit["category_id"] == id {
            habit["category_id"] = Value::Null;
        }
    }
    StatusCode::NO_CONTENT.into_response()
}
