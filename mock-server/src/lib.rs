use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub body: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    /// A missing body reads as empty and is refused as such.
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub body: Option<String>,
    pub completed: Option<bool>,
}

/// Todos in insertion order, which is also the order `GET` returns.
pub type Db = Arc<RwLock<Vec<Todo>>>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Cannot parse JSON")]
    BadJson,
    #[error("Todo body is required")]
    EmptyBody,
    #[error("Invalid todo ID")]
    InvalidId,
    #[error("Todo not found")]
    NotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadJson | ServerError::EmptyBody | ServerError::InvalidId => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Built front end served at `/`, only set in production.
    pub static_dir: Option<PathBuf>,
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(%rejection, "rejected request body");
        ServerError::BadJson
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `ENV=production` turns on static files from `STATIC_DIR` or `./client/dist`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let production = lookup("ENV").is_some_and(|v| v == "production");
        let static_dir = production.then(|| {
            lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./client/dist"))
        });
        Self { static_dir }
    }
}

pub fn app() -> Router {
    app_with(&ServerConfig::default())
}

pub fn app_with(config: &ServerConfig) -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    let api = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .with_state(db);

    let mut router = Router::new().nest("/api", api);
    if let Some(dir) = &config.static_dir {
        info!(dir = %dir.display(), "serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }
    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, config: &ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn parse_id(id: &str) -> Result<(), ServerError> {
    Uuid::parse_str(id).map(|_| ()).map_err(|_| ServerError::InvalidId)
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ServerError> {
    let Json(input) = payload?;
    if input.body.is_empty() {
        return Err(ServerError::EmptyBody);
    }
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        body: input.body,
        completed: false,
    };
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ServerError> {
    parse_id(&id)?;
    let Json(input) = payload?;
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or(ServerError::NotFound)?;
    if let Some(body) = input.body {
        todo.body = body;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    parse_id(&id)?;
    let mut todos = db.write().await;
    let index = todos.iter().position(|t| t.id == id).ok_or(ServerError::NotFound)?;
    todos.remove(index);
    Ok(Json(json!({ "success": true })))
}
