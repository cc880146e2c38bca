/// Axum REST API routes.
///
///   GET    /                  -> service name + version
///   GET    /health            -> health check
///   GET    /tasks             -> full board document
///   GET    /tasks/{column_id} -> one column's task mapping
///   POST   /tasks/{column_id} -> create task in column
///   PUT    /tasks/{task_id}   -> partial update of a task
///   DELETE /tasks/{task_id}   -> delete task from whichever column holds it
///   POST   /tasks/move        -> move task between columns

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use taskboard_core::service::BoardError;
use taskboard_core::types::{now_secs, Board, ColumnId, ColumnTasks, Task};

use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Deserialize)]
pub struct CreateTaskBody {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
pub struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
pub struct MoveTaskBody {
    #[serde(default)]
    source_column: String,
    #[serde(default)]
    destination_column: String,
    #[serde(default)]
    task_id: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/tasks", get(list_all_tasks))
        .route("/tasks/move", post(move_task))
        // {id} is a column name for GET/POST and a task ID for PUT/DELETE.
        .route(
            "/tasks/{id}",
            get(list_column_tasks)
                .post(create_task)
                .put(update_task)
                .delete(delete_task),
        )
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Task Board API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": now_secs(),
    }))
}

async fn list_all_tasks(State(state): State<AppState>) -> Result<Json<Board>, ApiError> {
    let board = state
        .service
        .list_all()
        .map_err(|e| board_error(e, "taskboard.api.list_all"))?;
    Ok(Json(board))
}

async fn list_column_tasks(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
) -> Result<Json<ColumnTasks>, ApiError> {
    let column = parse_column(&column_id, "taskboard.api.list_column")?;
    let tasks = state
        .service
        .list_column(column)
        .map_err(|e| board_error(e, "taskboard.api.list_column"))?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    Json(body): Json<CreateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let column = parse_column(&column_id, "taskboard.api.create")?;
    let task = state
        .service
        .create(column, body.title, body.description)
        .map_err(|e| board_error(e, "taskboard.api.create"))?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .service
        .update(&task_id, body.title, body.description)
        .map_err(|e| board_error(e, "taskboard.api.update"))?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let task = state
        .service
        .delete(&task_id)
        .map_err(|e| board_error(e, "taskboard.api.delete"))?;
    Ok(Json(serde_json::json!({
        "message": "Task deleted successfully",
        "deleted_task": task,
    })))
}

async fn move_task(
    State(state): State<AppState>,
    Json(body): Json<MoveTaskBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if body.source_column.is_empty() || body.destination_column.is_empty() || body.task_id.is_empty()
    {
        return Err(bad_request(
            "Missing required fields: source_column, destination_column, task_id",
            "taskboard.api.move",
        ));
    }

    let source = body.source_column.parse::<ColumnId>().map_err(|_| {
        bad_request(
            &format!(
                "Invalid source column '{}'. Valid columns are: {}",
                body.source_column,
                ColumnId::valid_list()
            ),
            "taskboard.api.move",
        )
    })?;
    let destination = body.destination_column.parse::<ColumnId>().map_err(|_| {
        bad_request(
            &format!(
                "Invalid destination column '{}'. Valid columns are: {}",
                body.destination_column,
                ColumnId::valid_list()
            ),
            "taskboard.api.move",
        )
    })?;

    let task = state
        .service
        .move_task(source, destination, &body.task_id)
        .map_err(|e| board_error(e, "taskboard.api.move"))?;

    Ok(Json(serde_json::json!({
        "message": "Task moved successfully",
        "task": task,
        "from": source,
        "to": destination,
    })))
}

// ── Shared helpers ──────────────────────────────────────────────────────

fn parse_column(column_id: &str, target: &'static str) -> Result<ColumnId, ApiError> {
    column_id.parse::<ColumnId>().map_err(|_| {
        bad_request(
            &format!(
                "Invalid column. Valid columns are: {}",
                ColumnId::valid_list()
            ),
            target,
        )
    })
}

fn bad_request(message: &str, target: &'static str) -> ApiError {
    let status = StatusCode::BAD_REQUEST;
    log_api_issue(status, target, message);
    (
        status,
        Json(ErrorResponse {
            detail: message.to_string(),
        }),
    )
}

fn board_error(e: BoardError, target: &'static str) -> ApiError {
    let status = match &e {
        BoardError::TaskNotFound(_) | BoardError::TaskNotInColumn { .. } => StatusCode::NOT_FOUND,
        BoardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let detail = e.to_string();
    log_api_issue(status, target, &detail);
    (status, Json(ErrorResponse { detail }))
}

fn log_api_issue(status: StatusCode, target: &'static str, message: impl AsRef<str>) {
    let message = message.as_ref();
    if status.is_server_error() {
        log::error!(target: target, "{}", message);
    } else {
        log::warn!(target: target, "{}", message);
    }
}
